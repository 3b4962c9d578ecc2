// Command-line front end: loads rows from a CSV file (or generates sample
// rows), scores them with the fixed model and prints the results.
use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;

use fraud_shield::csv_reader::read_rows;
use fraud_shield::report::{account_lines, confidence_histogram, AccountLine, Summary, HISTOGRAM_BINS};
use fraud_shield::sample::{generate_sample_rows, DEFAULT_SAMPLE_SIZE};
use fraud_shield::{FraudDetector, RawRow};

#[derive(Parser, Debug)]
#[command(name = "fraud_shield", about = "Score bank account transactions with a fixed fraud model")]
struct Args {
    /// CSV file with Time, V1..V28 and Accounts columns
    csv: Option<PathBuf>,

    /// Number of sample rows to generate when no CSV file is given
    #[arg(long, default_value_t = DEFAULT_SAMPLE_SIZE)]
    sample: usize,

    /// Seed for sample generation
    #[arg(long)]
    seed: Option<u64>,

    /// Print one JSON object per row instead of the table
    #[arg(long)]
    json: bool,
}

fn load_rows(args: &Args) -> Result<Vec<RawRow>, Box<dyn Error>> {
    match &args.csv {
        Some(path) => {
            log::info!("Reading rows from {}", path.display());
            Ok(read_rows(path)?)
        }
        None => {
            log::info!("No CSV given, generating {} sample rows", args.sample);
            let mut rng = match args.seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            Ok(generate_sample_rows(args.sample, &mut rng))
        }
    }
}

// Prints the summary block, per-account table and confidence distribution
// Inputs: batch summary, table lines and histogram bins
// Outputs: formatted results on stdout
fn print_report(summary: &Summary, lines: &[AccountLine], bins: &[usize; HISTOGRAM_BINS]) {
    println!("Fraud Detection Results:");
    println!("Total Bank Accounts: {}", summary.total);
    println!("Fraudulent: {}", summary.fraudulent);
    println!("Legitimate: {}", summary.legitimate);
    println!("Fraud Rate: {:.1}%", summary.fraud_rate);

    println!("\n{:>5}  {:<22} {:<11} {:>10}  Risk Level", "Row", "Bank Account", "Prediction", "Confidence");
    for line in lines {
        println!(
            "{:>5}  {:<22} {:<11} {:>9.1}%  {}",
            line.row,
            line.account,
            line.label(),
            line.confidence * 100.0,
            line.risk
        );
    }

    println!("\nConfidence Distribution:");
    for (i, count) in bins.iter().enumerate() {
        if *count > 0 {
            println!("{:>3}-{:<3}% {}", i * 10, (i + 1) * 10, "#".repeat(*count));
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let rows = load_rows(&args)?;
    if rows.is_empty() {
        println!("No rows to score.");
        return Ok(());
    }

    let detector = FraudDetector::new();
    let predictions = detector.predict(&rows);
    let lines = account_lines(&rows, &predictions);

    if args.json {
        for line in &lines {
            println!("{}", serde_json::to_string(line)?);
        }
        return Ok(());
    }

    let summary = Summary::from_predictions(&predictions);
    log::info!("Scored {} rows, {} flagged", summary.total, summary.fraudulent);
    print_report(&summary, &lines, &confidence_histogram(&predictions));

    Ok(())
}
