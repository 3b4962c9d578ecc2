use rand::Rng;

use crate::features::{RawRow, TIME_SCALE};

pub const DEFAULT_SAMPLE_SIZE: usize = 20;

const SAMPLE_BANKS: [&str; 10] = [
    "SCB", "KTB", "BBL", "KBANK", "TTB", "BAY", "GSB", "CIMB", "UOB", "TISCO",
];

// e.g. "KBANK-012-345-6789"
pub fn random_account<R: Rng + ?Sized>(rng: &mut R) -> String {
    let bank = SAMPLE_BANKS[rng.gen_range(0..SAMPLE_BANKS.len())];
    let digits: String = (0..10)
        .map(|_| char::from(b'0' + rng.gen_range(0..10_u8)))
        .collect();
    format!("{}-{}-{}-{}", bank, &digits[..3], &digits[3..6], &digits[6..])
}

// Synthetic rows shaped like real uploads: an account, a time within the
// 48 hour window, and V1..V28 in [-2, 2).
pub fn generate_sample_rows<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Vec<RawRow> {
    (0..n)
        .map(|_| {
            let mut row = RawRow::new()
                .with("Accounts", random_account(rng))
                .with("Time", rng.gen_range(0.0..TIME_SCALE));
            for k in 1..=28 {
                row.insert(format!("V{}", k), rng.gen_range(-2.0_f64..2.0));
            }
            row
        })
        .collect()
}
