use std::fmt;

use serde::Serialize;

use crate::features::{RawRow, ACCOUNTS_FIELD};
use crate::model::Prediction;

const HIGH_RISK_CONFIDENCE: f64 = 0.8;
const MEDIUM_RISK_CONFIDENCE: f64 = 0.6;
pub const HISTOGRAM_BINS: usize = 10;

// Batch-level counts shown above the results table
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Summary {
    pub total: usize,
    pub fraudulent: usize,
    pub legitimate: usize,
    // Percent, 0 for an empty batch
    pub fraud_rate: f64,
}

impl Summary {
    pub fn from_predictions(predictions: &[Prediction]) -> Self {
        let total = predictions.len();
        let fraudulent = predictions.iter().filter(|p| p.is_fraud()).count();
        let fraud_rate = if total > 0 {
            fraudulent as f64 / total as f64 * 100.0
        } else {
            0.0
        };

        Self {
            total,
            fraudulent,
            legitimate: total - fraudulent,
            fraud_rate,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RiskLevel {
    High,
    Medium,
    Low,
    Safe,
}

impl RiskLevel {
    // Legitimate rows are always safe; fraud is graded by confidence
    pub fn classify(confidence: f64, prediction: u8) -> Self {
        if prediction != 1 {
            return RiskLevel::Safe;
        }
        if confidence > HIGH_RISK_CONFIDENCE {
            RiskLevel::High
        } else if confidence > MEDIUM_RISK_CONFIDENCE {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::High => "High Risk",
            RiskLevel::Medium => "Medium Risk",
            RiskLevel::Low => "Low Risk",
            RiskLevel::Safe => "Safe",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One line of the per-account results table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccountLine {
    // 1-based
    pub row: usize,
    pub account: String,
    pub prediction: u8,
    pub confidence: f64,
    pub score: f64,
    pub risk: RiskLevel,
}

impl AccountLine {
    pub fn label(&self) -> &'static str {
        if self.prediction == 1 {
            "Fraudulent"
        } else {
            "Legitimate"
        }
    }
}

pub fn account_lines(rows: &[RawRow], predictions: &[Prediction]) -> Vec<AccountLine> {
    predictions
        .iter()
        .enumerate()
        .map(|(i, pred)| {
            let account = rows
                .get(i)
                .and_then(|row| row.get(ACCOUNTS_FIELD))
                .map(|value| value.render())
                .unwrap_or_else(|| "—".to_string());
            AccountLine {
                row: i + 1,
                account,
                prediction: pred.prediction,
                confidence: pred.confidence,
                score: pred.score,
                risk: RiskLevel::classify(pred.confidence, pred.prediction),
            }
        })
        .collect()
}

// Counts per 10%-wide confidence bin; a confidence of exactly 1.0 lands in the last bin
pub fn confidence_histogram(predictions: &[Prediction]) -> [usize; HISTOGRAM_BINS] {
    let mut bins = [0; HISTOGRAM_BINS];
    for pred in predictions {
        let bin = (pred.confidence * HISTOGRAM_BINS as f64).floor();
        let bin = if bin.is_finite() && bin > 0.0 {
            (bin as usize).min(HISTOGRAM_BINS - 1)
        } else {
            0
        };
        bins[bin] += 1;
    }
    bins
}
