use ndarray::Array1;
use serde::{Deserialize, Serialize};

use crate::features::{schema_index, ScaledFeatures, FEATURE_SCHEMA};

// Hand-specified coefficients. Not trained here and never changed at runtime.
pub const MODEL_WEIGHTS: [(&str, f64); 30] = [
    ("V1", -0.2), ("V2", 0.15), ("V3", -0.3), ("V4", 0.25), ("V5", -0.1),
    ("V6", 0.2), ("V7", -0.25), ("V8", 0.1), ("V9", -0.15), ("V10", 0.3),
    ("V11", -0.2), ("V12", 0.35), ("V13", -0.1), ("V14", 0.4), ("V15", -0.3),
    ("V16", 0.2), ("V17", -0.25), ("V18", 0.15), ("V19", -0.2), ("V20", 0.1),
    ("V21", -0.15), ("V22", 0.25), ("V23", -0.3), ("V24", 0.2), ("V25", -0.1),
    ("V26", 0.15), ("V27", -0.2), ("V28", 0.1),
    ("Accounts", 0.0001),
    ("Time", 0.00001),
];

pub const BIAS: f64 = -0.5;
pub const DECISION_THRESHOLD: f64 = 0.5;

/// Coefficient vector aligned to [`FEATURE_SCHEMA`] plus the bias term.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelWeights {
    coefficients: Array1<f64>,
    bias: f64,
}

impl ModelWeights {
    pub fn from_table(table: &[(&str, f64)], bias: f64) -> Self {
        let mut coefficients: Array1<f64> = Array1::zeros(FEATURE_SCHEMA.len());
        for &(field, weight) in table {
            match schema_index(field) {
                Some(i) => coefficients[i] = weight,
                // No feature ever fills this slot, so it adds nothing to a score
                None => log::debug!("weight for unknown feature {} ignored", field),
            }
        }
        Self { coefficients, bias }
    }

    pub fn coefficient(&self, field: &str) -> Option<f64> {
        schema_index(field).map(|i| self.coefficients[i])
    }

    pub fn bias(&self) -> f64 {
        self.bias
    }

    // Logit: bias + scaled . coefficients
    pub fn score(&self, features: &ScaledFeatures) -> f64 {
        self.bias + features.as_array().dot(&self.coefficients)
    }
}

impl Default for ModelWeights {
    fn default() -> Self {
        Self::from_table(&MODEL_WEIGHTS, BIAS)
    }
}

pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Outcome for one row. `confidence` is the probability of the predicted
/// class, so it never drops below 0.5.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub prediction: u8,
    pub confidence: f64,
    pub score: f64,
}

impl Prediction {
    pub fn from_score(score: f64) -> Self {
        let probability = class_probability(score);
        let prediction = u8::from(probability > DECISION_THRESHOLD);
        let confidence = if prediction == 1 {
            probability
        } else {
            1.0 - probability
        };
        Self {
            prediction,
            confidence,
            score,
        }
    }

    pub fn is_fraud(&self) -> bool {
        self.prediction == 1
    }

    // Probability of the fraudulent class
    pub fn probability(&self) -> f64 {
        class_probability(self.score)
    }
}

// A NaN score (opposite infinities met while summing) carries no evidence
// either way, so it sits exactly on the threshold: legitimate at 0.5.
fn class_probability(score: f64) -> f64 {
    let probability = sigmoid(score);
    if probability.is_nan() {
        DECISION_THRESHOLD
    } else {
        probability
    }
}
