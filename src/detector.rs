use crate::features::{extract_features, scale_features, RawRow};
use crate::model::{ModelWeights, Prediction};

/// Runs rows through Extract -> Scale -> Score -> Map.
///
/// Holds only the immutable weights, so a single detector can score any
/// number of batches and every row's result depends on that row alone.
#[derive(Debug, Clone, Default)]
pub struct FraudDetector {
    weights: ModelWeights,
}

impl FraudDetector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_weights(weights: ModelWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &ModelWeights {
        &self.weights
    }

    pub fn predict_row(&self, row: &RawRow) -> Prediction {
        let features = extract_features(row);
        let scaled = scale_features(row, &features);
        let score = self.weights.score(&scaled);
        Prediction::from_score(score)
    }

    // One prediction per row, same order as the input
    pub fn predict(&self, rows: &[RawRow]) -> Vec<Prediction> {
        log::debug!("scoring {} rows", rows.len());
        rows.iter().map(|row| self.predict_row(row)).collect()
    }
}

pub fn predict(rows: &[RawRow]) -> Vec<Prediction> {
    FraudDetector::new().predict(rows)
}
