// Fixed linear fraud scoring over tabular transaction rows.
// Rows flow Extract -> Scale -> Score -> Map; everything else in the crate
// feeds rows in (CSV, sample data) or summarises predictions coming out.
pub mod csv_reader;
pub mod detector;
pub mod encoding;
pub mod error;
pub mod features;
pub mod model;
pub mod report;
pub mod sample;


pub use detector::{predict, FraudDetector};
pub use error::{Error, Result};
pub use features::{RawRow, RawValue, ScaledFeatures, FEATURE_SCHEMA};
pub use model::{ModelWeights, Prediction, BIAS, MODEL_WEIGHTS};
