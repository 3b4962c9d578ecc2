use std::collections::HashMap;

use ndarray::Array1;
use serde::{Deserialize, Serialize};

use crate::encoding::account_to_numeric_feature;

// Ordered input fields the model knows about. Anything else in a row is ignored.
pub const FEATURE_SCHEMA: [&str; 30] = [
    "Time", "V1", "V2", "V3", "V4", "V5", "V6", "V7", "V8", "V9",
    "V10", "V11", "V12", "V13", "V14", "V15", "V16", "V17", "V18",
    "V19", "V20", "V21", "V22", "V23", "V24", "V25", "V26", "V27",
    "V28", "Accounts",
];

pub const TIME_FIELD: &str = "Time";
pub const ACCOUNTS_FIELD: &str = "Accounts";
pub const ACCOUNTS_NUMERIC_FIELD: &str = "Accounts_numeric";

// Seconds in 48 hours
pub const TIME_SCALE: f64 = 172_800.0;

pub fn schema_index(field: &str) -> Option<usize> {
    FEATURE_SCHEMA.iter().position(|name| *name == field)
}

/// A single untrusted cell as handed over by a row producer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl RawValue {
    /// Numeric reading of the value. May be NaN or infinite; callers that
    /// need a model-ready number use [`RawValue::finite_or_zero`].
    pub fn to_number(&self) -> f64 {
        match self {
            RawValue::Null => 0.0,
            RawValue::Bool(flag) => {
                if *flag {
                    1.0
                } else {
                    0.0
                }
            }
            RawValue::Number(value) => *value,
            RawValue::Text(text) => parse_numeric_text(text),
        }
    }

    pub fn finite_or_zero(&self) -> f64 {
        let value = self.to_number();
        if value.is_finite() {
            value
        } else {
            0.0
        }
    }

    /// String form used when an identifier has to be read as text.
    pub fn render(&self) -> String {
        match self {
            RawValue::Null => String::new(),
            RawValue::Bool(flag) => flag.to_string(),
            RawValue::Number(value) => render_number(*value),
            RawValue::Text(text) => text.clone(),
        }
    }

    fn is_null(&self) -> bool {
        matches!(self, RawValue::Null)
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        RawValue::Number(value)
    }
}

impl From<bool> for RawValue {
    fn from(value: bool) -> Self {
        RawValue::Bool(value)
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        RawValue::Text(value)
    }
}

// Parses text the way a lenient numeric cast does: surrounding whitespace
// and byte order marks are ignored, blank text is zero, radix prefixes are
// honoured, and anything else that is not plain decimal float syntax is NaN.
fn parse_numeric_text(text: &str) -> f64 {
    let trimmed = text.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}');
    if trimmed.is_empty() {
        return 0.0;
    }

    let radix = match trimmed.get(..2) {
        Some("0x") | Some("0X") => Some(16),
        Some("0o") | Some("0O") => Some(8),
        Some("0b") | Some("0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        let digits = &trimmed[2..];
        if digits.is_empty() {
            return f64::NAN;
        }
        let parsed = digits.chars().try_fold(0.0_f64, |acc, c| {
            c.to_digit(radix).map(|d| acc * f64::from(radix) + f64::from(d))
        });
        return parsed.unwrap_or(f64::NAN);
    }

    match trimmed {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    // Rust's float parser also accepts "inf" and "nan" spellings; those are
    // not numbers here.
    if trimmed
        .chars()
        .any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E')
    {
        return f64::NAN;
    }

    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

fn render_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let magnitude = value.abs();
    if magnitude >= 1e21 || magnitude < 1e-6 {
        let formatted = format!("{:e}", value);
        // Positive exponents carry an explicit sign: 1e21 -> "1e+21"
        match formatted.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{}e+{}", mantissa, exponent)
            }
            _ => formatted,
        }
    } else {
        format!("{}", value)
    }
}

/// Column name to cell value. Producers enforce nothing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawRow {
    fields: HashMap<String, RawValue>,
}

impl RawRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: impl Into<String>, value: impl Into<RawValue>) -> Self {
        self.insert(field, value);
        self
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<RawValue>) -> Option<RawValue> {
        self.fields.insert(field.into(), value.into())
    }

    pub fn get(&self, field: &str) -> Option<&RawValue> {
        self.fields.get(field)
    }

    /// Total lookup: the stored value, or `default` when the field is absent
    /// or null.
    pub fn value_or(&self, field: &str, default: RawValue) -> RawValue {
        match self.fields.get(field) {
            Some(value) if !value.is_null() => value.clone(),
            _ => default,
        }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<RawValue>> FromIterator<(K, V)> for RawRow {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = RawRow::new();
        for (field, value) in iter {
            row.insert(field, value);
        }
        row
    }
}

// Schema-ordered raw values selected from a row
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedFeatures {
    values: Vec<RawValue>,
}

impl ExtractedFeatures {
    pub fn get(&self, field: &str) -> Option<&RawValue> {
        schema_index(field).map(|i| &self.values[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &RawValue)> + '_ {
        FEATURE_SCHEMA.iter().copied().zip(self.values.iter())
    }
}

// Picks every schema field out of the row, zero when missing.
pub fn extract_features(row: &RawRow) -> ExtractedFeatures {
    let values = FEATURE_SCHEMA
        .iter()
        .map(|field| row.value_or(field, RawValue::Number(0.0)))
        .collect();
    ExtractedFeatures { values }
}

/// Model-ready features in schema order. Every entry is finite.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaledFeatures {
    values: Array1<f64>,
}

impl ScaledFeatures {
    pub fn get(&self, field: &str) -> Option<f64> {
        schema_index(field).map(|i| self.values[i])
    }

    pub fn as_array(&self) -> &Array1<f64> {
        &self.values
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        FEATURE_SCHEMA.iter().copied().zip(self.values.iter().copied())
    }
}

// Normalize extracted values. The account identifier is re-read from the
// original row since its encoding needs fields outside the schema.
pub fn scale_features(row: &RawRow, features: &ExtractedFeatures) -> ScaledFeatures {
    let values = features
        .iter()
        .map(|(field, value)| match field {
            ACCOUNTS_FIELD => account_to_numeric_feature(row),
            TIME_FIELD => value.finite_or_zero() / TIME_SCALE,
            _ => value.finite_or_zero(),
        })
        .collect::<Array1<f64>>();
    ScaledFeatures { values }
}
