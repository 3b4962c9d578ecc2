// Account identifier encoding.
//
// Identifiers arrive in any shape ("KBANK-123-456-7890", "0012345", "BANKX",
// a bare number). They are folded into one log-scaled value so the fixed
// weight for the field stays meaningful whatever the format.
use crate::features::{RawRow, RawValue, ACCOUNTS_FIELD, ACCOUNTS_NUMERIC_FIELD};

// Only the trailing digits of an identifier are kept
pub const ACCOUNT_DIGIT_TAIL: usize = 10;
pub const HASH_MODULUS: u64 = 1_000_000_000;

// Encodes the row's account identifier
// Inputs: the full raw row
// Outputs: a finite value, roughly ln(x + 1) / 10
// Key steps (first match wins):
// 1. A finite pre-normalized `Accounts_numeric` field
// 2. The last ten digits found in `Accounts`
// 3. A 32-bit rolling hash of `Accounts` when it has no digits at all
pub fn account_to_numeric_feature(row: &RawRow) -> f64 {
    if let Some(value) = row.get(ACCOUNTS_NUMERIC_FIELD) {
        let numeric = value.to_number();
        if numeric.is_finite() {
            return log_scale(numeric);
        }
    }

    let raw = row
        .get(ACCOUNTS_FIELD)
        .map(RawValue::render)
        .unwrap_or_default();
    encode_identifier(&raw)
}

pub fn encode_identifier(raw: &str) -> f64 {
    let digits = digits_only(raw);
    if !digits.is_empty() {
        return log_scale(digit_tail_value(&digits) as f64);
    }

    let hash = u64::from(rolling_hash(raw).unsigned_abs());
    log_scale((hash % HASH_MODULUS) as f64)
}

pub fn digits_only(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

// Value of the last ACCOUNT_DIGIT_TAIL digits. Ten digits always fit in u64.
pub fn digit_tail_value(digits: &str) -> u64 {
    let start = digits.len().saturating_sub(ACCOUNT_DIGIT_TAIL);
    digits.as_bytes()[start..]
        .iter()
        .fold(0_u64, |acc, b| acc * 10 + u64::from(b - b'0'))
}

/// Polynomial rolling hash `h = h * 31 + unit` over UTF-16 code units with
/// 32-bit signed wraparound. Output must stay bit-identical across ports.
pub fn rolling_hash(s: &str) -> i32 {
    s.encode_utf16()
        .fold(0_i32, |h, unit| h.wrapping_mul(31).wrapping_add(i32::from(unit)))
}

// ln(x + 1) / 10, with values outside the log's domain treated as zero
fn log_scale(value: f64) -> f64 {
    let scaled = (value + 1.0).ln() / 10.0;
    if scaled.is_finite() {
        scaled
    } else {
        0.0
    }
}
