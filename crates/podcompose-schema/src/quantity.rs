//! Resource quantities in the Kubernetes notation used by appc resource isolators
//! (`500m`, `250u`, `1.5`, `64M`, `128Mi`, `1e3`).
//!
//! Quantities are validated but kept verbatim; no canonicalisation is applied,
//! so the emitted manifest carries exactly what the user wrote.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

const BINARY_SUFFIXES: &[&str] = &["Ki", "Mi", "Gi", "Ti", "Pi", "Ei"];
const DECIMAL_SUFFIXES: &[&str] = &["n", "u", "m", "k", "M", "G", "T", "P", "E"];

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum QuantityError {
    #[error("quantity must not be empty")]
    Empty,
    #[error("invalid quantity '{0}': expected <number><suffix>")]
    InvalidNumber(String),
    #[error("invalid quantity '{input}': unknown suffix '{suffix}'")]
    InvalidSuffix { input: String, suffix: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Quantity {
    raw: String,
}

impl Quantity {
    pub fn parse(input: &str) -> Result<Self, QuantityError> {
        if input.is_empty() {
            return Err(QuantityError::Empty);
        }

        let number_len = signed_number_len(input)
            .ok_or_else(|| QuantityError::InvalidNumber(input.to_owned()))?;
        let suffix = &input[number_len..];

        if !is_valid_suffix(suffix) {
            return Err(QuantityError::InvalidSuffix {
                input: input.to_owned(),
                suffix: suffix.to_owned(),
            });
        }

        Ok(Self {
            raw: input.to_owned(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl TryFrom<String> for Quantity {
    type Error = QuantityError;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<Quantity> for String {
    fn from(q: Quantity) -> Self {
        q.raw
    }
}

/// Byte length of the leading `[+-]digits[.digits]` run, or `None` if no digits.
fn signed_number_len(s: &str) -> Option<usize> {
    let bytes = s.as_bytes();
    let mut i = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        i += 1;
    }
    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let mut digits = i - int_start;
    if i < bytes.len() && bytes[i] == b'.' {
        i += 1;
        let frac_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        digits += i - frac_start;
    }
    (digits > 0).then_some(i)
}

fn is_valid_suffix(suffix: &str) -> bool {
    if suffix.is_empty() || BINARY_SUFFIXES.contains(&suffix) || DECIMAL_SUFFIXES.contains(&suffix)
    {
        return true;
    }
    // Decimal exponent: e<int> / E<int>
    let Some(exponent) = suffix.strip_prefix(['e', 'E']) else {
        return false;
    };
    let digits = exponent.strip_prefix(['+', '-']).unwrap_or(exponent);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}
