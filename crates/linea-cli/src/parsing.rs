//! Text-to-number parsing for request cells.
//!
//! Cells may be integers, decimals or signed fractions `p/q`. Matrices must
//! be non-empty and rectangular before they are handed to `linea-core`.

use serde::Deserialize;
use thiserror::Error;

use linea_core::math::{Matrix, Vector};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("empty field is not a valid number")]
    Empty,

    #[error("not a number or invalid fraction: '{0}'")]
    Invalid(String),

    #[error("empty matrix is not valid")]
    EmptyMatrix,

    #[error("matrix with 0 columns is not valid")]
    NoColumns,

    #[error("all rows must have the same number of columns: row {row} has {found}, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("empty vector is not valid")]
    EmptyVector,
}

/// A request cell: either a JSON number or text to parse.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum NumberInput {
    Number(f64),
    Text(String),
}

impl NumberInput {
    pub fn value(&self) -> Result<f64, ParseError> {
        match self {
            NumberInput::Number(v) if v.is_finite() => Ok(*v),
            NumberInput::Number(v) => Err(ParseError::Invalid(v.to_string())),
            NumberInput::Text(s) => parse_number(s),
        }
    }
}

impl From<f64> for NumberInput {
    fn from(value: f64) -> Self {
        NumberInput::Number(value)
    }
}

impl From<&str> for NumberInput {
    fn from(value: &str) -> Self {
        NumberInput::Text(value.to_string())
    }
}

/// Parse an integer, decimal or `p/q` fraction. Surrounding whitespace is
/// ignored; non-finite values are rejected.
pub fn parse_number(text: &str) -> Result<f64, ParseError> {
    let s = text.trim();
    if s.is_empty() {
        return Err(ParseError::Empty);
    }
    let value = match s.split_once('/') {
        Some((num, den)) => parse_fraction(num, den),
        None => s.parse::<f64>().ok(),
    };
    match value {
        Some(v) if v.is_finite() => Ok(v),
        _ => Err(ParseError::Invalid(text.to_string())),
    }
}

fn parse_fraction(num: &str, den: &str) -> Option<f64> {
    let (negative, digits) = match num.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, num.strip_prefix('+').unwrap_or(num)),
    };
    if !is_digits(digits) || !is_digits(den) {
        return None;
    }
    let n: f64 = digits.parse().ok()?;
    let d: f64 = den.parse().ok()?;
    if d == 0.0 {
        return None;
    }
    Some(if negative { -n / d } else { n / d })
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

pub fn parse_matrix(cells: &[Vec<NumberInput>]) -> Result<Matrix, ParseError> {
    let first = cells.first().ok_or(ParseError::EmptyMatrix)?;
    let cols = first.len();
    if cols == 0 {
        return Err(ParseError::NoColumns);
    }
    let mut rows = Vec::with_capacity(cells.len());
    for (idx, row) in cells.iter().enumerate() {
        if row.len() != cols {
            return Err(ParseError::Ragged {
                row: idx,
                expected: cols,
                found: row.len(),
            });
        }
        rows.push(row.iter().map(NumberInput::value).collect::<Result<Vec<_>, _>>()?);
    }
    Matrix::from_rows(&rows).map_err(|e| ParseError::Invalid(e.to_string()))
}

pub fn parse_vector(cells: &[NumberInput]) -> Result<Vector, ParseError> {
    if cells.is_empty() {
        return Err(ParseError::EmptyVector);
    }
    cells.iter().map(NumberInput::value).collect::<Result<Vec<_>, _>>().map(Vector::from_vec)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers_decimals_and_fractions() {
        assert_eq!(parse_number("3").unwrap(), 3.0);
        assert_eq!(parse_number(" -2.5 ").unwrap(), -2.5);
        assert_eq!(parse_number("-3/4").unwrap(), -0.75);
        assert_eq!(parse_number("+1/8").unwrap(), 0.125);
        assert_eq!(parse_number("1e3").unwrap(), 1000.0);
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_number("   "), Err(ParseError::Empty));
        assert!(parse_number("abc").is_err());
        assert!(parse_number("1/0").is_err());
        assert!(parse_number("1.5/2").is_err());
        assert!(parse_number("1/2/3").is_err());
        assert!(parse_number("/2").is_err());
        assert!(parse_number("inf").is_err());
        assert!(parse_number("NaN").is_err());
    }
}
