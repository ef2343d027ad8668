use std::{fmt::Display, str::FromStr};

use bigdecimal::{BigDecimal, Zero};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

/// Separator between elements of an encoded vector
pub const DELIMITER: &str = "::";

/// Ordered list of decimal elements
///
/// The text form (see [`encode`] / [`decode`]) is the only representation
/// stored in a table column.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DecimalVector {
    elements: Vec<BigDecimal>,
}

impl DecimalVector {
    pub fn new() -> Self {
        Self { elements: Vec::new() }
    }

    /// Appends an element to the end of the vector
    pub fn push(&mut self, element: BigDecimal) {
        self.elements.push(element);
    }

    pub fn elements(&self) -> &[BigDecimal] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Element at `index`, or zero past the end
    pub fn get_or_zero(&self, index: usize) -> BigDecimal {
        get_or_zero(&self.elements, index)
    }

    pub fn into_inner(self) -> Vec<BigDecimal> {
        self.elements
    }
}

impl From<Vec<BigDecimal>> for DecimalVector {
    fn from(elements: Vec<BigDecimal>) -> Self {
        Self { elements }
    }
}

impl Display for DecimalVector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", encode(&self.elements))
    }
}

impl FromStr for DecimalVector {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        decode(s)
    }
}

/// Joins the canonical text of every element with [`DELIMITER`]
pub fn encode(elements: &[BigDecimal]) -> String {
    elements
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join(DELIMITER)
}

/// Parses an encoded vector
///
/// Blank input decodes to `[0]` so that vector math never sees a
/// zero-length operand. Blank tokens between delimiters are skipped.
pub fn decode(encoded: &str) -> Result<DecimalVector> {
    if encoded.trim().is_empty() {
        return Ok(DecimalVector::from(vec![BigDecimal::zero()]));
    }

    let mut vector = DecimalVector::new();
    for token in encoded.split(DELIMITER) {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }
        debug!(token, "parsing vector element");
        vector.push(parse_decimal(token)?);
    }
    Ok(vector)
}

/// Parses one decimal literal, plain (`-1.25`) or scientific (`1.5E+3`)
///
/// Digits are unbounded. Anything outside the literal grammar, digit
/// separators included, is rejected.
pub fn parse_decimal(token: &str) -> Result<BigDecimal> {
    if !is_decimal_literal(token) {
        return Err(Error::Parse(format!("invalid decimal {:?}", token)));
    }
    BigDecimal::from_str(token)
        .map_err(|e| Error::Parse(format!("invalid decimal {:?}: {}", token, e)))
}

/// `[+-] digits [. digits] [(e|E) [+-] digits]`, with digits on at least one
/// side of the point
fn is_decimal_literal(token: &str) -> bool {
    let digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    let unsigned = token.strip_prefix(['+', '-']).unwrap_or(token);
    let (significand, exponent) = match unsigned.find(['e', 'E']) {
        Some(at) => (&unsigned[..at], Some(&unsigned[at + 1..])),
        None => (unsigned, None),
    };
    let (int, frac) = significand.split_once('.').unwrap_or((significand, ""));
    let exponent_ok = match exponent {
        Some(exp) => {
            let exp = exp.strip_prefix(['+', '-']).unwrap_or(exp);
            !exp.is_empty() && digits(exp)
        }
        None => true,
    };
    !(int.is_empty() && frac.is_empty()) && digits(int) && digits(frac) && exponent_ok
}

pub(crate) fn get_or_zero(elements: &[BigDecimal], index: usize) -> BigDecimal {
    elements.get(index).cloned().unwrap_or_else(BigDecimal::zero)
}
