//! Vector functions evaluated against an encoded vector column
//!
//! The column operand is always the encoded text form; the second operand is
//! an already decoded list of decimals supplied by the query. All accumulation
//! is done in arbitrary-precision decimal arithmetic and only the final result
//! is narrowed to `f64`.

use bigdecimal::{BigDecimal, ToPrimitive, Zero};
use tracing::{debug, warn};

use crate::{
    error::{Error, Result},
    vector::codec,
};

/// Value returned by [`cosine_similarity`] when the result is undefined
pub const COSINE_FALLBACK: f64 = 1.0;

/// SUM_ELEMENTS - sum of every element of the column vector
pub fn sum_elements(column: &str) -> Result<BigDecimal> {
    debug!(column, "sum_elements");
    let vector = codec::decode(column.trim())?;
    Ok(vector
        .elements()
        .iter()
        .fold(BigDecimal::zero(), |total, e| total + e))
}

/// SIMILARITY - dot product of the column vector with `other`
///
/// Iterates over the column vector's length only: elements of `other`
/// beyond it do not contribute, missing ones count as zero.
/// A malformed column is a `Parse` error, not a partial total.
pub fn similarity(column: &str, other: &[BigDecimal]) -> Result<f64> {
    debug!(column, other_len = other.len(), "similarity");
    let vector = codec::decode(column.trim())?;

    let mut total = BigDecimal::zero();
    for (col_val, other_val) in vector.elements().iter().zip(other) {
        total += col_val * other_val;
    }

    narrow(&total)
        .ok_or_else(|| Error::Overflow(format!("SIMILARITY result {} as double", total)))
}

/// COSINE_SIMILARITY - `dot(a, b) / (|a| * |b|)` with zero padding
///
/// Never fails: a zero vector, an unparsable column or a result outside the
/// range of `f64` all yield [`COSINE_FALLBACK`].
pub fn cosine_similarity(column: &str, other: &[BigDecimal]) -> f64 {
    match try_cosine_similarity(column, other) {
        Some(v) => v,
        None => {
            warn!(column, "cosine similarity undefined, returning fallback");
            COSINE_FALLBACK
        }
    }
}

fn try_cosine_similarity(column: &str, other: &[BigDecimal]) -> Option<f64> {
    let vector = codec::decode(column.trim()).ok()?;
    let a = vector.elements();

    let mut dot = BigDecimal::zero();
    let mut sum_sq_a = BigDecimal::zero();
    let mut sum_sq_b = BigDecimal::zero();
    for i in 0..a.len().max(other.len()) {
        match (a.get(i), other.get(i)) {
            (Some(x), Some(y)) => {
                dot += x * y;
                sum_sq_a += x * x;
                sum_sq_b += y * y;
            }
            (Some(x), None) => sum_sq_a += x * x,
            (None, Some(y)) => sum_sq_b += y * y,
            (None, None) => {}
        }
    }
    debug!(%dot, %sum_sq_a, %sum_sq_b, "cosine accumulators");

    // sqrt and division run at bigdecimal's default 100 significant digits
    let divisor = sum_sq_a.sqrt()? * sum_sq_b.sqrt()?;
    if divisor.is_zero() {
        return None;
    }
    narrow(&(dot / divisor))
}

/// Final conversion to a double; `None` if the value is out of its range
///
/// Trailing zeros are stripped first so that exact results such as `1`
/// computed at full precision narrow to exactly `1.0`.
fn narrow(value: &BigDecimal) -> Option<f64> {
    value.normalized().to_f64().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use bigdecimal::{BigDecimal, Zero};

    use super::{COSINE_FALLBACK, cosine_similarity, similarity, sum_elements};
    use crate::error::{Error, Result};

    fn vector(values: &[i64]) -> Vec<BigDecimal> {
        values.iter().map(|v| BigDecimal::from(*v)).collect()
    }

    fn dec(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).unwrap()
    }

    #[test]
    fn test_sum_elements() -> Result<()> {
        assert_eq!(sum_elements("1::2::3")?, BigDecimal::from(6));
        assert_eq!(sum_elements(" 1.25::-0.25 ")?, BigDecimal::from(1));
        assert_eq!(sum_elements("")?, BigDecimal::zero());
        assert_eq!(sum_elements("::")?, BigDecimal::zero());
        assert!(matches!(sum_elements("1::x"), Err(Error::Parse(_))));
        assert!(matches!(sum_elements("1_000"), Err(Error::Parse(_))));
        Ok(())
    }

    #[test]
    fn test_sum_elements_unbounded() -> Result<()> {
        assert_eq!(sum_elements("1E+30::1E+30")?, dec("2E+30"));
        // no rounding of the low digits next to a large one
        assert_eq!(
            sum_elements("1E+40::0.000000000000000000001")?,
            dec("10000000000000000000000000000000000000000.000000000000000000001")
        );
        Ok(())
    }

    #[test]
    fn test_similarity() -> Result<()> {
        assert_eq!(similarity("1::2::3", &vector(&[1, 1, 1]))?, 6.0);
        // bound to the column vector's length
        assert_eq!(similarity("1::2", &vector(&[1, 1, 1]))?, 3.0);
        // a shorter query vector is zero padded
        assert_eq!(similarity("1::2::3", &vector(&[2]))?, 2.0);
        assert_eq!(similarity("0.5::0.25", &vector(&[2, 4]))?, 2.0);
        assert!(matches!(similarity("a::b", &vector(&[1])), Err(Error::Parse(_))));
        Ok(())
    }

    #[test]
    fn test_similarity_large_values() -> Result<()> {
        let v = similarity("1E+15", &[dec("1E+15")])?;
        assert!((v - 1e30).abs() / 1e30 < 1e-12);

        // a double cannot hold the result
        assert!(matches!(
            similarity("1E+200", &[dec("1E+200")]),
            Err(Error::Overflow(_))
        ));
        Ok(())
    }

    #[test]
    fn test_cosine_similarity() {
        assert_eq!(cosine_similarity("1::0::0", &vector(&[2, 0, 0])), 1.0);
        assert_eq!(cosine_similarity("1::0::0", &vector(&[0, 1, 0])), 0.0);
        assert_eq!(cosine_similarity("1::0", &vector(&[-3, 0])), -1.0);

        // zero padded to the longer side
        let padded = cosine_similarity("3::4", &vector(&[3, 4, 0, 0]));
        assert!((padded - 1.0).abs() < 1e-12);

        let v = cosine_similarity("1::1", &vector(&[1, 0]));
        assert!((v - std::f64::consts::FRAC_1_SQRT_2).abs() < 1e-12);
    }

    #[test]
    fn test_cosine_similarity_large_values() {
        // orthogonal, far beyond a 96-bit decimal once squared
        assert_eq!(cosine_similarity("1E+15::0", &vector(&[0, 1])), 0.0);

        let parallel = cosine_similarity("1E+15::2E+15", &[dec("3E+15"), dec("6E+15")]);
        assert!((parallel - 1.0).abs() < 1e-12);

        let opposite = cosine_similarity("1E+30", &[dec("-1E-30")]);
        assert!((opposite + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_cosine_similarity_fallback() {
        assert_eq!(cosine_similarity("0::0::0", &vector(&[0, 0, 0])), COSINE_FALLBACK);
        assert_eq!(cosine_similarity("1::2", &vector(&[0, 0])), COSINE_FALLBACK);
        assert_eq!(cosine_similarity("", &[]), COSINE_FALLBACK);
        assert_eq!(cosine_similarity("1::nope", &vector(&[1, 1])), COSINE_FALLBACK);
    }

    #[test]
    fn test_norm_precision() {
        // sqrt(2) * sqrt(2) is 2 to well beyond 20 significant digits
        let v = cosine_similarity("1::1", &vector(&[1, 1]));
        assert!((v - 1.0).abs() < 1e-15);
        let root = BigDecimal::from(2).sqrt().unwrap();
        let expected = dec("1.41421356237309504880");
        assert!((root - expected).abs() < dec("1E-20"));
    }
}
