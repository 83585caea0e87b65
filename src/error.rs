//! Error type shared by every evaluator in the crate.
//!
//! The CEV formulas are only defined on a restricted parameter domain, so almost
//! every failure the library can produce is a violated mathematical precondition;
//! the rest are series settings that cannot deliver the requested accuracy.
//! They are collected in a single [`DomainError`] enum; each variant names the
//! offending input so callers can tell which precondition failed.

use thiserror::Error;

/// A violated precondition of the CEV formulas or of their series settings.
///
/// # Examples
/// ```
/// use cev_lib::DomainError;
///
/// let err = DomainError::NonPositive { name: "sigma", value: 0.0 };
/// assert_eq!(err.to_string(), "sigma must be positive, got 0");
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    /// A quantity that must be strictly positive was zero, negative or NaN.
    #[error("{name} must be positive, got {value}")]
    NonPositive { name: &'static str, value: f64 },

    /// `beta` hit the `1 / (1 - beta)` pole or lies beyond it.
    #[error("beta must be below 1, got {beta} (use the lognormal limit for beta = 1)")]
    BetaOutOfRange { beta: f64 },

    /// `cp` was not exactly +1 (call) or -1 (put).
    #[error("cp must be +1 (call) or -1 (put), got {cp}")]
    InvalidOptionType { cp: f64 },

    /// A rate-like quantity was NaN or infinite.
    #[error("{name} must be finite, got {value}")]
    NonFinite { name: &'static str, value: f64 },

    /// Neither of two alternative inputs was supplied.
    #[error("missing input: {0}")]
    MissingInput(&'static str),

    /// A vector input had no elements.
    #[error("{0} must not be empty")]
    EmptyInput(&'static str),

    /// The noncentral chi-squared series would need more terms than allowed.
    #[error("noncentral chi-squared series needs {required} terms, above the budget of {max_terms}")]
    SeriesBudgetExceeded { required: usize, max_terms: usize },

    /// A series setting outside its admissible range.
    #[error("series.{name} out of range, got {value}")]
    InvalidSeries { name: &'static str, value: f64 },

    /// Two vector inputs of different non-unit lengths.
    #[error("cannot broadcast {name} of length {len} against length {expected}")]
    LengthMismatch {
        name: &'static str,
        len: usize,
        expected: usize,
    },
}

/// Returns `value` if it is strictly positive, otherwise a [`DomainError::NonPositive`].
///
/// NaN fails the check, so a NaN input never reaches the special functions.
pub(crate) fn ensure_positive(name: &'static str, value: f64) -> Result<f64, DomainError> {
    if value > 0.0 {
        Ok(value)
    } else {
        Err(DomainError::NonPositive { name, value })
    }
}

pub(crate) fn ensure_finite(name: &'static str, value: f64) -> Result<f64, DomainError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(DomainError::NonFinite { name, value })
    }
}

/// Rejects `beta >= 1` and NaN.
pub(crate) fn ensure_beta(beta: f64) -> Result<f64, DomainError> {
    if beta < 1.0 {
        Ok(beta)
    } else {
        Err(DomainError::BetaOutOfRange { beta })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_check_rejects_nan_and_zero() {
        assert!(ensure_positive("texp", 1.2).is_ok());
        assert_eq!(
            ensure_positive("texp", 0.0),
            Err(DomainError::NonPositive {
                name: "texp",
                value: 0.0
            })
        );
        assert!(ensure_positive("texp", f64::NAN).is_err());
        assert!(ensure_positive("texp", -1.0).is_err());
    }

    #[test]
    fn test_beta_check() {
        assert!(ensure_beta(0.5).is_ok());
        assert!(ensure_beta(-2.0).is_ok());
        assert!(ensure_beta(1.0).is_err());
        assert!(ensure_beta(1.5).is_err());
        assert!(ensure_beta(f64::NAN).is_err());
    }

    #[test]
    fn test_messages_name_the_input() {
        let err = DomainError::LengthMismatch {
            name: "strike",
            len: 3,
            expected: 10,
        };
        assert_eq!(
            err.to_string(),
            "cannot broadcast strike of length 3 against length 10"
        );
        assert_eq!(
            DomainError::SeriesBudgetExceeded {
                required: 20_000,
                max_terms: 100
            }
            .to_string(),
            "noncentral chi-squared series needs 20000 terms, above the budget of 100"
        );
        assert!(DomainError::BetaOutOfRange { beta: 1.0 }
            .to_string()
            .contains("beta must be below 1"));
    }
}
