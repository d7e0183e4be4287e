//! Error taxonomy shared by every calculator.
//!
//! A zero weight when computing a center of gravity is deliberately absent:
//! it means "nothing entered yet" and resolves to a CG of `0.0`.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CalcError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    /// Scalar outside its documented range.
    #[error("{field} must be between {min} and {max} {unit}, got {value}")]
    InvalidInput {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
        unit: &'static str,
    },

    /// Scalar that must be strictly positive (divisors, airspeeds).
    #[error("{field} must be greater than zero, got {value}")]
    NotPositive { field: &'static str, value: f64 },

    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f64 },

    #[error("{field} must be a finite number")]
    NonFinite { field: &'static str },

    /// A solver needed a value the caller left blank.
    #[error("{field} is required")]
    MissingInput { field: &'static str },

    #[error("time must be formatted HH:MM, got {0:?}")]
    InvalidTime(String),

    /// Individually valid wind triangle inputs whose crosswind exceeds TAS.
    #[error("wind triangle has no solution: crosswind exceeds true airspeed (ratio {ratio:.3})")]
    UnsolvableGeometry { ratio: f64 },
}

impl CalcError {
    /// True for every variant the caller fixes by correcting a single field.
    pub fn is_invalid_input(&self) -> bool {
        !matches!(self, CalcError::UnsolvableGeometry { .. })
    }
}

pub fn ensure_finite(field: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        tracing::debug!(field, "rejected non-finite input");
        Err(CalcError::NonFinite { field })
    }
}

pub fn ensure_range(
    field: &'static str,
    value: f64,
    min: f64,
    max: f64,
    unit: &'static str,
) -> Result<f64> {
    ensure_finite(field, value)?;
    if (min..=max).contains(&value) {
        Ok(value)
    } else {
        tracing::debug!(field, value, min, max, "rejected out-of-range input");
        Err(CalcError::InvalidInput { field, value, min, max, unit })
    }
}

pub fn ensure_positive(field: &'static str, value: f64) -> Result<f64> {
    ensure_finite(field, value)?;
    if value > 0.0 {
        Ok(value)
    } else {
        tracing::debug!(field, value, "rejected non-positive input");
        Err(CalcError::NotPositive { field, value })
    }
}

pub fn ensure_non_negative(field: &'static str, value: f64) -> Result<f64> {
    ensure_finite(field, value)?;
    if value >= 0.0 {
        Ok(value)
    } else {
        tracing::debug!(field, value, "rejected negative input");
        Err(CalcError::Negative { field, value })
    }
}
