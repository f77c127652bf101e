//! Common argument checks for nozzle relations.

use crate::error::{NozzleError, NozzleResult};
use rp_core::numeric::ensure_finite;

/// Ensure a value is finite, returning NozzleError if not.
pub fn check_finite(value: f64, what: &'static str) -> NozzleResult<f64> {
    ensure_finite(value, what).map_err(|_| NozzleError::NonPhysical { what })
}

/// Ensure an input is finite and strictly positive.
pub fn check_positive(value: f64, what: &'static str) -> NozzleResult<f64> {
    if !value.is_finite() || value <= 0.0 {
        return Err(NozzleError::InvalidArg { what });
    }
    Ok(value)
}

/// Ensure an input is finite and non-negative (ambient pressure may be zero).
pub fn check_non_negative(value: f64, what: &'static str) -> NozzleResult<f64> {
    if !value.is_finite() || value < 0.0 {
        return Err(NozzleError::InvalidArg { what });
    }
    Ok(value)
}

/// γ must be finite and strictly greater than one for the isentropic exponents.
pub fn check_gamma(gamma: f64) -> NozzleResult<f64> {
    if !gamma.is_finite() || gamma <= 1.0 {
        return Err(NozzleError::InvalidArg {
            what: "gamma must be finite and > 1",
        });
    }
    Ok(gamma)
}
