use crate::RpError;

/// Floating point type used throughout system
pub type Real = f64;

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, RpError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(RpError::NonFinite { what, value: v })
    }
}

/// Finite and strictly positive, the common precondition for physical inputs.
pub fn ensure_positive(v: Real, what: &'static str) -> Result<Real, RpError> {
    let v = ensure_finite(v, what)?;
    if v > 0.0 {
        Ok(v)
    } else {
        Err(RpError::InvalidArg {
            what: format!("{what} must be positive (got {v})"),
        })
    }
}

/// Relative deviation `|a - b| / |b|`, or the absolute difference when `b` is zero.
pub fn relative_deviation(a: Real, b: Real) -> Real {
    if b == 0.0 {
        (a - b).abs()
    } else {
        ((a - b) / b).abs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_finite_detects_nan() {
        let err = ensure_finite(Real::NAN, "test").unwrap_err();
        let msg = format!("{err}");
        assert!(msg.contains("Non-finite"));
    }

    #[test]
    fn ensure_positive_rejects_zero_and_negative() {
        assert!(ensure_positive(1.0, "x").is_ok());
        assert!(ensure_positive(0.0, "x").is_err());
        assert!(ensure_positive(-2.0, "x").is_err());
        assert!(matches!(
            ensure_positive(Real::INFINITY, "x"),
            Err(RpError::NonFinite { .. })
        ));
    }

    #[test]
    fn relative_deviation_handles_zero_reference() {
        assert!((relative_deviation(1.01, 1.0) - 0.01).abs() < 1e-12);
        assert_eq!(relative_deviation(0.5, 0.0), 0.5);
    }
}
