//! Float comparison and argument checks shared by the flux and mixture crates.

use crate::FlError;

/// Combined absolute/relative bound for comparing computed properties and
/// fluxes. Two values agree when they are within `abs` of each other or
/// within `rel` of the larger magnitude.
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: f64,
    pub rel: f64,
}

impl Default for Tolerances {
    /// `abs = 1e-12`, `rel = 1e-9`.
    fn default() -> Self {
        Self::new(1e-12, 1e-9)
    }
}

impl Tolerances {
    pub const fn new(abs: f64, rel: f64) -> Self {
        Self { abs, rel }
    }
}

pub fn nearly_equal(a: f64, b: f64, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

/// Rejects NaN and infinities, naming the offending input.
pub fn ensure_finite(v: f64, what: &'static str) -> Result<f64, FlError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(FlError::NonFinite { what, value: v })
    }
}

/// Finite and strictly positive, as required of pressures, temperatures,
/// densities and molecular weights.
pub fn ensure_positive(v: f64, what: &'static str) -> Result<f64, FlError> {
    let v = ensure_finite(v, what)?;
    if v > 0.0 {
        Ok(v)
    } else {
        Err(FlError::InvalidArg {
            what: format!("{what} must be positive (got {v})"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearly_equal_uses_either_bound() {
        let tol = Tolerances::default();
        assert!(nearly_equal(1.0, 1.0 + 1e-12, tol));
        assert!(nearly_equal(0.0, 1e-13, tol));
        assert!(!nearly_equal(1.0, 1.0 + 1e-6, tol));
        // Relative bound only: 101325 Pa vs 101325.00005 Pa.
        let rel = Tolerances::new(0.0, 1e-9);
        assert!(nearly_equal(101_325.0, 101_325.000_05, rel));
        assert!(!nearly_equal(0.0, 1e-300, rel));
    }

    #[test]
    fn ensure_finite_detects_nan() {
        let err = ensure_finite(f64::NAN, "test").unwrap_err();
        let msg = format!("{err}");
        assert!(msg.contains("Non-finite"));
    }

    #[test]
    fn ensure_positive_rejects_zero() {
        assert!(ensure_positive(0.0, "area").is_err());
        assert!(ensure_positive(-1.0, "area").is_err());
        assert!(ensure_positive(f64::INFINITY, "area").is_err());
        assert_eq!(ensure_positive(2.5, "area").unwrap(), 2.5);
    }
}
