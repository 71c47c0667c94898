//! NASA 9-coefficient polynomial thermochemistry (two temperature blocks).
//!
//! Each block holds `a0..a6` of `Cp/R = a0 T^-2 + a1 T^-1 + a2 + a3 T + a4 T^2 + a5 T^3 + a6 T^4`
//! followed by the integration constants `b1` (enthalpy) and `b2` (entropy).
//! Block 0 covers `[t0, t1]`, block 1 covers `(t1, t2]`.

use crate::error::{FieldError, MixtureError, MixtureResult};

/// Coefficients per temperature block.
pub const BLOCK_LEN: usize = 9;
/// Total coefficient count for the two blocks.
pub const COEFF_LEN: usize = 2 * BLOCK_LEN;

#[derive(Debug, Clone, PartialEq)]
pub struct Nasa9Polynomial {
    t_range: [f64; 3],
    cp: [f64; COEFF_LEN],
    h: [f64; COEFF_LEN],
    s: [f64; COEFF_LEN],
}

impl Nasa9Polynomial {
    /// Build from the temperature breakpoints and the 18 Cp coefficients,
    /// then check the result.
    pub fn new(t_range: [f64; 3], coefficients: [f64; COEFF_LEN]) -> MixtureResult<Self> {
        let poly = Self::from_coefficients(t_range, coefficients);
        let mut errors = Vec::new();
        poly.validate("", &mut errors);
        if errors.is_empty() {
            Ok(poly)
        } else {
            let what = errors
                .iter()
                .map(|e| format!("{}: {}", e.field, e.reason))
                .collect::<Vec<_>>()
                .join("; ");
            Err(MixtureError::InvalidArg { what })
        }
    }

    /// Build without checking; enthalpy and entropy coefficients are derived
    /// by integrating the Cp polynomial.
    pub fn from_coefficients(t_range: [f64; 3], coefficients: [f64; COEFF_LEN]) -> Self {
        let cp = coefficients;
        let mut h = [0.0; COEFF_LEN];
        let mut s = [0.0; COEFF_LEN];
        for j in [0, BLOCK_LEN] {
            let a = &cp[j..j + BLOCK_LEN];

            h[j] = -a[0];
            h[j + 1] = a[1];
            h[j + 2] = a[2];
            h[j + 3] = a[3] / 2.0;
            h[j + 4] = a[4] / 3.0;
            h[j + 5] = a[5] / 4.0;
            h[j + 6] = a[6] / 5.0;
            h[j + 7] = a[7];
            h[j + 8] = a[8];

            s[j] = -a[0] / 2.0;
            s[j + 1] = -a[1];
            s[j + 2] = a[2];
            s[j + 3] = a[3];
            s[j + 4] = a[4] / 2.0;
            s[j + 5] = a[5] / 3.0;
            s[j + 6] = a[6] / 4.0;
            s[j + 7] = a[7];
            s[j + 8] = a[8];
        }
        Self { t_range, cp, h, s }
    }

    pub fn temperature_range(&self) -> [f64; 3] {
        self.t_range
    }

    pub fn cp_coefficients(&self) -> &[f64; COEFF_LEN] {
        &self.cp
    }

    pub fn h_coefficients(&self) -> &[f64; COEFF_LEN] {
        &self.h
    }

    pub fn s_coefficients(&self) -> &[f64; COEFF_LEN] {
        &self.s
    }

    /// Clamp `t` to the fitted range and pick the block offset.
    #[inline]
    fn block(&self, t: f64) -> (usize, f64) {
        let [t0, t1, t2] = self.t_range;
        let t = t.clamp(t0, t2);
        if t <= t1 { (0, t) } else { (BLOCK_LEN, t) }
    }

    /// Dimensionless heat capacity `Cp/R`.
    pub fn cp_over_r(&self, t: f64) -> f64 {
        let (j, t) = self.block(t);
        let a = &self.cp[j..j + BLOCK_LEN];
        let inv = 1.0 / t;
        (a[0] * inv + a[1]) * inv + a[2] + t * (a[3] + t * (a[4] + t * (a[5] + t * a[6])))
    }

    /// Dimensionless enthalpy `H/(R T)`.
    pub fn h_over_rt(&self, t: f64) -> f64 {
        let (j, t) = self.block(t);
        let a = &self.h[j..j + BLOCK_LEN];
        let inv = 1.0 / t;
        a[0] * inv * inv
            + a[1] * t.ln() * inv
            + a[2]
            + t * (a[3] + t * (a[4] + t * (a[5] + t * a[6])))
            + a[7] * inv
    }

    /// Dimensionless entropy `S/R` at the reference pressure.
    pub fn s_over_r(&self, t: f64) -> f64 {
        let (j, t) = self.block(t);
        let a = &self.s[j..j + BLOCK_LEN];
        let inv = 1.0 / t;
        (a[0] * inv + a[1]) * inv
            + a[2] * t.ln()
            + t * (a[3] + t * (a[4] + t * (a[5] + t * a[6])))
            + a[8]
    }

    pub(crate) fn validate(&self, species: &str, errors: &mut Vec<FieldError>) {
        const RANGES: &str = "thermochemistry/NASA9Polynomial/temperatureRanges";
        const COEFFS: &str = "thermochemistry/NASA9Polynomial/coefficients";

        let [t0, t1, t2] = self.t_range;
        let ordered = self.t_range.iter().all(|t| t.is_finite()) && t0 > 0.0 && t0 < t1 && t1 < t2;
        if !ordered {
            errors.push(FieldError::new(
                species,
                RANGES,
                format!("expected 0 < t0 < t1 < t2 (got {t0}, {t1}, {t2})"),
            ));
        }

        let bad: Vec<usize> = (0..COEFF_LEN).filter(|&i| !self.cp[i].is_finite()).collect();
        if !bad.is_empty() {
            errors.push(FieldError::new(
                species,
                COEFFS,
                format!("non-finite coefficient(s) at index {bad:?}"),
            ));
            return;
        }

        if ordered {
            for t in self.t_range {
                let cp_r = self.cp_over_r(t);
                if !(cp_r > 1.0) {
                    errors.push(FieldError::new(
                        species,
                        COEFFS,
                        format!("Cp/R = {cp_r} at T = {t} K; an ideal gas needs Cp > R"),
                    ));
                }
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    /// N2, 200-1000-6000 K (McBride et al.).
    pub const N2_RANGE: [f64; 3] = [200.0, 1000.0, 6000.0];
    pub const N2_COEFFS: [f64; 18] = [
        2.210371497e+04, -3.818461820e+02, 6.082738360e+00, -8.530914410e-03, 1.384646189e-05,
        -9.625793620e-09, 2.519705809e-12, 7.108460860e+02, -1.076003744e+01,
        5.877124060e+05, -2.239249073e+03, 6.066949220e+00, -6.139685500e-04, 1.491806679e-07,
        -1.923105485e-11, 1.061954386e-15, 1.283210415e+04, -1.586640027e+01,
    ];

    pub const O2_RANGE: [f64; 3] = [200.0, 1000.0, 6000.0];
    pub const O2_COEFFS: [f64; 18] = [
        -3.425563420e+04, 4.847000970e+02, 1.119010961e+00, 4.293889240e-03, -6.836300520e-07,
        -2.023372700e-09, 1.039040018e-12, -3.391454870e+03, 1.849699470e+01,
        -1.037939022e+06, 2.344830282e+03, 1.819732036e+00, 1.267847582e-03, -2.188067988e-07,
        2.053719572e-11, -8.193467050e-16, -1.689010929e+04, 1.738716506e+01,
    ];
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;
    use fl_core::numeric::{Tolerances, nearly_equal};

    fn n2() -> Nasa9Polynomial {
        Nasa9Polynomial::new(N2_RANGE, N2_COEFFS).unwrap()
    }

    #[test]
    fn derived_coefficients_follow_integration() {
        let p = n2();
        let cp = p.cp_coefficients();
        let h = p.h_coefficients();
        let s = p.s_coefficients();
        for j in [0, BLOCK_LEN] {
            assert_eq!(h[j], -cp[j]);
            assert_eq!(h[j + 3], cp[j + 3] / 2.0);
            assert_eq!(h[j + 6], cp[j + 6] / 5.0);
            assert_eq!(h[j + 7], cp[j + 7]);
            assert_eq!(s[j], -cp[j] / 2.0);
            assert_eq!(s[j + 1], -cp[j + 1]);
            assert_eq!(s[j + 4], cp[j + 4] / 2.0);
            assert_eq!(s[j + 8], cp[j + 8]);
        }
    }

    #[test]
    fn nitrogen_heat_capacity_near_room_temperature() {
        let cp_r = n2().cp_over_r(300.0);
        assert!((cp_r - 3.5029).abs() < 1e-3, "Cp/R = {cp_r}");
    }

    #[test]
    fn nitrogen_reference_state() {
        let p = n2();
        assert!(p.h_over_rt(298.15).abs() < 1e-3);
        assert!((p.s_over_r(298.15) - 23.045).abs() < 1e-2);
    }

    #[test]
    fn blocks_agree_at_breakpoint() {
        let tol = Tolerances::new(0.0, 1e-6);
        for (range, coeffs) in [(N2_RANGE, N2_COEFFS), (O2_RANGE, O2_COEFFS)] {
            let p = Nasa9Polynomial::new(range, coeffs).unwrap();
            let below = 1000.0 - 1e-9;
            let above = 1000.0 + 1e-9;
            assert!(nearly_equal(p.cp_over_r(below), p.cp_over_r(above), tol));
            assert!(nearly_equal(p.h_over_rt(below), p.h_over_rt(above), tol));
            assert!(nearly_equal(p.s_over_r(below), p.s_over_r(above), tol));
        }
    }

    #[test]
    fn temperatures_outside_range_are_clamped() {
        let p = n2();
        assert_eq!(p.cp_over_r(50.0), p.cp_over_r(200.0));
        assert_eq!(p.cp_over_r(9000.0), p.cp_over_r(6000.0));
        assert_eq!(p.s_over_r(9000.0), p.s_over_r(6000.0));
    }

    #[test]
    fn unordered_range_is_rejected() {
        let err = Nasa9Polynomial::new([1000.0, 200.0, 6000.0], N2_COEFFS).unwrap_err();
        assert!(err.to_string().contains("temperatureRanges"));
    }

    #[test]
    fn non_finite_coefficient_is_rejected() {
        let mut coeffs = N2_COEFFS;
        coeffs[4] = f64::NAN;
        let err = Nasa9Polynomial::new(N2_RANGE, coeffs).unwrap_err();
        assert!(err.to_string().contains("[4]"));
    }
}
