//! Per-species thermochemistry models.
//!
//! Mass-specific quantities: Cp [J/(kg·K)], h [J/kg], s [J/(kg·K)].

use crate::error::{FieldError, MixtureError, MixtureResult};
use crate::nasa9::Nasa9Polynomial;
use crate::transport::check_positive;
use fl_core::constants::{R_UNIVERSAL, T_STANDARD_K};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum ThermochemistryModel {
    /// Constant specific heat [J/(kg·K)].
    CaloricallyPerfect { specific_heat: f64 },
    Nasa9(Nasa9Polynomial),
    #[default]
    None,
}

impl ThermochemistryModel {
    pub fn name(&self) -> &'static str {
        match self {
            ThermochemistryModel::CaloricallyPerfect { .. } => "caloricallyPerfect",
            ThermochemistryModel::Nasa9(_) => "caloricallyNASA9",
            ThermochemistryModel::None => "none",
        }
    }

    pub fn is_available(&self) -> bool {
        !matches!(self, ThermochemistryModel::None)
    }

    /// Specific heat at constant pressure [J/(kg·K)] for a species of
    /// molecular weight `w` [kg/kmol].
    pub fn cp(&self, t: f64, w: f64) -> MixtureResult<f64> {
        match self {
            ThermochemistryModel::CaloricallyPerfect { specific_heat } => Ok(*specific_heat),
            ThermochemistryModel::Nasa9(poly) => Ok(poly.cp_over_r(t) * R_UNIVERSAL / w),
            ThermochemistryModel::None => Err(unavailable()),
        }
    }

    /// Specific enthalpy [J/kg]. Calorically perfect species use `Cp T`.
    pub fn enthalpy(&self, t: f64, w: f64) -> MixtureResult<f64> {
        match self {
            ThermochemistryModel::CaloricallyPerfect { specific_heat } => Ok(specific_heat * t),
            ThermochemistryModel::Nasa9(poly) => Ok(poly.h_over_rt(t) * R_UNIVERSAL / w * t),
            ThermochemistryModel::None => Err(unavailable()),
        }
    }

    /// Specific entropy [J/(kg·K)] at the reference pressure. Calorically
    /// perfect species are referenced to zero at 298.15 K.
    pub fn entropy(&self, t: f64, w: f64) -> MixtureResult<f64> {
        match self {
            ThermochemistryModel::CaloricallyPerfect { specific_heat } => {
                Ok(specific_heat * (t / T_STANDARD_K).ln())
            }
            ThermochemistryModel::Nasa9(poly) => Ok(poly.s_over_r(t) * R_UNIVERSAL / w),
            ThermochemistryModel::None => Err(unavailable()),
        }
    }

    pub(crate) fn validate(&self, species: &str, w: Option<f64>, errors: &mut Vec<FieldError>) {
        match self {
            ThermochemistryModel::CaloricallyPerfect { specific_heat } => {
                let field = "thermochemistry/specificHeat";
                let before = errors.len();
                check_positive(errors, species, field, *specific_heat);
                if let Some(w) = w.filter(|w| *w > 0.0 && w.is_finite())
                    && errors.len() == before
                {
                    let r = R_UNIVERSAL / w;
                    if *specific_heat <= r {
                        errors.push(FieldError::new(
                            species,
                            field,
                            format!("Cp = {specific_heat} must exceed R = {r:.4}"),
                        ));
                    }
                }
            }
            ThermochemistryModel::Nasa9(poly) => poly.validate(species, errors),
            ThermochemistryModel::None => errors.push(FieldError::new(
                species,
                "thermochemistry",
                "no thermochemistry model given",
            )),
        }
    }
}

fn unavailable() -> MixtureError {
    MixtureError::ModelUnavailable {
        property: "thermochemistry",
    }
}

fn write_coefficients(f: &mut fmt::Formatter<'_>, label: &str, c: &[f64]) -> fmt::Result {
    write!(f, ", {label}: [")?;
    for (i, v) in c.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{v}")?;
    }
    f.write_str("]")
}

impl fmt::Display for ThermochemistryModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThermochemistryModel::CaloricallyPerfect { specific_heat } => {
                write!(f, "{}(specificHeat: {specific_heat})", self.name())
            }
            ThermochemistryModel::Nasa9(poly) => {
                let [t0, t1, t2] = poly.temperature_range();
                write!(f, "{}(temperatureRanges: [{t0}, {t1}, {t2}]", self.name())?;
                write_coefficients(f, "cp", poly.cp_coefficients())?;
                write_coefficients(f, "h", poly.h_coefficients())?;
                write_coefficients(f, "s", poly.s_coefficients())?;
                f.write_str(")")
            }
            ThermochemistryModel::None => f.write_str(self.name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nasa9::fixtures::{N2_COEFFS, N2_RANGE};
    use fl_core::numeric::{Tolerances, nearly_equal};

    #[test]
    fn calorically_perfect_properties() {
        let m = ThermochemistryModel::CaloricallyPerfect {
            specific_heat: 1005.0,
        };
        assert_eq!(m.cp(300.0, 28.96).unwrap(), 1005.0);
        assert_eq!(m.enthalpy(300.0, 28.96).unwrap(), 1005.0 * 300.0);
        assert_eq!(m.entropy(T_STANDARD_K, 28.96).unwrap(), 0.0);
        assert!(m.entropy(600.0, 28.96).unwrap() > 0.0);
    }

    #[test]
    fn nasa9_mass_specific_heat() {
        let m = ThermochemistryModel::Nasa9(Nasa9Polynomial::new(N2_RANGE, N2_COEFFS).unwrap());
        let cp = m.cp(300.0, 28.0134).unwrap();
        // About 1040 J/(kg K) for nitrogen at 300 K.
        assert!((cp - 1040.0).abs() < 2.0, "cp = {cp}");
        let h = m.enthalpy(400.0, 28.0134).unwrap();
        let h_lo = m.enthalpy(399.0, 28.0134).unwrap();
        // dh/dT ~ Cp
        let cp_fd = h - h_lo;
        let cp_mid = m.cp(399.5, 28.0134).unwrap();
        assert!(nearly_equal(cp_fd, cp_mid, Tolerances::new(0.0, 1e-4)));
    }

    #[test]
    fn none_is_unavailable_and_invalid() {
        let m = ThermochemistryModel::None;
        assert!(m.cp(300.0, 28.0).is_err());
        let mut errors = Vec::new();
        m.validate("X", Some(28.0), &mut errors);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "thermochemistry");
    }

    #[test]
    fn specific_heat_below_gas_constant_is_invalid() {
        let m = ThermochemistryModel::CaloricallyPerfect { specific_heat: 200.0 };
        let mut errors = Vec::new();
        m.validate("AIR", Some(28.96), &mut errors);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].reason.contains("must exceed R"));
    }

    #[test]
    fn names() {
        assert_eq!(
            ThermochemistryModel::CaloricallyPerfect { specific_heat: 1.0 }.name(),
            "caloricallyPerfect"
        );
        assert_eq!(ThermochemistryModel::None.name(), "none");
    }

    #[test]
    fn nasa9_display_lists_derived_coefficients() {
        let poly = Nasa9Polynomial::new(N2_RANGE, N2_COEFFS).unwrap();
        let text = ThermochemistryModel::Nasa9(poly.clone()).to_string();
        assert!(text.starts_with("caloricallyNASA9(temperatureRanges: ["), "{text}");
        assert!(text.ends_with("])"), "{text}");
        for (label, c) in [
            ("cp", poly.cp_coefficients()),
            ("h", poly.h_coefficients()),
            ("s", poly.s_coefficients()),
        ] {
            let list: Vec<String> = c.iter().map(|v| v.to_string()).collect();
            let expected = format!("{label}: [{}]", list.join(", "));
            assert!(text.contains(&expected), "missing {label} in {text}");
        }
    }
}
