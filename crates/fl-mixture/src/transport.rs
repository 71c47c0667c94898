//! Per-species transport property models and mixture-averaging rules.
//!
//! Each model is a tagged enum; parameters live on the variant that uses
//! them. `None` marks a property the species does not provide.

use crate::error::{FieldError, MixtureError, MixtureResult};
use std::fmt;

/// Sutherland's law: `ref * (T_ref + S)/(T + S) * (T/T_ref)^1.5`.
#[inline]
pub fn sutherland(ref_value: f64, ref_temperature: f64, ref_constant: f64, t: f64) -> f64 {
    ref_value * (ref_temperature + ref_constant) / (t + ref_constant)
        * (t / ref_temperature).powf(1.5)
}

pub(crate) fn check_positive(
    errors: &mut Vec<FieldError>,
    species: &str,
    field: &str,
    value: f64,
) {
    if !value.is_finite() {
        errors.push(FieldError::new(species, field, format!("non-finite value {value}")));
    } else if value <= 0.0 {
        errors.push(FieldError::new(species, field, format!("must be positive (got {value})")));
    }
}

pub(crate) fn check_non_negative(
    errors: &mut Vec<FieldError>,
    species: &str,
    field: &str,
    value: f64,
) {
    if !value.is_finite() {
        errors.push(FieldError::new(species, field, format!("non-finite value {value}")));
    } else if value < 0.0 {
        errors.push(FieldError::new(species, field, format!("must be non-negative (got {value})")));
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ViscosityModel {
    /// Dynamic viscosity [Pa·s].
    Constant { value: f64 },
    Sutherland {
        ref_temperature: f64,
        ref_viscosity: f64,
        ref_constant: f64,
    },
    #[default]
    None,
}

impl ViscosityModel {
    pub fn name(&self) -> &'static str {
        match self {
            ViscosityModel::Constant { .. } => "constant",
            ViscosityModel::Sutherland { .. } => "sutherland",
            ViscosityModel::None => "none",
        }
    }

    /// Dynamic viscosity [Pa·s] at temperature `t` [K].
    pub fn evaluate(&self, t: f64) -> MixtureResult<f64> {
        match *self {
            ViscosityModel::Constant { value } => Ok(value),
            ViscosityModel::Sutherland {
                ref_temperature,
                ref_viscosity,
                ref_constant,
            } => Ok(sutherland(ref_viscosity, ref_temperature, ref_constant, t)),
            ViscosityModel::None => Err(MixtureError::ModelUnavailable {
                property: "viscosity",
            }),
        }
    }

    pub fn is_available(&self) -> bool {
        !matches!(self, ViscosityModel::None)
    }

    pub(crate) fn validate(&self, species: &str, errors: &mut Vec<FieldError>) {
        match *self {
            ViscosityModel::Constant { value } => {
                check_positive(errors, species, "viscosity/constant", value)
            }
            ViscosityModel::Sutherland {
                ref_temperature,
                ref_viscosity,
                ref_constant,
            } => {
                const PATH: &str = "viscosity/sutherland";
                check_positive(errors, species, &format!("{PATH}/refTemperature"), ref_temperature);
                check_positive(errors, species, &format!("{PATH}/refViscosity"), ref_viscosity);
                check_non_negative(errors, species, &format!("{PATH}/refConstant"), ref_constant);
            }
            ViscosityModel::None => {}
        }
    }
}

impl fmt::Display for ViscosityModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViscosityModel::Constant { value } => write!(f, "{}({value})", self.name()),
            ViscosityModel::Sutherland {
                ref_temperature,
                ref_viscosity,
                ref_constant,
            } => write!(
                f,
                "{}(refTemperature: {ref_temperature}, refViscosity: {ref_viscosity}, \
                 refConstant: {ref_constant})",
                self.name()
            ),
            ViscosityModel::None => f.write_str(self.name()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ConductivityModel {
    /// Thermal conductivity [W/(m·K)].
    Constant { value: f64 },
    Sutherland {
        ref_temperature: f64,
        ref_conductivity: f64,
        ref_constant: f64,
    },
    #[default]
    None,
}

impl ConductivityModel {
    pub fn name(&self) -> &'static str {
        match self {
            ConductivityModel::Constant { .. } => "constant",
            ConductivityModel::Sutherland { .. } => "sutherland",
            ConductivityModel::None => "none",
        }
    }

    /// Thermal conductivity [W/(m·K)] at temperature `t` [K].
    pub fn evaluate(&self, t: f64) -> MixtureResult<f64> {
        match *self {
            ConductivityModel::Constant { value } => Ok(value),
            ConductivityModel::Sutherland {
                ref_temperature,
                ref_conductivity,
                ref_constant,
            } => Ok(sutherland(ref_conductivity, ref_temperature, ref_constant, t)),
            ConductivityModel::None => Err(MixtureError::ModelUnavailable {
                property: "conductivity",
            }),
        }
    }

    pub fn is_available(&self) -> bool {
        !matches!(self, ConductivityModel::None)
    }

    pub(crate) fn validate(&self, species: &str, errors: &mut Vec<FieldError>) {
        match *self {
            ConductivityModel::Constant { value } => {
                check_positive(errors, species, "conductivity/constant", value)
            }
            ConductivityModel::Sutherland {
                ref_temperature,
                ref_conductivity,
                ref_constant,
            } => {
                const PATH: &str = "conductivity/sutherland";
                check_positive(errors, species, &format!("{PATH}/refTemperature"), ref_temperature);
                let ref_k = &format!("{PATH}/refConductivity");
                check_positive(errors, species, ref_k, ref_conductivity);
                check_non_negative(errors, species, &format!("{PATH}/refConstant"), ref_constant);
            }
            ConductivityModel::None => {}
        }
    }
}

impl fmt::Display for ConductivityModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConductivityModel::Constant { value } => write!(f, "{}({value})", self.name()),
            ConductivityModel::Sutherland {
                ref_temperature,
                ref_conductivity,
                ref_constant,
            } => write!(
                f,
                "{}(refTemperature: {ref_temperature}, refConductivity: {ref_conductivity}, \
                 refConstant: {ref_constant})",
                self.name()
            ),
            ConductivityModel::None => f.write_str(self.name()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DiffusivityModel {
    /// Mass diffusivity [m²/s].
    Constant { value: f64 },
    /// `D = mu / (rho * Sc)`.
    Schmidt { schmidt_number: f64 },
    #[default]
    None,
}

impl DiffusivityModel {
    pub fn name(&self) -> &'static str {
        match self {
            DiffusivityModel::Constant { .. } => "constant",
            DiffusivityModel::Schmidt { .. } => "schmidt",
            DiffusivityModel::None => "none",
        }
    }

    /// Mass diffusivity [m²/s] given the viscosity [Pa·s] and density [kg/m³]
    /// of the carrying mixture.
    pub fn evaluate(&self, viscosity: f64, density: f64) -> MixtureResult<f64> {
        match *self {
            DiffusivityModel::Constant { value } => Ok(value),
            DiffusivityModel::Schmidt { schmidt_number } => {
                Ok(viscosity / (density * schmidt_number))
            }
            DiffusivityModel::None => Err(MixtureError::ModelUnavailable {
                property: "diffusivity",
            }),
        }
    }

    pub fn is_available(&self) -> bool {
        !matches!(self, DiffusivityModel::None)
    }

    pub(crate) fn validate(&self, species: &str, errors: &mut Vec<FieldError>) {
        match *self {
            DiffusivityModel::Constant { value } => {
                check_positive(errors, species, "diffusivity/constant", value)
            }
            DiffusivityModel::Schmidt { schmidt_number } => {
                check_positive(errors, species, "diffusivity/schmidtNumber", schmidt_number)
            }
            DiffusivityModel::None => {}
        }
    }
}

impl fmt::Display for DiffusivityModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiffusivityModel::Constant { value } => write!(f, "{}({value})", self.name()),
            DiffusivityModel::Schmidt { schmidt_number } => {
                write!(f, "{}({schmidt_number})", self.name())
            }
            DiffusivityModel::None => f.write_str(self.name()),
        }
    }
}

/// Wilke's mixing rule for viscosity.
///
/// `x` are mole fractions, `w` molecular weights, `mu` species viscosities;
/// all three slices have one entry per species.
pub fn wilke_viscosity(x: &[f64], w: &[f64], mu: &[f64]) -> f64 {
    debug_assert!(x.len() == w.len() && x.len() == mu.len());
    let n = x.len();
    let mut total = 0.0;
    for k in 0..n {
        if x[k] <= 0.0 {
            continue;
        }
        let mut denom = 0.0;
        for j in 0..n {
            if x[j] <= 0.0 {
                continue;
            }
            let num = 1.0 + (mu[k] / mu[j]).sqrt() * (w[j] / w[k]).powf(0.25);
            let phi = num * num / (8.0 * (1.0 + w[k] / w[j])).sqrt();
            denom += x[j] * phi;
        }
        total += x[k] * mu[k] / denom;
    }
    total
}

/// Mixture conductivity as the mean of the mole-weighted arithmetic and
/// harmonic averages.
pub fn mixture_conductivity(x: &[f64], lambda: &[f64]) -> f64 {
    debug_assert_eq!(x.len(), lambda.len());
    let mut arithmetic = 0.0;
    let mut harmonic = 0.0;
    for (&xk, &lk) in x.iter().zip(lambda) {
        if xk <= 0.0 {
            continue;
        }
        arithmetic += xk * lk;
        harmonic += xk / lk;
    }
    if harmonic > 0.0 {
        0.5 * (arithmetic + 1.0 / harmonic)
    } else {
        0.5 * arithmetic
    }
}
