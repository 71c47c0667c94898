//! Mixture definition documents (YAML or JSON).
//!
//! The vocabulary follows the mixture XML format used by the solver's input
//! decks:
//!
//! ```yaml
//! mixture:
//!   species:
//!     - name: O2
//!       molecularWeight: 31.998
//!       viscosity:
//!         sutherland: { refTemperature: 273.0, refViscosity: 1.919e-5, refConstant: 139.0 }
//!       diffusivity:
//!         schmidtNumber: 0.11
//!       thermochemistry:
//!         specificHeat: 920.0
//! ```
//!
//! Every field is optional at the serde level so that one pass can report all
//! missing, conflicting and out-of-range values together.

use crate::error::{FieldError, MixtureError, MixtureResult};
use crate::mixture::Mixture;
use crate::nasa9::{COEFF_LEN, Nasa9Polynomial};
use crate::species::SpeciesProperties;
use crate::thermo::ThermochemistryModel;
use crate::transport::{ConductivityModel, DiffusivityModel, ViscosityModel};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MixtureDocument {
    pub mixture: MixtureSection,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MixtureSection {
    #[serde(default)]
    pub species: Vec<SpeciesDocument>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SpeciesDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub molecular_weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub viscosity: Option<ViscosityDocument>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conductivity: Option<ConductivityDocument>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diffusivity: Option<DiffusivityDocument>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thermochemistry: Option<ThermochemistryDocument>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ViscosityDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constant: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sutherland: Option<SutherlandViscosityDocument>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SutherlandViscosityDocument {
    pub ref_temperature: Option<f64>,
    pub ref_viscosity: Option<f64>,
    pub ref_constant: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ConductivityDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constant: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sutherland: Option<SutherlandConductivityDocument>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SutherlandConductivityDocument {
    pub ref_temperature: Option<f64>,
    pub ref_conductivity: Option<f64>,
    pub ref_constant: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DiffusivityDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constant: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schmidt_number: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ThermochemistryDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specific_heat: Option<f64>,
    #[serde(
        rename = "NASA9Polynomial",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub nasa9_polynomial: Option<Nasa9Document>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Nasa9Document {
    pub temperature_ranges: Option<Vec<f64>>,
    pub coefficients: Option<Vec<f64>>,
}

/// Collects structural problems for one species.
struct Collector<'a> {
    species: &'a str,
    errors: &'a mut Vec<FieldError>,
}

impl Collector<'_> {
    fn push(&mut self, field: &str, reason: impl Into<String>) {
        self.errors.push(FieldError::new(self.species, field, reason));
    }

    fn require(&mut self, field: &str, value: Option<f64>) -> f64 {
        value.unwrap_or_else(|| {
            self.push(field, "missing");
            f64::NAN
        })
    }
}

fn viscosity_model(doc: &ViscosityDocument, c: &mut Collector<'_>) -> ViscosityModel {
    match (doc.constant, &doc.sutherland) {
        (Some(value), None) => ViscosityModel::Constant { value },
        (None, Some(s)) => ViscosityModel::Sutherland {
            ref_temperature: c.require("viscosity/sutherland/refTemperature", s.ref_temperature),
            ref_viscosity: c.require("viscosity/sutherland/refViscosity", s.ref_viscosity),
            ref_constant: c.require("viscosity/sutherland/refConstant", s.ref_constant),
        },
        (Some(_), Some(_)) => {
            c.push("viscosity", "both constant and sutherland given");
            ViscosityModel::None
        }
        (None, None) => {
            c.push("viscosity", "no model given");
            ViscosityModel::None
        }
    }
}

fn conductivity_model(doc: &ConductivityDocument, c: &mut Collector<'_>) -> ConductivityModel {
    match (doc.constant, &doc.sutherland) {
        (Some(value), None) => ConductivityModel::Constant { value },
        (None, Some(s)) => ConductivityModel::Sutherland {
            ref_temperature: c.require("conductivity/sutherland/refTemperature", s.ref_temperature),
            ref_conductivity: c.require(
                "conductivity/sutherland/refConductivity",
                s.ref_conductivity,
            ),
            ref_constant: c.require("conductivity/sutherland/refConstant", s.ref_constant),
        },
        (Some(_), Some(_)) => {
            c.push("conductivity", "both constant and sutherland given");
            ConductivityModel::None
        }
        (None, None) => {
            c.push("conductivity", "no model given");
            ConductivityModel::None
        }
    }
}

fn diffusivity_model(doc: &DiffusivityDocument, c: &mut Collector<'_>) -> DiffusivityModel {
    match (doc.constant, doc.schmidt_number) {
        (Some(value), None) => DiffusivityModel::Constant { value },
        (None, Some(schmidt_number)) => DiffusivityModel::Schmidt { schmidt_number },
        (Some(_), Some(_)) => {
            c.push("diffusivity", "both constant and schmidtNumber given");
            DiffusivityModel::None
        }
        (None, None) => {
            c.push("diffusivity", "no model given");
            DiffusivityModel::None
        }
    }
}

fn fixed<const N: usize>(
    field: &str,
    values: Option<&Vec<f64>>,
    c: &mut Collector<'_>,
) -> Option<[f64; N]> {
    match values {
        None => {
            c.push(field, "missing");
            None
        }
        Some(v) => match <[f64; N]>::try_from(v.as_slice()) {
            Ok(array) => Some(array),
            Err(_) => {
                c.push(field, format!("expected {N} values, got {}", v.len()));
                None
            }
        },
    }
}

fn thermochemistry_model(
    doc: &ThermochemistryDocument,
    c: &mut Collector<'_>,
) -> ThermochemistryModel {
    match (doc.specific_heat, &doc.nasa9_polynomial) {
        (Some(specific_heat), None) => ThermochemistryModel::CaloricallyPerfect { specific_heat },
        (None, Some(poly)) => {
            let ranges = fixed::<3>(
                "thermochemistry/NASA9Polynomial/temperatureRanges",
                poly.temperature_ranges.as_ref(),
                c,
            );
            let coeffs = fixed::<COEFF_LEN>(
                "thermochemistry/NASA9Polynomial/coefficients",
                poly.coefficients.as_ref(),
                c,
            );
            match (ranges, coeffs) {
                (Some(r), Some(k)) => {
                    ThermochemistryModel::Nasa9(Nasa9Polynomial::from_coefficients(r, k))
                }
                _ => ThermochemistryModel::None,
            }
        }
        (Some(_), Some(_)) => {
            c.push(
                "thermochemistry",
                "both specificHeat and NASA9Polynomial given",
            );
            ThermochemistryModel::None
        }
        (None, None) => {
            c.push("thermochemistry", "no model given");
            ThermochemistryModel::None
        }
    }
}

impl MixtureDocument {
    /// Build and validate the mixture, reporting every problem at once.
    pub fn to_mixture(&self) -> MixtureResult<Mixture> {
        let mut structural = Vec::new();
        let mut species = Vec::with_capacity(self.mixture.species.len());

        for (i, doc) in self.mixture.species.iter().enumerate() {
            let label = match doc.name.as_deref() {
                Some(name) if !name.is_empty() => name.to_string(),
                _ => format!("#{i}"),
            };
            let mut c = Collector {
                species: &label,
                errors: &mut structural,
            };

            let molecular_weight = c.require("molecularWeight", doc.molecular_weight);
            let name = doc.name.clone().unwrap_or_default();
            let mut props = SpeciesProperties::new(name, molecular_weight);
            if let Some(v) = &doc.viscosity {
                props.viscosity = viscosity_model(v, &mut c);
            }
            if let Some(k) = &doc.conductivity {
                props.conductivity = conductivity_model(k, &mut c);
            }
            if let Some(d) = &doc.diffusivity {
                props.diffusivity = diffusivity_model(d, &mut c);
            }
            if let Some(t) = &doc.thermochemistry {
                props.thermochemistry = thermochemistry_model(t, &mut c);
            }
            species.push(props);
        }

        let mixture = Mixture::from_species(species);
        let mut semantic = Vec::new();
        mixture.collect_errors(&mut semantic);

        // Skip follow-on reports for fields already flagged as missing or conflicting.
        let mut errors = structural;
        let already = errors.clone();
        errors.extend(semantic.into_iter().filter(|e| {
            !already
                .iter()
                .any(|s| {
                    s.species == e.species
                        && (e.field.starts_with(s.field.as_str())
                            || s.field.starts_with(e.field.as_str()))
                })
        }));

        if errors.is_empty() {
            debug!(species = mixture.len(), "mixture document converted");
            Ok(mixture)
        } else {
            Err(MixtureError::Invalid { errors })
        }
    }

    /// Document describing an existing mixture.
    pub fn from_mixture(mixture: &Mixture) -> Self {
        let species = mixture
            .species()
            .iter()
            .map(|s| SpeciesDocument {
                name: Some(s.name.clone()),
                molecular_weight: Some(s.molecular_weight),
                viscosity: match s.viscosity {
                    ViscosityModel::Constant { value } => Some(ViscosityDocument {
                        constant: Some(value),
                        sutherland: None,
                    }),
                    ViscosityModel::Sutherland {
                        ref_temperature,
                        ref_viscosity,
                        ref_constant,
                    } => Some(ViscosityDocument {
                        constant: None,
                        sutherland: Some(SutherlandViscosityDocument {
                            ref_temperature: Some(ref_temperature),
                            ref_viscosity: Some(ref_viscosity),
                            ref_constant: Some(ref_constant),
                        }),
                    }),
                    ViscosityModel::None => None,
                },
                conductivity: match s.conductivity {
                    ConductivityModel::Constant { value } => Some(ConductivityDocument {
                        constant: Some(value),
                        sutherland: None,
                    }),
                    ConductivityModel::Sutherland {
                        ref_temperature,
                        ref_conductivity,
                        ref_constant,
                    } => Some(ConductivityDocument {
                        constant: None,
                        sutherland: Some(SutherlandConductivityDocument {
                            ref_temperature: Some(ref_temperature),
                            ref_conductivity: Some(ref_conductivity),
                            ref_constant: Some(ref_constant),
                        }),
                    }),
                    ConductivityModel::None => None,
                },
                diffusivity: match s.diffusivity {
                    DiffusivityModel::Constant { value } => Some(DiffusivityDocument {
                        constant: Some(value),
                        schmidt_number: None,
                    }),
                    DiffusivityModel::Schmidt { schmidt_number } => Some(DiffusivityDocument {
                        constant: None,
                        schmidt_number: Some(schmidt_number),
                    }),
                    DiffusivityModel::None => None,
                },
                thermochemistry: match &s.thermochemistry {
                    ThermochemistryModel::CaloricallyPerfect { specific_heat } => {
                        Some(ThermochemistryDocument {
                            specific_heat: Some(*specific_heat),
                            nasa9_polynomial: None,
                        })
                    }
                    ThermochemistryModel::Nasa9(poly) => Some(ThermochemistryDocument {
                        specific_heat: None,
                        nasa9_polynomial: Some(Nasa9Document {
                            temperature_ranges: Some(poly.temperature_range().to_vec()),
                            coefficients: Some(poly.cp_coefficients().to_vec()),
                        }),
                    }),
                    ThermochemistryModel::None => None,
                },
            })
            .collect();
        Self {
            mixture: MixtureSection { species },
        }
    }
}

pub fn parse_yaml(content: &str) -> MixtureResult<Mixture> {
    let doc: MixtureDocument = serde_yaml::from_str(content)?;
    doc.to_mixture()
}

pub fn parse_json(content: &str) -> MixtureResult<Mixture> {
    let doc: MixtureDocument = serde_json::from_str(content)?;
    doc.to_mixture()
}

pub fn load_yaml(path: &Path) -> MixtureResult<Mixture> {
    let content = std::fs::read_to_string(path)?;
    let mixture = parse_yaml(&content)?;
    info!(path = %path.display(), species = mixture.len(), "loaded mixture");
    Ok(mixture)
}

pub fn load_json(path: &Path) -> MixtureResult<Mixture> {
    let content = std::fs::read_to_string(path)?;
    let mixture = parse_json(&content)?;
    info!(path = %path.display(), species = mixture.len(), "loaded mixture");
    Ok(mixture)
}

pub fn save_yaml(path: &Path, mixture: &Mixture) -> MixtureResult<()> {
    mixture.validate()?;
    let content = serde_yaml::to_string(&MixtureDocument::from_mixture(mixture))?;
    std::fs::write(path, content)?;
    Ok(())
}

pub fn save_json(path: &Path, mixture: &Mixture) -> MixtureResult<()> {
    mixture.validate()?;
    let content = serde_json::to_string_pretty(&MixtureDocument::from_mixture(mixture))?;
    std::fs::write(path, content)?;
    Ok(())
}
