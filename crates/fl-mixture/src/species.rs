//! Per-species property record.

use crate::error::{FieldError, MixtureResult};
use crate::thermo::ThermochemistryModel;
use crate::transport::{ConductivityModel, DiffusivityModel, ViscosityModel, check_positive};
use fl_core::constants::R_UNIVERSAL;

/// Longest accepted species name, in bytes.
pub const NAME_MAX_LEN: usize = 63;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SpeciesProperties {
    pub name: String,
    /// Molecular weight [kg/kmol].
    pub molecular_weight: f64,
    pub viscosity: ViscosityModel,
    pub conductivity: ConductivityModel,
    pub diffusivity: DiffusivityModel,
    pub thermochemistry: ThermochemistryModel,
}

impl SpeciesProperties {
    /// Species with every property model set to `None`.
    pub fn new(name: impl Into<String>, molecular_weight: f64) -> Self {
        Self {
            name: name.into(),
            molecular_weight,
            ..Self::default()
        }
    }

    pub fn with_viscosity(mut self, model: ViscosityModel) -> Self {
        self.viscosity = model;
        self
    }

    pub fn with_conductivity(mut self, model: ConductivityModel) -> Self {
        self.conductivity = model;
        self
    }

    pub fn with_diffusivity(mut self, model: DiffusivityModel) -> Self {
        self.diffusivity = model;
        self
    }

    pub fn with_thermochemistry(mut self, model: ThermochemistryModel) -> Self {
        self.thermochemistry = model;
        self
    }

    /// Reset to the empty record.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Specific gas constant [J/(kg·K)].
    pub fn gas_constant(&self) -> f64 {
        R_UNIVERSAL / self.molecular_weight
    }

    pub fn viscosity(&self, t: f64) -> MixtureResult<f64> {
        self.viscosity
            .evaluate(t)
            .map_err(|e| e.for_species(&self.name))
    }

    pub fn conductivity(&self, t: f64) -> MixtureResult<f64> {
        self.conductivity
            .evaluate(t)
            .map_err(|e| e.for_species(&self.name))
    }

    pub fn diffusivity(&self, mixture_viscosity: f64, density: f64) -> MixtureResult<f64> {
        self.diffusivity
            .evaluate(mixture_viscosity, density)
            .map_err(|e| e.for_species(&self.name))
    }

    pub fn cp(&self, t: f64) -> MixtureResult<f64> {
        self.thermochemistry
            .cp(t, self.molecular_weight)
            .map_err(|e| e.for_species(&self.name))
    }

    pub fn enthalpy(&self, t: f64) -> MixtureResult<f64> {
        self.thermochemistry
            .enthalpy(t, self.molecular_weight)
            .map_err(|e| e.for_species(&self.name))
    }

    pub fn entropy(&self, t: f64) -> MixtureResult<f64> {
        self.thermochemistry
            .entropy(t, self.molecular_weight)
            .map_err(|e| e.for_species(&self.name))
    }

    /// Label used in error reports: the name, or `#index` if it is empty.
    pub(crate) fn label(&self, index: usize) -> String {
        if self.name.is_empty() {
            format!("#{index}")
        } else {
            self.name.clone()
        }
    }

    /// Append every problem with this record to `errors`.
    pub(crate) fn validate(&self, index: usize, errors: &mut Vec<FieldError>) {
        let label = self.label(index);

        if self.name.is_empty() {
            errors.push(FieldError::new(&label, "name", "missing species name"));
        } else if self.name.len() > NAME_MAX_LEN {
            errors.push(FieldError::new(
                &label,
                "name",
                format!("longer than {NAME_MAX_LEN} bytes"),
            ));
        }

        let before = errors.len();
        check_positive(errors, &label, "molecularWeight", self.molecular_weight);
        let w = (errors.len() == before).then_some(self.molecular_weight);

        self.viscosity.validate(&label, errors);
        self.conductivity.validate(&label, errors);
        self.diffusivity.validate(&label, errors);
        self.thermochemistry.validate(&label, w, errors);
    }
}
