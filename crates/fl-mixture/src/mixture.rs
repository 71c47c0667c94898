//! Mixture of species with mass-fraction-weighted property rules.

use crate::composition::x_from_y;
use crate::eos;
use crate::error::{FieldError, MixtureError, MixtureResult};
use crate::species::SpeciesProperties;
use crate::transport::{DiffusivityModel, mixture_conductivity, wilke_viscosity};
use fl_core::constants::R_UNIVERSAL;
use std::collections::HashSet;
use std::fmt;
use tracing::{debug, warn};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mixture {
    species: Vec<SpeciesProperties>,
}

impl Mixture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_species(species: Vec<SpeciesProperties>) -> Self {
        Self { species }
    }

    /// Append a species and return its index.
    pub fn push(&mut self, species: SpeciesProperties) -> usize {
        self.species.push(species);
        self.species.len() - 1
    }

    pub fn len(&self) -> usize {
        self.species.len()
    }

    pub fn is_empty(&self) -> bool {
        self.species.is_empty()
    }

    pub fn species(&self) -> &[SpeciesProperties] {
        &self.species
    }

    pub fn get(&self, index: usize) -> Option<&SpeciesProperties> {
        self.species.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut SpeciesProperties> {
        self.species.get_mut(index)
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.species.iter().position(|s| s.name == name)
    }

    /// Drop every species.
    pub fn clear(&mut self) {
        self.species.clear();
    }

    /// Reset one species record to its empty state, keeping its slot.
    pub fn clear_species(&mut self, index: usize) -> MixtureResult<()> {
        let len = self.species.len();
        let species = self
            .species
            .get_mut(index)
            .ok_or_else(|| MixtureError::InvalidArg {
                what: format!("species index {index} out of range (len={len})"),
            })?;
        species.clear();
        Ok(())
    }

    pub fn molecular_weights(&self) -> Vec<f64> {
        self.species.iter().map(|s| s.molecular_weight).collect()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.species.iter().map(|s| s.name.as_str())
    }

    /// Check every species and report all problems in one error.
    pub fn validate(&self) -> MixtureResult<()> {
        let mut errors = Vec::new();
        self.collect_errors(&mut errors);
        if errors.is_empty() {
            debug!(species = self.len(), "mixture validated");
            Ok(())
        } else {
            warn!(
                species = self.len(),
                errors = errors.len(),
                "mixture validation failed"
            );
            Err(MixtureError::Invalid { errors })
        }
    }

    pub(crate) fn collect_errors(&self, errors: &mut Vec<FieldError>) {
        if self.species.is_empty() {
            errors.push(FieldError::new("-", "species", "mixture has no species"));
            return;
        }
        let mut seen = HashSet::new();
        for (i, s) in self.species.iter().enumerate() {
            s.validate(i, errors);
            if !s.name.is_empty() && !seen.insert(s.name.as_str()) {
                errors.push(FieldError::new(&s.name, "name", "duplicate species name"));
            }
        }
    }

    fn check_len(&self, what: &str, len: usize) -> MixtureResult<()> {
        if len == self.species.len() {
            Ok(())
        } else {
            Err(MixtureError::InvalidArg {
                what: format!(
                    "{what} has {len} entries, mixture has {} species",
                    self.species.len()
                ),
            })
        }
    }

    /// Mixture molecular weight [kg/kmol] from mass fractions.
    pub fn molecular_weight(&self, y: &[f64]) -> MixtureResult<f64> {
        self.check_len("mass fractions", y.len())?;
        let inverse: f64 = self
            .species
            .iter()
            .zip(y)
            .map(|(s, y)| y / s.molecular_weight)
            .sum();
        Ok(1.0 / inverse)
    }

    /// Mixture gas constant [J/(kg·K)] from mass fractions.
    pub fn gas_constant(&self, y: &[f64]) -> MixtureResult<f64> {
        Ok(R_UNIVERSAL / self.molecular_weight(y)?)
    }

    /// Mass-weighted specific heat [J/(kg·K)].
    pub fn cp(&self, t: f64, y: &[f64]) -> MixtureResult<f64> {
        self.check_len("mass fractions", y.len())?;
        self.species
            .iter()
            .zip(y)
            .try_fold(0.0, |acc, (s, y)| Ok(acc + y * s.cp(t)?))
    }

    /// Mass-weighted specific enthalpy [J/kg].
    pub fn enthalpy(&self, t: f64, y: &[f64]) -> MixtureResult<f64> {
        self.check_len("mass fractions", y.len())?;
        self.species
            .iter()
            .zip(y)
            .try_fold(0.0, |acc, (s, y)| Ok(acc + y * s.enthalpy(t)?))
    }

    pub fn gamma(&self, t: f64, y: &[f64]) -> MixtureResult<f64> {
        let cp = self.cp(t, y)?;
        Ok(eos::gamma_from_cp_r(cp, self.gas_constant(y)?))
    }

    pub fn sound_speed(&self, t: f64, y: &[f64]) -> MixtureResult<f64> {
        let cp = self.cp(t, y)?;
        Ok(eos::sound_speed_from_cp_r_t(cp, self.gas_constant(y)?, t))
    }

    fn mole_fractions(&self, y: &[f64]) -> Vec<f64> {
        let w = self.molecular_weights();
        let mut x = vec![0.0; y.len()];
        x_from_y(y, &w, &mut x);
        x
    }

    /// Mixture viscosity [Pa·s] by Wilke's rule.
    pub fn viscosity(&self, t: f64, y: &[f64]) -> MixtureResult<f64> {
        self.check_len("mass fractions", y.len())?;
        let mu = self
            .species
            .iter()
            .map(|s| s.viscosity(t))
            .collect::<MixtureResult<Vec<_>>>()?;
        if mu.len() == 1 {
            return Ok(mu[0]);
        }
        let x = self.mole_fractions(y);
        Ok(wilke_viscosity(&x, &self.molecular_weights(), &mu))
    }

    /// Mixture thermal conductivity [W/(m·K)].
    pub fn conductivity(&self, t: f64, y: &[f64]) -> MixtureResult<f64> {
        self.check_len("mass fractions", y.len())?;
        let lambda = self
            .species
            .iter()
            .map(|s| s.conductivity(t))
            .collect::<MixtureResult<Vec<_>>>()?;
        if lambda.len() == 1 {
            return Ok(lambda[0]);
        }
        let x = self.mole_fractions(y);
        Ok(mixture_conductivity(&x, &lambda))
    }

    /// Species diffusivities [m²/s] into `out` (one entry per species).
    ///
    /// Schmidt-number species use the mixture viscosity at `t`.
    pub fn diffusivities(
        &self,
        t: f64,
        rho: f64,
        y: &[f64],
        out: &mut [f64],
    ) -> MixtureResult<()> {
        self.check_len("mass fractions", y.len())?;
        self.check_len("diffusivity output", out.len())?;
        let mut mixture_mu = None;
        for (s, d) in self.species.iter().zip(out.iter_mut()) {
            let mu = match s.diffusivity {
                DiffusivityModel::Schmidt { .. } => match mixture_mu {
                    Some(mu) => mu,
                    None => {
                        let mu = self.viscosity(t, y)?;
                        mixture_mu = Some(mu);
                        mu
                    }
                },
                _ => 0.0,
            };
            *d = s.diffusivity(mu, rho)?;
        }
        Ok(())
    }
}

impl fmt::Display for Mixture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "mixture: {{")?;
        for s in &self.species {
            writeln!(f, "  species: {{")?;
            writeln!(f, "    name: '{}'", s.name)?;
            writeln!(f, "    molecularWeight: {}", s.molecular_weight)?;
            writeln!(f, "    viscosity: {}", s.viscosity)?;
            writeln!(f, "    conductivity: {}", s.conductivity)?;
            writeln!(f, "    diffusivity: {}", s.diffusivity)?;
            writeln!(f, "    thermochemistry: {}", s.thermochemistry)?;
            writeln!(f, "  }}")?;
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::thermo::ThermochemistryModel;
    use crate::transport::{ConductivityModel, ViscosityModel};
    use fl_core::numeric::{Tolerances, nearly_equal};

    fn species(name: &str, w: f64, cp: f64, mu: f64, sc: f64) -> SpeciesProperties {
        SpeciesProperties::new(name, w)
            .with_viscosity(ViscosityModel::Constant { value: mu })
            .with_conductivity(ConductivityModel::Constant { value: 0.025 })
            .with_diffusivity(DiffusivityModel::Schmidt { schmidt_number: sc })
            .with_thermochemistry(ThermochemistryModel::CaloricallyPerfect { specific_heat: cp })
    }

    fn air() -> Mixture {
        Mixture::from_species(vec![
            species("O2", 31.998, 920.0, 2.07e-5, 0.11),
            species("N2", 28.014, 1040.0, 1.78e-5, 0.22),
        ])
    }

    #[test]
    fn valid_mixture_passes() {
        let m = air();
        m.validate().unwrap();
        assert_eq!(m.len(), 2);
        assert_eq!(m.index_of("N2"), Some(1));
        assert_eq!(m.names().collect::<Vec<_>>(), vec!["O2", "N2"]);
    }

    #[test]
    fn empty_mixture_is_invalid() {
        let err = Mixture::new().validate().unwrap_err();
        assert_eq!(err.field_errors().len(), 1);
    }

    #[test]
    fn duplicate_names_are_reported() {
        let mut m = air();
        m.push(species("O2", 31.998, 920.0, 2.0e-5, 0.5));
        let err = m.validate().unwrap_err();
        assert!(err.field_errors().iter().any(|e| e.reason.contains("duplicate")));
    }

    #[test]
    fn errors_from_several_species_are_accumulated() {
        let mut m = air();
        m.get_mut(0).unwrap().molecular_weight = 0.0;
        m.get_mut(1).unwrap().viscosity = ViscosityModel::Constant { value: -1.0 };
        let err = m.validate().unwrap_err();
        let species: Vec<&str> = err.field_errors().iter().map(|e| e.species.as_str()).collect();
        assert!(species.contains(&"O2"));
        assert!(species.contains(&"N2"));
    }

    #[test]
    fn clear_species_keeps_slot() {
        let mut m = air();
        m.clear_species(0).unwrap();
        assert_eq!(m.len(), 2);
        assert!(m.get(0).unwrap().name.is_empty());
        assert!(m.clear_species(5).is_err());
        m.clear();
        assert!(m.is_empty());
    }

    #[test]
    fn mass_weighted_cp_and_gas_constant() {
        let m = air();
        let y = [0.233, 0.767];
        let cp = m.cp(300.0, &y).unwrap();
        assert!(nearly_equal(cp, 0.233 * 920.0 + 0.767 * 1040.0, Tolerances::default()));
        let r = m.gas_constant(&y).unwrap();
        assert!((r - 288.2).abs() < 0.5, "R = {r}");
        let w = m.molecular_weight(&y).unwrap();
        assert!(nearly_equal(R_UNIVERSAL / w, r, Tolerances::default()));
        assert!(m.cp(300.0, &[1.0]).is_err());
    }

    #[test]
    fn short_mass_fractions_are_rejected() {
        let m = air();
        for result in [
            m.molecular_weight(&[1.0]),
            m.gas_constant(&[1.0]),
            m.gas_constant(&[0.2, 0.3, 0.5]),
        ] {
            let err = result.unwrap_err();
            assert!(matches!(err, MixtureError::InvalidArg { .. }), "{err:?}");
            assert!(err.to_string().contains("mass fractions"));
        }
        assert!(m.gamma(300.0, &[1.0]).is_err());
    }

    #[test]
    fn single_species_transport_is_species_value() {
        let m = Mixture::from_species(vec![species("AIR", 28.96, 1005.0, 1.8e-5, 0.7)]);
        assert_eq!(m.viscosity(300.0, &[1.0]).unwrap(), 1.8e-5);
        assert_eq!(m.conductivity(300.0, &[1.0]).unwrap(), 0.025);
        let gamma = m.gamma(300.0, &[1.0]).unwrap();
        assert!((gamma - 1.4).abs() < 1e-3);
        let a = m.sound_speed(300.0, &[1.0]).unwrap();
        assert!((a - 347.0).abs() < 1.0);
    }

    #[test]
    fn schmidt_diffusivities_use_mixture_viscosity() {
        let m = air();
        let y = [0.233, 0.767];
        let mu = m.viscosity(300.0, &y).unwrap();
        let mut d = [0.0; 2];
        m.diffusivities(300.0, 1.2, &y, &mut d).unwrap();
        assert!(nearly_equal(d[0], mu / (1.2 * 0.11), Tolerances::default()));
        assert!(nearly_equal(d[1], mu / (1.2 * 0.22), Tolerances::default()));
    }

    #[test]
    fn missing_model_propagates() {
        let mut m = air();
        m.get_mut(1).unwrap().viscosity = ViscosityModel::None;
        let err = m.viscosity(300.0, &[0.5, 0.5]).unwrap_err();
        assert!(err.to_string().contains("N2"));
    }

    #[test]
    fn display_lists_models() {
        let text = air().to_string();
        assert!(text.starts_with("mixture: {"));
        assert!(text.contains("name: 'O2'"));
        assert!(text.contains("diffusivity: schmidt(0.22)"));
        assert!(text.contains("thermochemistry: caloricallyPerfect(specificHeat: 1040)"));
    }
}
