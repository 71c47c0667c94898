//! Mixture property report at a given temperature, pressure and composition.

use fl_mixture::{DiffusivityModel, FlowState, Mixture, MixtureResult};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Serialize)]
pub struct MixtureReport {
    pub temperature_k: f64,
    pub pressure_pa: f64,
    pub mass_fractions: Vec<f64>,
    pub molecular_weight: f64,
    pub gas_constant: f64,
    pub density: f64,
    pub cp: f64,
    pub gamma: f64,
    pub sound_speed: f64,
    pub enthalpy: f64,
    /// `None` when some species carries no viscosity model.
    pub viscosity: Option<f64>,
    pub conductivity: Option<f64>,
    pub diffusivities: Option<Vec<f64>>,
}

/// Evaluate every available property at a resolved state. Transport
/// properties are skipped when any species lacks the model.
pub fn mixture_report(mixture: &Mixture, state: &FlowState) -> MixtureResult<MixtureReport> {
    mixture.validate()?;

    let species = mixture.species();
    let (t, y) = (state.t, state.y.as_slice());

    let viscosity = if species.iter().all(|s| s.viscosity.is_available()) {
        Some(mixture.viscosity(t, y)?)
    } else {
        None
    };
    let conductivity = if species.iter().all(|s| s.conductivity.is_available()) {
        Some(mixture.conductivity(t, y)?)
    } else {
        None
    };
    // Schmidt-number diffusivities need the mixture viscosity.
    let needs_viscosity = species
        .iter()
        .any(|s| matches!(s.diffusivity, DiffusivityModel::Schmidt { .. }));
    let diffusivities = if species.iter().all(|s| s.diffusivity.is_available())
        && (viscosity.is_some() || !needs_viscosity)
    {
        let mut d = vec![0.0; species.len()];
        mixture.diffusivities(t, state.rho, y, &mut d)?;
        Some(d)
    } else {
        None
    };

    Ok(MixtureReport {
        temperature_k: t,
        pressure_pa: state.p,
        mass_fractions: state.y.clone(),
        molecular_weight: mixture.molecular_weight(y)?,
        gas_constant: state.r_gas,
        density: state.rho,
        cp: state.cp,
        gamma: state.gamma(),
        sound_speed: state.sound_speed(),
        enthalpy: mixture.enthalpy(t, y)?,
        viscosity,
        conductivity,
        diffusivities,
    })
}

fn optional(
    f: &mut fmt::Formatter<'_>,
    label: &str,
    value: Option<f64>,
    unit: &str,
) -> fmt::Result {
    match value {
        Some(v) => writeln!(f, "  {label:<16} {v:.6e} {unit}"),
        None => writeln!(f, "  {label:<16} (no model)"),
    }
}

impl fmt::Display for MixtureReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "T = {} K, P = {} Pa", self.temperature_k, self.pressure_pa)?;
        writeln!(f, "  {:<16} {:?}", "Y", self.mass_fractions)?;
        writeln!(f, "  {:<16} {:.4} kg/kmol", "W", self.molecular_weight)?;
        writeln!(f, "  {:<16} {:.4} J/(kg K)", "R", self.gas_constant)?;
        writeln!(f, "  {:<16} {:.6} kg/m3", "rho", self.density)?;
        writeln!(f, "  {:<16} {:.4} J/(kg K)", "Cp", self.cp)?;
        writeln!(f, "  {:<16} {:.6}", "gamma", self.gamma)?;
        writeln!(f, "  {:<16} {:.4} m/s", "c", self.sound_speed)?;
        writeln!(f, "  {:<16} {:.6e} J/kg", "h", self.enthalpy)?;
        optional(f, "mu", self.viscosity, "Pa s")?;
        optional(f, "lambda", self.conductivity, "W/(m K)")?;
        match &self.diffusivities {
            Some(d) => write!(f, "  {:<16} {:?} m2/s", "D", d),
            None => write!(f, "  {:<16} (no model)", "D"),
        }
    }
}
