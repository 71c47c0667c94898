//! fl-mixture: species properties, mixture rules and the ideal-gas EOS.
//!
//! Provides:
//! - Per-species transport and thermochemistry models (tagged enums)
//! - NASA-9 polynomial thermochemistry
//! - `Mixture` container with load-time validation that reports every problem at once
//! - Molar/mass fraction conversions and species specification rules
//! - Ideal-gas equation-of-state relations
//! - Flow-state specification (thermodynamic pair, velocity, composition)
//! - YAML/JSON mixture documents
//!
//! # Example
//!
//! ```
//! use fl_mixture::{Mixture, SpeciesProperties, ThermochemistryModel, ViscosityModel};
//!
//! let mut mixture = Mixture::new();
//! mixture.push(
//!     SpeciesProperties::new("AIR", 28.96)
//!         .with_viscosity(ViscosityModel::Constant { value: 1.8e-5 })
//!         .with_thermochemistry(ThermochemistryModel::CaloricallyPerfect {
//!             specific_heat: 1005.0,
//!         }),
//! );
//! mixture.validate().unwrap();
//! let r = mixture.gas_constant(&[1.0]).unwrap();
//! assert!((r - 287.1).abs() < 0.1);
//! ```

pub mod composition;
pub mod document;
pub mod eos;
pub mod error;
pub mod mixture;
pub mod nasa9;
pub mod species;
pub mod state;
pub mod thermo;
pub mod transport;

pub use composition::{FractionBasis, SpeciesSpec};
pub use document::{MixtureDocument, load_json, load_yaml, parse_json, parse_yaml};
pub use error::{FieldError, MixtureError, MixtureResult};
pub use mixture::Mixture;
pub use nasa9::Nasa9Polynomial;
pub use species::SpeciesProperties;
pub use state::{FlowSpec, FlowState, ThermoSpec, VelSpec};
pub use thermo::ThermochemistryModel;
pub use transport::{ConductivityModel, DiffusivityModel, ViscosityModel};
