//! fl-core: shared foundation for the flame solver crates.
//!
//! Contains:
//! - units (uom SI types, constructors, physical constants)
//! - numeric (tolerances and argument checks)
//! - registry (user-facing output variable names)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod registry;
pub mod units;

pub use error::{FlError, FlResult};
pub use numeric::*;
pub use registry::VariableRegistry;
pub use units::*;
