//! fl-flux: face flux kernels for the compressible solver.
//!
//! Provides:
//! - AUSM+-up inviscid flux for a single ideal gas and for multi-species mixtures
//! - Ramshaw-corrected species diffusion flux
//! - A once-per-batch input check for the unchecked kernels
//! - Serial and rayon-parallel sweeps over face batches
//!
//! Kernels are pure functions of their inputs and write into caller-owned
//! buffers. They do not allocate, log or return errors; invalid inputs are
//! caught by [`check`] before a sweep and by `debug_assert!` in debug builds.
//!
//! # Flux layout
//!
//! | index | quantity |
//! |-------|----------|
//! | 0..3  | momentum (x, y, z) |
//! | 3     | total enthalpy |
//! | 4     | mass |
//! | 5..   | species 0..Ns-2 (the last species is implied) |

pub mod ausm;
pub mod check;
pub mod diffusion;
pub mod error;
pub mod face;
pub mod sweep;

pub use ausm::{AusmPlusUp, InviscidFlux};
pub use diffusion::{ramshaw_diffusion_velocities, species_diffusion_flux};
pub use error::{FluxError, FluxResult, InputIssue};
pub use face::{
    ENERGY, FaceGeometry, FluxVector, GasProperties, MASS, MOMENTUM, PrimitiveState, SPECIES,
    SpeciesState, flux_len,
};
pub use sweep::{
    FaceInput, SpeciesFaceInput, ideal_gas_fluxes, ideal_gas_fluxes_par, species_fluxes,
    species_fluxes_par,
};
