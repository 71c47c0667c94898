//! Face geometry and the per-side states the flux kernels consume.

use fl_mixture::{FlowState, eos};
use nalgebra::Vector3;

/// First momentum component.
pub const MOMENTUM: usize = 0;
/// Total enthalpy flux.
pub const ENERGY: usize = 3;
/// Mass flux.
pub const MASS: usize = 4;
/// First species flux.
pub const SPECIES: usize = 5;

/// Single-gas flux: momentum, energy, mass.
pub type FluxVector = [f64; 5];

/// Flux length for a mixture of `n_species` (the last species is implied).
#[inline]
pub const fn flux_len(n_species: usize) -> usize {
    4 + n_species
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceGeometry {
    /// Face area [m²].
    pub area: f64,
    /// Unit normal pointing from the left cell to the right cell.
    pub normal: Vector3<f64>,
}

impl FaceGeometry {
    pub fn new(area: f64, normal: Vector3<f64>) -> Self {
        Self { area, normal }
    }

    /// Same face seen from the other side.
    pub fn flipped(&self) -> Self {
        Self {
            area: self.area,
            normal: -self.normal,
        }
    }
}

/// Primitive state on one side of a face.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrimitiveState {
    pub u: Vector3<f64>,
    /// Gage pressure [Pa], relative to the flux's ambient pressure.
    pub pg: f64,
    pub t: f64,
}

impl PrimitiveState {
    pub fn new(u: Vector3<f64>, pg: f64, t: f64) -> Self {
        Self { u, pg, t }
    }

    pub fn from_flow_state(state: &FlowState, p_ambient: f64) -> Self {
        Self {
            u: state.u,
            pg: state.gage_pressure(p_ambient),
            t: state.t,
        }
    }
}

/// Ideal-gas constants on one side of a face.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GasProperties {
    /// Specific gas constant [J/(kg·K)].
    pub r_gas: f64,
    /// Specific heat at constant pressure [J/(kg·K)].
    pub cp: f64,
}

impl GasProperties {
    pub fn new(r_gas: f64, cp: f64) -> Self {
        Self { r_gas, cp }
    }

    pub fn from_gamma(gamma: f64, r_gas: f64) -> Self {
        Self {
            r_gas,
            cp: eos::cp_from_gamma_r(gamma, r_gas),
        }
    }

    pub fn from_flow_state(state: &FlowState) -> Self {
        Self {
            r_gas: state.r_gas,
            cp: state.cp,
        }
    }

    #[inline]
    pub fn gamma(&self) -> f64 {
        eos::gamma_from_cp_r(self.cp, self.r_gas)
    }
}

/// Multi-species side state; `y` holds one mass fraction per species.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeciesState<'a> {
    pub prim: PrimitiveState,
    pub gas: GasProperties,
    pub y: &'a [f64],
}
