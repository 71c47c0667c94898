//! AUSM+-up inviscid flux (Liou, "A sequel to AUSM, Part II", 2006).
//!
//! Pressures inside the scheme are absolute (`pg + p_ambient`); the momentum
//! flux carries the interface gage pressure. The energy slot holds the
//! total-enthalpy flux `mdot * h0`.

use crate::face::{
    ENERGY, FaceGeometry, FluxVector, GasProperties, MASS, PrimitiveState, SPECIES, SpeciesState,
    flux_len,
};
use nalgebra::Vector3;

const KP: f64 = 0.25;
const KU: f64 = 0.75;
const SIGMA: f64 = 1.0;
const BETA: f64 = 1.0 / 8.0;

/// Interface flux over a face, written into a caller-owned buffer.
pub trait InviscidFlux: Send + Sync {
    /// Write the flux for `left`/`right` into `out` (length `flux_len(Ns)`).
    fn compute(
        &self,
        left: &SpeciesState<'_>,
        right: &SpeciesState<'_>,
        face: &FaceGeometry,
        out: &mut [f64],
    );

    /// Reference pressure that gage pressures are measured from [Pa].
    fn p_ambient(&self) -> f64;

    fn name(&self) -> &'static str;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AusmPlusUp {
    /// Reference pressure that gage pressures are measured from [Pa].
    pub p_ambient: f64,
    /// Free-stream Mach number for low-speed scaling.
    pub m_inf: f64,
}

/// One side of the face, after the ideal-gas closure.
struct Side {
    p: f64,
    rho: f64,
    un: f64,
    h0: f64,
    cstar2: f64,
}

impl Side {
    #[inline]
    fn new(prim: &PrimitiveState, gas: &GasProperties, p_ambient: f64, n: &Vector3<f64>) -> Self {
        debug_assert!(gas.r_gas > 0.0 && gas.cp > gas.r_gas, "need Cp > R > 0");
        debug_assert!(prim.t > 0.0, "temperature must be positive");

        let p = prim.pg + p_ambient;
        let rho = p / (gas.r_gas * prim.t);
        let gamma = gas.cp / (gas.cp - gas.r_gas);
        let h0 = gas.cp * prim.t + 0.5 * prim.u.norm_squared();
        Self {
            p,
            rho,
            un: prim.u.dot(n),
            h0,
            cstar2: 2.0 * (gamma - 1.0) / (gamma + 1.0) * h0,
        }
    }
}

/// Interface Mach number and pressure with the common sound speed.
struct Interface {
    m_half: f64,
    p_half: f64,
    c_half: f64,
}

impl AusmPlusUp {
    pub fn new(p_ambient: f64, m_inf: f64) -> Self {
        Self { p_ambient, m_inf }
    }

    fn interface(&self, l: &Side, r: &Side) -> Interface {
        // Entropy-fixed numerical sound speeds.
        let cl_star = l.cstar2.sqrt();
        let cr_star = r.cstar2.sqrt();
        let cl_tilde = l.cstar2 / l.un.max(cl_star);
        let cr_tilde = r.cstar2 / (-r.un).max(cr_star);
        let c_half = cl_tilde.min(cr_tilde);

        let m_inf2 = self.m_inf * self.m_inf;
        let m_avg2 = 0.5 * (l.un * l.un + r.un * r.un) / (c_half * c_half);
        let m02 = m_avg2.max(m_inf2).min(1.0);
        let m0 = m02.sqrt();
        let fa = m0 * (2.0 - m0);
        let alpha = 3.0 / 16.0 * (-4.0 + 5.0 * fa * fa);

        let rho_half = 0.5 * (l.rho + r.rho);
        let ml = l.un / c_half;
        let mr = r.un / c_half;

        let (ml_plus, p_plus) = if ml < -1.0 {
            (0.0, 0.0)
        } else if ml <= 1.0 {
            let a = ml + 1.0;
            let b = ml * ml - 1.0;
            let (a2, b2) = (a * a, b * b);
            (
                0.25 * a2 + BETA * b2,
                0.25 * a2 * (2.0 - ml) + alpha * ml * b2,
            )
        } else {
            (ml, 1.0)
        };

        let (mr_minus, p_minus) = if mr < -1.0 {
            (mr, 1.0)
        } else if mr <= 1.0 {
            let a = mr - 1.0;
            let b = mr * mr - 1.0;
            let (a2, b2) = (a * a, b * b);
            (
                -0.25 * a2 - BETA * b2,
                0.25 * a2 * (2.0 + mr) - alpha * mr * b2,
            )
        } else {
            (0.0, 0.0)
        };

        let m_p = -KP / fa * (1.0 - SIGMA * m_avg2).max(0.0) * (r.p - l.p)
            / (rho_half * c_half * c_half);
        let p_u = -KU * p_plus * p_minus * (l.rho + r.rho) * fa * c_half * (r.un - l.un);

        Interface {
            m_half: ml_plus + mr_minus + m_p,
            p_half: l.p * p_plus + r.p * p_minus + p_u,
            c_half,
        }
    }

    /// Write momentum, energy and mass into `out[..5]`; returns the mass flux
    /// and whether the left state was upwinded.
    #[inline]
    fn write_base(
        &self,
        l: &Side,
        ul: &Vector3<f64>,
        r: &Side,
        ur: &Vector3<f64>,
        face: &FaceGeometry,
        out: &mut [f64],
    ) -> (f64, bool) {
        let i = self.interface(l, r);
        let from_left = i.m_half >= 0.0;
        let (side, u) = if from_left { (l, ul) } else { (r, ur) };

        let mdot = face.area * side.rho * i.m_half * i.c_half;
        let pg = face.area * (i.p_half - self.p_ambient);
        let momentum = u * mdot + face.normal * pg;

        out[0] = momentum.x;
        out[1] = momentum.y;
        out[2] = momentum.z;
        out[ENERGY] = mdot * side.h0;
        out[MASS] = mdot;
        (mdot, from_left)
    }

    /// Single ideal gas shared by both sides.
    pub fn ideal_gas(
        &self,
        left: &PrimitiveState,
        right: &PrimitiveState,
        gas: &GasProperties,
        face: &FaceGeometry,
    ) -> FluxVector {
        let l = Side::new(left, gas, self.p_ambient, &face.normal);
        let r = Side::new(right, gas, self.p_ambient, &face.normal);
        let mut out = [0.0; 5];
        self.write_base(&l, &left.u, &r, &right.u, face, &mut out);
        out
    }

    /// Mixture of `Ns = left.y.len()` species with per-side gas constants.
    /// `out` must hold `flux_len(Ns)` values.
    pub fn multi_species(
        &self,
        left: &SpeciesState<'_>,
        right: &SpeciesState<'_>,
        face: &FaceGeometry,
        out: &mut [f64],
    ) {
        let ns = left.y.len();
        debug_assert_eq!(right.y.len(), ns, "mass fraction lengths differ");
        debug_assert_eq!(out.len(), flux_len(ns), "flux buffer length");

        let l = Side::new(&left.prim, &left.gas, self.p_ambient, &face.normal);
        let r = Side::new(&right.prim, &right.gas, self.p_ambient, &face.normal);
        let (mdot, from_left) =
            self.write_base(&l, &left.prim.u, &r, &right.prim.u, face, out);

        let y = if from_left { left.y } else { right.y };
        for (f, yi) in out[SPECIES..].iter_mut().zip(y) {
            *f = mdot * yi;
        }
    }
}

impl Default for AusmPlusUp {
    fn default() -> Self {
        Self {
            p_ambient: fl_core::constants::P_STANDARD_PA,
            m_inf: 0.1,
        }
    }
}

impl InviscidFlux for AusmPlusUp {
    #[inline]
    fn compute(
        &self,
        left: &SpeciesState<'_>,
        right: &SpeciesState<'_>,
        face: &FaceGeometry,
        out: &mut [f64],
    ) {
        self.multi_species(left, right, face, out);
    }

    fn p_ambient(&self) -> f64 {
        self.p_ambient
    }

    fn name(&self) -> &'static str {
        "AUSM+-up"
    }
}
