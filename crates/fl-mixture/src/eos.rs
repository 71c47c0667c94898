//! Ideal-gas equation of state.
//!
//! Pure functions on SI `f64` values. Callers are expected to pass
//! physically valid inputs (`Cp > R > 0`, `T > 0`, `rho > 0`); see
//! [`check_gas`] for a boundary check.

use crate::error::{MixtureError, MixtureResult};
use fl_core::constants::R_UNIVERSAL;

/// Specific gas constant [J/(kg·K)] from molecular weight [kg/kmol].
#[inline]
pub fn gas_constant_from_mw(w: f64) -> f64 {
    R_UNIVERSAL / w
}

#[inline]
pub fn sound_speed_from_cp_r_t(cp: f64, r: f64, t: f64) -> f64 {
    (cp / (cp - r) * r * t).sqrt()
}

#[inline]
pub fn sound_speed_from_gamma_r_t(gamma: f64, r: f64, t: f64) -> f64 {
    (gamma * r * t).sqrt()
}

/// `a = sqrt(gamma P / rho)` with gamma from `(Cp, R)`.
#[inline]
pub fn sound_speed_from_cp_r_p_rho(cp: f64, r: f64, p: f64, rho: f64) -> f64 {
    (cp / (cp - r) * p / rho).sqrt()
}

#[inline]
pub fn cv_from_cp_r(cp: f64, r: f64) -> f64 {
    cp - r
}

#[inline]
pub fn cv_from_gamma_r(gamma: f64, r: f64) -> f64 {
    r / (gamma - 1.0)
}

#[inline]
pub fn cv_from_gamma_cp(gamma: f64, cp: f64) -> f64 {
    cp / gamma
}

#[inline]
pub fn cp_from_gamma_r(gamma: f64, r: f64) -> f64 {
    gamma * r / (gamma - 1.0)
}

#[inline]
pub fn gamma_from_cp_r(cp: f64, r: f64) -> f64 {
    cp / (cp - r)
}

#[inline]
pub fn gamma_from_cp_cv(cp: f64, cv: f64) -> f64 {
    cp / cv
}

#[inline]
pub fn gamma_from_cv_r(cv: f64, r: f64) -> f64 {
    (cv + r) / cv
}

#[inline]
pub fn pressure_from_rho_t_r(rho: f64, t: f64, r: f64) -> f64 {
    rho * r * t
}

#[inline]
pub fn density_from_p_t_r(p: f64, t: f64, r: f64) -> f64 {
    p / (r * t)
}

#[inline]
pub fn temperature_from_rho_p_r(rho: f64, p: f64, r: f64) -> f64 {
    p / (rho * r)
}

/// Reject gas properties for which the relations above are meaningless.
pub fn check_gas(cp: f64, r: f64) -> MixtureResult<()> {
    if !(r.is_finite() && r > 0.0) {
        return Err(MixtureError::NonPhysical {
            what: format!("gas constant R = {r}"),
        });
    }
    if !(cp.is_finite() && cp > r) {
        return Err(MixtureError::NonPhysical {
            what: format!("specific heat Cp = {cp} must exceed R = {r}"),
        });
    }
    Ok(())
}
