//! Fickian species diffusion with Ramshaw's correction velocity, so that the
//! species fluxes sum to zero.

use crate::face::FaceGeometry;
use nalgebra::Vector3;

/// Floor applied to `Y_i` when dividing by it for a diffusion velocity.
pub const MIN_MASS_FRACTION: f64 = 1e-30;

/// Corrected diffusion velocities `V_i - V_c` where `V_i = -D_i grad(Y_i) / Y_i`
/// and `V_c = sum(Y_i V_i)`, so that `sum(Y_i (V_i - V_c)) = 0`.
///
/// `Y_i` is floored at [`MIN_MASS_FRACTION`]; an absent species then carries
/// no mass. [`species_diffusion_flux`] instead uses `Y_i V_i = -D_i grad(Y_i)`
/// directly.
pub fn ramshaw_diffusion_velocities(
    y: &[f64],
    grad_y: &[Vector3<f64>],
    d: &[f64],
    out: &mut [Vector3<f64>],
) {
    let ns = y.len();
    debug_assert!(grad_y.len() == ns && d.len() == ns && out.len() == ns);

    for i in 0..ns {
        out[i] = grad_y[i] * (-d[i] / y[i].max(MIN_MASS_FRACTION));
    }
    // Built from the floored V_i so that absent species drop out of both sums.
    let vc: Vector3<f64> = out.iter().zip(y).map(|(vi, yi)| vi * *yi).sum();
    for vi in out.iter_mut() {
        *vi -= vc;
    }
}

/// Species diffusion fluxes `rho Y_i (V_i - V_c) . n * area` [kg/s] into `out`
/// (one per species). They sum to zero whenever `sum(Y_i) = 1`.
pub fn species_diffusion_flux(
    rho: f64,
    y: &[f64],
    grad_y: &[Vector3<f64>],
    d: &[f64],
    face: &FaceGeometry,
    out: &mut [f64],
) {
    let ns = y.len();
    debug_assert!(grad_y.len() == ns && d.len() == ns && out.len() == ns);

    let n = &face.normal;
    let mut vc_n = 0.0;
    for (g, di) in grad_y.iter().zip(d) {
        vc_n -= di * g.dot(n);
    }
    let scale = rho * face.area;
    for i in 0..ns {
        let yv_n = -d[i] * grad_y[i].dot(n);
        out[i] = scale * (yv_n - y[i] * vc_n);
    }
}
