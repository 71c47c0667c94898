//! Input checks run once per batch, ahead of the unchecked kernels.

use crate::error::{FluxError, FluxResult, InputIssue};
use crate::face::{FaceGeometry, GasProperties, PrimitiveState};
use crate::sweep::{FaceInput, SpeciesFaceInput};
use tracing::{debug, warn};

/// Allowed deviation of `|n|` from one.
pub const NORMAL_TOLERANCE: f64 = 1e-6;
/// Allowed deviation of a mass-fraction sum from one.
pub const MASS_FRACTION_TOLERANCE: f64 = 1e-6;

struct Issues {
    face: usize,
    list: Vec<InputIssue>,
}

impl Issues {
    fn push(&mut self, what: String) {
        self.list.push(InputIssue {
            face: self.face,
            what,
        });
    }
}

fn gas(issues: &mut Issues, side: &str, gas: &GasProperties) {
    if !(gas.r_gas.is_finite() && gas.r_gas > 0.0) {
        issues.push(format!("{side} gas constant R = {}", gas.r_gas));
    } else if !(gas.cp.is_finite() && gas.cp > gas.r_gas) {
        issues.push(format!("{side} Cp = {} must exceed R = {}", gas.cp, gas.r_gas));
    }
}

fn state(issues: &mut Issues, side: &str, s: &PrimitiveState, p_ambient: f64) {
    if !(s.t.is_finite() && s.t > 0.0) {
        issues.push(format!("{side} temperature = {}", s.t));
    }
    let p = s.pg + p_ambient;
    if !(p.is_finite() && p > 0.0) {
        issues.push(format!("{side} absolute pressure = {p}"));
    }
    if !s.u.iter().all(|c| c.is_finite()) {
        issues.push(format!("{side} velocity is not finite"));
    }
}

fn geometry(issues: &mut Issues, face: &FaceGeometry) {
    if !(face.area.is_finite() && face.area > 0.0) {
        issues.push(format!("area = {}", face.area));
    }
    let norm = face.normal.norm();
    if !((norm - 1.0).abs() <= NORMAL_TOLERANCE) {
        issues.push(format!("normal has length {norm}"));
    }
}

fn mass_fractions(issues: &mut Issues, side: &str, y: &[f64]) {
    let valid = -MASS_FRACTION_TOLERANCE..=1.0 + MASS_FRACTION_TOLERANCE;
    if let Some((i, v)) = y.iter().enumerate().find(|(_, v)| !valid.contains(*v)) {
        issues.push(format!("{side} Y[{i}] = {v}"));
    }
    let sum: f64 = y.iter().sum();
    if !((sum - 1.0).abs() <= MASS_FRACTION_TOLERANCE) {
        issues.push(format!("{side} mass fractions sum to {sum}"));
    }
}

fn finish(issues: Vec<InputIssue>, faces: usize) -> FluxResult<()> {
    if issues.is_empty() {
        debug!(faces, "flux inputs checked");
        Ok(())
    } else {
        warn!(faces, issues = issues.len(), "flux inputs rejected");
        Err(FluxError::InvalidInput { issues })
    }
}

/// Check a single-gas batch and report every bad face.
pub fn check_faces(
    faces: &[FaceInput],
    gas_props: &GasProperties,
    p_ambient: f64,
) -> FluxResult<()> {
    let mut issues = Issues {
        face: 0,
        list: Vec::new(),
    };
    if !p_ambient.is_finite() {
        issues.push(format!("ambient pressure = {p_ambient}"));
    }
    gas(&mut issues, "shared", gas_props);
    for (i, f) in faces.iter().enumerate() {
        issues.face = i;
        geometry(&mut issues, &f.face);
        state(&mut issues, "left", &f.left, p_ambient);
        state(&mut issues, "right", &f.right, p_ambient);
    }
    finish(issues.list, faces.len())
}

/// Check a multi-species batch; `y_left`/`y_right` hold `n_species`
/// mass fractions per face.
pub fn check_species_faces(
    faces: &[SpeciesFaceInput],
    n_species: usize,
    y_left: &[f64],
    y_right: &[f64],
    p_ambient: f64,
) -> FluxResult<()> {
    if n_species == 0 {
        return Err(FluxError::InvalidArg {
            what: "mixture needs at least one species".to_string(),
        });
    }
    FluxError::check_len("left mass fractions", faces.len() * n_species, y_left.len())?;
    FluxError::check_len("right mass fractions", faces.len() * n_species, y_right.len())?;

    let mut issues = Issues {
        face: 0,
        list: Vec::new(),
    };
    if !p_ambient.is_finite() {
        issues.push(format!("ambient pressure = {p_ambient}"));
    }
    let rows = y_left
        .chunks_exact(n_species)
        .zip(y_right.chunks_exact(n_species));
    for (i, (f, (yl, yr))) in faces.iter().zip(rows).enumerate() {
        issues.face = i;
        geometry(&mut issues, &f.face);
        gas(&mut issues, "left", &f.left_gas);
        gas(&mut issues, "right", &f.right_gas);
        state(&mut issues, "left", &f.left, p_ambient);
        state(&mut issues, "right", &f.right, p_ambient);
        mass_fractions(&mut issues, "left", yl);
        mass_fractions(&mut issues, "right", yr);
    }
    finish(issues.list, faces.len())
}
