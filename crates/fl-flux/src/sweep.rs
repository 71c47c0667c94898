//! Face batch sweeps, serial and rayon-parallel.
//!
//! Inputs are checked once with [`crate::check`] before the sweep; each face
//! then writes only its own slot of the output buffer.

use crate::ausm::{AusmPlusUp, InviscidFlux};
use crate::check::{check_faces, check_species_faces};
use crate::error::{FluxError, FluxResult};
use crate::face::{FaceGeometry, FluxVector, GasProperties, PrimitiveState, SpeciesState, flux_len};
use rayon::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceInput {
    pub left: PrimitiveState,
    pub right: PrimitiveState,
    pub face: FaceGeometry,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeciesFaceInput {
    pub left: PrimitiveState,
    pub right: PrimitiveState,
    pub left_gas: GasProperties,
    pub right_gas: GasProperties,
    pub face: FaceGeometry,
}

/// Single-gas fluxes for every face, one after another.
pub fn ideal_gas_fluxes(
    flux: &AusmPlusUp,
    gas: &GasProperties,
    faces: &[FaceInput],
    out: &mut [FluxVector],
) -> FluxResult<()> {
    FluxError::check_len("flux output", faces.len(), out.len())?;
    check_faces(faces, gas, flux.p_ambient)?;
    for (f, o) in faces.iter().zip(out.iter_mut()) {
        *o = flux.ideal_gas(&f.left, &f.right, gas, &f.face);
    }
    Ok(())
}

/// Single-gas fluxes for every face on the rayon pool.
pub fn ideal_gas_fluxes_par(
    flux: &AusmPlusUp,
    gas: &GasProperties,
    faces: &[FaceInput],
    out: &mut [FluxVector],
) -> FluxResult<()> {
    FluxError::check_len("flux output", faces.len(), out.len())?;
    check_faces(faces, gas, flux.p_ambient)?;
    out.par_iter_mut().zip(faces.par_iter()).for_each(|(o, f)| {
        *o = flux.ideal_gas(&f.left, &f.right, gas, &f.face);
    });
    Ok(())
}

struct SpeciesBatch<'a> {
    n_species: usize,
    faces: &'a [SpeciesFaceInput],
    y_left: &'a [f64],
    y_right: &'a [f64],
}

impl SpeciesBatch<'_> {
    #[inline]
    fn evaluate<F: InviscidFlux + ?Sized>(&self, flux: &F, i: usize, row: &mut [f64]) {
        let f = &self.faces[i];
        let span = i * self.n_species..(i + 1) * self.n_species;
        let left = SpeciesState {
            prim: f.left,
            gas: f.left_gas,
            y: &self.y_left[span.clone()],
        };
        let right = SpeciesState {
            prim: f.right,
            gas: f.right_gas,
            y: &self.y_right[span],
        };
        flux.compute(&left, &right, &f.face, row);
    }
}

fn prepare<'a>(
    n_species: usize,
    faces: &'a [SpeciesFaceInput],
    y_left: &'a [f64],
    y_right: &'a [f64],
    p_ambient: f64,
    out_len: usize,
) -> FluxResult<SpeciesBatch<'a>> {
    check_species_faces(faces, n_species, y_left, y_right, p_ambient)?;
    FluxError::check_len("flux output", faces.len() * flux_len(n_species), out_len)?;
    Ok(SpeciesBatch {
        n_species,
        faces,
        y_left,
        y_right,
    })
}

/// Multi-species fluxes, one after another. `out` holds `flux_len(n_species)`
/// values per face, row-major.
pub fn species_fluxes(
    flux: &AusmPlusUp,
    n_species: usize,
    faces: &[SpeciesFaceInput],
    y_left: &[f64],
    y_right: &[f64],
    out: &mut [f64],
) -> FluxResult<()> {
    let batch = prepare(n_species, faces, y_left, y_right, flux.p_ambient, out.len())?;
    for (i, row) in out.chunks_exact_mut(flux_len(n_species)).enumerate() {
        batch.evaluate(flux, i, row);
    }
    Ok(())
}

/// Multi-species fluxes on the rayon pool, generic over the flux scheme.
/// Absolute pressures are checked against the scheme's own ambient.
pub fn species_fluxes_par<F: InviscidFlux + ?Sized>(
    flux: &F,
    n_species: usize,
    faces: &[SpeciesFaceInput],
    y_left: &[f64],
    y_right: &[f64],
    out: &mut [f64],
) -> FluxResult<()> {
    let batch = prepare(n_species, faces, y_left, y_right, flux.p_ambient(), out.len())?;
    out.par_chunks_mut(flux_len(n_species))
        .enumerate()
        .for_each(|(i, row)| batch.evaluate(flux, i, row));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector3;

    fn faces(n: usize) -> Vec<FaceInput> {
        (0..n)
            .map(|i| {
                let s = i as f64;
                FaceInput {
                    left: PrimitiveState::new(Vector3::new(50.0 + s, 1.0, 0.0), 100.0 * s, 300.0),
                    right: PrimitiveState::new(Vector3::new(40.0, -s, 0.0), -50.0 * s, 310.0),
                    face: FaceGeometry::new(1.0 + 0.01 * s, Vector3::x()),
                }
            })
            .collect()
    }

    #[test]
    fn parallel_matches_serial() {
        let flux = AusmPlusUp::new(101_325.0, 0.1);
        let gas = GasProperties::from_gamma(1.4, 287.0);
        let input = faces(257);
        let mut serial = vec![[0.0; 5]; input.len()];
        let mut parallel = vec![[0.0; 5]; input.len()];
        ideal_gas_fluxes(&flux, &gas, &input, &mut serial).unwrap();
        ideal_gas_fluxes_par(&flux, &gas, &input, &mut parallel).unwrap();
        assert_eq!(serial, parallel);
    }

    #[test]
    fn output_length_is_checked() {
        let flux = AusmPlusUp::new(101_325.0, 0.1);
        let gas = GasProperties::from_gamma(1.4, 287.0);
        let mut out = vec![[0.0; 5]; 2];
        let err = ideal_gas_fluxes(&flux, &gas, &faces(3), &mut out).unwrap_err();
        assert!(matches!(err, FluxError::LengthMismatch { expected: 3, actual: 2, .. }));
    }

    #[test]
    fn species_sweep_rows_match_single_face_calls() {
        let flux = AusmPlusUp::new(101_325.0, 0.1);
        let gas = GasProperties::new(287.0, 1005.0);
        let input: Vec<SpeciesFaceInput> = faces(5)
            .into_iter()
            .map(|f| SpeciesFaceInput {
                left: f.left,
                right: f.right,
                left_gas: gas,
                right_gas: gas,
                face: f.face,
            })
            .collect();
        let y_left: Vec<f64> = [0.2, 0.3, 0.5].repeat(5);
        let y_right: Vec<f64> = [0.6, 0.3, 0.1].repeat(5);
        let mut serial = vec![0.0; 5 * flux_len(3)];
        let mut parallel = vec![0.0; 5 * flux_len(3)];
        species_fluxes(&flux, 3, &input, &y_left, &y_right, &mut serial).unwrap();
        species_fluxes_par(&flux, 3, &input, &y_left, &y_right, &mut parallel).unwrap();
        assert_eq!(serial, parallel);

        let mut row = [0.0; 7];
        let left = SpeciesState {
            prim: input[4].left,
            gas,
            y: &y_left[12..15],
        };
        let right = SpeciesState {
            prim: input[4].right,
            gas,
            y: &y_right[12..15],
        };
        flux.multi_species(&left, &right, &input[4].face, &mut row);
        assert_eq!(&serial[28..35], &row);
    }

    #[test]
    fn trait_object_dispatch() {
        let scheme: &dyn InviscidFlux = &AusmPlusUp::default();
        let gas = GasProperties::new(287.0, 1005.0);
        let s = PrimitiveState::new(Vector3::zeros(), 0.0, 300.0);
        let input = [SpeciesFaceInput {
            left: s,
            right: s,
            left_gas: gas,
            right_gas: gas,
            face: FaceGeometry::new(1.0, Vector3::y()),
        }];
        let mut out = [1.0; 5];
        species_fluxes_par(scheme, 1, &input, &[1.0], &[1.0], &mut out).unwrap();
        assert!(out.iter().all(|v| v.abs() < 1e-9), "{out:?}");
    }

    #[test]
    fn par_sweep_checks_against_the_scheme_ambient() {
        // Positive absolute pressure at 1 atm, negative at the scheme's 0.5 bar.
        let scheme: &dyn InviscidFlux = &AusmPlusUp::new(50_000.0, 0.1);
        let gas = GasProperties::new(287.0, 1005.0);
        let s = PrimitiveState::new(Vector3::zeros(), -60_000.0, 300.0);
        let input = [SpeciesFaceInput {
            left: s,
            right: s,
            left_gas: gas,
            right_gas: gas,
            face: FaceGeometry::new(1.0, Vector3::x()),
        }];
        let mut out = [0.0; 5];
        let err = species_fluxes_par(scheme, 1, &input, &[1.0], &[1.0], &mut out).unwrap_err();
        match err {
            FluxError::InvalidInput { issues } => {
                assert!(issues.iter().any(|i| i.what.contains("absolute pressure")));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }
}
