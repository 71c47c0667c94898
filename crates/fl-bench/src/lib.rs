//! Face flux benchmarks and mixture property reports for the `fl-bench` tool.

pub mod props;

pub use props::{MixtureReport, mixture_report};

use fl_flux::{
    AusmPlusUp, FaceGeometry, FaceInput, FluxError, GasProperties, PrimitiveState,
    SpeciesFaceInput, flux_len, ideal_gas_fluxes, ideal_gas_fluxes_par, species_fluxes,
    species_fluxes_par,
};
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::debug;

#[derive(Debug, thiserror::Error)]
pub enum BenchError {
    #[error(transparent)]
    Flux(#[from] FluxError),

    #[error("scenario '{id}' needs at least one run")]
    NoRuns { id: String },
}

/// Which kernel a scenario drives.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub enum BenchmarkKernel {
    IdealGas,
    MultiSpecies { n_species: usize },
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub enum BenchmarkMode {
    Serial,
    Parallel,
}

/// A benchmark scenario definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkScenario {
    pub id: String,
    pub name: String,
    pub kernel: BenchmarkKernel,
    pub mode: BenchmarkMode,
    /// Faces per sweep.
    pub faces: usize,
    pub notes: Option<String>,
}

/// A single sweep's timing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunMetrics {
    pub total_time_s: f64,
    pub faces_per_second: f64,
    /// Sum of the mass-flux slots; identical across modes for the same inputs.
    pub mass_flux_sum: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregateMetrics {
    pub run_count: usize,
    pub total_time_median_s: f64,
    pub total_time_min_s: f64,
    pub total_time_max_s: f64,
    pub faces_per_second_median: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkResult {
    pub scenario: BenchmarkScenario,
    pub runs: Vec<RunMetrics>,
    pub aggregate: AggregateMetrics,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkSuite {
    pub timestamp: String,
    pub results: Vec<BenchmarkResult>,
}

/// Deterministic subsonic/supersonic mix of face states around 1 atm.
pub fn synthetic_faces(n: usize) -> Vec<FaceInput> {
    (0..n)
        .map(|i| {
            let s = i as f64;
            let theta = 0.37 * s;
            let normal = Vector3::new(theta.cos(), theta.sin(), 0.0);
            FaceInput {
                left: PrimitiveState::new(
                    Vector3::new(150.0 * (0.11 * s).sin(), 40.0, 0.0),
                    2_000.0 * (0.07 * s).cos(),
                    300.0 + 50.0 * (0.05 * s).sin(),
                ),
                right: PrimitiveState::new(
                    Vector3::new(120.0 * (0.13 * s).cos(), -30.0, 5.0),
                    -1_500.0 * (0.03 * s).sin(),
                    320.0 + 40.0 * (0.09 * s).cos(),
                ),
                face: FaceGeometry::new(1e-3 * (1.0 + 0.5 * (0.02 * s).sin()), normal),
            }
        })
        .collect()
}

/// Mass fractions for `n` faces of `n_species`, left and right rows.
pub fn synthetic_mass_fractions(n: usize, n_species: usize) -> (Vec<f64>, Vec<f64>) {
    let row = |phase: f64| -> Vec<f64> {
        let raw: Vec<f64> = (0..n_species)
            .map(|k| 1.0 + 0.5 * (phase + k as f64).sin())
            .collect();
        let total: f64 = raw.iter().sum();
        raw.into_iter().map(|v| v / total).collect()
    };
    let mut left = Vec::with_capacity(n * n_species);
    let mut right = Vec::with_capacity(n * n_species);
    for i in 0..n {
        left.extend(row(0.3 * i as f64));
        right.extend(row(0.3 * i as f64 + 1.7));
    }
    (left, right)
}

fn median(sorted: &[f64]) -> f64 {
    sorted.get(sorted.len() / 2).copied().unwrap_or(0.0)
}

fn aggregate(runs: &[RunMetrics]) -> AggregateMetrics {
    let mut times: Vec<f64> = runs.iter().map(|r| r.total_time_s).collect();
    times.sort_by(|a, b| a.total_cmp(b));
    let mut rates: Vec<f64> = runs.iter().map(|r| r.faces_per_second).collect();
    rates.sort_by(|a, b| a.total_cmp(b));

    AggregateMetrics {
        run_count: runs.len(),
        total_time_median_s: median(&times),
        total_time_min_s: times.first().copied().unwrap_or(0.0),
        total_time_max_s: times.last().copied().unwrap_or(0.0),
        faces_per_second_median: median(&rates),
    }
}

fn sweep_once(
    scenario: &BenchmarkScenario,
    flux: &AusmPlusUp,
    faces: &[FaceInput],
) -> Result<f64, BenchError> {
    let gas = GasProperties::from_gamma(1.4, 287.0);
    let parallel = scenario.mode == BenchmarkMode::Parallel;
    match scenario.kernel {
        BenchmarkKernel::IdealGas => {
            let mut out = vec![[0.0; 5]; faces.len()];
            if parallel {
                ideal_gas_fluxes_par(flux, &gas, faces, &mut out)?;
            } else {
                ideal_gas_fluxes(flux, &gas, faces, &mut out)?;
            }
            Ok(out.iter().map(|f| f[fl_flux::MASS]).sum())
        }
        BenchmarkKernel::MultiSpecies { n_species } => {
            let inputs: Vec<SpeciesFaceInput> = faces
                .iter()
                .map(|f| SpeciesFaceInput {
                    left: f.left,
                    right: f.right,
                    left_gas: gas,
                    right_gas: gas,
                    face: f.face,
                })
                .collect();
            let (y_left, y_right) = synthetic_mass_fractions(faces.len(), n_species);
            let width = flux_len(n_species);
            let mut out = vec![0.0; faces.len() * width];
            if parallel {
                species_fluxes_par(flux, n_species, &inputs, &y_left, &y_right, &mut out)?;
            } else {
                species_fluxes(flux, n_species, &inputs, &y_left, &y_right, &mut out)?;
            }
            Ok(out.chunks_exact(width).map(|row| row[fl_flux::MASS]).sum())
        }
    }
}

/// Run a single benchmark scenario `times` times.
pub fn run_scenario(
    scenario: &BenchmarkScenario,
    times: usize,
) -> Result<BenchmarkResult, BenchError> {
    if times == 0 {
        return Err(BenchError::NoRuns {
            id: scenario.id.clone(),
        });
    }
    let flux = AusmPlusUp::default();
    let faces = synthetic_faces(scenario.faces);

    let mut runs = Vec::with_capacity(times);
    for run in 0..times {
        let start = Instant::now();
        let mass_flux_sum = sweep_once(scenario, &flux, &faces)?;
        let total_time_s = start.elapsed().as_secs_f64();
        debug!(id = %scenario.id, run, total_time_s, "sweep finished");
        runs.push(RunMetrics {
            total_time_s,
            faces_per_second: scenario.faces as f64 / total_time_s.max(f64::MIN_POSITIVE),
            mass_flux_sum,
        });
    }

    let aggregate = aggregate(&runs);
    Ok(BenchmarkResult {
        scenario: scenario.clone(),
        runs,
        aggregate,
    })
}

/// Serial and parallel pairs for each kernel.
pub fn default_benchmarks(faces: usize, n_species: usize) -> Vec<BenchmarkScenario> {
    let kernels = [
        (BenchmarkKernel::IdealGas, "ideal_gas", "Ideal gas".to_string()),
        (
            BenchmarkKernel::MultiSpecies { n_species },
            "species",
            format!("{n_species}-species mixture"),
        ),
    ];
    let mut out = Vec::new();
    for (kernel, id, name) in kernels {
        let modes = [(BenchmarkMode::Serial, "serial"), (BenchmarkMode::Parallel, "par")];
        for (mode, suffix) in modes {
            out.push(BenchmarkScenario {
                id: format!("{id}_{suffix}"),
                name: format!("{name} AUSM+-up ({suffix})"),
                kernel,
                mode,
                faces,
                notes: None,
            });
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aggregate_takes_median_min_max() {
        let runs: Vec<RunMetrics> = [0.3, 0.1, 0.2]
            .into_iter()
            .map(|t| RunMetrics {
                total_time_s: t,
                faces_per_second: 1.0 / t,
                mass_flux_sum: 0.0,
            })
            .collect();
        let agg = aggregate(&runs);
        assert_eq!(agg.run_count, 3);
        assert_eq!(agg.total_time_median_s, 0.2);
        assert_eq!(agg.total_time_min_s, 0.1);
        assert_eq!(agg.total_time_max_s, 0.3);
        assert_eq!(agg.faces_per_second_median, 5.0);
    }

    #[test]
    fn serial_and_parallel_sweeps_agree() {
        for pair in default_benchmarks(200, 4).chunks(2) {
            let serial = run_scenario(&pair[0], 1).unwrap();
            let parallel = run_scenario(&pair[1], 1).unwrap();
            assert_eq!(serial.runs[0].mass_flux_sum, parallel.runs[0].mass_flux_sum);
            assert!(serial.runs[0].mass_flux_sum.is_finite());
        }
    }

    #[test]
    fn synthetic_rows_sum_to_one() {
        let (left, right) = synthetic_mass_fractions(10, 3);
        for row in left.chunks(3).chain(right.chunks(3)) {
            assert!((row.iter().sum::<f64>() - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn zero_runs_is_an_error() {
        let scenario = &default_benchmarks(4, 2)[0];
        assert!(matches!(run_scenario(scenario, 0), Err(BenchError::NoRuns { .. })));
    }
}
