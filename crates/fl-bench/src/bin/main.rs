use clap::{Parser, Subcommand};
use fl_bench::{BenchmarkSuite, default_benchmarks, mixture_report, run_scenario};
use fl_core::units::{k, pa};
use fl_mixture::{FlowSpec, Mixture, SpeciesSpec, ThermoSpec, VelSpec, load_json, load_yaml};
use nalgebra::Vector3;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

#[derive(Parser)]
#[command(name = "fl-bench")]
#[command(
    about = "Mixture checks, property tables and AUSM+-up flux benchmarks",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load and validate a mixture document
    Check {
        /// Path to the mixture YAML or JSON file
        mixture_path: PathBuf,
    },
    /// Print mixture properties at one state
    Props {
        /// Path to the mixture YAML or JSON file
        mixture_path: PathBuf,
        /// Temperature [K]
        #[arg(short, long, default_value_t = 300.0)]
        temperature: f64,
        /// Absolute pressure [Pa]
        #[arg(short, long, default_value_t = 101_325.0)]
        pressure: f64,
        /// Comma-separated fractions (N, or N-1 with the last species implied)
        #[arg(short, long, value_delimiter = ',')]
        fractions: Vec<f64>,
        /// Read the fractions as mole fractions
        #[arg(long)]
        molar: bool,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Time serial and parallel flux sweeps
    Flux {
        /// Runs per scenario
        #[arg(long, default_value_t = 5)]
        runs: usize,
        /// Faces per sweep
        #[arg(long, default_value_t = 100_000)]
        faces: usize,
        /// Species in the multi-species scenarios
        #[arg(long, default_value_t = 5)]
        species: usize,
        /// Write the JSON suite here
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> CliResult<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Check { mixture_path } => cmd_check(&mixture_path),
        Commands::Props {
            mixture_path,
            temperature,
            pressure,
            fractions,
            molar,
            json,
        } => cmd_props(&mixture_path, temperature, pressure, fractions, molar, json),
        Commands::Flux {
            runs,
            faces,
            species,
            output,
        } => cmd_flux(runs, faces, species, output.as_deref()),
    }
}

fn load_mixture(path: &Path) -> CliResult<Mixture> {
    let mixture = match path.extension().and_then(|e| e.to_str()) {
        Some("json") => load_json(path)?,
        _ => load_yaml(path)?,
    };
    Ok(mixture)
}

fn cmd_check(mixture_path: &Path) -> CliResult<()> {
    println!("Validating mixture: {}", mixture_path.display());
    let mixture = load_mixture(mixture_path)?;
    println!("{mixture}");
    println!("✓ Mixture is valid ({} species)", mixture.len());
    Ok(())
}

fn cmd_props(
    mixture_path: &Path,
    temperature: f64,
    pressure: f64,
    fractions: Vec<f64>,
    molar: bool,
    json: bool,
) -> CliResult<()> {
    let mixture = load_mixture(mixture_path)?;
    let spec = if molar {
        SpeciesSpec::molar(fractions)
    } else {
        SpeciesSpec::mass(fractions)
    };
    let state = FlowSpec {
        thermo: ThermoSpec::PT {
            p: pa(pressure),
            t: k(temperature),
        },
        velocity: VelSpec::Velocity(Vector3::zeros()),
        species: spec,
    }
    .resolve(&mixture)?;
    let report = mixture_report(&mixture, &state)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{report}");
    }
    Ok(())
}

fn cmd_flux(runs: usize, faces: usize, species: usize, output: Option<&Path>) -> CliResult<()> {
    let benchmarks = default_benchmarks(faces, species);
    println!("Running {} benchmarks, {runs} runs each...\n", benchmarks.len());

    let mut results = Vec::new();
    for (idx, scenario) in benchmarks.iter().enumerate() {
        print!("[{}/{}] {} ... ", idx + 1, benchmarks.len(), scenario.name);
        std::io::stdout().flush()?;

        match run_scenario(scenario, runs) {
            Ok(result) => {
                let agg = &result.aggregate;
                println!(
                    "OK ({:.4}s median, {:.3e} faces/s)",
                    agg.total_time_median_s, agg.faces_per_second_median
                );
                results.push(result);
            }
            Err(e) => {
                println!("FAILED");
                eprintln!("  Error: {e}");
            }
        }
    }

    if let Some(path) = output {
        let timestamp = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)?
            .as_secs();
        let json = serde_json::to_string_pretty(&BenchmarkSuite {
            timestamp: format!("timestamp_{timestamp}"),
            results,
        })?;
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(path, json)?;
        println!("\nResults saved to: {}", path.display());
    }
    Ok(())
}
