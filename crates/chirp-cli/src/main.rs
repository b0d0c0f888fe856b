//! chirp command-line interface.
//!
//! Run dispersion jobs from TOML configuration files:
//! ```sh
//! chirp run job.toml
//! chirp validate job.toml
//! chirp materials --dir materials
//! chirp demo
//! ```

mod config;
mod runner;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use chirp_core::{Dispersion, DurationDomain};
use chirp_materials::{MaterialCatalog, RefractiveIndex};

#[derive(Parser)]
#[command(name = "chirp")]
#[command(about = "Ultrashort pulse dispersion calculator")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Propagate a pulse through the stack described by a TOML job file.
    Run {
        /// Path to the job configuration file.
        config: PathBuf,
        /// Print the report as JSON instead of a table.
        #[arg(long)]
        json: bool,
    },
    /// Validate a configuration file without running the job.
    Validate {
        /// Path to the job configuration file.
        config: PathBuf,
    },
    /// List the available materials and their index at 800 nm.
    Materials {
        /// Directory of extra `*.toml` material records.
        #[arg(short, long)]
        dir: Option<PathBuf>,
    },
    /// Send the default 50 fs pulse through a slab of material.
    Demo {
        /// Directory of extra `*.toml` material records.
        #[arg(short, long, default_value = "materials")]
        dir: PathBuf,
        #[arg(short, long, default_value = "bk7")]
        material: String,
        /// Slab thickness in millimetres.
        #[arg(short, long, default_value_t = 10.0)]
        thickness: f64,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run { config, json } => {
            let job = config::load_config(&config)?;
            let report = runner::run_job(&job)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("chirp dispersion calculator");
                println!("===========================");
                println!("Configuration: {}", config.display());
                runner::print_report(&report);
            }
            Ok(())
        }
        Commands::Validate { config } => {
            let job = config::load_config(&config)?;
            let calc = runner::build_calculator(&job)?;
            let missing: Vec<&str> = job
                .stack
                .iter()
                .map(|layer| layer.material.as_str())
                .filter(|name| !calc.catalog().contains(name))
                .collect();
            if !missing.is_empty() {
                anyhow::bail!("Unknown material(s) in stack: {}", missing.join(", "));
            }
            println!("Configuration is valid: {}", config.display());
            Ok(())
        }
        Commands::Materials { dir } => {
            let mut catalog = MaterialCatalog::with_builtins()?;
            if let Some(dir) = &dir {
                runner::load_directory(&mut catalog, dir)?;
            }
            println!("Available materials (n at 800 nm):");
            for name in catalog.names() {
                let index = catalog
                    .get(name)
                    .and_then(|model| model.index_at_wavelength(800e-9));
                match index {
                    Some(n) => println!("  {:<12} {:.6}", name, n),
                    None => println!("  {:<12} n/a", name),
                }
            }
            Ok(())
        }
        Commands::Demo { dir, material, thickness } => {
            let mut calc = Dispersion::new()?;
            runner::load_directory(calc.catalog_mut(), &dir)?;
            let before = calc.pulse_duration(DurationDomain::Temporal)?;
            calc.propagate_material(&material, thickness * 1e-3)?;
            let after = calc.pulse_duration(DurationDomain::Temporal)?;
            println!(
                "{:.1} fs pulse after {} mm of {}: {:.1} fs",
                before * 1e15,
                thickness,
                material,
                after * 1e15
            );
            Ok(())
        }
    }
}
