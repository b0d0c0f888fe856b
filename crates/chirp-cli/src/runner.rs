//! Job runner: builds a calculator, pushes the pulse through the material
//! stack and summarises the result.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use chirp_core::polyfit::{polyder, polyval};
use chirp_core::{Dispersion, DurationDomain, PropagationError};
use chirp_materials::{MaterialCatalog, TomlDirectory};

use crate::config::{AnalysisConfig, JobConfig};

/// Outcome of one slab of the stack.
#[derive(Debug, Serialize)]
pub struct LayerReport {
    pub material: String,
    pub thickness_mm: f64,
    /// False when the material was not in the catalog and the slab was skipped.
    pub applied: bool,
}

/// Pulse figures before and after the stack.
#[derive(Debug, Serialize)]
pub struct PulseReport {
    pub central_wavelength_nm: f64,
    pub layers: Vec<LayerReport>,
    pub input_duration_fs: Option<f64>,
    pub output_duration_fs: Option<f64>,
    pub input_bandwidth_thz: Option<f64>,
    pub output_bandwidth_thz: Option<f64>,
    /// Spectral phase polynomial in `omega / frequency_scale`, highest order first.
    pub phase_expansion: Option<Vec<f64>>,
    /// Positive for normal dispersion.
    pub gdd_fs2: Option<f64>,
    pub tod_fs3: Option<f64>,
}

/// Build a calculator with the built-in catalog plus everything the job adds.
pub fn build_calculator(job: &JobConfig) -> Result<Dispersion> {
    let mut catalog = MaterialCatalog::with_builtins()?;
    if let Some(dir) = &job.materials.directory {
        load_directory(&mut catalog, dir)?;
    }
    for custom in &job.materials.custom {
        catalog
            .add_material(&custom.name, &custom.b, &custom.c)
            .with_context(|| format!("custom material '{}'", custom.name))?;
    }

    let mut calc = Dispersion::with_catalog(catalog)
        .with_phase_threshold(job.analysis.phase_threshold);
    calc.generate_pulse(&job.pulse)?;
    Ok(calc)
}

/// Load `*.toml` material records from `dir` into `catalog`.
pub fn load_directory(catalog: &mut MaterialCatalog, dir: &Path) -> Result<usize> {
    let count = catalog
        .load_from(&TomlDirectory, dir)
        .with_context(|| format!("loading materials from {}", dir.display()))?;
    println!("Loaded {} material(s) from {}", count, dir.display());
    Ok(count)
}

/// Run a full job from a parsed configuration.
pub fn run_job(job: &JobConfig) -> Result<PulseReport> {
    let mut calc = build_calculator(job)?;
    let input_duration_fs = duration_fs(&calc);
    let input_bandwidth_thz = bandwidth_thz(&calc);

    let mut layers = Vec::with_capacity(job.stack.len());
    for layer in &job.stack {
        let applied = match calc.propagate_material(&layer.material, layer.thickness) {
            Ok(()) => true,
            Err(PropagationError::UnknownMaterial(name)) => {
                log::warn!("Skipping unknown material '{}'", name);
                false
            }
            Err(e) => return Err(e.into()),
        };
        layers.push(LayerReport {
            material: layer.material.clone(),
            thickness_mm: layer.thickness * 1e3,
            applied,
        });
    }

    let phase_expansion = expansion(&calc, &job.analysis);
    let central_omega = chirp_materials::angular_frequency(job.pulse.central_wavelength);
    let derivative = |order: usize| {
        phase_expansion.as_deref().and_then(|coeffs| {
            phase_derivative(coeffs, order, central_omega, job.analysis.frequency_scale)
        })
    };

    Ok(PulseReport {
        central_wavelength_nm: job.pulse.central_wavelength * 1e9,
        layers,
        input_duration_fs,
        output_duration_fs: duration_fs(&calc),
        input_bandwidth_thz,
        output_bandwidth_thz: bandwidth_thz(&calc),
        gdd_fs2: derivative(2).map(|d| -d * 1e30),
        tod_fs3: derivative(3).map(|d| -d * 1e45),
        phase_expansion,
    })
}

fn duration_fs(calc: &Dispersion) -> Option<f64> {
    match calc.pulse_duration(DurationDomain::Temporal) {
        Ok(t) => Some(t * 1e15),
        Err(e) => {
            log::warn!("Temporal FWHM unavailable: {}", e);
            None
        }
    }
}

fn bandwidth_thz(calc: &Dispersion) -> Option<f64> {
    match calc.pulse_duration(DurationDomain::Spectral) {
        Ok(w) => Some(w / (2.0 * std::f64::consts::PI) * 1e-12),
        Err(e) => {
            log::warn!("Spectral FWHM unavailable: {}", e);
            None
        }
    }
}

fn expansion(calc: &Dispersion, analysis: &AnalysisConfig) -> Option<Vec<f64>> {
    match calc.spectral_phase_expansion(analysis.expansion_order, analysis.frequency_scale) {
        Ok(coeffs) => Some(coeffs),
        Err(e) => {
            log::warn!("Spectral phase expansion failed: {}", e);
            None
        }
    }
}

/// `order`-th derivative (SI units) of the fitted spectral phase at
/// `omega`. None when the fit has too low an order.
fn phase_derivative(coeffs: &[f64], order: usize, omega: f64, frequency_scale: f64) -> Option<f64> {
    if coeffs.len() <= order {
        return None;
    }
    let derived = (0..order).fold(coeffs.to_vec(), |c, _| polyder(&c));
    Some(polyval(&derived, omega / frequency_scale) / frequency_scale.powi(order as i32))
}

fn format_opt(value: Option<f64>, precision: usize) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{:.*}", precision, v))
}

/// Print a human-readable summary of `report`.
pub fn print_report(report: &PulseReport) {
    println!("Central wavelength: {:.1} nm", report.central_wavelength_nm);
    if report.layers.is_empty() {
        println!("Stack: (empty)");
    } else {
        println!("Stack:");
        for layer in &report.layers {
            let status = if layer.applied { "" } else { "  [skipped: unknown material]" };
            println!("  {:<12} {:>10.3} mm{}", layer.material, layer.thickness_mm, status);
        }
    }
    println!();
    println!("                  input        output");
    println!(
        "  FWHM (fs)   {:>10} {:>12}",
        format_opt(report.input_duration_fs, 2),
        format_opt(report.output_duration_fs, 2)
    );
    println!(
        "  Δν (THz)    {:>10} {:>12}",
        format_opt(report.input_bandwidth_thz, 3),
        format_opt(report.output_bandwidth_thz, 3)
    );
    println!();
    println!("  GDD: {} fs²", format_opt(report.gdd_fs2, 1));
    println!("  TOD: {} fs³", format_opt(report.tod_fs3, 1));
    if let Some(coeffs) = &report.phase_expansion {
        let terms: Vec<String> = coeffs.iter().map(|c| format!("{:.6e}", c)).collect();
        println!("  Phase polynomial: [{}]", terms.join(", "));
    }
}
