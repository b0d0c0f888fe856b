//! TOML configuration deserialisation for dispersion jobs.

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

use chirp_core::{PulseParams, DEFAULT_PHASE_THRESHOLD};

/// Top-level job configuration.
#[derive(Debug, Deserialize)]
pub struct JobConfig {
    #[serde(default)]
    pub pulse: PulseParams,
    /// Material slabs in propagation order.
    #[serde(default)]
    pub stack: Vec<LayerConfig>,
    #[serde(default)]
    pub materials: MaterialsConfig,
    #[serde(default)]
    pub analysis: AnalysisConfig,
}

/// One slab of the material stack.
#[derive(Debug, Deserialize)]
pub struct LayerConfig {
    /// Catalog key (e.g. "fs", "bbo_o", or a name loaded from records).
    pub material: String,
    /// Thickness in metres.
    pub thickness: f64,
}

/// Extra materials on top of the built-ins.
#[derive(Debug, Default, Deserialize)]
pub struct MaterialsConfig {
    /// Directory of `*.toml` material records to load.
    pub directory: Option<PathBuf>,
    #[serde(default)]
    pub custom: Vec<CustomMaterial>,
}

/// Inline standard Sellmeier material (λ in µm, C in µm²).
#[derive(Debug, Deserialize)]
pub struct CustomMaterial {
    pub name: String,
    pub b: Vec<f64>,
    pub c: Vec<f64>,
}

/// Analysis settings.
#[derive(Debug, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default = "default_phase_threshold")]
    pub phase_threshold: f64,
    /// Polynomial order of the spectral phase expansion.
    #[serde(default = "default_expansion_order")]
    pub expansion_order: usize,
    /// Angular frequency is divided by this before fitting (1e12 → rad/ps).
    #[serde(default = "default_frequency_scale")]
    pub frequency_scale: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            phase_threshold: default_phase_threshold(),
            expansion_order: default_expansion_order(),
            frequency_scale: default_frequency_scale(),
        }
    }
}

fn default_phase_threshold() -> f64 {
    DEFAULT_PHASE_THRESHOLD
}
fn default_expansion_order() -> usize {
    4
}
fn default_frequency_scale() -> f64 {
    1e12
}

/// Parse a job configuration from TOML text.
pub fn parse_config(content: &str) -> anyhow::Result<JobConfig> {
    Ok(toml::from_str(content)?)
}

/// Load and parse a TOML job configuration file.
pub fn load_config(path: &Path) -> anyhow::Result<JobConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading job file {}", path.display()))?;
    parse_config(&content).with_context(|| format!("parsing job file {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chirp_core::DurationDomain;

    #[test]
    fn test_full_job() {
        let job = parse_config(
            r#"
            [pulse]
            fwhm = 10e-9
            central_wavelength = 1030e-9
            time_span = 4e-12
            samples = 4096
            domain = "spectral"

            [[stack]]
            material = "fs"
            thickness = 5e-3

            [[stack]]
            material = "bk7"
            thickness = 2e-3

            [materials]
            directory = "materials"

            [[materials.custom]]
            name = "glass"
            b = [1.2]
            c = [0.01]

            [analysis]
            expansion_order = 3
            "#,
        )
        .unwrap();

        assert_eq!(job.pulse.domain, DurationDomain::Spectral);
        assert_eq!(job.pulse.samples, 4096);
        assert_eq!(job.stack.len(), 2);
        assert_eq!(job.stack[1].material, "bk7");
        assert_eq!(job.materials.directory, Some(PathBuf::from("materials")));
        assert_eq!(job.materials.custom[0].b, vec![1.2]);
        assert_eq!(job.analysis.expansion_order, 3);
        assert_eq!(job.analysis.frequency_scale, 1e12);
    }

    #[test]
    fn test_empty_job_uses_defaults() {
        let job = parse_config("").unwrap();
        assert_eq!(job.pulse, PulseParams::default());
        assert!(job.stack.is_empty());
        assert_eq!(job.analysis.phase_threshold, 0.01);
    }

    #[test]
    fn test_layer_requires_thickness() {
        assert!(parse_config("[[stack]]\nmaterial = \"fs\"").is_err());
    }
}
