//! Pulse parameters shared by the generator, the engine and job files.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Which trace a width refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DurationDomain {
    /// Intensity FWHM in time (s).
    #[default]
    Temporal,
    /// Spectral FWHM, in wavelength (m) when generating and in angular
    /// frequency (rad/s) when measuring.
    Spectral,
}

impl fmt::Display for DurationDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Temporal => write!(f, "temporal"),
            Self::Spectral => write!(f, "spectral"),
        }
    }
}

impl FromStr for DurationDomain {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "temporal" => Ok(Self::Temporal),
            "spectral" => Ok(Self::Spectral),
            other => Err(format!("unknown duration domain '{}' (expected temporal or spectral)", other)),
        }
    }
}

/// Parameters of a generated Gaussian pulse. All values in SI units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PulseParams {
    /// Full width at half maximum, interpreted according to `domain`.
    #[serde(default = "default_fwhm")]
    pub fwhm: f64,
    /// Central vacuum wavelength (m).
    #[serde(default = "default_central_wavelength")]
    pub central_wavelength: f64,
    /// Length of the time window (s). Must cover the dispersed pulse.
    #[serde(default = "default_time_span")]
    pub time_span: f64,
    /// Number of samples in the field vectors.
    #[serde(default = "default_samples")]
    pub samples: usize,
    #[serde(default)]
    pub domain: DurationDomain,
}

fn default_fwhm() -> f64 {
    50e-15
}
fn default_central_wavelength() -> f64 {
    800e-9
}
fn default_time_span() -> f64 {
    2e-12
}
fn default_samples() -> usize {
    8192
}

impl Default for PulseParams {
    fn default() -> Self {
        Self {
            fwhm: default_fwhm(),
            central_wavelength: default_central_wavelength(),
            time_span: default_time_span(),
            samples: default_samples(),
            domain: DurationDomain::default(),
        }
    }
}

impl PulseParams {
    pub fn temporal(fwhm: f64, central_wavelength: f64, time_span: f64) -> Self {
        Self {
            fwhm,
            central_wavelength,
            time_span,
            ..Default::default()
        }
    }

    /// Transform-limited pulse specified by its spectral FWHM in wavelength.
    pub fn spectral(bandwidth: f64, central_wavelength: f64, time_span: f64) -> Self {
        Self {
            fwhm: bandwidth,
            central_wavelength,
            time_span,
            domain: DurationDomain::Spectral,
            ..Default::default()
        }
    }

    pub fn with_samples(mut self, samples: usize) -> Self {
        self.samples = samples;
        self
    }

    pub fn with_domain(mut self, domain: DurationDomain) -> Self {
        self.domain = domain;
        self
    }
}
