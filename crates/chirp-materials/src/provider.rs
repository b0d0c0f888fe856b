//! Refractive-index provider trait.
//!
//! Every material known to the catalog implements [`RefractiveIndex`], which
//! maps an absolute angular frequency to a real refractive index. Frequencies
//! outside the characterised band evaluate to `None` rather than an
//! extrapolated value.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from material models, catalogs and record sources.
#[derive(Debug, Error)]
pub enum MaterialError {
    #[error("Material not found: {0}")]
    NotFound(String),

    #[error("Data error: {0}")]
    DataError(String),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse material record {path}: {message}")]
    Parse { path: PathBuf, message: String },
}

/// Provides the refractive index of a transparent material.
pub trait RefractiveIndex: Send + Sync {
    /// Catalog key of this material.
    fn name(&self) -> &str;

    /// Angular-frequency range (rad/s) over which the index is defined.
    fn angular_frequency_range(&self) -> (f64, f64);

    /// Refractive index $n(\omega)$ at absolute angular frequency `omega`.
    ///
    /// Returns `None` outside [`angular_frequency_range`](Self::angular_frequency_range)
    /// or where the underlying model is not real-valued.
    fn index_at(&self, omega: f64) -> Option<f64>;

    /// Refractive index at a vacuum wavelength in metres.
    fn index_at_wavelength(&self, wavelength_m: f64) -> Option<f64> {
        if wavelength_m <= 0.0 {
            return None;
        }
        self.index_at(crate::angular_frequency(wavelength_m))
    }
}
