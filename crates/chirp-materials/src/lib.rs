//! # Chirp Materials
//!
//! Refractive-index models for the Chirp dispersion calculator. All models
//! implement [`RefractiveIndex`](provider::RefractiveIndex), which evaluates
//! $n(\omega)$ at an absolute angular frequency and reports `None` outside the
//! characterised band.
//!
//! ## Data sources
//!
//! | Source | Module |
//! |--------|--------|
//! | Built-in Sellmeier fits (air, fused silica, MgF₂, sapphire, BBO) | [`builtin`] |
//! | User coefficients / closed-form formulas | [`sellmeier`] |
//! | TOML material records | [`record`] |
//!
//! Models are tabulated over 200–2000 nm and interpolated with a local
//! quadratic ([`interp::QuadraticInterpolant`]).

pub mod builtin;
pub mod catalog;
pub mod interp;
pub mod provider;
pub mod record;
pub mod sellmeier;

pub use catalog::MaterialCatalog;
pub use provider::{MaterialError, RefractiveIndex};
pub use record::{MaterialRecord, MaterialSource, SellmeierGroup, TomlDirectory};
pub use sellmeier::{DispersionFormula, SampledIndex, SellmeierTerm};

/// Speed of light in vacuum (m/s).
pub const SPEED_OF_LIGHT: f64 = 299_792_458.0;

/// Shortest tabulated wavelength (m).
pub const GRID_MIN_WAVELENGTH: f64 = 200e-9;
/// Longest tabulated wavelength (m).
pub const GRID_MAX_WAVELENGTH: f64 = 2000e-9;

/// Wavelength grid density for built-in materials.
pub const BUILTIN_GRID_POINTS: usize = 1000;
/// Wavelength grid density for user-added and loaded materials.
pub const RECORD_GRID_POINTS: usize = 5000;

/// Angular frequency $2\pi c/\lambda$ for a vacuum wavelength in metres.
pub fn angular_frequency(wavelength_m: f64) -> f64 {
    2.0 * std::f64::consts::PI * SPEED_OF_LIGHT / wavelength_m
}
