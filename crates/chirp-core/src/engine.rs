//! The dispersion calculator facade.
//!
//! [`Dispersion`] owns the material catalog, the current pulse state and the
//! analysis settings. Typical use:
//!
//! ```no_run
//! use chirp_core::{Dispersion, DurationDomain, PulseParams};
//!
//! let mut calc = Dispersion::new()?;
//! calc.generate_pulse(&PulseParams::temporal(30e-15, 800e-9, 2e-12))?;
//! calc.propagate_material("fs", 5e-3)?;
//! calc.propagate_material("air", 1.0)?;
//! let duration = calc.pulse_duration(DurationDomain::Temporal)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use thiserror::Error;

use chirp_materials::{MaterialCatalog, MaterialError};

use crate::analysis::{AnalysisError, PulseAnalyzer};
use crate::diagnostics::Diagnostics;
use crate::propagation::{self, PropagationError};
use crate::pulse::{self, PulseError, PulseState};
use crate::types::{DurationDomain, PulseParams};
use crate::DEFAULT_PHASE_THRESHOLD;

/// Errors from building an engine.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Material(#[from] MaterialError),

    #[error(transparent)]
    Pulse(#[from] PulseError),
}

/// Pulse generation, propagation and analysis over one material catalog.
///
/// Not meant for concurrent mutation; use one instance per scenario.
#[derive(Debug, Clone)]
pub struct Dispersion {
    catalog: MaterialCatalog,
    state: Option<PulseState>,
    phase_threshold: f64,
    diagnostics: Diagnostics,
}

impl Dispersion {
    /// Built-in catalog with the default 50 fs / 800 nm pulse already
    /// generated.
    pub fn new() -> Result<Self, EngineError> {
        let mut calc = Self::with_catalog(MaterialCatalog::with_builtins()?);
        calc.generate_pulse(&PulseParams::default())?;
        Ok(calc)
    }

    /// An engine over `catalog` with no pulse generated yet.
    pub fn with_catalog(catalog: MaterialCatalog) -> Self {
        Self {
            catalog,
            state: None,
            phase_threshold: DEFAULT_PHASE_THRESHOLD,
            diagnostics: Diagnostics::default(),
        }
    }

    pub fn with_diagnostics(mut self, diagnostics: Diagnostics) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    pub fn with_phase_threshold(mut self, threshold: f64) -> Self {
        self.phase_threshold = threshold;
        self
    }

    pub fn set_phase_threshold(&mut self, threshold: f64) {
        self.phase_threshold = threshold;
    }

    pub fn phase_threshold(&self) -> f64 {
        self.phase_threshold
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn catalog(&self) -> &MaterialCatalog {
        &self.catalog
    }

    /// Mutable catalog access for adding or overriding materials. Changes
    /// only affect later propagation calls.
    pub fn catalog_mut(&mut self) -> &mut MaterialCatalog {
        &mut self.catalog
    }

    /// Current pulse, if one has been generated.
    pub fn state(&self) -> Option<&PulseState> {
        self.state.as_ref()
    }

    /// Generate a new Gaussian pulse, discarding all previous propagation.
    pub fn generate_pulse(&mut self, params: &PulseParams) -> Result<(), PulseError> {
        self.diagnostics.debug(format_args!(
            "Generating {} pulse: fwhm={:e}, l_0={:e}, t_span={:e}, n={}",
            params.domain, params.fwhm, params.central_wavelength, params.time_span, params.samples
        ));
        self.state = Some(pulse::generate(params)?);
        Ok(())
    }

    /// Propagate the current pulse through `thickness` metres of the named
    /// material.
    ///
    /// An unknown name leaves the field untouched and reports
    /// [`PropagationError::UnknownMaterial`]; callers that treat the material
    /// stack as best-effort can ignore it.
    pub fn propagate_material(&mut self, name: &str, thickness: f64) -> Result<(), PropagationError> {
        self.diagnostics
            .debug(format_args!("Propagating {} m of '{}'", thickness, name));
        let state = self.state.as_mut().ok_or(PropagationError::NoPulse)?;
        let Some(model) = self.catalog.get(name) else {
            self.diagnostics
                .warn(format_args!("Material '{}' not in catalog, skipping", name));
            return Err(PropagationError::UnknownMaterial(name.to_string()));
        };
        propagation::propagate(state, model.as_ref(), thickness)
    }

    /// Undo all propagation, restoring the generated pulse.
    pub fn reset_propagation(&mut self) {
        self.diagnostics.debug(format_args!("Resetting propagation"));
        if let Some(state) = self.state.as_mut() {
            state.reset();
        }
    }

    /// Analyzer over the current pulse.
    pub fn analyzer(&self) -> Result<PulseAnalyzer<'_>, AnalysisError> {
        let state = self.state.as_ref().ok_or(AnalysisError::NoPulse)?;
        Ok(PulseAnalyzer::new(state).with_phase_threshold(self.phase_threshold))
    }

    pub fn temporal_intensity(&self, normalize: bool) -> Result<Vec<f64>, AnalysisError> {
        self.diagnostics.debug(format_args!("Entering temporal_intensity"));
        Ok(self.analyzer()?.temporal_intensity(normalize))
    }

    pub fn spectral_intensity(&self, normalize: bool) -> Result<Vec<f64>, AnalysisError> {
        self.diagnostics.debug(format_args!("Entering spectral_intensity"));
        Ok(self.analyzer()?.spectral_intensity(normalize))
    }

    pub fn temporal_phase(&self, linear_compensate: bool) -> Result<Vec<Option<f64>>, AnalysisError> {
        self.diagnostics.debug(format_args!("Entering temporal_phase"));
        self.analyzer()?.temporal_phase(linear_compensate)
    }

    pub fn spectral_phase(&self, linear_compensate: bool) -> Result<Vec<Option<f64>>, AnalysisError> {
        self.diagnostics.debug(format_args!("Entering spectral_phase"));
        self.analyzer()?.spectral_phase(linear_compensate)
    }

    pub fn spectral_phase_expansion(
        &self,
        order: usize,
        frequency_scale: f64,
    ) -> Result<Vec<f64>, AnalysisError> {
        self.diagnostics.debug(format_args!(
            "Entering spectral_phase_expansion: order={}, scale={:e}",
            order, frequency_scale
        ));
        self.analyzer()?.spectral_phase_expansion(order, frequency_scale)
    }

    pub fn pulse_duration(&self, domain: DurationDomain) -> Result<f64, AnalysisError> {
        self.diagnostics.debug(format_args!("Entering pulse_duration"));
        let duration = self.analyzer()?.pulse_duration(domain);
        self.diagnostics
            .debug(format_args!("{} fwhm: {:?}", domain, duration));
        duration
    }

    /// Time axis (s) of the current pulse.
    pub fn time_axis(&self) -> Option<Vec<f64>> {
        self.state.as_ref().map(|s| s.time().to_vec())
    }

    /// Absolute angular-frequency axis (rad/s) of the current pulse.
    pub fn frequency_axis(&self) -> Option<Vec<f64>> {
        self.state.as_ref().map(|s| s.absolute_omega().to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_generates_default_pulse() {
        let calc = Dispersion::new().unwrap();
        let state = calc.state().unwrap();
        assert_eq!(state.len(), 8192);
        assert_eq!(calc.phase_threshold(), 0.01);
        assert_eq!(calc.catalog().len(), 7);
    }

    #[test]
    fn test_no_pulse_yields_no_result() {
        let mut calc = Dispersion::with_catalog(MaterialCatalog::with_builtins().unwrap())
            .with_diagnostics(Diagnostics::silent());
        assert_eq!(calc.temporal_intensity(true), Err(AnalysisError::NoPulse));
        assert_eq!(calc.spectral_intensity(true), Err(AnalysisError::NoPulse));
        assert_eq!(calc.temporal_phase(false), Err(AnalysisError::NoPulse));
        assert_eq!(calc.spectral_phase(true), Err(AnalysisError::NoPulse));
        assert_eq!(calc.spectral_phase_expansion(4, 1e12), Err(AnalysisError::NoPulse));
        assert_eq!(calc.pulse_duration(DurationDomain::Temporal), Err(AnalysisError::NoPulse));
        assert_eq!(calc.propagate_material("fs", 1e-3), Err(PropagationError::NoPulse));
        assert!(calc.time_axis().is_none());
        calc.reset_propagation();
        assert!(calc.state().is_none());
    }

    #[test]
    fn test_generate_replaces_state() {
        let mut calc = Dispersion::new().unwrap();
        calc.propagate_material("fs", 1e-3).unwrap();
        calc.generate_pulse(&PulseParams::default().with_samples(1024)).unwrap();
        let state = calc.state().unwrap();
        assert_eq!(state.len(), 1024);
        assert_eq!(state.output_time(), state.reference_time());
    }
}
