//! Pulse characterisation: intensity traces, phase traces, duration and
//! spectral-phase expansion.
//!
//! The analyzer borrows a [`PulseState`] read-only and derives fresh vectors
//! on every call. Phase traces are `Option<f64>` per sample; `None` marks
//! samples whose amplitude is below the phase threshold, where the phase
//! carries no information.

use num_complex::Complex64;
use thiserror::Error;

use crate::phase::{angles, argmax_norm, center_peak, mask_below, unwrap_jumps};
use crate::polyfit::{polyfit, polyval};
use crate::pulse::PulseState;
use crate::types::DurationDomain;
use crate::{fft, DEFAULT_PHASE_THRESHOLD};

/// Errors from pulse analysis.
#[derive(Debug, Error, PartialEq)]
pub enum AnalysisError {
    #[error("No pulse has been generated")]
    NoPulse,

    #[error("Fit needs {needed} defined samples, only {available} available")]
    InsufficientSamples { needed: usize, available: usize },

    #[error("Polynomial fit failed: {0}")]
    FitFailed(String),

    #[error("Half maximum is not crossed twice within the sampled window")]
    HalfMaximumNotBracketed,
}

/// Read-only view over a pulse for measurement.
#[derive(Debug, Clone, Copy)]
pub struct PulseAnalyzer<'a> {
    state: &'a PulseState,
    phase_threshold: f64,
}

fn intensity(field: &[Complex64], normalize: bool) -> Vec<f64> {
    let centred = center_peak(field, field.len() / 2);
    let mut trace: Vec<f64> = centred.iter().map(|e| e.norm_sqr()).collect();
    if normalize {
        let peak = trace.iter().cloned().fold(0.0, f64::max);
        if peak > 0.0 {
            trace.iter_mut().for_each(|v| *v /= peak);
        }
    }
    trace
}

/// Subtract a straight line fitted (against sample index) to the defined
/// samples.
fn remove_linear(phase: &[Option<f64>]) -> Result<Vec<Option<f64>>, AnalysisError> {
    let (x, y): (Vec<f64>, Vec<f64>) = phase
        .iter()
        .enumerate()
        .filter_map(|(i, p)| p.map(|v| (i as f64, v)))
        .unzip();
    let line = polyfit(&x, &y, 1)?;
    Ok(phase
        .iter()
        .enumerate()
        .map(|(i, p)| p.map(|v| v - polyval(&line, i as f64)))
        .collect())
}

fn subtract(phase: &[Option<f64>], reference: f64) -> Vec<Option<f64>> {
    phase.iter().map(|p| p.map(|v| v - reference)).collect()
}

impl<'a> PulseAnalyzer<'a> {
    pub fn new(state: &'a PulseState) -> Self {
        Self {
            state,
            phase_threshold: DEFAULT_PHASE_THRESHOLD,
        }
    }

    /// Amplitude below which phase samples are masked.
    pub fn with_phase_threshold(mut self, threshold: f64) -> Self {
        self.phase_threshold = threshold;
        self
    }

    pub fn phase_threshold(&self) -> f64 {
        self.phase_threshold
    }

    pub fn state(&self) -> &'a PulseState {
        self.state
    }

    /// $|E(t)|^2$ rolled so that its peak sits at the middle index,
    /// optionally normalised to a peak of 1.
    pub fn temporal_intensity(&self, normalize: bool) -> Vec<f64> {
        intensity(&self.state.output_time().to_vec(), normalize)
    }

    /// $|E(\omega)|^2$ of the stored output spectrum, centred like
    /// [`temporal_intensity`](Self::temporal_intensity).
    pub fn spectral_intensity(&self, normalize: bool) -> Vec<f64> {
        intensity(&self.state.output_spectrum().to_vec(), normalize)
    }

    /// Temporal phase (rad) of the peak-centred output field.
    ///
    /// With `linear_compensate` a first-order fit against sample index is
    /// removed (a carrier-frequency offset); otherwise the phase is made zero
    /// at the centre sample.
    pub fn temporal_phase(&self, linear_compensate: bool) -> Result<Vec<Option<f64>>, AnalysisError> {
        let field = self.state.output_time().to_vec();
        let centre = field.len() / 2;
        let centred = center_peak(&field, centre);

        let mut phase = angles(&centred);
        unwrap_jumps(&mut phase);
        let phase_at_peak = phase[centre];
        let masked = mask_below(&phase, &centred, self.phase_threshold);

        if linear_compensate {
            remove_linear(&masked)
        } else {
            Ok(subtract(&masked, phase_at_peak))
        }
    }

    /// Spectral phase (rad) versus the centred frequency axis.
    ///
    /// The spectrum is recomputed from the time field rolled so that its peak
    /// sits at index 0, which strips most of the group delay before the phase
    /// is taken. The magnitude is normalised to 1 before masking. The result
    /// is zero at the spectral peak.
    pub fn spectral_phase(&self, linear_compensate: bool) -> Result<Vec<Option<f64>>, AnalysisError> {
        let centred = center_peak(&self.state.output_time().to_vec(), 0);
        let mut spectrum = fft::centered_spectrum(&centred);

        let peak = spectrum.iter().map(|e| e.norm()).fold(0.0, f64::max);
        if peak > 0.0 {
            spectrum.iter_mut().for_each(|e| *e /= peak);
        }
        let peak_index = argmax_norm(&spectrum);

        let mut phase = angles(&spectrum);
        unwrap_jumps(&mut phase);
        let masked = mask_below(&phase, &spectrum, self.phase_threshold);

        let compensated = if linear_compensate {
            remove_linear(&masked)?
        } else {
            masked
        };
        Ok(match compensated[peak_index] {
            Some(reference) => subtract(&compensated, reference),
            None => compensated,
        })
    }

    /// Polynomial fit of the linearly compensated spectral phase against the
    /// absolute angular frequency divided by `frequency_scale` (1e12 gives
    /// rad/ps units). Coefficients are highest order first.
    pub fn spectral_phase_expansion(
        &self,
        order: usize,
        frequency_scale: f64,
    ) -> Result<Vec<f64>, AnalysisError> {
        if !frequency_scale.is_finite() || frequency_scale == 0.0 {
            return Err(AnalysisError::FitFailed(format!(
                "frequency scale must be finite and non-zero, got {}",
                frequency_scale
            )));
        }
        let phase = self.spectral_phase(true)?;
        let omega = self.state.absolute_omega();
        let (x, y): (Vec<f64>, Vec<f64>) = phase
            .iter()
            .zip(omega.iter())
            .filter_map(|(p, w)| p.map(|v| (w / frequency_scale, v)))
            .unzip();
        polyfit(&x, &y, order)
    }

    /// Full width at half maximum of the normalised intensity trace: seconds
    /// for [`DurationDomain::Temporal`], rad/s for [`DurationDomain::Spectral`].
    ///
    /// The width is the distance between the outermost samples at which
    /// `I - 0.5` changes sign.
    pub fn pulse_duration(&self, domain: DurationDomain) -> Result<f64, AnalysisError> {
        let (trace, axis) = match domain {
            DurationDomain::Temporal => (self.temporal_intensity(true), self.state.time().to_vec()),
            DurationDomain::Spectral => (self.spectral_intensity(true), self.state.absolute_omega().to_vec()),
        };
        fwhm(&trace, &axis)
    }
}

fn half_max_sign(v: f64) -> i8 {
    let d = v - 0.5;
    if d > 0.0 {
        1
    } else if d < 0.0 {
        -1
    } else {
        0
    }
}

/// Distance between the first and last half-maximum crossings of `trace`.
pub fn fwhm(trace: &[f64], axis: &[f64]) -> Result<f64, AnalysisError> {
    let crossings: Vec<usize> = trace
        .windows(2)
        .enumerate()
        .filter(|(_, w)| half_max_sign(w[0]) != half_max_sign(w[1]))
        .map(|(i, _)| i)
        .collect();
    match (crossings.first(), crossings.last()) {
        (Some(&first), Some(&last)) if crossings.len() > 1 => Ok(axis[last] - axis[first]),
        _ => Err(AnalysisError::HalfMaximumNotBracketed),
    }
}
