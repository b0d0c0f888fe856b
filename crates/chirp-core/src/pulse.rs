//! Pulse generation and the field state it produces.
//!
//! The generated field is a zero-phase Gaussian $E(t) = e^{-t^2/\tau^2}$ on a
//! symmetric time grid. The state keeps the generated (reference) field and
//! the propagated (output) field side by side; propagation only ever touches
//! the output, and the output time trace is always recomputed from the
//! output spectrum so the two stay a transform pair.

use ndarray::Array1;
use num_complex::Complex64;
use thiserror::Error;

use chirp_materials::{angular_frequency, SPEED_OF_LIGHT};

use crate::fft;
use crate::types::{DurationDomain, PulseParams};

/// Errors from pulse generation.
#[derive(Debug, Error, PartialEq)]
pub enum PulseError {
    #[error("Invalid pulse parameter {name} = {value}")]
    InvalidParameter { name: &'static str, value: f64 },
}

/// Time/frequency grids plus reference and output fields.
#[derive(Debug, Clone)]
pub struct PulseState {
    params: PulseParams,
    time: Array1<f64>,
    omega: Array1<f64>,
    central_omega: f64,
    reference_time: Array1<Complex64>,
    reference_spectrum: Array1<Complex64>,
    output_time: Array1<Complex64>,
    output_spectrum: Array1<Complex64>,
}

/// Gaussian time constant $\tau$ for the requested width.
///
/// A temporal intensity FWHM maps to $\tau = \Delta t/\sqrt{2\ln 2}$; a spectral
/// FWHM in wavelength uses the transform limit
/// $\tau = 0.441\,\lambda_0^2/(\Delta\lambda\,c)$.
pub fn gaussian_time_constant(params: &PulseParams) -> f64 {
    match params.domain {
        DurationDomain::Temporal => params.fwhm / (2.0 * std::f64::consts::LN_2).sqrt(),
        DurationDomain::Spectral => {
            0.441 * params.central_wavelength.powi(2) / (params.fwhm * SPEED_OF_LIGHT)
        }
    }
}

fn check_positive(name: &'static str, value: f64) -> Result<(), PulseError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(PulseError::InvalidParameter { name, value })
    }
}

/// Generate a transform-limited Gaussian pulse.
pub fn generate(params: &PulseParams) -> Result<PulseState, PulseError> {
    check_positive("fwhm", params.fwhm)?;
    check_positive("central_wavelength", params.central_wavelength)?;
    check_positive("time_span", params.time_span)?;
    if params.samples < 2 {
        return Err(PulseError::InvalidParameter {
            name: "samples",
            value: params.samples as f64,
        });
    }

    let n = params.samples;
    let half_span = params.time_span / 2.0;
    let dt = params.time_span / n as f64;
    let tau = gaussian_time_constant(params);

    let time = Array1::from(fft::linspace(-half_span, half_span, n));
    let omega = Array1::from(fft::angular_frequency_axis(n, dt));

    let reference_time: Array1<Complex64> =
        time.mapv(|t| Complex64::new((-(t * t) / (tau * tau)).exp(), 0.0));
    let reference_spectrum = Array1::from(fft::centered_spectrum(&reference_time.to_vec()));

    Ok(PulseState {
        params: params.clone(),
        central_omega: angular_frequency(params.central_wavelength),
        output_time: reference_time.clone(),
        output_spectrum: reference_spectrum.clone(),
        time,
        omega,
        reference_time,
        reference_spectrum,
    })
}

impl PulseState {
    /// Parameters this pulse was generated with.
    pub fn params(&self) -> &PulseParams {
        &self.params
    }

    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// Time axis (s), symmetric about zero.
    pub fn time(&self) -> &Array1<f64> {
        &self.time
    }

    /// Baseband angular-frequency axis (rad/s), zero-centred.
    pub fn omega(&self) -> &Array1<f64> {
        &self.omega
    }

    /// Carrier angular frequency $\omega_0$ (rad/s).
    pub fn central_omega(&self) -> f64 {
        self.central_omega
    }

    /// Absolute angular-frequency axis $\omega + \omega_0$ (rad/s).
    pub fn absolute_omega(&self) -> Array1<f64> {
        &self.omega + self.central_omega
    }

    pub fn reference_time(&self) -> &Array1<Complex64> {
        &self.reference_time
    }

    pub fn reference_spectrum(&self) -> &Array1<Complex64> {
        &self.reference_spectrum
    }

    /// Propagated time-domain field.
    pub fn output_time(&self) -> &Array1<Complex64> {
        &self.output_time
    }

    /// Propagated field in zero-centred frequency order.
    pub fn output_spectrum(&self) -> &Array1<Complex64> {
        &self.output_spectrum
    }

    /// Multiply the output spectrum by `transfer` and rebuild the time trace.
    pub(crate) fn apply_transfer(&mut self, transfer: &Array1<Complex64>) {
        self.output_spectrum = &self.output_spectrum * transfer;
        self.output_time = Array1::from(fft::signal_from_centered(&self.output_spectrum.to_vec()));
    }

    /// Restore the output field to the generated pulse.
    pub fn reset(&mut self) {
        self.output_time.assign(&self.reference_time);
        self.output_spectrum.assign(&self.reference_spectrum);
    }
}
