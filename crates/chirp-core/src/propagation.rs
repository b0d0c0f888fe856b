//! Frequency-domain propagation through material slabs.
//!
//! A slab of thickness $L$ multiplies the spectrum by
//! $H(\omega) = \exp(-i k(\omega) L)$ with
//! $k(\omega) = (\omega + \omega_0)\, n(\omega + \omega_0) / c$.
//! Samples where the material has no defined index are fully attenuated.
//! Successive slabs compose by multiplication, so dispersion accumulates.

use ndarray::Array1;
use num_complex::Complex64;
use thiserror::Error;

use chirp_materials::{RefractiveIndex, SPEED_OF_LIGHT};

use crate::pulse::PulseState;

/// Errors from a propagation step. The field is never modified when one is
/// returned.
#[derive(Debug, Error, PartialEq)]
pub enum PropagationError {
    #[error("No pulse has been generated")]
    NoPulse,

    #[error("Unknown material '{0}', propagation skipped")]
    UnknownMaterial(String),

    #[error("Invalid thickness {0} m")]
    InvalidThickness(f64),
}

/// Wavenumber $k$ (rad/m) at absolute angular frequency `omega`, or `None`
/// outside the material's band.
pub fn wavenumber(model: &dyn RefractiveIndex, omega: f64) -> Option<f64> {
    model.index_at(omega).map(|n| omega * n / SPEED_OF_LIGHT)
}

/// Transfer function of a slab sampled on the state's frequency grid.
pub fn transfer_function(
    state: &PulseState,
    model: &dyn RefractiveIndex,
    thickness: f64,
) -> Array1<Complex64> {
    let w0 = state.central_omega();
    state.omega().mapv(|w| match wavenumber(model, w + w0) {
        Some(k) => {
            let phase = -k * thickness;
            if phase.is_finite() {
                Complex64::from_polar(1.0, phase)
            } else {
                Complex64::new(0.0, 0.0)
            }
        }
        None => Complex64::new(0.0, 0.0),
    })
}

/// Propagate the output field of `state` through `thickness` metres of
/// `model`.
pub fn propagate(
    state: &mut PulseState,
    model: &dyn RefractiveIndex,
    thickness: f64,
) -> Result<(), PropagationError> {
    if !thickness.is_finite() {
        return Err(PropagationError::InvalidThickness(thickness));
    }
    let transfer = transfer_function(state, model, thickness);
    state.apply_transfer(&transfer);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pulse::generate;
    use crate::types::PulseParams;
    use chirp_materials::MaterialCatalog;

    #[test]
    fn test_zero_thickness_is_identity_in_band() {
        let catalog = MaterialCatalog::with_builtins().unwrap();
        let fs = catalog.require("fs").unwrap();
        let state = generate(&PulseParams::default().with_samples(2048)).unwrap();
        let h = transfer_function(&state, fs.as_ref(), 0.0);

        let w0 = state.central_omega();
        let (lo, hi) = fs.angular_frequency_range();
        for (w, value) in state.omega().iter().zip(h.iter()) {
            let abs = w + w0;
            if abs > lo && abs < hi {
                assert!((value - Complex64::new(1.0, 0.0)).norm() < 1e-12);
            } else {
                assert_eq!(*value, Complex64::new(0.0, 0.0));
            }
        }
    }

    #[test]
    fn test_transfer_has_unit_magnitude_in_band() {
        let catalog = MaterialCatalog::with_builtins().unwrap();
        let bbo = catalog.require("bbo_o").unwrap();
        let state = generate(&PulseParams::default().with_samples(2048)).unwrap();
        let h = transfer_function(&state, bbo.as_ref(), 2e-3);
        let centre = state.len() / 2;
        assert!((h[centre].norm() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_infinite_thickness_rejected() {
        let catalog = MaterialCatalog::with_builtins().unwrap();
        let fs = catalog.require("fs").unwrap();
        let mut state = generate(&PulseParams::default().with_samples(256)).unwrap();
        let before = state.output_spectrum().clone();
        let err = propagate(&mut state, fs.as_ref(), f64::INFINITY);
        assert_eq!(err, Err(PropagationError::InvalidThickness(f64::INFINITY)));
        assert_eq!(state.output_spectrum(), &before);
    }
}
