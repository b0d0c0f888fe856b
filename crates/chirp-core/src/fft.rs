//! Centred discrete Fourier transforms.
//!
//! Spectra are stored in zero-centred order: index 0 holds the most negative
//! frequency, index `n / 2` holds zero. The forward transform is
//! unnormalised and the inverse carries the `1/n` factor.

use num_complex::Complex64;
use rustfft::FftPlanner;

/// Move the zero-frequency sample from index 0 to the centre.
pub fn fft_shift<T>(data: &mut [T]) {
    let half = data.len() / 2;
    data.rotate_right(half);
}

/// Inverse of [`fft_shift`], also correct for odd lengths.
pub fn ifft_shift<T>(data: &mut [T]) {
    let half = data.len() / 2;
    data.rotate_left(half);
}

/// Unnormalised forward transform in natural order.
pub fn forward(signal: &[Complex64]) -> Vec<Complex64> {
    let mut buffer = signal.to_vec();
    if buffer.is_empty() {
        return buffer;
    }
    let mut planner = FftPlanner::<f64>::new();
    planner.plan_fft_forward(buffer.len()).process(&mut buffer);
    buffer
}

/// Inverse transform in natural order, scaled by `1/n`.
pub fn inverse(spectrum: &[Complex64]) -> Vec<Complex64> {
    let mut buffer = spectrum.to_vec();
    if buffer.is_empty() {
        return buffer;
    }
    let mut planner = FftPlanner::<f64>::new();
    planner.plan_fft_inverse(buffer.len()).process(&mut buffer);
    let scale = 1.0 / buffer.len() as f64;
    for value in &mut buffer {
        *value *= scale;
    }
    buffer
}

/// Forward transform followed by [`fft_shift`].
pub fn centered_spectrum(signal: &[Complex64]) -> Vec<Complex64> {
    let mut spectrum = forward(signal);
    fft_shift(&mut spectrum);
    spectrum
}

/// [`ifft_shift`] followed by the inverse transform.
pub fn signal_from_centered(spectrum: &[Complex64]) -> Vec<Complex64> {
    let mut natural = spectrum.to_vec();
    ifft_shift(&mut natural);
    inverse(&natural)
}

/// Zero-centred angular-frequency axis conjugate to `n` samples spaced `dt`.
pub fn angular_frequency_axis(n: usize, dt: f64) -> Vec<f64> {
    let dw = 2.0 * std::f64::consts::PI / (n as f64 * dt);
    let offset = (n / 2) as f64;
    (0..n).map(|i| (i as f64 - offset) * dw).collect()
}

/// `n` evenly spaced values from `start` to `end` inclusive.
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            let mut values: Vec<f64> = (0..n).map(|i| start + step * i as f64).collect();
            values[n - 1] = end;
            values
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_shift_orders() {
        let mut even = vec![0, 1, -2, -1];
        fft_shift(&mut even);
        assert_eq!(even, vec![-2, -1, 0, 1]);
        ifft_shift(&mut even);
        assert_eq!(even, vec![0, 1, -2, -1]);

        let mut odd = vec![0, 1, 2, -2, -1];
        fft_shift(&mut odd);
        assert_eq!(odd, vec![-2, -1, 0, 1, 2]);
        ifft_shift(&mut odd);
        assert_eq!(odd, vec![0, 1, 2, -2, -1]);
    }

    #[test]
    fn test_frequency_axis_is_zero_centred() {
        let w = angular_frequency_axis(8, 0.5);
        let dw = 2.0 * std::f64::consts::PI / 4.0;
        assert_abs_diff_eq!(w[0], -4.0 * dw, epsilon = 1e-12);
        assert_eq!(w[4], 0.0);
        assert_abs_diff_eq!(w[7], 3.0 * dw, epsilon = 1e-12);
    }

    #[test]
    fn test_centered_transform_inverts() {
        let signal: Vec<Complex64> = (0..16)
            .map(|i| Complex64::new((i as f64 * 0.3).cos(), (i as f64 * 0.7).sin()))
            .collect();
        let back = signal_from_centered(&centered_spectrum(&signal));
        for (a, b) in signal.iter().zip(&back) {
            assert!((a - b).norm() < 1e-12);
        }
    }

    #[test]
    fn test_dc_lands_at_centre() {
        let signal = vec![Complex64::new(1.0, 0.0); 8];
        let spectrum = centered_spectrum(&signal);
        assert_abs_diff_eq!(spectrum[4].re, 8.0, epsilon = 1e-12);
        assert!(spectrum[0].norm() < 1e-12);
    }

    #[test]
    fn test_linspace_endpoints() {
        let t = linspace(-1.0, 1.0, 5);
        assert_eq!(t, vec![-1.0, -0.5, 0.0, 0.5, 1.0]);
    }
}
