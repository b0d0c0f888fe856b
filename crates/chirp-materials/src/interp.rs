//! Piecewise quadratic interpolation of sampled index curves.
//!
//! Each evaluation fits a parabola through the three grid points nearest the
//! query, which keeps the curve smooth enough for the second and third
//! derivatives of the phase that dispersion depends on. Queries outside the
//! sampled range are rejected instead of extrapolated.

use crate::provider::MaterialError;

/// A local quadratic interpolant over strictly increasing abscissae.
#[derive(Debug, Clone)]
pub struct QuadraticInterpolant {
    xs: Vec<f64>,
    ys: Vec<f64>,
}

impl QuadraticInterpolant {
    /// Build an interpolant from sample points.
    ///
    /// # Errors
    /// Fails if the lengths differ, fewer than three points are given, or
    /// `xs` is not strictly increasing.
    pub fn new(xs: Vec<f64>, ys: Vec<f64>) -> Result<Self, MaterialError> {
        if xs.len() != ys.len() {
            return Err(MaterialError::DataError(format!(
                "abscissa/ordinate length mismatch ({} vs {})",
                xs.len(),
                ys.len()
            )));
        }
        if xs.len() < 3 {
            return Err(MaterialError::DataError(
                "quadratic interpolation needs at least 3 points".into(),
            ));
        }
        if let Some(i) = xs.windows(2).position(|w| !(w[1] > w[0])) {
            return Err(MaterialError::DataError(format!(
                "abscissae must be strictly increasing at index {}",
                i + 1
            )));
        }
        Ok(Self { xs, ys })
    }

    /// Lower and upper bound of the sampled range.
    pub fn range(&self) -> (f64, f64) {
        (self.xs[0], self.xs[self.xs.len() - 1])
    }

    /// Evaluate at `x`, or `None` if `x` lies outside the sampled range or the
    /// local samples are not finite.
    pub fn evaluate(&self, x: f64) -> Option<f64> {
        let (lo, hi) = self.range();
        if !(x >= lo && x <= hi) {
            return None;
        }

        let n = self.xs.len();
        // Index of the first knot strictly above x, clamped so that a
        // three-point stencil fits.
        let upper = self.xs.partition_point(|&xi| xi <= x);
        let start = upper.saturating_sub(1).min(n - 3);

        let (x0, x1, x2) = (self.xs[start], self.xs[start + 1], self.xs[start + 2]);
        let (y0, y1, y2) = (self.ys[start], self.ys[start + 1], self.ys[start + 2]);

        let l0 = (x - x1) * (x - x2) / ((x0 - x1) * (x0 - x2));
        let l1 = (x - x0) * (x - x2) / ((x1 - x0) * (x1 - x2));
        let l2 = (x - x0) * (x - x1) / ((x2 - x0) * (x2 - x1));
        let y = y0 * l0 + y1 * l1 + y2 * l2;

        y.is_finite().then_some(y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_reproduces_quadratic_exactly() {
        let xs: Vec<f64> = (0..10).map(|i| i as f64 * 0.7).collect();
        let ys: Vec<f64> = xs.iter().map(|x| 3.0 * x * x - 2.0 * x + 1.0).collect();
        let interp = QuadraticInterpolant::new(xs, ys).unwrap();

        for &x in &[0.0, 0.35, 1.9, 4.2, 6.3] {
            let y = interp.evaluate(x).unwrap();
            assert_abs_diff_eq!(y, 3.0 * x * x - 2.0 * x + 1.0, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_passes_through_data_points() {
        let xs = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let ys = vec![2.0, 3.0, 5.0, 4.0, 1.0];
        let interp = QuadraticInterpolant::new(xs.clone(), ys.clone()).unwrap();
        for (x, y) in xs.iter().zip(ys.iter()) {
            assert_abs_diff_eq!(interp.evaluate(*x).unwrap(), *y, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_out_of_range_is_undefined() {
        let interp = QuadraticInterpolant::new(vec![1.0, 2.0, 3.0], vec![1.0, 4.0, 9.0]).unwrap();
        assert!(interp.evaluate(0.999).is_none());
        assert!(interp.evaluate(3.001).is_none());
        assert!(interp.evaluate(f64::NAN).is_none());
    }

    #[test]
    fn test_rejects_unsorted_abscissae() {
        let err = QuadraticInterpolant::new(vec![1.0, 3.0, 2.0], vec![0.0; 3]);
        assert!(matches!(err, Err(MaterialError::DataError(_))));
    }
}
