//! Least-squares polynomial fitting.
//!
//! Coefficients are ordered highest power first. The Vandermonde columns are
//! normalised before the SVD solve, which keeps fits over narrow, offset
//! abscissa ranges (absolute optical frequencies) well conditioned.

use nalgebra::{DMatrix, DVector};

use crate::analysis::AnalysisError;

/// Iteration cap for the SVD sweep.
const SVD_MAX_ITERATIONS: usize = 1000;

/// Fit a polynomial of `degree` to the points `(x, y)`.
pub fn polyfit(x: &[f64], y: &[f64], degree: usize) -> Result<Vec<f64>, AnalysisError> {
    if x.len() != y.len() {
        return Err(AnalysisError::FitFailed(format!(
            "{} abscissae but {} ordinates",
            x.len(),
            y.len()
        )));
    }
    let rows = x.len();
    let cols = degree + 1;
    if rows < cols {
        return Err(AnalysisError::InsufficientSamples {
            needed: cols,
            available: rows,
        });
    }

    if !y.iter().all(|v| v.is_finite()) {
        return Err(AnalysisError::FitFailed("non-finite ordinate".into()));
    }

    let mut vandermonde = DMatrix::<f64>::from_fn(rows, cols, |i, j| x[i].powi((degree - j) as i32));
    if !vandermonde.iter().all(|v| v.is_finite()) {
        return Err(AnalysisError::FitFailed("non-finite abscissa power".into()));
    }
    let scales: Vec<f64> = (0..cols)
        .map(|j| {
            let norm = vandermonde.column(j).norm();
            if norm > 0.0 {
                norm
            } else {
                1.0
            }
        })
        .collect();
    if !scales.iter().all(|s| s.is_finite()) {
        return Err(AnalysisError::FitFailed("column norm overflow".into()));
    }
    for (j, scale) in scales.iter().enumerate() {
        vandermonde.column_mut(j).scale_mut(1.0 / scale);
    }

    let rhs = DVector::from_column_slice(y);
    let solution = vandermonde
        .try_svd(true, true, f64::EPSILON, SVD_MAX_ITERATIONS)
        .ok_or_else(|| AnalysisError::FitFailed("SVD did not converge".into()))?
        .solve(&rhs, f64::EPSILON * rows as f64)
        .map_err(|e| AnalysisError::FitFailed(e.to_string()))?;

    let coeffs: Vec<f64> = solution.iter().zip(&scales).map(|(c, s)| c / s).collect();
    if coeffs.iter().all(|c| c.is_finite()) {
        Ok(coeffs)
    } else {
        Err(AnalysisError::FitFailed("non-finite coefficients".into()))
    }
}

/// Evaluate a polynomial (highest power first) at `x` by Horner's rule.
pub fn polyval(coeffs: &[f64], x: f64) -> f64 {
    coeffs.iter().fold(0.0, |acc, &c| acc * x + c)
}

/// Coefficients of the derivative polynomial (highest power first).
pub fn polyder(coeffs: &[f64]) -> Vec<f64> {
    let degree = coeffs.len().saturating_sub(1);
    coeffs
        .iter()
        .take(degree)
        .enumerate()
        .map(|(i, c)| c * (degree - i) as f64)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_exact_line() {
        let x: Vec<f64> = (0..20).map(|i| i as f64).collect();
        let y: Vec<f64> = x.iter().map(|v| 2.5 * v - 7.0).collect();
        let p = polyfit(&x, &y, 1).unwrap();
        assert_relative_eq!(p[0], 2.5, epsilon = 1e-10);
        assert_relative_eq!(p[1], -7.0, epsilon = 1e-10);
    }

    #[test]
    fn test_offset_quadratic() {
        // Narrow range far from the origin, like Trad/s frequency axes.
        let x: Vec<f64> = (0..200).map(|i| 2300.0 + 0.5 * i as f64).collect();
        let y: Vec<f64> = x.iter().map(|v| -1.5e-4 * (v - 2350.0).powi(2) + 0.3).collect();
        let p = polyfit(&x, &y, 2).unwrap();
        assert_relative_eq!(p[0], -1.5e-4, max_relative = 1e-5);
        for &xv in &[2310.0, 2350.0, 2390.0] {
            assert_relative_eq!(polyval(&p, xv), -1.5e-4 * (xv - 2350.0).powi(2) + 0.3, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_too_few_points() {
        let err = polyfit(&[1.0, 2.0], &[1.0, 2.0], 2).unwrap_err();
        assert_eq!(err, AnalysisError::InsufficientSamples { needed: 3, available: 2 });
    }

    #[test]
    fn test_non_finite_input_rejected() {
        let x = [0.0, 1.0, 2.0, 3.0];
        let y = [1.0, f64::NAN, 3.0, 4.0];
        assert!(matches!(polyfit(&x, &y, 1), Err(AnalysisError::FitFailed(_))));

        let x = [0.0, f64::INFINITY, 2.0, 3.0];
        let y = [1.0, 2.0, 3.0, 4.0];
        assert!(matches!(polyfit(&x, &y, 1), Err(AnalysisError::FitFailed(_))));

        // Finite abscissae whose powers overflow.
        let x = [1e200, 2e200, 3e200, 4e200];
        assert!(matches!(polyfit(&x, &y, 2), Err(AnalysisError::FitFailed(_))));
    }

    #[test]
    fn test_polyval_horner() {
        assert_eq!(polyval(&[1.0, 0.0, -4.0], 3.0), 5.0);
        assert_eq!(polyval(&[], 3.0), 0.0);
    }

    #[test]
    fn test_polyder() {
        assert_eq!(polyder(&[2.0, -3.0, 1.0, 5.0]), vec![6.0, -6.0, 1.0]);
        assert!(polyder(&[4.0]).is_empty());
        assert!(polyder(&[]).is_empty());
    }
}
