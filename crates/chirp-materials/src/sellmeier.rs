//! Sellmeier-type dispersion formulas and their sampled index models.
//!
//! A [`DispersionFormula`] gives $n(\lambda)$ in closed form with $\lambda$ in
//! micrometres, as is customary for published coefficients. A
//! [`SampledIndex`] tabulates a formula on a fixed wavelength grid
//! (200–2000 nm), re-parameterises it by angular frequency
//! $\omega = 2\pi c / \lambda$ and answers queries with a local quadratic
//! interpolant.

use crate::interp::QuadraticInterpolant;
use crate::provider::{MaterialError, RefractiveIndex};
use crate::{angular_frequency, GRID_MAX_WAVELENGTH, GRID_MIN_WAVELENGTH};

/// One group of the extended Sellmeier sum, $A + B\lambda^2 / (\lambda^2 - C)$.
///
/// `c` is in µm², i.e. the square of the resonance wavelength.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SellmeierTerm {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl SellmeierTerm {
    /// A standard term without additive constant.
    pub fn new(b: f64, c: f64) -> Self {
        Self { a: 0.0, b, c }
    }

    fn evaluate(&self, l2: f64) -> f64 {
        self.a + self.b * l2 / (l2 - self.c)
    }
}

/// One term of the gas dispersion sum, $B\lambda^2 / (C\lambda^2 - 1)$.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GasTerm {
    pub b: f64,
    pub c: f64,
}

/// Closed-form refractive index as a function of wavelength in µm.
#[derive(Debug, Clone, PartialEq)]
pub enum DispersionFormula {
    /// $n = \sqrt{1 + \sum_i (A_i + B_i\lambda^2/(\lambda^2 - C_i))}$
    Sellmeier(Vec<SellmeierTerm>),
    /// $n = 1 + \sum_i B_i\lambda^2/(C_i\lambda^2 - 1)$, used for air.
    Gas(Vec<GasTerm>),
    /// $n = \sqrt{A + B/(\lambda^2 - C) - D\lambda^2}$, the short form used for
    /// birefringent crystals such as BBO.
    Eimerl { a: f64, b: f64, c: f64, d: f64 },
}

impl DispersionFormula {
    /// Standard Sellmeier formula from paired B and C coefficient lists.
    pub fn sellmeier(b_coeff: &[f64], c_coeff: &[f64]) -> Result<Self, MaterialError> {
        if b_coeff.len() != c_coeff.len() {
            return Err(MaterialError::DataError(format!(
                "{} B coefficients but {} C coefficients",
                b_coeff.len(),
                c_coeff.len()
            )));
        }
        Ok(Self::Sellmeier(
            b_coeff
                .iter()
                .zip(c_coeff)
                .map(|(&b, &c)| SellmeierTerm::new(b, c))
                .collect(),
        ))
    }

    /// Refractive index at `wavelength_um`. May be NaN at poles or where the
    /// formula leaves the real axis.
    pub fn index(&self, wavelength_um: f64) -> f64 {
        let l2 = wavelength_um * wavelength_um;
        match self {
            Self::Sellmeier(terms) => {
                let sum: f64 = terms.iter().map(|t| t.evaluate(l2)).sum();
                (1.0 + sum).sqrt()
            }
            Self::Gas(terms) => 1.0 + terms.iter().map(|t| t.b * l2 / (t.c * l2 - 1.0)).sum::<f64>(),
            Self::Eimerl { a, b, c, d } => (a + b / (l2 - c) - d * l2).sqrt(),
        }
    }
}

/// Refractive index tabulated on an angular-frequency grid.
#[derive(Debug, Clone)]
pub struct SampledIndex {
    name: String,
    interp: QuadraticInterpolant,
}

impl SampledIndex {
    /// Tabulate `formula` at `points` wavelengths evenly spaced over
    /// 200–2000 nm.
    pub fn from_formula(
        name: impl Into<String>,
        formula: &DispersionFormula,
        points: usize,
    ) -> Result<Self, MaterialError> {
        if points < 3 {
            return Err(MaterialError::DataError(format!(
                "wavelength grid needs at least 3 points, got {}",
                points
            )));
        }
        let step = (GRID_MAX_WAVELENGTH - GRID_MIN_WAVELENGTH) / (points - 1) as f64;

        // Longest wavelength first so that omega comes out increasing.
        let (omegas, indices): (Vec<f64>, Vec<f64>) = (0..points)
            .rev()
            .map(|i| {
                let wavelength = GRID_MIN_WAVELENGTH + step * i as f64;
                (angular_frequency(wavelength), formula.index(wavelength * 1e6))
            })
            .unzip();

        Self::from_samples(name, omegas, indices)
    }

    /// Build directly from (omega, n) samples in any order.
    pub fn from_samples(
        name: impl Into<String>,
        omegas: Vec<f64>,
        indices: Vec<f64>,
    ) -> Result<Self, MaterialError> {
        if omegas.len() != indices.len() {
            return Err(MaterialError::DataError(
                "frequency and index sample counts differ".into(),
            ));
        }
        let mut pairs: Vec<(f64, f64)> = omegas.into_iter().zip(indices).collect();
        pairs.sort_by(|a, b| a.0.total_cmp(&b.0));
        let (xs, ys) = pairs.into_iter().unzip();

        Ok(Self {
            name: name.into(),
            interp: QuadraticInterpolant::new(xs, ys)?,
        })
    }
}

impl RefractiveIndex for SampledIndex {
    fn name(&self) -> &str {
        &self.name
    }

    fn angular_frequency_range(&self) -> (f64, f64) {
        self.interp.range()
    }

    fn index_at(&self, omega: f64) -> Option<f64> {
        self.interp.evaluate(omega)
    }
}
