//! # Chirp Core
//!
//! Linear propagation of ultrashort optical pulses through stacks of
//! dispersive materials. A Gaussian pulse is generated on a time grid, each
//! material slab is applied as a spectral phase filter
//! $H(\omega) = e^{-i k(\omega) L}$, and the result is analysed for intensity,
//! phase, duration and spectral-phase expansion coefficients.
//!
//! ## Modules
//!
//! - [`types`]: Pulse parameters and the duration-domain selector.
//! - [`pulse`]: Pulse generation and the [`pulse::PulseState`] field container.
//! - [`propagation`]: Transfer functions and in-place propagation.
//! - [`analysis`]: Intensity, phase, duration and phase expansion.
//! - [`phase`]: Peak centring, coarse phase unwrapping and masking.
//! - [`polyfit`]: Least-squares polynomial fitting.
//! - [`fft`]: Centred discrete Fourier transforms.
//! - [`diagnostics`]: Per-instance logging configuration.
//! - [`engine`]: The [`Dispersion`] facade tying the above together.

pub mod analysis;
pub mod diagnostics;
pub mod engine;
pub mod fft;
pub mod phase;
pub mod polyfit;
pub mod propagation;
pub mod pulse;
pub mod types;

pub use analysis::{AnalysisError, PulseAnalyzer};
pub use diagnostics::Diagnostics;
pub use engine::{Dispersion, EngineError};
pub use propagation::PropagationError;
pub use pulse::{PulseError, PulseState};
pub use types::{DurationDomain, PulseParams};

/// Default amplitude threshold below which phase samples are masked.
pub const DEFAULT_PHASE_THRESHOLD: f64 = 0.01;
