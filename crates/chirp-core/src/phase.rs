//! Peak centring, coarse phase unwrapping and amplitude masking.

use num_complex::Complex64;

/// Adjacent-sample phase steps larger than this (rad) are treated as 2π wraps.
pub const WRAP_JUMP_THRESHOLD: f64 = 5.0;

/// Index of the first sample with the largest magnitude.
pub fn argmax_norm(field: &[Complex64]) -> usize {
    let mut best = 0;
    let mut best_norm = f64::NEG_INFINITY;
    for (i, value) in field.iter().enumerate() {
        let norm = value.norm();
        if norm > best_norm {
            best = i;
            best_norm = norm;
        }
    }
    best
}

/// Circular shift: element `i` moves to `i + shift` (mod n).
pub fn roll<T: Clone>(data: &[T], shift: isize) -> Vec<T> {
    let mut out = data.to_vec();
    if !out.is_empty() {
        let k = shift.rem_euclid(out.len() as isize) as usize;
        out.rotate_right(k);
    }
    out
}

/// Roll `field` so that its peak magnitude lands on `target`.
pub fn center_peak(field: &[Complex64], target: usize) -> Vec<Complex64> {
    let peak = argmax_norm(field);
    roll(field, target as isize - peak as isize)
}

/// Remove 2π discontinuities in place.
///
/// Wherever two neighbouring samples differ by more than
/// [`WRAP_JUMP_THRESHOLD`], 2π is added to (for a negative step) or
/// subtracted from (for a positive step) every later sample. Steps are taken
/// from the wrapped input, so the trace must be sampled finely enough that
/// genuine phase evolution never exceeds the threshold between samples.
pub fn unwrap_jumps(phase: &mut [f64]) {
    let steps: Vec<f64> = phase.windows(2).map(|w| w[1] - w[0]).collect();
    let mut offset = 0.0;
    for (i, step) in steps.iter().enumerate() {
        if step.abs() > WRAP_JUMP_THRESHOLD {
            offset += if *step < 0.0 {
                2.0 * std::f64::consts::PI
            } else {
                -2.0 * std::f64::consts::PI
            };
        }
        phase[i + 1] += offset;
    }
}

/// Keep phase samples whose field magnitude reaches `threshold`.
pub fn mask_below(phase: &[f64], field: &[Complex64], threshold: f64) -> Vec<Option<f64>> {
    phase
        .iter()
        .zip(field)
        .map(|(&p, e)| (e.norm() >= threshold).then_some(p))
        .collect()
}

/// Wrapped phase angle of every sample, in (−π, π].
pub fn angles(field: &[Complex64]) -> Vec<f64> {
    field.iter().map(|e| e.arg()).collect()
}
