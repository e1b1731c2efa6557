//! Debiased exponential moving-average smoothing.
//!
//! The accumulator starts at zero and is corrected by `1 - factor^(i+1)` at
//! each index, so early smoothed values converge to the local average
//! immediately instead of ramping up from zero. A factor of 0 is an exact
//! identity and constant input is exactly invariant under any factor.

use crate::data::sample::ScalarSample;

/// Highest accepted smoothing factor; the UI slider stops here and the
/// pipeline re-clamps incoming parameters.
pub const MAX_FACTOR: f64 = 0.99;

/// Smoothed values parallel to `samples`, one output per input.
///
/// Non-finite raw values pass through unsmoothed and leave the accumulator
/// untouched, so a single NaN sample cannot poison the rest of the series.
pub fn smooth(samples: &[ScalarSample], factor: f64) -> Vec<f64> {
    let factor = factor.clamp(0.0, MAX_FACTOR);
    if factor == 0.0 {
        return samples.iter().map(|s| s.value).collect();
    }
    let mut out = Vec::with_capacity(samples.len());
    let mut acc = 0.0_f64;
    let mut weight = 1.0_f64; // factor^(i+1), updated incrementally
    for s in samples {
        if !s.value.is_finite() {
            out.push(s.value);
            continue;
        }
        acc = acc * factor + (1.0 - factor) * s.value;
        weight *= factor;
        let debias = 1.0 - weight;
        out.push(if debias > 0.0 { acc / debias } else { s.value });
    }
    out
}

/// Population variance of the finite entries; used by tests to check that a
/// larger factor never produces a noisier series.
pub fn variance(values: &[f64]) -> f64 {
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() {
        return 0.0;
    }
    let mean = finite.iter().sum::<f64>() / finite.len() as f64;
    finite.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / finite.len() as f64
}
