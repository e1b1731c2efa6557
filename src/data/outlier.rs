//! Robust outlier exclusion based on the interquartile range.
//!
//! Excluded samples are removed from the derived series rather than clipped,
//! so chart scaling and smoothing operate only on the retained population.
//! The step/x coordinate of surviving samples is never altered.

use crate::data::sample::ScalarSample;

/// Inclusive value bounds `[Q1 - 1.5*IQR, Q3 + 1.5*IQR]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueBounds {
    pub low: f64,
    pub high: f64,
}

/// Quartile by linear interpolation over the sorted values, `q` in [0, 1].
fn quantile(sorted: &[f64], q: f64) -> f64 {
    debug_assert!(!sorted.is_empty());
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    if lo == hi {
        sorted[lo]
    } else {
        let frac = pos - lo as f64;
        sorted[lo] + (sorted[hi] - sorted[lo]) * frac
    }
}

/// Compute the IQR-based retention bounds for a series.
///
/// Returns `None` when the series has fewer than 4 samples (quartiles are
/// not meaningful) or when no finite values exist; callers treat `None` as
/// "keep everything".
pub fn robust_bounds(samples: &[ScalarSample]) -> Option<ValueBounds> {
    if samples.len() < 4 {
        return None;
    }
    let mut values: Vec<f64> = samples
        .iter()
        .map(|s| s.value)
        .filter(|v| v.is_finite())
        .collect();
    if values.len() < 4 {
        return None;
    }
    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let q1 = quantile(&values, 0.25);
    let q3 = quantile(&values, 0.75);
    let iqr = q3 - q1;
    Some(ValueBounds {
        low: q1 - 1.5 * iqr,
        high: q3 + 1.5 * iqr,
    })
}

/// Remove samples whose value falls outside the robust bounds.
///
/// Identity when `enabled` is false or when the series is too short for
/// quartiles. Non-finite values are always removed when filtering is on:
/// they cannot be compared against the bounds and would break scaling.
pub fn filter(samples: &[ScalarSample], enabled: bool) -> Vec<ScalarSample> {
    if !enabled {
        return samples.to_vec();
    }
    match robust_bounds(samples) {
        None => samples.to_vec(),
        Some(bounds) => samples
            .iter()
            .filter(|s| s.value.is_finite() && s.value >= bounds.low && s.value <= bounds.high)
            .copied()
            .collect(),
    }
}
