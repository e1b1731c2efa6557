use scalarboard::data::smooth::{smooth, variance};
use scalarboard::ScalarSample;

fn series(values: &[f64]) -> Vec<ScalarSample> {
    values
        .iter()
        .enumerate()
        .map(|(i, &v)| ScalarSample::new(i as u64, i as f64, v))
        .collect()
}

/// Deterministic noisy sequence around 1.0.
fn noisy_series(n: usize) -> Vec<ScalarSample> {
    let mut state: u64 = 42;
    let mut values = Vec::with_capacity(n);
    for _ in 0..n {
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        let noise = ((state >> 33) as f64 / (1u64 << 31) as f64) - 0.5;
        values.push(1.0 + noise);
    }
    series(&values)
}

#[test]
fn factor_zero_is_identity() {
    let samples = noisy_series(50);
    let out = smooth(&samples, 0.0);
    for (s, y) in samples.iter().zip(&out) {
        assert_eq!(s.value, *y, "factor 0 must leave every value untouched");
    }
}

#[test]
fn constant_input_is_invariant() {
    let samples = series(&[10.0, 10.0, 10.0]);
    let out = smooth(&samples, 0.6);
    for y in out {
        assert!(
            (y - 10.0).abs() < 1e-9,
            "constant input must stay constant, got {}",
            y
        );
    }
}

#[test]
fn variance_is_monotone_in_factor() {
    let samples = noisy_series(200);
    let factors = [0.0, 0.3, 0.6, 0.9];
    let variances: Vec<f64> = factors
        .iter()
        .map(|&f| variance(&smooth(&samples, f)))
        .collect();
    for w in variances.windows(2) {
        assert!(
            w[1] <= w[0] + 1e-12,
            "larger factor must not increase variance: {:?}",
            variances
        );
    }
}

#[test]
fn debiasing_keeps_early_values_near_the_signal() {
    // Without bias correction the first smoothed value of [5.0, ...] under a
    // large factor would sit near (1-f)*5 = 0.5; debiased it is exactly 5.
    let samples = series(&[5.0, 5.1, 4.9, 5.0]);
    let out = smooth(&samples, 0.9);
    assert!(
        (out[0] - 5.0).abs() < 1e-9,
        "first smoothed value must equal the first raw value, got {}",
        out[0]
    );
}

#[test]
fn output_is_parallel_to_input() {
    let samples = noisy_series(17);
    assert_eq!(smooth(&samples, 0.5).len(), samples.len());
    assert!(smooth(&[], 0.5).is_empty());
}

#[test]
fn non_finite_values_pass_through() {
    let mut samples = series(&[1.0, 2.0]);
    samples.push(ScalarSample::new(2, 2.0, f64::NAN));
    samples.push(ScalarSample::new(3, 3.0, 3.0));
    let out = smooth(&samples, 0.5);
    assert!(out[2].is_nan(), "NaN input stays NaN in the output");
    assert!(
        out[3].is_finite(),
        "a NaN sample must not poison later smoothed values"
    );
}

#[test]
fn out_of_range_factor_is_clamped() {
    let samples = noisy_series(20);
    let clamped = smooth(&samples, 1.5);
    let max = smooth(&samples, 0.99);
    assert_eq!(clamped, max, "factors above the maximum clamp to it");
}
