use scalarboard::data::outlier::{filter, robust_bounds};
use scalarboard::ScalarSample;

fn series(values: &[f64]) -> Vec<ScalarSample> {
    values
        .iter()
        .enumerate()
        .map(|(i, &v)| ScalarSample::new(i as u64, i as f64, v))
        .collect()
}

#[test]
fn disabled_is_identity() {
    let samples = series(&[1.0, 2.0, 100.0, 3.0]);
    assert_eq!(filter(&samples, false), samples);
}

#[test]
fn excludes_iqr_outliers() {
    // The spike at step 2 lies far outside [Q1 - 1.5*IQR, Q3 + 1.5*IQR] of
    // the remaining population and must be removed, not clipped.
    let samples = series(&[1.0, 2.0, 100.0, 3.0]);
    let filtered = filter(&samples, true);
    assert_eq!(filtered.len(), 3, "the outlier must be removed");
    assert!(
        filtered.iter().all(|s| s.value <= 3.0),
        "only the inlier population survives"
    );
    let steps: Vec<u64> = filtered.iter().map(|s| s.step).collect();
    assert_eq!(steps, vec![0, 1, 3], "steps of survivors are untouched");
}

#[test]
fn short_series_is_identity() {
    let samples = series(&[1.0, 1000.0, 2.0]);
    assert_eq!(
        filter(&samples, true),
        samples,
        "fewer than 4 samples: quartiles undefined, keep everything"
    );
    assert!(robust_bounds(&samples).is_none());
}

#[test]
fn filtering_is_idempotent() {
    let mut values: Vec<f64> = (0..20).map(|i| (i % 5) as f64).collect();
    values.push(1000.0);
    let samples = series(&values);
    let once = filter(&samples, true);
    assert_eq!(once.len(), 20, "only the spike is removed");
    let twice = filter(&once, true);
    assert_eq!(once, twice, "re-filtering the filtered series changes nothing");
}

#[test]
fn preserves_order_and_coordinates() {
    let samples = series(&[5.0, 4.0, 900.0, 6.0, 5.5]);
    let filtered = filter(&samples, true);
    for w in filtered.windows(2) {
        assert!(w[0].step < w[1].step, "filtering must not reorder");
    }
    for s in &filtered {
        let original = samples.iter().find(|o| o.step == s.step).unwrap();
        assert_eq!(s, original, "surviving samples are unmodified");
    }
}

#[test]
fn non_finite_values_are_dropped_when_enabled() {
    let mut samples = series(&[1.0, 2.0, 3.0, 4.0]);
    samples.push(ScalarSample::new(4, 4.0, f64::NAN));
    let filtered = filter(&samples, true);
    assert!(
        filtered.iter().all(|s| s.value.is_finite()),
        "NaN cannot be range-checked and must not reach scaling"
    );
}

#[test]
fn uniform_series_is_untouched() {
    let samples = series(&[2.0; 10]);
    assert_eq!(filter(&samples, true), samples);
}
