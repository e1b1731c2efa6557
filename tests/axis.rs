use scalarboard::data::axis::transform;
use scalarboard::{ScalarSample, XAxis};

fn sample(step: u64, wall_time: f64) -> ScalarSample {
    ScalarSample::new(step, wall_time, 0.0)
}

#[test]
fn step_mode_uses_the_step() {
    let samples = [sample(0, 100.0), sample(10, 101.0), sample(25, 102.0)];
    assert_eq!(transform(&samples, XAxis::Step), vec![0.0, 10.0, 25.0]);
}

#[test]
fn wall_mode_uses_absolute_time() {
    let samples = [sample(0, 1_700_000_000.0), sample(1, 1_700_000_060.0)];
    assert_eq!(
        transform(&samples, XAxis::Wall),
        vec![1_700_000_000.0, 1_700_000_060.0]
    );
}

#[test]
fn relative_mode_starts_at_zero() {
    let samples = [
        sample(0, 1_700_000_000.0),
        sample(1, 1_700_000_030.0),
        sample(2, 1_700_000_090.0),
    ];
    let xs = transform(&samples, XAxis::Relative);
    assert_eq!(xs[0], 0.0, "first point must be exactly 0");
    assert_eq!(xs, vec![0.0, 30.0, 90.0]);
}

#[test]
fn relative_mode_clamps_clock_regressions() {
    let samples = [sample(0, 100.0), sample(1, 99.0)];
    let xs = transform(&samples, XAxis::Relative);
    assert!(xs.iter().all(|&x| x >= 0.0));
}

#[test]
fn empty_series_yields_empty_result() {
    for mode in XAxis::ALL {
        assert!(transform(&[], mode).is_empty());
    }
}

#[test]
fn ordering_is_preserved() {
    let samples = [sample(3, 10.0), sample(7, 20.0), sample(9, 30.0)];
    for mode in XAxis::ALL {
        assert_eq!(transform(&samples, mode).len(), samples.len());
    }
}
