use scalarboard::fetch::parse_samples;
use scalarboard::ScalarSample;

#[test]
fn parses_object_records() {
    let body = r#"[
        {"step": 0, "wallTime": 1700000000.5, "value": 0.9},
        {"step": 1, "wallTime": 1700000060.0, "value": 0.7}
    ]"#;
    let samples = parse_samples(body).unwrap();
    assert_eq!(
        samples,
        vec![
            ScalarSample::new(0, 1_700_000_000.5, 0.9),
            ScalarSample::new(1, 1_700_000_060.0, 0.7),
        ]
    );
}

#[test]
fn accepts_snake_case_wall_time() {
    let body = r#"[{"step": 4, "wall_time": 12.0, "value": 1.5}]"#;
    let samples = parse_samples(body).unwrap();
    assert_eq!(samples, vec![ScalarSample::new(4, 12.0, 1.5)]);
}

#[test]
fn parses_legacy_triples() {
    // Wire order of the triple form is [wall_time, step, value].
    let body = "[[1700000000.0, 0, 0.9], [1700000060.0, 1, 0.7]]";
    let samples = parse_samples(body).unwrap();
    assert_eq!(samples.len(), 2);
    assert_eq!(samples[0].step, 0);
    assert_eq!(samples[0].wall_time, 1_700_000_000.0);
    assert_eq!(samples[1].value, 0.7);
}

#[test]
fn drops_malformed_records_but_keeps_the_rest() {
    let body = r#"[
        {"step": 0, "wallTime": 10.0, "value": 1.0},
        {"wallTime": 11.0, "value": 2.0},
        {"step": -3, "wallTime": 12.0, "value": 3.0},
        {"step": "two", "wallTime": 13.0, "value": 4.0},
        {"step": 5, "wallTime": 14.0, "value": 5.0}
    ]"#;
    let samples = parse_samples(body).unwrap();
    let steps: Vec<u64> = samples.iter().map(|s| s.step).collect();
    assert_eq!(
        steps,
        vec![0, 5],
        "missing, negative and mistyped steps are dropped, valid records survive"
    );
}

#[test]
fn fractional_triple_step_is_dropped() {
    let body = "[[10.0, 1.5, 0.9], [11.0, 2.0, 0.8]]";
    let samples = parse_samples(body).unwrap();
    assert_eq!(samples.len(), 1);
    assert_eq!(samples[0].step, 2);
}

#[test]
fn unparseable_body_is_an_error() {
    assert!(parse_samples("not json").is_err());
    assert!(parse_samples("{\"step\": 1}").is_err(), "top level must be an array");
}

#[test]
fn empty_array_yields_no_samples() {
    assert!(parse_samples("[]").unwrap().is_empty());
}
