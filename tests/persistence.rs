use scalarboard::persistence::DashboardStateSerde;
use scalarboard::{PipelineParams, TooltipSorting, XAxis};

#[test]
fn yaml_round_trip_preserves_state() {
    let state = DashboardStateSerde {
        params: PipelineParams {
            smoothing: 0.35,
            ignore_outliers: true,
            x_axis: XAxis::Relative,
            tooltip_sorting: TooltipSorting::Nearest,
        },
        selected_runs: vec!["train".to_string(), "baseline".to_string()],
        running: false,
    };
    let yaml = state.to_yaml().unwrap();
    let restored = DashboardStateSerde::from_yaml(&yaml).unwrap();
    assert_eq!(restored, state);
}

#[test]
fn reads_handwritten_yaml() {
    let yaml = "\
params:
  smoothing: 0.6
  ignore_outliers: false
  x_axis: step
  tooltip_sorting: nearest
selected_runs:
  - train
running: true
";
    let state = DashboardStateSerde::from_yaml(yaml).unwrap();
    assert_eq!(state.params.smoothing, 0.6);
    assert_eq!(state.params.x_axis, XAxis::Step);
    assert_eq!(state.params.tooltip_sorting, TooltipSorting::Nearest);
    assert_eq!(state.selected_runs, vec!["train"]);
    assert!(state.running);
}

#[test]
fn axis_variants_serialize_lowercase() {
    for (mode, text) in [
        (XAxis::Step, "step"),
        (XAxis::Relative, "relative"),
        (XAxis::Wall, "wall"),
    ] {
        let mut state = DashboardStateSerde::default();
        state.params.x_axis = mode;
        assert!(
            state.to_yaml().unwrap().contains(&format!("x_axis: {}", text)),
            "{:?} must serialize as {}",
            mode,
            text
        );
    }
}

#[test]
fn rejects_unknown_axis_value() {
    let yaml = "\
params:
  smoothing: 0.6
  ignore_outliers: false
  x_axis: sideways
  tooltip_sorting: default
selected_runs: []
running: true
";
    assert!(DashboardStateSerde::from_yaml(yaml).is_err());
}

#[test]
fn save_and_load_through_a_file() {
    let dir = std::env::temp_dir();
    let path = dir.join(format!("scalarboard_state_{}.yaml", std::process::id()));
    let state = DashboardStateSerde {
        params: PipelineParams::default(),
        selected_runs: vec!["train".to_string()],
        running: true,
    };
    state.save_to_file(&path).unwrap();
    let restored = DashboardStateSerde::load_from_file(&path).unwrap();
    let _ = std::fs::remove_file(&path);
    assert_eq!(restored, state);
}
