//! Demo: a synthetic training run streaming loss/accuracy into the dashboard.
//!
//! What it demonstrates
//! - Implementing `SampleFetcher` for an in-process sample source.
//! - Live polling: the "train" run keeps producing samples while the
//!   dashboard is open; the "baseline" run is a finished recording.
//!
//! How to run
//! ```bash
//! cargo run --example synthetic_training
//! ```

use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use scalarboard::{
    run_dashboard, DashboardConfig, FetchBatch, FetchError, Run, SampleFetcher, ScalarSample,
    TagFilterOutput,
};

fn now_secs() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or(0.0)
}

/// Deterministic pseudo-noise so the curves look like real training.
fn noise(step: u64) -> f64 {
    let x = step.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
    ((x >> 33) as f64 / (1u64 << 31) as f64) - 0.5
}

struct SyntheticTrainer {
    started: f64,
}

impl SyntheticTrainer {
    fn sample(&self, run: &str, tag: &str, step: u64) -> ScalarSample {
        let t = step as f64;
        let offset = if run == "baseline" { 0.3 } else { 0.0 };
        let value = match tag {
            "loss" => offset + 2.5 * (-t / 150.0).exp() + 0.08 * noise(step),
            _ => (1.0 - offset * 0.5) * (1.0 - (-t / 200.0).exp()) + 0.03 * noise(step + 7),
        };
        ScalarSample::new(step, self.started + t * 0.5, value)
    }
}

impl SampleFetcher for SyntheticTrainer {
    fn fetch(
        &self,
        run: &str,
        tag: &str,
        start_step: Option<u64>,
    ) -> Result<FetchBatch, FetchError> {
        // "train" advances with wall time; "baseline" is a finished run.
        let (last_step, finished) = if run == "baseline" {
            (300, true)
        } else {
            (((now_secs() - self.started) * 2.0) as u64, false)
        };
        let from = start_step.map(|s| s + 1).unwrap_or(0);
        let samples = (from..=last_step)
            .map(|step| self.sample(run, tag, step))
            .collect();
        Ok(FetchBatch { samples, finished })
    }
}

fn main() -> eframe::Result<()> {
    env_logger::init();

    let fetcher = Arc::new(SyntheticTrainer { started: now_secs() });
    let discovery = TagFilterOutput {
        runs: vec![
            Run {
                id: "train".into(),
                label: "train".into(),
                running: true,
                color_index: 0,
            },
            Run {
                id: "baseline".into(),
                label: "baseline".into(),
                running: true,
                color_index: 1,
            },
        ],
        tags: vec!["loss".into(), "accuracy".into()],
        selected_runs: vec!["train".into(), "baseline".into()],
        loading_runs: false,
        loading_tags: false,
    };
    let config = DashboardConfig {
        poll_interval: Duration::from_secs(1),
        title: "Scalarboard demo".into(),
        ..Default::default()
    };
    run_dashboard(fetcher, discovery, config)
}
