//! X-axis coordinate systems for scalar charts.

use serde::{Deserialize, Serialize};

use crate::data::sample::ScalarSample;

/// How the x-coordinate of a rendered point is derived from a sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum XAxis {
    /// x = training step.
    Step,
    /// x = elapsed wall time since the series' first sample, in seconds.
    Relative,
    /// x = absolute wall time, in seconds since the UNIX epoch.
    Wall,
}

impl Default for XAxis {
    fn default() -> Self {
        XAxis::Step
    }
}

impl XAxis {
    pub const ALL: [XAxis; 3] = [XAxis::Step, XAxis::Relative, XAxis::Wall];

    /// UI label for the axis choice.
    pub fn label(&self) -> &'static str {
        match self {
            XAxis::Step => "Step",
            XAxis::Relative => "Relative",
            XAxis::Wall => "Wall time",
        }
    }
}

/// X-coordinates for `samples` under `mode`, parallel to the input.
///
/// Only the coordinate mapping changes; ordering is preserved. An empty
/// series yields an empty result. In relative mode the first point is
/// exactly 0 and later points are clamped non-negative in case of a
/// non-monotonic wall clock.
pub fn transform(samples: &[ScalarSample], mode: XAxis) -> Vec<f64> {
    let first_wall = samples.first().map(|s| s.wall_time).unwrap_or(0.0);
    samples
        .iter()
        .map(|s| match mode {
            XAxis::Step => s.step as f64,
            XAxis::Wall => s.wall_time,
            XAxis::Relative => (s.wall_time - first_wall).max(0.0),
        })
        .collect()
}
