//! Dashboard configuration.

use std::time::Duration;

use crate::pipeline::PipelineParams;

// ─────────────────────────────────────────────────────────────────────────────
// DashboardConfig
// ─────────────────────────────────────────────────────────────────────────────

/// Top-level configuration for the scalar dashboard.
pub struct DashboardConfig {
    // ── Live updates ─────────────────────────────────────────────────────────
    /// Interval between polls of a running series.
    pub poll_interval: Duration,
    /// Consecutive poll failures after which the chart shows an error banner.
    pub failure_banner_threshold: u32,

    // ── Pipeline defaults ────────────────────────────────────────────────────
    /// Initial user parameters (smoothing, outliers, axis, tooltip order).
    pub initial_params: PipelineParams,

    // ── Chart appearance ─────────────────────────────────────────────────────
    /// Render the raw (unsmoothed) line at reduced alpha behind the
    /// smoothed one.
    pub show_raw_line: bool,
    /// Show the per-chart legend.
    pub show_legend: bool,

    // ── Persistence ──────────────────────────────────────────────────────────
    /// YAML file the user state (params, selection, running) is loaded from
    /// on start and saved to on close. `None` disables persistence.
    pub state_file: Option<std::path::PathBuf>,

    // ── Window / chrome ──────────────────────────────────────────────────────
    /// Native window title.
    pub title: String,
    /// Optional eframe native-window options.
    pub native_options: Option<eframe::NativeOptions>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(15),
            failure_banner_threshold: 3,
            initial_params: PipelineParams::default(),
            show_raw_line: true,
            show_legend: true,
            state_file: None,
            title: "Scalarboard".to_string(),
            native_options: None,
        }
    }
}
