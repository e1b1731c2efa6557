//! Scalarboard crate root: re-exports and module wiring.
//!
//! A dashboard for scalar metrics logged during ML training runs, built on
//! egui/eframe. The crate splits into:
//! - `data`: raw sample storage and the pure pipeline stages (outlier
//!   filtering, smoothing, axis mapping, tooltip ranking)
//! - `pipeline`: the per-chart orchestrator with derived-series caching
//! - `fetch` / `live`: the sample-fetch collaborator interface and the
//!   poll workers that keep in-progress runs updating
//! - `app` / `chart`: the egui dashboard shell and per-tag chart panels
//!
//! Everything below `app`/`chart`/`look` is UI-free and testable headless.

pub mod app;
pub mod chart;
pub mod config;
pub mod data;
pub mod fetch;
pub mod live;
pub mod look;
pub mod persistence;
pub mod pipeline;
pub mod runs;

// Public re-exports for a compact external API
pub use app::{run_dashboard, ScalarDashboardApp};
pub use config::DashboardConfig;
pub use data::axis::XAxis;
pub use data::sample::{ScalarSample, SeriesKey, SeriesSnapshot};
pub use data::store::SampleStore;
pub use data::tooltip::{TooltipRow, TooltipSorting};
pub use fetch::{FetchBatch, FetchError, SampleFetcher};
pub use live::{LiveUpdateController, PollState};
pub use pipeline::{ChartData, PipelineParams, RenderedPoint, RenderedSeries, SeriesPipeline};
pub use runs::{Run, Tag, TagFilterOutput};
