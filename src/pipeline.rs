//! Series pipeline: raw samples to renderable chart series.
//!
//! For each selected run the pipeline derives
//! `snapshot -> outlier filter -> smoother -> axis transform` and caches the
//! result per run keyed by (store version, params). Recomputation therefore
//! only happens on parameter change, selection change, or new samples;
//! tooltip hovering reads the cached output and never re-enters the
//! pipeline.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::data::axis::{self, XAxis};
use crate::data::outlier;
use crate::data::smooth::{self, MAX_FACTOR};
use crate::data::store::SampleStore;
use crate::data::tooltip::TooltipSorting;
use crate::runs::Run;

/// User-adjustable pipeline parameters, one immutable value per render pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PipelineParams {
    /// EMA smoothing factor in `[0, 0.99]`; 0 disables smoothing.
    pub smoothing: f64,
    /// Exclude IQR outliers from derivation and scaling.
    pub ignore_outliers: bool,
    pub x_axis: XAxis,
    pub tooltip_sorting: TooltipSorting,
}

impl Default for PipelineParams {
    fn default() -> Self {
        Self {
            smoothing: 0.6,
            ignore_outliers: false,
            x_axis: XAxis::Step,
            tooltip_sorting: TooltipSorting::Default,
        }
    }
}

impl PipelineParams {
    /// Clamp out-of-range values to the supported domain. The UI clamps at
    /// the boundary already; the pipeline re-clamps rather than treating
    /// bad input as undefined behavior.
    pub fn clamped(mut self) -> Self {
        self.smoothing = if self.smoothing.is_finite() {
            self.smoothing.clamp(0.0, MAX_FACTOR)
        } else {
            0.0
        };
        self
    }

    /// Whether two parameter sets derive the same series geometry. Tooltip
    /// sorting only affects hover row ordering, never the rendered points,
    /// so it must not invalidate derived caches.
    fn geometry_eq(&self, other: &Self) -> bool {
        self.smoothing == other.smoothing
            && self.ignore_outliers == other.ignore_outliers
            && self.x_axis == other.x_axis
    }
}

/// One chart point: shared x, raw y and smoothed y.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderedPoint {
    pub x: f64,
    pub y_raw: f64,
    pub y_smoothed: f64,
}

/// The renderable series of one run within one chart.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedSeries {
    pub run_id: String,
    pub label: String,
    pub color_index: usize,
    pub points: Vec<RenderedPoint>,
    /// True while nothing has been ingested for this (run, tag) yet; the
    /// chart renders a loading placeholder instead of an empty line.
    pub loading: bool,
}

impl RenderedSeries {
    /// Smoothed value at the point nearest to `x`, for tooltip rows.
    pub fn nearest_value(&self, x: f64) -> Option<(f64, f64)> {
        let mut best: Option<(f64, f64)> = None;
        let mut best_d = f64::INFINITY;
        for p in &self.points {
            let d = (p.x - x).abs();
            if d < best_d {
                best_d = d;
                best = Some((p.x, p.y_smoothed));
            }
        }
        best
    }
}

/// Output of one pipeline pass over all selected runs of a chart.
#[derive(Debug, Clone, Default)]
pub struct ChartData {
    pub series: Vec<RenderedSeries>,
    /// Min/max x across all runs, for consistent chart scaling.
    pub x_domain: Option<(f64, f64)>,
    /// Min/max y across raw and smoothed values of the retained population
    /// (outliers excluded when filtering is on).
    pub y_domain: Option<(f64, f64)>,
}

struct CachedRun {
    version: u64,
    params: PipelineParams,
    series: RenderedSeries,
}

/// Per-chart orchestrator with per-run derived caches.
#[derive(Default)]
pub struct SeriesPipeline {
    cache: HashMap<String, CachedRun>,
    /// Pipeline passes that actually recomputed at least one run; used by
    /// tests to assert the caching behavior.
    recompute_count: u64,
}

impl SeriesPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn recompute_count(&self) -> u64 {
        self.recompute_count
    }

    /// Derive the chart data for `tag` across the selected `runs`.
    ///
    /// Runs whose series is cached at the current store version and params
    /// are reused untouched. Runs with no data yet are rendered as loading
    /// placeholders; one missing run never prevents the others from
    /// rendering.
    pub fn render(
        &mut self,
        store: &SampleStore,
        runs: &[Run],
        tag: &str,
        params: PipelineParams,
    ) -> ChartData {
        let params = params.clamped();
        // Drop cache entries for deselected runs.
        self.cache.retain(|id, _| runs.iter().any(|r| &r.id == id));

        let mut recomputed = false;
        let mut series_out = Vec::with_capacity(runs.len());
        for run in runs {
            let snapshot = store.snapshot(&run.id, tag);
            let version = snapshot.as_ref().map(|s| s.version()).unwrap_or(0);
            let cached_ok = self
                .cache
                .get(&run.id)
                .map(|c| c.version == version && c.params.geometry_eq(&params))
                .unwrap_or(false);
            if !cached_ok {
                let series = derive_run(run, snapshot.as_ref().map(|s| s.samples()), params);
                self.cache.insert(
                    run.id.clone(),
                    CachedRun {
                        version,
                        params,
                        series,
                    },
                );
                recomputed = true;
            }
            // Unwrap is fine: the entry was inserted above when missing.
            series_out.push(self.cache[&run.id].series.clone());
        }
        if recomputed {
            self.recompute_count += 1;
        }

        let mut data = ChartData {
            series: series_out,
            x_domain: None,
            y_domain: None,
        };
        for s in &data.series {
            for p in &s.points {
                extend_domain(&mut data.x_domain, p.x);
                if p.y_raw.is_finite() {
                    extend_domain(&mut data.y_domain, p.y_raw);
                }
                if p.y_smoothed.is_finite() {
                    extend_domain(&mut data.y_domain, p.y_smoothed);
                }
            }
        }
        data
    }
}

fn extend_domain(domain: &mut Option<(f64, f64)>, v: f64) {
    *domain = Some(match *domain {
        None => (v, v),
        Some((lo, hi)) => (lo.min(v), hi.max(v)),
    });
}

fn derive_run(
    run: &Run,
    samples: Option<&[crate::data::sample::ScalarSample]>,
    params: PipelineParams,
) -> RenderedSeries {
    let Some(samples) = samples else {
        return RenderedSeries {
            run_id: run.id.clone(),
            label: run.label.clone(),
            color_index: run.color_index,
            points: Vec::new(),
            loading: true,
        };
    };
    let filtered = outlier::filter(samples, params.ignore_outliers);
    let smoothed = smooth::smooth(&filtered, params.smoothing);
    let xs = axis::transform(&filtered, params.x_axis);
    let points = filtered
        .iter()
        .zip(xs)
        .zip(smoothed)
        .map(|((s, x), y_smoothed)| RenderedPoint {
            x,
            y_raw: s.value,
            y_smoothed,
        })
        .collect();
    RenderedSeries {
        run_id: run.id.clone(),
        label: run.label.clone(),
        color_index: run.color_index,
        points,
        loading: false,
    }
}
