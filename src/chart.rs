//! Per-tag chart panel: renders the pipeline output and the hover tooltip.

use chrono::Local;
use egui_plot::{Legend, Line, Plot};

use crate::config::DashboardConfig;
use crate::data::axis::XAxis;
use crate::data::store::SampleStore;
use crate::data::tooltip::{self, TooltipRow};
use crate::look::RunLook;
use crate::pipeline::{ChartData, PipelineParams, SeriesPipeline};
use crate::runs::{Run, Tag};

/// One chart: a tag rendered as one series per selected run.
pub struct ChartPanel {
    tag: Tag,
    pipeline: SeriesPipeline,
    data: ChartData,
    params: PipelineParams,
}

impl ChartPanel {
    pub fn new(tag: Tag) -> Self {
        Self {
            tag,
            pipeline: SeriesPipeline::new(),
            data: ChartData::default(),
            params: PipelineParams::default(),
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Re-derive the chart data. Cheap when nothing changed: the pipeline
    /// caches per run and only recomputes on new samples or new params.
    pub fn update_data(&mut self, store: &SampleStore, runs: &[Run], params: PipelineParams) {
        self.params = params;
        self.data = self.pipeline.render(store, runs, &self.tag, params);
    }

    /// Render the chart. `error_banner` is set by the app when polling for
    /// one of the runs keeps failing.
    pub fn show(&mut self, ui: &mut egui::Ui, config: &DashboardConfig, error_banner: bool) {
        ui.strong(self.tag.as_str());
        if error_banner {
            ui.colored_label(
                egui::Color32::from_rgb(214, 39, 40),
                "Live updates are failing; showing last known data",
            );
        }

        let any_loading = self.data.series.iter().any(|s| s.loading);
        let all_empty = self.data.series.iter().all(|s| s.points.is_empty());
        if all_empty {
            if any_loading {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label("Loading…");
                });
            } else {
                ui.weak("No data");
            }
            return;
        }

        let mut plot = Plot::new(format!("scalar_chart_{}", self.tag))
            .height(260.0)
            .allow_scroll(false)
            .x_axis_formatter(x_formatter(self.params.x_axis));
        if config.show_legend {
            plot = plot.legend(Legend::default());
        }

        let data = &self.data;
        let y_domain = data.y_domain;
        let show_raw = config.show_raw_line && self.params.smoothing > 0.0;
        let resp = plot.show(ui, |plot_ui| {
            if let Some((lo, hi)) = y_domain {
                if lo < hi {
                    let space = (hi - lo) * 0.05;
                    plot_ui.set_plot_bounds_y(lo - space..=hi + space);
                }
            }
            for series in &data.series {
                if series.points.is_empty() {
                    continue;
                }
                let look = RunLook::new(series.color_index);
                if show_raw {
                    let raw_pts: Vec<[f64; 2]> =
                        series.points.iter().map(|p| [p.x, p.y_raw]).collect();
                    // Empty name keeps the raw shadow out of the legend.
                    let raw = Line::new("", raw_pts)
                        .color(look.raw_color())
                        .width(look.width);
                    plot_ui.line(raw);
                }
                let pts: Vec<[f64; 2]> = series
                    .points
                    .iter()
                    .map(|p| [p.x, p.y_smoothed])
                    .collect();
                let line = Line::new(series.label.as_str(), pts)
                    .color(look.color)
                    .width(look.width)
                    .style(look.style);
                plot_ui.line(line);
            }
            plot_ui.pointer_coordinate()
        });

        // The tooltip only reads the cached chart data; it never re-enters
        // the pipeline.
        if resp.response.hovered() {
            if let Some(pointer) = resp.inner {
                let rows = self.tooltip_rows(pointer.x, Some(pointer.y));
                if !rows.is_empty() {
                    resp.response.clone().on_hover_ui_at_pointer(|ui| {
                        for row in &rows {
                            let color = RunLook::alloc_color(row.color_index);
                            ui.horizontal(|ui| {
                                ui.colored_label(color, "●");
                                ui.label(&row.label);
                                ui.monospace(format!("{:.6}", row.value));
                            });
                        }
                    });
                }
            }
        }
    }

    /// Tooltip rows at the hovered x, ordered by the current sorting policy.
    pub fn tooltip_rows(&self, x: f64, cursor_value: Option<f64>) -> Vec<TooltipRow> {
        let rows: Vec<TooltipRow> = self
            .data
            .series
            .iter()
            .filter_map(|s| {
                let (_, value) = s.nearest_value(x)?;
                Some(TooltipRow {
                    run_id: s.run_id.clone(),
                    label: s.label.clone(),
                    value,
                    color_index: s.color_index,
                    rank: 0,
                })
            })
            .collect();
        tooltip::rank(rows, self.params.tooltip_sorting, cursor_value)
    }
}

fn x_formatter(
    mode: XAxis,
) -> impl Fn(egui_plot::GridMark, &std::ops::RangeInclusive<f64>) -> String {
    move |mark, _range| {
        let v = mark.value;
        match mode {
            XAxis::Step => format!("{}", v.round() as i64),
            XAxis::Relative => {
                if v >= 3600.0 {
                    format!("{:.1}h", v / 3600.0)
                } else if v >= 60.0 {
                    format!("{:.1}m", v / 60.0)
                } else {
                    format!("{:.0}s", v)
                }
            }
            XAxis::Wall => {
                let secs = v as i64;
                let nsecs = ((v - secs as f64) * 1e9) as u32;
                match chrono::DateTime::from_timestamp(secs, nsecs) {
                    Some(dt) => dt.with_timezone(&Local).format("%H:%M:%S").to_string(),
                    None => format!("{:.0}", v),
                }
            }
        }
    }
}
