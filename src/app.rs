//! The dashboard application shell: aside controls, chart grid, live update
//! wiring.

use std::collections::HashMap;
use std::sync::Arc;

use crate::chart::ChartPanel;
use crate::config::DashboardConfig;
use crate::data::sample::SeriesKey;
use crate::data::store::SampleStore;
use crate::data::tooltip::TooltipSorting;
use crate::fetch::SampleFetcher;
use crate::live::LiveUpdateController;
use crate::persistence::DashboardStateSerde;
use crate::pipeline::PipelineParams;
use crate::runs::{TagFilterOutput, Tag};

/// Scalar metrics dashboard as an eframe application.
///
/// The discovery listing (runs + tags) is supplied by the external
/// collaborator at construction; samples arrive through the
/// [`SampleFetcher`] driven by the live update controller.
pub struct ScalarDashboardApp {
    store: SampleStore,
    live: LiveUpdateController,
    fetcher: Arc<dyn SampleFetcher>,
    discovery: TagFilterOutput,
    charts: Vec<ChartPanel>,
    params: PipelineParams,
    /// Global "keep polling" toggle; AND-ed with each run's own flag.
    running: bool,
    config: DashboardConfig,
}

impl ScalarDashboardApp {
    pub fn new(
        fetcher: Arc<dyn SampleFetcher>,
        discovery: TagFilterOutput,
        config: DashboardConfig,
    ) -> Self {
        let charts = discovery
            .tags
            .iter()
            .cloned()
            .map(ChartPanel::new)
            .collect();
        let mut app = Self {
            store: SampleStore::new(),
            live: LiveUpdateController::new(
                config.poll_interval,
                config.failure_banner_threshold,
            ),
            fetcher,
            discovery,
            charts,
            params: config.initial_params.clamped(),
            running: true,
            config,
        };
        app.restore_state();
        app
    }

    /// Restore user state from the configured state file, if any.
    fn restore_state(&mut self) {
        let Some(path) = &self.config.state_file else {
            return;
        };
        if !path.exists() {
            return;
        }
        match DashboardStateSerde::load_from_file(path) {
            Ok(state) => {
                self.params = state.params.clamped();
                self.running = state.running;
                // Restore the selection, ignoring runs that no longer exist.
                self.discovery.selected_runs = state
                    .selected_runs
                    .into_iter()
                    .filter(|id| self.discovery.run(id).is_some())
                    .collect();
            }
            Err(err) => log::warn!("could not restore state from {:?}: {}", path, err),
        }
    }

    fn persist_state(&self) {
        let Some(path) = &self.config.state_file else {
            return;
        };
        let state = DashboardStateSerde {
            params: self.params,
            selected_runs: self.discovery.selected_runs.clone(),
            running: self.running,
        };
        if let Err(err) = state.save_to_file(path) {
            log::warn!("could not save state to {:?}: {}", path, err);
        }
    }

    pub fn params(&self) -> PipelineParams {
        self.params
    }

    pub fn store(&self) -> &SampleStore {
        &self.store
    }

    /// Drain pending poll results into the store and bring the watcher set
    /// back in line with the current selection. Called once per frame.
    pub fn process_live_updates(&mut self) {
        let report = self.live.drain(&mut self.store);
        for key in &report.finished {
            log::info!("run {} finished; polling stopped", key.run);
            // Clear the running flag so the reconcile below does not
            // immediately respawn a watcher for the finished run.
            if let Some(run) = self.discovery.runs.iter_mut().find(|r| r.id == key.run) {
                run.running = false;
            }
        }
        self.reconcile_watchers();
    }

    /// Start/stop watchers so that exactly the selected, running runs are
    /// polled for every visible tag. Called every frame; watch/stop are
    /// idempotent.
    fn reconcile_watchers(&mut self) {
        for run in &self.discovery.runs {
            let selected = self.discovery.is_selected(&run.id);
            for tag in &self.discovery.tags {
                let key = SeriesKey::new(run.id.as_str(), tag.as_str());
                let should_poll = selected && self.running && run.running;
                if should_poll {
                    let start_step = self.store.last_step(&run.id, tag);
                    self.live
                        .watch(Arc::clone(&self.fetcher), key, true, start_step);
                } else {
                    self.live.stop(&key);
                }
            }
        }
    }

    fn selected_runs(&self) -> Vec<crate::runs::Run> {
        self.discovery
            .runs
            .iter()
            .filter(|r| self.discovery.is_selected(&r.id))
            .cloned()
            .collect()
    }

    /// Whether any selected run's polling for `tag` keeps failing.
    fn tag_has_persistent_failures(&self, tag: &Tag) -> bool {
        self.discovery
            .selected_runs
            .iter()
            .any(|run| {
                self.live
                    .has_persistent_failures(&SeriesKey::new(run.as_str(), tag.as_str()))
            })
    }

    fn render_aside(&mut self, ui: &mut egui::Ui) {
        ui.heading("Runs");
        let run_ids: Vec<String> =
            self.discovery.runs.iter().map(|r| r.id.clone()).collect();
        for id in run_ids {
            let mut selected = self.discovery.is_selected(&id);
            if ui.checkbox(&mut selected, &id).changed() {
                if selected {
                    self.discovery.selected_runs.push(id.clone());
                } else {
                    self.discovery.selected_runs.retain(|s| s != &id);
                    self.live.stop_run(&id);
                }
            }
        }
        ui.checkbox(&mut self.running, "Running");

        ui.separator();
        ui.checkbox(&mut self.params.ignore_outliers, "Ignore outliers");

        ui.horizontal(|ui| {
            ui.label("Tooltip sorting");
            egui::ComboBox::from_id_salt("tooltip_sorting")
                .selected_text(self.params.tooltip_sorting.label())
                .show_ui(ui, |ui| {
                    for sorting in TooltipSorting::ALL {
                        ui.selectable_value(
                            &mut self.params.tooltip_sorting,
                            sorting,
                            sorting.label(),
                        );
                    }
                });
        });

        ui.separator();
        ui.label("Smoothing");
        ui.add(
            egui::Slider::new(&mut self.params.smoothing, 0.0..=0.99)
                .step_by(0.01)
                .fixed_decimals(2),
        );

        ui.separator();
        ui.label("X-axis");
        for axis in crate::data::axis::XAxis::ALL {
            ui.radio_value(&mut self.params.x_axis, axis, axis.label());
        }
    }

    fn render_charts(&mut self, ui: &mut egui::Ui) {
        if self.discovery.loading_runs || self.discovery.loading_tags {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label("Loading runs…");
            });
            return;
        }
        if self.discovery.runs.is_empty() {
            ui.weak("No runs found");
            return;
        }
        let runs = self.selected_runs();
        let params = self.params.clamped();
        let banners: HashMap<String, bool> = self
            .discovery
            .tags
            .iter()
            .map(|t| (t.clone(), self.tag_has_persistent_failures(t)))
            .collect();
        egui::ScrollArea::vertical().show(ui, |ui| {
            for chart in &mut self.charts {
                chart.update_data(&self.store, &runs, params);
                let banner = banners.get(chart.tag()).copied().unwrap_or(false);
                chart.show(ui, &self.config, banner);
                ui.add_space(12.0);
            }
        });
    }
}

impl Drop for ScalarDashboardApp {
    fn drop(&mut self) {
        self.persist_state();
    }
}

impl eframe::App for ScalarDashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Ingest poll results first so this frame renders fresh data.
        self.process_live_updates();

        egui::SidePanel::right("dashboard_aside")
            .resizable(true)
            .show(ctx, |ui| self.render_aside(ui));
        egui::CentralPanel::default().show(ctx, |ui| self.render_charts(ui));

        // Wake up for the next poll tick even without user input.
        ctx.request_repaint_after(self.config.poll_interval);
    }
}

/// Run the dashboard as a native window until it is closed.
pub fn run_dashboard(
    fetcher: Arc<dyn SampleFetcher>,
    discovery: TagFilterOutput,
    config: DashboardConfig,
) -> eframe::Result<()> {
    let native_options = config.native_options.clone().unwrap_or_default();
    let title = config.title.clone();
    eframe::run_native(
        &title,
        native_options,
        Box::new(move |_cc| Ok(Box::new(ScalarDashboardApp::new(fetcher, discovery, config)))),
    )
}
