//! Run/tag model and the discovery-collaborator contract.
//!
//! Run and tag discovery (listing, filtering, deduplication) happens outside
//! this crate; the dashboard only consumes the [`TagFilterOutput`] shape and
//! treats it as already validated.

/// One tracked training execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    /// Stable identifier, unique across the listing.
    pub id: String,
    /// Human-readable name shown in legends and tooltips.
    pub label: String,
    /// Whether the run is still producing samples and should be polled.
    pub running: bool,
    /// Index into the chart color palette.
    pub color_index: usize,
}

impl Run {
    pub fn new<S: Into<String>>(id: S, color_index: usize) -> Self {
        let id = id.into();
        Self {
            label: id.clone(),
            id,
            running: false,
            color_index,
        }
    }
}

/// Metric name, shared across runs. A chart is keyed by one tag and renders
/// one series per selected run.
pub type Tag = String;

/// Output contract of the external run/tag discovery collaborator.
#[derive(Debug, Clone, Default)]
pub struct TagFilterOutput {
    pub runs: Vec<Run>,
    pub tags: Vec<Tag>,
    /// Ids of the currently selected runs, a subset of `runs`.
    pub selected_runs: Vec<String>,
    pub loading_runs: bool,
    pub loading_tags: bool,
}

impl TagFilterOutput {
    pub fn run(&self, id: &str) -> Option<&Run> {
        self.runs.iter().find(|r| r.id == id)
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected_runs.iter().any(|s| s == id)
    }
}
