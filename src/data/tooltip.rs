//! Tooltip row ordering for the hovered x-position of a chart.

use serde::{Deserialize, Serialize};

/// Ordering policy for tooltip rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TooltipSorting {
    /// Stable insertion order (order the runs were selected in).
    Default,
    /// Sort by value, largest first.
    Descending,
    /// Sort by value, smallest first.
    Ascending,
    /// Sort by distance to the y-value under the pointer.
    Nearest,
}

impl Default for TooltipSorting {
    fn default() -> Self {
        TooltipSorting::Default
    }
}

impl TooltipSorting {
    pub const ALL: [TooltipSorting; 4] = [
        TooltipSorting::Default,
        TooltipSorting::Descending,
        TooltipSorting::Ascending,
        TooltipSorting::Nearest,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            TooltipSorting::Default => "Default",
            TooltipSorting::Descending => "Descending",
            TooltipSorting::Ascending => "Ascending",
            TooltipSorting::Nearest => "Nearest",
        }
    }
}

/// One tooltip line: the value of a single run's series at the hovered x.
#[derive(Debug, Clone, PartialEq)]
pub struct TooltipRow {
    pub run_id: String,
    pub label: String,
    pub value: f64,
    pub color_index: usize,
    /// Display position assigned by [`rank`], 0 = topmost.
    pub rank: usize,
}

fn value_cmp(a: f64, b: f64) -> std::cmp::Ordering {
    a.partial_cmp(&b).unwrap_or(std::cmp::Ordering::Equal)
}

/// Order tooltip rows by `sorting` and assign ranks.
///
/// All sorts are stable: ties keep insertion order, which is a correctness
/// requirement so the tooltip does not flicker between frames. `Nearest`
/// without a cursor value falls back to insertion order rather than failing.
pub fn rank(
    mut rows: Vec<TooltipRow>,
    sorting: TooltipSorting,
    cursor_value: Option<f64>,
) -> Vec<TooltipRow> {
    match sorting {
        TooltipSorting::Default => {}
        TooltipSorting::Ascending => rows.sort_by(|a, b| value_cmp(a.value, b.value)),
        TooltipSorting::Descending => rows.sort_by(|a, b| value_cmp(b.value, a.value)),
        TooltipSorting::Nearest => {
            if let Some(cursor) = cursor_value {
                rows.sort_by(|a, b| {
                    value_cmp((a.value - cursor).abs(), (b.value - cursor).abs())
                });
            }
        }
    }
    for (i, row) in rows.iter_mut().enumerate() {
        row.rank = i;
    }
    rows
}
