//! Per-run chart styling.

use egui::Color32;
use egui_plot::LineStyle;

/// The visual presentation of one run's lines in a chart.
#[derive(Debug, Clone)]
pub struct RunLook {
    pub color: Color32,
    pub width: f32,
    pub style: LineStyle,
    /// Alpha applied to the raw (unsmoothed) companion line.
    pub raw_alpha: u8,
}

impl Default for RunLook {
    fn default() -> Self {
        Self {
            color: Color32::GRAY,
            width: 1.5,
            style: LineStyle::Solid,
            raw_alpha: 60,
        }
    }
}

impl RunLook {
    /// Look for a run with the given palette index.
    pub fn new(color_index: usize) -> Self {
        Self {
            color: Self::alloc_color(color_index),
            ..Default::default()
        }
    }

    /// Allocate a distinct color for the given run index.
    pub fn alloc_color(index: usize) -> Color32 {
        const PALETTE: [Color32; 10] = [
            Color32::from_rgb(31, 119, 180),
            Color32::from_rgb(255, 127, 14),
            Color32::from_rgb(44, 160, 44),
            Color32::from_rgb(214, 39, 40),
            Color32::from_rgb(148, 103, 189),
            Color32::from_rgb(140, 86, 75),
            Color32::from_rgb(227, 119, 194),
            Color32::from_rgb(127, 127, 127),
            Color32::from_rgb(188, 189, 34),
            Color32::from_rgb(23, 190, 207),
        ];
        PALETTE[index % PALETTE.len()]
    }

    /// The raw-line color: the run color with reduced alpha.
    pub fn raw_color(&self) -> Color32 {
        Color32::from_rgba_unmultiplied(
            self.color.r(),
            self.color.g(),
            self.color.b(),
            self.raw_alpha,
        )
    }
}
