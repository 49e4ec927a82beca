/// Chart renderers.
///
/// Each strategy is split into a pure layout step (testable, no egui
/// context needed) and a paint step that draws the layout into a `Ui`.
///
/// ```text
///   Series + RenderSpec
///        │
///        ├── bar          2D categorical bars, rotated labels
///        ├── timeline     value over time, line + markers (egui_plot)
///        └── histogram3d  projected 3D bars, gradient, top-N, thinning
/// ```

pub mod bar;
pub mod histogram3d;
pub mod projection;
pub mod timeline;

use serde::Deserialize;

use crate::theme::Theme;

// ---------------------------------------------------------------------------
// Chart kind
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ChartKind {
    /// 2D categorical bar chart.
    Bar,
    /// Styled 3D categorical histogram.
    #[value(name = "histogram3d")]
    Histogram3d,
    /// Value-over-time line chart.
    Timeline,
}

impl ChartKind {
    pub fn label(self) -> &'static str {
        match self {
            ChartKind::Bar => "Bar chart",
            ChartKind::Histogram3d => "3D histogram",
            ChartKind::Timeline => "Time series",
        }
    }

    /// Kinds that can draw a series with the given key type.
    pub fn available(temporal: bool) -> &'static [ChartKind] {
        if temporal {
            &[ChartKind::Timeline, ChartKind::Bar, ChartKind::Histogram3d]
        } else {
            &[ChartKind::Bar, ChartKind::Histogram3d]
        }
    }
}

// ---------------------------------------------------------------------------
// RenderSpec – per-invocation render configuration
// ---------------------------------------------------------------------------

/// Settings specific to the 3D histogram. Every toggle is independent.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HistogramSpec {
    /// Camera elevation above the ground plane, in degrees.
    pub elevation: f32,
    /// Camera rotation around the vertical axis, in degrees.
    pub azimuth: f32,
    /// Bar footprint along the category axis (1.0 = touching bars).
    pub bar_width: f32,
    pub bar_depth: f32,
    /// Above this many categories only every k-th tick label is shown.
    pub label_threshold: usize,
    /// Number of largest bars to mark.
    pub top_n: usize,
    pub shadow: bool,
    pub gradient: bool,
    pub annotate: bool,
    /// Shadow displacement in world units along both ground axes.
    pub shadow_offset: f32,
    pub shadow_alpha: f32,
}

impl Default for HistogramSpec {
    fn default() -> Self {
        Self {
            elevation: 30.0,
            azimuth: -60.0,
            bar_width: 0.6,
            bar_depth: 0.6,
            label_threshold: 20,
            top_n: 3,
            shadow: true,
            gradient: true,
            annotate: true,
            shadow_offset: 0.12,
            shadow_alpha: 0.35,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderSpec {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub theme: Theme,
    pub histogram: HistogramSpec,
}

impl RenderSpec {
    pub fn categorical(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            x_label: "Category".into(),
            y_label: "Number of Casualties".into(),
            theme: Theme::default(),
            histogram: HistogramSpec::default(),
        }
    }

    pub fn temporal(title: impl Into<String>) -> Self {
        Self {
            x_label: "Date".into(),
            ..Self::categorical(title)
        }
    }
}

impl Default for RenderSpec {
    fn default() -> Self {
        Self::categorical("Casualties")
    }
}
