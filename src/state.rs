use crate::config::ThemeConfig;
use crate::data::model::{Diagnostics, Series};
use crate::pipeline::Outcome;
use crate::render::{ChartKind, RenderSpec};
use crate::theme::ThemePreset;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Normalized series being shown (None until a source yields data).
    pub series: Option<Series>,

    /// Where the series came from, for the top bar.
    pub source: String,

    /// Rows dropped by the last run.
    pub diagnostics: Diagnostics,

    /// Active chart strategy.
    pub chart: ChartKind,

    /// Title, labels, theme, and 3D settings.
    pub spec: RenderSpec,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Config-file colour overrides, re-applied after every preset switch.
    pub theme_overrides: ThemeConfig,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            series: None,
            source: String::new(),
            diagnostics: Diagnostics::default(),
            chart: ChartKind::Bar,
            spec: RenderSpec::default(),
            status_message: None,
            theme_overrides: ThemeConfig::default(),
        }
    }
}

impl AppState {
    pub fn new(
        source: String,
        series: Series,
        diagnostics: Diagnostics,
        chart: ChartKind,
        spec: RenderSpec,
    ) -> Self {
        let mut state = Self {
            source,
            spec,
            ..Self::default()
        };
        state.set_series(series, diagnostics, chart);
        state
    }

    pub fn with_theme_overrides(mut self, overrides: ThemeConfig) -> Self {
        self.theme_overrides = overrides;
        self
    }

    /// Ingest a newly normalized series, keeping the chart choice valid for it.
    pub fn set_series(&mut self, series: Series, diagnostics: Diagnostics, preferred: ChartKind) {
        let available = ChartKind::available(series.is_temporal());
        self.chart = if available.contains(&preferred) {
            preferred
        } else {
            available[0]
        };
        self.series = Some(series);
        self.diagnostics = diagnostics;
        self.status_message = None;
    }

    /// Apply the result of re-running the pipeline from the UI.
    pub fn apply_outcome(&mut self, source: String, outcome: Outcome, no_data_notice: &str) {
        match outcome {
            Outcome::Ready { series, diagnostics } => {
                let preferred = if series.is_temporal() {
                    ChartKind::Timeline
                } else {
                    self.chart
                };
                self.source = source;
                self.set_series(series, diagnostics, preferred);
            }
            Outcome::NoData { diagnostics } => {
                // Keep the current chart; nothing new to draw.
                self.diagnostics = diagnostics;
                self.status_message = Some(no_data_notice.to_string());
            }
        }
    }

    pub fn available_charts(&self) -> &'static [ChartKind] {
        let temporal = self.series.as_ref().is_some_and(Series::is_temporal);
        ChartKind::available(temporal)
    }

    pub fn set_theme(&mut self, preset: ThemePreset) {
        if self.spec.theme.preset == preset {
            return;
        }
        self.spec.theme.switch_preset(preset);
        self.theme_overrides.apply(&mut self.spec.theme);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{Key, Record};
    use crate::data::normalize::parse_timestamp;
    use crate::theme::Theme;
    use eframe::egui::Color32;

    fn labelled() -> Series {
        Series::new(vec![Record { key: Key::Label("KIA".into()), value: 1.0 }])
    }

    fn temporal() -> Series {
        Series::new(vec![Record {
            key: Key::Timestamp(parse_timestamp("2023-01-01").unwrap()),
            value: 1.0,
        }])
    }

    #[test]
    fn timeline_falls_back_for_labelled_series() {
        let state = AppState::new(
            "page".into(),
            labelled(),
            Diagnostics::default(),
            ChartKind::Timeline,
            RenderSpec::default(),
        );
        assert_eq!(state.chart, ChartKind::Bar);
    }

    #[test]
    fn no_data_keeps_previous_series() {
        let mut state = AppState::new(
            "page".into(),
            labelled(),
            Diagnostics::default(),
            ChartKind::Histogram3d,
            RenderSpec::default(),
        );
        state.apply_outcome(
            "empty.csv".into(),
            Outcome::NoData {
                diagnostics: Diagnostics::default(),
            },
            "No valid data found in CSV file.",
        );
        assert_eq!(state.series, Some(labelled()));
        assert_eq!(state.source, "page");
        assert_eq!(state.status_message.as_deref(), Some("No valid data found in CSV file."));
    }

    #[test]
    fn preset_switch_keeps_config_overrides() {
        let overrides = ThemeConfig {
            accent: Some("#ff8800".into()),
            ..ThemeConfig::default()
        };
        let mut spec = RenderSpec::default();
        overrides.apply(&mut spec.theme);
        let mut state = AppState::new(
            "page".into(),
            labelled(),
            Diagnostics::default(),
            ChartKind::Bar,
            spec,
        )
        .with_theme_overrides(overrides);

        state.set_theme(ThemePreset::Light);
        assert_eq!(state.spec.theme.preset, ThemePreset::Light);
        assert_eq!(state.spec.theme.background, Theme::light().background);
        assert_eq!(state.spec.theme.accent, Color32::from_rgb(255, 136, 0));

        state.set_theme(ThemePreset::Dark);
        assert_eq!(state.spec.theme.background, Theme::dark().background);
        assert_eq!(state.spec.theme.accent, Color32::from_rgb(255, 136, 0));
    }

    #[test]
    fn temporal_outcome_switches_to_timeline() {
        let mut state = AppState::default();
        state.apply_outcome(
            "data.csv".into(),
            Outcome::Ready {
                series: temporal(),
                diagnostics: Diagnostics::default(),
            },
            "",
        );
        assert_eq!(state.chart, ChartKind::Timeline);
        assert_eq!(state.available_charts()[0], ChartKind::Timeline);
    }
}
