use std::path::Path;

use eframe::egui::Color32;
use serde::Deserialize;

use crate::data::fetch::DEFAULT_TIMEOUT_SECS;
use crate::error::ConfigError;
use crate::render::{HistogramSpec, RenderSpec};
use crate::theme::{parse_hex, Theme, ThemePreset};

// ---------------------------------------------------------------------------
// Config file model
// ---------------------------------------------------------------------------

/// Optional TOML configuration. Every field falls back to its default, so an
/// empty file is a valid config.
///
/// ```toml
/// [fetch]
/// timeout_secs = 10
///
/// [render]
/// title = "USMC Casualties"
/// bar_color = "#800000"
///
/// [render.histogram]
/// elevation = 25.0
/// top_n = 5
///
/// [theme]
/// preset = "light"
/// accent = "#ff8800"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub fetch: FetchConfig,
    pub render: RenderConfig,
    pub theme: ThemeConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FetchConfig {
    pub timeout_secs: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    pub title: Option<String>,
    pub x_label: Option<String>,
    pub y_label: Option<String>,
    /// `#rrggbb` fill for the 2D bar chart.
    pub bar_color: Option<String>,
    pub histogram: HistogramSpec,
}

/// Colour overrides are `#rrggbb` strings applied on top of the preset.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThemeConfig {
    pub preset: ThemePreset,
    pub background: Option<String>,
    pub text: Option<String>,
    pub accent: Option<String>,
    pub grid: Option<String>,
    pub line: Option<String>,
    pub gradient_low: Option<String>,
    pub gradient_high: Option<String>,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text, path)
    }

    pub fn parse(text: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Overlay this config onto a variant's default spec.
    pub fn apply(&self, spec: &mut RenderSpec) {
        let render = &self.render;
        if let Some(title) = &render.title {
            spec.title.clone_from(title);
        }
        if let Some(x) = &render.x_label {
            spec.x_label.clone_from(x);
        }
        if let Some(y) = &render.y_label {
            spec.y_label.clone_from(y);
        }
        spec.histogram = render.histogram.clone();

        // A preset switch resets the palette, then explicit overrides apply.
        spec.theme.switch_preset(self.theme.preset);
        self.theme.apply(&mut spec.theme);
        override_color(&mut spec.theme.bar, render.bar_color.as_deref(), "render.bar_color");
    }
}

impl ThemeConfig {
    /// Colour overrides only; the preset itself is chosen by the caller.
    pub fn apply(&self, theme: &mut Theme) {
        override_color(&mut theme.background, self.background.as_deref(), "theme.background");
        override_color(&mut theme.text, self.text.as_deref(), "theme.text");
        override_color(&mut theme.accent, self.accent.as_deref(), "theme.accent");
        override_color(&mut theme.grid, self.grid.as_deref(), "theme.grid");
        override_color(&mut theme.line, self.line.as_deref(), "theme.line");
        override_color(&mut theme.gradient_low, self.gradient_low.as_deref(), "theme.gradient_low");
        override_color(&mut theme.gradient_high, self.gradient_high.as_deref(), "theme.gradient_high");
    }
}

fn override_color(slot: &mut Color32, value: Option<&str>, key: &str) {
    let Some(value) = value else {
        return;
    };
    match parse_hex(value) {
        Some(color) => *slot = color,
        None => log::warn!("Ignoring {key} = '{value}': expected #rrggbb"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn parse(text: &str) -> Config {
        Config::parse(text, Path::new("test.toml")).unwrap()
    }

    #[test]
    fn empty_file_gives_defaults() {
        let config = parse("");
        assert_eq!(config, Config::default());
        assert_eq!(config.fetch.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(config.render.histogram, HistogramSpec::default());
    }

    #[test]
    fn partial_histogram_section_keeps_other_defaults() {
        let config = parse(
            r#"
            [render.histogram]
            top_n = 5
            shadow = false
            "#,
        );
        assert_eq!(config.render.histogram.top_n, 5);
        assert!(!config.render.histogram.shadow);
        assert_eq!(config.render.histogram.label_threshold, 20);
    }

    #[test]
    fn apply_overlays_spec() {
        let config = parse(
            r##"
            [fetch]
            timeout_secs = 5

            [render]
            title = "Panels"
            bar_color = "#000080"

            [theme]
            preset = "light"
            accent = "#ff8800"
            gradient_low = "not a colour"
            "##,
        );
        assert_eq!(config.fetch.timeout_secs, 5);

        let mut spec = RenderSpec::categorical("Default");
        config.apply(&mut spec);
        assert_eq!(spec.title, "Panels");
        assert_eq!(spec.x_label, "Category");
        assert_eq!(spec.theme.preset, ThemePreset::Light);
        assert_eq!(spec.theme.bar, Color32::from_rgb(0, 0, 128));
        assert_eq!(spec.theme.accent, Color32::from_rgb(255, 136, 0));
        assert_eq!(spec.theme.gradient_low, Theme::light().gradient_low);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = Config::parse("[render]\ncolour = 1\n", Path::new("bad.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn load_reads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[fetch]\ntimeout_secs = 3").unwrap();
        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.fetch.timeout_secs, 3);

        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(&dir.path().join("none.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
