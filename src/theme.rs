use eframe::egui::Color32;
use serde::Deserialize;

// ---------------------------------------------------------------------------
// Theme – explicit styling passed into renderers at draw time
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreset {
    #[default]
    Dark,
    Light,
}

impl ThemePreset {
    pub const ALL: [ThemePreset; 2] = [ThemePreset::Dark, ThemePreset::Light];

    pub fn name(self) -> &'static str {
        match self {
            ThemePreset::Dark => "dark",
            ThemePreset::Light => "light",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    pub preset: ThemePreset,
    pub background: Color32,
    pub grid: Color32,
    /// Titles, tick labels, annotations.
    pub text: Color32,
    /// Top-N markers and axis titles.
    pub accent: Color32,
    /// Solid fill for the 2D bar chart and for 3D bars without gradient.
    pub bar: Color32,
    pub line: Color32,
    pub gradient_low: Color32,
    pub gradient_high: Color32,
    pub shadow: Color32,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            preset: ThemePreset::Dark,
            background: Color32::from_rgb(18, 18, 24),
            grid: Color32::from_rgb(45, 45, 58),
            text: Color32::from_rgb(230, 230, 240),
            accent: Color32::from_rgb(255, 200, 60),
            bar: Color32::from_rgb(128, 0, 0),
            line: Color32::from_rgb(90, 140, 255),
            gradient_low: Color32::from_rgb(40, 70, 160),
            gradient_high: Color32::from_rgb(240, 80, 60),
            shadow: Color32::from_rgb(0, 0, 0),
        }
    }

    pub fn light() -> Self {
        Self {
            preset: ThemePreset::Light,
            background: Color32::from_rgb(250, 250, 252),
            grid: Color32::from_rgb(225, 225, 232),
            text: Color32::from_rgb(25, 25, 35),
            accent: Color32::from_rgb(200, 90, 0),
            bar: Color32::from_rgb(0, 0, 128),
            line: Color32::from_rgb(0, 0, 128),
            gradient_low: Color32::from_rgb(120, 170, 230),
            gradient_high: Color32::from_rgb(150, 20, 40),
            shadow: Color32::from_rgb(60, 60, 70),
        }
    }

    pub fn from_preset(preset: ThemePreset) -> Self {
        match preset {
            ThemePreset::Dark => Self::dark(),
            ThemePreset::Light => Self::light(),
        }
    }

    /// Swap to another preset's palette; the 2D bar fill belongs to the
    /// data source, not the palette, and is kept.
    pub fn switch_preset(&mut self, preset: ThemePreset) {
        if self.preset == preset {
            return;
        }
        let bar = self.bar;
        *self = Self::from_preset(preset);
        self.bar = bar;
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

/// Parse `#rrggbb` (leading `#` optional).
pub fn parse_hex(s: &str) -> Option<Color32> {
    let hex = s.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some(Color32::from_rgb(channel(0)?, channel(2)?, channel(4)?))
}
