use eframe::egui::Color32;
use palette::{LinSrgb, Mix, Srgb};

// ---------------------------------------------------------------------------
// Value → colour gradient
// ---------------------------------------------------------------------------

/// Linear two-stop gradient, interpolated in linear RGB.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gradient {
    low: LinSrgb,
    high: LinSrgb,
}

fn to_linear(c: Color32) -> LinSrgb {
    Srgb::new(c.r(), c.g(), c.b()).into_format::<f32>().into_linear()
}

impl Gradient {
    pub fn new(low: Color32, high: Color32) -> Self {
        Self {
            low: to_linear(low),
            high: to_linear(high),
        }
    }

    /// Colour at position `t`, clamped to `[0, 1]`.
    pub fn at(&self, t: f32) -> Color32 {
        let mixed = self.low.mix(self.high, t.clamp(0.0, 1.0));
        let rgb: Srgb<u8> = Srgb::<f32>::from_linear(mixed).into_format();
        Color32::from_rgb(rgb.red, rgb.green, rgb.blue)
    }
}

/// Map each value to `[0, 1]` by min/max normalization.
///
/// When every value is equal the span is taken as 1, so all values map to 0.
pub fn normalize_unit(values: &[f64]) -> Vec<f32> {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let mut span = max - min;
    if !span.is_finite() || span.abs() < f64::EPSILON {
        span = 1.0;
    }
    values
        .iter()
        .map(|&v| ((v - min) / span).clamp(0.0, 1.0) as f32)
        .collect()
}

/// One colour per value, in input order.
pub fn gradient_colors(values: &[f64], gradient: &Gradient) -> Vec<Color32> {
    normalize_unit(values)
        .into_iter()
        .map(|t| gradient.at(t))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ends_of_gradient_match_stops() {
        let low = Color32::from_rgb(40, 70, 160);
        let high = Color32::from_rgb(240, 80, 60);
        let g = Gradient::new(low, high);
        assert_eq!(g.at(0.0), low);
        assert_eq!(g.at(1.0), high);
        assert_eq!(g.at(-3.0), low);
        assert_eq!(g.at(7.0), high);
    }

    #[test]
    fn min_and_max_land_on_the_stops() {
        let t = normalize_unit(&[10.0, 5.0, 20.0]);
        assert_eq!(t, vec![(5.0 / 15.0) as f32, 0.0, 1.0]);
    }

    #[test]
    fn equal_values_share_one_colour() {
        let g = Gradient::new(Color32::BLUE, Color32::RED);
        let colors = gradient_colors(&[42.0, 42.0, 42.0], &g);
        assert_eq!(colors.len(), 3);
        assert!(colors.iter().all(|&c| c == colors[0]));

        let single = gradient_colors(&[7.0], &g);
        assert_eq!(single, vec![Color32::BLUE]);
    }
}
