//! Styled 3D categorical histogram.
//!
//! Bars sit in a single row along the x axis, value on z. The layout step
//! decides geometry, colours, which tick labels survive thinning, which bars
//! are top-N, and the annotation text; the paint step only projects and draws.

use std::f32::consts::FRAC_PI_4;

use eframe::egui::{self, epaint::TextShape, Align2, Color32, FontId, Pos2, Rect, Response, Sense, Stroke, Ui};
use num_format::Locale;

use crate::color::{gradient_colors, Gradient};
use crate::data::model::Series;
use crate::error::RenderError;

use super::projection::{Camera, Point3, ScreenFit};
use super::RenderSpec;

/// y position of the bar row.
const ROW_Y: f32 = 0.5;
/// Tallest bar height relative to the number of categories.
const HEIGHT_RATIO: f32 = 0.45;
const MIN_EXTENT: f32 = 3.0;
const VALUE_TICKS: usize = 5;
const STAR: &str = "⭐";

// ---------------------------------------------------------------------------
// Layout
// ---------------------------------------------------------------------------

/// Axis-aligned box in world coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cuboid {
    pub min: Point3,
    pub max: Point3,
    pub fill: Color32,
}

impl Cuboid {
    fn corners(&self) -> [Point3; 8] {
        let (a, b) = (self.min, self.max);
        [
            [a[0], a[1], a[2]],
            [b[0], a[1], a[2]],
            [b[0], b[1], a[2]],
            [a[0], b[1], a[2]],
            [a[0], a[1], b[2]],
            [b[0], a[1], b[2]],
            [b[0], b[1], b[2]],
            [a[0], b[1], b[2]],
        ]
    }

    fn center(&self) -> Point3 {
        [
            (self.min[0] + self.max[0]) / 2.0,
            (self.min[1] + self.max[1]) / 2.0,
            (self.min[2] + self.max[2]) / 2.0,
        ]
    }

    /// Faces as (outward normal, corner indices, shade factor).
    fn faces() -> [(Point3, [usize; 4], f32); 6] {
        [
            ([0.0, 0.0, 1.0], [4, 5, 6, 7], 1.0),
            ([0.0, 0.0, -1.0], [0, 3, 2, 1], 0.5),
            ([0.0, -1.0, 0.0], [0, 1, 5, 4], 0.8),
            ([0.0, 1.0, 0.0], [2, 3, 7, 6], 0.8),
            ([-1.0, 0.0, 0.0], [3, 0, 4, 7], 0.65),
            ([1.0, 0.0, 0.0], [1, 2, 6, 5], 0.65),
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HistogramBar {
    pub index: usize,
    pub label: String,
    pub value: f64,
    pub body: Cuboid,
    /// Tick label survives thinning.
    pub show_label: bool,
    /// Among the top-N values.
    pub highlighted: bool,
    /// Formatted value drawn above the bar.
    pub annotation: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HistogramLayout {
    pub bars: Vec<HistogramBar>,
    /// Cosmetic offset copies, drawn first. Never used for values.
    pub shadows: Vec<Cuboid>,
    pub label_stride: usize,
    /// Top-N record indices, largest first.
    pub top: Vec<usize>,
    /// Value ticks as (world z, text).
    pub value_ticks: Vec<(f32, String)>,
    pub z_extent: f32,
}

impl HistogramLayout {
    pub fn build(series: &Series, spec: &RenderSpec) -> Result<Self, RenderError> {
        if series.is_empty() {
            return Err(RenderError::EmptySeries);
        }
        let hist = &spec.histogram;
        let values = series.values();
        let labels = series.labels();
        let n = values.len();

        let max_abs = values.iter().fold(0.0_f64, |m, v| m.max(v.abs()));
        let z_extent = (n as f32).max(MIN_EXTENT) * HEIGHT_RATIO;
        let to_z = |v: f64| -> f32 {
            if max_abs > 0.0 {
                (v / max_abs) as f32 * z_extent
            } else {
                0.0
            }
        };

        let colors = if hist.gradient {
            let gradient = Gradient::new(spec.theme.gradient_low, spec.theme.gradient_high);
            gradient_colors(&values, &gradient)
        } else {
            vec![spec.theme.bar; n]
        };

        let stride = label_stride(n, hist.label_threshold);
        let top = top_n_indices(&values, hist.top_n);

        let half_w = hist.bar_width / 2.0;
        let half_d = hist.bar_depth / 2.0;

        let bars: Vec<HistogramBar> = values
            .iter()
            .zip(labels)
            .zip(colors)
            .enumerate()
            .map(|(i, ((&value, label), fill))| {
                let x = i as f32;
                let z = to_z(value);
                HistogramBar {
                    index: i,
                    label,
                    value,
                    body: Cuboid {
                        min: [x - half_w, ROW_Y - half_d, z.min(0.0)],
                        max: [x + half_w, ROW_Y + half_d, z.max(0.0)],
                        fill,
                    },
                    show_label: i % stride == 0,
                    highlighted: top.contains(&i),
                    annotation: hist.annotate.then(|| format_count(value)),
                }
            })
            .collect();

        let shadows = if hist.shadow {
            let fill = with_alpha(spec.theme.shadow, hist.shadow_alpha);
            let o = hist.shadow_offset;
            bars.iter()
                .map(|bar| Cuboid {
                    min: [bar.body.min[0] + o, bar.body.min[1] + o, bar.body.min[2]],
                    max: [bar.body.max[0] + o, bar.body.max[1] + o, bar.body.max[2]],
                    fill,
                })
                .collect()
        } else {
            Vec::new()
        };

        let value_ticks = (0..=VALUE_TICKS)
            .map(|k| {
                let v = max_abs * k as f64 / VALUE_TICKS as f64;
                (to_z(v), format_count(v))
            })
            .collect();

        Ok(Self {
            bars,
            shadows,
            label_stride: stride,
            top,
            value_ticks,
            z_extent,
        })
    }

    pub fn shown_labels(&self) -> usize {
        self.bars.iter().filter(|b| b.show_label).count()
    }
}

/// Show every k-th tick label once `n` exceeds `threshold`, k = ceil(n / threshold).
pub fn label_stride(n: usize, threshold: usize) -> usize {
    if threshold == 0 || n <= threshold {
        1
    } else {
        n.div_ceil(threshold)
    }
}

/// Indices of the `n` largest values, largest first. Equal values keep
/// source order, so the first occurrence wins a tie.
pub fn top_n_indices(values: &[f64], n: usize) -> Vec<usize> {
    let mut order: Vec<usize> = (0..values.len()).collect();
    // Stable sort: ties stay in original order.
    order.sort_by(|&a, &b| values[b].total_cmp(&values[a]));
    order.truncate(n);
    order
}

/// Thousands-separated value; fractions are kept to two places.
///
/// Works from the decimal text rather than an integer cast, so magnitudes
/// beyond the integer types still format exactly.
pub fn format_count(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (whole, frac) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };
    let whole = group_thousands(whole);
    match frac.trim_end_matches('0') {
        "" => format!("{sign}{whole}"),
        f => format!("{sign}{whole}.{f}"),
    }
}

fn group_thousands(digits: &str) -> String {
    let separator = Locale::en.separator();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push_str(separator);
        }
        out.push(ch);
    }
    out
}

fn with_alpha(c: Color32, alpha: f32) -> Color32 {
    let a = (alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
    Color32::from_rgba_unmultiplied(c.r(), c.g(), c.b(), a)
}

fn shade(c: Color32, factor: f32) -> Color32 {
    let s = |v: u8| (v as f32 * factor).round().clamp(0.0, 255.0) as u8;
    Color32::from_rgba_premultiplied(s(c.r()), s(c.g()), s(c.b()), c.a())
}

// ---------------------------------------------------------------------------
// Painting
// ---------------------------------------------------------------------------

/// Draw a prepared layout into the remaining space of `ui`.
pub fn paint(ui: &mut Ui, layout: &HistogramLayout, spec: &RenderSpec) -> Response {
    let theme = &spec.theme;
    let hist = &spec.histogram;
    let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::hover());
    let rect = response.rect;

    painter.rect_filled(rect, 0.0, theme.background);
    painter.text(
        Pos2::new(rect.center().x, rect.top() + 8.0),
        Align2::CENTER_TOP,
        &spec.title,
        FontId::proportional(18.0),
        theme.text,
    );

    let plot_rect = Rect::from_min_max(
        Pos2::new(rect.left() + 70.0, rect.top() + 60.0),
        Pos2::new(rect.right() - 30.0, rect.bottom() - 90.0),
    );
    if plot_rect.width() <= 0.0 || plot_rect.height() <= 0.0 {
        return response;
    }

    let camera = Camera::new(hist.elevation, hist.azimuth);
    let n = layout.bars.len() as f32;
    let floor = Cuboid {
        min: [-0.5, ROW_Y - 0.5, 0.0],
        max: [n - 0.5, ROW_Y + 0.5, 0.0],
        fill: theme.grid,
    };

    let fit = ScreenFit::new(
        layout
            .bars
            .iter()
            .map(|b| &b.body)
            .chain(layout.shadows.iter())
            .chain(std::iter::once(&floor))
            .flat_map(|c| c.corners())
            .chain(std::iter::once([-0.5, ROW_Y + 0.5, layout.z_extent]))
            .map(|p| camera.project(p)),
        plot_rect,
    );
    let to_screen = |p: Point3| fit.to_screen(camera.project(p));

    // Floor and value axis along the back-left edge.
    let floor_pts: Vec<Pos2> = floor.corners()[..4].iter().map(|&p| to_screen(p)).collect();
    painter.add(egui::Shape::convex_polygon(
        floor_pts,
        with_alpha(theme.grid, 0.5),
        Stroke::new(1.0, theme.grid),
    ));
    let axis_x = -0.5;
    let axis_y = ROW_Y + 0.5;
    for (z, text) in &layout.value_ticks {
        let left = to_screen([axis_x, axis_y, *z]);
        let right = to_screen([n - 0.5, axis_y, *z]);
        painter.line_segment([left, right], Stroke::new(0.5, theme.grid));
        painter.text(
            left - egui::vec2(6.0, 0.0),
            Align2::RIGHT_CENTER,
            text,
            FontId::proportional(10.0),
            theme.text,
        );
    }

    for shadow in &layout.shadows {
        paint_cuboid(&painter, &camera, &to_screen, shadow, None);
    }

    // Painter's algorithm: farthest bars first.
    let mut order: Vec<&HistogramBar> = layout.bars.iter().collect();
    order.sort_by(|a, b| {
        let da = camera.project(a.body.center()).depth;
        let db = camera.project(b.body.center()).depth;
        da.total_cmp(&db)
    });
    for bar in order {
        let edge = shade(bar.body.fill, 0.4);
        paint_cuboid(&painter, &camera, &to_screen, &bar.body, Some(edge));
    }

    for bar in &layout.bars {
        let x = bar.index as f32;
        let top = to_screen([x, ROW_Y, bar.body.max[2]]);
        let mut anchor = top - egui::vec2(0.0, 4.0);

        if let Some(text) = &bar.annotation {
            let r = painter.text(
                anchor,
                Align2::CENTER_BOTTOM,
                text,
                FontId::proportional(10.0),
                theme.text,
            );
            anchor.y = r.top() - 2.0;
        }
        if bar.highlighted {
            painter.text(
                anchor,
                Align2::CENTER_BOTTOM,
                STAR,
                FontId::proportional(14.0),
                theme.accent,
            );
        }

        if bar.show_label {
            let tick = to_screen([x, ROW_Y - hist.bar_depth / 2.0, 0.0]) + egui::vec2(0.0, 6.0);
            paint_rotated_label(&painter, tick, &bar.label, theme.text);
        }
    }

    painter.text(
        Pos2::new(plot_rect.center().x, rect.bottom() - 8.0),
        Align2::CENTER_BOTTOM,
        &spec.x_label,
        FontId::proportional(13.0),
        theme.accent,
    );
    painter.text(
        Pos2::new(rect.left() + 8.0, plot_rect.top() - 24.0),
        Align2::LEFT_BOTTOM,
        &spec.y_label,
        FontId::proportional(13.0),
        theme.accent,
    );

    response
}

fn paint_cuboid(
    painter: &egui::Painter,
    camera: &Camera,
    to_screen: &dyn Fn(Point3) -> Pos2,
    cuboid: &Cuboid,
    edge: Option<Color32>,
) {
    let corners = cuboid.corners();
    for (normal, idx, factor) in Cuboid::faces() {
        if !camera.faces_viewer(normal) {
            continue;
        }
        let points: Vec<Pos2> = idx.iter().map(|&i| to_screen(corners[i])).collect();
        let stroke = edge.map_or(Stroke::NONE, |c| Stroke::new(0.75, c));
        painter.add(egui::Shape::convex_polygon(
            points,
            shade(cuboid.fill, factor),
            stroke,
        ));
    }
}

/// Text rotated 45° upward, ending just below `anchor`.
pub(crate) fn paint_rotated_label(painter: &egui::Painter, anchor: Pos2, text: &str, color: Color32) {
    let galley = painter.layout_no_wrap(text.to_owned(), FontId::proportional(11.0), color);
    let angle = -FRAC_PI_4;
    let width = galley.size().x;
    let pos = anchor - egui::vec2(angle.cos() * width, angle.sin() * width);
    painter.add(egui::Shape::Text(
        TextShape::new(pos, galley, color).with_angle(angle),
    ));
}
