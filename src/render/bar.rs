use eframe::egui::{self, Align2, FontId, Pos2, Rect, Response, Sense, Stroke, Ui};

use crate::data::model::Series;
use crate::error::RenderError;

use super::histogram3d::{format_count, paint_rotated_label};
use super::RenderSpec;

// ---------------------------------------------------------------------------
// 2D categorical bar chart
// ---------------------------------------------------------------------------

/// One bar per record, in series order.
#[derive(Debug, Clone, PartialEq)]
pub struct BarSlot {
    pub label: String,
    pub value: f64,
}

pub fn layout_bars(series: &Series) -> Result<Vec<BarSlot>, RenderError> {
    if series.is_empty() {
        return Err(RenderError::EmptySeries);
    }
    Ok(series
        .records()
        .iter()
        .map(|r| BarSlot {
            label: r.key.to_string(),
            value: r.value,
        })
        .collect())
}

/// Value range covered by the axis; always includes zero.
fn value_range(bars: &[BarSlot]) -> (f64, f64) {
    let lo = bars.iter().map(|b| b.value).fold(0.0_f64, f64::min);
    let hi = bars.iter().map(|b| b.value).fold(0.0_f64, f64::max);
    if (hi - lo).abs() < f64::EPSILON {
        (lo, lo + 1.0)
    } else {
        (lo, hi)
    }
}

pub fn paint(ui: &mut Ui, bars: &[BarSlot], spec: &RenderSpec) -> Response {
    let theme = &spec.theme;
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

    let chart_rect = Rect::from_min_max(
        Pos2::new(rect.left() + 70.0, rect.top() + 40.0),
        Pos2::new(rect.right() - 20.0, rect.bottom() - 110.0),
    );
    if bars.is_empty() || chart_rect.width() <= 0.0 || chart_rect.height() <= 0.0 {
        return response;
    }

    let (lo, hi) = value_range(bars);
    let to_y = |v: f64| chart_rect.bottom() - ((v - lo) / (hi - lo)) as f32 * chart_rect.height();

    // Value gridlines
    for k in 0..=4 {
        let v = lo + (hi - lo) * k as f64 / 4.0;
        let y = to_y(v);
        painter.line_segment(
            [Pos2::new(chart_rect.left(), y), Pos2::new(chart_rect.right(), y)],
            Stroke::new(0.5, theme.grid),
        );
        painter.text(
            Pos2::new(chart_rect.left() - 6.0, y),
            Align2::RIGHT_CENTER,
            format_count(v),
            FontId::proportional(10.0),
            theme.text,
        );
    }

    let slot = chart_rect.width() / bars.len() as f32;
    let gap = slot * 0.2;
    let zero_y = to_y(0.0);
    let hover = response.hover_pos();

    for (i, bar) in bars.iter().enumerate() {
        let x = chart_rect.left() + i as f32 * slot;
        let y = to_y(bar.value);
        let bar_rect = Rect::from_two_pos(
            Pos2::new(x + gap / 2.0, y),
            Pos2::new(x + slot - gap / 2.0, zero_y),
        );
        painter.rect_filled(bar_rect, 1.0, theme.bar);

        if hover.is_some_and(|p| bar_rect.contains(p)) {
            painter.text(
                Pos2::new(bar_rect.center().x, bar_rect.top() - 2.0),
                Align2::CENTER_BOTTOM,
                format!("{}: {}", bar.label, format_count(bar.value)),
                FontId::proportional(11.0),
                theme.accent,
            );
        }

        let tick = Pos2::new(x + slot / 2.0, chart_rect.bottom() + 6.0);
        paint_rotated_label(&painter, tick, &bar.label, theme.text);
    }

    painter.line_segment(
        [
            Pos2::new(chart_rect.left(), zero_y),
            Pos2::new(chart_rect.right(), zero_y),
        ],
        Stroke::new(1.0, theme.text),
    );

    painter.text(
        Pos2::new(chart_rect.center().x, rect.bottom() - 6.0),
        Align2::CENTER_BOTTOM,
        &spec.x_label,
        FontId::proportional(13.0),
        theme.text,
    );
    painter.text(
        Pos2::new(rect.left() + 8.0, chart_rect.top() - 12.0),
        Align2::LEFT_BOTTOM,
        &spec.y_label,
        FontId::proportional(13.0),
        theme.text,
    );

    response
}

/// Lay out and draw, or report why nothing can be drawn.
pub fn show(ui: &mut Ui, series: &Series, spec: &RenderSpec) -> Result<Response, RenderError> {
    let bars = layout_bars(series)?;
    Ok(paint(ui, &bars, spec))
}
