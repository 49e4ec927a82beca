use std::ops::RangeInclusive;

use chrono::{DateTime, NaiveDateTime};
use eframe::egui::{RichText, Ui};
use egui_plot::{GridMark, Line, Plot, PlotPoint, PlotPoints, Points};

use crate::data::model::Series;
use crate::error::RenderError;

use super::histogram3d::format_count;
use super::RenderSpec;

// ---------------------------------------------------------------------------
// Time-series line chart
// ---------------------------------------------------------------------------

/// `[seconds since epoch, value]` per record, in series order. No sorting,
/// resampling, or gap filling.
pub fn time_points(series: &Series) -> Result<Vec<[f64; 2]>, RenderError> {
    if series.is_empty() {
        return Err(RenderError::EmptySeries);
    }
    series
        .records()
        .iter()
        .map(|r| {
            r.key
                .as_timestamp()
                .map(|ts| [to_seconds(ts), r.value])
                .ok_or(RenderError::TimeSeriesNeedsTimestamps)
        })
        .collect()
}

fn to_seconds(ts: NaiveDateTime) -> f64 {
    ts.and_utc().timestamp() as f64
}

fn format_date(seconds: f64, with_time: bool) -> String {
    match DateTime::from_timestamp(seconds.round() as i64, 0) {
        Some(dt) if with_time => dt.format("%Y-%m-%d %H:%M").to_string(),
        Some(dt) => dt.format("%Y-%m-%d").to_string(),
        None => String::new(),
    }
}

pub fn paint(ui: &mut Ui, points: &[[f64; 2]], spec: &RenderSpec) {
    let theme = &spec.theme;
    ui.vertical_centered(|ui: &mut Ui| {
        ui.label(RichText::new(&spec.title).heading().color(theme.text));
    });

    let line_points: PlotPoints = points.iter().copied().collect();
    let marker_points: PlotPoints = points.iter().copied().collect();

    Plot::new("timeline_plot")
        .x_axis_label(spec.x_label.clone())
        .y_axis_label(spec.y_label.clone())
        .x_axis_formatter(|mark: GridMark, _range: &RangeInclusive<f64>| {
            format_date(mark.value, false)
        })
        .label_formatter(|_name: &str, p: &PlotPoint| {
            format!("{}\n{}", format_date(p.x, true), format_count(p.y))
        })
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            plot_ui.line(Line::new(line_points).color(theme.line).width(1.5));
            plot_ui.points(Points::new(marker_points).radius(3.0).color(theme.line));
        });
}

pub fn show(ui: &mut Ui, series: &Series, spec: &RenderSpec) -> Result<(), RenderError> {
    let points = time_points(series)?;
    paint(ui, &points, spec);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{Key, Record};
    use crate::data::normalize::parse_timestamp;

    fn at(s: &str, value: f64) -> Record {
        Record {
            key: Key::Timestamp(parse_timestamp(s).unwrap()),
            value,
        }
    }

    #[test]
    fn points_keep_source_order_even_when_unsorted() {
        let series = Series::new(vec![
            at("2023-01-02T00:00:00", 12.0),
            at("2023-01-01T00:00:00", 10.5),
        ]);
        let points = time_points(&series).unwrap();
        assert_eq!(points[0][1], 12.0);
        assert_eq!(points[1][0] - points[0][0], -86_400.0);
    }

    #[test]
    fn label_keys_are_rejected() {
        let series = Series::new(vec![Record {
            key: Key::Label("KIA".into()),
            value: 1.0,
        }]);
        assert_eq!(time_points(&series), Err(RenderError::TimeSeriesNeedsTimestamps));
        assert_eq!(time_points(&Series::default()), Err(RenderError::EmptySeries));
    }

    #[test]
    fn axis_dates() {
        assert_eq!(format_date(0.0, false), "1970-01-01");
        assert_eq!(format_date(86_400.0 + 3_600.0, true), "1970-01-02 01:00");
    }
}
