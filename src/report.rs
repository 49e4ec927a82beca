use std::io::Write;

use serde::Serialize;

use crate::cli::PrintFormat;
use crate::data::model::{Diagnostics, Series};

// ---------------------------------------------------------------------------
// Headless output
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct PrintedRecord {
    key: String,
    value: f64,
}

#[derive(Debug, Serialize)]
struct PrintedDrop {
    position: usize,
    reason: String,
}

#[derive(Debug, Serialize)]
struct PrintedSeries {
    records: Vec<PrintedRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    dropped: Option<Vec<PrintedDrop>>,
}

fn printed(series: &Series, diagnostics: Option<&Diagnostics>) -> PrintedSeries {
    PrintedSeries {
        records: series
            .records()
            .iter()
            .map(|r| PrintedRecord {
                key: r.key.to_string(),
                value: r.value,
            })
            .collect(),
        dropped: diagnostics.map(|d| {
            d.dropped
                .iter()
                .map(|row| PrintedDrop {
                    position: row.position,
                    reason: row.reason.to_string(),
                })
                .collect()
        }),
    }
}

/// Write the series (and optionally the dropped rows) to `out`.
pub fn write_series<W: Write>(
    out: &mut W,
    series: &Series,
    diagnostics: Option<&Diagnostics>,
    format: PrintFormat,
) -> anyhow::Result<()> {
    match format {
        PrintFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &printed(series, diagnostics))?;
            writeln!(out)?;
        }
        PrintFormat::Text => {
            let width = series
                .records()
                .iter()
                .map(|r| r.key.to_string().chars().count())
                .max()
                .unwrap_or(0);
            for record in series.records() {
                writeln!(out, "{:<width$}  {}", record.key.to_string(), record.value)?;
            }
            if let Some(d) = diagnostics {
                write_dropped(out, d)?;
            }
        }
    }
    Ok(())
}

/// One line per dropped row: position and reason.
pub fn write_dropped<W: Write>(out: &mut W, diagnostics: &Diagnostics) -> std::io::Result<()> {
    writeln!(out, "{} row(s) dropped", diagnostics.dropped_count())?;
    for row in &diagnostics.dropped {
        writeln!(out, "  row {}: {}", row.position, row.reason)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{DropReason, Key, Record};

    fn sample() -> (Series, Diagnostics) {
        let series = Series::new(vec![
            Record { key: Key::Label("KIA".into()), value: 1200.0 },
            Record { key: Key::Label("Hostile".into()), value: 3400.0 },
        ]);
        let mut diagnostics = Diagnostics::default();
        diagnostics.record(4, DropReason::InvalidNumber("x".into()));
        (series, diagnostics)
    }

    #[test]
    fn text_table_is_aligned() {
        let (series, _) = sample();
        let mut out = Vec::new();
        write_series(&mut out, &series, None, PrintFormat::Text).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "KIA      1200\nHostile  3400\n");
    }

    #[test]
    fn text_lists_dropped_rows() {
        let (series, diagnostics) = sample();
        let mut out = Vec::new();
        write_series(&mut out, &series, Some(&diagnostics), PrintFormat::Text).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.ends_with("1 row(s) dropped\n  row 4: 'x' is not a number\n"));
    }

    #[test]
    fn json_output() {
        let (series, diagnostics) = sample();
        let mut out = Vec::new();
        write_series(&mut out, &series, Some(&diagnostics), PrintFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["records"][1]["key"], "Hostile");
        assert_eq!(value["records"][0]["value"], 1200.0);
        assert_eq!(value["dropped"][0]["position"], 4);

        let mut out = Vec::new();
        write_series(&mut out, &series, None, PrintFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert!(value.get("dropped").is_none());
    }
}
