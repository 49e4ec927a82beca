use crate::data::model::{Diagnostics, Series};
use crate::data::normalize::normalize;
use crate::data::source::RowSource;
use crate::error::SourceError;

// ---------------------------------------------------------------------------
// One fetch → normalize run
// ---------------------------------------------------------------------------

/// Result of a run that reached the normalizer.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// At least one record survived; ready for a renderer.
    Ready {
        series: Series,
        diagnostics: Diagnostics,
    },
    /// Zero records survived. Reported to the user, never rendered.
    NoData { diagnostics: Diagnostics },
}

impl Outcome {
    pub fn diagnostics(&self) -> &Diagnostics {
        match self {
            Outcome::Ready { diagnostics, .. } | Outcome::NoData { diagnostics } => diagnostics,
        }
    }
}

/// Extract rows from `source` and normalize them.
///
/// Only a source failure is an error; dropped rows and an empty result are
/// ordinary outcomes.
pub fn run(source: &dyn RowSource) -> Result<Outcome, SourceError> {
    log::info!("Reading rows from {}", source.describe());
    let extraction = source.extract()?;
    log::debug!(
        "Extracted {} row(s), skipped {}",
        extraction.rows.len(),
        extraction.skipped.dropped_count()
    );

    let normalized = normalize(&extraction.rows);
    let diagnostics = extraction.skipped.merge(normalized.diagnostics);

    if normalized.series.is_empty() {
        log::warn!("No records survived normalization for {}", source.describe());
        return Ok(Outcome::NoData { diagnostics });
    }

    Ok(Outcome::Ready {
        series: normalized.series,
        diagnostics,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    use crate::data::delimited::read_delimited;
    use crate::data::html::extract_table_rows;
    use crate::data::model::Key;
    use crate::data::source::Extraction;

    struct StaticSource {
        extraction: Extraction,
        calls: Cell<usize>,
    }

    impl StaticSource {
        fn new(extraction: Extraction) -> Self {
            Self {
                extraction,
                calls: Cell::new(0),
            }
        }
    }

    impl RowSource for StaticSource {
        fn describe(&self) -> String {
            "static".into()
        }

        fn extract(&self) -> Result<Extraction, SourceError> {
            self.calls.set(self.calls.get() + 1);
            Ok(self.extraction.clone())
        }
    }

    struct FailingSource;

    impl RowSource for FailingSource {
        fn describe(&self) -> String {
            "https://example.org/down".into()
        }

        fn extract(&self) -> Result<Extraction, SourceError> {
            Err(SourceError::Timeout {
                url: self.describe(),
            })
        }
    }

    #[test]
    fn scenario_table_rows_to_bar_series() {
        let html = r#"<table>
            <tr><th>Category</th><th>Count</th></tr>
            <tr><td>KIA</td><td>1,200</td></tr>
            <tr><td>WIA</td><td>3,400</td></tr>
            <tr><td>MIA</td><td>x</td></tr>
        </table>"#;
        let source = StaticSource::new(extract_table_rows(html, 0));

        let Outcome::Ready { series, diagnostics } = run(&source).unwrap() else {
            panic!("expected data");
        };
        assert_eq!(series.labels(), vec!["KIA", "WIA"]);
        assert_eq!(series.values(), vec![1200.0, 3400.0]);
        assert_eq!(diagnostics.dropped_count(), 1);

        let bars = crate::render::bar::layout_bars(&series).unwrap();
        assert_eq!(bars.len(), 2);
    }

    #[test]
    fn scenario_csv_lines_to_timestamped_series() {
        let text = "2023-01-01T00:00:00,10.5\nbad,line,here\n2023-01-02T00:00:00,12.0\n";
        let extraction =
            read_delimited(text.as_bytes(), b',', std::path::Path::new("casualty_data.csv"))
                .unwrap();
        let source = StaticSource::new(extraction);

        let Outcome::Ready { series, diagnostics } = run(&source).unwrap() else {
            panic!("expected data");
        };
        assert_eq!(series.len(), 2);
        assert!(series.is_temporal());
        let days: Vec<String> = series.records().iter().map(|r| r.key.to_string()).collect();
        assert_eq!(days, vec!["2023-01-01T00:00:00", "2023-01-02T00:00:00"]);
        assert!(matches!(series.records()[0].key, Key::Timestamp(_)));
        assert_eq!(diagnostics.dropped[0].position, 2);
    }

    #[test]
    fn scenario_empty_source_reports_no_data() {
        let source = StaticSource::new(extract_table_rows("<table><tr><th>h</th></tr></table>", 0));
        let outcome = run(&source).unwrap();
        assert!(matches!(outcome, Outcome::NoData { .. }));
    }

    #[test]
    fn every_run_re_extracts() {
        let source = StaticSource::new(Extraction::default());
        run(&source).unwrap();
        run(&source).unwrap();
        assert_eq!(source.calls.get(), 2);
    }

    #[test]
    fn source_failure_aborts_the_run() {
        let err = run(&FailingSource).unwrap_err();
        assert!(matches!(err, SourceError::Timeout { .. }));
    }
}
