use scraper::{ElementRef, Html, Selector};

use crate::error::SourceError;

use super::fetch::HttpClient;
use super::model::{Diagnostics, DropReason, RawRow};
use super::source::{Extraction, RowSource};

// ---------------------------------------------------------------------------
// HTML-table adapter
// ---------------------------------------------------------------------------

/// Fetches a document and reads `(label, value)` pairs from one of its tables.
pub struct HtmlTableSource<C: HttpClient> {
    pub url: String,
    /// 0-based index of the table to read; the first table by default.
    pub table_index: usize,
    client: C,
}

impl<C: HttpClient> HtmlTableSource<C> {
    pub fn new(url: impl Into<String>, client: C) -> Self {
        Self {
            url: url.into(),
            table_index: 0,
            client,
        }
    }

    pub fn with_table_index(mut self, index: usize) -> Self {
        self.table_index = index;
        self
    }
}

impl<C: HttpClient> RowSource for HtmlTableSource<C> {
    fn describe(&self) -> String {
        self.url.clone()
    }

    fn extract(&self) -> Result<Extraction, SourceError> {
        let body = self.client.get(&self.url)?;
        Ok(extract_table_rows(&body, self.table_index))
    }
}

fn selector(css: &'static str) -> Selector {
    Selector::parse(css).expect("static CSS selector is valid")
}

/// Text of a cell: each text fragment trimmed, then concatenated.
fn cell_text(cell: ElementRef<'_>) -> String {
    cell.text().map(str::trim).collect()
}

/// Read the first two cells of every data row of the selected table.
///
/// The first `<tr>` is treated as the header and skipped. Rows with fewer
/// than two cells produce no [`RawRow`]. A document without the requested
/// table yields an empty extraction.
pub fn extract_table_rows(body: &str, table_index: usize) -> Extraction {
    let document = Html::parse_document(body);
    let table_sel = selector("table");
    let row_sel = selector("tr");
    let cell_sel = selector("td, th");

    let Some(table) = document.select(&table_sel).nth(table_index) else {
        log::warn!("No table at index {table_index} in document");
        return Extraction::default();
    };

    let mut rows = Vec::new();
    let mut skipped = Diagnostics::default();

    for (i, row) in table.select(&row_sel).enumerate().skip(1) {
        let position = i + 1;
        let cells: Vec<ElementRef<'_>> = row.select(&cell_sel).collect();
        if cells.len() < 2 {
            log::debug!("Table row {position}: {} cell(s), skipped", cells.len());
            skipped.record(position, DropReason::ColumnCount(cells.len()));
            continue;
        }
        rows.push(RawRow::category(
            position,
            cell_text(cells[0]),
            cell_text(cells[1]),
        ));
    }

    Extraction { rows, skipped }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::RowKind;

    const PANELS: &str = r#"
        <html><body>
          <table>
            <tr><th>Category</th><th>Count</th></tr>
            <tr><td>KIA</td><td> 1,200 </td></tr>
            <tr><td>Lonely cell</td></tr>
            <tr><td><b>WIA</b> </td><td>3,400</td><td>ignored</td></tr>
          </table>
          <table>
            <tr><td>Header</td><td>Row</td></tr>
            <tr><td>Second</td><td>7</td></tr>
          </table>
        </body></html>
    "#;

    struct FakeClient {
        response: fn() -> Result<String, SourceError>,
    }

    impl HttpClient for FakeClient {
        fn get(&self, _url: &str) -> Result<String, SourceError> {
            (self.response)()
        }
    }

    #[test]
    fn reads_first_two_cells_and_skips_header() {
        let extraction = extract_table_rows(PANELS, 0);
        let pairs: Vec<(&str, &str)> = extraction
            .rows
            .iter()
            .map(|r| (r.key.as_str(), r.value.as_str()))
            .collect();
        assert_eq!(pairs, vec![("KIA", "1,200"), ("WIA", "3,400")]);
        assert!(extraction.rows.iter().all(|r| r.kind == RowKind::Category));
    }

    #[test]
    fn short_rows_are_skipped_not_errors() {
        let extraction = extract_table_rows(PANELS, 0);
        assert_eq!(extraction.skipped.dropped_count(), 1);
        assert_eq!(extraction.skipped.dropped[0].position, 3);
        assert_eq!(extraction.skipped.dropped[0].reason, DropReason::ColumnCount(1));
    }

    #[test]
    fn selects_table_by_index() {
        let extraction = extract_table_rows(PANELS, 1);
        assert_eq!(extraction.rows.len(), 1);
        assert_eq!(extraction.rows[0].key, "Second");
    }

    #[test]
    fn missing_table_yields_nothing() {
        let extraction = extract_table_rows("<p>no tables here</p>", 0);
        assert!(extraction.rows.is_empty());
        assert_eq!(extract_table_rows(PANELS, 5), Extraction::default());
    }

    #[test]
    fn http_failure_is_propagated() {
        let source = HtmlTableSource::new(
            "https://example.org/panels",
            FakeClient {
                response: || {
                    Err(SourceError::Http {
                        url: "https://example.org/panels".into(),
                        status: 404,
                    })
                },
            },
        );
        let err = source.extract().unwrap_err();
        assert!(matches!(err, SourceError::Http { status: 404, .. }));
    }

    #[test]
    fn fetched_body_is_parsed() {
        let source = HtmlTableSource::new(
            "https://example.org/panels",
            FakeClient {
                response: || Ok(PANELS.to_string()),
            },
        )
        .with_table_index(1);
        assert_eq!(source.describe(), "https://example.org/panels");
        assert_eq!(source.extract().unwrap().rows.len(), 1);
    }
}
