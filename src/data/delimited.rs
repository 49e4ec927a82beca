use std::io::Read;
use std::path::{Path, PathBuf};

use crate::error::SourceError;

use super::model::{Diagnostics, DropReason, RawRow};
use super::source::{Extraction, RowSource};

// ---------------------------------------------------------------------------
// Delimited-file adapter
// ---------------------------------------------------------------------------

/// Two-column delimited text: `timestamp<delim>value`, no header row.
#[derive(Debug, Clone)]
pub struct DelimitedFileSource {
    pub path: PathBuf,
    pub delimiter: u8,
}

impl DelimitedFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            delimiter: b',',
        }
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }
}

impl RowSource for DelimitedFileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn extract(&self) -> Result<Extraction, SourceError> {
        let file = std::fs::File::open(&self.path).map_err(|source| SourceError::Open {
            path: self.path.clone(),
            source,
        })?;
        read_delimited(file, self.delimiter, &self.path)
    }
}

/// Read `(timestamp, value)` token pairs from any reader.
///
/// Lines with other than exactly two columns are skipped. Undecodable lines
/// are skipped too; only an I/O failure aborts the read.
pub fn read_delimited<R: Read>(
    reader: R,
    delimiter: u8,
    path: &Path,
) -> Result<Extraction, SourceError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(reader);

    let mut rows = Vec::new();
    let mut skipped = Diagnostics::default();

    for (i, result) in reader.records().enumerate() {
        let line = i + 1;
        let record = match result {
            Ok(record) => record,
            Err(e) if e.is_io_error() => {
                let source = match e.into_kind() {
                    csv::ErrorKind::Io(io) => io,
                    other => std::io::Error::other(format!("{other:?}")),
                };
                return Err(SourceError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
            Err(e) => {
                let line = e.position().map_or(line, |p| p.line() as usize);
                log::debug!("Line {line}: unreadable ({e}), skipped");
                skipped.record(line, DropReason::Undecodable(e.to_string()));
                continue;
            }
        };

        // The csv reader reports its own line numbers; blank lines are not records.
        let line = record.position().map_or(line, |p| p.line() as usize);
        if record.len() != 2 {
            log::debug!("Line {line}: {} column(s), skipped", record.len());
            skipped.record(line, DropReason::ColumnCount(record.len()));
            continue;
        }
        rows.push(RawRow::temporal(line, &record[0], &record[1]));
    }

    Ok(Extraction { rows, skipped })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use crate::data::model::RowKind;

    fn read(text: &str) -> Extraction {
        read_delimited(text.as_bytes(), b',', Path::new("inline.csv")).unwrap()
    }

    #[test]
    fn yields_pairs_in_line_order() {
        let extraction = read(
            "2023-01-01T00:00:00,10.5\nbad,line,here\n2023-01-02T00:00:00,12.0\n",
        );
        let keys: Vec<&str> = extraction.rows.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, vec!["2023-01-01T00:00:00", "2023-01-02T00:00:00"]);
        assert!(extraction.rows.iter().all(|r| r.kind == RowKind::Temporal));
        assert_eq!(extraction.rows[1].position, 3);
    }

    #[test]
    fn wrong_column_counts_are_skipped() {
        let extraction = read("a\n2023-01-01,1\nx,y,z\n");
        assert_eq!(extraction.rows.len(), 1);
        let reasons: Vec<&DropReason> =
            extraction.skipped.dropped.iter().map(|d| &d.reason).collect();
        assert_eq!(
            reasons,
            vec![&DropReason::ColumnCount(1), &DropReason::ColumnCount(3)]
        );
    }

    #[test]
    fn invalid_utf8_line_is_undecodable_at_its_line() {
        let bytes: &[u8] = b"2023-01-01,1\n\xff\xfe,2\n2023-01-02,3\n";
        let extraction = read_delimited(bytes, b',', Path::new("latin1.csv")).unwrap();
        assert_eq!(extraction.rows.len(), 2);
        assert_eq!(extraction.rows[1].position, 3);

        let dropped = &extraction.skipped.dropped;
        assert_eq!(dropped.len(), 1);
        assert_eq!(dropped[0].position, 2);
        assert!(matches!(dropped[0].reason, DropReason::Undecodable(_)));
    }

    #[test]
    fn custom_delimiter() {
        let extraction =
            read_delimited("2023-01-01;4\n".as_bytes(), b';', Path::new("semi.csv")).unwrap();
        assert_eq!(extraction.rows[0].value, "4");
    }

    #[test]
    fn reads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "2023-01-01T00:00:00,10.5").unwrap();
        writeln!(file, "2023-01-02T00:00:00,12.0").unwrap();

        let source = DelimitedFileSource::new(file.path());
        let extraction = source.extract().unwrap();
        assert_eq!(extraction.rows.len(), 2);
    }

    #[test]
    fn missing_file_is_source_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let source = DelimitedFileSource::new(dir.path().join("absent.csv"));
        let err = source.extract().unwrap_err();
        assert!(matches!(err, SourceError::Open { .. }));
    }
}
