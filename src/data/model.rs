use std::fmt;

use chrono::NaiveDateTime;

// ---------------------------------------------------------------------------
// RawRow – two unvalidated tokens straight from a source
// ---------------------------------------------------------------------------

/// Which key-parsing strategy the normalizer applies to a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    /// HTML table row: the key is kept as a display label.
    Category,
    /// Delimited-file line: the key is an ISO-8601 timestamp.
    Temporal,
}

/// An unvalidated `(key, value)` token pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    pub kind: RowKind,
    /// 1-based position in the source (table row or file line).
    pub position: usize,
    pub key: String,
    pub value: String,
}

impl RawRow {
    pub fn category(position: usize, key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            kind: RowKind::Category,
            position,
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn temporal(position: usize, key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            kind: RowKind::Temporal,
            position,
            key: key.into(),
            value: value.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Record – the normalized unit
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum Key {
    Label(String),
    Timestamp(NaiveDateTime),
}

impl Key {
    pub fn as_timestamp(&self) -> Option<NaiveDateTime> {
        match self {
            Key::Timestamp(ts) => Some(*ts),
            Key::Label(_) => None,
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Label(s) => write!(f, "{s}"),
            Key::Timestamp(ts) => write!(f, "{}", ts.format("%Y-%m-%dT%H:%M:%S")),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub key: Key,
    /// Always finite.
    pub value: f64,
}

// ---------------------------------------------------------------------------
// Series – ordered records, source order preserved
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Series {
    records: Vec<Record>,
}

impl Series {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn values(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.value).collect()
    }

    pub fn labels(&self) -> Vec<String> {
        self.records.iter().map(|r| r.key.to_string()).collect()
    }

    /// Whether every key is a timestamp (required by the time-series chart).
    pub fn is_temporal(&self) -> bool {
        !self.records.is_empty()
            && self
                .records
                .iter()
                .all(|r| matches!(r.key, Key::Timestamp(_)))
    }
}

// ---------------------------------------------------------------------------
// Diagnostics – what was dropped and why
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum DropReason {
    /// Row or line did not have the expected number of cells/columns.
    ColumnCount(usize),
    /// Line could not be decoded as text (e.g. invalid UTF-8).
    Undecodable(String),
    InvalidNumber(String),
    NonFiniteNumber(String),
    InvalidTimestamp(String),
}

impl fmt::Display for DropReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DropReason::ColumnCount(n) => write!(f, "expected 2 columns, found {n}"),
            DropReason::Undecodable(e) => write!(f, "unreadable line ({e})"),
            DropReason::InvalidNumber(s) => write!(f, "'{s}' is not a number"),
            DropReason::NonFiniteNumber(s) => write!(f, "'{s}' is not a finite number"),
            DropReason::InvalidTimestamp(s) => write!(f, "'{s}' is not an ISO-8601 timestamp"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DroppedRow {
    pub position: usize,
    pub reason: DropReason,
}

/// Rows that did not become records, in source order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Diagnostics {
    pub dropped: Vec<DroppedRow>,
}

impl Diagnostics {
    pub fn record(&mut self, position: usize, reason: DropReason) {
        self.dropped.push(DroppedRow { position, reason });
    }

    pub fn dropped_count(&self) -> usize {
        self.dropped.len()
    }

    /// Combine two diagnostic lists, keeping source order.
    pub fn merge(mut self, other: Diagnostics) -> Self {
        self.dropped.extend(other.dropped);
        self.dropped.sort_by_key(|d| d.position);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn timestamp_key_displays_iso() {
        let ts = NaiveDate::from_ymd_opt(2023, 1, 2)
            .and_then(|d| d.and_hms_opt(3, 4, 5))
            .unwrap();
        assert_eq!(Key::Timestamp(ts).to_string(), "2023-01-02T03:04:05");
    }

    #[test]
    fn temporal_only_when_all_keys_are_timestamps() {
        let ts = NaiveDate::from_ymd_opt(2023, 1, 1)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .unwrap();
        let mixed = Series::new(vec![
            Record { key: Key::Timestamp(ts), value: 1.0 },
            Record { key: Key::Label("KIA".into()), value: 2.0 },
        ]);
        assert!(!mixed.is_temporal());
        assert!(!Series::default().is_temporal());

        let temporal = Series::new(vec![Record { key: Key::Timestamp(ts), value: 1.0 }]);
        assert!(temporal.is_temporal());
    }

    #[test]
    fn merged_diagnostics_stay_in_source_order() {
        let mut a = Diagnostics::default();
        a.record(4, DropReason::InvalidNumber("x".into()));
        let mut b = Diagnostics::default();
        b.record(2, DropReason::ColumnCount(3));
        let merged = a.merge(b);
        let positions: Vec<usize> = merged.dropped.iter().map(|d| d.position).collect();
        assert_eq!(positions, vec![2, 4]);
    }
}
