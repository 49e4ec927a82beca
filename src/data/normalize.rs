use chrono::{DateTime, NaiveDate, NaiveDateTime};

use super::model::{Diagnostics, DropReason, Key, RawRow, Record, RowKind, Series};

// ---------------------------------------------------------------------------
// Series normalizer: RawRow → Record
// ---------------------------------------------------------------------------

/// Normalized output plus the rows that were dropped on the way.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Normalized {
    pub series: Series,
    pub diagnostics: Diagnostics,
}

/// Convert raw rows into an ordered [`Series`].
///
/// A row whose key or value fails to parse is dropped whole; no failure
/// escapes this function. Survivors keep their relative order.
pub fn normalize<'a, I>(rows: I) -> Normalized
where
    I: IntoIterator<Item = &'a RawRow>,
{
    let mut records = Vec::new();
    let mut diagnostics = Diagnostics::default();

    for row in rows {
        match normalize_row(row) {
            Ok(record) => records.push(record),
            Err(reason) => {
                log::debug!("Row {} dropped: {reason}", row.position);
                diagnostics.record(row.position, reason);
            }
        }
    }

    log::info!(
        "Normalized {} record(s), dropped {}",
        records.len(),
        diagnostics.dropped_count()
    );

    Normalized {
        series: Series::new(records),
        diagnostics,
    }
}

fn normalize_row(row: &RawRow) -> Result<Record, DropReason> {
    let key = match row.kind {
        RowKind::Category => Key::Label(row.key.trim().to_string()),
        RowKind::Temporal => Key::Timestamp(parse_timestamp(&row.key)?),
    };
    let value = parse_value(&row.value)?;
    Ok(Record { key, value })
}

/// Parse a numeric token: surrounding whitespace and `,` thousands
/// separators are removed first. Non-finite results are rejected.
pub fn parse_value(token: &str) -> Result<f64, DropReason> {
    let cleaned: String = token.trim().chars().filter(|&c| c != ',').collect();
    let value = cleaned
        .parse::<f64>()
        .map_err(|_| DropReason::InvalidNumber(token.to_string()))?;
    if !value.is_finite() {
        return Err(DropReason::NonFiniteNumber(token.to_string()));
    }
    Ok(value)
}

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Strict ISO-8601 date/time parsing.
///
/// Accepts `YYYY-MM-DD`, `YYYY-MM-DD[T ]HH:MM[:SS[.fff]]`, and RFC 3339
/// timestamps with an offset (converted to UTC wall time).
pub fn parse_timestamp(token: &str) -> Result<NaiveDateTime, DropReason> {
    let s = token.trim();
    let invalid = || DropReason::InvalidTimestamp(token.to_string());

    if !has_iso_shape(s) {
        return Err(invalid());
    }

    if s.len() == 10 {
        return NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .ok_or_else(invalid);
    }

    if let Some(ts) = DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
    {
        return Ok(ts);
    }

    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.naive_utc())
        .map_err(|_| invalid())
}

/// Fixed-width `YYYY-MM-DD[(T| )HH:MM[:SS]...]` layout. chrono alone accepts
/// one-digit fields such as `2023-01-2T1:00`.
fn has_iso_shape(s: &str) -> bool {
    let b = s.as_bytes();
    let at = |i: usize, c: u8| b.get(i) == Some(&c);
    let digits = |from: usize, to: usize| {
        b.get(from..to)
            .is_some_and(|d| d.iter().all(u8::is_ascii_digit))
    };

    if !(digits(0, 4) && at(4, b'-') && digits(5, 7) && at(7, b'-') && digits(8, 10)) {
        return false;
    }
    if b.len() == 10 {
        return true;
    }
    if !(at(10, b'T') || at(10, b' ')) || !digits(11, 13) || !at(13, b':') || !digits(14, 16) {
        return false;
    }
    match b.get(16) {
        Some(b':') => digits(17, 19) && !matches!(b.get(19), Some(c) if c.is_ascii_digit()),
        Some(c) => !c.is_ascii_digit(),
        None => true,
    }
}
