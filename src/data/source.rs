use crate::error::SourceError;

use super::model::{Diagnostics, RawRow};

// ---------------------------------------------------------------------------
// Source adapter contract
// ---------------------------------------------------------------------------

/// Rows pulled out of one source, plus the rows the adapter had to skip
/// because they did not have two cells/columns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extraction {
    pub rows: Vec<RawRow>,
    pub skipped: Diagnostics,
}

/// Anything that can yield raw `(key, value)` rows from an external resource.
///
/// Every call re-extracts; nothing is cached between runs.
pub trait RowSource {
    /// Human-readable locator (URL or path) for messages.
    fn describe(&self) -> String;

    fn extract(&self) -> Result<Extraction, SourceError>;
}
