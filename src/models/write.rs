//! Result of a write query.

use serde::Serialize;

use crate::graph::Row;

/// Outcome of a committed write statement.
///
/// The Bolt driver does not expose update counters, so the summary reports
/// the rows the statement returned (for `... RETURN` writes) instead.
#[derive(Debug, Clone, Serialize)]
pub struct WriteSummary {
    pub rows_returned: usize,
    pub rows: Vec<Row>,
}

impl From<Vec<Row>> for WriteSummary {
    fn from(rows: Vec<Row>) -> Self {
        Self {
            rows_returned: rows.len(),
            rows,
        }
    }
}
