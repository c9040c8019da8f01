//! Per-entity queries and document builders.
//!
//! Each submodule declares one `DESCRIPTOR`: the SQL of the entity's parent
//! and relationship queries and the function mapping a parent row plus its
//! window groups to a document.

pub mod artist;
pub mod recording;
pub mod release;
pub mod release_group;
pub mod tag;

use mbsearch_core::Result;
use mbsearch_core::constants::QUANTIZED_DURATION_BUCKET_MS;

use crate::source::SourceRow;

/// Duration bucket of a length in milliseconds.
pub fn quantize_duration(length_ms: i64) -> i64 {
    length_ms.div_euclid(QUANTIZED_DURATION_BUCKET_MS)
}

/// Format a partial date as `YYYY`, `YYYY-MM` or `YYYY-MM-DD`.
///
/// Missing components truncate the date; without a year there is no date.
pub fn format_partial_date(year: Option<i64>, month: Option<i64>, day: Option<i64>) -> Option<String> {
    let year = year?;
    Some(match (month, day) {
        (Some(month), Some(day)) => format!("{year:04}-{month:02}-{day:02}"),
        (Some(month), None) => format!("{year:04}-{month:02}"),
        (None, _) => format!("{year:04}"),
    })
}

/// Read the `{prefix}_year`, `{prefix}_month` and `{prefix}_day` columns.
pub(crate) fn partial_date(row: &SourceRow, prefix: &str) -> Result<Option<String>> {
    Ok(format_partial_date(
        row.get_opt_i64(&format!("{prefix}_year"))?,
        row.get_opt_i64(&format!("{prefix}_month"))?,
        row.get_opt_i64(&format!("{prefix}_day"))?,
    ))
}

// ============================================================================
// Tests
// ============================================================================
