//! Indexing constants.
//!
//! These values must be identical at indexing time and at query time, so they
//! live here rather than in deployment configuration.

/// Width in milliseconds of one quantized duration bucket.
///
/// A recording of 185000 ms lands in bucket 92.
pub const QUANTIZED_DURATION_BUCKET_MS: i64 = 2000;

/// Positions skipped between two values of the same multi-valued field.
///
/// Larger than any realistic phrase-query slop, so a phrase cannot match
/// across a value boundary.
pub const POSITION_GAP: usize = 100;

/// Positions skipped between a title and its subtitle segment.
pub const SUBTITLE_POSITION_GAP: usize = 10;

/// Token written for "or-placeholder" fields whose value is missing.
pub const PLACEHOLDER: &str = "-";

/// Version of the per-entity document layout, recorded in index metadata.
pub const SCHEMA_VERSION: u32 = 1;
