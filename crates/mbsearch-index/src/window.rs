//! Batch windows and per-window child row groups.

use std::collections::HashMap;
use std::fmt;

use mbsearch_core::{Error, Result};
use serde::Serialize;

use crate::credit::ArtistCredit;
use crate::source::SourceRow;

/// An inclusive, contiguous range of parent ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct BatchWindow {
    /// Lowest id in the window.
    pub min_id: i64,
    /// Highest id in the window.
    pub max_id: i64,
}

impl BatchWindow {
    /// Create a window. `min_id` must not exceed `max_id`.
    pub fn new(min_id: i64, max_id: i64) -> Self {
        debug_assert!(min_id <= max_id, "empty window [{min_id}, {max_id}]");
        Self { min_id, max_id }
    }

    /// Split `1..=max_id` into consecutive windows of `window_size` ids.
    ///
    /// The last window is shortened to end at `max_id`. A `max_id` below 1
    /// yields no windows.
    pub fn split(max_id: i64, window_size: i64) -> Result<Vec<BatchWindow>> {
        if window_size <= 0 {
            return Err(Error::config(format!(
                "window size must be positive, got {window_size}"
            )));
        }

        let mut windows = Vec::new();
        let mut min_id = 1;
        while min_id <= max_id {
            let end = min_id.saturating_add(window_size - 1).min(max_id);
            windows.push(BatchWindow::new(min_id, end));
            if end == i64::MAX {
                break;
            }
            min_id = end + 1;
        }
        Ok(windows)
    }

    /// Whether `id` lies in the window.
    pub fn contains(&self, id: i64) -> bool {
        (self.min_id..=self.max_id).contains(&id)
    }

    /// Number of ids covered.
    pub fn len(&self) -> u64 {
        self.max_id.abs_diff(self.min_id) + 1
    }

    /// Always false: a window covers at least one id.
    pub fn is_empty(&self) -> bool {
        false
    }
}

impl fmt::Display for BatchWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.min_id, self.max_id)
    }
}

/// Child rows of one relationship, keyed by parent id, in source order.
pub type ChildRowGroup = HashMap<i64, Vec<SourceRow>>;

/// Group child rows by the parent id found in `parent_column`.
///
/// Rows keep their relative order within each group.
pub fn group_by_parent(rows: Vec<SourceRow>, parent_column: &str) -> Result<ChildRowGroup> {
    let mut groups = ChildRowGroup::new();
    for row in rows {
        let parent = row.get_i64(parent_column)?;
        groups.entry(parent).or_default().push(row);
    }
    Ok(groups)
}

/// Everything extracted for one window besides the parent rows.
#[derive(Debug, Default)]
pub struct WindowGroups {
    children: HashMap<&'static str, ChildRowGroup>,
    credits: HashMap<i64, ArtistCredit>,
}

impl WindowGroups {
    /// Create empty groups.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the grouped rows of a relationship.
    pub fn insert_children(&mut self, relation: &'static str, group: ChildRowGroup) {
        self.children.insert(relation, group);
    }

    /// Store the assembled artist credits, keyed by parent id.
    pub fn insert_credits(&mut self, credits: HashMap<i64, ArtistCredit>) {
        self.credits = credits;
    }

    /// Child rows of `parent` for a relationship; empty when there are none.
    pub fn children(&self, relation: &str, parent: i64) -> &[SourceRow] {
        self.children
            .get(relation)
            .and_then(|group| group.get(&parent))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Artist credit of `parent`, if any.
    pub fn credit(&self, parent: i64) -> Option<&ArtistCredit> {
        self.credits.get(&parent)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::source::SqlValue;

    #[test]
    fn test_split_even() {
        let windows = BatchWindow::split(6, 2).unwrap();
        assert_eq!(windows, vec![
            BatchWindow::new(1, 2),
            BatchWindow::new(3, 4),
            BatchWindow::new(5, 6)
        ]);
    }

    #[test]
    fn test_split_short_tail() {
        let windows = BatchWindow::split(5, 2).unwrap();
        assert_eq!(windows.last(), Some(&BatchWindow::new(5, 5)));
        assert_eq!(windows.len(), 3);
    }

    #[test]
    fn test_split_empty_source() {
        assert!(BatchWindow::split(0, 100).unwrap().is_empty());
    }

    #[test]
    fn test_split_rejects_zero_size() {
        assert!(BatchWindow::split(10, 0).is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(BatchWindow::new(1, 100).to_string(), "[1, 100]");
    }

    #[test]
    fn test_group_by_parent_keeps_order() {
        let rows = vec![
            SourceRow::new("isrcs")
                .with("recording", SqlValue::Integer(1))
                .with("isrc", SqlValue::Text("A".into())),
            SourceRow::new("isrcs")
                .with("recording", SqlValue::Integer(2))
                .with("isrc", SqlValue::Text("B".into())),
            SourceRow::new("isrcs")
                .with("recording", SqlValue::Integer(1))
                .with("isrc", SqlValue::Text("C".into())),
        ];
        let groups = group_by_parent(rows, "recording").unwrap();
        let isrcs: Vec<&str> = groups[&1]
            .iter()
            .map(|r| r.get_str("isrc").unwrap())
            .collect();
        assert_eq!(isrcs, vec!["A", "C"]);
        assert_eq!(groups[&2].len(), 1);
    }

    #[test]
    fn test_group_by_parent_rejects_null_parent() {
        let rows = vec![SourceRow::new("isrcs").with("recording", SqlValue::Null)];
        assert!(group_by_parent(rows, "recording").is_err());
    }

    #[test]
    fn test_missing_children_are_empty() {
        let groups = WindowGroups::new();
        assert!(groups.children("recording.isrcs", 1).is_empty());
        assert!(groups.credit(1).is_none());
    }

    proptest! {
        #[test]
        fn test_split_covers_ids_exactly_once(max_id in 0i64..5_000, size in 1i64..700) {
            let windows = BatchWindow::split(max_id, size).unwrap();
            let covered: u64 = windows.iter().map(BatchWindow::len).sum();
            prop_assert_eq!(covered, max_id.max(0) as u64);
            let mut next = 1;
            for window in &windows {
                prop_assert_eq!(window.min_id, next);
                prop_assert!(window.len() <= size as u64);
                next = window.max_id + 1;
            }
        }
    }
}
