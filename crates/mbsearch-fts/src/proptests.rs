//! Property-based tests for analysis.
