//! Tests for error construction, display, and classification.

use std::error::Error as _;

use mbsearch_core::Error;

#[test]
fn test_source_query_with_source() {
    let source = std::io::Error::other("connection reset");
    let err = Error::source_query_with("window [1, 100] failed", source);
    assert_eq!(err.to_string(), "Source query error: window [1, 100] failed");
    assert!(err.source().is_some());
    assert!(err.is_retryable(), "Source errors can be retried per window");
}

#[test]
fn test_sink_write_error() {
    let err = Error::sink_write("commit failed");
    assert_eq!(err.to_string(), "Sink write error: commit failed");
    assert!(!err.is_retryable(), "Sink errors are surfaced, not retried");
    assert!(err.source().is_none());
}

#[test]
fn test_sink_write_with_source() {
    let source = std::io::Error::other("disk full");
    let err = Error::sink_write_with("failed to add document", source);
    assert!(err.source().is_some());
}

#[test]
fn test_search_error() {
    let err = Error::search("failed to reload index reader");
    assert_eq!(err.to_string(), "Search error: failed to reload index reader");
    assert!(!err.is_retryable());
    assert!(!err.is_user_error());

    let source = std::io::Error::other("meta.json missing");
    let err = Error::search_with("failed to open tag index", source);
    assert!(matches!(err, Error::Search { .. }));
    assert!(err.source().is_some());
}

#[test]
fn test_query_syntax_error() {
    let err = Error::query_syntax("artist:\"open", "unterminated phrase");
    match &err {
        Error::QuerySyntax { query, message } => {
            assert_eq!(query, "artist:\"open");
            assert_eq!(message, "unterminated phrase");
        }
        _ => unreachable!("Expected QuerySyntax error"),
    }
    assert!(err.is_user_error());
    assert!(!err.is_retryable());
}

#[test]
fn test_malformed_row_error() {
    let err = Error::malformed_row("recording.parents", "trackid", "is NULL");
    assert_eq!(
        err.to_string(),
        "Malformed row from 'recording.parents': column 'trackid' is NULL"
    );
    assert!(!err.is_retryable());
}

#[test]
fn test_configuration_error() {
    let err = Error::config("field 'isrc' is not defined for artist");
    assert_eq!(
        err.to_string(),
        "Configuration error: field 'isrc' is not defined for artist"
    );
    assert!(!err.is_user_error());
}

#[test]
fn test_io_error_conversion() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "meta.json");
    let err: Error = io_err.into();
    assert!(matches!(err, Error::Io(_)));
    assert!(err.is_retryable());
}
