//! Error types for mbsearch.

/// Errors that can occur while indexing or querying.
///
/// All error variants are marked with `#[non_exhaustive]` to allow
/// adding new error types without breaking changes.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The relational source is unreachable or a query is malformed.
    ///
    /// Fatal to the current window; re-running the window may succeed.
    #[error("Source query error: {message}")]
    SourceQuery {
        /// Human-readable error message
        message: String,
        /// Source error if available
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The document sink rejected a document or a commit.
    #[error("Sink write error: {message}")]
    SinkWrite {
        /// Human-readable error message
        message: String,
        /// Source error if available
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Opening, reloading or searching an index failed.
    #[error("Search error: {message}")]
    Search {
        /// Human-readable error message
        message: String,
        /// Source error if available
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A user query does not conform to the query grammar.
    #[error("Query syntax error in {query:?}: {message}")]
    QuerySyntax {
        /// The query text as supplied by the caller
        query: String,
        /// What the parser rejected
        message: String,
    },

    /// Field or entity configuration is inconsistent.
    ///
    /// This is a programming error and is detected at start-up.
    #[error("Configuration error: {message}")]
    Configuration {
        /// What configuration is problematic
        message: String,
    },

    /// A relational row does not have the expected shape.
    #[error("Malformed row from '{origin}': column '{column}' {message}")]
    MalformedRow {
        /// Name of the query that produced the row
        origin: String,
        /// Offending column
        column: String,
        /// What is wrong with it
        message: String,
    },

    /// I/O error (index directories, metadata files, config files)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file could not be parsed
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

/// Convenience `Result` type alias for mbsearch operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Returns whether re-running the failed unit of work may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::SourceQuery { .. } => true,
            Error::Io(_) => true,
            Error::SinkWrite { .. } => false,
            Error::Search { .. } => false,
            Error::QuerySyntax { .. } => false,
            Error::Configuration { .. } => false,
            Error::MalformedRow { .. } => false,
            Error::ConfigParse(_) => false,
        }
    }

    /// Returns whether this error was caused by the caller's query text.
    pub fn is_user_error(&self) -> bool {
        matches!(self, Error::QuerySyntax { .. })
    }

    /// Creates a new source query error with a message.
    pub fn source_query<S: Into<String>>(message: S) -> Self {
        Error::SourceQuery {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a new source query error with a message and source error.
    pub fn source_query_with<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Error::SourceQuery {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates a new sink write error with a message.
    pub fn sink_write<S: Into<String>>(message: S) -> Self {
        Error::SinkWrite {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a new sink write error with a message and source error.
    pub fn sink_write_with<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Error::SinkWrite {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates a new search error with a message.
    pub fn search<S: Into<String>>(message: S) -> Self {
        Error::Search {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a new search error with a message and source error.
    pub fn search_with<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Error::Search {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates a new query syntax error.
    pub fn query_syntax<Q: Into<String>, S: Into<String>>(query: Q, message: S) -> Self {
        Error::QuerySyntax {
            query: query.into(),
            message: message.into(),
        }
    }

    /// Creates a new configuration error.
    pub fn config<S: Into<String>>(message: S) -> Self {
        Error::Configuration {
            message: message.into(),
        }
    }

    /// Creates a new malformed row error.
    pub fn malformed_row<O, C, S>(origin: O, column: C, message: S) -> Self
    where
        O: Into<String>,
        C: Into<String>,
        S: Into<String>,
    {
        Error::MalformedRow {
            origin: origin.into(),
            column: column.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_query_is_retryable() {
        let err = Error::source_query("connection refused");
        assert_eq!(err.to_string(), "Source query error: connection refused");
        assert!(err.is_retryable());
    }

    #[test]
    fn test_configuration_is_not_retryable() {
        let err = Error::config("field 'foo' is not defined");
        assert!(!err.is_retryable());
        assert!(!err.is_user_error());
    }

    #[test]
    fn test_query_syntax_is_user_error() {
        let err = Error::query_syntax("artist:(", "unbalanced parenthesis");
        assert!(err.is_user_error());
        assert!(err.to_string().contains("artist:("));
    }
}
