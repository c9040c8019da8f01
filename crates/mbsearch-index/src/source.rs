//! Relational source contract and the SQLite implementation.
//!
//! Every query an entity runs is a [`NamedQuery`]. Window queries take the
//! window bounds as their two positional parameters (`?1` = min id,
//! `?2` = max id); the row count probe takes the max id as `?1`.

use mbsearch_core::{Error, Result};
use rusqlite::types::ValueRef;
use rusqlite::{Connection, OpenFlags, Params, params};

use crate::window::BatchWindow;

/// A SQL value as read from the source.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    /// SQL NULL.
    Null,
    /// Integer value.
    Integer(i64),
    /// Floating point value.
    Real(f64),
    /// Text value.
    Text(String),
}

/// One result row, tagged with the query that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceRow {
    origin: &'static str,
    columns: Vec<(String, SqlValue)>,
}

impl SourceRow {
    /// Create an empty row.
    pub fn new(origin: &'static str) -> Self {
        Self {
            origin,
            columns: Vec::new(),
        }
    }

    /// Builder-style column append.
    pub fn with(mut self, column: impl Into<String>, value: SqlValue) -> Self {
        self.push(column, value);
        self
    }

    /// Append a column.
    pub fn push(&mut self, column: impl Into<String>, value: SqlValue) {
        self.columns.push((column.into(), value));
    }

    /// Name of the query that produced the row.
    pub fn origin(&self) -> &'static str {
        self.origin
    }

    /// Raw value of a column.
    pub fn value(&self, column: &str) -> Option<&SqlValue> {
        self.columns
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    /// Required integer column.
    pub fn get_i64(&self, column: &str) -> Result<i64> {
        self.get_opt_i64(column)?
            .ok_or_else(|| Error::malformed_row(self.origin, column, "is NULL"))
    }

    /// Nullable integer column.
    pub fn get_opt_i64(&self, column: &str) -> Result<Option<i64>> {
        match self.require(column)? {
            SqlValue::Null => Ok(None),
            SqlValue::Integer(value) => Ok(Some(*value)),
            other => Err(self.type_mismatch(column, "an integer", other)),
        }
    }

    /// Required text column.
    pub fn get_str(&self, column: &str) -> Result<&str> {
        self.get_opt_str(column)?
            .ok_or_else(|| Error::malformed_row(self.origin, column, "is NULL"))
    }

    /// Nullable text column.
    pub fn get_opt_str(&self, column: &str) -> Result<Option<&str>> {
        match self.require(column)? {
            SqlValue::Null => Ok(None),
            SqlValue::Text(value) => Ok(Some(value)),
            other => Err(self.type_mismatch(column, "text", other)),
        }
    }

    fn require(&self, column: &str) -> Result<&SqlValue> {
        self.value(column)
            .ok_or_else(|| Error::malformed_row(self.origin, column, "is missing"))
    }

    fn type_mismatch(&self, column: &str, expected: &str, found: &SqlValue) -> Error {
        Error::malformed_row(
            self.origin,
            column,
            format!("is not {expected} (found {found:?})"),
        )
    }
}

/// A query with a stable name used in logs and errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NamedQuery {
    /// Name, e.g. `recording.isrcs`.
    pub name: &'static str,
    /// SQL text.
    pub sql: &'static str,
}

impl NamedQuery {
    /// Create a named query.
    pub const fn new(name: &'static str, sql: &'static str) -> Self {
        Self { name, sql }
    }
}

/// Read access to the relational database.
///
/// One source is one connection; it is used by a single worker at a time.
pub trait RelationalSource {
    /// Highest parent id, or 0 when the table is empty.
    fn max_id(&self, query: &NamedQuery) -> Result<i64>;

    /// Number of parent rows with an id up to `max_id`.
    fn row_count(&self, query: &NamedQuery, max_id: i64) -> Result<i64>;

    /// Rows of a window query, in source order.
    fn query_window(&self, query: &NamedQuery, window: BatchWindow) -> Result<Vec<SourceRow>>;
}

/// [`RelationalSource`] over a SQLite connection.
///
/// Statements are prepared once per connection and reused across windows.
pub struct SqliteSource {
    conn: Connection,
}

impl SqliteSource {
    /// Open a database file read-only.
    pub fn open(path: &std::path::Path) -> Result<Self> {
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|e| {
            Error::source_query_with(format!("failed to open {}", path.display()), e)
        })?;
        Ok(Self::from_connection(conn))
    }

    /// Open an empty in-memory database.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| Error::source_query_with("failed to open in-memory database", e))?;
        Ok(Self::from_connection(conn))
    }

    /// Wrap an existing connection.
    pub fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }

    /// Get the underlying connection.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    fn scalar(&self, query: &NamedQuery, params: impl Params) -> Result<Option<i64>> {
        let mut stmt = self.conn.prepare_cached(query.sql).map_err(|e| {
            Error::source_query_with(format!("failed to prepare {}", query.name), e)
        })?;
        stmt.query_row(params, |row| row.get::<_, Option<i64>>(0))
            .map_err(|e| Error::source_query_with(format!("failed to run {}", query.name), e))
    }
}

impl RelationalSource for SqliteSource {
    fn max_id(&self, query: &NamedQuery) -> Result<i64> {
        Ok(self.scalar(query, params![])?.unwrap_or(0))
    }

    fn row_count(&self, query: &NamedQuery, max_id: i64) -> Result<i64> {
        Ok(self.scalar(query, params![max_id])?.unwrap_or(0))
    }

    fn query_window(&self, query: &NamedQuery, window: BatchWindow) -> Result<Vec<SourceRow>> {
        let mut stmt = self.conn.prepare_cached(query.sql).map_err(|e| {
            Error::source_query_with(format!("failed to prepare {}", query.name), e)
        })?;
        let names: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();

        let mut rows = stmt
            .query(params![window.min_id, window.max_id])
            .map_err(|e| Error::source_query_with(format!("failed to run {}", query.name), e))?;

        let mut out = Vec::new();
        while let Some(row) = rows
            .next()
            .map_err(|e| Error::source_query_with(format!("failed to read {}", query.name), e))?
        {
            let mut source_row = SourceRow::new(query.name);
            for (idx, name) in names.iter().enumerate() {
                let value = match row.get_ref(idx).map_err(|e| {
                    Error::source_query_with(format!("failed to read {}", query.name), e)
                })? {
                    ValueRef::Null => SqlValue::Null,
                    ValueRef::Integer(value) => SqlValue::Integer(value),
                    ValueRef::Real(value) => SqlValue::Real(value),
                    ValueRef::Text(bytes) => SqlValue::Text(
                        std::str::from_utf8(bytes)
                            .map_err(|_| Error::malformed_row(query.name, name, "is not UTF-8"))?
                            .to_string(),
                    ),
                    ValueRef::Blob(_) => {
                        return Err(Error::malformed_row(query.name, name, "is a blob"));
                    }
                };
                source_row.push(name.clone(), value);
            }
            out.push(source_row);
        }
        Ok(out)
    }
}

impl std::fmt::Debug for SqliteSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteSource")
            .field("path", &self.conn.path())
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
