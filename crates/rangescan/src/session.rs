//! Session boundary for rangescan
//!
//! The cursor does not own connections, schema introspection or quoting
//! rules; it talks to a Session, which owns the connection lifetime and
//! answers metadata, quoting and execution requests. Implementations live
//! outside this crate.

use crate::error::Result;
use crate::reader::RawResultSet;
use crate::types::{TableMetadata, Value};

/// A database session a cursor scans through.
///
/// A session is assumed to run one query at a time; cursors that must run
/// concurrently need a session each. Read consistency across a whole scan
/// (for example an enclosing transaction) is the session's business, not the
/// cursor's.
pub trait Session: Send + Sync {
    /// Resolve a table's metadata: columns in declared order with their
    /// types and primary-key positions.
    ///
    /// Fails with [`crate::Error::Schema`] if the table is unknown.
    fn table_metadata(&self, table: &str) -> Result<TableMetadata>;

    /// Render a value as dialect-correct SQL literal text, including safe
    /// escaping for string-typed values.
    fn quote_literal(&self, value: &Value) -> String;

    /// Run a read query, returning the raw server-side result handle.
    ///
    /// Fails with [`crate::Error::Query`] on any backend error.
    fn execute(&self, sql: &str) -> Result<Box<dyn RawResultSet>>;

    /// Ordered primary-key column names of a table.
    fn primary_key_names(&self, table: &str) -> Result<Vec<String>> {
        let meta = self.table_metadata(table)?;
        Ok(meta
            .primary_key_names()
            .into_iter()
            .map(String::from)
            .collect())
    }

    /// Full column list of a table, primary-key columns first.
    fn column_names(&self, table: &str) -> Result<Vec<String>> {
        let meta = self.table_metadata(table)?;
        Ok(meta
            .columns_key_first()
            .into_iter()
            .map(|c| c.name.clone())
            .collect())
    }
}
