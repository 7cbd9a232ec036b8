//! Primary-key range cursor
//!
//! Scans one table in primary-key order, optionally restricted to a closed
//! `[from, to]` interval over the (possibly composite) key, and hands out a
//! typed reader over the decoded rows. Owns the open/consume/release
//! lifecycle of the underlying server-side handle.

use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::reader::TypedRowReader;
use crate::session::Session;
use crate::types::{TableMetadata, Value};

/// A range bound: primary-key column name to bound value.
///
/// A supplied bound must cover exactly the table's primary-key columns; the
/// key order of the generated predicate comes from the table metadata, not
/// from the map.
pub type KeyBound = HashMap<String, Value>;

/// Assembles one scan query. Tracks which range clauses are present so the
/// rendered text is canonical single-spaced SQL with no post-processing.
struct ScanQuery<'q> {
    columns: Vec<&'q str>,
    table: &'q str,
    key: Vec<&'q str>,
    lower: Option<Vec<String>>,
    upper: Option<Vec<String>>,
}

impl ScanQuery<'_> {
    fn render(&self) -> String {
        let key_tuple = self.key.join(", ");
        let mut sql = format!("select {} from {}", self.columns.join(", "), self.table);
        if let Some(vals) = &self.lower {
            sql.push_str(&format!(" where ({}) >= ({})", key_tuple, vals.join(", ")));
        }
        if let Some(vals) = &self.upper {
            let keyword = if self.lower.is_some() { "and" } else { "where" };
            sql.push_str(&format!(" {} ({}) <= ({})", keyword, key_tuple, vals.join(", ")));
        }
        sql.push_str(&format!(" order by {}", key_tuple));
        sql
    }
}

/// A range-bounded, primary-key-ordered cursor over one table.
///
/// Construction resolves the table's metadata once and caches it; the
/// primary-key column list is fixed for the cursor's lifetime. Each
/// [`prepare_fetch`](RangeCursor::prepare_fetch) opens a fresh reader over a
/// newly executed scan query; [`destroy`](RangeCursor::destroy) releases it.
/// At most one reader is open per cursor, and a cursor is not safe for
/// concurrent use without external synchronization.
///
/// Results come back strictly ordered by the primary-key tuple ascending,
/// which is what lets two cursors over "the same" logical range on different
/// databases be merged row by row.
pub struct RangeCursor<'a> {
    session: &'a dyn Session,
    table: String,
    metadata: TableMetadata,
    primary_key_names: Vec<String>,
    reader: Option<TypedRowReader>,
}

impl<'a> RangeCursor<'a> {
    /// Create a cursor over `table`, resolving and caching its metadata.
    ///
    /// Fails with [`Error::Schema`] if the table is unknown or has no
    /// primary key.
    pub fn new(session: &'a dyn Session, table: impl Into<String>) -> Result<Self> {
        let table = table.into();
        let metadata = session.table_metadata(&table)?;
        let primary_key_names: Vec<String> = metadata
            .primary_key_names()
            .into_iter()
            .map(String::from)
            .collect();
        if primary_key_names.is_empty() {
            return Err(Error::schema(format!(
                "table `{}` has no primary key",
                table
            )));
        }
        Ok(Self {
            session,
            table,
            metadata,
            primary_key_names,
            reader: None,
        })
    }

    /// The table this cursor scans
    pub fn table(&self) -> &str {
        &self.table
    }

    /// The cached, ordered primary-key column names
    pub fn primary_key_names(&self) -> &[String] {
        &self.primary_key_names
    }

    /// The cached table metadata
    pub fn metadata(&self) -> &TableMetadata {
        &self.metadata
    }

    /// Whether a reader is currently open
    pub fn is_prepared(&self) -> bool {
        self.reader.is_some()
    }

    /// The currently open reader, if any
    pub fn reader(&mut self) -> Option<&mut TypedRowReader> {
        self.reader.as_mut()
    }

    /// Render the key bound values as quoted literals in key order.
    fn key_literals(&self, bound: &KeyBound) -> Result<Vec<String>> {
        if let Some(extra) = bound
            .keys()
            .find(|k| !self.primary_key_names.iter().any(|pk| pk == *k))
        {
            return Err(Error::invalid_bound(format!(
                "bound for table `{}` names non-key column `{}`",
                self.table, extra
            )));
        }
        self.primary_key_names
            .iter()
            .map(|pk| {
                bound
                    .get(pk)
                    .map(|v| self.session.quote_literal(v))
                    .ok_or_else(|| {
                        Error::invalid_bound(format!(
                            "bound for table `{}` is missing primary key column `{}`",
                            self.table, pk
                        ))
                    })
            })
            .collect()
    }

    /// Build the scan query for an inclusive `[from, to]` key interval.
    ///
    /// Either bound may be absent. A supplied bound must contain exactly the
    /// full primary-key column set, otherwise [`Error::InvalidBound`] is
    /// returned before any SQL is produced. Every bound value is rendered
    /// through the session's literal quoting; the key columns lead the
    /// select list and the result is always ordered by the full key.
    pub fn build_range_query(
        &self,
        from: Option<&KeyBound>,
        to: Option<&KeyBound>,
    ) -> Result<String> {
        let query = ScanQuery {
            columns: self
                .metadata
                .columns_key_first()
                .into_iter()
                .map(|c| c.name.as_str())
                .collect(),
            table: &self.table,
            key: self.primary_key_names.iter().map(String::as_str).collect(),
            lower: from.map(|b| self.key_literals(b)).transpose()?,
            upper: to.map(|b| self.key_literals(b)).transpose()?,
        };
        Ok(query.render())
    }

    /// Execute a scan over the given key interval and open a reader on it.
    ///
    /// Any previously open reader is released first; bound validation runs
    /// before that, so an invalid bound leaves the cursor untouched. If the
    /// session rejects the query, no reader is stored and the cursor is left
    /// idle, ready for another attempt.
    pub fn prepare_fetch(
        &mut self,
        from: Option<&KeyBound>,
        to: Option<&KeyBound>,
    ) -> Result<&mut TypedRowReader> {
        let sql = self.build_range_query(from, to)?;
        self.destroy();
        tracing::debug!(table = %self.table, sql = %sql, "opening range scan");
        let raw = self.session.execute(&sql)?;
        let columns = self
            .metadata
            .columns_key_first()
            .into_iter()
            .cloned()
            .collect();
        Ok(self.reader.insert(TypedRowReader::wrap(raw, columns)))
    }

    /// Release the open reader and its server-side resource, if any.
    ///
    /// Safe to call any number of times; the cursor stays usable for
    /// another [`prepare_fetch`](RangeCursor::prepare_fetch).
    pub fn destroy(&mut self) {
        if let Some(mut reader) = self.reader.take() {
            reader.close();
            tracing::debug!(table = %self.table, "range scan destroyed");
        }
    }
}

impl Drop for RangeCursor<'_> {
    fn drop(&mut self) {
        self.destroy();
    }
}
