//! Shared in-memory session for integration tests.
//!
//! Stands in for a real database session: serves canned table metadata and
//! canned raw result rows, records every executed SQL string, and tracks
//! whether each handed-out raw handle was closed.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use rangescan::prelude::*;

/// Raw result handle over canned rows with an observable closed flag.
pub struct MockResultSet {
    rows: std::vec::IntoIter<RawRow>,
    closed: Arc<AtomicBool>,
}

impl MockResultSet {
    pub fn new(rows: Vec<RawRow>) -> Self {
        Self {
            rows: rows.into_iter(),
            closed: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn closed_flag(&self) -> Arc<AtomicBool> {
        self.closed.clone()
    }
}

impl RawResultSet for MockResultSet {
    fn fetch_next(&mut self) -> rangescan::Result<Option<RawRow>> {
        if self.closed.load(Ordering::SeqCst) {
            return Ok(None);
        }
        Ok(self.rows.next())
    }

    fn close(&mut self) {
        self.closed.store(true, Ordering::SeqCst);
    }
}

/// In-memory session: canned metadata and rows, recorded SQL.
pub struct MockSession {
    tables: HashMap<String, TableMetadata>,
    rows: Mutex<Vec<RawRow>>,
    dialect: PostgresDialect,
    executed: Mutex<Vec<String>>,
    handles: Mutex<Vec<Arc<AtomicBool>>>,
    fail_next_execute: AtomicBool,
}

impl MockSession {
    pub fn new() -> Self {
        Self {
            tables: HashMap::new(),
            rows: Mutex::new(Vec::new()),
            dialect: PostgresDialect,
            executed: Mutex::new(Vec::new()),
            handles: Mutex::new(Vec::new()),
            fail_next_execute: AtomicBool::new(false),
        }
    }

    pub fn with_table(mut self, meta: TableMetadata) -> Self {
        self.tables.insert(meta.name.clone(), meta);
        self
    }

    /// Canned raw rows returned by subsequent executes.
    pub fn with_rows(self, rows: Vec<RawRow>) -> Self {
        *self.rows.lock().unwrap() = rows;
        self
    }

    pub fn set_rows(&self, rows: Vec<RawRow>) {
        *self.rows.lock().unwrap() = rows;
    }

    /// Make the next execute fail with a query error.
    pub fn fail_next_execute(&self) {
        self.fail_next_execute.store(true, Ordering::SeqCst);
    }

    pub fn executed_sql(&self) -> Vec<String> {
        self.executed.lock().unwrap().clone()
    }

    pub fn handle_count(&self) -> usize {
        self.handles.lock().unwrap().len()
    }

    /// Whether the n-th handed-out raw handle has been closed.
    pub fn handle_closed(&self, idx: usize) -> bool {
        self.handles.lock().unwrap()[idx].load(Ordering::SeqCst)
    }
}

impl Session for MockSession {
    fn table_metadata(&self, table: &str) -> rangescan::Result<TableMetadata> {
        self.tables
            .get(table)
            .cloned()
            .ok_or_else(|| rangescan::Error::schema(format!("table `{}` not found", table)))
    }

    fn quote_literal(&self, value: &Value) -> String {
        self.dialect.quote_literal(value)
    }

    fn execute(&self, sql: &str) -> rangescan::Result<Box<dyn RawResultSet>> {
        self.executed.lock().unwrap().push(sql.to_string());
        if self.fail_next_execute.swap(false, Ordering::SeqCst) {
            return Err(rangescan::Error::query_with_sql("forced failure", sql));
        }
        let result = MockResultSet::new(self.rows.lock().unwrap().clone());
        self.handles.lock().unwrap().push(result.closed_flag());
        Ok(Box::new(result))
    }
}

/// `people`: single integer key plus one payload column.
pub fn people_table() -> TableMetadata {
    TableMetadata::with_columns(
        "people",
        vec![
            ColumnMetadata::new("id", "integer").at(1).primary_key(1),
            ColumnMetadata::new("name", "varchar(40)").at(2),
        ],
    )
}

/// `readings`: composite integer key plus one payload column.
pub fn readings_table() -> TableMetadata {
    TableMetadata::with_columns(
        "readings",
        vec![
            ColumnMetadata::new("station_id", "integer")
                .at(1)
                .primary_key(1),
            ColumnMetadata::new("sample_no", "integer")
                .at(2)
                .primary_key(2),
            ColumnMetadata::new("value", "double precision").at(3),
        ],
    )
}

/// `notes`: text key plus one payload column.
pub fn notes_table() -> TableMetadata {
    TableMetadata::with_columns(
        "notes",
        vec![
            ColumnMetadata::new("text_id", "varchar(10)")
                .at(1)
                .primary_key(1),
            ColumnMetadata::new("name", "varchar(40)").at(2),
        ],
    )
}

/// `scratch`: no primary key at all.
pub fn scratch_table() -> TableMetadata {
    TableMetadata::with_columns(
        "scratch",
        vec![ColumnMetadata::new("payload", "text").at(1)],
    )
}
