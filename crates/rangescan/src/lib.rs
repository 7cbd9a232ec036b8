//! # rangescan
//!
//! Range-bounded, primary-key-ordered table scanning for incremental table
//! comparison and synchronization.
//!
//! A [`RangeCursor`] scans one table in primary-key order, optionally
//! restricted to an inclusive `[from, to]` interval over the (possibly
//! composite) key, and yields decoded rows one at a time. Two cursors over
//! the same logical range on different databases produce merge-compatible,
//! deterministically ordered row sequences without either table being loaded
//! into memory.
//!
//! ## Features
//!
//! - **Composite-key range predicates**: correct tuple comparisons over any
//!   key arity, with dialect-safe literal quoting per column type
//! - **Deterministic order**: every scan is ordered by the full primary key,
//!   independent of physical storage order
//! - **Bounded memory**: rows are decoded on demand through a forward-only
//!   reader, never buffered wholesale
//! - **Safe lifecycle**: server-side handles are released on `destroy` and
//!   on drop, and teardown is idempotent
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use rangescan::prelude::*;
//!
//! let mut cursor = RangeCursor::new(&session, "users")?;
//!
//! let from = KeyBound::from([("id".to_string(), Value::Int64(100))]);
//! let to = KeyBound::from([("id".to_string(), Value::Int64(200))]);
//!
//! let reader = cursor.prepare_fetch(Some(&from), Some(&to))?;
//! while reader.has_next()? {
//!     let row = reader.next_row()?;
//!     println!("{:?}", row.get_by_name("id"));
//! }
//! cursor.destroy();
//! ```
//!
//! The database session, connection management and schema introspection live
//! behind the [`Session`](session::Session) trait; this crate only consumes
//! that boundary.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod cursor;
pub mod dialect;
pub mod error;
pub mod reader;
pub mod session;
pub mod types;

/// Prelude module for convenient imports
pub mod prelude {
    // Error types
    pub use crate::error::{Error, ErrorCategory, Result};

    // Value and metadata types
    pub use crate::types::{ColumnMetadata, Row, TableMetadata, Value};

    // Dialect types
    pub use crate::dialect::{dialect_for, MySqlDialect, PostgresDialect, SqlDialect};

    // Session boundary
    pub use crate::session::Session;

    // Readers
    pub use crate::reader::{RawResultSet, RawRow, TypedRowReader};

    // Cursor
    pub use crate::cursor::{KeyBound, RangeCursor};
}

// Re-export commonly used items at crate root
pub use cursor::{KeyBound, RangeCursor};
pub use error::{Error, Result};
pub use types::Value;
