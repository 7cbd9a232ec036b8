//! Error types for rangescan
//!
//! Classifies failures so callers can tell schema problems and caller bugs
//! apart from backend failures that may succeed against a fresh session:
//! - Schema / bound errors: fixed input required, never retriable
//! - Query errors: retriable with a fresh session, never blindly

use std::fmt;
use thiserror::Error;

/// Result type for rangescan operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error categories for classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Schema-related errors (unknown table, keyless table)
    Schema,
    /// Malformed range bound supplied by the caller
    InvalidBound,
    /// Query execution errors
    Query,
    /// Row pulled past the end of a result sequence
    Exhausted,
    /// Raw wire value could not be decoded as its declared type
    TypeConversion,
}

impl ErrorCategory {
    /// Whether errors in this category are worth retrying against a fresh
    /// session. Caller bugs and schema mismatches are not.
    #[inline]
    pub const fn is_retriable(self) -> bool {
        matches!(self, Self::Query)
    }
}

/// Main error type for rangescan
#[derive(Error, Debug)]
#[allow(missing_docs)]
pub enum Error {
    /// Table missing, or table has no primary key
    #[error("schema error: {message}")]
    Schema { message: String },

    /// Range bound does not cover exactly the primary-key column set
    #[error("invalid bound: {message}")]
    InvalidBound { message: String },

    /// Backend rejected or failed the generated SQL
    #[error("query error: {message}")]
    Query {
        message: String,
        sql: Option<String>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A row was requested after the sequence ended
    #[error("row sequence exhausted")]
    Exhausted,

    /// A raw column value did not parse as its declared type
    #[error("type conversion error: {message}")]
    TypeConversion { message: String },
}

impl Error {
    /// Get the error category
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Schema { .. } => ErrorCategory::Schema,
            Self::InvalidBound { .. } => ErrorCategory::InvalidBound,
            Self::Query { .. } => ErrorCategory::Query,
            Self::Exhausted => ErrorCategory::Exhausted,
            Self::TypeConversion { .. } => ErrorCategory::TypeConversion,
        }
    }

    /// Whether this error is retriable
    #[inline]
    pub fn is_retriable(&self) -> bool {
        self.category().is_retriable()
    }

    /// Create a schema error
    pub fn schema(message: impl Into<String>) -> Self {
        Self::Schema {
            message: message.into(),
        }
    }

    /// Create an invalid-bound error
    pub fn invalid_bound(message: impl Into<String>) -> Self {
        Self::InvalidBound {
            message: message.into(),
        }
    }

    /// Create a query error
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
            sql: None,
            source: None,
        }
    }

    /// Create a query error carrying the offending SQL
    pub fn query_with_sql(message: impl Into<String>, sql: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
            sql: Some(sql.into()),
            source: None,
        }
    }

    /// Create a query error with an underlying backend error
    pub fn query_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Query {
            message: message.into(),
            sql: None,
            source: Some(Box::new(source)),
        }
    }

    /// Create a type conversion error
    pub fn type_conversion(message: impl Into<String>) -> Self {
        Self::TypeConversion {
            message: message.into(),
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Schema => write!(f, "schema"),
            Self::InvalidBound => write!(f, "invalid_bound"),
            Self::Query => write!(f, "query"),
            Self::Exhausted => write!(f, "exhausted"),
            Self::TypeConversion => write!(f, "type_conversion"),
        }
    }
}
