//! Raw result handles and typed row decoding
//!
//! - RawResultSet: the server-side cursor handle, yielding raw wire rows
//! - TypedRowReader: wraps a raw handle and decodes each column per its
//!   declared type, one row at a time

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::types::{ColumnMetadata, Row, Value};

/// One raw wire row: per-column text, `None` for SQL NULL
pub type RawRow = Vec<Option<String>>;

/// A server-side result handle.
///
/// Rows come back in the order the backend produced them; the handle is
/// forward-only and non-restartable. `close` releases the backend resource
/// and must be idempotent.
pub trait RawResultSet: Send {
    /// Fetch the next raw row, or `None` once the result set is exhausted
    fn fetch_next(&mut self) -> Result<Option<RawRow>>;

    /// Release the backend resource. Safe to call more than once.
    fn close(&mut self);
}

fn hex_decode(s: &str) -> Option<Vec<u8>> {
    if s.len() % 2 != 0 {
        return None;
    }
    (0..s.len())
        .step_by(2)
        .map(|i| s.get(i..i + 2).and_then(|p| u8::from_str_radix(p, 16).ok()))
        .collect()
}

/// Normalize a declared type name for matching: uppercase, length/precision
/// suffix stripped (`varchar(255)` matches as `VARCHAR`).
fn base_type(type_name: &str) -> String {
    let bare = match type_name.find('(') {
        Some(idx) => &type_name[..idx],
        None => type_name,
    };
    bare.trim().to_uppercase()
}

fn decode_value(column: &ColumnMetadata, raw: Option<&str>) -> Result<Value> {
    let raw = match raw {
        Some(r) => r,
        None => return Ok(Value::Null),
    };

    let parse_err = |detail: &str| {
        Error::type_conversion(format!(
            "column `{}`: cannot decode {:?} as {}: {}",
            column.name, raw, column.type_name, detail
        ))
    };

    let value = match base_type(&column.type_name).as_str() {
        "BOOLEAN" | "BOOL" => match raw {
            "t" | "true" | "TRUE" | "1" | "y" | "yes" => Value::Bool(true),
            "f" | "false" | "FALSE" | "0" | "n" | "no" => Value::Bool(false),
            _ => return Err(parse_err("not a boolean")),
        },
        "TINYINT" => Value::Int8(raw.parse().map_err(|_| parse_err("not an integer"))?),
        "SMALLINT" | "INT2" => Value::Int16(raw.parse().map_err(|_| parse_err("not an integer"))?),
        "INTEGER" | "INT" | "INT4" | "MEDIUMINT" => {
            Value::Int32(raw.parse().map_err(|_| parse_err("not an integer"))?)
        }
        "BIGINT" | "INT8" => Value::Int64(raw.parse().map_err(|_| parse_err("not an integer"))?),
        "REAL" | "FLOAT4" | "FLOAT" => {
            Value::Float32(raw.parse().map_err(|_| parse_err("not a float"))?)
        }
        "DOUBLE PRECISION" | "DOUBLE" | "FLOAT8" => {
            Value::Float64(raw.parse().map_err(|_| parse_err("not a float"))?)
        }
        "NUMERIC" | "DECIMAL" => Value::Decimal(
            raw.parse::<Decimal>()
                .map_err(|_| parse_err("not a decimal"))?,
        ),
        "BYTEA" | "BLOB" | "BINARY" | "VARBINARY" => match raw.strip_prefix("\\x") {
            Some(hex) => Value::Bytes(hex_decode(hex).ok_or_else(|| parse_err("bad hex"))?),
            None => Value::Bytes(raw.as_bytes().to_vec()),
        },
        "DATE" => Value::Date(
            NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| parse_err("not a date"))?,
        ),
        "TIME" | "TIME WITHOUT TIME ZONE" => Value::Time(
            NaiveTime::parse_from_str(raw, "%H:%M:%S%.f").map_err(|_| parse_err("not a time"))?,
        ),
        "TIMESTAMP" | "TIMESTAMP WITHOUT TIME ZONE" | "DATETIME" => Value::DateTime(
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f")
                .map_err(|_| parse_err("not a timestamp"))?,
        ),
        "TIMESTAMPTZ" | "TIMESTAMP WITH TIME ZONE" => {
            let parsed = DateTime::parse_from_rfc3339(raw)
                .or_else(|_| DateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f%#z"))
                .map_err(|_| parse_err("not a timestamp with zone"))?;
            Value::DateTimeTz(parsed.with_timezone(&Utc))
        }
        "UUID" => Value::Uuid(Uuid::parse_str(raw).map_err(|_| parse_err("not a uuid"))?),
        "JSON" | "JSONB" => {
            Value::Json(serde_json::from_str(raw).map_err(|_| parse_err("not valid json"))?)
        }
        // Unknown types pass through as text, same as unrecognized wire
        // types on the backend side
        _ => Value::String(raw.to_string()),
    };

    Ok(value)
}

/// Decodes a raw result handle into typed rows, one row at a time.
///
/// The reader is forward-only and non-restartable. `has_next` looks one row
/// ahead without consuming it; `next_row` consumes and fails with
/// [`Error::Exhausted`] once the sequence has ended.
pub struct TypedRowReader {
    raw: Box<dyn RawResultSet>,
    columns: Vec<ColumnMetadata>,
    lookahead: Option<Row>,
    finished: bool,
    closed: bool,
}

impl TypedRowReader {
    /// Wrap a raw handle with the column metadata of the query's select
    /// order. Column positions must line up with the raw rows.
    pub fn wrap(raw: Box<dyn RawResultSet>, columns: Vec<ColumnMetadata>) -> Self {
        Self {
            raw,
            columns,
            lookahead: None,
            finished: false,
            closed: false,
        }
    }

    /// Columns of the select order this reader decodes with
    pub fn columns(&self) -> &[ColumnMetadata] {
        &self.columns
    }

    /// Whether another row is available. Does not consume the row.
    pub fn has_next(&mut self) -> Result<bool> {
        if self.lookahead.is_some() {
            return Ok(true);
        }
        if self.finished || self.closed {
            return Ok(false);
        }
        match self.raw.fetch_next()? {
            Some(raw_row) => {
                self.lookahead = Some(self.decode(raw_row)?);
                Ok(true)
            }
            None => {
                self.finished = true;
                Ok(false)
            }
        }
    }

    /// Consume and return the next decoded row.
    pub fn next_row(&mut self) -> Result<Row> {
        if self.has_next()? {
            if let Some(row) = self.lookahead.take() {
                return Ok(row);
            }
        }
        Err(Error::Exhausted)
    }

    /// Release the underlying raw handle. Safe to call more than once.
    pub fn close(&mut self) {
        if !self.closed {
            self.raw.close();
            self.closed = true;
            self.lookahead = None;
            tracing::debug!("typed row reader closed");
        }
    }

    fn decode(&self, raw_row: RawRow) -> Result<Row> {
        if raw_row.len() != self.columns.len() {
            return Err(Error::type_conversion(format!(
                "raw row has {} values, expected {} columns",
                raw_row.len(),
                self.columns.len()
            )));
        }

        let names = self.columns.iter().map(|c| c.name.clone()).collect();
        let values = self
            .columns
            .iter()
            .zip(raw_row.iter())
            .map(|(col, raw)| decode_value(col, raw.as_deref()))
            .collect::<Result<Vec<_>>>()?;

        Ok(Row::new(names, values))
    }
}

impl Drop for TypedRowReader {
    fn drop(&mut self) {
        self.close();
    }
}
