//! SQL dialect abstraction for rangescan
//!
//! Renders decoded values as dialect-correct SQL literal text. Scan queries
//! interpolate key bounds as literals (the range predicate is part of the
//! reproducible query text), so every value must go through a dialect here,
//! never raw concatenation.
//!
//! - SqlDialect: trait for vendor-specific literal rendering
//! - PostgresDialect: escape-string literals (`E'...'`)
//! - MySqlDialect: backslash-escaped literals

use crate::types::Value;

fn hex_encode(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        out.push_str(&format!("{:02x}", b));
    }
    out
}

/// SQL dialect for vendor-specific literal rendering
pub trait SqlDialect: Send + Sync {
    /// Get the dialect name
    fn name(&self) -> &'static str;

    /// Escape the body of a string literal (no surrounding quotes)
    fn escape_string(&self, value: &str) -> String;

    /// Render a complete string literal, using the backend's escape-string
    /// form so embedded quotes and backslash sequences cannot break out of
    /// the literal.
    fn string_literal(&self, value: &str) -> String;

    /// Render a binary literal
    fn bytes_literal(&self, value: &[u8]) -> String;

    /// Get the boolean literal
    fn boolean_literal(&self, value: bool) -> &'static str;

    /// Render any value as SQL literal text.
    ///
    /// Numeric values render bare; string-typed values go through
    /// [`SqlDialect::string_literal`]; temporal values, UUIDs and JSON render
    /// quoted in the form the backend parses back to the same value.
    fn quote_literal(&self, value: &Value) -> String {
        match value {
            Value::Null => "null".to_string(),
            Value::Bool(b) => self.boolean_literal(*b).to_string(),
            Value::Int8(n) => n.to_string(),
            Value::Int16(n) => n.to_string(),
            Value::Int32(n) => n.to_string(),
            Value::Int64(n) => n.to_string(),
            Value::Float32(n) => n.to_string(),
            Value::Float64(n) => n.to_string(),
            Value::Decimal(d) => d.to_string(),
            Value::String(s) => self.string_literal(s),
            Value::Bytes(b) => self.bytes_literal(b),
            Value::Date(d) => format!("'{}'", d.format("%Y-%m-%d")),
            Value::Time(t) => format!("'{}'", t.format("%H:%M:%S%.f")),
            Value::DateTime(dt) => format!("'{}'", dt.format("%Y-%m-%d %H:%M:%S%.f")),
            Value::DateTimeTz(dt) => format!("'{}'", dt.format("%Y-%m-%d %H:%M:%S%.f+00")),
            Value::Uuid(u) => format!("'{}'", u),
            Value::Json(j) => self.string_literal(&j.to_string()),
        }
    }
}

/// PostgreSQL dialect
#[derive(Debug, Clone, Default)]
pub struct PostgresDialect;

impl SqlDialect for PostgresDialect {
    fn name(&self) -> &'static str {
        "PostgreSQL"
    }

    fn escape_string(&self, value: &str) -> String {
        value.replace('\\', "\\\\").replace('\'', "''")
    }

    fn string_literal(&self, value: &str) -> String {
        // E'' form: backslash sequences are recognized regardless of the
        // server's standard_conforming_strings setting
        format!("E'{}'", self.escape_string(value))
    }

    fn bytes_literal(&self, value: &[u8]) -> String {
        format!("'\\x{}'", hex_encode(value))
    }

    fn boolean_literal(&self, value: bool) -> &'static str {
        if value {
            "true"
        } else {
            "false"
        }
    }
}

/// MySQL dialect
#[derive(Debug, Clone, Default)]
pub struct MySqlDialect;

impl SqlDialect for MySqlDialect {
    fn name(&self) -> &'static str {
        "MySQL"
    }

    fn escape_string(&self, value: &str) -> String {
        value
            .replace('\\', "\\\\")
            .replace('\'', "\\'")
            .replace('"', "\\\"")
    }

    fn string_literal(&self, value: &str) -> String {
        format!("'{}'", self.escape_string(value))
    }

    fn bytes_literal(&self, value: &[u8]) -> String {
        format!("x'{}'", hex_encode(value))
    }

    fn boolean_literal(&self, value: bool) -> &'static str {
        if value {
            "1"
        } else {
            "0"
        }
    }
}

/// Get a dialect instance by database type name
pub fn dialect_for(name: &str) -> Box<dyn SqlDialect> {
    match name.to_lowercase().as_str() {
        "mysql" | "mariadb" => Box::new(MySqlDialect),
        _ => Box::new(PostgresDialect), // Default to PostgreSQL
    }
}
