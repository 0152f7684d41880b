//! Structured key/value fields attached to log records.
//!
//! Fields travel alongside the message instead of being interpolated into it,
//! so the JSON sink can emit them as real object members.

use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::time::Duration;

/// A typed value carried by a [`Field`].
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// UTF-8 text
    Str(String),
    /// Signed integer
    Int(i64),
    /// Unsigned integer
    Uint(u64),
    /// Floating point number
    Float(f64),
    /// Boolean flag
    Bool(bool),
    /// Rendered error message
    Error(String),
    /// Elapsed time
    Duration(Duration),
    /// Arbitrary serialized value
    Json(Value),
}

impl FieldValue {
    /// JSON rendering shared by the console and file encoders.
    pub fn to_json(&self) -> Value {
        match self {
            FieldValue::Str(s) | FieldValue::Error(s) => Value::String(s.clone()),
            FieldValue::Int(n) => Value::from(*n),
            FieldValue::Uint(n) => Value::from(*n),
            // NaN and infinities have no JSON number form
            FieldValue::Float(f) => serde_json::Number::from_f64(*f)
                .map(Value::Number)
                .unwrap_or_else(|| Value::String(f.to_string())),
            FieldValue::Bool(b) => Value::Bool(*b),
            FieldValue::Duration(d) => Value::String(format_duration(*d)),
            FieldValue::Json(v) => v.clone(),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Str(s) | FieldValue::Error(s) => f.write_str(s),
            FieldValue::Duration(d) => f.write_str(&format_duration(*d)),
            other => write!(f, "{}", other.to_json()),
        }
    }
}

/// A structured key/value pair.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    /// Key as it appears in the output object
    pub key: String,
    /// Typed value
    pub value: FieldValue,
}

impl Field {
    /// Build a field from any key and value.
    pub fn new(key: impl Into<String>, value: FieldValue) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }

    /// String field.
    pub fn string(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(key, FieldValue::Str(value.into()))
    }

    /// Signed integer field.
    pub fn int(key: impl Into<String>, value: i64) -> Self {
        Self::new(key, FieldValue::Int(value))
    }

    /// Unsigned integer field.
    pub fn uint(key: impl Into<String>, value: u64) -> Self {
        Self::new(key, FieldValue::Uint(value))
    }

    /// Floating point field.
    pub fn float(key: impl Into<String>, value: f64) -> Self {
        Self::new(key, FieldValue::Float(value))
    }

    /// Boolean field.
    pub fn bool(key: impl Into<String>, value: bool) -> Self {
        Self::new(key, FieldValue::Bool(value))
    }

    /// Error field under the conventional `error` key.
    pub fn error(err: &dyn std::error::Error) -> Self {
        Self::named_error("error", err)
    }

    /// Error field under a custom key.
    pub fn named_error(key: impl Into<String>, err: &dyn std::error::Error) -> Self {
        Self::new(key, FieldValue::Error(err.to_string()))
    }

    /// Duration field, rendered as `1.5s`, `250ms` and so on.
    pub fn duration(key: impl Into<String>, value: Duration) -> Self {
        Self::new(key, FieldValue::Duration(value))
    }

    /// Any serializable value.
    ///
    /// A value that fails to serialize becomes a string describing the failure.
    pub fn any<T: Serialize + ?Sized>(key: impl Into<String>, value: &T) -> Self {
        let value = match serde_json::to_value(value) {
            Ok(v) => FieldValue::Json(v),
            Err(e) => FieldValue::Str(format!("<unserializable: {}>", e)),
        };
        Self::new(key, value)
    }
}

/// Render a duration compactly: `0s`, `750ns`, `1.5µs`, `250ms`, `1.5s`, `1h2m3s`.
pub fn format_duration(d: Duration) -> String {
    let nanos = d.as_nanos();
    if nanos == 0 {
        return "0s".to_string();
    }
    if nanos < 1_000 {
        return format!("{}ns", nanos);
    }
    if nanos < 1_000_000 {
        return format!("{}µs", decimal(nanos, 1_000, 3));
    }
    if nanos < 1_000_000_000 {
        return format!("{}ms", decimal(nanos, 1_000_000, 6));
    }

    let total_secs = d.as_secs();
    let hours = total_secs / 3600;
    let mins = (total_secs % 3600) / 60;
    let secs = decimal(nanos % 60_000_000_000, 1_000_000_000, 9);

    if hours > 0 {
        format!("{}h{}m{}s", hours, mins, secs)
    } else if mins > 0 {
        format!("{}m{}s", mins, secs)
    } else {
        format!("{}s", secs)
    }
}

/// `value / unit` as exact decimal text with trailing zeros trimmed.
/// `digits` is the number of zeros in `unit`.
fn decimal(value: u128, unit: u128, digits: usize) -> String {
    let whole = value / unit;
    let frac = value % unit;
    if frac == 0 {
        return whole.to_string();
    }
    let frac = format!("{:0width$}", frac, width = digits);
    format!("{}.{}", whole, frac.trim_end_matches('0'))
}
