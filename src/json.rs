//! Defensive accessors over `serde_json::Value`.
//!
//! Review exports come in several shapes, so every lookup here answers
//! "nothing usable" with `None` instead of failing.

use std::io;

use serde::Serialize;
use serde_json::ser::{Formatter, Serializer};
use serde_json::Value;

/// Stand-in for any node that is missing or has the wrong type.
pub static NULL: Value = Value::Null;

/// Object field lookup. Missing keys, JSON `null` and non-object parents
/// all come back as `None`.
pub fn field<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    match value.as_object()?.get(key) {
        Some(Value::Null) | None => None,
        Some(v) => Some(v),
    }
}

/// Object field that is itself an object, or the shared `NULL` when it is
/// absent or of another type.
pub fn object_or_null<'a>(value: &'a Value, key: &str) -> &'a Value {
    match field(value, key) {
        Some(v @ Value::Object(_)) => v,
        _ => &NULL,
    }
}

/// Truthiness check used by the resolvers: empty strings, zero, `false`,
/// `null` and empty containers do not count as a value.
pub fn is_populated(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// Field lookup that additionally requires [`is_populated`].
pub fn populated<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    field(value, key).filter(|v| is_populated(v))
}

/// Text written into a single CSV cell. Booleans use `True`/`False`.
pub fn render_cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        Value::Number(n) => n.to_string(),
        nested => to_loose_json(nested),
    }
}

/// Serialize with `", "` / `": "` separators, keys in source order and
/// non-ASCII text left unescaped.
pub fn to_loose_json(value: &Value) -> String {
    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, LooseFormatter);
    match value.serialize(&mut ser) {
        Ok(()) => String::from_utf8(buf).unwrap_or_else(|_| value.to_string()),
        Err(_) => value.to_string(),
    }
}

struct LooseFormatter;

impl Formatter for LooseFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }
}
