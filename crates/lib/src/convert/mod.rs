//! Bidirectional converters between primitive Rust types and JSON values.
//!
//! Each supported primitive implements [`FromJson`] and [`ToJson`]; the
//! blanket [`Json`] marker covers types implementing both. `from_json`
//! returns `None` (not an error) on a tag mismatch — the field-binding layer
//! upgrades that to a conversion error carrying the offending keypath and the
//! JSON node rendered for diagnostics.
//!
//! # Registered Types
//!
//! - `bool` — decodes a JSON boolean, and leniently the numbers `0`/`1`
//! - `i64`, `i32` — decode from a number, truncating any fraction
//! - `f64` — numeric passthrough
//! - `String`
//! - [`serde_json::Number`] — opaque numeric passthrough
//! - `chrono::DateTime<Utc>` — the fixed-format UTC wire string
//!   (see [`ISO_DATE_FORMAT`])
//! - `Vec<T>`, `HashMap<String, T>`, `BTreeMap<String, T>` for any registered
//!   `T`, converted element-wise; one failing element fails the container
//!
//! # Round-Trip
//!
//! For every registered type, `T::from_json(&v.to_json()) == Some(v)` (dates
//! at millisecond precision).


use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::value::Value;

/// Wire format for date values: fixed-pattern UTC ISO-8601 with milliseconds,
/// `2016-01-01T12:00:00.000Z`. Any other pattern fails conversion.
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// Decoding half of a registered converter.
pub trait FromJson: Sized {
    /// Converts a JSON value to this type, `None` on tag mismatch.
    fn from_json(value: &Value) -> Option<Self>;
}

/// Encoding half of a registered converter.
pub trait ToJson {
    /// Converts this value to its JSON representation.
    fn to_json(&self) -> Value;
}

/// Marker for types convertible in both directions.
pub trait Json: FromJson + ToJson {}

impl<T: FromJson + ToJson> Json for T {}

impl FromJson for bool {
    fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(*b),
            Value::Number(n) if *n == 0.0 => Some(false),
            Value::Number(n) if *n == 1.0 => Some(true),
            _ => None,
        }
    }
}

impl ToJson for bool {
    fn to_json(&self) -> Value {
        Value::Bool(*self)
    }
}

impl FromJson for i64 {
    fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => Some(*n as i64),
            _ => None,
        }
    }
}

impl ToJson for i64 {
    fn to_json(&self) -> Value {
        Value::Number(*self as f64)
    }
}

impl FromJson for i32 {
    fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => Some(*n as i32),
            _ => None,
        }
    }
}

impl ToJson for i32 {
    fn to_json(&self) -> Value {
        Value::Number(*self as f64)
    }
}

impl FromJson for f64 {
    fn from_json(value: &Value) -> Option<Self> {
        value.as_f64()
    }
}

impl ToJson for f64 {
    fn to_json(&self) -> Value {
        Value::Number(*self)
    }
}

impl FromJson for String {
    fn from_json(value: &Value) -> Option<Self> {
        value.as_str().map(str::to_owned)
    }
}

impl ToJson for String {
    fn to_json(&self) -> Value {
        Value::String(self.clone())
    }
}

impl FromJson for serde_json::Number {
    fn from_json(value: &Value) -> Option<Self> {
        serde_json::Number::from_f64(value.as_f64()?)
    }
}

impl ToJson for serde_json::Number {
    fn to_json(&self) -> Value {
        match self.as_f64() {
            Some(n) => Value::Number(n),
            None => Value::Null,
        }
    }
}

impl FromJson for DateTime<Utc> {
    fn from_json(value: &Value) -> Option<Self> {
        let text = value.as_str()?;
        NaiveDateTime::parse_from_str(text, ISO_DATE_FORMAT)
            .ok()
            .map(|naive| naive.and_utc())
    }
}

impl ToJson for DateTime<Utc> {
    fn to_json(&self) -> Value {
        Value::String(self.format(ISO_DATE_FORMAT).to_string())
    }
}

impl<T: FromJson> FromJson for Vec<T> {
    fn from_json(value: &Value) -> Option<Self> {
        value.as_array()?.iter().map(T::from_json).collect()
    }
}

impl<T: ToJson> ToJson for Vec<T> {
    fn to_json(&self) -> Value {
        Value::Array(self.iter().map(T::to_json).collect())
    }
}

impl<T: FromJson> FromJson for HashMap<String, T> {
    fn from_json(value: &Value) -> Option<Self> {
        value
            .as_object()?
            .iter()
            .map(|(key, value)| Some((key.clone(), T::from_json(value)?)))
            .collect()
    }
}

impl<T: ToJson> ToJson for HashMap<String, T> {
    fn to_json(&self) -> Value {
        self.iter()
            .map(|(key, value)| (key.clone(), value.to_json()))
            .collect()
    }
}

impl<T: FromJson> FromJson for BTreeMap<String, T> {
    fn from_json(value: &Value) -> Option<Self> {
        value
            .as_object()?
            .iter()
            .map(|(key, value)| Some((key.clone(), T::from_json(value)?)))
            .collect()
    }
}

impl<T: ToJson> ToJson for BTreeMap<String, T> {
    fn to_json(&self) -> Value {
        self.iter()
            .map(|(key, value)| (key.clone(), value.to_json()))
            .collect()
    }
}
