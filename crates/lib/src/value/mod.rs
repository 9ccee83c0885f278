//! Dynamic, self-describing JSON value model.
//!
//! This module provides the [`Value`] tagged union that every other layer of
//! the engine works against, together with dotted-keypath addressing over it.
//!
//! # Core Types
//!
//! - [`Value`] - A recursive tagged union covering the JSON data model
//! - [`KeyPath`] / [`KeyPathBuf`] - Borrowed/owned dotted paths into a tree
//!
//! # Keypath Addressing
//!
//! Reads descend through `Object` nodes segment by segment. Reading through an
//! `Array` node implicitly broadcasts: the remaining path is applied to every
//! element and the results that resolve are collected into a new array, so
//! `items.name` over a list of objects yields the list of names.
//!
//! ```
//! use remap::value::Value;
//!
//! let doc = Value::parse(r#"{"items":[{"n":1},{"n":2}]}"#).unwrap();
//! assert_eq!(doc.get("items.n"), Some(Value::Array(vec![1.0.into(), 2.0.into()])));
//! ```
//!
//! Writes create intermediate `Object` nodes along the path as needed and
//! leave sibling keys untouched. Writing through an `Array` or scalar node is
//! a no-op.

pub mod errors;
pub mod path;


use std::collections::HashMap;
use std::fmt;
use std::hash::{DefaultHasher, Hash, Hasher};

pub use errors::ValueError;
pub use path::{KeyPath, KeyPathBuf};

/// A dynamic JSON value.
///
/// Equality and hashing are structural: object comparison and hashing ignore
/// key order, array comparison and hashing preserve element order. Numbers
/// are `f64`, so `Value` implements `PartialEq` but not `Eq`.
///
/// # Direct Comparisons
///
/// ```
/// # use remap::value::Value;
/// let name = Value::from("Acme");
/// let count = Value::from(3.0);
///
/// assert!(name == Value::String("Acme".to_string()));
/// assert!(count == Value::Number(3.0));
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// Null value
    #[default]
    Null,
    /// Boolean value
    Bool(bool),
    /// Numeric value
    Number(f64),
    /// Text string value
    String(String),
    /// Ordered collection of values
    Array(Vec<Value>),
    /// String-keyed collection of values, key order irrelevant
    Object(HashMap<String, Value>),
}

impl Value {
    /// Creates a new empty object value.
    pub fn object() -> Self {
        Value::Object(HashMap::new())
    }

    /// Creates a new empty array value.
    pub fn array() -> Self {
        Value::Array(Vec::new())
    }

    /// Returns true if this is a null value
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the type name as a string
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }

    /// Attempts to convert to a boolean
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Attempts to convert to a number
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Attempts to convert to a string slice
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Attempts to convert to an array (immutable reference)
    pub fn as_array(&self) -> Option<&Vec<Value>> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Attempts to convert to a mutable array reference
    pub fn as_array_mut(&mut self) -> Option<&mut Vec<Value>> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Attempts to convert to an object (immutable reference)
    pub fn as_object(&self) -> Option<&HashMap<String, Value>> {
        match self {
            Value::Object(entries) => Some(entries),
            _ => None,
        }
    }

    /// Attempts to convert to a mutable object reference
    pub fn as_object_mut(&mut self) -> Option<&mut HashMap<String, Value>> {
        match self {
            Value::Object(entries) => Some(entries),
            _ => None,
        }
    }

    /// Reads the value at a keypath.
    ///
    /// Returns an owned value because array broadcast constructs new arrays.
    /// If the dotted lookup fails and the raw keypath string is present as a
    /// single literal object key, that entry is returned instead, so payloads
    /// using dotted member names verbatim remain addressable.
    ///
    /// ```
    /// # use remap::value::Value;
    /// let doc = Value::parse(r#"{"data":{"uuid":"u1"},"data.uuid":"literal"}"#).unwrap();
    /// assert_eq!(doc.get("data.uuid"), Some(Value::from("u1")));
    /// assert_eq!(doc.get("missing"), None);
    /// ```
    pub fn get(&self, path: impl AsRef<KeyPath>) -> Option<Value> {
        let path = path.as_ref();
        let segments: Vec<&str> = path.segments().collect();
        if let Some(found) = self.get_segments(&segments) {
            return Some(found);
        }

        // Fallback: the whole keypath as one literal object key.
        if segments.len() > 1
            && let Value::Object(entries) = self
            && let Some(found) = entries.get(path.as_str())
        {
            return Some(found.clone());
        }

        None
    }

    fn get_segments(&self, segments: &[&str]) -> Option<Value> {
        let Some((&key, rest)) = segments.split_first() else {
            return Some(self.clone());
        };

        match self {
            Value::Object(entries) => entries.get(key)?.get_segments(rest),
            // Broadcast: apply the whole remaining path to every element,
            // dropping elements on which it does not resolve.
            Value::Array(items) => Some(Value::Array(
                items
                    .iter()
                    .filter_map(|item| item.get_segments(segments))
                    .collect(),
            )),
            _ => None,
        }
    }

    /// Writes a value at a keypath, creating intermediate objects as needed.
    ///
    /// Existing keys outside the write path are left untouched. Writing
    /// through an `Array` or scalar node is a no-op; a non-object intermediate
    /// on the path is replaced by an object.
    pub fn set(&mut self, path: impl AsRef<KeyPath>, value: impl Into<Value>) {
        let segments: Vec<&str> = path.as_ref().segments().collect();
        self.write_segments(&segments, Some(value.into()));
    }

    /// Removes the key addressed by a keypath from its containing object.
    ///
    /// Unlike [`set`](Self::set), removal never creates intermediate objects;
    /// a missing intermediate makes this a no-op.
    pub fn remove(&mut self, path: impl AsRef<KeyPath>) {
        let segments: Vec<&str> = path.as_ref().segments().collect();
        self.write_segments(&segments, None);
    }

    fn write_segments(&mut self, segments: &[&str], value: Option<Value>) {
        let Some((&key, rest)) = segments.split_first() else {
            return;
        };
        let Value::Object(entries) = self else {
            return;
        };

        if rest.is_empty() {
            match value {
                Some(value) => {
                    entries.insert(key.to_owned(), value);
                }
                None => {
                    entries.remove(key);
                }
            }
            return;
        }

        match entries.get_mut(key) {
            Some(child) if matches!(child, Value::Object(_)) => {
                child.write_segments(rest, value);
            }
            Some(child) => {
                if value.is_some() {
                    *child = Value::object();
                    child.write_segments(rest, value);
                }
            }
            None => {
                if value.is_some() {
                    entries
                        .entry(key.to_owned())
                        .or_insert_with(Value::object)
                        .write_segments(rest, value);
                }
            }
        }
    }

    /// Parses UTF-8 JSON text into a value tree.
    pub fn parse(text: &str) -> Result<Value, ValueError> {
        let raw: serde_json::Value =
            serde_json::from_str(text).map_err(|source| ValueError::Parse { source })?;
        Value::try_from(raw)
    }

    /// Renders this value as compact JSON text.
    pub fn to_json_string(&self) -> String {
        serde_json::Value::from(self).to_string()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_json_string())
    }
}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Value::Null => state.write_u8(0),
            Value::Bool(b) => {
                state.write_u8(1);
                b.hash(state);
            }
            Value::Number(n) => {
                state.write_u8(2);
                // Normalize zero so -0.0 and 0.0 (which compare equal) hash equal
                let n = if *n == 0.0 { 0.0 } else { *n };
                n.to_bits().hash(state);
            }
            Value::String(s) => {
                state.write_u8(3);
                s.hash(state);
            }
            Value::Array(items) => {
                state.write_u8(4);
                for item in items {
                    item.hash(state);
                }
            }
            Value::Object(entries) => {
                state.write_u8(5);
                // XOR of per-entry hashes is insertion-order independent
                let mut combined: u64 = 0;
                for (key, value) in entries {
                    let mut entry_hasher = DefaultHasher::new();
                    key.hash(&mut entry_hasher);
                    value.hash(&mut entry_hasher);
                    combined ^= entry_hasher.finish();
                }
                state.write_u64(combined);
            }
        }
    }
}

// Convenient From implementations for common types
impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Number(value as f64)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Number(value as f64)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Number(value as f64)
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Number(value as f64)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::Array(value)
    }
}

impl From<HashMap<String, Value>> for Value {
    fn from(value: HashMap<String, Value>) -> Self {
        Value::Object(value)
    }
}

impl FromIterator<(String, Value)> for Value {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        Value::Object(iter.into_iter().collect())
    }
}

impl FromIterator<Value> for Value {
    fn from_iter<T: IntoIterator<Item = Value>>(iter: T) -> Self {
        Value::Array(iter.into_iter().collect())
    }
}

// Interop with the serde_json value form

impl TryFrom<serde_json::Value> for Value {
    type Error = ValueError;

    fn try_from(raw: serde_json::Value) -> Result<Self, ValueError> {
        Ok(match raw {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => {
                let value = n
                    .as_f64()
                    .ok_or_else(|| ValueError::UnrepresentableNumber {
                        value: n.to_string(),
                    })?;
                Value::Number(value)
            }
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => Value::Array(
                items
                    .into_iter()
                    .map(Value::try_from)
                    .collect::<Result<_, _>>()?,
            ),
            serde_json::Value::Object(entries) => Value::Object(
                entries
                    .into_iter()
                    .map(|(key, value)| Ok((key, Value::try_from(value)?)))
                    .collect::<Result<_, ValueError>>()?,
            ),
        })
    }
}

impl From<&Value> for serde_json::Value {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            // Non-finite numbers have no JSON text form and render as null,
            // matching serde_json's own treatment
            Value::Number(n) => serde_json::Number::from_f64(*n)
                .map_or(serde_json::Value::Null, serde_json::Value::Number),
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::Array(items) => {
                serde_json::Value::Array(items.iter().map(serde_json::Value::from).collect())
            }
            Value::Object(entries) => serde_json::Value::Object(
                entries
                    .iter()
                    .map(|(key, value)| (key.clone(), serde_json::Value::from(value)))
                    .collect(),
            ),
        }
    }
}

impl From<Value> for serde_json::Value {
    fn from(value: Value) -> Self {
        serde_json::Value::from(&value)
    }
}

impl serde::Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(n) => serializer.serialize_f64(*n),
            Value::String(s) => serializer.serialize_str(s),
            Value::Array(items) => serializer.collect_seq(items),
            Value::Object(entries) => serializer.collect_map(entries),
        }
    }
}

impl<'de> serde::Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = serde_json::Value::deserialize(deserializer)?;
        Value::try_from(raw).map_err(serde::de::Error::custom)
    }
}
