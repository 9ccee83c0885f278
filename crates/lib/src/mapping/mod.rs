//! Declarative mapping between JSON trees and typed model objects.
//!
//! This module is the engine's orchestration layer. A [`Mapping`] describes,
//! for one model type, how each field binds to a keypath in JSON; the
//! [`Mapper`] drives a description in either direction, resolving object
//! identity through the type's storage [`Adaptor`] and recursing into
//! relationship and collection bindings.
//!
//! # Field Binding
//!
//! A mapping description is a single direction-agnostic function that chains
//! binder calls on the [`MappingContext`]:
//!
//! ```
//! use remap::adaptor::Transient;
//! use remap::mapping::{Mapper, Mapping, MappingContext};
//!
//! #[derive(Debug, Clone, Default, PartialEq)]
//! struct Person {
//!     name: String,
//!     age: i64,
//! }
//!
//! struct PersonMapping {
//!     adaptor: Transient<Person>,
//! }
//!
//! impl Mapping for PersonMapping {
//!     type Object = Person;
//!     type Storage = Transient<Person>;
//!
//!     fn adaptor(&self) -> &Transient<Person> {
//!         &self.adaptor
//!     }
//!
//!     fn bind(&self, person: &mut Person, ctx: &mut MappingContext) {
//!         ctx.field(&mut person.name, "name")
//!             .field(&mut person.age, "data.age");
//!     }
//! }
//!
//! let mapping = PersonMapping { adaptor: Transient::new() };
//! let json = remap::Value::parse(r#"{"name":"Ada","data":{"age":36}}"#).unwrap();
//! let person = Mapper::map_new(&json, &mapping).unwrap();
//! assert_eq!(person, Person { name: "Ada".into(), age: 36 });
//! ```
//!
//! Bindings run in declaration order; the first failure is recorded on the
//! context and every later binder call is a no-op.
//!
//! # Session Lifecycle
//!
//! The root mapping call brackets all field binding in the adaptor's
//! session: `begin_session` before the first binding, then `commit_session`
//! on success or `abort_session` on the recorded error. Nested calls for
//! relationships and collection elements run inside the root's session and
//! never invoke the hooks themselves.

pub mod errors;

mod binding;
mod context;
mod key;


use std::collections::BTreeMap;

use tracing::debug;

pub use context::MappingContext;
pub use errors::MappingError;
pub use key::{BindKey, BindOptions};

use crate::adaptor::Adaptor;
use crate::value::{KeyPathBuf, Value};
use crate::{Error, Result};

/// The direction a mapping call runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// JSON → object: fields are read from the JSON tree.
    FromJson,
    /// Object → JSON: fields are written into the JSON tree.
    ToJson,
}

/// Declarative mapping description for one model type.
///
/// Implementations declare the storage capability managing the type, the
/// primary-key keypaths used for identity lookup, and the field bindings.
/// The `Storage` bound ties the adaptor's managed object type to the
/// mapping's at compile time.
pub trait Mapping {
    /// The model type this mapping produces and consumes.
    type Object;
    /// The storage capability managing `Object`.
    type Storage: Adaptor<Object = Self::Object>;

    /// The adaptor instance backing this mapping.
    fn adaptor(&self) -> &Self::Storage;

    /// Ordered primary-key keypaths used to look up a pre-existing object.
    ///
    /// An empty list means "always create new".
    fn primary_keys(&self) -> Vec<KeyPathBuf> {
        Vec::new()
    }

    /// Declares every field binding for `object` against `ctx`.
    ///
    /// Executed once per mapping call in either direction; each binding
    /// internally branches on the context's direction.
    fn bind(&self, object: &mut Self::Object, ctx: &mut MappingContext);
}

/// A custom bidirectional conversion applied by `field_via` bindings.
///
/// Use a transform where a field's wire format is not the one its type's
/// registered converter produces, without writing a whole mapping for it.
pub trait Transform {
    /// The field type this transform converts.
    type Value;

    /// Converts a JSON node to the field value.
    fn from_json(&self, json: &Value) -> Result<Self::Value>;

    /// Converts the field value to its JSON representation.
    fn to_json(&self, value: &Self::Value) -> Value;
}

/// Entry points for running mapping descriptions.
///
/// All operations are synchronous and run to completion: the call either
/// returns a fully populated result with the session committed, or exactly
/// one error describing the first failure in binding order, with the session
/// aborted.
pub struct Mapper;

impl Mapper {
    /// Maps JSON into a newly allocated object.
    ///
    /// The object is created through the mapping's adaptor; no identity
    /// lookup is performed.
    pub fn map_new<M: Mapping>(json: &Value, mapping: &M) -> Result<M::Object> {
        let mut object = new_instance(mapping)?;
        Self::map_into(json, &mut object, mapping)?;
        Ok(object)
    }

    /// Maps JSON into the object it identifies, creating one if none exists.
    ///
    /// If the mapping declares primary keys, each primary-key keypath must be
    /// present in `json` (else [`MappingError::MissingPrimaryKey`]) and the
    /// adaptor is asked for a matching object; a found object is reused and
    /// its fields overwritten, otherwise a new object is allocated.
    pub fn map_existing_or_new<M: Mapping>(json: &Value, mapping: &M) -> Result<M::Object> {
        Self::map_existing_or_new_chained(json, mapping, None)
    }

    /// Maps JSON into a caller-provided object (root session).
    pub fn map_into<M: Mapping>(json: &Value, object: &mut M::Object, mapping: &M) -> Result<()> {
        let mut ctx = MappingContext::root(json.clone(), Direction::FromJson);
        perform(mapping, object, &mut ctx)
    }

    /// Converts an object to its JSON representation.
    ///
    /// Builds an empty JSON object and runs the mapping description in
    /// `ToJson` direction. The object is taken mutably because the binding
    /// function is direction-agnostic; it is not modified.
    pub fn map_to_json<M: Mapping>(object: &mut M::Object, mapping: &M) -> Result<Value> {
        let mut ctx = MappingContext::root(Value::object(), Direction::ToJson);
        perform(mapping, object, &mut ctx)?;
        Ok(ctx.into_json())
    }

    /// Existing-or-new resolution chained to a parent context, used by
    /// relationship and collection bindings.
    pub(crate) fn map_existing_or_new_chained<M: Mapping>(
        json: &Value,
        mapping: &M,
        parent: Option<&MappingContext>,
    ) -> Result<M::Object> {
        let mut object = match existing_instance(mapping, json)? {
            Some(object) => object,
            None => new_instance(mapping)?,
        };
        let mut ctx = match parent {
            Some(parent) => parent.child(json.clone()),
            None => MappingContext::root(json.clone(), Direction::FromJson),
        };
        perform(mapping, &mut object, &mut ctx)?;
        Ok(object)
    }

    /// Object → JSON conversion chained to a parent context.
    pub(crate) fn map_to_json_chained<M: Mapping>(
        object: &mut M::Object,
        mapping: &M,
        parent: &MappingContext,
    ) -> Result<Value> {
        let mut ctx = parent.child(Value::object());
        perform(mapping, object, &mut ctx)?;
        Ok(ctx.into_json())
    }
}

/// Looks up the object identified by the mapping's primary keys in `json`.
///
/// Returns `Ok(None)` when the mapping declares no primary keys or the
/// adaptor finds no match; a declared keypath missing from `json` is an
/// error.
pub(crate) fn existing_instance<M: Mapping>(mapping: &M, json: &Value) -> Result<Option<M::Object>> {
    let primary_keys = mapping.primary_keys();
    if primary_keys.is_empty() {
        return Ok(None);
    }

    let mut key_values = BTreeMap::new();
    for keypath in primary_keys {
        match json.get(&keypath) {
            Some(value) => {
                key_values.insert(keypath.as_str().to_owned(), value);
            }
            None => {
                return Err(MappingError::MissingPrimaryKey {
                    keypath,
                    json: json.to_json_string(),
                }
                .into());
            }
        }
    }

    Ok(mapping.adaptor().fetch(&key_values))
}

fn new_instance<M: Mapping>(mapping: &M) -> Result<M::Object> {
    mapping.adaptor().create().map_err(Error::from)
}

/// Runs one mapping call: session begin (root only), field binding, then
/// commit or abort depending on the context's error slot.
fn perform<M: Mapping>(mapping: &M, object: &mut M::Object, ctx: &mut MappingContext) -> Result<()> {
    if ctx.is_root() {
        debug!(direction = ?ctx.direction(), "beginning mapping session");
        mapping.adaptor().begin_session()?;
    }

    mapping.bind(object, ctx);

    if let Some(error) = ctx.take_error() {
        if ctx.is_root() {
            debug!(%error, "mapping failed, aborting session");
            mapping.adaptor().abort_session(&error);
        }
        return Err(error);
    }

    if ctx.is_root() {
        debug!("committing mapping session");
        mapping.adaptor().commit_session()?;
    }
    Ok(())
}
