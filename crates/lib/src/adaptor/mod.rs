//! Storage adaptors backing the mapping orchestrator.
//!
//! This module provides the [`Adaptor`] trait and the in-memory
//! implementations shipped with the engine.
//!
//! The `Adaptor` trait defines the interface the orchestrator uses for
//! transactional object storage: session lifecycle, identity queries by
//! primary-key values, and object creation. This keeps the mapping engine
//! independent of any concrete store — an ORM-backed adaptor plugs in by
//! implementing this trait.
//!
//! Two implementations are included:
//!
//! - [`Transient`] - no persistence at all; for mapping plain values
//! - [`InMemory`] - a transactional in-memory store over shared live-object
//!   handles, primarily useful for tests and prototyping

pub mod errors;

mod memory;
mod transient;

use std::collections::BTreeMap;

pub use errors::AdaptorError;
pub use memory::{Handle, InMemory, Record};
pub use transient::Transient;

use crate::{Error, value::Value};

/// Transactional storage capability consumed by the mapping orchestrator.
///
/// An adaptor owns the transaction lifecycle and object identity queries for
/// one managed object type. The orchestrator drives it as follows: a root
/// mapping call opens a session with [`begin_session`](Adaptor::begin_session)
/// before any field binding, then either
/// [`commit_session`](Adaptor::commit_session) on success or
/// [`abort_session`](Adaptor::abort_session) on the first binding error.
/// Nested mapping calls share the root's session and never touch the
/// lifecycle hooks themselves.
///
/// The engine is single-threaded per mapping call; if one adaptor is reused
/// across concurrently-issued root calls, serializing access to the
/// underlying store is the adaptor's responsibility.
pub trait Adaptor {
    /// The managed object type handed out by this adaptor.
    type Object;

    /// Opens the session/transaction for a root mapping call.
    fn begin_session(&self) -> Result<(), AdaptorError>;

    /// Commits the session opened by [`begin_session`](Adaptor::begin_session).
    fn commit_session(&self) -> Result<(), AdaptorError>;

    /// Discards the session after a mapping failure.
    ///
    /// Receives the error that caused the abort; implementations typically
    /// roll back and log it.
    fn abort_session(&self, error: &Error);

    /// Fetches the object whose fields match every entry of `key_values`
    /// (keyed by primary-key keypath), or `None` if no such object exists.
    fn fetch(&self, key_values: &BTreeMap<String, Value>) -> Option<Self::Object>;

    /// Allocates a new managed object.
    ///
    /// A created object must be observable by [`fetch`](Adaptor::fetch)
    /// within the same session once its key fields are populated.
    fn create(&self) -> Result<Self::Object, AdaptorError>;

    /// Persists the given objects.
    fn save(&self, objects: &[Self::Object]) -> Result<(), AdaptorError>;

    /// Deletes the given object from the store.
    fn delete(&self, object: &Self::Object) -> Result<(), AdaptorError>;
}
