use crate::Error;
use crate::mapping::Direction;
use crate::value::Value;

/// The working state of one mapping invocation.
///
/// A context is created at the start of a `map_new`/`map_existing_or_new`/
/// `map_to_json` call and mutated in place by each field binding: the JSON
/// cursor is read from (`FromJson`) or written into (`ToJson`), and the first
/// binding failure lands in the error slot. Once the slot is set, every
/// subsequent binder call on the same context is a no-op, so a mapping
/// description can declare its bindings unconditionally and the first error
/// wins.
///
/// A *root* context owns the adaptor transaction boundary. Nested mapping
/// invocations — relationships and collection elements — run on child
/// contexts created with [`child`](Self::child), which share the root's
/// logical session and never touch the session hooks.
#[derive(Debug)]
pub struct MappingContext {
    json: Value,
    dir: Direction,
    error: Option<Error>,
    nested: bool,
}

impl MappingContext {
    /// Creates the root context for a top-level mapping call.
    pub(crate) fn root(json: Value, dir: Direction) -> Self {
        Self {
            json,
            dir,
            error: None,
            nested: false,
        }
    }

    /// Creates a nested context over a JSON subtree, chained to this one.
    ///
    /// The child shares the parent's direction and logical session; its error
    /// slot starts empty and failures bubble back to the parent by return
    /// value.
    pub(crate) fn child(&self, json: Value) -> Self {
        Self {
            json,
            dir: self.dir,
            error: None,
            nested: true,
        }
    }

    /// The direction this mapping call runs in.
    pub fn direction(&self) -> Direction {
        self.dir
    }

    /// The JSON tree this context reads from or writes into.
    pub fn json(&self) -> &Value {
        &self.json
    }

    /// Mutable access to the context's JSON tree.
    pub fn json_mut(&mut self) -> &mut Value {
        &mut self.json
    }

    /// Returns true if this context owns the transaction boundary.
    pub fn is_root(&self) -> bool {
        !self.nested
    }

    /// The first binding failure recorded on this context, if any.
    pub fn error(&self) -> Option<&Error> {
        self.error.as_ref()
    }

    /// Records a binding failure. The slot is set-once: if an error is
    /// already recorded, the new one is dropped.
    pub fn fail(&mut self, error: impl Into<Error>) {
        if self.error.is_none() {
            self.error = Some(error.into());
        }
    }

    pub(crate) fn take_error(&mut self) -> Option<Error> {
        self.error.take()
    }

    pub(crate) fn into_json(self) -> Value {
        self.json
    }
}
