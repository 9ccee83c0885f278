use std::cell::{Ref, RefCell, RefMut};
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use crate::adaptor::{Adaptor, AdaptorError};
use crate::value::Value;
use crate::Error;

/// A shared live-object handle.
///
/// `Handle` is how [`InMemory`] hands out its managed objects: every fetch of
/// the same stored object yields a handle to the same underlying cell, so
/// mutations through one handle are visible through all of them. Equality is
/// pointer identity, matching the semantics of live objects in an ORM.
pub struct Handle<T>(Rc<RefCell<T>>);

impl<T> Handle<T> {
    /// Wraps a value in a fresh handle.
    pub fn new(value: T) -> Self {
        Handle(Rc::new(RefCell::new(value)))
    }

    /// Immutably borrows the underlying value.
    pub fn borrow(&self) -> Ref<'_, T> {
        self.0.borrow()
    }

    /// Mutably borrows the underlying value.
    pub fn borrow_mut(&self) -> RefMut<'_, T> {
        self.0.borrow_mut()
    }

    /// Returns true if both handles refer to the same underlying object.
    pub fn ptr_eq(&self, other: &Handle<T>) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<T> Clone for Handle<T> {
    fn clone(&self) -> Self {
        Handle(Rc::clone(&self.0))
    }
}

impl<T> PartialEq for Handle<T> {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl<T: fmt::Debug> fmt::Debug for Handle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Handle").field(&self.0.borrow()).finish()
    }
}

/// Field access capability required of records stored in [`InMemory`].
///
/// [`Adaptor::fetch`] receives key values keyed by primary-key *keypath*
/// (e.g. `"data.uuid"`); `field` maps such a keypath onto the record's own
/// fields, the way an ORM adaptor would map it onto columns. Return `None`
/// for keypaths the record does not carry.
pub trait Record: Default {
    /// Returns the record's value for a primary-key keypath.
    fn field(&self, keypath: &str) -> Option<Value>;
}

/// A transactional in-memory object store.
///
/// `InMemory` keeps its records behind [`Handle`]s and implements the session
/// hooks with a snapshot: [`begin_session`](Adaptor::begin_session) clones
/// the current state, [`abort_session`](Adaptor::abort_session) restores it
/// (objects created during the session vanish, mutated objects roll back),
/// and [`commit_session`](Adaptor::commit_session) drops it.
///
/// [`create`](Adaptor::create) inserts the new handle into the store
/// immediately, so identity lookups within the same session observe it —
/// collection deduplication relies on this.
pub struct InMemory<T> {
    objects: RefCell<Vec<Handle<T>>>,
    snapshot: RefCell<Option<Vec<(Handle<T>, T)>>>,
}

impl<T: Record + Clone> InMemory<T> {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self {
            objects: RefCell::new(Vec::new()),
            snapshot: RefCell::new(None),
        }
    }

    /// Returns the number of stored objects.
    pub fn len(&self) -> usize {
        self.objects.borrow().len()
    }

    /// Returns true if the store holds no objects.
    pub fn is_empty(&self) -> bool {
        self.objects.borrow().is_empty()
    }

    /// Returns handles to all stored objects.
    pub fn objects(&self) -> Vec<Handle<T>> {
        self.objects.borrow().clone()
    }
}

impl<T: Record + Clone> Default for InMemory<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Record + Clone> Adaptor for InMemory<T> {
    type Object = Handle<T>;

    fn begin_session(&self) -> Result<(), AdaptorError> {
        let mut snapshot = self.snapshot.borrow_mut();
        if snapshot.is_some() {
            return Err(AdaptorError::Begin {
                reason: "a session is already active".to_string(),
            });
        }
        *snapshot = Some(
            self.objects
                .borrow()
                .iter()
                .map(|handle| (handle.clone(), handle.borrow().clone()))
                .collect(),
        );
        Ok(())
    }

    fn commit_session(&self) -> Result<(), AdaptorError> {
        match self.snapshot.borrow_mut().take() {
            Some(_) => Ok(()),
            None => Err(AdaptorError::Commit {
                reason: "no active session".to_string(),
            }),
        }
    }

    fn abort_session(&self, _error: &Error) {
        if let Some(snapshot) = self.snapshot.borrow_mut().take() {
            for (handle, saved) in &snapshot {
                *handle.borrow_mut() = saved.clone();
            }
            *self.objects.borrow_mut() =
                snapshot.into_iter().map(|(handle, _)| handle).collect();
        }
    }

    fn fetch(&self, key_values: &BTreeMap<String, Value>) -> Option<Self::Object> {
        self.objects
            .borrow()
            .iter()
            .find(|handle| {
                let record = handle.borrow();
                key_values
                    .iter()
                    .all(|(keypath, value)| record.field(keypath).as_ref() == Some(value))
            })
            .cloned()
    }

    fn create(&self) -> Result<Self::Object, AdaptorError> {
        let handle = Handle::new(T::default());
        self.objects.borrow_mut().push(handle.clone());
        Ok(handle)
    }

    fn save(&self, objects: &[Self::Object]) -> Result<(), AdaptorError> {
        let mut stored = self.objects.borrow_mut();
        for object in objects {
            if !stored.iter().any(|existing| existing.ptr_eq(object)) {
                stored.push(object.clone());
            }
        }
        Ok(())
    }

    fn delete(&self, object: &Self::Object) -> Result<(), AdaptorError> {
        self.objects
            .borrow_mut()
            .retain(|existing| !existing.ptr_eq(object));
        Ok(())
    }
}
