use std::collections::BTreeMap;
use std::marker::PhantomData;

use crate::adaptor::{Adaptor, AdaptorError};
use crate::value::Value;
use crate::Error;

/// A bare-bones adaptor for objects that need no storage.
///
/// `Transient` satisfies the adaptor contract with no-op session hooks:
/// nothing is ever persisted, identity lookups find nothing, and
/// [`create`](Adaptor::create) yields `T::default()`. Use it as the storage
/// type of mappings over plain values.
pub struct Transient<T> {
    _marker: PhantomData<T>,
}

impl<T> Transient<T> {
    /// Creates a new transient adaptor.
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for Transient<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Default> Adaptor for Transient<T> {
    type Object = T;

    fn begin_session(&self) -> Result<(), AdaptorError> {
        Ok(())
    }

    fn commit_session(&self) -> Result<(), AdaptorError> {
        Ok(())
    }

    fn abort_session(&self, _error: &Error) {}

    fn fetch(&self, _key_values: &BTreeMap<String, Value>) -> Option<Self::Object> {
        None
    }

    fn create(&self) -> Result<Self::Object, AdaptorError> {
        Ok(T::default())
    }

    fn save(&self, _objects: &[Self::Object]) -> Result<(), AdaptorError> {
        Ok(())
    }

    fn delete(&self, _object: &Self::Object) -> Result<(), AdaptorError> {
        Ok(())
    }
}
