//! Field binders on [`MappingContext`].
//!
//! One binder call performs one unit of conversion — scalar, nested object,
//! or collection — and threads the (possibly errored) context onward. Every
//! binder checks the error slot first: after the first failure the rest of
//! the chain is a no-op.

use tracing::trace;

use crate::convert::Json;
use crate::mapping::{
    BindKey, Direction, Mapper, Mapping, MappingContext, MappingError, Transform,
    existing_instance,
};
use crate::value::{KeyPath, Value};

impl MappingContext {
    /// Binds a scalar field at `key` through its registered converter.
    ///
    /// On `FromJson`, an absent keypath fails with
    /// [`MappingError::MissingKey`] and a mismatched tag (including `null`)
    /// fails with [`MappingError::Conversion`].
    pub fn field<T: Json>(&mut self, field: &mut T, key: impl AsRef<KeyPath>) -> &mut Self {
        if self.error().is_some() {
            return self;
        }
        let key = key.as_ref();

        match self.direction() {
            Direction::ToJson => {
                let json = field.to_json();
                self.json_mut().set(key, json);
            }
            Direction::FromJson => {
                let found = self.json().get(key);
                match found {
                    None => self.missing_key(key),
                    Some(json) => match T::from_json(&json) {
                        Some(value) => *field = value,
                        None => self.conversion_failure::<T>(key, &json),
                    },
                }
            }
        }
        self
    }

    /// Binds an optional scalar field at `key`.
    ///
    /// Presence is still required on `FromJson`: only an explicit JSON `null`
    /// maps the field to `None`. On `ToJson`, a `None` field writes `null`.
    pub fn field_opt<T: Json>(
        &mut self,
        field: &mut Option<T>,
        key: impl AsRef<KeyPath>,
    ) -> &mut Self {
        if self.error().is_some() {
            return self;
        }
        let key = key.as_ref();

        match self.direction() {
            Direction::ToJson => {
                let json = match field {
                    Some(value) => value.to_json(),
                    None => Value::Null,
                };
                self.json_mut().set(key, json);
            }
            Direction::FromJson => {
                let found = self.json().get(key);
                match found {
                    None => self.missing_key(key),
                    Some(Value::Null) => *field = None,
                    Some(json) => match T::from_json(&json) {
                        Some(value) => *field = Some(value),
                        None => self.conversion_failure::<T>(key, &json),
                    },
                }
            }
        }
        self
    }

    /// Binds a scalar field at `key` through a custom [`Transform`].
    pub fn field_via<T, X>(&mut self, field: &mut T, key: impl AsRef<KeyPath>, transform: &X) -> &mut Self
    where
        X: Transform<Value = T>,
    {
        if self.error().is_some() {
            return self;
        }
        let key = key.as_ref();

        match self.direction() {
            Direction::ToJson => {
                let json = transform.to_json(field);
                self.json_mut().set(key, json);
            }
            Direction::FromJson => {
                let found = self.json().get(key);
                match found {
                    None => self.missing_key(key),
                    Some(json) => match transform.from_json(&json) {
                        Ok(value) => *field = value,
                        Err(error) => self.fail(error),
                    },
                }
            }
        }
        self
    }

    /// Binds an optional scalar field at `key` through a custom [`Transform`].
    pub fn field_via_opt<T, X>(
        &mut self,
        field: &mut Option<T>,
        key: impl AsRef<KeyPath>,
        transform: &X,
    ) -> &mut Self
    where
        X: Transform<Value = T>,
    {
        if self.error().is_some() {
            return self;
        }
        let key = key.as_ref();

        match self.direction() {
            Direction::ToJson => {
                let json = match field {
                    Some(value) => transform.to_json(value),
                    None => Value::Null,
                };
                self.json_mut().set(key, json);
            }
            Direction::FromJson => {
                let found = self.json().get(key);
                match found {
                    None => self.missing_key(key),
                    Some(Value::Null) => *field = None,
                    Some(json) => match transform.from_json(&json) {
                        Ok(value) => *field = Some(value),
                        Err(error) => self.fail(error),
                    },
                }
            }
        }
        self
    }

    /// Binds a mapped-type relationship at `key`.
    ///
    /// The key must carry a sub-mapping ([`BindKey::nested`]), else the
    /// binding fails with [`MappingError::Description`]. On `FromJson` the
    /// related object is resolved existing-or-new inside this context's
    /// session; a JSON `null` fails, since the field is not optional.
    pub fn nested<'m, M: Mapping + 'm>(
        &mut self,
        field: &mut M::Object,
        key: impl Into<BindKey<'m, M>>,
    ) -> &mut Self {
        if self.error().is_some() {
            return self;
        }
        let key = key.into();
        let Some(mapping) = key.mapping() else {
            self.missing_sub_mapping(&key);
            return self;
        };
        let path = key.keypath();

        match self.direction() {
            Direction::ToJson => match Mapper::map_to_json_chained(field, mapping, &*self) {
                Ok(json) => self.json_mut().set(path, json),
                Err(error) => self.fail(error),
            },
            Direction::FromJson => {
                let found = self.json().get(path);
                match found {
                    None => self.missing_key(path),
                    Some(Value::Null) => self.conversion_failure::<M::Object>(path, &Value::Null),
                    Some(json) => {
                        match Mapper::map_existing_or_new_chained(&json, mapping, Some(&*self)) {
                            Ok(object) => *field = object,
                            Err(error) => self.fail(error),
                        }
                    }
                }
            }
        }
        self
    }

    /// Binds an optional mapped-type relationship at `key`.
    ///
    /// A JSON `null` clears the relationship; absence is still an error.
    pub fn nested_opt<'m, M: Mapping + 'm>(
        &mut self,
        field: &mut Option<M::Object>,
        key: impl Into<BindKey<'m, M>>,
    ) -> &mut Self {
        if self.error().is_some() {
            return self;
        }
        let key = key.into();
        let Some(mapping) = key.mapping() else {
            self.missing_sub_mapping(&key);
            return self;
        };
        let path = key.keypath();

        match self.direction() {
            Direction::ToJson => match field.as_mut() {
                Some(object) => match Mapper::map_to_json_chained(object, mapping, &*self) {
                    Ok(json) => self.json_mut().set(path, json),
                    Err(error) => self.fail(error),
                },
                None => self.json_mut().set(path, Value::Null),
            },
            Direction::FromJson => {
                let found = self.json().get(path);
                match found {
                    None => self.missing_key(path),
                    Some(Value::Null) => *field = None,
                    Some(json) => {
                        match Mapper::map_existing_or_new_chained(&json, mapping, Some(&*self)) {
                            Ok(object) => *field = Some(object),
                            Err(error) => self.fail(error),
                        }
                    }
                }
            }
        }
        self
    }

    /// Binds an ordered collection of a mapped type at `key`.
    ///
    /// On `FromJson` the source must be a JSON array; each element resolves
    /// existing-or-new inside this context's session and the results are
    /// appended to `field` — pre-existing elements are never removed. Unless
    /// the key's options allow duplicates, an element whose primary-key match
    /// already appeared in this call's result set is skipped entirely (its
    /// fields are not re-applied). On `ToJson`, elements convert
    /// independently into an array preserving order.
    pub fn collection<'m, M>(
        &mut self,
        field: &mut Vec<M::Object>,
        key: impl Into<BindKey<'m, M>>,
    ) -> &mut Self
    where
        M: Mapping + 'm,
        M::Object: PartialEq,
    {
        if self.error().is_some() {
            return self;
        }
        let key = key.into();
        let Some(mapping) = key.mapping() else {
            self.missing_sub_mapping(&key);
            return self;
        };
        let path = key.keypath();

        match self.direction() {
            Direction::ToJson => {
                let mut items = Vec::with_capacity(field.len());
                for object in field.iter_mut() {
                    match Mapper::map_to_json_chained(object, mapping, &*self) {
                        Ok(json) => items.push(json),
                        Err(error) => {
                            self.fail(error);
                            return self;
                        }
                    }
                }
                self.json_mut().set(path, Value::Array(items));
            }
            Direction::FromJson => {
                let found = self.json().get(path);
                let elements = match found {
                    None => {
                        self.missing_key(path);
                        return self;
                    }
                    Some(Value::Array(elements)) => elements,
                    Some(other) => {
                        self.conversion_failure::<Vec<M::Object>>(path, &other);
                        return self;
                    }
                };

                let allow_duplicates = key.options().allow_duplicates;
                let mut results: Vec<M::Object> = Vec::with_capacity(elements.len());
                for element in &elements {
                    if !allow_duplicates {
                        match existing_instance(mapping, element) {
                            Ok(Some(existing)) if results.contains(&existing) => {
                                trace!(keypath = %path, "skipping duplicate collection element");
                                continue;
                            }
                            Ok(_) => {}
                            Err(error) => {
                                self.fail(error);
                                return self;
                            }
                        }
                    }
                    match Mapper::map_existing_or_new_chained(element, mapping, Some(&*self)) {
                        Ok(object) => results.push(object),
                        Err(error) => {
                            self.fail(error);
                            return self;
                        }
                    }
                }
                field.extend(results);
            }
        }
        self
    }

    fn missing_key(&mut self, key: &KeyPath) {
        let json = self.json().to_json_string();
        self.fail(MappingError::MissingKey {
            keypath: key.to_key_path_buf(),
            json,
        });
    }

    fn conversion_failure<T>(&mut self, key: &KeyPath, json: &Value) {
        self.fail(MappingError::Conversion {
            keypath: key.to_key_path_buf(),
            expected: std::any::type_name::<T>(),
            actual: json.to_json_string(),
        });
    }

    fn missing_sub_mapping<M>(&mut self, key: &BindKey<'_, M>) {
        self.fail(MappingError::Description {
            reason: format!(
                "binding at keypath '{}' requires a key carrying a sub-mapping",
                key.keypath()
            ),
        });
    }
}
