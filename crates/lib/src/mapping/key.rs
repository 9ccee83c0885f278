use crate::value::{KeyPath, KeyPathBuf};

/// Options attached to a field binding.
///
/// Currently one flag: `allow_duplicates`, which disables the primary-key
/// deduplication collection bindings apply by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BindOptions {
    /// Keep collection elements whose primary key already appeared in the
    /// collection's result set instead of dropping them.
    pub allow_duplicates: bool,
}

impl BindOptions {
    /// Creates the default option set (duplicates suppressed).
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables duplicate collection elements.
    pub fn allow_duplicates(mut self) -> Self {
        self.allow_duplicates = true;
        self
    }
}

/// A binding key: a keypath that may carry an attached sub-mapping and
/// options.
///
/// Scalar bindings only need a keypath; relationship and collection bindings
/// additionally carry the sub-mapping that maps each related object, and
/// optionally a [`BindOptions`] set. The accessors resolve through the
/// variants recursively.
///
/// ```
/// use remap::mapping::{BindKey, BindOptions};
///
/// struct EmployeeMapping;
/// let employees = EmployeeMapping;
///
/// let key = BindKey::nested("employees", &employees)
///     .with_options(BindOptions::new().allow_duplicates());
/// assert_eq!(key.keypath().as_str(), "employees");
/// assert!(key.options().allow_duplicates);
/// ```
pub enum BindKey<'m, M> {
    /// A bare keypath.
    Key(KeyPathBuf),
    /// A keypath with the sub-mapping for the related object type.
    Nested(KeyPathBuf, &'m M),
    /// An inner key with attached options.
    WithOptions(Box<BindKey<'m, M>>, BindOptions),
}

impl<'m, M> BindKey<'m, M> {
    /// Creates a bare keypath key.
    pub fn key(path: impl Into<KeyPathBuf>) -> Self {
        BindKey::Key(path.into())
    }

    /// Creates a key carrying a sub-mapping.
    pub fn nested(path: impl Into<KeyPathBuf>, mapping: &'m M) -> Self {
        BindKey::Nested(path.into(), mapping)
    }

    /// Wraps this key with options.
    pub fn with_options(self, options: BindOptions) -> Self {
        BindKey::WithOptions(Box::new(self), options)
    }

    /// The keypath this key addresses.
    pub fn keypath(&self) -> &KeyPath {
        match self {
            BindKey::Key(path) => path,
            BindKey::Nested(path, _) => path,
            BindKey::WithOptions(inner, _) => inner.keypath(),
        }
    }

    /// The attached sub-mapping, if this key carries one.
    pub fn mapping(&self) -> Option<&'m M> {
        match self {
            BindKey::Key(_) => None,
            BindKey::Nested(_, mapping) => Some(mapping),
            BindKey::WithOptions(inner, _) => inner.mapping(),
        }
    }

    /// The options attached to this key, defaulted if none are.
    pub fn options(&self) -> BindOptions {
        match self {
            BindKey::WithOptions(_, options) => *options,
            _ => BindOptions::default(),
        }
    }
}

impl<'m, M> From<&str> for BindKey<'m, M> {
    fn from(path: &str) -> Self {
        BindKey::Key(path.into())
    }
}

impl<'m, M> From<String> for BindKey<'m, M> {
    fn from(path: String) -> Self {
        BindKey::Key(path.into())
    }
}

impl<'m, M> From<KeyPathBuf> for BindKey<'m, M> {
    fn from(path: KeyPathBuf) -> Self {
        BindKey::Key(path)
    }
}

impl<'m, M> From<(&str, &'m M)> for BindKey<'m, M> {
    fn from((path, mapping): (&str, &'m M)) -> Self {
        BindKey::Nested(path.into(), mapping)
    }
}

impl<'m, M> From<(KeyPathBuf, &'m M)> for BindKey<'m, M> {
    fn from((path, mapping): (KeyPathBuf, &'m M)) -> Self {
        BindKey::Nested(path, mapping)
    }
}
