//! Keypath types for addressing locations in a JSON value tree.
//!
//! A keypath is a dotted sequence of string segments (`"data.lawsuits.pending"`)
//! used to read and write nested values. The [`KeyPath`]/[`KeyPathBuf`] pair
//! follows the same borrowed/owned pattern as `std::path::Path`/`PathBuf`.
//!
//! # Usage
//!
//! ```rust
//! use remap::value::KeyPathBuf;
//!
//! // Construct from a string (automatically normalized)
//! let path = KeyPathBuf::from("user.profile.name");
//!
//! // Build incrementally
//! let path = KeyPathBuf::new().push("user").push("profile").push("name");
//!
//! let segments: Vec<&str> = path.segments().collect();
//! assert_eq!(segments, vec!["user", "profile", "name"]);
//! ```

use std::{borrow::Borrow, fmt, ops::Deref, str::FromStr};

/// Normalizes a keypath string by dropping empty segments.
///
/// - Empty string `""` → empty path (refers to the current value)
/// - Leading dots `".user"` → `"user"`
/// - Trailing dots `"user."` → `"user"`
/// - Consecutive dots `"user..profile"` → `"user.profile"`
/// - Pure dots `"..."` → empty path
pub fn normalize_keypath(input: &str) -> String {
    if input.is_empty() {
        return String::new();
    }

    input
        .split('.')
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join(".")
}

/// An owned keypath for addressing nested JSON values.
///
/// `KeyPathBuf` is always normalized: construction from a string drops empty
/// segments, so `".user..name"` and `"user.name"` are the same path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyPathBuf {
    inner: String,
}

/// A borrowed keypath, the unsized counterpart to [`KeyPathBuf`].
///
/// `KeyPath` is to `KeyPathBuf` what `&str` is to `String`: a view that can be
/// produced from any string without allocation. Segment iteration skips empty
/// segments, so an unnormalized source string still addresses correctly; the
/// raw string form is preserved for literal-key fallback lookups.
#[derive(Debug, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct KeyPath {
    inner: str,
}

impl KeyPathBuf {
    /// Creates a new empty keypath.
    pub fn new() -> Self {
        Self {
            inner: String::new(),
        }
    }

    /// Creates a keypath by normalizing the input string.
    pub fn normalize(path: &str) -> Self {
        Self {
            inner: normalize_keypath(path),
        }
    }

    /// Adds a path to the end of this path, normalizing the input.
    ///
    /// ```rust
    /// # use remap::value::KeyPathBuf;
    /// let path = KeyPathBuf::new().push("data").push("lawsuits.pending");
    /// assert_eq!(path.as_str(), "data.lawsuits.pending");
    /// ```
    pub fn push(mut self, path: impl AsRef<str>) -> Self {
        let normalized = normalize_keypath(path.as_ref());
        if normalized.is_empty() {
            return self;
        }

        if self.inner.is_empty() {
            self.inner = normalized;
        } else {
            self.inner.push('.');
            self.inner.push_str(&normalized);
        }
        self
    }

    /// Joins this path with another keypath.
    pub fn join(mut self, other: impl AsRef<KeyPath>) -> Self {
        let other = other.as_ref();
        if self.inner.is_empty() {
            self.inner = other.inner.to_string();
        } else if !other.inner.is_empty() {
            self.inner.push('.');
            self.inner.push_str(&other.inner);
        }
        self
    }

    /// Returns the parent path, or `None` if this path has at most one segment.
    pub fn parent(&self) -> Option<KeyPathBuf> {
        self.inner.rfind('.').map(|last_dot| KeyPathBuf {
            inner: self.inner[..last_dot].to_string(),
        })
    }
}

impl KeyPath {
    /// Wraps a string slice as a borrowed keypath.
    ///
    /// The string is not normalized; [`segments`](Self::segments) skips empty
    /// segments during iteration and [`as_str`](Self::as_str) preserves the
    /// raw form.
    pub fn new(s: &str) -> &KeyPath {
        // SAFETY: KeyPath is repr(transparent) over str
        unsafe { &*(s as *const str as *const KeyPath) }
    }

    /// Returns an iterator over the non-empty path segments.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.inner.split('.').filter(|s| !s.is_empty())
    }

    /// Returns the number of segments in the path.
    pub fn len(&self) -> usize {
        self.segments().count()
    }

    /// Returns `true` if the path has no segments.
    pub fn is_empty(&self) -> bool {
        self.segments().next().is_none()
    }

    /// Returns the last segment of the path, or `None` if empty.
    pub fn last(&self) -> Option<&str> {
        self.inner.split('.').filter(|s| !s.is_empty()).next_back()
    }

    /// Returns the path as its raw string form.
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Converts this `KeyPath` to an owned, normalized [`KeyPathBuf`].
    pub fn to_key_path_buf(&self) -> KeyPathBuf {
        KeyPathBuf::normalize(&self.inner)
    }
}

impl Default for KeyPathBuf {
    fn default() -> Self {
        Self::new()
    }
}

impl Deref for KeyPathBuf {
    type Target = KeyPath;

    fn deref(&self) -> &Self::Target {
        KeyPath::new(self.inner.as_str())
    }
}

impl AsRef<KeyPath> for KeyPathBuf {
    fn as_ref(&self) -> &KeyPath {
        self.deref()
    }
}

impl AsRef<KeyPath> for KeyPath {
    fn as_ref(&self) -> &KeyPath {
        self
    }
}

impl AsRef<KeyPath> for str {
    fn as_ref(&self) -> &KeyPath {
        KeyPath::new(self)
    }
}

impl AsRef<KeyPath> for String {
    fn as_ref(&self) -> &KeyPath {
        KeyPath::new(self)
    }
}

impl AsRef<str> for KeyPath {
    fn as_ref(&self) -> &str {
        &self.inner
    }
}

impl AsRef<str> for KeyPathBuf {
    fn as_ref(&self) -> &str {
        &self.inner
    }
}

impl Borrow<KeyPath> for KeyPathBuf {
    fn borrow(&self) -> &KeyPath {
        self.deref()
    }
}

impl ToOwned for KeyPath {
    type Owned = KeyPathBuf;

    fn to_owned(&self) -> KeyPathBuf {
        self.to_key_path_buf()
    }
}

impl FromStr for KeyPathBuf {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::normalize(s))
    }
}

impl From<&str> for KeyPathBuf {
    fn from(s: &str) -> Self {
        Self::normalize(s)
    }
}

impl From<String> for KeyPathBuf {
    fn from(s: String) -> Self {
        Self::normalize(&s)
    }
}

impl From<&KeyPath> for KeyPathBuf {
    fn from(path: &KeyPath) -> Self {
        path.to_key_path_buf()
    }
}

impl fmt::Display for KeyPathBuf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.inner)
    }
}
