//! Error types for mapping operations.

use thiserror::Error;

use crate::value::KeyPathBuf;

/// Structured error types for field binding and orchestration failures.
///
/// Every variant carries enough context to diagnose the failure without the
/// original payload: the offending keypath and the JSON node rendered as
/// text. The first binding failure in declaration order wins; later bindings
/// in the same mapping call never overwrite it.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum MappingError {
    /// A required keypath is absent from the JSON being mapped.
    #[error("could not find value at keypath '{keypath}' in JSON {json}")]
    MissingKey { keypath: KeyPathBuf, json: String },

    /// A declared primary-key keypath is absent while resolving identity.
    #[error("primary key '{keypath}' does not exist in JSON {json} but is expected by the mapping")]
    MissingPrimaryKey { keypath: KeyPathBuf, json: String },

    /// A JSON node's tag does not match the target field type.
    #[error("conversion of JSON {actual} at keypath '{keypath}' to {expected} failed")]
    Conversion {
        keypath: KeyPathBuf,
        expected: &'static str,
        actual: String,
    },

    /// A binding combinator was invoked with an incompatible key kind.
    #[error("malformed mapping description: {reason}")]
    Description { reason: String },
}

impl MappingError {
    /// Check if this error is a missing required keypath
    pub fn is_missing_key(&self) -> bool {
        matches!(self, MappingError::MissingKey { .. })
    }

    /// Check if this error is a missing primary-key keypath
    pub fn is_missing_primary_key(&self) -> bool {
        matches!(self, MappingError::MissingPrimaryKey { .. })
    }

    /// Check if this error is a type conversion failure
    pub fn is_conversion(&self) -> bool {
        matches!(self, MappingError::Conversion { .. })
    }

    /// Check if this error is a malformed mapping description
    pub fn is_description(&self) -> bool {
        matches!(self, MappingError::Description { .. })
    }

    /// Get the keypath if this error is tied to one
    pub fn keypath(&self) -> Option<&KeyPathBuf> {
        match self {
            MappingError::MissingKey { keypath, .. }
            | MappingError::MissingPrimaryKey { keypath, .. }
            | MappingError::Conversion { keypath, .. } => Some(keypath),
            _ => None,
        }
    }
}

// Conversion from MappingError to the main Error type
impl From<MappingError> for crate::Error {
    fn from(err: MappingError) -> Self {
        crate::Error::Mapping(err)
    }
}
