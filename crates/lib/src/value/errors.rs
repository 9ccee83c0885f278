//! Error types for the dynamic JSON value model.

use thiserror::Error;

/// Structured error types for decoding external JSON representations.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ValueError {
    /// The input text is not valid JSON.
    #[error("failed to parse JSON text")]
    Parse {
        #[source]
        source: serde_json::Error,
    },

    /// A numeric encoding in the input has no corresponding value tag.
    #[error("number {value} has no JSON value representation")]
    UnrepresentableNumber { value: String },
}

impl ValueError {
    /// Check if this error is a JSON text parse failure
    pub fn is_parse_error(&self) -> bool {
        matches!(self, ValueError::Parse { .. })
    }
}

// Conversion from ValueError to the main Error type
impl From<ValueError> for crate::Error {
    fn from(err: ValueError) -> Self {
        crate::Error::Value(err)
    }
}
