//!
//! Remap: declarative bidirectional mapping between JSON and typed model
//! objects, with pluggable transactional storage.
//!
//! ## Core Concepts
//!
//! * **Values (`value::Value`)**: A dynamic, self-describing JSON value tree
//!   with dotted-keypath addressing, including implicit broadcast over arrays.
//! * **Converters (`convert::FromJson` / `convert::ToJson`)**: Per-primitive
//!   bidirectional conversions between Rust types and JSON values.
//! * **Mappings (`mapping::Mapping`)**: The declarative per-type description
//!   of field↔keypath bindings, written once and executed in both directions.
//! * **Mapper (`mapping::Mapper`)**: The orchestrator that drives a mapping
//!   description, resolves object identity by primary key, and recurses into
//!   relationship and collection bindings.
//! * **Adaptors (`adaptor::Adaptor`)**: A pluggable transactional storage
//!   capability; the orchestrator brackets each top-level mapping call in one
//!   adaptor session and aborts it on the first binding failure.
//!
//! ## Example
//!
//! ```
//! use remap::adaptor::Transient;
//! use remap::mapping::{Mapper, Mapping, MappingContext};
//! use remap::Value;
//!
//! #[derive(Debug, Clone, Default, PartialEq)]
//! struct Account {
//!     name: String,
//!     balance: f64,
//! }
//!
//! struct AccountMapping {
//!     adaptor: Transient<Account>,
//! }
//!
//! impl Mapping for AccountMapping {
//!     type Object = Account;
//!     type Storage = Transient<Account>;
//!
//!     fn adaptor(&self) -> &Transient<Account> {
//!         &self.adaptor
//!     }
//!
//!     fn bind(&self, account: &mut Account, ctx: &mut MappingContext) {
//!         ctx.field(&mut account.name, "name")
//!             .field(&mut account.balance, "data.balance");
//!     }
//! }
//!
//! let mapping = AccountMapping { adaptor: Transient::new() };
//! let json = Value::parse(r#"{"name":"savings","data":{"balance":12.5}}"#).unwrap();
//!
//! let mut account = Mapper::map_new(&json, &mapping).unwrap();
//! assert_eq!(account.balance, 12.5);
//!
//! let back = Mapper::map_to_json(&mut account, &mapping).unwrap();
//! assert_eq!(back, json);
//! ```

pub mod adaptor;
pub mod convert;
pub mod mapping;
pub mod value;

/// Re-export the core types for easier access.
pub use mapping::{Direction, Mapper, Mapping, MappingContext};
pub use value::Value;

/// Result type used throughout the remap library.
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the remap library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Structured value-model errors from the value module
    #[error(transparent)]
    Value(value::ValueError),

    /// Structured mapping errors from the mapping module
    #[error(transparent)]
    Mapping(mapping::MappingError),

    /// Structured storage errors from the adaptor module
    #[error(transparent)]
    Adaptor(adaptor::AdaptorError),
}

impl Error {
    /// Get the originating module for this error.
    pub fn module(&self) -> &'static str {
        match self {
            Error::Value(_) => "value",
            Error::Mapping(_) => "mapping",
            Error::Adaptor(_) => "adaptor",
        }
    }

    /// Check if this error is a missing required keypath.
    pub fn is_missing_key(&self) -> bool {
        match self {
            Error::Mapping(mapping_err) => mapping_err.is_missing_key(),
            _ => false,
        }
    }

    /// Check if this error is a missing primary-key keypath.
    pub fn is_missing_primary_key(&self) -> bool {
        match self {
            Error::Mapping(mapping_err) => mapping_err.is_missing_primary_key(),
            _ => false,
        }
    }

    /// Check if this error is a type conversion failure.
    pub fn is_conversion(&self) -> bool {
        match self {
            Error::Mapping(mapping_err) => mapping_err.is_conversion(),
            _ => false,
        }
    }

    /// Check if this error is a malformed mapping description.
    pub fn is_description(&self) -> bool {
        match self {
            Error::Mapping(mapping_err) => mapping_err.is_description(),
            _ => false,
        }
    }

    /// Check if this error originated at the storage boundary.
    pub fn is_adaptor_error(&self) -> bool {
        matches!(self, Error::Adaptor(_))
    }

    /// Check if this error is a JSON text parse failure.
    pub fn is_parse_error(&self) -> bool {
        match self {
            Error::Value(value_err) => value_err.is_parse_error(),
            _ => false,
        }
    }
}
