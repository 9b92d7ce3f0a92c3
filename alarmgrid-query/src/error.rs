//! Error types for filter registry and composer construction.
//!
//! Runtime operations (toggle, clear, rebuild, publish) never fail. Errors
//! only arise when a registry is built from an invalid catalog, or when a
//! caller opts into strict lookups with [`FilterRegistry::try_toggle`].
//!
//! ```rust
//! use alarmgrid_query::{FilterError, FilterRegistry};
//!
//! let mut registry = FilterRegistry::alarms();
//! let err = registry.try_toggle("Shelved alarms").unwrap_err();
//! assert!(matches!(err, FilterError::UnknownPredicate { .. }));
//! ```
//!
//! [`FilterRegistry::try_toggle`]: crate::filter::FilterRegistry::try_toggle

use alarmgrid_schema::SchemaError;
use thiserror::Error;

/// Result type for filter operations.
pub type FilterResult<T> = Result<T, FilterError>;

/// Errors raised while building or strictly addressing a filter registry.
#[derive(Error, Debug)]
pub enum FilterError {
    /// The catalog backing the registry is invalid.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// No predicate with this name exists.
    #[error("unknown predicate `{name}`")]
    UnknownPredicate {
        /// The name that was looked up.
        name: String,
    },
}

impl FilterError {
    /// Create an unknown predicate error.
    pub fn unknown(name: impl Into<String>) -> Self {
        Self::UnknownPredicate { name: name.into() }
    }

    /// Check if this error came from catalog validation.
    pub fn is_schema(&self) -> bool {
        matches!(self, Self::Schema(_))
    }
}
