//! Error types for catalog loading and validation.

// These warnings are false positives - the fields are used by derive macros
#![allow(unused_assignments)]

use miette::Diagnostic;
use thiserror::Error;

/// Result type for schema operations.
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Errors that can occur while loading or validating a predicate catalog.
#[derive(Error, Debug, Diagnostic)]
pub enum SchemaError {
    /// Error reading a file.
    #[error("failed to read file: {path}")]
    #[diagnostic(code(alarmgrid::schema::io_error))]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// TOML parsing error.
    #[error("failed to parse TOML")]
    #[diagnostic(code(alarmgrid::schema::toml_error))]
    TomlError {
        #[source]
        source: toml::de::Error,
    },

    /// Two predicates share a name.
    #[error("duplicate predicate `{name}`")]
    #[diagnostic(
        code(alarmgrid::schema::duplicate_predicate),
        help("predicate names are the toggle keys and must be unique")
    )]
    DuplicatePredicate { name: String },

    /// A predicate has an empty name.
    #[error("predicate at position {index} has an empty name")]
    #[diagnostic(code(alarmgrid::schema::empty_name))]
    EmptyName { index: usize },

    /// A predicate has an empty condition.
    #[error("predicate `{name}` has an empty condition")]
    #[diagnostic(code(alarmgrid::schema::empty_condition))]
    EmptyCondition { name: String },

    /// The base query is empty.
    #[error("base query must not be empty")]
    #[diagnostic(code(alarmgrid::schema::empty_base_query))]
    EmptyBaseQuery,

    /// Validation error with multiple issues.
    #[error("catalog validation failed with {count} error(s)")]
    #[diagnostic(code(alarmgrid::schema::validation_failed))]
    ValidationFailed {
        count: usize,
        #[related]
        errors: Vec<SchemaError>,
    },
}

impl SchemaError {
    /// Create a duplicate predicate error.
    pub fn duplicate(name: impl Into<String>) -> Self {
        Self::DuplicatePredicate { name: name.into() }
    }

    /// Create an empty condition error.
    pub fn empty_condition(name: impl Into<String>) -> Self {
        Self::EmptyCondition { name: name.into() }
    }

    /// Collapse a list of validation errors into one.
    ///
    /// A single error is returned as-is rather than wrapped.
    pub fn from_errors(mut errors: Vec<SchemaError>) -> Self {
        if errors.len() == 1 {
            if let Some(err) = errors.pop() {
                return err;
            }
        }
        Self::ValidationFailed {
            count: errors.len(),
            errors,
        }
    }
}
