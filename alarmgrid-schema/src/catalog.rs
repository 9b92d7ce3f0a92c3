//! Predicate catalog definitions.
//!
//! A [`Catalog`] is the fixed set of togglable conditions offered to the
//! operator, together with the base query they narrow. The built-in alarm
//! catalog is available through [`Catalog::default`].
//!
//! ```rust
//! use alarmgrid_schema::Catalog;
//!
//! let catalog = Catalog::default();
//! assert_eq!(catalog.base_query, "SELECT * FROM Model");
//! assert_eq!(catalog.predicates.len(), 6);
//! assert!(catalog.validate().is_ok());
//! ```

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use tracing::debug;

use crate::error::{SchemaError, SchemaResult};

/// The unfiltered query over the alarm model.
pub const BASE_QUERY: &str = "SELECT * FROM Model";

/// Built-in alarm predicates as `(name, condition)` pairs, in display order.
pub const ALARM_PREDICATES: &[(&str, &str)] = &[
    ("Active alarms", "ActiveState = 'True'"),
    ("Inactive alarms", "ActiveState = 'False'"),
    ("In Alarm – Confirmed", "ConfirmedState = 'True'"),
    ("In Alarm – Unconfirmed", "ConfirmedState = 'False'"),
    ("In Alarm – Acked", "AckedState = 'True'"),
    ("In Alarm – Unacked", "AckedState = 'False'"),
];

/// Well-known predicate names of the built-in catalog.
pub mod names {
    /// Alarms whose condition is currently active.
    pub const ACTIVE: &str = "Active alarms";
    /// Alarms whose condition has cleared.
    pub const INACTIVE: &str = "Inactive alarms";
    /// In-alarm and confirmed.
    pub const CONFIRMED: &str = "In Alarm – Confirmed";
    /// In-alarm and not yet confirmed.
    pub const UNCONFIRMED: &str = "In Alarm – Unconfirmed";
    /// In-alarm and acknowledged.
    pub const ACKED: &str = "In Alarm – Acked";
    /// In-alarm and not yet acknowledged.
    pub const UNACKED: &str = "In Alarm – Unacked";
}

/// A single catalog entry: the operator-facing name and the condition
/// fragment it contributes to the composed query.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PredicateDef {
    /// Unique, stable identifier shown to the operator.
    pub name: SmolStr,
    /// Opaque fragment combined verbatim into the query.
    pub condition: String,
}

impl PredicateDef {
    /// Create a new predicate definition.
    pub fn new(name: impl Into<SmolStr>, condition: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            condition: condition.into(),
        }
    }
}

/// An ordered predicate catalog plus the base query it filters.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Catalog {
    /// The unfiltered query.
    #[serde(default = "default_base_query")]
    pub base_query: String,

    /// Predicates in display (and composition) order.
    #[serde(default = "default_predicates")]
    pub predicates: Vec<PredicateDef>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            base_query: default_base_query(),
            predicates: default_predicates(),
        }
    }
}

fn default_base_query() -> String {
    BASE_QUERY.to_string()
}

fn default_predicates() -> Vec<PredicateDef> {
    ALARM_PREDICATES
        .iter()
        .map(|(name, condition)| PredicateDef::new(*name, *condition))
        .collect()
}

impl Catalog {
    /// Create a catalog from a base query and predicate definitions.
    pub fn new(
        base_query: impl Into<String>,
        predicates: impl IntoIterator<Item = PredicateDef>,
    ) -> Self {
        Self {
            base_query: base_query.into(),
            predicates: predicates.into_iter().collect(),
        }
    }

    /// Append a predicate definition.
    pub fn with_predicate(mut self, name: impl Into<SmolStr>, condition: impl Into<String>) -> Self {
        self.predicates.push(PredicateDef::new(name, condition));
        self
    }

    /// Check that the catalog can back a filter registry.
    ///
    /// Every problem found is reported, not just the first.
    pub fn validate(&self) -> SchemaResult<()> {
        let mut errors = Vec::new();

        if self.base_query.trim().is_empty() {
            errors.push(SchemaError::EmptyBaseQuery);
        }

        let mut seen = HashSet::with_capacity(self.predicates.len());
        for (index, def) in self.predicates.iter().enumerate() {
            if def.name.trim().is_empty() {
                errors.push(SchemaError::EmptyName { index });
                continue;
            }
            if def.condition.trim().is_empty() {
                errors.push(SchemaError::empty_condition(def.name.as_str()));
            }
            if !seen.insert(def.name.as_str()) {
                errors.push(SchemaError::duplicate(def.name.as_str()));
            }
        }

        if errors.is_empty() {
            debug!(predicates = self.predicates.len(), "Catalog validated");
            Ok(())
        } else {
            Err(SchemaError::from_errors(errors))
        }
    }

    /// Look up a predicate definition by name.
    pub fn get(&self, name: &str) -> Option<&PredicateDef> {
        self.predicates.iter().find(|def| def.name == name)
    }
}
