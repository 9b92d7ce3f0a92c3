//! The filter registry: an ordered catalog of togglable predicates.
//!
//! The registry tracks which predicates are active and keeps a running
//! count of them, so "is anything active" is answered without a scan.
//! Predicates are stored in an insertion-ordered map keyed by name, which
//! gives constant-time lookup while iteration stays in catalog order.
//!
//! ```rust
//! use alarmgrid_query::FilterRegistry;
//! use alarmgrid_schema::names;
//!
//! let mut registry = FilterRegistry::alarms();
//! registry.toggle(names::ACTIVE);
//! assert_eq!(registry.active_count(), 1);
//! assert!(registry.is_active(names::ACTIVE));
//!
//! registry.clear_all();
//! assert_eq!(registry.active_count(), 0);
//! ```

use alarmgrid_schema::{ALARM_PREDICATES, Catalog, PredicateDef, SchemaError};
use indexmap::IndexMap;
use smol_str::SmolStr;
use tracing::{debug, warn};

use crate::error::{FilterError, FilterResult};

/// A catalog entry with its current toggle state.
///
/// Name and condition are fixed at construction; only `active` changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Predicate {
    name: SmolStr,
    condition: String,
    active: bool,
}

impl Predicate {
    fn new(name: SmolStr, condition: String) -> Self {
        Self {
            name,
            condition,
            active: false,
        }
    }

    /// The operator-facing name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The condition fragment combined into the composed query.
    pub fn condition(&self) -> &str {
        &self.condition
    }

    /// Whether this predicate is currently toggled on.
    pub fn is_active(&self) -> bool {
        self.active
    }
}

/// Ordered set of predicates plus the number currently active.
#[derive(Debug, Clone, Default)]
pub struct FilterRegistry {
    predicates: IndexMap<SmolStr, Predicate>,
    active_count: usize,
}

impl FilterRegistry {
    /// Build a registry from predicate definitions, all initially inactive.
    ///
    /// Names must be non-empty and unique, and conditions non-empty.
    pub fn new(defs: impl IntoIterator<Item = PredicateDef>) -> FilterResult<Self> {
        let mut registry = Self::default();
        for (index, def) in defs.into_iter().enumerate() {
            if def.name.trim().is_empty() {
                return Err(SchemaError::EmptyName { index }.into());
            }
            if def.condition.trim().is_empty() {
                return Err(SchemaError::empty_condition(def.name.as_str()).into());
            }
            if registry.predicates.contains_key(&def.name) {
                return Err(SchemaError::duplicate(def.name.as_str()).into());
            }
            registry.insert(def.name, def.condition);
        }
        Ok(registry)
    }

    /// Build a registry from a validated catalog.
    pub fn from_catalog(catalog: &Catalog) -> FilterResult<Self> {
        catalog.validate()?;
        Self::new(catalog.predicates.iter().cloned())
    }

    /// The built-in alarm catalog.
    pub fn alarms() -> Self {
        let mut registry = Self::default();
        for (name, condition) in ALARM_PREDICATES {
            registry.insert(SmolStr::new(name), (*condition).to_string());
        }
        registry
    }

    fn insert(&mut self, name: SmolStr, condition: String) {
        self.predicates
            .insert(name.clone(), Predicate::new(name, condition));
    }

    /// Flip the predicate called `name`.
    ///
    /// Unknown names are ignored and leave the registry untouched. Returns
    /// whether a predicate was found.
    pub fn toggle(&mut self, name: &str) -> bool {
        match self.flip(name) {
            Some(active) => {
                debug!(
                    predicate = name,
                    active,
                    active_count = self.active_count,
                    "Toggled filter predicate"
                );
                true
            }
            None => {
                warn!(predicate = name, "Ignoring toggle of unknown filter predicate");
                false
            }
        }
    }

    /// Flip the predicate called `name`, failing if it does not exist.
    ///
    /// Returns the predicate's new state.
    pub fn try_toggle(&mut self, name: &str) -> FilterResult<bool> {
        self.flip(name).ok_or_else(|| FilterError::unknown(name))
    }

    fn flip(&mut self, name: &str) -> Option<bool> {
        let predicate = self.predicates.get_mut(name)?;
        predicate.active = !predicate.active;
        if predicate.active {
            self.active_count += 1;
        } else {
            self.active_count -= 1;
        }
        Some(predicate.active)
    }

    /// Deactivate every predicate.
    pub fn clear_all(&mut self) {
        for predicate in self.predicates.values_mut() {
            predicate.active = false;
        }
        self.active_count = 0;
        debug!("Cleared all filter predicates");
    }

    /// Number of active predicates.
    #[inline]
    pub fn active_count(&self) -> usize {
        self.active_count
    }

    /// Whether at least one predicate is active.
    #[inline]
    pub fn has_active(&self) -> bool {
        self.active_count > 0
    }

    /// Number of predicates in the catalog.
    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    /// Look up a predicate by name.
    pub fn get(&self, name: &str) -> Option<&Predicate> {
        self.predicates.get(name)
    }

    /// Whether the predicate called `name` exists and is active.
    pub fn is_active(&self, name: &str) -> bool {
        self.get(name).is_some_and(Predicate::is_active)
    }

    /// All predicates in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &Predicate> {
        self.predicates.values()
    }

    /// Active predicates in catalog order.
    pub fn active(&self) -> impl Iterator<Item = &Predicate> {
        self.iter().filter(|p| p.active)
    }
}

impl<'a> IntoIterator for &'a FilterRegistry {
    type Item = &'a Predicate;
    type IntoIter = indexmap::map::Values<'a, SmolStr, Predicate>;

    fn into_iter(self) -> Self::IntoIter {
        self.predicates.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alarmgrid_schema::names;

    fn live_count(registry: &FilterRegistry) -> usize {
        registry.iter().filter(|p| p.is_active()).count()
    }

    #[test]
    fn test_alarms_catalog() {
        let registry = FilterRegistry::alarms();
        assert_eq!(registry.len(), 6);
        assert_eq!(registry.active_count(), 0);
        assert!(!registry.has_active());
        assert_eq!(
            registry.get(names::CONFIRMED).map(Predicate::condition),
            Some("ConfirmedState = 'True'")
        );
    }

    #[test]
    fn test_toggle_tracks_count() {
        let mut registry = FilterRegistry::alarms();
        assert!(registry.toggle(names::ACTIVE));
        assert!(registry.toggle(names::ACKED));
        assert_eq!(registry.active_count(), 2);
        assert!(registry.toggle(names::ACTIVE));
        assert_eq!(registry.active_count(), 1);
        assert!(!registry.is_active(names::ACTIVE));
        assert!(registry.is_active(names::ACKED));
    }

    #[test]
    fn test_count_matches_flags_over_sequence() {
        let mut registry = FilterRegistry::alarms();
        let sequence = [
            names::ACTIVE,
            names::UNACKED,
            "bogus",
            names::ACTIVE,
            names::CONFIRMED,
            names::INACTIVE,
            names::UNACKED,
            "",
            names::ACKED,
        ];
        for name in sequence {
            registry.toggle(name);
            assert_eq!(registry.active_count(), live_count(&registry));
        }
        assert_eq!(registry.active_count(), 3);
    }

    #[test]
    fn test_unknown_toggle_is_noop() {
        let mut registry = FilterRegistry::alarms();
        registry.toggle(names::INACTIVE);
        let before: Vec<_> = registry.iter().map(Predicate::is_active).collect();

        assert!(!registry.toggle("Shelved alarms"));

        let after: Vec<_> = registry.iter().map(Predicate::is_active).collect();
        assert_eq!(before, after);
        assert_eq!(registry.active_count(), 1);
    }

    #[test]
    fn test_name_lookup_is_exact() {
        let mut registry = FilterRegistry::alarms();
        assert!(!registry.toggle("active alarms"));
        assert!(!registry.toggle("Active alarms "));
        assert_eq!(registry.active_count(), 0);
    }

    #[test]
    fn test_double_toggle_restores() {
        let mut registry = FilterRegistry::alarms();
        registry.toggle(names::UNCONFIRMED);
        registry.toggle(names::INACTIVE);
        registry.toggle(names::INACTIVE);
        assert_eq!(registry.active_count(), 1);
        assert!(!registry.is_active(names::INACTIVE));
        assert!(registry.is_active(names::UNCONFIRMED));
    }

    #[test]
    fn test_clear_all() {
        let mut registry = FilterRegistry::alarms();
        for predicate in ALARM_PREDICATES {
            registry.toggle(predicate.0);
        }
        assert_eq!(registry.active_count(), 6);

        registry.clear_all();
        assert_eq!(registry.active_count(), 0);
        assert_eq!(registry.active().count(), 0);
    }

    #[test]
    fn test_active_in_catalog_order() {
        let mut registry = FilterRegistry::alarms();
        registry.toggle(names::UNACKED);
        registry.toggle(names::ACTIVE);
        registry.toggle(names::CONFIRMED);
        let active: Vec<_> = registry.active().map(Predicate::name).collect();
        assert_eq!(active, vec![names::ACTIVE, names::CONFIRMED, names::UNACKED]);
    }

    #[test]
    fn test_try_toggle() {
        let mut registry = FilterRegistry::alarms();
        assert!(registry.try_toggle(names::ACKED).unwrap());
        assert!(!registry.try_toggle(names::ACKED).unwrap());
        assert!(matches!(
            registry.try_toggle("nope"),
            Err(FilterError::UnknownPredicate { .. })
        ));
        assert_eq!(registry.active_count(), 0);
    }

    #[test]
    fn test_new_rejects_duplicates() {
        let result = FilterRegistry::new([
            PredicateDef::new("A", "X = 1"),
            PredicateDef::new("A", "X = 2"),
        ]);
        assert!(matches!(
            result,
            Err(FilterError::Schema(SchemaError::DuplicatePredicate { .. }))
        ));
    }

    #[test]
    fn test_new_rejects_empty_condition() {
        let result = FilterRegistry::new([PredicateDef::new("A", " ")]);
        assert!(matches!(
            result,
            Err(FilterError::Schema(SchemaError::EmptyCondition { .. }))
        ));
    }

    #[test]
    fn test_from_catalog_matches_alarms() {
        let from_catalog = FilterRegistry::from_catalog(&Catalog::default()).unwrap();
        let builtin = FilterRegistry::alarms();
        assert!(from_catalog.iter().eq(builtin.iter()));
    }
}
