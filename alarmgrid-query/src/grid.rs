//! Host logic for a filterable alarm grid.
//!
//! [`AlarmGrid`] is what the trigger source drives. Each filter event runs
//! the full toggle, rebuild, publish sequence against the composer. Locale
//! changes are handled separately: the grid model's link slot is written
//! empty and then restored, forcing its consumer to re-subscribe without
//! touching filter state.
//!
//! ```rust
//! use alarmgrid_query::grid::{AlarmGrid, GridEvent};
//! use alarmgrid_query::sink::{MemorySlot, SharedSlot, Slot};
//! use alarmgrid_schema::names;
//!
//! let query = SharedSlot::new();
//! let mut grid = AlarmGrid::alarms(query.clone(), MemorySlot::bound("Alarms/Model"));
//!
//! grid.handle(GridEvent::toggle(names::ACKED));
//! assert_eq!(
//!     query.read().as_deref(),
//!     Some("SELECT * FROM Model WHERE AckedState = 'True'")
//! );
//!
//! grid.handle(GridEvent::ClearAll);
//! assert_eq!(query.read().as_deref(), Some("SELECT * FROM Model"));
//! ```

use std::sync::Arc;

use alarmgrid_schema::GridConfig;
use parking_lot::Mutex;
use smol_str::SmolStr;
use tracing::debug;

use crate::composer::QueryComposer;
use crate::error::FilterResult;
use crate::sink::{QuerySink, Slot};

/// A grid shared between threads.
///
/// The registry's flags and count are not independently atomic, so every
/// event on a multi-threaded host goes through this single lock.
pub type SharedAlarmGrid<S, L> = Arc<Mutex<AlarmGrid<S, L>>>;

/// A discrete event from the trigger source or session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridEvent {
    /// Toggle the named predicate.
    Toggle(SmolStr),
    /// Deactivate every predicate.
    ClearAll,
    /// The display language changed.
    LocaleChanged,
}

impl GridEvent {
    /// Create a toggle event.
    pub fn toggle(name: impl Into<SmolStr>) -> Self {
        Self::Toggle(name.into())
    }
}

/// Drives a [`QueryComposer`] from grid events.
#[derive(Debug)]
pub struct AlarmGrid<S, L> {
    composer: QueryComposer<S>,
    link: L,
}

impl<S: QuerySink, L: Slot> AlarmGrid<S, L> {
    /// Create a grid over an existing composer and the model's link slot.
    pub fn new(composer: QueryComposer<S>, link: L) -> Self {
        Self { composer, link }
    }

    /// A grid over the built-in alarm catalog.
    pub fn alarms(sink: S, link: L) -> Self {
        Self::new(QueryComposer::alarms(sink), link)
    }

    /// A grid configured from `alarmgrid.toml` settings.
    pub fn from_config(config: &GridConfig, sink: S, link: L) -> FilterResult<Self> {
        Ok(Self::new(QueryComposer::from_config(config, sink)?, link))
    }

    /// Toggle `name` and publish the resulting query.
    pub fn filter(&mut self, name: &str) {
        self.composer.toggle(name);
        self.composer.rebuild();
        self.composer.publish();
    }

    /// Clear every predicate and publish the unfiltered query.
    pub fn clear_all(&mut self) {
        self.composer.clear_all();
        self.composer.rebuild();
        self.composer.publish();
    }

    /// Force the link's consumer to re-subscribe.
    ///
    /// Does nothing when no link value is bound.
    pub fn on_locale_change(&mut self) {
        let Some(value) = self.link.read() else {
            debug!("No link bound, skipping locale refresh");
            return;
        };

        self.link.write("");
        self.link.write(&value);
        debug!(link = %value, "Rebound link after locale change");
    }

    /// Dispatch one event.
    pub fn handle(&mut self, event: GridEvent) {
        match event {
            GridEvent::Toggle(name) => self.filter(&name),
            GridEvent::ClearAll => self.clear_all(),
            GridEvent::LocaleChanged => self.on_locale_change(),
        }
    }

    /// The composer owning the filter state.
    pub fn composer(&self) -> &QueryComposer<S> {
        &self.composer
    }

    /// The model's link slot.
    pub fn link(&self) -> &L {
        &self.link
    }

    /// Wrap the grid for use from several threads.
    pub fn into_shared(self) -> SharedAlarmGrid<S, L> {
        Arc::new(Mutex::new(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::MemorySlot;
    use alarmgrid_schema::names;
    use pretty_assertions::assert_eq;

    fn grid() -> AlarmGrid<MemorySlot, MemorySlot> {
        AlarmGrid::alarms(MemorySlot::new(), MemorySlot::bound("Model/DynamicLink"))
    }

    #[test]
    fn test_filter_publishes() {
        let mut grid = grid();
        grid.filter(names::ACTIVE);
        assert_eq!(
            grid.composer().sink().history(),
            ["SELECT * FROM Model WHERE ActiveState = 'True'"]
        );
    }

    #[test]
    fn test_unknown_filter_republishes_same_query() {
        let mut grid = grid();
        grid.filter(names::INACTIVE);
        grid.filter("Shelved alarms");
        let history = grid.composer().sink().history();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0], history[1]);
    }

    #[test]
    fn test_clear_all_publishes_base() {
        let mut grid = grid();
        grid.filter(names::ACKED);
        grid.filter(names::UNACKED);
        grid.clear_all();
        assert_eq!(grid.composer().sink().value(), Some("SELECT * FROM Model"));
        assert_eq!(grid.composer().registry().active_count(), 0);
    }

    #[test]
    fn test_locale_change_round_trips_link() {
        let mut grid = grid();
        grid.filter(names::CONFIRMED);
        let query = grid.composer().current_query().to_string();

        grid.on_locale_change();

        assert_eq!(grid.link().history(), ["", "Model/DynamicLink"]);
        assert_eq!(grid.link().value(), Some("Model/DynamicLink"));
        assert_eq!(grid.composer().current_query(), query);
        assert_eq!(grid.composer().sink().history().len(), 1);
        assert!(grid.composer().registry().is_active(names::CONFIRMED));
    }

    #[test]
    fn test_locale_change_without_link() {
        let mut grid = AlarmGrid::alarms(MemorySlot::new(), MemorySlot::new());
        grid.on_locale_change();
        assert!(grid.link().history().is_empty());
    }

    #[test]
    fn test_handle_dispatches() {
        let mut grid = grid();
        grid.handle(GridEvent::toggle(names::UNCONFIRMED));
        grid.handle(GridEvent::LocaleChanged);
        grid.handle(GridEvent::ClearAll);

        assert_eq!(
            grid.composer().sink().history(),
            [
                "SELECT * FROM Model WHERE ConfirmedState = 'False'",
                "SELECT * FROM Model",
            ]
        );
        assert_eq!(grid.link().history().len(), 2);
    }

    #[test]
    fn test_shared_grid_across_threads() {
        let shared = grid().into_shared();
        let handles: Vec<_> = [names::ACTIVE, names::INACTIVE, names::ACKED, names::UNACKED]
            .into_iter()
            .map(|name| {
                let shared = Arc::clone(&shared);
                std::thread::spawn(move || shared.lock().filter(name))
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let grid = shared.lock();
        let registry = grid.composer().registry();
        assert_eq!(registry.active_count(), 4);
        assert_eq!(
            grid.composer().current_query(),
            "SELECT * FROM Model WHERE ActiveState = 'True' OR ActiveState = 'False' \
             OR AckedState = 'True' OR AckedState = 'False'"
        );
    }
}
