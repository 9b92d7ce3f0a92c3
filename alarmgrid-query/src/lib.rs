//! # alarmgrid-query
//!
//! Filter registry and query composer for alarmgrid.
//!
//! This crate provides:
//! - A registry of named, togglable filter predicates with a live active count
//! - A composer that turns the active set into one `OR`-joined query
//! - Output sinks the composed query is published to
//! - Grid host logic driven by toggle, clear and locale-change events
//!
//! ## Composing Queries
//!
//! ```rust
//! use alarmgrid_query::{QueryComposer, sink::MemorySlot};
//! use alarmgrid_schema::names;
//!
//! let mut composer = QueryComposer::alarms(MemorySlot::new());
//!
//! composer.toggle(names::ACTIVE);
//! composer.rebuild();
//! assert_eq!(composer.current_query(), "SELECT * FROM Model WHERE ActiveState = 'True'");
//!
//! composer.clear_all();
//! composer.rebuild();
//! assert_eq!(composer.current_query(), "SELECT * FROM Model");
//! ```
//!
//! ## Unknown Predicates
//!
//! Toggling a name that is not in the catalog is ignored:
//!
//! ```rust
//! use alarmgrid_query::FilterRegistry;
//!
//! let mut registry = FilterRegistry::alarms();
//! assert!(!registry.toggle("Shelved alarms"));
//! assert_eq!(registry.active_count(), 0);
//! ```

pub mod composer;
pub mod error;
pub mod filter;
pub mod grid;
pub mod logging;
pub mod sink;

pub use composer::{QueryComposer, compose};
pub use error::{FilterError, FilterResult};
pub use filter::{FilterRegistry, Predicate};
pub use grid::{AlarmGrid, GridEvent, SharedAlarmGrid};
pub use sink::{MemorySlot, QuerySink, SharedSlot, Slot, TracingSink};

// Re-export logging utilities
pub use logging::{get_log_format, get_log_level, init as init_logging, init_debug, init_with_level, is_debug_enabled};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::composer::QueryComposer;
    pub use crate::error::{FilterError, FilterResult};
    pub use crate::filter::{FilterRegistry, Predicate};
    pub use crate::grid::{AlarmGrid, GridEvent};
    pub use crate::sink::{QuerySink, Slot};
}
