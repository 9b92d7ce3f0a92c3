//! # alarmgrid
//!
//! Toggle-driven filtering for live alarm grids.
//!
//! alarmgrid provides:
//! - A fixed catalog of named alarm predicates (active, inactive, acked, ...)
//! - A registry that tracks which predicates the operator switched on
//! - A composer that rebuilds one `OR`-joined query and publishes it to a sink
//! - Host logic reacting to toggle, clear-all and locale-change events
//!
//! ## Quick Start
//!
//! ```rust
//! use alarmgrid::prelude::*;
//! use alarmgrid::sink::SharedSlot;
//!
//! let query = SharedSlot::new();
//! let link = SharedSlot::bound("AlarmsDataGrid/Model");
//! let mut grid = AlarmGrid::alarms(query.clone(), link);
//!
//! grid.filter(names::ACTIVE);
//! grid.filter(names::UNACKED);
//! assert_eq!(
//!     query.read().as_deref(),
//!     Some("SELECT * FROM Model WHERE ActiveState = 'True' OR AckedState = 'False'")
//! );
//!
//! grid.clear_all();
//! assert_eq!(query.read().as_deref(), Some("SELECT * FROM Model"));
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

/// Predicate catalog and configuration.
pub mod schema {
    pub use alarmgrid_schema::*;
}

/// Output sinks and bound slots.
pub mod sink {
    pub use alarmgrid_query::sink::*;
}

/// Logging bootstrap.
pub mod logging {
    pub use alarmgrid_query::logging::*;
}

pub use alarmgrid_query::{
    AlarmGrid, FilterError, FilterRegistry, FilterResult, GridEvent, Predicate, QueryComposer,
    SharedAlarmGrid, compose,
};
pub use alarmgrid_schema::{Catalog, GridConfig, PredicateDef, SchemaError, names};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::schema::{BASE_QUERY, Catalog, GridConfig, names};
    pub use alarmgrid_query::prelude::*;
}
