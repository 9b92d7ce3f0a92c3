//! Query composition from the active filter set.
//!
//! The composer owns a [`FilterRegistry`] for the lifetime of one filter
//! session and the sink that session renders into. After every mutation the
//! caller runs `rebuild` then `publish`; the two are independent, so a
//! publish without a rebuild re-sends the previous query.
//!
//! ```rust
//! use alarmgrid_query::{QueryComposer, sink::MemorySlot};
//! use alarmgrid_schema::names;
//!
//! let mut composer = QueryComposer::alarms(MemorySlot::new());
//! composer.toggle(names::INACTIVE);
//! composer.toggle(names::ACTIVE);
//! composer.rebuild();
//! composer.publish();
//!
//! assert_eq!(
//!     composer.sink().value(),
//!     Some("SELECT * FROM Model WHERE ActiveState = 'True' OR ActiveState = 'False'")
//! );
//! ```

use alarmgrid_schema::{BASE_QUERY, Catalog, GridConfig};
use tracing::{debug, info, trace};

use crate::error::FilterResult;
use crate::filter::FilterRegistry;
use crate::sink::QuerySink;

const WHERE: &str = " WHERE ";
const OR: &str = " OR ";

/// Compose the query for the registry's current active set.
///
/// With nothing active this is exactly `base_query`. Otherwise the active
/// conditions, in catalog order, are joined with `OR` after a single
/// `WHERE`.
pub fn compose(base_query: &str, registry: &FilterRegistry) -> String {
    if !registry.has_active() {
        return base_query.to_string();
    }

    let conditions: Vec<&str> = registry
        .active()
        .inspect(|p| trace!(predicate = p.name(), "Adding filter condition"))
        .map(|p| p.condition())
        .collect();
    debug_assert_eq!(conditions.len(), registry.active_count());

    let capacity = base_query.len()
        + WHERE.len()
        + conditions.iter().map(|c| c.len()).sum::<usize>()
        + OR.len() * (conditions.len() - 1);
    let mut query = String::with_capacity(capacity);
    query.push_str(base_query);
    query.push_str(WHERE);
    query.push_str(&conditions.join(OR));
    query
}

/// Owns the filter state of one session and publishes its composed query.
#[derive(Debug)]
pub struct QueryComposer<S> {
    base_query: String,
    registry: FilterRegistry,
    query: String,
    stale: bool,
    log_queries: bool,
    sink: S,
}

impl<S: QuerySink> QueryComposer<S> {
    /// Create a composer over `registry`, publishing into `sink`.
    pub fn new(base_query: impl Into<String>, registry: FilterRegistry, sink: S) -> Self {
        let base_query = base_query.into();
        let stale = registry.has_active();
        Self {
            query: base_query.clone(),
            base_query,
            registry,
            stale,
            log_queries: false,
            sink,
        }
    }

    /// A composer over the built-in alarm catalog.
    pub fn alarms(sink: S) -> Self {
        Self::new(BASE_QUERY, FilterRegistry::alarms(), sink)
    }

    /// A composer over a validated catalog.
    pub fn from_catalog(catalog: &Catalog, sink: S) -> FilterResult<Self> {
        let registry = FilterRegistry::from_catalog(catalog)?;
        Ok(Self::new(catalog.base_query.clone(), registry, sink))
    }

    /// A composer configured from `alarmgrid.toml` settings.
    pub fn from_config(config: &GridConfig, sink: S) -> FilterResult<Self> {
        let catalog = config.catalog()?;
        Ok(Self::from_catalog(&catalog, sink)?.log_queries(config.debug.log_queries))
    }

    /// Log published queries at `info` rather than `debug`.
    pub fn log_queries(mut self, enabled: bool) -> Self {
        self.log_queries = enabled;
        self
    }

    /// Toggle a predicate by name. Unknown names are ignored.
    pub fn toggle(&mut self, name: &str) {
        if self.registry.toggle(name) {
            self.stale = true;
        }
    }

    /// Deactivate every predicate.
    pub fn clear_all(&mut self) {
        self.registry.clear_all();
        self.stale = true;
    }

    /// Recompute the composed query from scratch.
    pub fn rebuild(&mut self) {
        self.query = compose(&self.base_query, &self.registry);
        self.stale = false;
        debug!(
            active_count = self.registry.active_count(),
            query = %self.query,
            "Rebuilt filter query"
        );
    }

    /// Write the current composed query to the sink.
    pub fn publish(&mut self) {
        if self.log_queries {
            info!(query = %self.query, stale = self.stale, "Publishing filter query");
        } else {
            debug!(query = %self.query, stale = self.stale, "Publishing filter query");
        }
        self.sink.write(&self.query);
    }

    /// Rebuild then publish.
    pub fn refresh(&mut self) {
        self.rebuild();
        self.publish();
    }

    /// The last composed query.
    pub fn current_query(&self) -> &str {
        &self.query
    }

    /// Whether the filter state changed since the last rebuild.
    pub fn is_stale(&self) -> bool {
        self.stale
    }

    /// The unfiltered query.
    pub fn base_query(&self) -> &str {
        &self.base_query
    }

    /// Read access to the filter state.
    pub fn registry(&self) -> &FilterRegistry {
        &self.registry
    }

    /// The output sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Mutable access to the output sink.
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Consume the composer, returning its sink.
    pub fn into_sink(self) -> S {
        self.sink
    }
}
