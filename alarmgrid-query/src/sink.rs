//! Output sinks and bound slots.
//!
//! A [`QuerySink`] is the fire-and-forget destination of a composed query:
//! once written, an external rendering pipeline re-evaluates it. A [`Slot`]
//! is a sink whose current value can also be read back, which is what the
//! locale refresh needs to round-trip a binding.
//!
//! ```rust
//! use alarmgrid_query::sink::{QuerySink, SharedSlot, Slot};
//!
//! let slot = SharedSlot::new();
//! let mut writer = slot.clone();
//! writer.write("SELECT * FROM Model");
//!
//! assert_eq!(slot.read().as_deref(), Some("SELECT * FROM Model"));
//! assert_eq!(slot.history().len(), 1);
//! ```

use std::sync::Arc;

use parking_lot::Mutex;
use smol_str::SmolStr;
use tracing::info;

/// Destination for composed queries.
pub trait QuerySink {
    /// Write a value to the sink.
    fn write(&mut self, value: &str);
}

/// A sink whose bound value can be read back.
pub trait Slot: QuerySink {
    /// The currently bound value, or `None` if nothing is bound.
    fn read(&self) -> Option<String>;
}

impl<T: QuerySink + ?Sized> QuerySink for &mut T {
    fn write(&mut self, value: &str) {
        (**self).write(value)
    }
}

impl<T: QuerySink + ?Sized> QuerySink for Box<T> {
    fn write(&mut self, value: &str) {
        (**self).write(value)
    }
}

impl<T: Slot + ?Sized> Slot for &mut T {
    fn read(&self) -> Option<String> {
        (**self).read()
    }
}

impl<T: Slot + ?Sized> Slot for Box<T> {
    fn read(&self) -> Option<String> {
        (**self).read()
    }
}

/// An in-memory slot that remembers every value written to it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemorySlot {
    value: Option<String>,
    history: Vec<String>,
}

impl MemorySlot {
    /// Create an empty, unbound slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a slot already bound to `value`.
    ///
    /// The initial binding is not recorded in the write history.
    pub fn bound(value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
            history: Vec::new(),
        }
    }

    /// The current value.
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Every value written, oldest first.
    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Forget the write history, keeping the current value.
    pub fn clear_history(&mut self) {
        self.history.clear();
    }
}

impl QuerySink for MemorySlot {
    fn write(&mut self, value: &str) {
        self.history.push(value.to_string());
        self.value = Some(value.to_string());
    }
}

impl Slot for MemorySlot {
    fn read(&self) -> Option<String> {
        self.value.clone()
    }
}

/// A [`MemorySlot`] behind a shared lock.
///
/// Clones observe the same slot, so a consumer can keep a handle while the
/// composer owns another.
#[derive(Debug, Clone, Default)]
pub struct SharedSlot {
    inner: Arc<Mutex<MemorySlot>>,
}

impl SharedSlot {
    /// Create an empty, unbound shared slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a shared slot already bound to `value`.
    pub fn bound(value: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(MemorySlot::bound(value))),
        }
    }

    /// Every value written, oldest first.
    pub fn history(&self) -> Vec<String> {
        self.inner.lock().history().to_vec()
    }

    /// Copy of the underlying slot.
    pub fn snapshot(&self) -> MemorySlot {
        self.inner.lock().clone()
    }

    /// Forget the write history, keeping the current value.
    pub fn clear_history(&self) {
        self.inner.lock().clear_history();
    }
}

impl QuerySink for SharedSlot {
    fn write(&mut self, value: &str) {
        self.inner.lock().write(value);
    }
}

impl Slot for SharedSlot {
    fn read(&self) -> Option<String> {
        self.inner.lock().read()
    }
}

/// A slot that logs every write at `info`.
#[derive(Debug, Clone)]
pub struct TracingSink {
    label: SmolStr,
    last: Option<String>,
}

impl TracingSink {
    /// Create a sink that tags its log lines with `label`.
    pub fn new(label: impl Into<SmolStr>) -> Self {
        Self {
            label: label.into(),
            last: None,
        }
    }

    /// The label used in log lines.
    pub fn label(&self) -> &str {
        &self.label
    }
}

impl Default for TracingSink {
    fn default() -> Self {
        Self::new("query")
    }
}

impl QuerySink for TracingSink {
    fn write(&mut self, value: &str) {
        info!(slot = %self.label, value, "Slot written");
        self.last = Some(value.to_string());
    }
}

impl Slot for TracingSink {
    fn read(&self) -> Option<String> {
        self.last.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_slot_records_history() {
        let mut slot = MemorySlot::new();
        assert_eq!(slot.read(), None);

        slot.write("a");
        slot.write("b");
        assert_eq!(slot.value(), Some("b"));
        assert_eq!(slot.history(), ["a", "b"]);

        slot.clear_history();
        assert!(slot.history().is_empty());
        assert_eq!(slot.value(), Some("b"));
    }

    #[test]
    fn test_bound_slot_has_no_history() {
        let slot = MemorySlot::bound("link");
        assert_eq!(slot.read().as_deref(), Some("link"));
        assert!(slot.history().is_empty());
    }

    #[test]
    fn test_shared_slot_clones_observe_writes() {
        let observer = SharedSlot::new();
        let mut writer = observer.clone();
        writer.write("SELECT 1");
        assert_eq!(observer.read().as_deref(), Some("SELECT 1"));
        assert_eq!(observer.snapshot().history(), ["SELECT 1"]);
    }

    #[test]
    fn test_mut_ref_forwards() {
        let mut slot = MemorySlot::new();
        {
            let mut by_ref = &mut slot;
            QuerySink::write(&mut by_ref, "x");
            assert_eq!(Slot::read(&by_ref).as_deref(), Some("x"));
        }
        assert_eq!(slot.history(), ["x"]);
    }

    #[test]
    fn test_boxed_dyn_sink() {
        let mut sink: Box<dyn Slot> = Box::new(TracingSink::new("grid"));
        sink.write("SELECT * FROM Model");
        assert_eq!(sink.read().as_deref(), Some("SELECT * FROM Model"));
    }
}
