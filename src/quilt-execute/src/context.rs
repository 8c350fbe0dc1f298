//! Explicit cross-thread execution context.

use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::sync::{Arc, RwLock};

/// A context value: arbitrary, shared, thread-safe.
pub type ContextValue = Arc<dyn Any + Send + Sync>;

thread_local! {
    static CURRENT: RefCell<Option<ExecutorDataMap>> = const { RefCell::new(None) };
}

/// Per-thread key/value side channel for execution context (trace
/// identifiers, session hints).
///
/// Each thread's map is lazily initialized on first access. The kernel's
/// only obligation is to snapshot the calling thread's map handle once per
/// statement and hand that same handle into every spawned closure — worker
/// threads are pooled and reused, so nothing may rely on ambient
/// thread-local inheritance. Beyond that hand-off there is no merging,
/// filtering, or isolation between threads.
///
/// Iteration follows insertion order.
#[derive(Clone, Default)]
pub struct ExecutorDataMap {
    inner: Arc<RwLock<Vec<(String, ContextValue)>>>,
}

impl ExecutorDataMap {
    /// Create a fresh, empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// The calling thread's map, lazily initialized.
    ///
    /// Returns a handle to the same underlying map on every call from the
    /// same thread.
    pub fn current() -> Self {
        CURRENT.with(|cell| {
            cell.borrow_mut()
                .get_or_insert_with(Self::default)
                .clone()
        })
    }

    /// Insert or replace a value, preserving the key's insertion position.
    pub fn insert(&self, key: impl Into<String>, value: ContextValue) {
        let key = key.into();
        let mut entries = self.inner.write().unwrap_or_else(std::sync::PoisonError::into_inner);
        match entries.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, existing_value)) => *existing_value = value,
            None => entries.push((key, value)),
        }
    }

    /// Insert a typed value.
    pub fn insert_value<T: Send + Sync + 'static>(&self, key: impl Into<String>, value: T) {
        self.insert(key, Arc::new(value));
    }

    /// Get a value by key.
    pub fn get(&self, key: &str) -> Option<ContextValue> {
        self.inner
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| Arc::clone(value))
    }

    /// Get a value by key, downcast to its concrete type.
    pub fn get_as<T: Send + Sync + 'static>(&self, key: &str) -> Option<Arc<T>> {
        self.get(key).and_then(|value| value.downcast::<T>().ok())
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> Vec<String> {
        self.inner
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .iter()
            .map(|(key, _)| key.clone())
            .collect()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.inner.read().unwrap_or_else(std::sync::PoisonError::into_inner).len()
    }

    /// Check if the map is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether two handles refer to the same underlying map.
    pub fn same_map(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for ExecutorDataMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExecutorDataMap")
            .field("keys", &self.keys())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typed_roundtrip() {
        let map = ExecutorDataMap::new();
        map.insert_value("trace_id", 42usize);
        assert_eq!(map.get_as::<usize>("trace_id").as_deref(), Some(&42));
        assert!(map.get_as::<String>("trace_id").is_none());
        assert!(map.get("missing").is_none());
    }

    #[test]
    fn test_insertion_order_preserved_on_replace() {
        let map = ExecutorDataMap::new();
        map.insert_value("a", 1i64);
        map.insert_value("b", 2i64);
        map.insert_value("a", 3i64);

        assert_eq!(map.keys(), vec!["a", "b"]);
        assert_eq!(map.get_as::<i64>("a").as_deref(), Some(&3));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_current_returns_same_map_per_thread() {
        let first = ExecutorDataMap::current();
        first.insert_value("key", 1i64);
        let second = ExecutorDataMap::current();

        assert!(first.same_map(&second));
        assert_eq!(second.get_as::<i64>("key").as_deref(), Some(&1));
    }

    #[test]
    fn test_threads_get_distinct_maps() {
        let here = ExecutorDataMap::current();
        here.insert_value("key", 1i64);

        let there = std::thread::spawn(ExecutorDataMap::current).join().unwrap();
        assert!(!here.same_map(&there));
        assert!(there.get("key").is_none());
    }

    #[test]
    fn test_explicit_handoff_shares_entries() {
        let map = ExecutorDataMap::current();
        map.insert_value("session", "ds_hint".to_string());

        let handle = map.clone();
        let seen = std::thread::spawn(move || handle.get_as::<String>("session").map(|s| (*s).clone()))
            .join()
            .unwrap();
        assert_eq!(seen.as_deref(), Some("ds_hint"));
    }
}
