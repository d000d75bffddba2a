//! Named dataset store.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use crate::dataset::Dataset;

/// Process-lifetime map of name → dataset.
///
/// A dataset is either absent or present; `save` is the only absent→present
/// transition (and present→present replace, last writer wins). There is no
/// delete and no eviction. The lock serializes writes against reads so a
/// half-written entry is never observable; datasets are handed out as `Arc`
/// snapshots, so a replace never mutates data a reader already holds.
#[derive(Debug, Default)]
pub struct DatasetStore {
    inner: RwLock<HashMap<String, Arc<Dataset>>>,
}

impl DatasetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `dataset` under `name`, replacing any prior entry.
    /// Returns the stored row count.
    pub fn save(&self, name: impl Into<String>, dataset: Dataset) -> usize {
        let name = name.into();
        let rows = dataset.len();
        let mut inner = self
            .inner
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        inner.insert(name, Arc::new(dataset));
        rows
    }

    pub fn get(&self, name: &str) -> Option<Arc<Dataset>> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }

    /// All entries, sorted by name for stable listings.
    pub fn entries(&self) -> Vec<(String, Arc<Dataset>)> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        let mut entries: Vec<_> = inner
            .iter()
            .map(|(name, dataset)| (name.clone(), Arc::clone(dataset)))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries
    }

    pub fn len(&self) -> usize {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Map, Value, json};

    fn rows(values: Value) -> Vec<Map<String, Value>> {
        values
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_object().unwrap().clone())
            .collect()
    }

    #[test]
    fn save_then_get() {
        let store = DatasetStore::new();
        let written = store.save("x", Dataset::from_rows(rows(json!([{"a": 1}, {"a": 2}]))));
        assert_eq!(written, 2);
        assert_eq!(store.get("x").unwrap().len(), 2);
        assert!(store.get("missing").is_none());
    }

    #[test]
    fn later_save_replaces_earlier_entry() {
        let store = DatasetStore::new();
        store.save("x", Dataset::from_rows(rows(json!([{"a": 1}, {"a": 2}, {"a": 3}]))));
        store.save("x", Dataset::from_rows(rows(json!([{"b": 9}]))));

        assert_eq!(store.len(), 1);
        let current = store.get("x").unwrap();
        assert_eq!(current.len(), 1);
        assert_eq!(current.columns(), ["b"]);
    }

    #[test]
    fn replace_does_not_disturb_held_snapshots() {
        let store = DatasetStore::new();
        store.save("x", Dataset::from_rows(rows(json!([{"a": 1}]))));
        let before = store.get("x").unwrap();
        store.save("x", Dataset::from_rows(rows(json!([{"a": 2}, {"a": 3}]))));

        assert_eq!(before.len(), 1);
        assert_eq!(store.get("x").unwrap().len(), 2);
    }

    #[test]
    fn entries_are_sorted() {
        let store = DatasetStore::new();
        store.save("zeta", Dataset::from_rows(vec![]));
        store.save("alpha", Dataset::from_rows(vec![]));
        let names: Vec<_> = store.entries().into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, ["alpha", "zeta"]);
    }
}
