use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::error::Result;

/// Write-once map of decoded tables, owned by one `XrayDb`.
///
/// Misses decode outside the lock. When two threads race on the same key,
/// the first insert wins and the loser's copy is dropped.
pub(crate) struct KeyedCache<K, V> {
    entries: RwLock<HashMap<K, Arc<V>>>,
}

impl<K: Eq + Hash + Clone, V> KeyedCache<K, V> {
    pub(crate) fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub(crate) fn get_or_try_insert_with<F>(&self, key: &K, decode: F) -> Result<Arc<V>>
    where
        F: FnOnce() -> Result<V>,
    {
        if let Some(hit) = self.entries.read().get(key) {
            return Ok(Arc::clone(hit));
        }

        let fresh = Arc::new(decode()?);
        let mut entries = self.entries.write();
        let stored = entries.entry(key.clone()).or_insert_with(|| Arc::clone(&fresh));
        if !Arc::ptr_eq(stored, &fresh) {
            log::debug!("discarding duplicate decode after a concurrent insert");
        }
        Ok(Arc::clone(stored))
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.read().len()
    }
}
