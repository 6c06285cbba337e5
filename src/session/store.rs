use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::sync::Mutex;

use tracing::warn;

/// Storage key for the seen set, matching the original local-storage key.
const SEEN_KEY: &str = "seen";

/// Minimal key-value persistence. Stands in for browser local storage so
/// the seen-set logic is testable without a real browser environment.
pub trait KvStore {
    fn get(&self, key: &str) -> Option<String>;
    fn put(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Failed to write key {0}: {1}")]
    WriteError(String, std::io::Error),
}

/// One file per key under a directory.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KvStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        std::fs::read_to_string(self.path_for(key)).ok()
    }

    fn put(&self, key: &str, value: &str) -> Result<(), StoreError> {
        if let Err(e) = std::fs::create_dir_all(&self.dir) {
            return Err(StoreError::WriteError(key.to_string(), e));
        }
        std::fs::write(self.path_for(key), value)
            .map_err(|e| StoreError::WriteError(key.to_string(), e))
    }
}

/// In-memory store for tests and throwaway sessions.
#[derive(Default)]
pub struct MemStore {
    map: Mutex<HashMap<String, String>>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemStore {
    fn get(&self, key: &str) -> Option<String> {
        self.map.lock().unwrap().get(key).cloned()
    }

    fn put(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.map
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Set of movie ids the user has marked as seen. Persisted as a JSON array
/// under the `seen` key after every mutation.
#[derive(Debug, Default)]
pub struct SeenSet {
    ids: HashSet<u64>,
}

impl SeenSet {
    /// Load from the store. Missing or corrupt data recovers silently to
    /// an empty set.
    pub fn load(store: &dyn KvStore) -> Self {
        let ids = store
            .get(SEEN_KEY)
            .and_then(|raw| serde_json::from_str::<Vec<u64>>(&raw).ok())
            .unwrap_or_default();
        Self {
            ids: ids.into_iter().collect(),
        }
    }

    pub fn contains(&self, id: u64) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Insert and persist. Re-adding an already-seen id is a no-op on the
    /// set but still rewrites the store.
    pub fn insert(&mut self, id: u64, store: &dyn KvStore) {
        self.ids.insert(id);
        self.save(store);
    }

    pub fn clear(&mut self, store: &dyn KvStore) {
        self.ids.clear();
        self.save(store);
    }

    fn save(&self, store: &dyn KvStore) {
        let mut ids: Vec<u64> = self.ids.iter().copied().collect();
        ids.sort_unstable();
        let raw = serde_json::to_string(&ids).unwrap_or_else(|_| "[]".to_string());
        if let Err(e) = store.put(SEEN_KEY, &raw) {
            warn!(error = %e, "failed to persist seen set");
        }
    }
}
