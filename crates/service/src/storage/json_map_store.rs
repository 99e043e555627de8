use std::{collections::HashMap, hash::Hash, io, path::PathBuf, sync::Arc};
use tokio::{fs, sync::RwLock};
use tracing::debug;

use crate::errors::ServiceError;

/// Generic key-value map store, optionally persisted to a JSON file.
///
/// Without a file the map lives in memory only. With a file, every mutation
/// rewrites the whole map, so it suits small data sets where a database is overkill.
pub struct JsonMapStore<K, V> {
    inner: RwLock<HashMap<K, V>>,
    file_path: Option<PathBuf>,
}

impl<K, V> JsonMapStore<K, V>
where
    K: Eq + Hash + serde::Serialize + serde::de::DeserializeOwned + Clone,
    V: serde::Serialize + serde::de::DeserializeOwned + Clone,
{
    /// Memory-only store.
    pub fn in_memory() -> Arc<Self> {
        Arc::new(Self { inner: RwLock::new(HashMap::new()), file_path: None })
    }

    /// Initialize the store from a path. Creates the file with an empty map if missing.
    pub async fn new<P: Into<PathBuf>>(path: P) -> Result<Arc<Self>, ServiceError> {
        let file_path = path.into();
        if let Some(parent) = file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| ServiceError::Db(format!("cannot create {}: {e}", parent.display())))?;
        }

        let map: HashMap<K, V> = match fs::read(&file_path).await {
            Ok(bytes) if bytes.is_empty() => HashMap::new(),
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|e| {
                ServiceError::Db(format!("corrupt store file {}: {e}", file_path.display()))
            })?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                let empty: HashMap<K, V> = HashMap::new();
                fs::write(&file_path, serde_json::to_vec(&empty).map_err(|e| ServiceError::Db(e.to_string()))?)
                    .await
                    .map_err(|e| ServiceError::Db(e.to_string()))?;
                empty
            }
            Err(e) => {
                return Err(ServiceError::Db(format!("cannot read store file {}: {e}", file_path.display())));
            }
        };
        debug!(path = %file_path.display(), entries = map.len(), "json map store loaded");

        Ok(Arc::new(Self { inner: RwLock::new(map), file_path: Some(file_path) }))
    }

    async fn save(&self, map: &HashMap<K, V>) -> Result<(), ServiceError> {
        let Some(path) = &self.file_path else { return Ok(()) };
        let data = serde_json::to_vec(map).map_err(|e| ServiceError::Db(e.to_string()))?;
        fs::write(path, data).await.map_err(|e| ServiceError::Db(e.to_string()))?;
        Ok(())
    }

    /// List all entries as `(key, value)` pairs, in no particular order.
    pub async fn list(&self) -> Vec<(K, V)> {
        let map = self.inner.read().await;
        map.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
    }

    /// Get value by key.
    pub async fn get(&self, key: &K) -> Option<V> {
        let map = self.inner.read().await;
        map.get(key).cloned()
    }

    /// Snapshot of the keys.
    pub async fn keys(&self) -> Vec<K> {
        let map = self.inner.read().await;
        map.keys().cloned().collect()
    }

    /// Remove a key and persist; returns whether it existed.
    pub async fn remove(&self, key: &K) -> Result<bool, ServiceError> {
        let mut map = self.inner.write().await;
        if !map.contains_key(key) {
            return Ok(false);
        }
        let mut next = map.clone();
        next.remove(key);
        self.save(&next).await?;
        *map = next;
        Ok(true)
    }

    /// Apply a mutation under the write lock. `f` works on a copy that replaces the live map
    /// only after it has been saved, so a failing `f` or a failed write leaves the store unchanged.
    pub async fn update_map<F, R>(&self, f: F) -> Result<R, ServiceError>
    where
        F: FnOnce(&mut HashMap<K, V>) -> Result<R, ServiceError>,
    {
        let mut map = self.inner.write().await;
        let mut next = map.clone();
        let out = f(&mut next)?;
        self.save(&next).await?;
        *map = next;
        Ok(out)
    }
}
