//! Durable per-table cart storage.
//!
//! A [`CartCache`] is a plain string key-value store. The cart layer owns the key scheme
//! (`pos_cart_<table>`) and the JSON encoding; see [`read_cart`] and [`write_cart`].

use super::LineItem;
use crate::model::TableId;
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("cache entry {key} is not a cart: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("cache lock poisoned")]
    Poisoned,
}

/// Key of a table's cached cart.
pub fn cache_key(table_id: TableId) -> String {
    format!("pos_cart_{}", table_id.0)
}

/// String key-value storage that outlives the process (or at least the table view).
pub trait CartCache: Send + Sync {
    fn load(&self, key: &str) -> Result<Option<String>, CacheError>;
    fn store(&self, key: &str, value: &str) -> Result<(), CacheError>;
    /// Removing an absent key is not an error.
    fn evict(&self, key: &str) -> Result<(), CacheError>;
}

/// Reads the cached cart of a table. An empty list counts as no cache.
pub fn read_cart(cache: &dyn CartCache, table_id: TableId) -> Result<Option<Vec<LineItem>>, CacheError> {
    let key = cache_key(table_id);
    let Some(raw) = cache.load(&key)? else {
        return Ok(None);
    };
    let items: Vec<LineItem> =
        serde_json::from_str(&raw).map_err(|source| CacheError::Corrupt { key, source })?;
    Ok((!items.is_empty()).then_some(items))
}

/// Mirrors a cart to the cache. An empty cart removes the entry.
pub fn write_cart(cache: &dyn CartCache, table_id: TableId, items: &[LineItem]) -> Result<(), CacheError> {
    let key = cache_key(table_id);
    if items.is_empty() {
        return cache.evict(&key);
    }
    let raw = serde_json::to_string(items).map_err(|source| CacheError::Corrupt {
        key: key.clone(),
        source,
    })?;
    cache.store(&key, &raw)
}

/// Process-local cache. Clones share the same entries.
#[derive(Debug, Clone, Default)]
pub struct MemoryCartCache {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryCartCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CartCache for MemoryCartCache {
    fn load(&self, key: &str) -> Result<Option<String>, CacheError> {
        let entries = self.entries.lock().map_err(|_| CacheError::Poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn store(&self, key: &str, value: &str) -> Result<(), CacheError> {
        let mut entries = self.entries.lock().map_err(|_| CacheError::Poisoned)?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn evict(&self, key: &str) -> Result<(), CacheError> {
        let mut entries = self.entries.lock().map_err(|_| CacheError::Poisoned)?;
        entries.remove(key);
        Ok(())
    }
}

/// One JSON file per key under a directory.
#[derive(Debug, Clone)]
pub struct FileCartCache {
    dir: PathBuf,
}

impl FileCartCache {
    /// Opens the cache, creating `dir` if needed.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, CacheError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl CartCache for FileCartCache {
    fn load(&self, key: &str) -> Result<Option<String>, CacheError> {
        match std::fs::read_to_string(self.path(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn store(&self, key: &str, value: &str) -> Result<(), CacheError> {
        // Readers only ever see a complete file.
        let tmp = self.dir.join(format!("{key}.json.tmp"));
        std::fs::write(&tmp, value)?;
        std::fs::rename(&tmp, self.path(key))?;
        Ok(())
    }

    fn evict(&self, key: &str) -> Result<(), CacheError> {
        match std::fs::remove_file(self.path(key)) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ProductId;
    use rust_decimal::Decimal;

    fn line(product: u32, quantity: u32) -> LineItem {
        LineItem {
            product_id: ProductId(product),
            sale_item_id: None,
            name: format!("Dish {product}"),
            unit_price: Decimal::new(1000, 0),
            quantity,
        }
    }

    #[test]
    fn test_key_is_table_scoped() {
        assert_eq!(cache_key(TableId(3)), "pos_cart_3");
    }

    #[test]
    fn test_empty_cart_evicts_entry() {
        let cache = MemoryCartCache::new();
        write_cart(&cache, TableId(1), &[line(1, 2)]).unwrap();
        assert!(cache.load("pos_cart_1").unwrap().is_some());

        write_cart(&cache, TableId(1), &[]).unwrap();
        assert_eq!(cache.load("pos_cart_1").unwrap(), None);
        assert_eq!(read_cart(&cache, TableId(1)).unwrap(), None);
    }

    #[test]
    fn test_foreign_empty_array_reads_as_no_cache() {
        let cache = MemoryCartCache::new();
        cache.store("pos_cart_2", "[]").unwrap();
        assert_eq!(read_cart(&cache, TableId(2)).unwrap(), None);
    }

    #[test]
    fn test_garbage_entry_is_reported() {
        let cache = MemoryCartCache::new();
        cache.store("pos_cart_2", "{not json").unwrap();
        assert!(matches!(
            read_cart(&cache, TableId(2)),
            Err(CacheError::Corrupt { .. })
        ));
    }

    #[test]
    fn test_file_cache_round_trip_and_evict() {
        let dir = tempfile::tempdir().unwrap();
        let cache = FileCartCache::open(dir.path().join("carts")).unwrap();
        let items = vec![line(1, 2), line(4, 1)];

        write_cart(&cache, TableId(5), &items).unwrap();
        assert!(cache.dir().join("pos_cart_5.json").exists());
        assert_eq!(read_cart(&cache, TableId(5)).unwrap(), Some(items));

        // A second handle on the same directory sees the entry
        let reopened = FileCartCache::open(cache.dir()).unwrap();
        assert!(read_cart(&reopened, TableId(5)).unwrap().is_some());

        cache.evict(&cache_key(TableId(5))).unwrap();
        cache.evict(&cache_key(TableId(5))).unwrap();
        assert_eq!(read_cart(&reopened, TableId(5)).unwrap(), None);
    }
}
