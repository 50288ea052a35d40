//! Key-value store wrapper with automatic serialization.

use std::sync::Arc;

use crate::{CacheError, Storage};
use serde::{de::DeserializeOwned, Serialize};

/// Type-safe view over a [`Storage`].
///
/// Values are stored as JSON strings, so anything written through a `Cache`
/// can be read back by any other consumer of the same store.
#[derive(Clone)]
pub struct Cache {
    store: Arc<dyn Storage>,
}

impl Cache {
    /// Wrap a store.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::sync::Arc;
    /// use stride_cache::{Cache, MemoryStore};
    ///
    /// let cache = Cache::new(Arc::new(MemoryStore::new()));
    /// cache.set("greeting", &"hello").unwrap();
    /// assert_eq!(cache.get::<String>("greeting").unwrap().as_deref(), Some("hello"));
    /// ```
    pub fn new(store: Arc<dyn Storage>) -> Self {
        Self { store }
    }

    /// Get a value from the store.
    ///
    /// Returns `None` if the key doesn't exist, and
    /// [`CacheError::SerializeError`] if the stored text isn't a valid `T`.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        match self.store.get(key)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Serialize `value` and store it under `key`.
    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), CacheError> {
        let raw = serde_json::to_string(value)?;
        self.store.set(key, &raw)
    }
}

/// Helper to build store keys with namespacing.
///
/// # Example
///
/// ```rust
/// let key = stride_cache::cache_key!("stride", "cart");
/// assert_eq!(key, "stride:cart");
/// ```
#[macro_export]
macro_rules! cache_key {
    ($prefix:expr, $($part:expr),+) => {{
        let mut key = String::from($prefix);
        $(
            key.push(':');
            key.push_str(&$part.to_string());
        )+
        key
    }};
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Line {
        id: u64,
        amount: i64,
    }

    #[test]
    fn test_typed_set_writes_json_text() {
        let store = Arc::new(MemoryStore::new());
        let cache = Cache::new(store.clone());

        cache.set("lines", &vec![Line { id: 1, amount: 2 }]).unwrap();

        assert_eq!(
            store.get("lines").unwrap().as_deref(),
            Some(r#"[{"id":1,"amount":2}]"#)
        );
        let lines: Vec<Line> = cache.get("lines").unwrap().unwrap();
        assert_eq!(lines, vec![Line { id: 1, amount: 2 }]);
    }

    #[test]
    fn test_get_missing_key() {
        let cache = Cache::new(Arc::new(MemoryStore::new()));
        assert_eq!(cache.get::<Vec<Line>>("nope").unwrap(), None);
    }

    #[test]
    fn test_get_corrupt_value() {
        let store = Arc::new(MemoryStore::with_entry("lines", "[{oops"));
        let cache = Cache::new(store.clone());

        assert!(matches!(
            cache.get::<Vec<Line>>("lines"),
            Err(CacheError::SerializeError(_))
        ));
        assert_eq!(store.get("lines").unwrap().as_deref(), Some("[{oops"));
    }

    #[test]
    fn test_cache_key_macro() {
        assert_eq!(cache_key!("stride", "cart"), "stride:cart");
        assert_eq!(cache_key!("stride", "cart", 7), "stride:cart:7");
    }
}
