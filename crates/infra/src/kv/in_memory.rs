use std::collections::HashMap;
use std::sync::RwLock;

use super::{KvError, KvStore};

/// In-memory key-value store.
///
/// Intended for tests/dev. Not optimized for performance.
#[derive(Debug, Default)]
pub struct InMemoryKvStore {
    entries: RwLock<HashMap<String, String>>,
}

impl InMemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for InMemoryKvStore {
    fn get(&self, key: &str) -> Result<Option<String>, KvError> {
        let entries = self
            .entries
            .read()
            .map_err(|_| KvError::Backend("lock poisoned".to_string()))?;

        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), KvError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| KvError::Backend("lock poisoned".to_string()))?;

        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), KvError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| KvError::Backend("lock poisoned".to_string()))?;

        entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_get_remove() {
        let kv = InMemoryKvStore::new();
        assert_eq!(kv.get("auth_token").unwrap(), None);

        kv.set("auth_token", "123|abcdefghij").unwrap();
        assert_eq!(
            kv.get("auth_token").unwrap(),
            Some("123|abcdefghij".to_string())
        );

        kv.remove("auth_token").unwrap();
        assert_eq!(kv.get("auth_token").unwrap(), None);
    }

    #[test]
    fn remove_of_absent_key_is_ok() {
        let kv = InMemoryKvStore::new();
        assert!(kv.remove("never_set").is_ok());
    }

    #[test]
    fn set_overwrites() {
        let kv = InMemoryKvStore::new();
        kv.set("k", "first").unwrap();
        kv.set("k", "second").unwrap();
        assert_eq!(kv.get("k").unwrap(), Some("second".to_string()));
    }
}
