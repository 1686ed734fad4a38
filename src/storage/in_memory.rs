use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use anyhow::Result;

use super::area::{SessionStorageHandle, StorageArea};

/// Ephemeral [`StorageArea`] backed by a `HashMap`.
///
/// This is the backend used when no real `sessionStorage` bridge is
/// supplied: values live for the lifetime of the process and vanish with it.
#[derive(Debug, Default)]
pub struct InMemorySessionStorage {
    items: RwLock<HashMap<String, String>>,
}

impl InMemorySessionStorage {
    /// Creates an empty storage area.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps the area in the shared handle the rest of the crate works with.
    pub fn into_handle(self) -> SessionStorageHandle {
        Arc::new(self)
    }
}

impl StorageArea for InMemorySessionStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.read().unwrap().get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.items
            .write()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.items.write().unwrap().remove(key);
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        self.items.write().unwrap().clear();
        Ok(())
    }

    fn len(&self) -> usize {
        self.items.read().unwrap().len()
    }

    fn keys(&self) -> Vec<String> {
        self.items.read().unwrap().keys().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removing_a_missing_key_is_a_no_op() {
        let area = InMemorySessionStorage::new();
        area.remove_item("nothing").unwrap();
        assert_eq!(area.len(), 0);
    }

    #[test]
    fn keys_lists_every_stored_key() {
        let area = InMemorySessionStorage::new();
        area.set_item("a", "1").unwrap();
        area.set_item("b", "2").unwrap();
        let mut keys = area.keys();
        keys.sort();
        assert_eq!(keys, vec!["a".to_string(), "b".to_string()]);
    }
}
