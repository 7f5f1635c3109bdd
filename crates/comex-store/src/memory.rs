//! In-memory backend.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::backend::{Backend, StoreError, StoreResult};

/// Process-local backend. Used by tests and by throwaway sessions.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate a key with a raw document.
    pub fn insert(&self, key: &str, data: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.to_string(), data.to_string());
        }
    }

    /// Raw document currently stored under `key`.
    pub fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().ok()?.get(key).cloned()
    }
}

#[async_trait]
impl Backend for MemoryBackend {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn read(&self, key: &str) -> StoreResult<Option<String>> {
        let entries = self
            .entries
            .lock()
            .map_err(|e| StoreError::OperationFailed(e.to_string()))?;
        Ok(entries.get(key).cloned())
    }

    async fn write(&self, key: &str, data: &str) -> StoreResult<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| StoreError::OperationFailed(e.to_string()))?;
        entries.insert(key.to_string(), data.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_write_overwrites() {
        let backend = MemoryBackend::new();
        backend.write("processes", "[1]").await.unwrap();
        backend.write("processes", "[2]").await.unwrap();
        assert_eq!(backend.get("processes").as_deref(), Some("[2]"));
    }

    #[tokio::test]
    async fn test_keys_are_independent() {
        let backend = MemoryBackend::new();
        backend.insert("clients", "[]");
        assert!(backend.read("processes").await.unwrap().is_none());
        assert_eq!(backend.read("clients").await.unwrap().as_deref(), Some("[]"));
    }
}
