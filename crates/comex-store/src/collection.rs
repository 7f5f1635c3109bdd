//! Whole-collection load and save.
//!
//! Both directions fail softly: a collection that cannot be read is reported
//! as absent, and a collection that cannot be written is logged and dropped.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, error, warn};

use crate::backend::Backend;

/// Load the collection stored under `key`.
///
/// Returns `None` when nothing usable is stored: the key is missing, the
/// backend read failed, or the document is not a JSON array. Elements that
/// do not deserialize as `T` are skipped with a warning; the rest load.
pub async fn load<T: DeserializeOwned>(backend: &dyn Backend, key: &str) -> Option<Vec<T>> {
    let data = match backend.read(key).await {
        Ok(Some(data)) => data,
        Ok(None) => {
            debug!(key, backend = backend.name(), "No stored collection");
            return None;
        }
        Err(e) => {
            warn!(key, backend = backend.name(), error = %e, "Failed to read collection");
            return None;
        }
    };

    let elements = match serde_json::from_str::<Vec<serde_json::Value>>(&data) {
        Ok(elements) => elements,
        Err(e) => {
            warn!(key, error = %e, "Discarding unreadable collection");
            return None;
        }
    };

    let total = elements.len();
    let records: Vec<T> = elements
        .into_iter()
        .enumerate()
        .filter_map(|(index, element)| match serde_json::from_value(element) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!(key, index, error = %e, "Skipping unreadable record");
                None
            }
        })
        .collect();

    debug!(key, count = records.len(), skipped = total - records.len(), "Collection loaded");
    Some(records)
}

/// Overwrite the collection stored under `key` with `records`.
///
/// Errors are logged and swallowed; the in-memory copy stays authoritative
/// until the next successful save.
pub async fn save<T: Serialize>(backend: &dyn Backend, key: &str, records: &[T]) {
    let data = match serde_json::to_string(records) {
        Ok(data) => data,
        Err(e) => {
            error!(key, error = %e, "Failed to serialize collection");
            return;
        }
    };

    match backend.write(key, &data).await {
        Ok(()) => debug!(key, count = records.len(), "Collection saved"),
        Err(e) => error!(key, backend = backend.name(), error = %e, "Failed to save collection"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryBackend;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Item {
        id: String,
    }

    #[tokio::test]
    async fn test_load_missing_is_none() {
        let backend = MemoryBackend::new();
        assert!(load::<Item>(&backend, "items").await.is_none());
    }

    #[tokio::test]
    async fn test_load_corrupt_is_none() {
        let backend = MemoryBackend::new();
        backend.insert("items", "{not json");
        assert!(load::<Item>(&backend, "items").await.is_none());
    }

    #[tokio::test]
    async fn test_load_wrong_shape_is_none() {
        let backend = MemoryBackend::new();
        backend.insert("items", r#"{"id":"a"}"#);
        assert!(load::<Item>(&backend, "items").await.is_none());
    }

    #[tokio::test]
    async fn test_load_skips_bad_records() {
        let backend = MemoryBackend::new();
        backend.insert("items", r#"[{"id":"a"},{"id":7},{"id":"c"}]"#);

        let loaded = load::<Item>(&backend, "items").await.unwrap();

        assert_eq!(loaded, vec![Item { id: "a".into() }, Item { id: "c".into() }]);
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let backend = MemoryBackend::new();
        let items = vec![Item { id: "a".into() }, Item { id: "b".into() }];

        save(&backend, "items", &items).await;

        let loaded = load::<Item>(&backend, "items").await.unwrap();
        assert_eq!(loaded, items);
    }
}
