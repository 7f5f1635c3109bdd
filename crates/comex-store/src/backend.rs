//! Backend trait and construction.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::file::FileBackend;
use crate::memory::MemoryBackend;
use crate::redis_backend::RedisBackend;

/// Storage error types.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Operation failed: {0}")]
    OperationFailed(String),
}

/// Result type for storage operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// A blob store holding one serialized document per key.
///
/// Implementations overwrite the whole value on `write`; there are no
/// partial updates and no locking.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Short name used in log fields.
    fn name(&self) -> &'static str;

    /// Read the raw document stored under `key`, if any.
    async fn read(&self, key: &str) -> StoreResult<Option<String>>;

    /// Replace the document stored under `key`.
    async fn write(&self, key: &str, data: &str) -> StoreResult<()>;
}

/// Backend handle shared by the stores of one session.
pub type SharedBackend = Arc<dyn Backend>;

/// Which backend to build and where it lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendSpec {
    /// Ephemeral, process-local storage.
    Memory,
    /// One `<key>.json` file per collection under `dir`.
    File { dir: PathBuf },
    /// Plain string values under `<prefix>:<key>`.
    Redis { url: String, prefix: String },
}

/// Build a backend from its spec.
///
/// Example Redis URL: `redis://127.0.0.1:6379`
pub async fn connect(spec: &BackendSpec) -> StoreResult<SharedBackend> {
    let backend: SharedBackend = match spec {
        BackendSpec::Memory => Arc::new(MemoryBackend::new()),
        BackendSpec::File { dir } => Arc::new(FileBackend::new(dir.clone())),
        BackendSpec::Redis { url, prefix } => Arc::new(RedisBackend::connect(url, prefix).await?),
    };
    tracing::debug!(backend = backend.name(), "Storage backend ready");
    Ok(backend)
}
