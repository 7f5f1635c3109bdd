//! COMEX Storage Layer
//!
//! Key-value persistence for whole collections. Each collection is a single
//! JSON document stored under a fixed key; every save overwrites it.

pub mod backend;
pub mod broadcast;
pub mod collection;
pub mod file;
pub mod memory;
pub mod redis_backend;

pub use backend::{connect, Backend, BackendSpec, SharedBackend, StoreError, StoreResult};
pub use broadcast::{create_event_channel, EventReceiver, EventSender, StoreEvent};
pub use file::FileBackend;
pub use memory::MemoryBackend;
pub use redis_backend::RedisBackend;
