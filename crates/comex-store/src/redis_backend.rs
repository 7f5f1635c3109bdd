//! Redis backend.

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;

use crate::backend::{Backend, StoreResult};

/// Keeps each collection as a plain string value under `<prefix>:<key>`.
///
/// `ConnectionManager` multiplexes internally and is cheap to clone, so every
/// operation clones it to get a mutable handle.
#[derive(Clone)]
pub struct RedisBackend {
    conn: ConnectionManager,
    prefix: String,
}

impl RedisBackend {
    /// Connect to a Redis server.
    pub async fn connect(redis_url: &str, prefix: &str) -> StoreResult<Self> {
        let client = redis::Client::open(redis_url)?;
        let conn = ConnectionManager::new(client).await?;
        Ok(Self {
            conn,
            prefix: prefix.to_string(),
        })
    }

    fn key(&self, key: &str) -> String {
        format!("{}:{}", self.prefix, key)
    }
}

#[async_trait]
impl Backend for RedisBackend {
    fn name(&self) -> &'static str {
        "redis"
    }

    async fn read(&self, key: &str) -> StoreResult<Option<String>> {
        let mut conn = self.conn.clone();
        let data: Option<String> = conn.get(self.key(key)).await?;
        Ok(data)
    }

    async fn write(&self, key: &str, data: &str) -> StoreResult<()> {
        let mut conn = self.conn.clone();
        conn.set::<_, _, ()>(self.key(key), data).await?;
        Ok(())
    }
}
