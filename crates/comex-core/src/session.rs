//! A session: one backend, both stores, one change channel.

use std::path::Path;

use comex_store::{create_event_channel, EventReceiver, EventSender, SharedBackend};
use tracing::info;

use crate::client::ClientStore;
use crate::config::Config;
use crate::error::ComexResult;
use crate::process::ProcessStore;

/// Stores opened over a shared backend. Construct once and pass by
/// reference to whatever needs the data.
pub struct Session {
    pub processes: ProcessStore,
    pub clients: ClientStore,
    events: EventSender,
}

impl Session {
    /// Connect the configured backend and load both collections.
    pub async fn open(config: &Config, project_dir: &Path) -> ComexResult<Self> {
        let spec = config.backend_spec(project_dir);
        let backend = comex_store::connect(&spec).await?;
        info!(backend = %config.backend, "Session opened");
        Ok(Self::with_backend(backend, config.seed_demo_data).await)
    }

    /// Load both collections from an existing backend.
    pub async fn with_backend(backend: SharedBackend, seed: bool) -> Self {
        let events = create_event_channel();
        let processes = ProcessStore::open(backend.clone(), events.clone(), seed).await;
        let clients = ClientStore::open(backend, events.clone()).await;
        Self {
            processes,
            clients,
            events,
        }
    }

    /// Change notifications from both stores.
    pub fn subscribe(&self) -> EventReceiver {
        self.events.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BackendKind;
    use crate::process::Stage;
    use comex_store::StoreEvent;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_file_session_persists_across_opens() {
        let dir = TempDir::new().unwrap();
        let config = Config::default();

        let mut session = Session::open(&config, dir.path()).await.unwrap();
        assert_eq!(session.processes.list().len(), 3);
        session
            .processes
            .change_stage_and_reorder("process-1", Stage::Closed, 0)
            .await;
        session.clients.create("ABC Comércio", "12.345.678/0001-90").await;

        let reopened = Session::open(&config, dir.path()).await.unwrap();
        let moved = reopened.processes.get("process-1").unwrap();
        assert_eq!(moved.stage, Stage::Closed);
        assert!(!moved.active);
        assert_eq!(reopened.clients.list().len(), 1);
        assert!(dir.path().join(".comex/data/processes.json").exists());
    }

    #[tokio::test]
    async fn test_memory_session_without_seed() {
        let config = Config {
            backend: BackendKind::Memory,
            seed_demo_data: false,
            ..Default::default()
        };
        let session = Session::open(&config, Path::new(".")).await.unwrap();
        assert!(session.processes.list().is_empty());
        assert!(session.clients.list().is_empty());
    }

    #[tokio::test]
    async fn test_session_channel_carries_both_stores() {
        let config = Config {
            backend: BackendKind::Memory,
            ..Default::default()
        };
        let mut session = Session::open(&config, Path::new(".")).await.unwrap();
        let mut rx = session.subscribe();

        session.processes.set_stage("process-2", Stage::AwaitingChannel).await;
        session.clients.create("A", "1").await;

        assert!(matches!(rx.recv().await.unwrap(), StoreEvent::ProcessMoved { .. }));
        assert_eq!(rx.recv().await.unwrap(), StoreEvent::ClientsChanged);
    }
}
