//! The client collection.

use comex_store::{collection, EventReceiver, EventSender, SharedBackend, StoreEvent};
use tracing::debug;

use super::model::{normalize_client, Client, RawClient, Supplier, SUPPLIER_ID_PREFIX};
use crate::ids;

/// Storage key of the client collection.
pub const CLIENTS_KEY: &str = "clients";

/// Owner of the client collection for one session.
///
/// Clients keep insertion order. Removing a client touches nothing else:
/// processes refer to clients by name only.
pub struct ClientStore {
    backend: SharedBackend,
    events: EventSender,
    clients: Vec<Client>,
}

impl ClientStore {
    /// Load the collection; anything unreadable starts empty.
    pub async fn open(backend: SharedBackend, events: EventSender) -> Self {
        let clients: Vec<Client> = collection::load::<RawClient>(backend.as_ref(), CLIENTS_KEY)
            .await
            .unwrap_or_default()
            .into_iter()
            .map(normalize_client)
            .collect();
        debug!(count = clients.len(), "Clients loaded");

        Self {
            backend,
            events,
            clients,
        }
    }

    pub fn subscribe(&self) -> EventReceiver {
        self.events.subscribe()
    }

    pub fn list(&self) -> Vec<Client> {
        self.clients.clone()
    }

    pub fn get(&self, id: &str) -> Option<&Client> {
        self.clients.iter().find(|c| c.id == id)
    }

    /// Register a client. Returns the new record; the new collection is
    /// announced on the event channel.
    pub async fn create(&mut self, name: &str, tax_id: &str) -> Client {
        let client = normalize_client(RawClient {
            name: Some(name.to_string()),
            tax_id: Some(tax_id.to_string()),
            ..Default::default()
        });
        debug!(client_id = %client.id, "Creating client");
        self.clients.push(client.clone());
        self.commit().await;
        client
    }

    /// Rename a client or change its tax id. Suppliers are kept.
    pub async fn update(&mut self, id: &str, name: &str, tax_id: &str) -> Vec<Client> {
        match self.clients.iter().position(|c| c.id == id) {
            Some(index) => {
                let client = &mut self.clients[index];
                client.name = name.to_string();
                client.tax_id = tax_id.to_string();
                self.commit().await;
            }
            None => debug!(client_id = id, "Update ignored: client not found"),
        }
        self.list()
    }

    pub async fn delete(&mut self, id: &str) -> Vec<Client> {
        let before = self.clients.len();
        self.clients.retain(|c| c.id != id);
        if self.clients.len() < before {
            debug!(client_id = id, "Client deleted");
            self.commit().await;
        } else {
            debug!(client_id = id, "Delete ignored: client not found");
        }
        self.list()
    }

    pub async fn add_supplier(&mut self, client_id: &str, name: &str) -> Vec<Client> {
        match self.clients.iter().position(|c| c.id == client_id) {
            Some(index) => {
                let supplier = Supplier {
                    id: ids::generate_id(SUPPLIER_ID_PREFIX),
                    name: name.to_string(),
                    client_id: client_id.to_string(),
                };
                debug!(client_id, supplier_id = %supplier.id, "Adding supplier");
                self.clients[index].suppliers.push(supplier);
                self.commit().await;
            }
            None => debug!(client_id, "Supplier ignored: client not found"),
        }
        self.list()
    }

    pub async fn remove_supplier(&mut self, client_id: &str, supplier_id: &str) -> Vec<Client> {
        let removed = match self.clients.iter_mut().find(|c| c.id == client_id) {
            Some(client) => {
                let before = client.suppliers.len();
                client.suppliers.retain(|s| s.id != supplier_id);
                client.suppliers.len() < before
            }
            None => false,
        };

        if removed {
            debug!(client_id, supplier_id, "Supplier removed");
            self.commit().await;
        } else {
            debug!(client_id, supplier_id, "Supplier removal ignored: not found");
        }
        self.list()
    }

    async fn commit(&mut self) {
        collection::save(self.backend.as_ref(), CLIENTS_KEY, &self.clients).await;
        let _ = self.events.send(StoreEvent::ClientsChanged);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::{NewProcess, ProcessStore};
    use comex_store::{create_event_channel, MemoryBackend};
    use std::sync::Arc;

    async fn empty_store() -> (Arc<MemoryBackend>, ClientStore) {
        let backend = Arc::new(MemoryBackend::new());
        let store = ClientStore::open(backend.clone(), create_event_channel()).await;
        (backend, store)
    }

    fn stored(backend: &MemoryBackend) -> Vec<Client> {
        serde_json::from_str(&backend.get(CLIENTS_KEY).unwrap()).unwrap()
    }

    #[tokio::test]
    async fn test_open_corrupt_starts_empty() {
        let backend = Arc::new(MemoryBackend::new());
        backend.insert(CLIENTS_KEY, "[{");
        let store = ClientStore::open(backend, create_event_channel()).await;
        assert!(store.list().is_empty());
    }

    #[tokio::test]
    async fn test_create_and_update() {
        let (backend, mut store) = empty_store().await;
        let client = store.create("ABC Comércio", "12.345.678/0001-90").await;
        assert!(client.id.starts_with("client-"));
        assert!(client.suppliers.is_empty());

        let all = store.update(&client.id, "ABC Comércio Ltda", "98.765.432/0001-10").await;

        assert_eq!(all[0].name, "ABC Comércio Ltda");
        assert_eq!(all[0].tax_id, "98.765.432/0001-10");
        assert_eq!(stored(&backend), all);
    }

    #[tokio::test]
    async fn test_suppliers_scoped_to_client() {
        let (_backend, mut store) = empty_store().await;
        let a = store.create("A", "1").await;
        let b = store.create("B", "2").await;

        store.add_supplier(&a.id, "Shanghai Trading Co.").await;
        store.add_supplier(&a.id, "German Machines GmbH").await;
        let all = store.add_supplier("missing", "Nobody").await;

        let a_now = all.iter().find(|c| c.id == a.id).unwrap();
        assert_eq!(a_now.suppliers.len(), 2);
        assert!(a_now.suppliers.iter().all(|s| s.client_id == a.id));
        assert!(store.get(&b.id).unwrap().suppliers.is_empty());

        let first = a_now.suppliers[0].id.clone();
        let all = store.remove_supplier(&a.id, &first).await;
        let names: Vec<&str> = all[0].suppliers.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["German Machines GmbH"]);

        // wrong owner: nothing happens
        let second = all[0].suppliers[0].id.clone();
        let all = store.remove_supplier(&b.id, &second).await;
        assert_eq!(all[0].suppliers.len(), 1);
    }

    #[tokio::test]
    async fn test_delete_client_leaves_processes_untouched() {
        let backend = Arc::new(MemoryBackend::new());
        let events = create_event_channel();
        let mut clients = ClientStore::open(backend.clone(), events.clone()).await;
        let mut processes = ProcessStore::open(backend.clone(), events, false).await;

        let client = clients.create("ABC Comércio", "12.345.678/0001-90").await;
        let process = processes
            .create(NewProcess {
                reference: "IMP-1".into(),
                acquirer: "ABC Comércio".into(),
                ..Default::default()
            })
            .await;

        let remaining = clients.delete(&client.id).await;

        assert!(remaining.is_empty());
        assert!(clients.get(&client.id).is_none());
        assert_eq!(processes.get(&process.id), Some(&process));
        let reopened = ProcessStore::open(backend, create_event_channel(), false).await;
        assert_eq!(reopened.get(&process.id).unwrap().acquirer, "ABC Comércio");
    }

    #[tokio::test]
    async fn test_mutations_emit_events() {
        let (_backend, mut store) = empty_store().await;
        let mut rx = store.subscribe();

        store.create("A", "1").await;
        store.delete("missing").await;

        assert_eq!(rx.recv().await.unwrap(), StoreEvent::ClientsChanged);
        assert!(rx.try_recv().is_err());
    }
}
