//! The process collection: in-memory mirror plus write-back.
//!
//! Every mutation normalizes and re-sorts the whole collection, writes it
//! back in a single save, announces the change, and returns the new state.
//! Operations on unknown ids change nothing and still return the state.

use comex_store::{collection, EventReceiver, EventSender, SharedBackend, StoreEvent};
use tracing::{debug, info};

use super::board::Board;
use super::filter::ProcessFilter;
use super::model::{NewProcess, Process, RawProcess, Stage};
use super::normalize::{normalize, renormalize};
use super::ordering::{self, sort_by_order};
use super::seed::demo_processes;

/// Storage key of the process collection.
pub const PROCESSES_KEY: &str = "processes";

/// Owner of the process collection for one session.
pub struct ProcessStore {
    backend: SharedBackend,
    events: EventSender,
    processes: Vec<Process>,
}

impl ProcessStore {
    /// Load the collection, normalizing every record.
    ///
    /// When nothing usable is stored, starts from the demonstration data
    /// (written back immediately) if `seed` is set, or empty otherwise.
    pub async fn open(backend: SharedBackend, events: EventSender, seed: bool) -> Self {
        let loaded = collection::load::<RawProcess>(backend.as_ref(), PROCESSES_KEY).await;

        let mut store = Self {
            backend,
            events,
            processes: Vec::new(),
        };

        match loaded {
            Some(raw) => {
                store.processes = raw.into_iter().map(normalize).collect();
                sort_by_order(&mut store.processes);
                debug!(count = store.processes.len(), "Processes loaded");
            }
            None if seed => {
                info!("No stored processes, seeding demonstration data");
                store.processes = demo_processes();
                store.persist().await;
            }
            None => debug!("No stored processes"),
        }

        store
    }

    /// Receive change notifications.
    pub fn subscribe(&self) -> EventReceiver {
        self.events.subscribe()
    }

    /// All processes, ascending by order key across every stage.
    pub fn list(&self) -> Vec<Process> {
        self.processes.clone()
    }

    pub fn get(&self, id: &str) -> Option<&Process> {
        self.processes.iter().find(|p| p.id == id)
    }

    /// Board view of the current collection.
    pub fn board(&self, filter: &ProcessFilter) -> Board {
        Board::build(&self.processes, filter)
    }

    /// Create a process from caller-supplied fields.
    ///
    /// Returns the new record with its generated id. The new collection is
    /// announced on the event channel and read with `list`.
    pub async fn create(&mut self, fields: NewProcess) -> Process {
        let process = normalize(fields.into());
        debug!(process_id = %process.id, stage = %process.stage, "Creating process");
        self.processes.push(process.clone());
        self.commit(StoreEvent::ProcessesChanged).await;
        process
    }

    /// Replace the record with the same id.
    pub async fn update(&mut self, process: Process) -> Vec<Process> {
        match self.processes.iter().position(|p| p.id == process.id) {
            Some(index) => {
                debug!(process_id = %process.id, "Updating process");
                self.processes[index] = process;
                self.commit(StoreEvent::ProcessesChanged).await;
            }
            None => debug!(process_id = %process.id, "Update ignored: process not found"),
        }
        self.list()
    }

    pub async fn delete(&mut self, id: &str) -> Vec<Process> {
        let before = self.processes.len();
        self.processes.retain(|p| p.id != id);
        if self.processes.len() < before {
            debug!(process_id = id, "Process deleted");
            self.commit(StoreEvent::ProcessesChanged).await;
        } else {
            debug!(process_id = id, "Delete ignored: process not found");
        }
        self.list()
    }

    /// Change the stage without touching any order key.
    pub async fn set_stage(&mut self, id: &str, stage: Stage) -> Vec<Process> {
        if ordering::set_stage(&mut self.processes, id, stage) {
            self.commit(moved(id, stage)).await;
        }
        self.list()
    }

    /// Move a process within its own column.
    pub async fn reorder_within_stage(
        &mut self,
        id: &str,
        target_index: usize,
        stage: Stage,
    ) -> Vec<Process> {
        if ordering::reorder_within_stage(&mut self.processes, id, target_index, stage) {
            self.commit(StoreEvent::ProcessesChanged).await;
        }
        self.list()
    }

    /// Move a process into another column at `target_index`.
    ///
    /// Callers confirm cross-stage moves before invoking this.
    pub async fn change_stage_and_reorder(
        &mut self,
        id: &str,
        new_stage: Stage,
        target_index: usize,
    ) -> Vec<Process> {
        if ordering::change_stage_and_reorder(&mut self.processes, id, new_stage, target_index) {
            self.commit(moved(id, new_stage)).await;
        }
        self.list()
    }

    async fn commit(&mut self, event: StoreEvent) {
        let processes = std::mem::take(&mut self.processes);
        self.processes = processes.into_iter().map(renormalize).collect();
        sort_by_order(&mut self.processes);
        self.persist().await;
        let _ = self.events.send(event);
    }

    async fn persist(&self) {
        collection::save(self.backend.as_ref(), PROCESSES_KEY, &self.processes).await;
    }
}

fn moved(id: &str, stage: Stage) -> StoreEvent {
    StoreEvent::ProcessMoved {
        process_id: id.to_string(),
        stage: stage.as_str().to_string(),
    }
}
