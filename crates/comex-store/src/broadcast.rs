//! Change notifications for collection mutations.
//!
//! Uses a tokio broadcast channel; mutations are announced after the
//! collection has been written back.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Events emitted by the stores.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(tag = "type", content = "data")]
pub enum StoreEvent {
    /// The process collection changed; re-read it.
    ProcessesChanged,
    /// A process changed stage.
    ProcessMoved { process_id: String, stage: String },
    /// The client collection changed.
    ClientsChanged,
}

/// Type alias for the broadcast sender.
pub type EventSender = broadcast::Sender<StoreEvent>;

/// Type alias for the broadcast receiver.
pub type EventReceiver = broadcast::Receiver<StoreEvent>;

/// Create a new broadcast channel with default capacity.
pub fn create_event_channel() -> EventSender {
    let (tx, _rx) = broadcast::channel(100);
    tx
}
