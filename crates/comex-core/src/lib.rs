//! COMEX Core Library
//!
//! Domain models and business logic for tracking customs-brokerage
//! processes through the kanban pipeline, plus the client registry.

pub mod client;
pub mod config;
pub mod error;
pub mod ids;
pub mod process;
pub mod session;

pub use config::Config;
pub use error::{ComexError, ComexResult};
pub use session::Session;
