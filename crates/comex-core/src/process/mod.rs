//! Process tracking (kanban pipeline).

pub mod board;
pub mod filter;
pub mod model;
pub mod normalize;
pub mod ordering;
pub mod seed;
pub mod store;

pub use board::{Board, BoardColumn};
pub use filter::ProcessFilter;
pub use model::{Direction, NewProcess, Process, RawProcess, Stage, TransportMode};
pub use normalize::normalize;
pub use store::{ProcessStore, PROCESSES_KEY};
