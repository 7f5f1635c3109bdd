//! Client and supplier registry.

pub mod model;
pub mod store;

pub use model::{Client, Supplier};
pub use store::{ClientStore, CLIENTS_KEY};
