//! Concurrent in-memory entity storage.

pub mod entity_store;
pub mod order_status;

pub use entity_store::{EntityStore, InMemoryEntityStore};
pub use order_status::OrderStatusPatch;
