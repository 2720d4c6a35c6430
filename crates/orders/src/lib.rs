//! Orders domain module.
//!
//! Customer orders as plain records managed by an entity store. Status is a
//! closed enumeration but transitions between values are unconstrained.

pub mod order;

pub use order::{Order, OrderDraft, OrderItem, OrderStatus};
