//! Infrastructure layer: in-memory entity stores and outbound notifications.

pub mod notify;
pub mod store;

pub use notify::{
    BroadcastNotifier, FireAndForget, NoopNotifier, NotifyError, OrderStatusChanged,
    OrderStatusNotifier, UnconfiguredNotifier, log_status_changes,
};
pub use store::{EntityStore, InMemoryEntityStore, OrderStatusPatch};
