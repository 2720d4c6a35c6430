//! Order status change notifications.
//!
//! Delivery is fire-and-forget from the caller's point of view: a failed
//! notification must never fail or delay the request that changed the status.
//! [`FireAndForget`] runs each delivery on the blocking pool and logs and counts
//! failures so the gap stays observable.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use lampshop_core::EntityId;
use lampshop_orders::OrderStatus;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NotifyError {
    #[error("order status notifier is not configured")]
    NotConfigured,

    #[error("notification delivery failed: {0}")]
    Delivery(String),
}

/// External collaborator told about every successful status patch.
pub trait OrderStatusNotifier: Send + Sync {
    fn notify_status_change(&self, order_id: EntityId, status: OrderStatus) -> Result<(), NotifyError>;
}

/// Message published by [`BroadcastNotifier`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderStatusChanged {
    pub order_id: EntityId,
    pub status: OrderStatus,
    pub changed_at: DateTime<Utc>,
}

/// Accepts and drops every notification.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopNotifier;

impl OrderStatusNotifier for NoopNotifier {
    fn notify_status_change(&self, order_id: EntityId, status: OrderStatus) -> Result<(), NotifyError> {
        debug!(%order_id, %status, "order status change (noop notifier)");
        Ok(())
    }
}

/// Placeholder for a real outbound client that has not been wired up yet.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnconfiguredNotifier;

impl OrderStatusNotifier for UnconfiguredNotifier {
    fn notify_status_change(&self, _order_id: EntityId, _status: OrderStatus) -> Result<(), NotifyError> {
        Err(NotifyError::NotConfigured)
    }
}

/// Publishes status changes on an in-process broadcast channel.
///
/// Lossy: with no subscribers the message is dropped, and slow subscribers
/// lag instead of applying backpressure.
#[derive(Debug, Clone)]
pub struct BroadcastNotifier {
    tx: broadcast::Sender<OrderStatusChanged>,
}

impl BroadcastNotifier {
    pub fn new(capacity: usize) -> Self {
        let (tx, _rx) = broadcast::channel(capacity);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<OrderStatusChanged> {
        self.tx.subscribe()
    }
}

impl OrderStatusNotifier for BroadcastNotifier {
    fn notify_status_change(&self, order_id: EntityId, status: OrderStatus) -> Result<(), NotifyError> {
        let msg = OrderStatusChanged {
            order_id,
            status,
            changed_at: Utc::now(),
        };
        if self.tx.send(msg).is_err() {
            debug!(%order_id, "no subscribers for order status change");
        }
        Ok(())
    }
}

/// Drain a broadcast subscription into the log until every sender is gone.
pub async fn log_status_changes(mut rx: broadcast::Receiver<OrderStatusChanged>) {
    loop {
        match rx.recv().await {
            Ok(msg) => info!(
                order_id = %msg.order_id,
                status = %msg.status,
                changed_at = %msg.changed_at,
                "order status change published"
            ),
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                warn!(skipped, "order status log fell behind");
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}

/// Hands each notification to a background task and swallows its failure
/// after logging it.
pub struct FireAndForget {
    inner: Arc<dyn OrderStatusNotifier>,
    failures: Arc<AtomicU64>,
}

impl FireAndForget {
    pub fn new(inner: impl OrderStatusNotifier + 'static) -> Self {
        Self {
            inner: Arc::new(inner),
            failures: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Start delivery and return at once. Must be called inside a tokio runtime.
    ///
    /// The notifier runs on the blocking pool, so a slow client holds neither
    /// the caller nor an async worker thread.
    pub fn notify(&self, order_id: EntityId, status: OrderStatus) -> JoinHandle<()> {
        let inner = Arc::clone(&self.inner);
        let failures = Arc::clone(&self.failures);

        tokio::task::spawn_blocking(move || {
            if let Err(e) = inner.notify_status_change(order_id, status) {
                let failures = failures.fetch_add(1, Ordering::Relaxed) + 1;
                warn!(%order_id, %status, error = %e, failures, "order status notification failed");
            }
        })
    }

    /// Number of notifications that failed since startup.
    pub fn failures(&self) -> u64 {
        self.failures.load(Ordering::Relaxed)
    }
}

impl core::fmt::Debug for FireAndForget {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FireAndForget")
            .field("failures", &self.failures())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Mutex, mpsc};

    #[test]
    fn broadcast_delivers_to_subscribers() {
        let notifier = BroadcastNotifier::new(8);
        let mut rx = notifier.subscribe();

        notifier
            .notify_status_change(EntityId::new(3), OrderStatus::Shipped)
            .unwrap();

        let msg = rx.try_recv().unwrap();
        assert_eq!(msg.order_id, EntityId::new(3));
        assert_eq!(msg.status, OrderStatus::Shipped);
    }

    #[test]
    fn broadcast_without_subscribers_is_not_an_error() {
        let notifier = BroadcastNotifier::new(8);
        assert!(notifier
            .notify_status_change(EntityId::new(1), OrderStatus::Pending)
            .is_ok());
    }

    #[tokio::test]
    async fn broadcast_log_drains_until_sender_dropped() {
        let notifier = BroadcastNotifier::new(8);
        let rx = notifier.subscribe();
        notifier
            .notify_status_change(EntityId::new(1), OrderStatus::Processing)
            .unwrap();
        drop(notifier);

        // Returns once the channel closes.
        log_status_changes(rx).await;
    }

    #[tokio::test]
    async fn fire_and_forget_counts_failures() {
        let notifier = FireAndForget::new(UnconfiguredNotifier);
        notifier.notify(EntityId::new(1), OrderStatus::Shipped).await.unwrap();
        notifier.notify(EntityId::new(1), OrderStatus::Delivered).await.unwrap();
        assert_eq!(notifier.failures(), 2);
    }

    #[tokio::test]
    async fn fire_and_forget_success_is_not_counted() {
        let notifier = FireAndForget::new(NoopNotifier);
        notifier.notify(EntityId::new(1), OrderStatus::Shipped).await.unwrap();
        assert_eq!(notifier.failures(), 0);
    }

    /// Blocks delivery until the test releases it.
    struct GatedNotifier {
        release: Mutex<mpsc::Receiver<()>>,
    }

    impl OrderStatusNotifier for GatedNotifier {
        fn notify_status_change(&self, _order_id: EntityId, _status: OrderStatus) -> Result<(), NotifyError> {
            let _ = self.release.lock().unwrap().recv();
            Err(NotifyError::Delivery("downstream timed out".into()))
        }
    }

    #[tokio::test]
    async fn notify_returns_while_delivery_is_still_blocked() {
        let (tx, rx) = mpsc::channel();
        let notifier = FireAndForget::new(GatedNotifier {
            release: Mutex::new(rx),
        });

        let delivery = notifier.notify(EntityId::new(7), OrderStatus::Shipped);
        assert!(!delivery.is_finished());
        assert_eq!(notifier.failures(), 0);

        tx.send(()).unwrap();
        delivery.await.unwrap();
        assert_eq!(notifier.failures(), 1);
    }
}
