use std::sync::Arc;

use chrono::Utc;

use lampshop_catalog::{ReferenceCatalog, StaticCatalog};
use lampshop_core::{Entity, EntityId};
use lampshop_infra::{
    BroadcastNotifier, EntityStore, FireAndForget, InMemoryEntityStore, NoopNotifier,
    UnconfiguredNotifier, log_status_changes,
};
use lampshop_orders::{Order, OrderDraft, OrderItem, OrderStatus};
use lampshop_products::{AttributeBag, AttributeValue, Product, ProductDraft};

use crate::config::{ApiConfig, NotifierKind};

const BROADCAST_CAPACITY: usize = 256;

/// Collaborators shared by every handler.
///
/// Each collection is its own store, so product and order requests never
/// contend for the same lock.
pub struct AppServices {
    pub products: Arc<dyn EntityStore<Product>>,
    pub orders: Arc<dyn EntityStore<Order>>,
    pub catalog: Arc<dyn ReferenceCatalog>,
    pub notifier: Arc<FireAndForget>,
}

impl AppServices {
    /// Empty in-memory stores, default catalog, no-op notifier.
    pub fn in_memory() -> Self {
        Self {
            products: Arc::new(InMemoryEntityStore::<Product>::new()),
            orders: Arc::new(InMemoryEntityStore::<Order>::new()),
            catalog: Arc::new(StaticCatalog::lampshop_defaults()),
            notifier: Arc::new(FireAndForget::new(NoopNotifier)),
        }
    }

    /// Stores pre-loaded with one demo product and one demo order.
    pub fn demo() -> Self {
        let now = Utc::now();
        let product = Product::create(EntityId::FIRST, demo_product(), now);
        let order = Order::create(EntityId::FIRST, demo_order(product.id), now);
        tracing::info!(product_id = %product.id, order_id = %order.id, "seeded demo data");

        Self {
            products: Arc::new(InMemoryEntityStore::with_entities(vec![product])),
            orders: Arc::new(InMemoryEntityStore::with_entities(vec![order])),
            ..Self::in_memory()
        }
    }

    /// Services as selected by `config`.
    ///
    /// With [`NotifierKind::Broadcast`] this spawns the task that logs published
    /// changes, so it must run inside a tokio runtime.
    pub fn from_config(config: &ApiConfig) -> Self {
        let services = if config.seed_demo_data {
            Self::demo()
        } else {
            Self::in_memory()
        };

        match config.notifier {
            NotifierKind::Noop => services,
            NotifierKind::Unconfigured => services.with_notifier(FireAndForget::new(UnconfiguredNotifier)),
            NotifierKind::Broadcast => {
                let notifier = BroadcastNotifier::new(BROADCAST_CAPACITY);
                tokio::spawn(log_status_changes(notifier.subscribe()));
                services.with_notifier(FireAndForget::new(notifier))
            }
        }
    }

    pub fn with_notifier(mut self, notifier: FireAndForget) -> Self {
        self.notifier = Arc::new(notifier);
        self
    }
}

fn demo_product() -> ProductDraft {
    let attributes: AttributeBag = [
        ("power", AttributeValue::from(7)),
        ("color", AttributeValue::from("Warm white")),
        ("temperature", AttributeValue::from(2700)),
        ("socketType", AttributeValue::from("E27")),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect();

    ProductDraft {
        sku: "BULB-007".to_string(),
        name: "EcoBright 7W".to_string(),
        description: "Energy-efficient household bulb.".to_string(),
        category_id: "bulb".to_string(),
        is_active: true,
        image_url: String::new(),
        price: 500.0,
        stock_qty: 20,
        attributes,
    }
}

fn demo_order(product_id: EntityId) -> OrderDraft {
    OrderDraft {
        customer_name: "Ivan Ivanov".to_string(),
        items: vec![OrderItem {
            product_id,
            quantity: 2,
        }],
        total_price: 1000.0,
        status: OrderStatus::Pending,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lampshop_infra::OrderStatusPatch;

    #[test]
    fn demo_services_hold_linked_records() {
        let services = AppServices::demo();

        let products = services.products.list_all();
        let orders = services.orders.list_all();
        assert_eq!(products.len(), 1);
        assert_eq!(orders.len(), 1);
        assert_eq!(products[0].sku, "BULB-007");
        assert_eq!(orders[0].items[0].product_id, products[0].id);
        assert_eq!(orders[0].status, OrderStatus::Pending);
    }

    #[test]
    fn ids_continue_after_demo_records() {
        let services = AppServices::demo();
        let next = services.products.create(demo_product());
        assert_eq!(next.id, EntityId::new(2));
    }

    #[test]
    fn config_without_seeding_starts_empty() {
        let services = AppServices::from_config(&ApiConfig::new("k"));
        assert!(services.products.list_all().is_empty());
        assert!(services.orders.list_all().is_empty());
    }

    #[tokio::test]
    async fn unconfigured_notifier_is_selected_from_config() {
        let mut config = ApiConfig::new("k");
        config.seed_demo_data = true;
        config.notifier = NotifierKind::Unconfigured;
        let services = AppServices::from_config(&config);

        let order = services.orders.patch_status(EntityId::FIRST, OrderStatus::Shipped).unwrap();
        services.notifier.notify(order.id, order.status).await.unwrap();
        assert_eq!(services.notifier.failures(), 1);
    }

    #[tokio::test]
    async fn broadcast_notifier_delivers_without_failures() {
        let mut config = ApiConfig::new("k");
        config.seed_demo_data = true;
        config.notifier = NotifierKind::Broadcast;
        let services = AppServices::from_config(&config);

        services
            .notifier
            .notify(EntityId::FIRST, OrderStatus::Delivered)
            .await
            .unwrap();
        assert_eq!(services.notifier.failures(), 0);
    }
}
