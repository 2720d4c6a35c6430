use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use lampshop_core::{Entity, EntityId};

/// Order status.
///
/// Any status may follow any other; there is no transition table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum OrderStatus {
    #[default]
    Pending,
    Processing,
    Shipped,
    Delivered,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 4] = [
        OrderStatus::Pending,
        OrderStatus::Processing,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Processing => "Processing",
            OrderStatus::Shipped => "Shipped",
            OrderStatus::Delivered => "Delivered",
        }
    }
}

impl core::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Order line: which product, how many.
///
/// `product_id` is not checked against the product collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub product_id: EntityId,
    pub quantity: u32,
}

/// Customer order as stored and served.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: EntityId,
    pub customer_name: String,
    pub items: Vec<OrderItem>,
    pub total_price: f64,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Caller-supplied order fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OrderDraft {
    pub customer_name: String,
    pub items: Vec<OrderItem>,
    pub total_price: f64,
    pub status: OrderStatus,
}

impl Order {
    /// Overwrite the status. No legality check on the transition; the owning
    /// store refreshes `updated_at`.
    pub fn set_status(&mut self, status: OrderStatus) {
        self.status = status;
    }
}

impl Entity for Order {
    type Draft = OrderDraft;

    const KIND: &'static str = "order";

    fn id(&self) -> EntityId {
        self.id
    }

    fn create(id: EntityId, draft: OrderDraft, now: DateTime<Utc>) -> Self {
        Self {
            id,
            customer_name: draft.customer_name,
            items: draft.items,
            total_price: draft.total_price,
            status: draft.status,
            created_at: now,
            updated_at: now,
        }
    }

    fn replace(&mut self, draft: OrderDraft, now: DateTime<Utc>) {
        self.customer_name = draft.customer_name;
        self.items = draft.items;
        self.total_price = draft.total_price;
        self.status = draft.status;
        self.touch(now);
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }
}
