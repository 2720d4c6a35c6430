use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use lampshop_core::{Entity, EntityId};

use crate::attributes::AttributeBag;

/// Catalog product as stored and served.
///
/// # Invariants
/// - `id` is assigned by the store and never changes.
/// - `created_at <= updated_at`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: EntityId,
    pub sku: String,
    pub name: String,
    pub description: String,
    /// Informational reference into the category catalog (not validated).
    pub category_id: String,
    pub is_active: bool,
    pub image_url: String,
    pub price: f64,
    pub stock_qty: i64,
    pub attributes: AttributeBag,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Caller-supplied product fields (everything except id and timestamps).
///
/// Used for both create and full-replace update. Unknown JSON fields such as
/// `id` or `createdAt` are ignored, so clients may send back a whole product.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductDraft {
    pub sku: String,
    pub name: String,
    pub description: String,
    pub category_id: String,
    pub is_active: bool,
    pub image_url: String,
    pub price: f64,
    pub stock_qty: i64,
    pub attributes: AttributeBag,
}

impl Product {
    /// The mutable part of this product, e.g. to edit and send back.
    pub fn to_draft(&self) -> ProductDraft {
        ProductDraft {
            sku: self.sku.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            category_id: self.category_id.clone(),
            is_active: self.is_active,
            image_url: self.image_url.clone(),
            price: self.price,
            stock_qty: self.stock_qty,
            attributes: self.attributes.clone(),
        }
    }
}

impl Entity for Product {
    type Draft = ProductDraft;

    const KIND: &'static str = "product";

    fn id(&self) -> EntityId {
        self.id
    }

    fn create(id: EntityId, draft: ProductDraft, now: DateTime<Utc>) -> Self {
        Self {
            id,
            sku: draft.sku,
            name: draft.name,
            description: draft.description,
            category_id: draft.category_id,
            is_active: draft.is_active,
            image_url: draft.image_url,
            price: draft.price,
            stock_qty: draft.stock_qty,
            attributes: draft.attributes,
            created_at: now,
            updated_at: now,
        }
    }

    fn replace(&mut self, draft: ProductDraft, now: DateTime<Utc>) {
        let ProductDraft {
            sku,
            name,
            description,
            category_id,
            is_active,
            image_url,
            price,
            stock_qty,
            attributes,
        } = draft;

        self.sku = sku;
        self.name = name;
        self.description = description;
        self.category_id = category_id;
        self.is_active = is_active;
        self.image_url = image_url;
        self.price = price;
        self.stock_qty = stock_qty;
        self.attributes = attributes;
        self.touch(now);
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }
}
