//! Products domain module.
//!
//! Catalog products as plain records managed by an entity store. No IO, no
//! HTTP, no storage here.

pub mod attributes;
pub mod product;

pub use attributes::{AttributeBag, AttributeValue};
pub use product::{Product, ProductDraft};
