//! Read-only reference data: product categories and the attribute options
//! each category expects in a product's attribute bag.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
}

/// Input type the admin form should use for an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeKind {
    Number,
    Text,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeOption {
    pub key: String,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: AttributeKind,
}

impl AttributeOption {
    pub fn new(key: &str, label: &str, kind: AttributeKind) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            kind,
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("attributes not found for category {0:?}")]
    AttributesNotFound(String),
}

/// Reference-data lookups keyed by category id.
pub trait ReferenceCatalog: Send + Sync {
    fn categories(&self) -> Vec<Category>;

    fn attribute_options(&self, category_id: &str) -> Result<Vec<AttributeOption>, CatalogError>;
}

/// Catalog fixed at construction time.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    categories: Vec<Category>,
    options: HashMap<String, Vec<AttributeOption>>,
}

impl StaticCatalog {
    pub fn new(categories: Vec<Category>, options: HashMap<String, Vec<AttributeOption>>) -> Self {
        Self { categories, options }
    }

    /// Lamp shop defaults: bulbs, cables, equipment.
    pub fn lampshop_defaults() -> Self {
        use AttributeKind::{Number, Text};

        let categories = vec![
            Category { id: "bulb".into(), name: "Bulbs".into() },
            Category { id: "cable".into(), name: "Cables".into() },
            Category { id: "equipment".into(), name: "Equipment".into() },
        ];

        let options = HashMap::from([
            (
                "bulb".to_string(),
                vec![
                    AttributeOption::new("power", "Power (W)", Number),
                    AttributeOption::new("color", "Color", Text),
                    AttributeOption::new("temperature", "Temperature (K)", Number),
                    AttributeOption::new("socketType", "Socket type", Text),
                ],
            ),
            (
                "cable".to_string(),
                vec![
                    AttributeOption::new("length", "Length (m)", Number),
                    AttributeOption::new("material", "Material", Text),
                    AttributeOption::new("color", "Color", Text),
                ],
            ),
            (
                "equipment".to_string(),
                vec![
                    AttributeOption::new("manufacturer", "Manufacturer", Text),
                    AttributeOption::new("model", "Model", Text),
                    AttributeOption::new("warranty", "Warranty (months)", Number),
                ],
            ),
        ]);

        Self::new(categories, options)
    }
}

impl ReferenceCatalog for StaticCatalog {
    fn categories(&self) -> Vec<Category> {
        self.categories.clone()
    }

    fn attribute_options(&self, category_id: &str) -> Result<Vec<AttributeOption>, CatalogError> {
        self.options
            .get(category_id)
            .cloned()
            .ok_or_else(|| CatalogError::AttributesNotFound(category_id.to_string()))
    }
}
