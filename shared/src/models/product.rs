//! Product Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Product entity as returned by the backend.
///
/// Form fields are stored under camelCase column names; `id` and the
/// bookkeeping timestamps keep the backend's snake_case names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub product_name: String,
    #[serde(default)]
    pub product_description: Option<String>,
    #[serde(default)]
    pub product_tags: String,
    #[serde(default)]
    pub product_images: Vec<String>,
    #[serde(default)]
    pub inventory_number: String,
    #[serde(default)]
    pub inventory_quantity: i64,
    #[serde(default)]
    pub exchange_rate: Decimal,
    #[serde(default)]
    pub cost_price: Decimal,
    #[serde(default)]
    pub product_price: Decimal,
    /// Variant sub-records (joined on read, written separately)
    #[serde(default)]
    pub variants: Vec<Variant>,
    #[serde(rename = "created_at", default)]
    pub created_at: Option<String>,
    #[serde(rename = "updated_at", default)]
    pub updated_at: Option<String>,
}

/// Scalar product payload submitted on create and update.
///
/// Variants are never part of this payload; they travel as a separate
/// list and are persisted as their own rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPayload {
    pub product_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_description: Option<String>,
    pub product_tags: String,
    /// Durable storage URLs only; local previews never reach the wire
    pub product_images: Vec<String>,
    pub inventory_number: String,
    pub inventory_quantity: i64,
    pub exchange_rate: Decimal,
    pub cost_price: Decimal,
    pub product_price: Decimal,
}

/// One stock-keeping sub-unit of a product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variant {
    /// Present only once persisted; a variant without an id is new
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub stock: i64,
    pub price: Decimal,
}

impl Variant {
    pub fn new(name: impl Into<String>, stock: i64, price: Decimal) -> Self {
        Self {
            id: None,
            name: name.into(),
            stock,
            price,
        }
    }
}
