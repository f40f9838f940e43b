//! Product Model

use serde::{Deserialize, Serialize};

/// Product entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price_in_cents: i64,
    /// Public path of the product image, e.g. `/products/{uuid}-{name}.jpg`
    pub img_path: String,
    pub is_available_for_purchase: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Product with its (single) linked category, for edit screens
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetail {
    #[serde(flatten)]
    pub product: Product,
    pub category_id: Option<String>,
}

/// Join row between product and category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct ProductCategoryLink {
    pub product_id: String,
    pub category_id: String,
}

/// Products table row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct ProductSummary {
    pub id: String,
    pub name: String,
    pub price_in_cents: i64,
    pub is_available_for_purchase: bool,
    pub order_count: i64,
}

/// Availability toggle payload
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityUpdate {
    pub is_available_for_purchase: bool,
}
