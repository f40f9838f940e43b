//! Category Model

use serde::{Deserialize, Serialize};

/// Category entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    /// URL-safe identifier, unique across categories (case-insensitive)
    pub slug: String,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Categories table row with its linked product count
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct CategorySummary {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub product_count: i64,
}

/// Response of the slug suggestion helper
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlugSuggestion {
    pub slug: String,
}
