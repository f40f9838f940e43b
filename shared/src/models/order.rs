//! Order Model

use serde::{Deserialize, Serialize};

/// Orders table row, joined with product name and customer email
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    pub id: String,
    pub price_paid_in_cents: i64,
    pub product_name: String,
    pub user_email: String,
    pub created_at: i64,
}
