//! User Model

use serde::{Deserialize, Serialize};

/// Customers table row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: String,
    pub email: String,
    pub order_count: i64,
    pub total_spent_in_cents: i64,
    pub created_at: i64,
}
