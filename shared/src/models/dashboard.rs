//! Dashboard aggregates

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Sales card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesStats {
    pub amount: Decimal,
    pub number_of_sales: i64,
}

/// Customers card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerStats {
    pub user_count: i64,
    /// Zero when there are no users
    pub average_value_per_user: Decimal,
}

/// Active products card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductStats {
    pub active_count: i64,
    pub inactive_count: i64,
}

/// Everything shown on `/admin`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub sales: SalesStats,
    pub customers: CustomerStats,
    pub products: ProductStats,
}
