use axum::{Json, extract::State};
use serde_json::Value;

use crate::cache::View;
use crate::core::ServerState;
use crate::db::repository::dashboard;
use shared::error::{ApiResponse, AppError, AppResult};

/// GET /api/admin/dashboard - sales, customers and product cards (cached)
pub async fn stats(State(state): State<ServerState>) -> AppResult<Json<ApiResponse<Value>>> {
    let pool = state.db.pool.clone();
    let body = state
        .cache
        .get_or_compute(View::Dashboard, || async move {
            let stats = dashboard::stats(&pool).await?;
            serde_json::to_value(stats).map_err(|e| AppError::internal(e.to_string()))
        })
        .await?;
    Ok(Json(ApiResponse::success((*body).clone())))
}
