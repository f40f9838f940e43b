use axum::{Json, extract::State};
use serde_json::Value;

use crate::cache::View;
use crate::core::ServerState;
use crate::db::repository::user;
use shared::error::{ApiResponse, AppError, AppResult};

/// GET /api/admin/users - customers with order totals (cached)
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<ApiResponse<Value>>> {
    let pool = state.db.pool.clone();
    let body = state
        .cache
        .get_or_compute(View::Users, || async move {
            let rows = user::list_summaries(&pool).await?;
            serde_json::to_value(rows).map_err(|e| AppError::internal(e.to_string()))
        })
        .await?;
    Ok(Json(ApiResponse::success((*body).clone())))
}
