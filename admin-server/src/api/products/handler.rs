//! Product API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde_json::Value;

use crate::actions::ActionOutcome;
use crate::api::form::FormData;
use crate::cache::View;
use crate::core::ServerState;
use crate::db::repository::product;
use shared::error::{ApiResponse, AppError, AppResult};
use shared::models::{AvailabilityUpdate, Product, ProductDetail};

/// GET /api/admin/products - products table (cached)
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<ApiResponse<Value>>> {
    let pool = state.db.pool.clone();
    let body = state
        .cache
        .get_or_compute(View::Products, || async move {
            let rows = product::list_summaries(&pool).await?;
            serde_json::to_value(rows).map_err(|e| AppError::internal(e.to_string()))
        })
        .await?;
    Ok(Json(ApiResponse::success((*body).clone())))
}

/// GET /api/admin/products/{id} - product with its category id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<ProductDetail>>> {
    let detail = product::find_detail(&state.db.pool, &id)
        .await?
        .ok_or_else(|| AppError::not_found("Product"))?;
    Ok(Json(ApiResponse::success(detail)))
}

/// POST /api/admin/products
pub async fn create(State(state): State<ServerState>, form: FormData) -> ActionOutcome<Product> {
    state.actions.add_product(form.product_form()).await
}

/// POST /api/admin/products/{id}
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    form: FormData,
) -> ActionOutcome<Product> {
    state.actions.update_product(&id, form.product_form()).await
}

/// PUT /api/admin/products/{id}/availability
pub async fn set_availability(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<AvailabilityUpdate>,
) -> ActionOutcome<Product> {
    state
        .actions
        .toggle_product_availability(&id, payload.is_available_for_purchase)
        .await
}

/// DELETE /api/admin/products/{id}
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> ActionOutcome<Product> {
    state.actions.delete_product(&id).await
}
