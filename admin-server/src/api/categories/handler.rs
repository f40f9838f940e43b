//! Category API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use serde_json::Value;

use crate::actions::ActionOutcome;
use crate::api::form::FormData;
use crate::cache::View;
use crate::core::ServerState;
use crate::db::repository::category;
use crate::slug;
use shared::error::{ApiResponse, AppError, AppResult};
use shared::models::{Category, SlugSuggestion};

/// GET /api/admin/categories - categories table (cached)
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<ApiResponse<Value>>> {
    let pool = state.db.pool.clone();
    let body = state
        .cache
        .get_or_compute(View::Categories, || async move {
            let rows = category::list_summaries(&pool).await?;
            serde_json::to_value(rows).map_err(|e| AppError::internal(e.to_string()))
        })
        .await?;
    Ok(Json(ApiResponse::success((*body).clone())))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlugQuery {
    #[serde(default)]
    pub name: String,
    pub current_slug: Option<String>,
}

/// GET /api/admin/categories/slug-suggestion?name=&currentSlug=
pub async fn slug_suggestion(
    State(state): State<ServerState>,
    Query(query): Query<SlugQuery>,
) -> AppResult<Json<ApiResponse<SlugSuggestion>>> {
    let existing = category::all_slugs(&state.db.pool).await?;
    let slug = slug::resolve_unique(
        &slug::normalize(&query.name),
        &existing,
        query.current_slug.as_deref(),
    );
    Ok(Json(ApiResponse::success(SlugSuggestion { slug })))
}

/// GET /api/admin/categories/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<Category>>> {
    let category = category::find_by_id(&state.db.pool, &id)
        .await?
        .ok_or_else(|| AppError::not_found("Category"))?;
    Ok(Json(ApiResponse::success(category)))
}

/// POST /api/admin/categories
pub async fn create(State(state): State<ServerState>, form: FormData) -> ActionOutcome<Category> {
    state.actions.add_category(form.category_form()).await
}

/// POST /api/admin/categories/{id}
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    form: FormData,
) -> ActionOutcome<Category> {
    state.actions.update_category(&id, form.category_form()).await
}

/// DELETE /api/admin/categories/{id}
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> ActionOutcome<Category> {
    state.actions.delete_category(&id).await
}
