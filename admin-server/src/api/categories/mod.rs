//! Category API

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/admin/categories", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/slug-suggestion", get(handler::slug_suggestion))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .post(handler::update)
                .delete(handler::delete),
        )
}
