//! HTTP API
//!
//! - [`health`] - liveness
//! - [`dashboard`] - dashboard cards
//! - [`categories`] - categories CRUD + slug helper
//! - [`products`] - products CRUD + availability toggle
//! - [`orders`], [`users`] - read-only listings
//! - [`images`] - product image files
//!
//! Form submissions are multipart ([`form::FormData`]); outcomes of
//! mutations map to HTTP through [`crate::actions::ActionOutcome`].

pub mod form;

pub mod categories;
pub mod dashboard;
pub mod health;
pub mod images;
pub mod orders;
pub mod products;
pub mod users;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::core::ServerState;

/// Every route, without middleware or state
pub fn build_router(image_dir: &str) -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        .merge(dashboard::router())
        .merge(categories::router())
        .merge(products::router())
        .merge(orders::router())
        .merge(users::router())
        .merge(images::router(image_dir))
}

/// Routes plus middleware, bound to `state`
///
/// Used by the HTTP server and by in-process tests.
pub fn build_app(state: &ServerState) -> Router {
    build_router(&state.config.image_dir)
        .layer(DefaultBodyLimit::max(state.config.max_upload_bytes))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state.clone())
}
