//! Product image files

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

/// `GET /{image_dir}/{filename}`
pub fn router(image_dir: &str) -> Router<ServerState> {
    Router::new().route(&format!("/{image_dir}/{{filename}}"), get(handler::serve))
}
