//! Orders API (read-only)

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/admin/orders", get(handler::list))
}
