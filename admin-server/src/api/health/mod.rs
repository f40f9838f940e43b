//! Health check
//!
//! | Path | Method | Meaning |
//! |------|--------|---------|
//! | /health | GET | liveness + database ping |

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/health", get(health))
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// healthy | degraded
    status: &'static str,
    version: &'static str,
    /// ok | error
    database: &'static str,
}

pub async fn health(State(state): State<ServerState>) -> Json<HealthResponse> {
    let db_ok = state.db.ping().await;
    Json(HealthResponse {
        status: if db_ok { "healthy" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        database: if db_ok { "ok" } else { "error" },
    })
}
