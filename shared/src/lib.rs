//! Shared types for the shop admin
//!
//! Common types used by the admin server and its clients: the unified
//! error system, the `ApiResponse` envelope, and the entity/listing models.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};
