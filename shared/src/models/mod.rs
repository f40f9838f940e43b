//! Data models shared between the admin server and its clients
//!
//! Row types derive `sqlx::FromRow` when the `db` feature is enabled.
//! Ids are UUID v4 strings, timestamps are Unix millis.

pub mod category;
pub mod dashboard;
pub mod order;
pub mod product;
pub mod user;

pub use category::*;
pub use dashboard::*;
pub use order::*;
pub use product::*;
pub use user::*;
