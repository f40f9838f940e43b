//! Unified error system for the shop admin
//!
//! This module provides:
//! - [`ErrorCode`]: Standardized error codes for all error types
//! - [`ErrorCategory`]: Classification of errors by domain
//! - [`AppError`]: Rich error type with codes, messages, and details
//! - [`ApiResponse`]: Unified API response format
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 6xxx: Catalog errors (65xx: uploads)
//! - 9xxx: System errors
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorCode, ApiResponse};
//!
//! let err = AppError::new(ErrorCode::NotFound);
//!
//! let err = AppError::business_rule(ErrorCode::SlugAlreadyExists, "Slug 'kitap' is already in use")
//!     .with_detail("field", "slug");
//!
//! let response = ApiResponse::<()>::error(&err);
//! assert_eq!(response.code, Some(6103));
//! ```

mod category;
mod codes;
mod http;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{ApiResponse, AppError, AppResult};
