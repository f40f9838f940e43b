//! Unified error codes for the shop admin
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 6xxx: Catalog errors (products, categories)
//! - 65xx: File upload errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,

    // ==================== 6xxx: Catalog ====================
    /// Product is referenced by orders
    ProductHasOrders = 6004,
    /// Category not found
    CategoryNotFound = 6101,
    /// Category has products
    CategoryHasProducts = 6102,
    /// Category slug already in use
    SlugAlreadyExists = 6103,

    // ==================== 65xx: File Upload ====================
    /// File too large
    FileTooLarge = 6501,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",

            // Catalog
            ErrorCode::ProductHasOrders => "Product has existing orders",
            ErrorCode::CategoryNotFound => "Category not found",
            ErrorCode::CategoryHasProducts => "Category has products",
            ErrorCode::SlugAlreadyExists => "Slug is already in use",

            // File Upload
            ErrorCode::FileTooLarge => "File is too large",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),

            // Catalog
            6004 => Ok(ErrorCode::ProductHasOrders),
            6101 => Ok(ErrorCode::CategoryNotFound),
            6102 => Ok(ErrorCode::CategoryHasProducts),
            6103 => Ok(ErrorCode::SlugAlreadyExists),

            // File Upload
            6501 => Ok(ErrorCode::FileTooLarge),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_roundtrips_through_u16() {
        for code in [
            ErrorCode::Success,
            ErrorCode::ValidationFailed,
            ErrorCode::NotFound,
            ErrorCode::AlreadyExists,
            ErrorCode::InvalidRequest,
            ErrorCode::ProductHasOrders,
            ErrorCode::CategoryNotFound,
            ErrorCode::CategoryHasProducts,
            ErrorCode::SlugAlreadyExists,
            ErrorCode::FileTooLarge,
            ErrorCode::InternalError,
            ErrorCode::DatabaseError,
        ] {
            assert_eq!(ErrorCode::try_from(code.code()), Ok(code));
        }
    }

    #[test]
    fn test_unknown_code_rejected() {
        assert_eq!(ErrorCode::try_from(4242), Err(InvalidErrorCode(4242)));
        // Retired codes are not accepted back
        assert_eq!(ErrorCode::try_from(1), Err(InvalidErrorCode(1)));
        assert_eq!(ErrorCode::try_from(6001), Err(InvalidErrorCode(6001)));
    }

    #[test]
    fn test_serde_as_number() {
        let json = serde_json::to_string(&ErrorCode::SlugAlreadyExists).unwrap();
        assert_eq!(json, "6103");
        let back: ErrorCode = serde_json::from_str("6102").unwrap();
        assert_eq!(back, ErrorCode::CategoryHasProducts);
    }
}
