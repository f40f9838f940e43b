//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            // Success
            Self::Success => StatusCode::OK,

            // 404 Not Found
            Self::NotFound => StatusCode::NOT_FOUND,

            // 409 Conflict (business rules on otherwise valid input)
            Self::AlreadyExists
            | Self::SlugAlreadyExists
            | Self::CategoryHasProducts
            | Self::ProductHasOrders
            | Self::CategoryNotFound => StatusCode::CONFLICT,

            // 422 Unprocessable Entity (field-level validation)
            Self::ValidationFailed => StatusCode::UNPROCESSABLE_ENTITY,

            // 413 Payload Too Large
            Self::FileTooLarge => StatusCode::PAYLOAD_TOO_LARGE,

            // 500 Internal Server Error
            Self::InternalError | Self::DatabaseError => StatusCode::INTERNAL_SERVER_ERROR,

            // 400 Bad Request (malformed requests)
            Self::InvalidRequest => StatusCode::BAD_REQUEST,
        }
    }
}
