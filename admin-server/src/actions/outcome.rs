//! Terminal outcome of a form submission

use crate::validation::FieldErrors;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use shared::error::{ApiResponse, AppError, ErrorCode};
use std::fmt::Display;

/// Every mutation ends in exactly one of these
#[derive(Debug, Clone, PartialEq)]
pub enum ActionOutcome<T> {
    Success {
        entity: T,
    },
    /// Input was malformed; recoverable field by field
    ValidationFailure {
        field_errors: FieldErrors,
    },
    /// Input was fine but a domain rule refused it
    BusinessRuleFailure {
        code: ErrorCode,
        message: String,
    },
    NotFound {
        resource: String,
    },
    /// Unexpected persistence or filesystem error; `message` is generic
    ServerFailure {
        message: String,
    },
}

impl<T> ActionOutcome<T> {
    pub fn success(entity: T) -> Self {
        ActionOutcome::Success { entity }
    }

    pub fn business_rule(code: ErrorCode, message: impl Into<String>) -> Self {
        ActionOutcome::BusinessRuleFailure {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        ActionOutcome::NotFound {
            resource: resource.into(),
        }
    }

    /// Log the underlying error and hide it behind a generic message
    ///
    /// `doing` completes "A server error occurred while ...".
    pub fn server_failure(doing: &str, err: impl Display) -> Self {
        tracing::error!(error = %err, "Server error while {doing}");
        ActionOutcome::ServerFailure {
            message: format!("A server error occurred while {doing}."),
        }
    }

    pub fn into_entity(self) -> Option<T> {
        match self {
            ActionOutcome::Success { entity } => Some(entity),
            _ => None,
        }
    }

    /// Failure as an API error; `None` for `Success`
    pub fn to_app_error(&self) -> Option<AppError> {
        match self {
            ActionOutcome::Success { .. } => None,
            ActionOutcome::ValidationFailure { field_errors } => Some(
                AppError::new(ErrorCode::ValidationFailed).with_detail(
                    "fieldErrors",
                    serde_json::to_value(field_errors).unwrap_or_default(),
                ),
            ),
            ActionOutcome::BusinessRuleFailure { code, message } => {
                Some(AppError::business_rule(*code, message.clone()))
            }
            ActionOutcome::NotFound { resource } => Some(AppError::not_found(resource.clone())),
            ActionOutcome::ServerFailure { message } => Some(AppError::with_message(
                ErrorCode::InternalError,
                message.clone(),
            )),
        }
    }
}

impl<T> From<FieldErrors> for ActionOutcome<T> {
    fn from(field_errors: FieldErrors) -> Self {
        ActionOutcome::ValidationFailure { field_errors }
    }
}

impl<T: Serialize> IntoResponse for ActionOutcome<T> {
    fn into_response(self) -> Response {
        match self.to_app_error() {
            Some(err) => err.into_response(),
            None => match self.into_entity() {
                Some(entity) => ApiResponse::success(entity).into_response(),
                None => ApiResponse::<()>::ok().into_response(),
            },
        }
    }
}
