//! Shared HTTP plumbing: the response envelope, domain error mapping and
//! the validating JSON extractor.

pub mod validated_json;

use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::domain::DomainError;

pub use validated_json::ValidatedJson;

/// Standard API response envelope
///
/// Success: `{"success": true, "data": {...}}`,
/// failure: `{"success": false, "data": null, "error": "..."}`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Payload of operations that only confirm
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

pub type ApiReply<T> = (StatusCode, Json<ApiResponse<T>>);
pub type ApiResult<T> = Result<ApiReply<T>, ApiReply<T>>;

pub fn ok<T>(data: T) -> ApiResult<T> {
    Ok((StatusCode::OK, Json(ApiResponse::success(data))))
}

pub fn created<T>(data: T) -> ApiResult<T> {
    Ok((StatusCode::CREATED, Json(ApiResponse::success(data))))
}

pub fn status_for(err: &DomainError) -> StatusCode {
    match err {
        DomainError::Validation { .. } | DomainError::Conflict(_) => StatusCode::BAD_REQUEST,
        DomainError::NotFound(_) => StatusCode::NOT_FOUND,
        DomainError::Forbidden(_) => StatusCode::FORBIDDEN,
        DomainError::Operation(_) | DomainError::Storage(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// Map a domain error onto the envelope. Server-side failures are logged
/// and answered without detail.
pub fn domain_error<T>(err: DomainError) -> ApiReply<T> {
    let status = status_for(&err);
    let message = match &err {
        DomainError::Storage(_) => {
            error!(error = %err, "Storage failure");
            "Internal server error".to_string()
        }
        DomainError::Operation(_) => {
            error!(error = %err, "Operation rolled back");
            "Operation failed, no changes were saved".to_string()
        }
        _ => err.to_string(),
    };
    (status, Json(ApiResponse::error(message)))
}

/// 400 reply for a path segment that is not an integer id
pub fn invalid_path<T>(field: &'static str) -> ApiReply<T> {
    domain_error(DomainError::validation(field, "must be a positive integer"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_follow_error_kind() {
        assert_eq!(
            status_for(&DomainError::validation("endTime", "bad")),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_for(&DomainError::Conflict("x".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_for(&DomainError::NotFound("x".into())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_for(&DomainError::Forbidden("x".into())),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            status_for(&DomainError::Operation("x".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn storage_detail_is_not_leaked() {
        let (status, Json(body)) =
            domain_error::<()>(DomainError::Storage("disk I/O error at page 7".into()));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error.as_deref(), Some("Internal server error"));
        assert!(!body.success);
    }

    #[test]
    fn envelope_serializes_without_error_on_success() {
        let json = serde_json::to_value(ApiResponse::success(1)).unwrap();
        assert_eq!(json, serde_json::json!({"success": true, "data": 1}));
    }
}
