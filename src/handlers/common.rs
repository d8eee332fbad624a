use crate::errors::{ApiError, ServiceError};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use validator::Validate;

/// Standard success response
pub fn success_response<T: Serialize>(data: T) -> Response {
    (StatusCode::OK, Json(data)).into_response()
}

/// Validate request input
pub fn validate_input<T: Validate>(input: &T) -> Result<(), ApiError> {
    input.validate().map_err(|e| ApiError::ValidationError(format!("Validation failed: {}", e)))
}

/// Map service errors to API errors
pub fn map_service_error(err: ServiceError) -> ApiError {
    match err {
        ServiceError::NotFound(msg) => ApiError::NotFound(msg),
        ServiceError::ValidationError(msg) => ApiError::ValidationError(msg),
        ServiceError::AuthError(_) => ApiError::Unauthorized,
        ServiceError::InvalidOperation(msg) => ApiError::BadRequest { message: msg },
        other => ApiError::ServiceError(other),
    }
}
