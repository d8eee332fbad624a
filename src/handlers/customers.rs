use axum::{extract::State, response::IntoResponse, Json};
use serde_json::Value;

use crate::errors::ApiError;
use crate::handlers::common::{map_service_error, success_response};
use crate::AppState;

/// Individual customers, ordered by name.
pub async fn list_customers(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let customers = state
        .services
        .customers
        .list()
        .await
        .map_err(map_service_error)?;

    Ok(success_response(customers))
}

/// Create a customer in the ERP; the body passes through untouched.
pub async fn create_customer(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> Result<impl IntoResponse, ApiError> {
    let created = state
        .services
        .customers
        .create(&payload)
        .await
        .map_err(map_service_error)?;

    Ok(success_response(created))
}
