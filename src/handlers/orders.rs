use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use serde_json::Value;

use crate::errors::ApiError;
use crate::handlers::common::{map_service_error, success_response};
use crate::AppState;

/// All orders with their line items, newest first.
pub async fn list_orders(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let orders = state
        .services
        .orders
        .list()
        .await
        .map_err(map_service_error)?;

    Ok(success_response(orders))
}

/// One order with its line items.
pub async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let order = state
        .services
        .orders
        .get(id)
        .await
        .map_err(map_service_error)?;

    Ok(success_response(order))
}

/// Create an order in the ERP; the body passes through untouched.
pub async fn create_order(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> Result<impl IntoResponse, ApiError> {
    let created = state
        .services
        .orders
        .create(&payload)
        .await
        .map_err(map_service_error)?;

    Ok(success_response(created))
}
