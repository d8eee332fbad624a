use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use crate::errors::ApiError;
use crate::handlers::common::{map_service_error, success_response};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct UpdateStockRequest {
    pub stock: Option<f64>,
}

/// Product with its summed on-hand stock.
pub async fn get_stock(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let stock = state
        .services
        .stock
        .get(id)
        .await
        .map_err(map_service_error)?;

    Ok(success_response(stock))
}

/// Set the on-hand quantity for a product.
pub async fn update_stock(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateStockRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let quantity = payload.stock.ok_or_else(|| ApiError::BadRequest {
        message: "Missing stock quantity".to_string(),
    })?;

    state
        .services
        .stock
        .set(id, quantity)
        .await
        .map_err(map_service_error)?;

    Ok(success_response(serde_json::json!({
        "success": true,
        "message": "Stock updated"
    })))
}
