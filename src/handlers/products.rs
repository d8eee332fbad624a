use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
};

use crate::catalog::FilterParams;
use crate::errors::ApiError;
use crate::handlers::common::{map_service_error, success_response};
use crate::AppState;

/// List products, optionally filtered by search/season/category.
pub async fn list_products(
    State(state): State<AppState>,
    Query(params): Query<FilterParams>,
) -> Result<impl IntoResponse, ApiError> {
    let filter = params.into();
    let products = state
        .services
        .products
        .list(&filter)
        .await
        .map_err(map_service_error)?;

    Ok(success_response(products))
}

/// Fetch one product by id.
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let product = state
        .services
        .products
        .get(id)
        .await
        .map_err(map_service_error)?;

    Ok(success_response(product))
}
