use axum::{extract::State, response::IntoResponse};

use crate::errors::ApiError;
use crate::handlers::common::{map_service_error, success_response};
use crate::AppState;

/// Bank ledger entries, newest first.
pub async fn list_financial(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let entries = state
        .services
        .financial
        .list()
        .await
        .map_err(map_service_error)?;

    Ok(success_response(entries))
}
