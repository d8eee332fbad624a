//! Back office service: operator login plus stock management straight
//! against the relational schema (no facade hop).

use axum::{
    extract::State,
    middleware,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
    Extension, Form, Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::errors::ApiError;
use crate::handlers::common::map_service_error;
use crate::services::StockService;
use crate::session::{session_middleware, SessionId, SessionStore};

#[derive(Clone)]
pub struct BackofficeState {
    pub config: AppConfig,
    pub sessions: SessionStore,
    pub stock: Arc<StockService>,
}

impl BackofficeState {
    pub fn new(config: AppConfig, stock: Arc<StockService>) -> Self {
        Self {
            config,
            sessions: SessionStore::new(),
            stock,
        }
    }
}

pub fn backoffice_routes() -> Router<BackofficeState> {
    Router::new()
        .route("/admin/login", get(login_page).post(login))
        .route("/admin/logout", get(logout))
        .route("/admin", get(dashboard))
        .route("/admin/products", get(products))
        .route("/admin/stock/update", post(update_stock))
        .layer(middleware::from_fn(session_middleware))
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStockBody {
    pub product_id: Option<i64>,
    pub stock: Option<f64>,
}

fn ensure_operator(state: &BackofficeState, session: SessionId) -> Result<(), Response> {
    if state.sessions.is_operator(session) {
        Ok(())
    } else {
        Err(Redirect::to("/admin/login").into_response())
    }
}

async fn login_page() -> Json<serde_json::Value> {
    Json(json!({ "page": "admin_login" }))
}

async fn login(
    State(state): State<BackofficeState>,
    Extension(session): Extension<SessionId>,
    Form(form): Form<LoginForm>,
) -> Result<Redirect, ApiError> {
    if state
        .config
        .operator_credentials_match(&form.username, &form.password)
    {
        state.sessions.set_operator(session, true);
        info!("Operator logged in");
        Ok(Redirect::to("/admin"))
    } else {
        warn!("Failed operator login attempt");
        Err(ApiError::Unauthorized)
    }
}

async fn logout(
    State(state): State<BackofficeState>,
    Extension(session): Extension<SessionId>,
) -> Redirect {
    state.sessions.set_operator(session, false);
    Redirect::to("/admin/login")
}

async fn dashboard(
    State(state): State<BackofficeState>,
    Extension(session): Extension<SessionId>,
) -> Response {
    if let Err(redirect) = ensure_operator(&state, session) {
        return redirect;
    }

    Json(json!({ "page": "admin_dashboard" })).into_response()
}

/// Products with their stock, straight from the schema.
async fn products(
    State(state): State<BackofficeState>,
    Extension(session): Extension<SessionId>,
) -> Response {
    if let Err(redirect) = ensure_operator(&state, session) {
        return redirect;
    }

    match state.stock.list().await {
        Ok(rows) => Json(rows).into_response(),
        Err(err) => map_service_error(err).into_response(),
    }
}

/// Direct stock write: `{ "product_id": ..., "stock": ... }`.
async fn update_stock(
    State(state): State<BackofficeState>,
    Extension(session): Extension<SessionId>,
    Json(payload): Json<UpdateStockBody>,
) -> Response {
    if let Err(redirect) = ensure_operator(&state, session) {
        return redirect;
    }

    let (product_id, quantity) = match (payload.product_id, payload.stock) {
        (Some(product_id), Some(quantity)) => (product_id, quantity),
        _ => {
            return ApiError::BadRequest {
                message: "Both product_id and stock are required".to_string(),
            }
            .into_response()
        }
    };

    match state.stock.set(product_id, quantity).await {
        Ok(()) => Json(json!({ "success": true, "message": "Stock updated" })).into_response(),
        Err(err) => map_service_error(err).into_response(),
    }
}
