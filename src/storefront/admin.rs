//! Operator section of the storefront: product and stock management plus
//! order review, everything through the facade. Unauthenticated requests
//! are redirected to the login page.

use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
    Extension, Form, Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{info, warn};

use crate::catalog::ProductFilter;
use crate::errors::ApiError;
use crate::handlers::common::map_service_error;
use crate::models::{OrderView, ProductView, StockView};
use crate::session::SessionId;

use super::stock_csv;
use super::ShopState;

pub fn admin_routes() -> Router<ShopState> {
    Router::new()
        .route("/admin/login", get(login_page).post(login))
        .route("/admin/logout", get(logout))
        .route("/admin", get(dashboard))
        .route("/admin/products", get(products))
        .route("/admin/stock", get(stock_overview))
        .route("/admin/stock/export", get(export_stock))
        .route("/admin/stock/import", post(import_stock))
        .route("/admin/stock/update/{id}", post(update_stock))
        .route("/admin/orders", get(orders))
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AdminListPage<T> {
    pub items: Vec<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStockBody {
    pub stock: Option<f64>,
}

/// Redirects to the login page unless the session carries the operator flag.
fn ensure_operator(state: &ShopState, session: SessionId) -> Result<(), Response> {
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
    State(state): State<ShopState>,
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
    State(state): State<ShopState>,
    Extension(session): Extension<SessionId>,
) -> Redirect {
    state.sessions.set_operator(session, false);
    Redirect::to("/")
}

async fn dashboard(
    State(state): State<ShopState>,
    Extension(session): Extension<SessionId>,
) -> Response {
    if let Err(redirect) = ensure_operator(&state, session) {
        return redirect;
    }

    Json(json!({ "page": "admin_dashboard" })).into_response()
}

async fn products(
    State(state): State<ShopState>,
    Extension(session): Extension<SessionId>,
) -> Response {
    if let Err(redirect) = ensure_operator(&state, session) {
        return redirect;
    }

    let page = match state.facade.list_products(&ProductFilter::default()).await {
        Ok(products) => AdminListPage::<ProductView> {
            items: products,
            error: None,
        },
        Err(err) => {
            warn!(error = %err, "Facade unavailable while loading admin products");
            AdminListPage {
                items: Vec::new(),
                error: Some("Unable to load products".to_string()),
            }
        }
    };

    Json(page).into_response()
}

/// Product list with per-product stock; products whose stock cannot be
/// resolved read as zero.
async fn stock_rows(state: &ShopState) -> Result<Vec<StockView>, ApiError> {
    let products = state
        .facade
        .list_products(&ProductFilter::default())
        .await
        .map_err(map_service_error)?;

    let mut rows = Vec::with_capacity(products.len());
    for product in products {
        let row = match state.facade.get_stock(&product.id.to_string()).await {
            Ok(view) => view,
            Err(err) => {
                warn!(error = %err, product_id = product.id, "Stock unavailable, reporting zero");
                StockView {
                    id: product.id,
                    reference: product.reference,
                    label: product.label,
                    price: product.price,
                    stock: 0.0,
                }
            }
        };
        rows.push(row);
    }

    Ok(rows)
}

async fn stock_overview(
    State(state): State<ShopState>,
    Extension(session): Extension<SessionId>,
) -> Response {
    if let Err(redirect) = ensure_operator(&state, session) {
        return redirect;
    }

    let page = match stock_rows(&state).await {
        Ok(items) => AdminListPage { items, error: None },
        Err(err) => {
            warn!(error = %err, "Facade unavailable while loading the stock overview");
            AdminListPage {
                items: Vec::new(),
                error: Some("Unable to load products and stock".to_string()),
            }
        }
    };

    Json(page).into_response()
}

async fn export_stock(
    State(state): State<ShopState>,
    Extension(session): Extension<SessionId>,
) -> Response {
    if let Err(redirect) = ensure_operator(&state, session) {
        return redirect;
    }

    let rows = match stock_rows(&state).await {
        Ok(rows) => rows,
        Err(err) => return err.into_response(),
    };

    match stock_csv::render(&rows) {
        Ok(body) => (
            [
                (header::CONTENT_TYPE, "text/csv"),
                (
                    header::CONTENT_DISPOSITION,
                    "attachment;filename=stock_export.csv",
                ),
            ],
            body,
        )
            .into_response(),
        Err(err) => ApiError::ServiceError(err).into_response(),
    }
}

/// Imports a stock CSV (request body, `ID,Nom,Prix,Stock`): every parsed
/// row updates stock by id via the facade.
async fn import_stock(
    State(state): State<ShopState>,
    Extension(session): Extension<SessionId>,
    body: String,
) -> Response {
    if let Err(redirect) = ensure_operator(&state, session) {
        return redirect;
    }

    let rows = stock_csv::parse(&body);
    if rows.is_empty() {
        return ApiError::BadRequest {
            message: "No usable rows in the CSV file".to_string(),
        }
        .into_response();
    }

    let mut updated = 0usize;
    for row in &rows {
        match state
            .facade
            .update_stock(&row.id.to_string(), row.stock)
            .await
        {
            Ok(()) => updated += 1,
            Err(err) => {
                warn!(error = %err, product_id = row.id, "Stock import row failed");
            }
        }
    }

    info!(updated, total = rows.len(), "Stock import finished");
    Json(json!({ "success": true, "updated": updated })).into_response()
}

async fn update_stock(
    State(state): State<ShopState>,
    Extension(session): Extension<SessionId>,
    Path(product_id): Path<i64>,
    Json(payload): Json<UpdateStockBody>,
) -> Response {
    if let Err(redirect) = ensure_operator(&state, session) {
        return redirect;
    }

    let quantity = match payload.stock {
        Some(quantity) => quantity,
        None => {
            return ApiError::BadRequest {
                message: "Missing stock quantity".to_string(),
            }
            .into_response()
        }
    };

    match state
        .facade
        .update_stock(&product_id.to_string(), quantity)
        .await
    {
        Ok(()) => Json(json!({ "success": true, "message": "Stock updated" })).into_response(),
        Err(err) => map_service_error(err).into_response(),
    }
}

async fn orders(
    State(state): State<ShopState>,
    Extension(session): Extension<SessionId>,
) -> Response {
    if let Err(redirect) = ensure_operator(&state, session) {
        return redirect;
    }

    let page = match state.facade.list_orders().await {
        Ok(orders) => AdminListPage::<OrderView> {
            items: orders,
            error: None,
        },
        Err(err) => {
            warn!(error = %err, "Facade unavailable while loading admin orders");
            AdminListPage {
                items: Vec::new(),
                error: Some("Unable to load orders".to_string()),
            }
        }
    };

    Json(page).into_response()
}
