//! Checkout: turns the session cart into a customer + order pair via the
//! facade. The cart is cleared only after the order call succeeds; any
//! failure leaves it intact.

use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
    Extension, Form, Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::info;
use validator::Validate;

use crate::errors::ApiError;
use crate::handlers::common::{map_service_error, validate_input};
use crate::session::SessionId;

use super::cart::build_cart_page;
use super::ShopState;

#[derive(Debug, Deserialize, Validate)]
pub struct CheckoutForm {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub address: String,
    pub phone: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct OrderConfirmation {
    pub order: Value,
}

/// Checkout form page; an empty cart bounces back to the landing page.
pub async fn checkout_page(
    State(state): State<ShopState>,
    Extension(session): Extension<SessionId>,
) -> Response {
    if state.sessions.cart(session).is_empty() {
        return Redirect::to("/").into_response();
    }

    Json(build_cart_page(&state, session).await).into_response()
}

pub async fn submit_checkout(
    State(state): State<ShopState>,
    Extension(session): Extension<SessionId>,
    Form(form): Form<CheckoutForm>,
) -> Result<Json<OrderConfirmation>, ApiError> {
    // Reject an empty cart before touching any upstream API.
    let cart = state.sessions.cart(session);
    if cart.is_empty() {
        return Err(ApiError::BadRequest {
            message: "Your cart is empty".to_string(),
        });
    }

    validate_input(&form)?;

    let customer_payload = json!({
        "name": form.name,
        "email": form.email,
        "address": form.address,
        "phone": form.phone,
    });
    let customer = state
        .facade
        .create_customer(&customer_payload)
        .await
        .map_err(map_service_error)?;

    let customer_id = extract_id(&customer).ok_or_else(|| {
        ApiError::ServiceError(crate::errors::ServiceError::ExternalApiError(
            "Customer creation response carried no id".to_string(),
        ))
    })?;

    let items: Vec<Value> = cart
        .lines()
        .map(|(product_id, quantity)| {
            json!({ "product_id": product_id, "quantity": quantity })
        })
        .collect();

    let order_payload = json!({
        "customer_id": customer_id,
        "items": items,
        "status": "draft",
    });

    let order = state
        .facade
        .create_order(&order_payload)
        .await
        .map_err(map_service_error)?;

    // Order accepted: only now does the cart go away.
    state.sessions.clear_cart(session);
    info!(customer_id, "Checkout completed");

    Ok(Json(OrderConfirmation { order }))
}

/// Pulls an id out of an ERP/facade creation response: either a bare
/// number, a numeric string, or an object with an `id` member.
pub fn extract_id(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        Value::Object(map) => map.get("id").and_then(extract_id),
        _ => None,
    }
}
