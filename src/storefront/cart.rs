//! Session cart routes. Mutations redirect back to the cart page, as the
//! original form-driven flow did.

use axum::{
    extract::{Path, State},
    response::Redirect,
    Extension, Form, Json,
};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::errors::ApiError;
use crate::models::ProductView;
use crate::session::SessionId;

use super::ShopState;

#[derive(Debug, Serialize)]
pub struct CartLine {
    pub product: ProductView,
    pub quantity: i64,
    pub subtotal: f64,
}

#[derive(Debug, Serialize)]
pub struct CartPage {
    pub lines: Vec<CartLine>,
    pub total: f64,
}

#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: String,
    pub quantity: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub product_id: String,
    pub quantity: Option<i64>,
}

/// Builds the cart page: one line per entry, enriched with product data
/// from the facade. Products that can no longer be resolved are skipped.
pub async fn build_cart_page(state: &ShopState, session: SessionId) -> CartPage {
    let cart = state.sessions.cart(session);

    let mut lines = Vec::with_capacity(cart.len());
    let mut total = 0.0;
    for (product_id, quantity) in cart.lines() {
        match state.facade.get_product(product_id).await {
            Ok(product) => {
                let subtotal = product.price * quantity as f64;
                total += subtotal;
                lines.push(CartLine {
                    product,
                    quantity,
                    subtotal,
                });
            }
            Err(err) => {
                warn!(error = %err, product_id, "Skipping unresolvable cart line");
            }
        }
    }

    CartPage { lines, total }
}

pub async fn view_cart(
    State(state): State<ShopState>,
    Extension(session): Extension<SessionId>,
) -> Json<CartPage> {
    Json(build_cart_page(&state, session).await)
}

/// Increments the quantity for a product (default 1) and redirects to the
/// cart.
pub async fn add_to_cart(
    State(state): State<ShopState>,
    Extension(session): Extension<SessionId>,
    Form(form): Form<AddToCartForm>,
) -> Result<Redirect, ApiError> {
    let quantity = form.quantity.unwrap_or(1);
    if quantity < 1 {
        return Err(ApiError::BadRequest {
            message: "Quantity must be at least 1".to_string(),
        });
    }

    state
        .sessions
        .with_cart(session, |cart| cart.add(&form.product_id, quantity));

    Ok(Redirect::to("/cart"))
}

/// Sets an exact quantity; zero or less removes the line.
pub async fn update_cart(
    State(state): State<ShopState>,
    Extension(session): Extension<SessionId>,
    Form(form): Form<UpdateCartForm>,
) -> Redirect {
    let quantity = form.quantity.unwrap_or(0);
    state
        .sessions
        .with_cart(session, |cart| cart.set_quantity(&form.product_id, quantity));

    Redirect::to("/cart")
}

pub async fn remove_from_cart(
    State(state): State<ShopState>,
    Extension(session): Extension<SessionId>,
    Path(product_id): Path<String>,
) -> Redirect {
    state
        .sessions
        .with_cart(session, |cart| cart.remove(&product_id));

    Redirect::to("/cart")
}
