//! Storefront service: product pages, the session cart, checkout, and the
//! operator section — every data access goes through the REST facade.

pub mod admin;
pub mod cart;
pub mod checkout;
pub mod pages;
pub mod stock_csv;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::clients::FacadeClient;
use crate::config::AppConfig;
use crate::session::{session_middleware, SessionStore};

#[derive(Clone)]
pub struct ShopState {
    pub config: AppConfig,
    pub facade: Arc<FacadeClient>,
    pub sessions: SessionStore,
}

impl ShopState {
    pub fn new(config: AppConfig, facade: Arc<FacadeClient>) -> Self {
        Self {
            config,
            facade,
            sessions: SessionStore::new(),
        }
    }
}

pub fn storefront_routes() -> Router<ShopState> {
    Router::new()
        .route("/", get(pages::home))
        .route("/about", get(pages::about))
        .route("/markets", get(pages::markets))
        .route("/seasonal", get(pages::seasonal))
        .route("/demo_end", get(pages::demo_end))
        .route("/product/{id}", get(pages::product_detail))
        .route("/cart", get(cart::view_cart))
        .route("/add_to_cart", post(cart::add_to_cart))
        .route("/update_cart", post(cart::update_cart))
        .route("/remove_from_cart/{id}", get(cart::remove_from_cart))
        .route(
            "/checkout",
            get(checkout::checkout_page).post(checkout::submit_checkout),
        )
        .merge(admin::admin_routes())
        .layer(middleware::from_fn(session_middleware))
}
