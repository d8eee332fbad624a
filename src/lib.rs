//! Verger API Library
//!
//! Three thin services over a Dolibarr ERP: a REST facade normalizing
//! product/order/customer data, a storefront carrying the session cart, and
//! a back office editing stock against the schema directly.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

// Core modules
pub mod backoffice;
pub mod cart;
pub mod catalog;
pub mod clients;
pub mod config;
pub mod db;
pub mod entities;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod server;
pub mod services;
pub mod session;
pub mod storefront;

use axum::{routing::get, Router};
use sea_orm::DatabaseConnection;
use std::sync::Arc;

// App state definition
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub config: config::AppConfig,
    pub services: handlers::AppServices,
}

/// Routes served by the REST facade.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(|| async { "verger-api up" }))
        .route("/health", get(handlers::health::health_check))
        .route("/api/products", get(handlers::products::list_products))
        .route("/api/products/{id}", get(handlers::products::get_product))
        .route(
            "/api/stock/{id}",
            get(handlers::stock::get_stock).put(handlers::stock::update_stock),
        )
        .route(
            "/api/orders",
            get(handlers::orders::list_orders).post(handlers::orders::create_order),
        )
        .route("/api/orders/{id}", get(handlers::orders::get_order))
        .route(
            "/api/customers",
            get(handlers::customers::list_customers).post(handlers::customers::create_customer),
        )
        .route("/api/financial", get(handlers::financial::list_financial))
}
