//! Catalog-facing pages. Endpoints return the JSON view models the HTML
//! templates would render; a degraded facade yields the page's empty state
//! with an error message instead of failing the request.

use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use tracing::warn;

use crate::catalog::FilterParams;
use crate::errors::{ApiError, ServiceError};
use crate::handlers::common::map_service_error;
use crate::models::ProductView;

use super::ShopState;

#[derive(Debug, Serialize)]
pub struct HomePage {
    pub products: Vec<ProductView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct StaticPage {
    pub page: &'static str,
    pub title: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ProductPage {
    pub product: ProductView,
    pub stock: f64,
}

/// Landing page: the filtered product list.
pub async fn home(
    State(state): State<ShopState>,
    Query(params): Query<FilterParams>,
) -> Json<HomePage> {
    let filter = params.into();
    match state.facade.list_products(&filter).await {
        Ok(products) => Json(HomePage {
            products,
            error: None,
        }),
        Err(err) => {
            warn!(error = %err, "Facade unavailable while loading the product list");
            Json(HomePage {
                products: Vec::new(),
                error: Some("Unable to load products".to_string()),
            })
        }
    }
}

pub async fn about() -> Json<StaticPage> {
    Json(StaticPage {
        page: "about",
        title: "Notre Histoire",
    })
}

pub async fn markets() -> Json<StaticPage> {
    Json(StaticPage {
        page: "markets",
        title: "Nos Marchés",
    })
}

pub async fn seasonal() -> Json<StaticPage> {
    Json(StaticPage {
        page: "seasonal",
        title: "Produits de Saison",
    })
}

pub async fn demo_end() -> Json<StaticPage> {
    Json(StaticPage {
        page: "demo_end",
        title: "Fin de la démonstration",
    })
}

/// Product detail with its stock; a missing stock record reads as zero.
pub async fn product_detail(
    State(state): State<ShopState>,
    Path(product_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let id = product_id.to_string();
    let product = match state.facade.get_product(&id).await {
        Ok(product) => product,
        Err(ServiceError::NotFound(_)) => {
            return Err(ApiError::NotFound("Product not found".to_string()))
        }
        Err(err) => return Err(map_service_error(err)),
    };

    let stock = match state.facade.get_stock(&id).await {
        Ok(view) => view.stock,
        Err(err) => {
            warn!(error = %err, product_id, "Stock unavailable for product page");
            0.0
        }
    };

    Ok(Json(ProductPage { product, stock }))
}
