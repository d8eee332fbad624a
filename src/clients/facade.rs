//! Client for the REST facade, used by the storefront and the back office.

use reqwest::StatusCode;
use serde_json::Value;
use std::time::Duration;

use crate::catalog::ProductFilter;
use crate::config::AppConfig;
use crate::errors::ServiceError;
use crate::models::{OrderView, ProductView, StockView};

#[derive(Clone)]
pub struct FacadeClient {
    client: reqwest::Client,
    base_url: String,
}

impl FacadeClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ServiceError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ServiceError::InternalError(format!("HTTP client setup failed: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(cfg: &AppConfig) -> Result<Self, ServiceError> {
        Self::new(
            cfg.api_url.clone(),
            Duration::from_secs(cfg.http_timeout_secs),
        )
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/api/{}", self.base_url, path)
    }

    pub async fn list_products(
        &self,
        filter: &ProductFilter,
    ) -> Result<Vec<ProductView>, ServiceError> {
        let mut request = self.client.get(self.endpoint("products"));
        if let Some(search) = &filter.search {
            request = request.query(&[("search", search)]);
        }
        if let Some(season) = &filter.season {
            request = request.query(&[("season", season)]);
        }
        if let Some(category) = &filter.category {
            request = request.query(&[("category", category)]);
        }

        let response = request.send().await?;
        expect_success(response.status(), "products")?;
        Ok(response.json().await?)
    }

    pub async fn get_product(&self, product_id: &str) -> Result<ProductView, ServiceError> {
        let response = self
            .client
            .get(self.endpoint(&format!("products/{product_id}")))
            .send()
            .await?;
        expect_success(response.status(), "products/{id}")?;
        Ok(response.json().await?)
    }

    pub async fn get_stock(&self, product_id: &str) -> Result<StockView, ServiceError> {
        let response = self
            .client
            .get(self.endpoint(&format!("stock/{product_id}")))
            .send()
            .await?;
        expect_success(response.status(), "stock/{id}")?;
        Ok(response.json().await?)
    }

    pub async fn update_stock(&self, product_id: &str, stock: f64) -> Result<(), ServiceError> {
        let response = self
            .client
            .put(self.endpoint(&format!("stock/{product_id}")))
            .json(&serde_json::json!({ "stock": stock }))
            .send()
            .await?;
        expect_success(response.status(), "stock/{id}")
    }

    pub async fn list_orders(&self) -> Result<Vec<OrderView>, ServiceError> {
        let response = self.client.get(self.endpoint("orders")).send().await?;
        expect_success(response.status(), "orders")?;
        Ok(response.json().await?)
    }

    pub async fn create_order(&self, payload: &Value) -> Result<Value, ServiceError> {
        let response = self
            .client
            .post(self.endpoint("orders"))
            .json(payload)
            .send()
            .await?;
        expect_success(response.status(), "orders")?;
        Ok(response.json().await?)
    }

    pub async fn create_customer(&self, payload: &Value) -> Result<Value, ServiceError> {
        let response = self
            .client
            .post(self.endpoint("customers"))
            .json(payload)
            .send()
            .await?;
        expect_success(response.status(), "customers")?;
        Ok(response.json().await?)
    }
}

fn expect_success(status: StatusCode, path: &str) -> Result<(), ServiceError> {
    if status.is_success() {
        Ok(())
    } else if status == StatusCode::NOT_FOUND {
        Err(ServiceError::NotFound(format!(
            "Facade resource {path} not found"
        )))
    } else {
        Err(ServiceError::ExternalApiError(format!(
            "Facade returned {status} for {path}"
        )))
    }
}
