//! Thin client for the Dolibarr REST API.

use reqwest::StatusCode;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::AppConfig;
use crate::errors::ServiceError;
use crate::models::DolibarrProduct;

const API_KEY_HEADER: &str = "DOLAPIKEY";

#[derive(Clone)]
pub struct DolibarrClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl DolibarrClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, ServiceError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ServiceError::InternalError(format!("HTTP client setup failed: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
        })
    }

    pub fn from_config(cfg: &AppConfig) -> Result<Self, ServiceError> {
        Self::new(
            cfg.dolibarr_api_url.clone(),
            cfg.dolibarr_key().map(str::to_string),
            Duration::from_secs(cfg.http_timeout_secs),
        )
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/api/index.php/{}", self.base_url, path)
    }

    /// GET with the API key; on a non-success status, retried once without
    /// the key (the demo ERP sometimes accepts anonymous reads).
    async fn get_json(&self, path: &str) -> Result<Value, ServiceError> {
        let url = self.endpoint(path);

        let mut request = self.client.get(&url);
        if let Some(key) = &self.api_key {
            request = request.header(API_KEY_HEADER, key);
        }

        let response = request.send().await?;
        if response.status().is_success() {
            return Ok(response.json().await?);
        }

        let first_status = response.status();
        if self.api_key.is_some() {
            warn!(
                status = first_status.as_u16(),
                path, "Keyed ERP request failed, retrying anonymously"
            );
            let retry = self.client.get(&url).send().await?;
            if retry.status().is_success() {
                return Ok(retry.json().await?);
            }
            debug!(status = retry.status().as_u16(), path, "Anonymous retry failed");
        }

        Err(upstream_error(first_status, path))
    }

    async fn post_json(&self, path: &str, payload: &Value) -> Result<Value, ServiceError> {
        let mut request = self.client.post(self.endpoint(path)).json(payload);
        if let Some(key) = &self.api_key {
            request = request.header(API_KEY_HEADER, key);
        }

        let response = request.send().await?;
        if response.status().is_success() {
            Ok(response.json().await?)
        } else {
            Err(upstream_error(response.status(), path))
        }
    }

    pub async fn list_products(&self) -> Result<Vec<DolibarrProduct>, ServiceError> {
        let value = self.get_json("products").await?;
        serde_json::from_value(value)
            .map_err(|e| ServiceError::SerializationError(format!("ERP product list: {e}")))
    }

    pub async fn get_product(&self, product_id: i64) -> Result<DolibarrProduct, ServiceError> {
        let value = self.get_json(&format!("products/{product_id}")).await?;
        serde_json::from_value(value)
            .map_err(|e| ServiceError::SerializationError(format!("ERP product: {e}")))
    }

    /// Creates a sales order; the payload passes through untouched.
    pub async fn create_order(&self, payload: &Value) -> Result<Value, ServiceError> {
        self.post_json("orders", payload).await
    }

    /// Creates a third party (customer); the payload passes through untouched.
    pub async fn create_thirdparty(&self, payload: &Value) -> Result<Value, ServiceError> {
        self.post_json("thirdparties", payload).await
    }
}

fn upstream_error(status: StatusCode, path: &str) -> ServiceError {
    ServiceError::ExternalApiError(format!("Dolibarr API returned {status} for {path}"))
}
