//! Product listing and detail, ERP-API first with a relational fallback.
//!
//! Classification and filtering always run through [`crate::catalog`], so
//! both paths tag rows identically.

use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use std::sync::Arc;
use tracing::{instrument, warn};

use crate::catalog::ProductFilter;
use crate::clients::DolibarrClient;
use crate::entities::{product, Product};
use crate::errors::ServiceError;
use crate::models::ProductView;

/// Products visible to the shop live in the primary ERP entity.
const SHOP_ENTITY: i32 = 1;

#[derive(Clone)]
pub struct ProductService {
    db: Arc<DatabaseConnection>,
    erp: Arc<DolibarrClient>,
}

impl ProductService {
    pub fn new(db: Arc<DatabaseConnection>, erp: Arc<DolibarrClient>) -> Self {
        Self { db, erp }
    }

    /// Lists products matching the filter, preferring the ERP API.
    #[instrument(skip(self))]
    pub async fn list(&self, filter: &ProductFilter) -> Result<Vec<ProductView>, ServiceError> {
        match self.erp.list_products().await {
            Ok(raw) => Ok(raw
                .into_iter()
                .map(ProductView::from)
                .filter(|p| filter.matches(p))
                .collect()),
            Err(err) => {
                warn!(error = %err, "ERP product list unavailable, reading the schema directly");
                self.list_from_db(filter).await
            }
        }
    }

    /// Fetches one product, preferring the ERP API.
    #[instrument(skip(self))]
    pub async fn get(&self, product_id: i64) -> Result<ProductView, ServiceError> {
        match self.erp.get_product(product_id).await {
            Ok(raw) => Ok(raw.into()),
            Err(err) => {
                warn!(
                    error = %err,
                    product_id, "ERP product fetch unavailable, reading the schema directly"
                );
                self.get_from_db(product_id).await
            }
        }
    }

    async fn list_from_db(&self, filter: &ProductFilter) -> Result<Vec<ProductView>, ServiceError> {
        let rows = Product::find()
            .filter(product::Column::Entity.eq(SHOP_ENTITY))
            .all(&*self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(row_to_view)
            .filter(|p| filter.matches(p))
            .collect())
    }

    async fn get_from_db(&self, product_id: i64) -> Result<ProductView, ServiceError> {
        let row = Product::find_by_id(product_id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Product {product_id} not found")))?;

        Ok(row_to_view(row))
    }
}

fn row_to_view(row: product::Model) -> ProductView {
    ProductView::from_parts(
        row.rowid,
        row.reference,
        row.label,
        row.description.unwrap_or_default(),
        row.price,
    )
}
