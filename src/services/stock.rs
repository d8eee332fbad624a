//! Stock reads and writes, straight against the relational schema.

use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult, JoinType,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set, TransactionTrait,
};
use std::sync::Arc;
use tracing::{info, instrument};

use crate::entities::{product, product_stock, Product, ProductStock};
use crate::errors::ServiceError;
use crate::models::StockView;

/// Stock rows created by this service land in the default warehouse.
const DEFAULT_WAREHOUSE_ID: i64 = 1;

#[derive(Debug, FromQueryResult)]
struct StockRow {
    id: i64,
    reference: String,
    label: String,
    price: f64,
    stock: Option<f64>,
}

impl From<StockRow> for StockView {
    fn from(row: StockRow) -> Self {
        StockView {
            id: row.id,
            reference: row.reference,
            label: row.label,
            price: row.price,
            stock: row.stock.unwrap_or(0.0),
        }
    }
}

#[derive(Clone)]
pub struct StockService {
    db: Arc<DatabaseConnection>,
}

impl StockService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    fn stock_select() -> sea_orm::Select<Product> {
        Product::find()
            .select_only()
            .column_as(product::Column::Rowid, "id")
            .column_as(product::Column::Reference, "reference")
            .column_as(product::Column::Label, "label")
            .column_as(product::Column::Price, "price")
            .column_as(product_stock::Column::Reel.sum(), "stock")
            .join(JoinType::LeftJoin, product::Relation::ProductStock.def())
            .group_by(product::Column::Rowid)
            .group_by(product::Column::Reference)
            .group_by(product::Column::Label)
            .group_by(product::Column::Price)
    }

    /// One product with its stock summed across warehouses.
    #[instrument(skip(self))]
    pub async fn get(&self, product_id: i64) -> Result<StockView, ServiceError> {
        let row = Self::stock_select()
            .filter(product::Column::Rowid.eq(product_id))
            .into_model::<StockRow>()
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Product {product_id} not found")))?;

        Ok(row.into())
    }

    /// Every product with its stock, for the back office and CSV export.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<StockView>, ServiceError> {
        let rows = Self::stock_select()
            .order_by_asc(product::Column::Label)
            .into_model::<StockRow>()
            .all(&*self.db)
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Sets the on-hand quantity: updates existing stock rows or inserts one
    /// against the default warehouse.
    #[instrument(skip(self))]
    pub async fn set(&self, product_id: i64, quantity: f64) -> Result<(), ServiceError> {
        let txn = self.db.begin().await?;

        Product::find_by_id(product_id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Product {product_id} not found")))?;

        let existing = ProductStock::find()
            .filter(product_stock::Column::FkProduct.eq(product_id))
            .one(&txn)
            .await?;

        let now = Utc::now().naive_utc();
        if existing.is_some() {
            ProductStock::update_many()
                .col_expr(product_stock::Column::Reel, Expr::value(quantity))
                .col_expr(product_stock::Column::Tms, Expr::value(now))
                .filter(product_stock::Column::FkProduct.eq(product_id))
                .exec(&txn)
                .await?;
        } else {
            let entry = product_stock::ActiveModel {
                fk_product: Set(product_id),
                fk_entrepot: Set(DEFAULT_WAREHOUSE_ID),
                reel: Set(quantity),
                tms: Set(Some(now)),
                ..Default::default()
            };
            entry.insert(&txn).await?;
        }

        txn.commit().await?;

        info!(product_id, quantity, "Stock updated");
        Ok(())
    }
}
