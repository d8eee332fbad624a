//! Order reads from the relational schema; order creation forwards to the
//! ERP API.

use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult, JoinType, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait,
};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::instrument;

use crate::clients::DolibarrClient;
use crate::entities::{commande, commande_det, product, societe, Commande, CommandeDet};
use crate::errors::ServiceError;
use crate::models::{OrderItemView, OrderView};

#[derive(Debug, FromQueryResult)]
struct OrderHeaderRow {
    id: i64,
    reference: String,
    customer_name: Option<String>,
    date: Option<chrono::NaiveDateTime>,
    status: i32,
    total: f64,
}

#[derive(Debug, FromQueryResult)]
struct OrderItemRow {
    order_id: i64,
    product_id: i64,
    product_name: String,
    quantity: f64,
    total: f64,
}

#[derive(Clone)]
pub struct OrderService {
    db: Arc<DatabaseConnection>,
    erp: Arc<DolibarrClient>,
}

impl OrderService {
    pub fn new(db: Arc<DatabaseConnection>, erp: Arc<DolibarrClient>) -> Self {
        Self { db, erp }
    }

    fn header_select() -> sea_orm::Select<Commande> {
        Commande::find()
            .select_only()
            .column_as(commande::Column::Rowid, "id")
            .column_as(commande::Column::Reference, "reference")
            .column_as(societe::Column::Nom, "customer_name")
            .column_as(commande::Column::DateCommande, "date")
            .column_as(commande::Column::FkStatut, "status")
            .column_as(commande::Column::TotalTtc, "total")
            .join(JoinType::InnerJoin, commande::Relation::Societe.def())
    }

    fn item_select() -> sea_orm::Select<CommandeDet> {
        CommandeDet::find()
            .select_only()
            .column_as(commande_det::Column::FkCommande, "order_id")
            .column_as(commande_det::Column::FkProduct, "product_id")
            .column_as(product::Column::Label, "product_name")
            .column_as(commande_det::Column::Qty, "quantity")
            .column_as(commande_det::Column::TotalTtc, "total")
            .join(JoinType::InnerJoin, commande_det::Relation::Product.def())
    }

    /// All orders with customer names and line items, newest first.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<OrderView>, ServiceError> {
        let headers = Self::header_select()
            .order_by_desc(commande::Column::DateCommande)
            .into_model::<OrderHeaderRow>()
            .all(&*self.db)
            .await?;

        let ids: Vec<i64> = headers.iter().map(|h| h.id).collect();
        let mut items_by_order = self.items_for(ids).await?;

        Ok(headers
            .into_iter()
            .map(|header| {
                let items = items_by_order.remove(&header.id).unwrap_or_default();
                into_view(header, items)
            })
            .collect())
    }

    /// One order with its line items.
    #[instrument(skip(self))]
    pub async fn get(&self, order_id: i64) -> Result<OrderView, ServiceError> {
        let header = Self::header_select()
            .filter(commande::Column::Rowid.eq(order_id))
            .into_model::<OrderHeaderRow>()
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Order {order_id} not found")))?;

        let mut items_by_order = self.items_for(vec![order_id]).await?;
        let items = items_by_order.remove(&order_id).unwrap_or_default();

        Ok(into_view(header, items))
    }

    /// Forwards the order request to the ERP.
    #[instrument(skip(self, payload))]
    pub async fn create(&self, payload: &Value) -> Result<Value, ServiceError> {
        self.erp.create_order(payload).await
    }

    async fn items_for(
        &self,
        order_ids: Vec<i64>,
    ) -> Result<HashMap<i64, Vec<OrderItemView>>, ServiceError> {
        if order_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = Self::item_select()
            .filter(commande_det::Column::FkCommande.is_in(order_ids))
            .into_model::<OrderItemRow>()
            .all(&*self.db)
            .await?;

        let mut by_order: HashMap<i64, Vec<OrderItemView>> = HashMap::new();
        for row in rows {
            by_order.entry(row.order_id).or_default().push(OrderItemView {
                product_id: row.product_id,
                product_name: row.product_name,
                quantity: row.quantity,
                total: row.total,
            });
        }

        Ok(by_order)
    }
}

fn into_view(header: OrderHeaderRow, items: Vec<OrderItemView>) -> OrderView {
    OrderView {
        id: header.id,
        reference: header.reference,
        customer_name: header.customer_name.unwrap_or_default(),
        date: header.date,
        status: header.status,
        total: header.total,
        items,
    }
}
