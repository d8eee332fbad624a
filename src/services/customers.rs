//! Customer reads from the relational schema; creation forwards to the ERP
//! thirdparties API.

use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use serde_json::Value;
use std::sync::Arc;
use tracing::instrument;

use crate::clients::DolibarrClient;
use crate::entities::{user, User};
use crate::errors::ServiceError;
use crate::models::CustomerView;

/// Individual shop customers hang off the retail third party.
const RETAIL_COMPANY_ID: i64 = 2;

#[derive(Clone)]
pub struct CustomerService {
    db: Arc<DatabaseConnection>,
    erp: Arc<DolibarrClient>,
}

impl CustomerService {
    pub fn new(db: Arc<DatabaseConnection>, erp: Arc<DolibarrClient>) -> Self {
        Self { db, erp }
    }

    /// Individual customers, ordered by name. The ERP superadmin (rowid 1)
    /// is never a customer.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<CustomerView>, ServiceError> {
        let rows = User::find()
            .filter(user::Column::Rowid.gt(1))
            .filter(user::Column::FkSoc.eq(RETAIL_COMPANY_ID))
            .order_by_asc(user::Column::Lastname)
            .order_by_asc(user::Column::Firstname)
            .all(&*self.db)
            .await?;

        Ok(rows.into_iter().map(row_to_view).collect())
    }

    /// Forwards the customer payload to the ERP.
    #[instrument(skip(self, payload))]
    pub async fn create(&self, payload: &Value) -> Result<Value, ServiceError> {
        self.erp.create_thirdparty(payload).await
    }
}

fn row_to_view(row: user::Model) -> CustomerView {
    let name = format!(
        "{} {}",
        row.firstname.as_deref().unwrap_or_default(),
        row.lastname.as_deref().unwrap_or_default()
    )
    .trim()
    .to_string();

    CustomerView {
        id: row.rowid,
        name,
        email: row.email,
        phone: row.user_mobile,
        since: row.datec,
    }
}
