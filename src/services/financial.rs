//! Financial overview straight from the bank ledger.

use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder};
use std::sync::Arc;
use tracing::instrument;

use crate::entities::{bank, Bank};
use crate::errors::ServiceError;
use crate::models::{EntryType, FinancialEntry};

#[derive(Clone)]
pub struct FinancialService {
    db: Arc<DatabaseConnection>,
}

impl FinancialService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Bank entries newest first, tagged revenue/expense by sign.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<FinancialEntry>, ServiceError> {
        let rows = Bank::find()
            .order_by_desc(bank::Column::Datev)
            .all(&*self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|row| FinancialEntry {
                id: row.rowid,
                label: row.label.unwrap_or_default(),
                entry_type: EntryType::from_amount(row.amount),
                amount: row.amount,
                date: row.datev,
            })
            .collect())
    }
}
