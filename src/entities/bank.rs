use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// `llx_bank`: bank ledger lines backing the financial overview.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "llx_bank")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub rowid: i64,
    pub label: Option<String>,
    pub amount: f64,
    pub datev: Option<Date>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
