use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// `llx_user`: ERP users; individual shop customers are modelled as users
/// attached to the retail third party.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "llx_user")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub rowid: i64,
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub email: Option<String>,
    pub user_mobile: Option<String>,
    pub datec: Option<DateTime>,
    pub fk_soc: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
