use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// `llx_product`: the ERP product catalog.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "llx_product")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub rowid: i64,
    #[sea_orm(column_name = "ref")]
    pub reference: String,
    pub label: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub price: f64,
    pub entity: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::product_stock::Entity")]
    ProductStock,
    #[sea_orm(has_many = "super::commande_det::Entity")]
    CommandeDet,
}

impl Related<super::product_stock::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProductStock.def()
    }
}

impl Related<super::commande_det::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CommandeDet.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
