use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// `llx_product_stock`: on-hand quantity per product and warehouse.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "llx_product_stock")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub rowid: i64,
    pub fk_product: i64,
    pub fk_entrepot: i64,
    pub reel: f64,
    pub tms: Option<DateTime>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::FkProduct",
        to = "super::product::Column::Rowid"
    )]
    Product,
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
