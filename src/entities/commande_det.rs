use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// `llx_commandedet`: sales order line items.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "llx_commandedet")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub rowid: i64,
    pub fk_commande: i64,
    pub fk_product: i64,
    pub qty: f64,
    pub total_ttc: f64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::commande::Entity",
        from = "Column::FkCommande",
        to = "super::commande::Column::Rowid"
    )]
    Commande,
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::FkProduct",
        to = "super::product::Column::Rowid"
    )]
    Product,
}

impl Related<super::commande::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Commande.def()
    }
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
