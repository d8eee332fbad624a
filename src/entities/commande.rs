use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// `llx_commande`: sales order headers.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "llx_commande")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub rowid: i64,
    #[sea_orm(column_name = "ref")]
    pub reference: String,
    pub fk_soc: i64,
    pub date_commande: Option<DateTime>,
    pub fk_statut: i32,
    pub total_ttc: f64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::societe::Entity",
        from = "Column::FkSoc",
        to = "super::societe::Column::Rowid"
    )]
    Societe,
    #[sea_orm(has_many = "super::commande_det::Entity")]
    CommandeDet,
}

impl Related<super::societe::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Societe.def()
    }
}

impl Related<super::commande_det::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CommandeDet.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
