use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// `llx_societe`: third parties (customers and suppliers).
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "llx_societe")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub rowid: i64,
    pub nom: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::commande::Entity")]
    Commande,
}

impl Related<super::commande::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Commande.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
