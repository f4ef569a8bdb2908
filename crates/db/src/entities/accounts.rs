//! `SeaORM` Entity for accounts table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "accounts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub email: Option<String>,
    #[sea_orm(unique)]
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub password_reset_required: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::abstracts::Entity")]
    Abstracts,
    #[sea_orm(has_many = "super::revenues::Entity")]
    Revenues,
    #[sea_orm(has_many = "super::expenses::Entity")]
    Expenses,
}

impl Related<super::abstracts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Abstracts.def()
    }
}

impl Related<super::revenues::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Revenues.def()
    }
}

impl Related<super::expenses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Expenses.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
