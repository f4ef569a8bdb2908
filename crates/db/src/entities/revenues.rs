//! `SeaORM` Entity for revenues table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "revenues")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub account_id: Uuid,
    pub month: i32,
    pub year: i32,
    pub day: i32,
    pub amount: i64,
    pub description: String,
    pub payment_option_id: Option<Uuid>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
    pub deleted_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::accounts::Entity",
        from = "Column::AccountId",
        to = "super::accounts::Column::Id"
    )]
    Accounts,
    #[sea_orm(
        belongs_to = "super::payment_options::Entity",
        from = "Column::PaymentOptionId",
        to = "super::payment_options::Column::Id"
    )]
    PaymentOptions,
}

impl Related<super::accounts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Accounts.def()
    }
}

impl Related<super::payment_options::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PaymentOptions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
