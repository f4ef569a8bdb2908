//! `SeaORM` Entity for planned expenses per category.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "abstract_expense_plans")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub abstract_id: Uuid,
    pub category_id: Uuid,
    pub planned: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::abstracts::Entity",
        from = "Column::AbstractId",
        to = "super::abstracts::Column::Id",
        on_delete = "Cascade"
    )]
    Abstracts,
    #[sea_orm(
        belongs_to = "super::expense_categories::Entity",
        from = "Column::CategoryId",
        to = "super::expense_categories::Column::Id"
    )]
    ExpenseCategories,
}

impl Related<super::abstracts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Abstracts.def()
    }
}

impl Related<super::expense_categories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ExpenseCategories.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
