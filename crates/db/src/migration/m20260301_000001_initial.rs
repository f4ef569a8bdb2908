//! Initial schema: accounts, catalogs, budget plans and the ledger.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Accounts::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Accounts::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Accounts::Name).string().not_null())
                    .col(ColumnDef::new(Accounts::Email).string().null())
                    .col(
                        ColumnDef::new(Accounts::Username)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Accounts::PasswordHash).string().not_null())
                    .col(
                        ColumnDef::new(Accounts::PasswordResetRequired)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(timestamp_col(Accounts::CreatedAt))
                    .col(timestamp_col(Accounts::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ExpenseCategories::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(ExpenseCategories::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(ExpenseCategories::AccountId).uuid().not_null())
                    .col(ColumnDef::new(ExpenseCategories::Name).string().not_null())
                    .col(timestamp_col(ExpenseCategories::CreatedAt))
                    .col(timestamp_col(ExpenseCategories::UpdatedAt))
                    .col(
                        ColumnDef::new(ExpenseCategories::DeletedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_expense_categories_account")
                            .from(ExpenseCategories::Table, ExpenseCategories::AccountId)
                            .to(Accounts::Table, Accounts::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PaymentOptions::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(PaymentOptions::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(PaymentOptions::AccountId).uuid().not_null())
                    .col(ColumnDef::new(PaymentOptions::Name).string().not_null())
                    .col(timestamp_col(PaymentOptions::CreatedAt))
                    .col(timestamp_col(PaymentOptions::UpdatedAt))
                    .col(
                        ColumnDef::new(PaymentOptions::DeletedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_payment_options_account")
                            .from(PaymentOptions::Table, PaymentOptions::AccountId)
                            .to(Accounts::Table, Accounts::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Abstracts::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Abstracts::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Abstracts::AccountId).uuid().not_null())
                    .col(ColumnDef::new(Abstracts::Name).string().not_null())
                    .col(ColumnDef::new(Abstracts::Month).integer().not_null())
                    .col(ColumnDef::new(Abstracts::Year).integer().not_null())
                    .col(
                        ColumnDef::new(Abstracts::PlannedRevenue)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Abstracts::Notes).json().not_null())
                    .col(timestamp_col(Abstracts::CreatedAt))
                    .col(timestamp_col(Abstracts::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_abstracts_account")
                            .from(Abstracts::Table, Abstracts::AccountId)
                            .to(Accounts::Table, Accounts::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("uq_abstracts_account_period")
                    .table(Abstracts::Table)
                    .col(Abstracts::AccountId)
                    .col(Abstracts::Year)
                    .col(Abstracts::Month)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(AbstractExpensePlans::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AbstractExpensePlans::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(AbstractExpensePlans::AbstractId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AbstractExpensePlans::CategoryId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AbstractExpensePlans::Planned)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_expense_plans_abstract")
                            .from(AbstractExpensePlans::Table, AbstractExpensePlans::AbstractId)
                            .to(Abstracts::Table, Abstracts::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_expense_plans_category")
                            .from(AbstractExpensePlans::Table, AbstractExpensePlans::CategoryId)
                            .to(ExpenseCategories::Table, ExpenseCategories::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("uq_expense_plans_abstract_category")
                    .table(AbstractExpensePlans::Table)
                    .col(AbstractExpensePlans::AbstractId)
                    .col(AbstractExpensePlans::CategoryId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Revenues::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Revenues::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Revenues::AccountId).uuid().not_null())
                    .col(ColumnDef::new(Revenues::Month).integer().not_null())
                    .col(ColumnDef::new(Revenues::Year).integer().not_null())
                    .col(ColumnDef::new(Revenues::Day).integer().not_null())
                    .col(ColumnDef::new(Revenues::Amount).big_integer().not_null())
                    .col(ColumnDef::new(Revenues::Description).string().not_null())
                    .col(ColumnDef::new(Revenues::PaymentOptionId).uuid().null())
                    .col(timestamp_col(Revenues::CreatedAt))
                    .col(timestamp_col(Revenues::UpdatedAt))
                    .col(
                        ColumnDef::new(Revenues::DeletedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_revenues_account")
                            .from(Revenues::Table, Revenues::AccountId)
                            .to(Accounts::Table, Accounts::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_revenues_payment_option")
                            .from(Revenues::Table, Revenues::PaymentOptionId)
                            .to(PaymentOptions::Table, PaymentOptions::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_revenues_account_period")
                    .table(Revenues::Table)
                    .col(Revenues::AccountId)
                    .col(Revenues::Year)
                    .col(Revenues::Month)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Expenses::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Expenses::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Expenses::AccountId).uuid().not_null())
                    .col(ColumnDef::new(Expenses::Month).integer().not_null())
                    .col(ColumnDef::new(Expenses::Year).integer().not_null())
                    .col(ColumnDef::new(Expenses::Day).integer().not_null())
                    .col(ColumnDef::new(Expenses::Amount).big_integer().not_null())
                    .col(ColumnDef::new(Expenses::Description).string().not_null())
                    .col(ColumnDef::new(Expenses::CategoryId).uuid().null())
                    .col(ColumnDef::new(Expenses::PaymentOptionId).uuid().null())
                    .col(
                        ColumnDef::new(Expenses::Fixed)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Expenses::Metadata).json().not_null())
                    .col(timestamp_col(Expenses::CreatedAt))
                    .col(timestamp_col(Expenses::UpdatedAt))
                    .col(
                        ColumnDef::new(Expenses::DeletedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_expenses_account")
                            .from(Expenses::Table, Expenses::AccountId)
                            .to(Accounts::Table, Accounts::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_expenses_category")
                            .from(Expenses::Table, Expenses::CategoryId)
                            .to(ExpenseCategories::Table, ExpenseCategories::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_expenses_payment_option")
                            .from(Expenses::Table, Expenses::PaymentOptionId)
                            .to(PaymentOptions::Table, PaymentOptions::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_expenses_account_period")
                    .table(Expenses::Table)
                    .col(Expenses::AccountId)
                    .col(Expenses::Year)
                    .col(Expenses::Month)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Expenses::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Revenues::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AbstractExpensePlans::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Abstracts::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PaymentOptions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ExpenseCategories::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Accounts::Table).to_owned())
            .await?;
        Ok(())
    }
}

fn timestamp_col<T: IntoIden>(col: T) -> ColumnDef {
    ColumnDef::new(col)
        .timestamp_with_time_zone()
        .not_null()
        .to_owned()
}

#[derive(DeriveIden)]
enum Accounts {
    Table,
    Id,
    Name,
    Email,
    Username,
    PasswordHash,
    PasswordResetRequired,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum ExpenseCategories {
    Table,
    Id,
    AccountId,
    Name,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}

#[derive(DeriveIden)]
enum PaymentOptions {
    Table,
    Id,
    AccountId,
    Name,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}

#[derive(DeriveIden)]
enum Abstracts {
    Table,
    Id,
    AccountId,
    Name,
    Month,
    Year,
    PlannedRevenue,
    Notes,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum AbstractExpensePlans {
    Table,
    Id,
    AbstractId,
    CategoryId,
    Planned,
}

#[derive(DeriveIden)]
enum Revenues {
    Table,
    Id,
    AccountId,
    Month,
    Year,
    Day,
    Amount,
    Description,
    PaymentOptionId,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}

#[derive(DeriveIden)]
enum Expenses {
    Table,
    Id,
    AccountId,
    Month,
    Year,
    Day,
    Amount,
    Description,
    CategoryId,
    PaymentOptionId,
    Fixed,
    Metadata,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}
