//! `SeaORM` entity definitions.

pub mod abstract_expense_plans;
pub mod abstracts;
pub mod accounts;
pub mod expense_categories;
pub mod expenses;
pub mod payment_options;
pub mod revenues;

pub mod prelude {
    //! Entity re-exports.
    pub use super::abstract_expense_plans::Entity as AbstractExpensePlans;
    pub use super::abstracts::Entity as Abstracts;
    pub use super::accounts::Entity as Accounts;
    pub use super::expense_categories::Entity as ExpenseCategories;
    pub use super::expenses::Entity as Expenses;
    pub use super::payment_options::Entity as PaymentOptions;
    pub use super::revenues::Entity as Revenues;
}
