//! Monthly budget plans ("abstracts").

pub mod error;
pub mod service;
pub mod types;

pub use error::BudgetError;
pub use service::BudgetService;
pub use types::{BudgetPlan, CreateBudgetPlanInput, Notes, PlannedExpense};
