//! SeaORM entity modules for the monthly finance tracker.
//!
//! Every row is owned by a user (`user_id`) and, except for categories,
//! belongs to a calendar period identified by `year` and `month`.

pub mod category;
pub mod expense;
pub mod monthly_income;
pub mod report;

pub mod prelude {
    //! A prelude module for easy importing of all entities.
    pub use super::category::Entity as Category;
    pub use super::expense::Entity as Expense;
    pub use super::expense::ExpenseType;
    pub use super::monthly_income::Entity as MonthlyIncome;
    pub use super::report::Entity as Report;
}
