pub mod categories;
pub mod dashboard;
pub mod expenses;
pub mod health;
pub mod income;
pub mod reports;
pub mod summary;
