//! Expense recording rules.

pub mod service;
pub mod types;

pub use service::ExpenseService;
pub use types::CreateExpenseInput;
