//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.

pub mod error;
pub mod expense;
pub mod petty_cash;
pub mod report;
pub mod user;

pub use error::RepositoryError;
pub use expense::ExpenseRepository;
pub use petty_cash::PettyCashRepository;
pub use report::ReportRepository;
pub use user::UserRepository;
