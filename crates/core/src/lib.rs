//! Core business logic for Ledgerly.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `auth` - Roles, permissions, the authorization evaluator, password hashing
//! - `petty_cash` - Cash box transactions, balance, debit sufficiency
//! - `expense` - Expense validation
//! - `reports` - Expense and cash flow aggregation
//! - `error` - The domain error taxonomy

pub mod auth;
pub mod error;
pub mod expense;
pub mod petty_cash;
pub mod reports;

pub use error::DomainError;
