//! Summary report aggregation.
//!
//! This module provides pure business logic for the two summaries:
//! - Expense totals grouped by category
//! - Petty cash flow (credits, debits, balance)

pub mod service;
pub mod types;


pub use service::ReportService;
pub use types::*;
