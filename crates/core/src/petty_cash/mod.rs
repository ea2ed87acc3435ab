//! Petty cash box logic.
//!
//! This module implements:
//! - Transaction types (credit inflow, debit outflow)
//! - Balance calculation from credit and debit totals
//! - Amount positivity and debit sufficiency validation

pub mod service;
pub mod types;

#[cfg(test)]
mod service_props;

pub use service::PettyCashService;
pub use types::{
    CashTotals, CreateCashTransactionInput, MAX_AMOUNT, MAX_AMOUNT_SCALE, TransactionType,
    checked_sum,
};
