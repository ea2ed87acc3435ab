//! Report output types.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;

/// Total expenses and per-category sums.
///
/// Categories with no recorded expenses are absent from `by_category`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExpenseSummary {
    /// Sum of every expense amount.
    pub total_expenses: Decimal,
    /// Category name to summed amount.
    pub by_category: BTreeMap<String, Decimal>,
}

/// Cash box flow totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PettyCashSummary {
    /// Sum of credit amounts.
    pub total_credits: Decimal,
    /// Sum of debit amounts.
    pub total_debits: Decimal,
    /// Credits minus debits.
    pub balance: Decimal,
}
