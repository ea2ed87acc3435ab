//! Report aggregation service.

use rust_decimal::Decimal;

use super::types::{ExpenseSummary, PettyCashSummary};
use crate::error::DomainError;
use crate::petty_cash::{CashTotals, checked_sum};

/// Service for building summary reports from stored rows.
pub struct ReportService;

impl ReportService {
    /// Aggregates `(category, amount)` rows into an expense summary.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Internal` if a sum overflows.
    pub fn expense_summary<I>(rows: I) -> Result<ExpenseSummary, DomainError>
    where
        I: IntoIterator<Item = (String, Decimal)>,
    {
        let mut summary = ExpenseSummary::default();
        for (category, amount) in rows {
            summary.total_expenses = checked_sum(summary.total_expenses, amount)?;
            let entry = summary.by_category.entry(category).or_insert(Decimal::ZERO);
            *entry = checked_sum(*entry, amount)?;
        }
        Ok(summary)
    }

    /// Builds the cash flow summary from credit and debit totals.
    #[must_use]
    pub fn petty_cash_summary(totals: CashTotals) -> PettyCashSummary {
        PettyCashSummary {
            total_credits: totals.credits,
            total_debits: totals.debits,
            balance: totals.balance(),
        }
    }
}
