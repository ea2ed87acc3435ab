//! Report repository: loads rows and hands them to the aggregator.

use ledgerly_core::reports::{ExpenseSummary, PettyCashSummary, ReportService};
use sea_orm::DatabaseConnection;

use super::error::RepositoryError;
use super::{ExpenseRepository, PettyCashRepository};

/// Repository for summary reports.
#[derive(Debug, Clone)]
pub struct ReportRepository {
    expenses: ExpenseRepository,
    petty_cash: PettyCashRepository,
}

impl ReportRepository {
    /// Creates a new report repository.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            expenses: ExpenseRepository::new(db.clone()),
            petty_cash: PettyCashRepository::new(db),
        }
    }

    /// Total and per-category expense sums over live expenses.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails or a sum overflows.
    pub async fn expense_summary(&self) -> Result<ExpenseSummary, RepositoryError> {
        let rows = self.expenses.category_amounts().await?;
        Ok(ReportService::expense_summary(rows)?)
    }

    /// Credits, debits, and balance over live transactions.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row has an unknown type.
    pub async fn petty_cash_summary(&self) -> Result<PettyCashSummary, RepositoryError> {
        let totals = self.petty_cash.get_totals().await?;
        Ok(ReportService::petty_cash_summary(totals))
    }
}
