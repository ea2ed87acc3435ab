//! Domain types for expenses.

use rust_decimal::Decimal;
use uuid::Uuid;

/// Input for recording an expense.
#[derive(Debug, Clone)]
pub struct CreateExpenseInput {
    /// Short label.
    pub title: String,
    /// Amount spent; must be positive.
    pub amount: Decimal,
    /// Grouping key for reports; must not be blank.
    pub category: String,
    /// Owner, taken from the authenticated session.
    pub user_id: Uuid,
    /// Optional cash box withdrawal that funded this expense.
    pub petty_cash_transaction_id: Option<Uuid>,
}
