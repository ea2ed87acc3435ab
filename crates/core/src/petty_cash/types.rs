//! Domain types for petty cash transactions.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::ParseTagError;
use crate::error::DomainError;

/// Largest accepted amount: 999,999,999,999.99.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(276_447_231, 23_283, 0, false, 2);

/// Amounts are whole cents.
pub const MAX_AMOUNT_SCALE: u32 = 2;

/// Direction of a cash box movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    /// Cash added to the box.
    Credit,
    /// Cash taken from the box.
    Debit,
}

impl TransactionType {
    /// Returns the storage representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Credit => "credit",
            Self::Debit => "debit",
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = ParseTagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "credit" => Ok(Self::Credit),
            "debit" => Ok(Self::Debit),
            other => Err(ParseTagError::new("transaction type", other)),
        }
    }
}

/// Input for recording a cash box transaction.
#[derive(Debug, Clone)]
pub struct CreateCashTransactionInput {
    /// Credit or debit.
    pub transaction_type: TransactionType,
    /// Amount moved; must be positive.
    pub amount: Decimal,
    /// Free-form description.
    pub description: String,
    /// Owner, taken from the authenticated session.
    pub user_id: Uuid,
}

/// Credit and debit sums over live transactions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CashTotals {
    /// Sum of all credit amounts.
    pub credits: Decimal,
    /// Sum of all debit amounts.
    pub debits: Decimal,
}

impl CashTotals {
    /// Derived balance: credits minus debits.
    #[must_use]
    pub fn balance(&self) -> Decimal {
        self.credits - self.debits
    }

    /// Adds one movement to the running sums.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Internal` if a sum overflows.
    pub fn record(&mut self, kind: TransactionType, amount: Decimal) -> Result<(), DomainError> {
        let sum = match kind {
            TransactionType::Credit => &mut self.credits,
            TransactionType::Debit => &mut self.debits,
        };
        *sum = checked_sum(*sum, amount)?;
        Ok(())
    }
}

/// Adds two amounts, reporting overflow instead of panicking.
///
/// # Errors
///
/// Returns `DomainError::Internal` on overflow.
pub fn checked_sum(total: Decimal, amount: Decimal) -> Result<Decimal, DomainError> {
    total
        .checked_add(amount)
        .ok_or_else(|| DomainError::Internal(format!("amount total overflowed adding {amount}")))
}
