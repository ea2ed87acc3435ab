//! Petty cash validation service.

use rust_decimal::Decimal;

use super::types::{
    CashTotals, CreateCashTransactionInput, MAX_AMOUNT, MAX_AMOUNT_SCALE, TransactionType,
};
use crate::error::DomainError;

/// Pure validation and balance logic for the cash box.
///
/// Callers read the current balance from storage, run
/// [`PettyCashService::validate_transaction`], then persist.
pub struct PettyCashService;

impl PettyCashService {
    /// Accepts positive whole-cent amounts up to [`MAX_AMOUNT`].
    ///
    /// Trailing zeros do not count towards the scale, so `12.500` passes.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidAmount` if `amount <= 0`, if it exceeds
    /// [`MAX_AMOUNT`], or if it has more than two decimal places.
    pub fn validate_amount(amount: Decimal) -> Result<(), DomainError> {
        if amount <= Decimal::ZERO
            || amount > MAX_AMOUNT
            || amount.normalize().scale() > MAX_AMOUNT_SCALE
        {
            return Err(DomainError::InvalidAmount);
        }
        Ok(())
    }

    /// Validates a transaction against the current balance.
    ///
    /// The amount check runs first, so a non-positive debit reports
    /// `InvalidAmount` even when the box is empty. Credits never need funds.
    ///
    /// # Errors
    ///
    /// - `DomainError::InvalidAmount` if the amount is not positive
    /// - `DomainError::InsufficientFunds` if a debit exceeds `current_balance`
    pub fn validate_transaction(
        input: &CreateCashTransactionInput,
        current_balance: Decimal,
    ) -> Result<(), DomainError> {
        Self::validate_amount(input.amount)?;

        if input.transaction_type == TransactionType::Debit && current_balance < input.amount {
            return Err(DomainError::InsufficientFunds);
        }
        Ok(())
    }

    /// Folds `(type, amount)` pairs into credit and debit totals.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Internal` if a sum overflows.
    pub fn totals_from<I>(rows: I) -> Result<CashTotals, DomainError>
    where
        I: IntoIterator<Item = (TransactionType, Decimal)>,
    {
        let mut totals = CashTotals::default();
        for (kind, amount) in rows {
            totals.record(kind, amount)?;
        }
        Ok(totals)
    }

    /// Balance over `(type, amount)` pairs.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Internal` if a sum overflows.
    pub fn balance_from<I>(rows: I) -> Result<Decimal, DomainError>
    where
        I: IntoIterator<Item = (TransactionType, Decimal)>,
    {
        Ok(Self::totals_from(rows)?.balance())
    }
}
