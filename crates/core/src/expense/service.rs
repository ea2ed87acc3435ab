//! Expense validation service.

use super::types::CreateExpenseInput;
use crate::error::DomainError;
use crate::petty_cash::PettyCashService;

/// Pure validation for expenses.
pub struct ExpenseService;

impl ExpenseService {
    /// Validates an expense before it is persisted.
    ///
    /// The amount is checked before the category.
    ///
    /// # Errors
    ///
    /// - `DomainError::InvalidAmount` if the amount is not positive
    /// - `DomainError::MissingCategory` if the category is empty or blank
    pub fn validate(input: &CreateExpenseInput) -> Result<(), DomainError> {
        PettyCashService::validate_amount(input.amount)?;

        if input.category.trim().is_empty() {
            return Err(DomainError::MissingCategory);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn expense(amount: Decimal, category: &str) -> CreateExpenseInput {
        CreateExpenseInput {
            title: "Team lunch".to_string(),
            amount,
            category: category.to_string(),
            user_id: Uuid::nil(),
            petty_cash_transaction_id: None,
        }
    }

    #[test]
    fn test_valid_expense() {
        assert!(ExpenseService::validate(&expense(dec!(42.50), "Food")).is_ok());
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("\t\n")]
    fn test_missing_category(#[case] category: &str) {
        let result = ExpenseService::validate(&expense(dec!(10), category));
        assert!(matches!(result, Err(DomainError::MissingCategory)));
    }

    #[test]
    fn test_amount_checked_before_category() {
        let result = ExpenseService::validate(&expense(dec!(0), ""));
        assert!(matches!(result, Err(DomainError::InvalidAmount)));
    }

    proptest! {
        #[test]
        fn prop_non_positive_amount_is_invalid(
            cents in -10_000_000i64..=0,
            category in "[A-Za-z]{0,12}",
        ) {
            let result = ExpenseService::validate(&expense(Decimal::new(cents, 2), &category));
            prop_assert!(matches!(result, Err(DomainError::InvalidAmount)));
        }

        #[test]
        fn prop_empty_category_is_missing(cents in 1i64..10_000_000) {
            let result = ExpenseService::validate(&expense(Decimal::new(cents, 2), ""));
            prop_assert!(matches!(result, Err(DomainError::MissingCategory)));
        }
    }
}
