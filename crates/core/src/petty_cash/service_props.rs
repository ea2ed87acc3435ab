//! Property-based tests for the petty cash service.

use proptest::prelude::*;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::service::PettyCashService;
use super::types::{CreateCashTransactionInput, TransactionType};
use crate::error::DomainError;

/// Amounts in cents, converted to two-decimal values.
fn cents() -> impl Strategy<Value = Decimal> {
    (1i64..10_000_000).prop_map(|c| Decimal::new(c, 2))
}

fn non_positive() -> impl Strategy<Value = Decimal> {
    (-10_000_000i64..=0).prop_map(|c| Decimal::new(c, 2))
}

fn kind() -> impl Strategy<Value = TransactionType> {
    prop_oneof![Just(TransactionType::Credit), Just(TransactionType::Debit)]
}

fn input(kind: TransactionType, amount: Decimal) -> CreateCashTransactionInput {
    CreateCashTransactionInput {
        transaction_type: kind,
        amount,
        description: String::new(),
        user_id: Uuid::nil(),
    }
}

proptest! {
    /// Any non-positive amount fails with InvalidAmount whatever the type or balance.
    #[test]
    fn prop_non_positive_amount_is_invalid(
        kind in kind(),
        amount in non_positive(),
        balance in cents(),
    ) {
        let result = PettyCashService::validate_transaction(&input(kind, amount), balance);
        prop_assert!(matches!(result, Err(DomainError::InvalidAmount)));
    }

    /// Amounts finer than cents are rejected however small the excess digit.
    #[test]
    fn prop_sub_cent_amount_is_invalid(whole in cents(), extra in 1i64..10) {
        let amount = whole + Decimal::new(extra, 3);
        prop_assert!(matches!(
            PettyCashService::validate_amount(amount),
            Err(DomainError::InvalidAmount)
        ));
    }

    /// A debit larger than the balance is always rejected.
    #[test]
    fn prop_overdraft_is_rejected(balance in cents(), extra in cents()) {
        let result = PettyCashService::validate_transaction(
            &input(TransactionType::Debit, balance + extra),
            balance,
        );
        prop_assert!(matches!(result, Err(DomainError::InsufficientFunds)));
    }

    /// Applying only accepted transactions never drives the balance negative.
    #[test]
    fn prop_accepted_sequence_keeps_balance_non_negative(
        ops in prop::collection::vec((kind(), cents()), 0..50),
    ) {
        let mut accepted = Vec::new();
        for (kind, amount) in ops {
            let balance = PettyCashService::balance_from(accepted.clone()).unwrap();
            if PettyCashService::validate_transaction(&input(kind, amount), balance).is_ok() {
                accepted.push((kind, amount));
            }
        }
        prop_assert!(PettyCashService::balance_from(accepted).unwrap() >= Decimal::ZERO);
    }

    /// Balance equals credits minus debits, independent of order.
    #[test]
    fn prop_balance_is_order_independent(
        ops in prop::collection::vec((kind(), cents()), 0..50),
    ) {
        let forward = PettyCashService::totals_from(ops.clone()).unwrap();
        let mut reversed = ops;
        reversed.reverse();
        let backward = PettyCashService::totals_from(reversed).unwrap();
        prop_assert_eq!(forward, backward);
        prop_assert_eq!(forward.balance(), forward.credits - forward.debits);
    }
}
