//! Concurrent debit tests.
//!
//! With the debit lock enabled, concurrent withdrawals never overdraw the box.

use std::sync::Arc;

use futures::future::join_all;
use ledgerly_core::{
    DomainError,
    petty_cash::{CreateCashTransactionInput, TransactionType},
};
use ledgerly_db::{PettyCashRepository, RepositoryError, migration::Migrator};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sea_orm::Database;
use sea_orm_migration::MigratorTrait;
use tokio::sync::Mutex;
use uuid::Uuid;

fn debit(amount: Decimal) -> CreateCashTransactionInput {
    CreateCashTransactionInput {
        transaction_type: TransactionType::Debit,
        amount,
        description: "concurrent withdrawal".to_string(),
        user_id: Uuid::new_v4(),
    }
}

#[tokio::test]
async fn test_concurrent_debits_never_overdraw() {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to connect to database");
    Migrator::up(&db, None).await.expect("Failed to migrate");

    let repo = PettyCashRepository::new(db).with_debit_lock(Arc::new(Mutex::new(())));
    repo.create_transaction(CreateCashTransactionInput {
        transaction_type: TransactionType::Credit,
        amount: dec!(100),
        description: "float".to_string(),
        user_id: Uuid::new_v4(),
    })
    .await
    .expect("Failed to fund");

    let tasks = (0..20).map(|_| {
        let repo = repo.clone();
        tokio::spawn(async move { repo.create_transaction(debit(dec!(10))).await })
    });
    let results: Vec<_> = join_all(tasks)
        .await
        .into_iter()
        .map(|joined| joined.expect("task panicked"))
        .collect();

    let accepted = results.iter().filter(|r| r.is_ok()).count();
    let rejected = results
        .iter()
        .filter(|r| {
            matches!(
                r,
                Err(RepositoryError::Domain(DomainError::InsufficientFunds))
            )
        })
        .count();

    assert_eq!(accepted, 10);
    assert_eq!(rejected, 10);
    assert_eq!(repo.get_balance().await.unwrap(), Decimal::ZERO);
}
