//! Petty cash repository.
//!
//! The balance is never stored. Every read sums live rows, and a debit reads
//! the balance and inserts inside one database transaction.

use std::sync::Arc;

use chrono::Utc;
use ledgerly_core::petty_cash::{
    CashTotals, CreateCashTransactionInput, PettyCashService, TransactionType,
};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use tokio::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

use super::error::RepositoryError;
use crate::entities::petty_cash_transactions;

/// Repository for cash box transactions.
#[derive(Debug, Clone)]
pub struct PettyCashRepository {
    db: DatabaseConnection,
    debit_lock: Option<Arc<Mutex<()>>>,
}

impl PettyCashRepository {
    /// Creates a new petty cash repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            debit_lock: None,
        }
    }

    /// Serializes debits through `lock`.
    ///
    /// Without it two concurrent debits may both pass the funds check against
    /// the same balance.
    #[must_use]
    pub fn with_debit_lock(mut self, lock: Arc<Mutex<()>>) -> Self {
        self.debit_lock = Some(lock);
        self
    }

    /// Validates and records a transaction.
    ///
    /// # Errors
    ///
    /// - `InvalidAmount` if the amount is not positive
    /// - `InsufficientFunds` if a debit exceeds the current balance; nothing is written
    /// - `Database` if the store fails
    pub async fn create_transaction(
        &self,
        input: CreateCashTransactionInput,
    ) -> Result<petty_cash_transactions::Model, RepositoryError> {
        PettyCashService::validate_amount(input.amount)?;

        let _guard = match (&self.debit_lock, input.transaction_type) {
            (Some(lock), TransactionType::Debit) => Some(lock.lock().await),
            _ => None,
        };

        let txn = self.db.begin().await?;

        let balance = match input.transaction_type {
            TransactionType::Debit => Self::totals_on(&txn).await?.balance(),
            TransactionType::Credit => Decimal::ZERO,
        };
        // Dropping txn on rejection rolls back.
        PettyCashService::validate_transaction(&input, balance)?;

        let now = Utc::now().into();
        let model = petty_cash_transactions::ActiveModel {
            id: Set(Uuid::now_v7()),
            transaction_type: Set(input.transaction_type.as_str().to_string()),
            amount: Set(input.amount),
            description: Set(input.description),
            user_id: Set(input.user_id),
            created_at: Set(now),
            updated_at: Set(now),
            deleted_at: Set(None),
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;

        debug!(
            transaction_id = %model.id,
            kind = %input.transaction_type,
            amount = %model.amount,
            "petty cash transaction recorded"
        );
        Ok(model)
    }

    /// Current balance: live credits minus live debits. Zero when empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row has an unknown type.
    pub async fn get_balance(&self) -> Result<Decimal, RepositoryError> {
        Ok(self.get_totals().await?.balance())
    }

    /// Credit and debit sums over live transactions.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row has an unknown type.
    pub async fn get_totals(&self) -> Result<CashTotals, RepositoryError> {
        Self::totals_on(&self.db).await
    }

    /// Lists live transactions, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_transactions(&self) -> Result<Vec<petty_cash_transactions::Model>, DbErr> {
        petty_cash_transactions::Entity::find()
            .filter(petty_cash_transactions::Column::DeletedAt.is_null())
            .order_by_desc(petty_cash_transactions::Column::CreatedAt)
            .order_by_desc(petty_cash_transactions::Column::Id)
            .all(&self.db)
            .await
    }

    /// Finds a live transaction by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<petty_cash_transactions::Model>, DbErr> {
        petty_cash_transactions::Entity::find_by_id(id)
            .filter(petty_cash_transactions::Column::DeletedAt.is_null())
            .one(&self.db)
            .await
    }

    /// Marks a transaction deleted. Returns false if it was absent or already deleted.
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails.
    pub async fn soft_delete(&self, id: Uuid) -> Result<bool, DbErr> {
        let Some(existing) = self.find_by_id(id).await? else {
            return Ok(false);
        };

        let now = Utc::now().into();
        let mut model: petty_cash_transactions::ActiveModel = existing.into();
        model.deleted_at = Set(Some(now));
        model.updated_at = Set(now);
        model.update(&self.db).await?;
        Ok(true)
    }

    async fn totals_on<C: ConnectionTrait>(conn: &C) -> Result<CashTotals, RepositoryError> {
        let rows: Vec<(String, Decimal)> = petty_cash_transactions::Entity::find()
            .select_only()
            .column(petty_cash_transactions::Column::TransactionType)
            .column(petty_cash_transactions::Column::Amount)
            .filter(petty_cash_transactions::Column::DeletedAt.is_null())
            .into_tuple()
            .all(conn)
            .await?;

        let parsed = rows
            .into_iter()
            .map(|(kind, amount)| {
                kind.parse::<TransactionType>()
                    .map(|k| (k, amount))
                    .map_err(|e| RepositoryError::CorruptRow(e.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(PettyCashService::totals_from(parsed)?)
    }
}
