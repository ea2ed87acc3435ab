//! Expense repository.

use chrono::Utc;
use ledgerly_core::{
    DomainError,
    expense::{CreateExpenseInput, ExpenseService},
};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use tracing::debug;
use uuid::Uuid;

use super::error::RepositoryError;
use crate::entities::{expenses, petty_cash_transactions};

/// Repository for expenses.
#[derive(Debug, Clone)]
pub struct ExpenseRepository {
    db: DatabaseConnection,
}

impl ExpenseRepository {
    /// Creates a new expense repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Validates and records an expense.
    ///
    /// # Errors
    ///
    /// - `InvalidAmount` or `MissingCategory` from validation
    /// - `LinkedTransactionNotFound` if the linked cash transaction is absent or deleted
    /// - `Database` if the store fails
    pub async fn create_expense(
        &self,
        input: CreateExpenseInput,
    ) -> Result<expenses::Model, RepositoryError> {
        ExpenseService::validate(&input)?;

        if let Some(link) = input.petty_cash_transaction_id {
            let linked = petty_cash_transactions::Entity::find_by_id(link)
                .filter(petty_cash_transactions::Column::DeletedAt.is_null())
                .one(&self.db)
                .await?;
            if linked.is_none() {
                return Err(DomainError::LinkedTransactionNotFound(link).into());
            }
        }

        let now = Utc::now().into();
        let model = expenses::ActiveModel {
            id: Set(Uuid::now_v7()),
            title: Set(input.title),
            amount: Set(input.amount),
            category: Set(input.category),
            user_id: Set(input.user_id),
            petty_cash_transaction_id: Set(input.petty_cash_transaction_id),
            created_at: Set(now),
            updated_at: Set(now),
            deleted_at: Set(None),
        }
        .insert(&self.db)
        .await?;

        debug!(expense_id = %model.id, category = %model.category, "expense recorded");
        Ok(model)
    }

    /// Lists live expenses with their linked cash transaction, newest first.
    ///
    /// `owner` restricts the list to one user.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_expenses(
        &self,
        owner: Option<Uuid>,
    ) -> Result<Vec<(expenses::Model, Option<petty_cash_transactions::Model>)>, DbErr> {
        let mut query = expenses::Entity::find().filter(expenses::Column::DeletedAt.is_null());
        if let Some(user_id) = owner {
            query = query.filter(expenses::Column::UserId.eq(user_id));
        }
        query
            .order_by_desc(expenses::Column::CreatedAt)
            .order_by_desc(expenses::Column::Id)
            .find_also_related(petty_cash_transactions::Entity)
            .all(&self.db)
            .await
    }

    /// `(category, amount)` pairs for every live expense.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn category_amounts(&self) -> Result<Vec<(String, Decimal)>, DbErr> {
        expenses::Entity::find()
            .select_only()
            .column(expenses::Column::Category)
            .column(expenses::Column::Amount)
            .filter(expenses::Column::DeletedAt.is_null())
            .into_tuple()
            .all(&self.db)
            .await
    }

    /// Marks an expense deleted. Returns false if it was absent or already deleted.
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails.
    pub async fn soft_delete(&self, id: Uuid) -> Result<bool, DbErr> {
        let existing = expenses::Entity::find_by_id(id)
            .filter(expenses::Column::DeletedAt.is_null())
            .one(&self.db)
            .await?;
        let Some(existing) = existing else {
            return Ok(false);
        };

        let now = Utc::now().into();
        let mut model: expenses::ActiveModel = existing.into();
        model.deleted_at = Set(Some(now));
        model.updated_at = Set(now);
        model.update(&self.db).await?;
        Ok(true)
    }
}
