//! Initial schema: users, petty cash transactions, expenses.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ============================================================
        // USERS
        // ============================================================
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Users::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Users::Username)
                            .string_len(255)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::PasswordHash).string().not_null())
                    .col(ColumnDef::new(Users::Role).string_len(32).not_null())
                    .col(timestamp(Users::CreatedAt))
                    .col(timestamp(Users::UpdatedAt))
                    .col(
                        ColumnDef::new(Users::DeletedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        // ============================================================
        // PETTY CASH TRANSACTIONS
        // ============================================================
        manager
            .create_table(
                Table::create()
                    .table(PettyCashTransactions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PettyCashTransactions::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(PettyCashTransactions::Type)
                            .string_len(16)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PettyCashTransactions::Amount)
                            .decimal_len(16, 4)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PettyCashTransactions::Description)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(PettyCashTransactions::UserId).uuid().not_null())
                    .col(timestamp(PettyCashTransactions::CreatedAt))
                    .col(timestamp(PettyCashTransactions::UpdatedAt))
                    .col(
                        ColumnDef::new(PettyCashTransactions::DeletedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_petty_cash_transactions_created_at")
                    .table(PettyCashTransactions::Table)
                    .col(PettyCashTransactions::CreatedAt)
                    .to_owned(),
            )
            .await?;

        // ============================================================
        // EXPENSES
        // ============================================================
        manager
            .create_table(
                Table::create()
                    .table(Expenses::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Expenses::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Expenses::Title).string().not_null())
                    .col(
                        ColumnDef::new(Expenses::Amount)
                            .decimal_len(16, 4)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Expenses::Category).string_len(255).not_null())
                    .col(ColumnDef::new(Expenses::UserId).uuid().not_null())
                    .col(
                        ColumnDef::new(Expenses::PettyCashTransactionId)
                            .uuid()
                            .null(),
                    )
                    .col(timestamp(Expenses::CreatedAt))
                    .col(timestamp(Expenses::UpdatedAt))
                    .col(
                        ColumnDef::new(Expenses::DeletedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_expenses_petty_cash_transaction")
                            .from(Expenses::Table, Expenses::PettyCashTransactionId)
                            .to(PettyCashTransactions::Table, PettyCashTransactions::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // Owner lookups for "view own"
        manager
            .create_index(
                Index::create()
                    .name("idx_expenses_user")
                    .table(Expenses::Table)
                    .col(Expenses::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_expenses_category")
                    .table(Expenses::Table)
                    .col(Expenses::Category)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Expenses::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PettyCashTransactions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await
    }
}

fn timestamp<T: IntoIden>(col: T) -> ColumnDef {
    ColumnDef::new(col)
        .timestamp_with_time_zone()
        .not_null()
        .default(Expr::current_timestamp())
        .to_owned()
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Username,
    PasswordHash,
    Role,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}

#[derive(DeriveIden)]
enum PettyCashTransactions {
    Table,
    Id,
    Type,
    Amount,
    Description,
    UserId,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}

#[derive(DeriveIden)]
enum Expenses {
    Table,
    Id,
    Title,
    Amount,
    Category,
    UserId,
    PettyCashTransactionId,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}
