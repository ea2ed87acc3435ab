//! Database seeder for Ledgerly development and testing.
//!
//! Registers the default `admin` and `employee` users. When
//! `SEED_OPENING_CREDIT` is set, also funds the cash box with that amount.
//!
//! The database URL is read from `LEDGERLY__DATABASE__URL`, falling back to
//! the configured default.
//!
//! Usage: cargo run --bin seeder

use std::sync::Arc;

use ledgerly_api::services::SessionIssuer;
use ledgerly_core::{
    DomainError,
    auth::{PermissionTable, UserRole},
    petty_cash::{CreateCashTransactionInput, TransactionType},
};
use ledgerly_db::{PettyCashRepository, connect, migration::Migrator};
use ledgerly_shared::{JwtConfig, JwtService, config::DatabaseConfig};
use rust_decimal::Decimal;
use sea_orm_migration::MigratorTrait;
use uuid::Uuid;

/// Default accounts: username, password, role.
const DEFAULT_USERS: [(&str, &str, UserRole); 2] = [
    ("admin", "adminpassword", UserRole::Admin),
    ("employee", "employeepassword", UserRole::Employee),
];

/// Registers the default users, skipping names that already exist.
///
/// Returns the admin's ID when this run created it.
async fn seed_users(issuer: &SessionIssuer) -> anyhow::Result<Option<Uuid>> {
    let mut admin_id = None;
    for (username, password, role) in DEFAULT_USERS {
        match issuer.register(username, password, role).await {
            Ok(user) => {
                println!("  Created {role} user: {username}");
                if role == UserRole::Admin {
                    admin_id = Some(user.id);
                }
            }
            Err(DomainError::UsernameTaken) => {
                println!("  User {username} already exists, skipping...");
            }
            Err(e) => {
                return Err(anyhow::Error::new(e).context(format!("failed to create {username}")));
            }
        }
    }
    Ok(admin_id)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("LEDGERLY__DATABASE__URL")
        .unwrap_or_else(|_| DatabaseConfig::default().url);

    println!("Connecting to database...");
    let db = connect(&database_url).await?;
    Migrator::up(&db, None).await?;

    // Registration never signs tokens, so the default key is enough here.
    let issuer = SessionIssuer::new(
        db.clone(),
        Arc::new(JwtService::new(JwtConfig::default())),
        Arc::new(PermissionTable::standard()),
    );

    let admin_id = seed_users(&issuer).await?;

    if let Ok(raw) = std::env::var("SEED_OPENING_CREDIT") {
        let amount: Decimal = raw.trim().parse()?;
        match admin_id {
            Some(user_id) => {
                let tx = PettyCashRepository::new(db)
                    .create_transaction(CreateCashTransactionInput {
                        transaction_type: TransactionType::Credit,
                        amount,
                        description: "Opening balance".to_string(),
                        user_id,
                    })
                    .await
                    .map_err(DomainError::from)?;
                println!("  Funded cash box with {:.2}", tx.amount);
            }
            None => println!("  Admin already existed, opening credit skipped"),
        }
    }

    println!("Seeding complete!");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn issuer(migrate: bool) -> SessionIssuer {
        let db = connect("sqlite::memory:").await.unwrap();
        if migrate {
            Migrator::up(&db, None).await.unwrap();
        }
        SessionIssuer::new(
            db,
            Arc::new(JwtService::new(JwtConfig::default())),
            Arc::new(PermissionTable::standard()),
        )
    }

    #[tokio::test]
    async fn test_seeding_twice_skips_existing_users() {
        let issuer = issuer(true).await;

        assert!(seed_users(&issuer).await.unwrap().is_some());
        assert!(seed_users(&issuer).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_storage_failure_is_propagated() {
        let issuer = issuer(false).await;

        let err = seed_users(&issuer).await.unwrap_err();
        assert!(err.to_string().contains("failed to create admin"));
    }
}
