//! Session issuer: credential checks, token issuance, and registration.

use std::sync::Arc;

use ledgerly_core::{
    DomainError,
    auth::{Permission, PermissionTable, UserRole, dummy_verify, hash_password, verify_password},
};
use ledgerly_db::{UserRepository, entities::users};
use ledgerly_shared::JwtService;
use sea_orm::{DatabaseConnection, DbErr, SqlErr};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// A freshly signed session token.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    /// Signed JWT.
    pub token: String,
    /// Lifetime in seconds.
    pub expires_in: i64,
    /// Authenticated user.
    pub user_id: Uuid,
    /// Role embedded in the token.
    pub role: UserRole,
}

/// Verifies credentials and issues session tokens.
#[derive(Debug, Clone)]
pub struct SessionIssuer {
    users: UserRepository,
    jwt: Arc<JwtService>,
    permissions: Arc<PermissionTable>,
}

impl SessionIssuer {
    /// Creates a new session issuer.
    #[must_use]
    pub fn new(
        db: DatabaseConnection,
        jwt: Arc<JwtService>,
        permissions: Arc<PermissionTable>,
    ) -> Self {
        Self {
            users: UserRepository::new(db),
            jwt,
            permissions,
        }
    }

    /// Authenticates `username` and issues a token.
    ///
    /// Unknown users and wrong passwords fail identically, and both cost one
    /// password verification.
    ///
    /// # Errors
    ///
    /// - `InvalidCredentials` for any credential mismatch
    /// - `Forbidden` if the role may not log in
    /// - `StorageFailure` / `Internal` on infrastructure errors
    pub async fn login(&self, username: &str, password: &str) -> Result<IssuedToken, DomainError> {
        let Some(user) = self.users.find_by_username(username).await.map_err(storage)? else {
            dummy_verify(password);
            info!(username = %username, "Login attempt for non-existent user");
            return Err(DomainError::InvalidCredentials);
        };

        match verify_password(password, &user.password_hash) {
            Ok(true) => {}
            Ok(false) => {
                info!(user_id = %user.id, "Failed login attempt - invalid password");
                return Err(DomainError::InvalidCredentials);
            }
            Err(e) => {
                warn!(user_id = %user.id, error = %e, "Stored password hash is unusable");
                return Err(DomainError::InvalidCredentials);
            }
        }

        let Ok(role) = user.user_role() else {
            warn!(user_id = %user.id, role = %user.role, "User has unknown role");
            return Err(DomainError::InvalidCredentials);
        };

        if !self.permissions.authorize(role, Permission::Login) {
            return Err(DomainError::Forbidden);
        }

        let token = self
            .jwt
            .generate_token(user.id, role.as_str())
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        info!(user_id = %user.id, role = %role, "User logged in successfully");
        debug!(
            user_id = %user.id,
            permissions = ?self.permissions.permissions_for(role),
            "Session permissions"
        );
        Ok(IssuedToken {
            token,
            expires_in: self.jwt.token_expires_in(),
            user_id: user.id,
            role,
        })
    }

    /// Registers a user, hashing the password before storage.
    ///
    /// # Errors
    ///
    /// - `UsernameTaken` if the username exists
    /// - `StorageFailure` / `Internal` on infrastructure errors
    pub async fn register(
        &self,
        username: &str,
        password: &str,
        role: UserRole,
    ) -> Result<users::Model, DomainError> {
        if self.users.username_exists(username).await.map_err(storage)? {
            return Err(DomainError::UsernameTaken);
        }

        let password_hash =
            hash_password(password).map_err(|e| DomainError::Internal(e.to_string()))?;

        let user = self
            .users
            .create(username, &password_hash, role)
            .await
            .map_err(|e| match e.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => DomainError::UsernameTaken,
                _ => storage(e),
            })?;

        info!(user_id = %user.id, role = %role, "User registered");
        Ok(user)
    }
}

fn storage(err: DbErr) -> DomainError {
    DomainError::StorageFailure(err.to_string())
}
