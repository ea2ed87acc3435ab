//! Permission middleware: rejects callers whose role lacks a permission.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use ledgerly_core::{
    DomainError,
    auth::{Permission, PermissionTable},
};
use tracing::warn;

use super::auth::AuthUser;
use crate::{AppState, error::ApiError};

/// State for [`require_permission`]: the table and the permission to demand.
#[derive(Debug, Clone)]
pub struct PermissionGuard {
    permissions: Arc<PermissionTable>,
    required: Permission,
}

impl PermissionGuard {
    /// Creates a guard demanding `required` against the state's table.
    #[must_use]
    pub fn new(state: &AppState, required: Permission) -> Self {
        Self {
            permissions: Arc::clone(&state.permissions),
            required,
        }
    }
}

/// Route layer enforcing a [`PermissionGuard`].
///
/// Must run inside `auth_middleware`, which provides the [`AuthUser`].
pub async fn require_permission(
    State(guard): State<PermissionGuard>,
    request: Request,
    next: Next,
) -> Response {
    let Some(user) = request.extensions().get::<AuthUser>().copied() else {
        return ApiError(DomainError::Unauthenticated).into_response();
    };

    if !guard.permissions.authorize(user.role, guard.required) {
        warn!(
            user_id = %user.user_id,
            role = %user.role,
            permission = %guard.required,
            "Permission denied"
        );
        return ApiError(DomainError::Forbidden).into_response();
    }

    next.run(request).await
}
