//! Authentication middleware for protected routes.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{StatusCode, header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};
use ledgerly_core::auth::UserRole;
use ledgerly_shared::JwtError;
use tracing::debug;
use uuid::Uuid;

use crate::{AppState, error::error_response};

/// Extracts the bearer token from the Authorization header.
fn extract_bearer_token(header: &str) -> Option<&str> {
    header
        .strip_prefix("Bearer ")
        .or_else(|| header.strip_prefix("bearer "))
}

fn unauthenticated(message: &str) -> Response {
    error_response(StatusCode::UNAUTHORIZED, "unauthenticated", message)
}

/// Authentication middleware that validates session tokens.
///
/// This middleware:
/// 1. Extracts the Bearer token from the Authorization header
/// 2. Validates the token using the JWT service
/// 3. Parses the role claim into a [`UserRole`]
/// 4. Stores the resulting [`AuthUser`] in request extensions
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let Some(token) = auth_header.and_then(extract_bearer_token) else {
        return unauthenticated("Authorization header with Bearer token is required");
    };

    let claims = match state.jwt_service.validate_token(token) {
        Ok(claims) => claims,
        Err(JwtError::Expired) => return unauthenticated("Token has expired"),
        Err(e) => {
            debug!(error = %e, "Rejected session token");
            return unauthenticated("Invalid or malformed token");
        }
    };

    let Ok(role) = claims.role.parse::<UserRole>() else {
        debug!(role = %claims.role, "Token carries unknown role");
        return unauthenticated("Invalid or malformed token");
    };

    request.extensions_mut().insert(AuthUser {
        user_id: claims.user_id(),
        role,
    });
    next.run(request).await
}

/// Identity and role of the caller, set by [`auth_middleware`].
///
/// Use this in handlers to get the authenticated user:
///
/// ```ignore
/// async fn handler(user: AuthUser) -> impl IntoResponse {
///     let user_id = user.user_id;
///     // ...
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    /// Subject of the session token.
    pub user_id: Uuid,
    /// Role carried by the session token.
    pub role: UserRole,
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Self>()
            .copied()
            .ok_or_else(|| unauthenticated("Authentication required").into_response())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Bearer abc.def.ghi", Some("abc.def.ghi"))]
    #[case("bearer abc", Some("abc"))]
    #[case("Basic dXNlcjpwYXNz", None)]
    #[case("abc.def.ghi", None)]
    fn test_extract_bearer_token(#[case] header: &str, #[case] expected: Option<&str>) {
        assert_eq!(extract_bearer_token(header), expected);
    }
}
