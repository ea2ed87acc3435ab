//! Authentication routes.

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use ledgerly_shared::auth::{LoginRequest, LoginResponse};

use super::invalid_body;
use crate::{AppState, error::{ApiError, error_response}, services::SessionIssuer};

/// Creates the auth router.
pub fn routes() -> Router<AppState> {
    Router::new().route("/auth/login", post(login))
}

/// POST /auth/login - Authenticate user and return a session token.
async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Response {
    let payload = match payload {
        Ok(Json(p)) => p,
        Err(rejection) => return invalid_body(&rejection),
    };

    if payload.username.is_empty() || payload.password.is_empty() {
        return error_response(
            StatusCode::BAD_REQUEST,
            "validation_error",
            "username and password required",
        );
    }

    let issuer = SessionIssuer::new(
        (*state.db).clone(),
        state.jwt_service.clone(),
        state.permissions.clone(),
    );

    match issuer.login(&payload.username, &payload.password).await {
        Ok(issued) => (
            StatusCode::OK,
            Json(LoginResponse {
                token: issued.token,
                expires_in: issued.expires_in,
            }),
        )
            .into_response(),
        Err(e) => ApiError(e).into_response(),
    }
}
