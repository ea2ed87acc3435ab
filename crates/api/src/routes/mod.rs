//! API route definitions.

use axum::{Router, extract::rejection::JsonRejection, http::StatusCode, middleware, response::Response};
use tracing::debug;

use crate::{AppState, error::error_response, middleware::auth::auth_middleware};

pub mod auth;
pub mod expenses;
pub mod health;
pub mod petty_cash;
pub mod reports;

/// Creates the API router with protected routes that need state for middleware.
#[allow(clippy::needless_pass_by_value)]
pub fn api_routes_with_state(state: AppState) -> Router<AppState> {
    // Protected routes that require authentication
    let protected_routes = Router::new()
        .merge(petty_cash::routes(&state))
        .merge(expenses::routes(&state))
        .merge(reports::routes(&state))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // Combine public and protected routes
    Router::new()
        .merge(health::routes())
        .merge(auth::routes())
        .merge(protected_routes)
}

/// Renders a malformed JSON body as a 400 validation error.
pub(crate) fn invalid_body(rejection: &JsonRejection) -> Response {
    debug!(error = %rejection.body_text(), "Rejected request body");
    error_response(
        StatusCode::BAD_REQUEST,
        "validation_error",
        &rejection.body_text(),
    )
}

/// Renders an amount with two decimal places.
pub(crate) fn money(amount: rust_decimal::Decimal) -> String {
    format!("{amount:.2}")
}
