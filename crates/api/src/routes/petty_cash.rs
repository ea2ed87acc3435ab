//! Petty cash routes: record transactions, list them, read the balance.

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    middleware::from_fn_with_state,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::{DateTime, FixedOffset};
use ledgerly_core::{
    DomainError,
    auth::Permission,
    petty_cash::{CreateCashTransactionInput, TransactionType},
};
use ledgerly_db::entities::petty_cash_transactions;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use super::{invalid_body, money};
use crate::{
    AppState,
    error::ApiError,
    middleware::{AuthUser, PermissionGuard, require_permission},
};

/// Creates the petty cash router.
///
/// `POST /petty-cash` checks authorization in the handler, since debits are
/// also open to callers who may record expenses.
pub fn routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/petty-cash",
            post(create_transaction).merge(get(list_transactions).route_layer(
                from_fn_with_state(
                    PermissionGuard::new(state, Permission::PettyCashViewList),
                    require_permission,
                ),
            )),
        )
        .route(
            "/petty-cash/balance",
            get(get_balance).route_layer(from_fn_with_state(
                PermissionGuard::new(state, Permission::PettyCashViewBalance),
                require_permission,
            )),
        )
}

/// Request body for `POST /petty-cash`.
#[derive(Debug, Deserialize)]
pub struct CreateTransactionRequest {
    /// `credit` or `debit`.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// Amount as a JSON number or string.
    pub amount: Decimal,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
}

/// A cash box transaction as returned by the API.
#[derive(Debug, Serialize)]
pub struct TransactionResponse {
    /// Transaction ID.
    pub id: Uuid,
    /// `credit` or `debit`.
    #[serde(rename = "type")]
    pub transaction_type: String,
    /// Amount with two decimals.
    pub amount: String,
    /// Description.
    pub description: String,
    /// Owning user.
    pub user_id: Uuid,
    /// Creation time.
    pub created_at: DateTime<FixedOffset>,
}

impl From<petty_cash_transactions::Model> for TransactionResponse {
    fn from(model: petty_cash_transactions::Model) -> Self {
        Self {
            id: model.id,
            transaction_type: model.transaction_type,
            amount: money(model.amount),
            description: model.description,
            user_id: model.user_id,
            created_at: model.created_at,
        }
    }
}

/// Balance response.
#[derive(Debug, Serialize)]
pub struct BalanceResponse {
    /// Current balance with two decimals.
    pub balance: String,
}

/// POST /petty-cash - Record a credit or debit.
async fn create_transaction(
    State(state): State<AppState>,
    user: AuthUser,
    payload: Result<Json<CreateTransactionRequest>, JsonRejection>,
) -> Response {
    let payload = match payload {
        Ok(Json(p)) => p,
        Err(rejection) => return invalid_body(&rejection),
    };

    if !state
        .permissions
        .can_create_transaction(user.role, payload.transaction_type)
    {
        warn!(
            user_id = %user.user_id,
            role = %user.role,
            kind = %payload.transaction_type,
            "Petty cash transaction denied"
        );
        return ApiError(DomainError::Forbidden).into_response();
    }

    let input = CreateCashTransactionInput {
        transaction_type: payload.transaction_type,
        amount: payload.amount,
        description: payload.description,
        user_id: user.user_id,
    };

    match state.petty_cash_repo().create_transaction(input).await {
        Ok(model) => {
            info!(
                transaction_id = %model.id,
                user_id = %user.user_id,
                kind = %model.transaction_type,
                "Petty cash transaction created"
            );
            (StatusCode::CREATED, Json(TransactionResponse::from(model))).into_response()
        }
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// GET /petty-cash - List live transactions, newest first.
async fn list_transactions(State(state): State<AppState>) -> Response {
    match state.petty_cash_repo().list_transactions().await {
        Ok(rows) => {
            let body: Vec<TransactionResponse> = rows.into_iter().map(Into::into).collect();
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// GET /petty-cash/balance - Current balance.
async fn get_balance(State(state): State<AppState>) -> Response {
    match state.petty_cash_repo().get_balance().await {
        Ok(balance) => (
            StatusCode::OK,
            Json(BalanceResponse {
                balance: money(balance),
            }),
        )
            .into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}
