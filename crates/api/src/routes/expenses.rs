//! Expense routes.

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
    auth::{Permission, UserRole, role_satisfies},
    expense::CreateExpenseInput,
};
use ledgerly_db::{
    ExpenseRepository,
    entities::{expenses, petty_cash_transactions},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use super::{invalid_body, money, petty_cash::TransactionResponse};
use crate::{
    AppState,
    error::ApiError,
    middleware::{AuthUser, PermissionGuard, require_permission},
};

/// Creates the expenses router.
pub fn routes(state: &AppState) -> Router<AppState> {
    Router::new().route(
        "/expenses",
        post(create_expense)
            .route_layer(from_fn_with_state(
                PermissionGuard::new(state, Permission::ExpenseCreate),
                require_permission,
            ))
            .merge(get(list_expenses).route_layer(from_fn_with_state(
                PermissionGuard::new(state, Permission::ExpenseViewOwn),
                require_permission,
            ))),
    )
}

/// Request body for `POST /expenses`.
#[derive(Debug, Deserialize)]
pub struct CreateExpenseRequest {
    /// Short label.
    #[serde(default)]
    pub title: String,
    /// Amount as a JSON number or string.
    pub amount: Decimal,
    /// Report grouping key.
    #[serde(default)]
    pub category: String,
    /// Optional funding withdrawal.
    #[serde(default)]
    pub petty_cash_transaction_id: Option<Uuid>,
}

/// An expense as returned by the API.
#[derive(Debug, Serialize)]
pub struct ExpenseResponse {
    /// Expense ID.
    pub id: Uuid,
    /// Title.
    pub title: String,
    /// Amount with two decimals.
    pub amount: String,
    /// Category.
    pub category: String,
    /// Owning user.
    pub user_id: Uuid,
    /// Linked cash transaction ID.
    pub petty_cash_transaction_id: Option<Uuid>,
    /// Linked cash transaction, when listed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub petty_cash_transaction: Option<TransactionResponse>,
    /// Creation time.
    pub created_at: DateTime<FixedOffset>,
}

impl ExpenseResponse {
    fn new(model: expenses::Model, linked: Option<petty_cash_transactions::Model>) -> Self {
        Self {
            id: model.id,
            title: model.title,
            amount: money(model.amount),
            category: model.category,
            user_id: model.user_id,
            petty_cash_transaction_id: model.petty_cash_transaction_id,
            petty_cash_transaction: linked.map(Into::into),
            created_at: model.created_at,
        }
    }
}

/// POST /expenses - Record an expense owned by the caller.
async fn create_expense(
    State(state): State<AppState>,
    user: AuthUser,
    payload: Result<Json<CreateExpenseRequest>, JsonRejection>,
) -> Response {
    let payload = match payload {
        Ok(Json(p)) => p,
        Err(rejection) => return invalid_body(&rejection),
    };

    let input = CreateExpenseInput {
        title: payload.title,
        amount: payload.amount,
        category: payload.category,
        user_id: user.user_id,
        petty_cash_transaction_id: payload.petty_cash_transaction_id,
    };

    let repo = ExpenseRepository::new((*state.db).clone());
    match repo.create_expense(input).await {
        Ok(model) => {
            info!(expense_id = %model.id, user_id = %user.user_id, "Expense created");
            (StatusCode::CREATED, Json(ExpenseResponse::new(model, None))).into_response()
        }
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// GET /expenses - Admins see every expense, everyone else their own.
async fn list_expenses(State(state): State<AppState>, user: AuthUser) -> Response {
    let owner = (!role_satisfies(user.role, UserRole::Admin)).then_some(user.user_id);

    let repo = ExpenseRepository::new((*state.db).clone());
    match repo.list_expenses(owner).await {
        Ok(rows) => {
            let body: Vec<ExpenseResponse> = rows
                .into_iter()
                .map(|(expense, linked)| ExpenseResponse::new(expense, linked))
                .collect();
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => ApiError::from(e).into_response(),
    }
}
