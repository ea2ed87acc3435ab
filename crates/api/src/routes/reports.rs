//! Report routes.

use std::collections::BTreeMap;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    middleware::from_fn_with_state,
    response::{IntoResponse, Response},
    routing::get,
};
use ledgerly_core::{
    auth::Permission,
    reports::{ExpenseSummary, PettyCashSummary},
};
use ledgerly_db::ReportRepository;
use serde::Serialize;

use super::money;
use crate::{
    AppState,
    error::ApiError,
    middleware::{PermissionGuard, require_permission},
};

/// Creates the reports router. Every route requires `reports.view`.
pub fn routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/reports/expenses-summary", get(expenses_summary))
        .route("/reports/petty-cash-summary", get(petty_cash_summary))
        .route_layer(from_fn_with_state(
            PermissionGuard::new(state, Permission::ReportsView),
            require_permission,
        ))
}

/// Expense summary response.
#[derive(Debug, Serialize)]
pub struct ExpenseSummaryResponse {
    /// Sum of all live expenses.
    pub total_expenses: String,
    /// Category to summed amount.
    pub by_category: BTreeMap<String, String>,
}

impl From<ExpenseSummary> for ExpenseSummaryResponse {
    fn from(summary: ExpenseSummary) -> Self {
        Self {
            total_expenses: money(summary.total_expenses),
            by_category: summary
                .by_category
                .into_iter()
                .map(|(category, amount)| (category, money(amount)))
                .collect(),
        }
    }
}

/// Petty cash summary response.
#[derive(Debug, Serialize)]
pub struct PettyCashSummaryResponse {
    /// Sum of credits.
    pub total_credits: String,
    /// Sum of debits.
    pub total_debits: String,
    /// Credits minus debits.
    pub balance: String,
}

impl From<PettyCashSummary> for PettyCashSummaryResponse {
    fn from(summary: PettyCashSummary) -> Self {
        Self {
            total_credits: money(summary.total_credits),
            total_debits: money(summary.total_debits),
            balance: money(summary.balance),
        }
    }
}

/// GET /reports/expenses-summary
async fn expenses_summary(State(state): State<AppState>) -> Response {
    let repo = ReportRepository::new((*state.db).clone());
    match repo.expense_summary().await {
        Ok(summary) => (StatusCode::OK, Json(ExpenseSummaryResponse::from(summary))).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// GET /reports/petty-cash-summary
async fn petty_cash_summary(State(state): State<AppState>) -> Response {
    let repo = ReportRepository::new((*state.db).clone());
    match repo.petty_cash_summary().await {
        Ok(summary) => {
            (StatusCode::OK, Json(PettyCashSummaryResponse::from(summary))).into_response()
        }
        Err(e) => ApiError::from(e).into_response(),
    }
}
