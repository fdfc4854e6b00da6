//! Expense handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{AppError, AppState, MAX_PAGE_LIMIT};
use till_core::expenses::{record_expense, ExpenseDraft};
use till_core::models::Expense;
use till_core::Error;

/// Query parameters for listing expenses
#[derive(Debug, Deserialize)]
pub struct ExpenseQuery {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    50
}

#[derive(Serialize)]
pub struct ExpenseListResponse {
    pub expenses: Vec<Expense>,
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
}

/// GET /api/expenses - List expenses, newest first
pub async fn list_expenses(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ExpenseQuery>,
) -> Result<Json<ExpenseListResponse>, AppError> {
    // Input validation: clamp pagination parameters
    let limit = params.limit.clamp(1, MAX_PAGE_LIMIT);
    let offset = params.offset.max(0);

    let expenses = state.db.list_expenses(limit, offset)?;
    let total = state.db.count_expenses()?;

    Ok(Json(ExpenseListResponse {
        expenses,
        total,
        limit,
        offset,
    }))
}

#[derive(Debug, Deserialize)]
pub struct RecentQuery {
    #[serde(default = "default_recent_limit")]
    pub limit: i64,
}

fn default_recent_limit() -> i64 {
    10
}

/// GET /api/expenses/recent - The most recently saved expenses
pub async fn recent_expenses(
    State(state): State<Arc<AppState>>,
    Query(params): Query<RecentQuery>,
) -> Result<Json<Vec<Expense>>, AppError> {
    let limit = params.limit.clamp(1, MAX_PAGE_LIMIT);
    Ok(Json(state.db.recent_expenses(limit)?))
}

/// GET /api/expenses/:id - Get a single expense
pub async fn get_expense(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<Expense>, AppError> {
    let expense = state
        .db
        .get_expense(id)?
        .ok_or_else(|| AppError::not_found("Expense not found"))?;
    Ok(Json(expense))
}

/// POST /api/expenses - Save a confirmed expense
pub async fn create_expense(
    State(state): State<Arc<AppState>>,
    Json(draft): Json<ExpenseDraft>,
) -> Result<Json<Expense>, AppError> {
    match record_expense(&state.db, &state.taxonomy, &draft, Utc::now()) {
        Ok(expense) => Ok(Json(expense)),
        Err(Error::InvalidData(msg)) => Err(AppError::bad_request(&msg)),
        Err(e) => Err(e.into()),
    }
}

#[derive(Debug, Deserialize)]
pub struct DeleteExpensesRequest {
    pub ids: Vec<i64>,
}

#[derive(Debug, Serialize)]
pub struct DeleteExpensesResponse {
    pub deleted: usize,
}

/// DELETE /api/expenses - Delete the selected expenses
pub async fn delete_expenses(
    State(state): State<Arc<AppState>>,
    Json(req): Json<DeleteExpensesRequest>,
) -> Result<Json<DeleteExpensesResponse>, AppError> {
    if req.ids.is_empty() {
        return Err(AppError::bad_request("No expenses selected"));
    }

    let deleted = state.db.delete_expenses(&req.ids)?;
    info!(requested = req.ids.len(), deleted, "Deleted expenses");

    Ok(Json(DeleteExpensesResponse { deleted }))
}
