//! Dashboard handler

use std::sync::Arc;

use axum::{extract::State, Json};
use chrono::Utc;
use serde::Serialize;

use crate::{AppError, AppState};
use till_core::models::{CategorySpend, DashboardStats};

#[derive(Serialize)]
pub struct DashboardResponse {
    pub stats: DashboardStats,
    pub by_category: Vec<CategorySpend>,
}

/// GET /api/dashboard - Headline metrics plus spending per main category
pub async fn get_dashboard(
    State(state): State<Arc<AppState>>,
) -> Result<Json<DashboardResponse>, AppError> {
    let stats = state.db.dashboard_stats(Utc::now().date_naive())?;
    let by_category = state.db.spending_by_category()?;

    Ok(Json(DashboardResponse { stats, by_category }))
}
