//! Category taxonomy handlers

use std::sync::Arc;

use axum::{extract::State, Json};

use crate::AppState;
use till_core::categories::Category;

/// GET /api/categories - Main categories with their subcategories, in picker order
pub async fn list_categories(State(state): State<Arc<AppState>>) -> Json<Vec<Category>> {
    Json(state.taxonomy.categories().to_vec())
}
