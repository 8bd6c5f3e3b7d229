use axum::extract::{Query, State};
use axum::Json;
use tracing::instrument;

use super::records::{CategoryRecord, FoodFilter, FoodRecord};
use crate::state::AppState;

#[instrument(skip(state))]
pub async fn list_categories(State(state): State<AppState>) -> Json<Vec<CategoryRecord>> {
    Json(state.catalog.categories())
}

#[instrument(skip(state))]
pub async fn list_foods(
    State(state): State<AppState>,
    Query(filter): Query<FoodFilter>,
) -> Json<Vec<FoodRecord>> {
    Json(state.catalog.foods(&filter))
}
