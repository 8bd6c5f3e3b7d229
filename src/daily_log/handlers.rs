use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use tracing::{info, instrument};

use super::dto::{day_window, CreateLogEntryRequest, LogDayQuery, UpdateLogEntryRequest};
use super::repo::DailyLogEntry;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

#[instrument(skip(state, payload))]
pub async fn create_log_entry(
    State(state): State<AppState>,
    Path(athlete_id): Path<i64>,
    Json(payload): Json<CreateLogEntryRequest>,
) -> ApiResult<(StatusCode, Json<DailyLogEntry>)> {
    let eaten_at = payload.validate()?;
    let entry = DailyLogEntry::create(
        &state.db,
        athlete_id,
        eaten_at,
        &payload.meal_type,
        &payload.food_name,
        payload.quantity,
        &payload.unit,
        payload.kcal,
        payload.protein,
        payload.carbohydrates,
        payload.lipids,
    )
    .await?;
    info!(athlete_id, entry_id = entry.id, "log entry created");
    Ok((StatusCode::CREATED, Json(entry)))
}

#[instrument(skip(state))]
pub async fn list_log_entries(
    State(state): State<AppState>,
    Path(athlete_id): Path<i64>,
    Query(query): Query<LogDayQuery>,
) -> ApiResult<Json<Vec<DailyLogEntry>>> {
    let (start, end) = day_window(&query.date)?;
    let entries = DailyLogEntry::list_between(&state.db, athlete_id, start, end).await?;
    Ok(Json(entries))
}

#[instrument(skip(state, payload))]
pub async fn update_log_entry(
    State(state): State<AppState>,
    Path(entry_id): Path<i64>,
    Json(payload): Json<UpdateLogEntryRequest>,
) -> ApiResult<Json<DailyLogEntry>> {
    let eaten_at = payload.validate()?;
    let entry = DailyLogEntry::update(
        &state.db,
        entry_id,
        eaten_at,
        payload.meal_type.as_deref(),
        payload.food_name.as_deref(),
        payload.quantity,
        payload.unit.as_deref(),
        payload.kcal,
        payload.protein,
        payload.carbohydrates,
        payload.lipids,
    )
    .await?
    .ok_or_else(|| ApiError::not_found("Log entry"))?;
    Ok(Json(entry))
}

#[instrument(skip(state))]
pub async fn delete_log_entry(
    State(state): State<AppState>,
    Path(entry_id): Path<i64>,
) -> ApiResult<StatusCode> {
    if DailyLogEntry::delete(&state.db, entry_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::not_found("Log entry"))
    }
}
