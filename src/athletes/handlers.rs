use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use tracing::{info, instrument};

use super::dto::{CreateAthleteRequest, UpdateAthleteRequest};
use super::repo::Athlete;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

#[instrument(skip(state, payload))]
pub async fn create_athlete(
    State(state): State<AppState>,
    Json(mut payload): Json<CreateAthleteRequest>,
) -> ApiResult<(StatusCode, Json<Athlete>)> {
    payload.normalize();
    payload.validate()?;

    let athlete = Athlete::create(
        &state.db,
        &payload.name,
        &payload.email,
        payload.height,
        payload.weight,
    )
    .await?;

    info!(athlete_id = athlete.id, "athlete created");
    Ok((StatusCode::CREATED, Json(athlete)))
}

#[instrument(skip(state))]
pub async fn list_athletes(State(state): State<AppState>) -> ApiResult<Json<Vec<Athlete>>> {
    Ok(Json(Athlete::list(&state.db).await?))
}

#[instrument(skip(state))]
pub async fn get_athlete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Athlete>> {
    let athlete = Athlete::find(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Athlete"))?;
    Ok(Json(athlete))
}

#[instrument(skip(state, payload))]
pub async fn update_athlete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(mut payload): Json<UpdateAthleteRequest>,
) -> ApiResult<Json<Athlete>> {
    payload.normalize();
    payload.validate()?;

    let athlete = Athlete::update(
        &state.db,
        id,
        payload.name.as_deref(),
        payload.email.as_deref(),
        payload.height,
        payload.weight,
    )
    .await?
    .ok_or_else(|| ApiError::not_found("Athlete"))?;
    Ok(Json(athlete))
}

#[instrument(skip(state))]
pub async fn delete_athlete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    if Athlete::delete(&state.db, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::not_found("Athlete"))
    }
}
