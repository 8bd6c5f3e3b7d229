use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use tracing::{info, instrument};

use super::dto::{
    AttachPlanRequest, CreateFoodItemRequest, CreatePlanRequest, PlanDetails,
    UpdateFoodItemRequest,
};
use super::repo::{FoodItem, MealPlan};
use crate::athletes::Athlete;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

#[instrument(skip(state, payload))]
pub async fn create_plan(
    State(state): State<AppState>,
    Json(payload): Json<CreatePlanRequest>,
) -> ApiResult<(StatusCode, Json<MealPlan>)> {
    payload.validate()?;
    let plan = MealPlan::create(&state.db, payload.name.trim()).await?;
    info!(plan_id = plan.id, "meal plan created");
    Ok((StatusCode::CREATED, Json(plan)))
}

#[instrument(skip(state))]
pub async fn list_plans(State(state): State<AppState>) -> ApiResult<Json<Vec<MealPlan>>> {
    Ok(Json(MealPlan::list(&state.db).await?))
}

#[instrument(skip(state))]
pub async fn get_plan(
    State(state): State<AppState>,
    Path(plan_id): Path<i64>,
) -> ApiResult<Json<PlanDetails>> {
    let plan = MealPlan::find(&state.db, plan_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Meal plan"))?;
    let items = MealPlan::items(&state.db, plan_id).await?;
    let athletes = MealPlan::athletes(&state.db, plan_id).await?;
    Ok(Json(PlanDetails {
        plan,
        items,
        athletes,
    }))
}

#[instrument(skip(state))]
pub async fn delete_plan(
    State(state): State<AppState>,
    Path(plan_id): Path<i64>,
) -> ApiResult<StatusCode> {
    if MealPlan::delete(&state.db, plan_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::not_found("Meal plan"))
    }
}

/// Associates an existing plan with an athlete and returns the athlete, as
/// the original contract does.
#[instrument(skip(state, payload))]
pub async fn attach_plan(
    State(state): State<AppState>,
    Path(athlete_id): Path<i64>,
    Json(payload): Json<AttachPlanRequest>,
) -> ApiResult<Json<Athlete>> {
    MealPlan::attach_athlete(&state.db, athlete_id, payload.plan_id).await?;
    let athlete = Athlete::find(&state.db, athlete_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Athlete"))?;
    info!(athlete_id, plan_id = payload.plan_id, "plan attached to athlete");
    Ok(Json(athlete))
}

#[instrument(skip(state, payload))]
pub async fn create_item(
    State(state): State<AppState>,
    Path(plan_id): Path<i64>,
    Json(payload): Json<CreateFoodItemRequest>,
) -> ApiResult<(StatusCode, Json<FoodItem>)> {
    payload.validate()?;
    let item = FoodItem::create(
        &state.db,
        plan_id,
        &payload.food_id,
        &payload.food_name,
        payload.quantity,
        &payload.unit,
        &payload.meal_type,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(item)))
}

#[instrument(skip(state, payload))]
pub async fn update_item(
    State(state): State<AppState>,
    Path(item_id): Path<i64>,
    Json(payload): Json<UpdateFoodItemRequest>,
) -> ApiResult<Json<FoodItem>> {
    payload.validate()?;
    let item = FoodItem::update(
        &state.db,
        item_id,
        payload.quantity,
        payload.unit.as_deref(),
        payload.meal_type.as_deref(),
    )
    .await?
    .ok_or_else(|| ApiError::not_found("Food item"))?;
    Ok(Json(item))
}

#[instrument(skip(state))]
pub async fn delete_item(
    State(state): State<AppState>,
    Path(item_id): Path<i64>,
) -> ApiResult<StatusCode> {
    if FoodItem::delete(&state.db, item_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::not_found("Food item"))
    }
}
