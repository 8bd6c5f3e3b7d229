mod dto;
mod handlers;
mod repo;

pub use repo::{FoodItem, MealPlan};

use axum::routing::{get, post, put};
use axum::Router;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/plans", get(handlers::list_plans).post(handlers::create_plan))
        .route(
            "/plans/:plan_id",
            get(handlers::get_plan).delete(handlers::delete_plan),
        )
        .route("/athletes/:athlete_id/plans", post(handlers::attach_plan))
        .route("/plans/:plan_id/items", post(handlers::create_item))
        .route(
            "/items/:item_id",
            put(handlers::update_item).delete(handlers::delete_item),
        )
}
