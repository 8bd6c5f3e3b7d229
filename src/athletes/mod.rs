mod dto;
mod handlers;
mod repo;

pub use repo::Athlete;

use axum::routing::get;
use axum::Router;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/athletes",
            get(handlers::list_athletes).post(handlers::create_athlete),
        )
        .route(
            "/athletes/:athlete_id",
            get(handlers::get_athlete)
                .put(handlers::update_athlete)
                .delete(handlers::delete_athlete),
        )
}
