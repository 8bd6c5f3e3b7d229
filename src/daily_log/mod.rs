mod dto;
mod handlers;
mod repo;

pub use repo::DailyLogEntry;

use axum::routing::{get, put};
use axum::Router;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/athletes/:athlete_id/log",
            get(handlers::list_log_entries).post(handlers::create_log_entry),
        )
        .route(
            "/log/:entry_id",
            put(handlers::update_log_entry).delete(handlers::delete_log_entry),
        )
}
