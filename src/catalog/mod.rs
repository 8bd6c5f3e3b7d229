mod handlers;
mod loader;
mod query;
mod records;

pub use loader::{Catalog, CatalogError};
pub use records::{CategoryRecord, FoodFilter, FoodRecord, Nutrients};

use axum::routing::get;
use axum::Router;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/categories", get(handlers::list_categories))
        .route("/foods", get(handlers::list_foods))
}
