use std::sync::Arc;

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::catalog::Catalog;
use crate::config::AppConfig;

/// Shared application state.
///
/// The catalog is loaded once before the listener binds and never mutated
/// afterwards; a hypothetical reload would swap the whole `Arc`, so readers
/// always see a complete snapshot.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Arc<AppConfig>,
    pub catalog: Arc<Catalog>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);

        let catalog = Catalog::load(&config.catalog_data_dir)?;
        tracing::info!(
            foods = catalog.food_count(),
            categories = catalog.category_count(),
            "reference catalog loaded"
        );

        let db = PgPoolOptions::new()
            .max_connections(10)
            .connect(&config.database_url)
            .await
            .context("connect to database")?;

        Ok(Self {
            db,
            config,
            catalog: Arc::new(catalog),
        })
    }

    pub fn from_parts(db: PgPool, config: Arc<AppConfig>, catalog: Arc<Catalog>) -> Self {
        Self {
            db,
            config,
            catalog,
        }
    }
}
