use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub catalog_data_dir: PathBuf,
    pub static_dir: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let host = std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let port = std::env::var("APP_PORT")
            .ok()
            .and_then(|v| v.parse::<u16>().ok())
            .unwrap_or(8080);
        let catalog_data_dir = std::env::var("CATALOG_DATA_DIR")
            .unwrap_or_else(|_| "./data".into())
            .into();
        let static_dir = std::env::var("STATIC_DIR")
            .unwrap_or_else(|_| "./public".into())
            .into();
        Ok(Self {
            database_url,
            host,
            port,
            catalog_data_dir,
            static_dir,
        })
    }
}
