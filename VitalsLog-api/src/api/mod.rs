pub mod handlers;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use tracing::info;
use vitals_log_domain::repository::JsonFileStorage;

use crate::config::AppConfig;
use routes::AppServices;

/// Create the application router backed by the configured readings document
pub fn create_application(config: &AppConfig) -> Router {
    let storage = Arc::new(JsonFileStorage::new(&config.data_file));
    info!("Storing readings in {}", storage.path().display());

    routes::create_app(AppServices::from_storage(storage), &config.allowed_origins)
}
