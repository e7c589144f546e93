use std::fmt::Debug;
use std::sync::Arc;

use axum::{
    http::{header, request::Parts, HeaderName, HeaderValue, Method},
    routing::{delete, get},
    Extension, Router,
};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;
use tracing::debug;

use vitals_log_domain::health::StorageHealthService;
use vitals_log_domain::repository::ReadingStorage;
use vitals_log_domain::services::create_readings_service;

use crate::api::handlers::health::{self, HealthService};
use crate::api::handlers::readings::{self, ReadingsService};
use crate::openapi::configure_swagger_routes;

/// Services shared by every request handler
#[derive(Clone)]
pub struct AppServices {
    pub readings: ReadingsService,
    pub health: HealthService,
}

impl AppServices {
    /// Build the readings and health services over one shared store
    pub fn from_storage<S>(storage: Arc<S>) -> Self
    where
        S: ReadingStorage + Debug + 'static,
    {
        Self {
            readings: Arc::new(create_readings_service(Arc::clone(&storage))),
            health: Arc::new(StorageHealthService::new(storage)),
        }
    }
}

/// Create the application router
pub fn create_app(services: AppServices, allowed_origins: &[String]) -> Router {
    debug!("Creating application router");

    let api_routes = Router::new()
        .route(
            "/api/readings",
            get(readings::list_readings).post(readings::create_reading),
        )
        .route("/api/readings/:id", delete(readings::delete_reading))
        .with_state(services.readings);

    debug!("API routes configured");

    let public_routes = Router::new()
        .route("/", get(health::root))
        .route("/health", get(health::health_check))
        .layer(Extension(services.health));

    debug!("Public routes configured");

    let app = Router::new()
        .merge(public_routes)
        .merge(api_routes)
        .merge(configure_swagger_routes());

    debug!("Swagger UI merged");

    // Initialize health check service startup time
    health::initialize_server_start_time();

    app.layer(TraceLayer::new_for_http())
        .layer(cors_layer(allowed_origins))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            HeaderName::from_static("referrer-policy"),
            HeaderValue::from_static("strict-origin-when-cross-origin"),
        ))
}

/// Whether a request origin starts with one of the configured prefixes
pub fn origin_allowed(origin: &str, allowed_origins: &[String]) -> bool {
    allowed_origins
        .iter()
        .any(|prefix| origin.starts_with(prefix.as_str()))
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let allowed_origins = allowed_origins.to_vec();

    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(
            move |origin: &HeaderValue, _request: &Parts| {
                origin
                    .to_str()
                    .map(|origin| origin_allowed(origin, &allowed_origins))
                    .unwrap_or(false)
            },
        ))
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
}
