use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Configure Swagger UI endpoints
pub fn configure_swagger_routes() -> SwaggerUi {
    SwaggerUi::new("/api-docs").url("/api-docs/openapi.json", ApiDoc::openapi())
}

// API Documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health endpoints
        crate::api::handlers::health::root,
        crate::api::handlers::health::health_check,

        // Reading endpoints
        crate::api::handlers::readings::list_readings,
        crate::api::handlers::readings::create_reading,
        crate::api::handlers::readings::delete_reading,
    ),
    components(
        schemas(
            // Entities
            crate::entities::reading::Reading,
            crate::entities::reading::CreateReadingRequest,
            crate::entities::reading::DeletedReadingResponse,
            crate::entities::common::ErrorResponse,

            // Health handlers
            crate::api::handlers::health::HealthResponse,
            crate::api::handlers::health::ComponentStatus,
            crate::api::handlers::health::ComponentHealthStatus,
        )
    ),
    tags(
        (name = "health", description = "Liveness and health check endpoints"),
        (name = "readings", description = "Vital-signs reading endpoints")
    ),
    info(
        title = "Vitals Log API",
        version = "0.1.0",
        description = "API for recording blood pressure, heart rate and blood panel readings",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        ),
    ),
    servers(
        (url = "/", description = "Local development server")
    )
)]
pub struct ApiDoc;
