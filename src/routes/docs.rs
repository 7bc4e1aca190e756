use crate::server::Server;
use axum::{Json, Router, routing::get};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Climate API",
        version = "1.0.0",
        description = "Read-only access to station precipitation and temperature observations"
    ),
    paths(
        crate::routes::home::home,
        crate::routes::climate::get_precipitation,
        crate::routes::climate::get_stations,
        crate::routes::climate::get_tobs,
        crate::routes::climate::get_temperature_stats_from,
        crate::routes::climate::get_temperature_stats_between,
        crate::routes::health::health_check,
    ),
    components(
        schemas(
            crate::routes::ApiErrorResponse,
            crate::database::TemperatureStats,
            crate::health::HealthResponse,
            crate::health::HealthStatus,
            crate::health::HealthCheckResult,
            crate::health::HealthSummary,
        )
    ),
    tags(
        (name = "Climate", description = "Precipitation, station and temperature endpoints"),
        (name = "Health", description = "Health check endpoints"),
    )
)]
pub struct ApiDoc;

/// Create documentation routes
pub fn create_docs_routes() -> Router<Server> {
    Router::new().route("/openapi.json", get(openapi_json))
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
