use crate::server::Server;
use axum::{Router, response::Html, routing::get};

/// Endpoints advertised on the landing page
pub const AVAILABLE_ROUTES: [&str; 5] = [
    "/api/v1.0/precipitation",
    "/api/v1.0/stations",
    "/api/v1.0/tobs",
    "/api/v1.0/<start>",
    "/api/v1.0/<start>/<end>",
];

pub fn create_home_routes() -> Router<Server> {
    Router::new().route("/", get(home))
}

/// List all available routes
#[utoipa::path(
    get,
    path = "/",
    summary = "List Routes",
    description = "Line-break separated list of the available API routes",
    tags = ["Climate"],
    responses(
        (status = 200, description = "Route listing", body = String, content_type = "text/html")
    )
)]
pub async fn home() -> Html<String> {
    Html(format!(
        "Available Routes:<br/>{}",
        AVAILABLE_ROUTES.join("<br/>")
    ))
}
