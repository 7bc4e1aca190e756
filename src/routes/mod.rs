pub mod climate;
pub mod docs;
pub mod health;
pub mod home;

pub use climate::create_climate_routes;
pub use docs::create_docs_routes;
pub use health::create_health_routes;
pub use home::create_home_routes;

use serde::Serialize;
use utoipa::ToSchema;

/// Error body produced by `AppError`
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiErrorResponse {
    /// Short error category
    pub error: String,
    /// Human-readable detail
    pub message: String,
}
