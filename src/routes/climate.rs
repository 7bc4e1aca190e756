use crate::{
    climate::{PrecipitationByDate, TemperatureObservation, parse_date},
    database::{DateRange, TemperatureStats},
    error::AppError,
    routes::ApiErrorResponse,
    server::Server,
};
use axum::{
    Router,
    extract::{Path, State},
    response::Json,
    routing::get,
};
use chrono::NaiveDate;

/// Create the `/api/v1.0` climate routes
pub fn create_climate_routes() -> Router<Server> {
    Router::new()
        .route("/precipitation", get(get_precipitation))
        .route("/stations", get(get_stations))
        .route("/tobs", get(get_tobs))
        .route("/{start}", get(get_temperature_stats_from))
        .route("/{start}/{end}", get(get_temperature_stats_between))
}

fn parse_date_param(name: &str, raw: &str) -> Result<NaiveDate, AppError> {
    parse_date(raw).ok_or_else(|| {
        AppError::BadRequest(format!(
            "invalid {name} date '{raw}', expected YYYY-MM-DD"
        ))
    })
}

/// Precipitation for the last year of data
#[utoipa::path(
    get,
    path = "/api/v1.0/precipitation",
    summary = "Precipitation",
    description = "Precipitation by date for the window ending at the configured reference date. \
                   When several stations report the same date, the last row read wins.",
    tags = ["Climate"],
    responses(
        (status = 200, description = "Date to precipitation map", body = std::collections::HashMap<String, Option<f64>>),
        (status = 500, description = "Internal server error", body = ApiErrorResponse)
    )
)]
pub async fn get_precipitation(
    State(server): State<Server>,
) -> Result<Json<PrecipitationByDate>, AppError> {
    let precipitation = server.climate_service.precipitation().await?;
    Ok(Json(precipitation))
}

/// All station identifiers
#[utoipa::path(
    get,
    path = "/api/v1.0/stations",
    summary = "Stations",
    tags = ["Climate"],
    responses(
        (status = 200, description = "Station identifiers", body = Vec<String>),
        (status = 500, description = "Internal server error", body = ApiErrorResponse)
    )
)]
pub async fn get_stations(State(server): State<Server>) -> Result<Json<Vec<String>>, AppError> {
    let stations = server.climate_service.station_ids().await?;
    Ok(Json(stations))
}

/// Temperature observations of the most active station for the last year of data
#[utoipa::path(
    get,
    path = "/api/v1.0/tobs",
    summary = "Temperature Observations",
    description = "Observations in the trailing window for the station with the most rows",
    tags = ["Climate"],
    responses(
        (status = 200, description = "Single-key {date: temperature} objects", body = Vec<std::collections::HashMap<String, f64>>),
        (status = 500, description = "Internal server error", body = ApiErrorResponse)
    )
)]
pub async fn get_tobs(
    State(server): State<Server>,
) -> Result<Json<Vec<TemperatureObservation>>, AppError> {
    let observations = server
        .climate_service
        .most_active_station_observations()
        .await?;
    Ok(Json(observations))
}

/// Temperature statistics from a start date onwards
#[utoipa::path(
    get,
    path = "/api/v1.0/{start}",
    summary = "Temperature Stats From Date",
    tags = ["Climate"],
    params(
        ("start" = String, Path, description = "Start date (YYYY-MM-DD), inclusive")
    ),
    responses(
        (status = 200, description = "Min/avg/max temperature, null when nothing matched", body = TemperatureStats),
        (status = 400, description = "Malformed date", body = ApiErrorResponse),
        (status = 500, description = "Internal server error", body = ApiErrorResponse)
    )
)]
pub async fn get_temperature_stats_from(
    State(server): State<Server>,
    Path(start): Path<String>,
) -> Result<Json<TemperatureStats>, AppError> {
    let start = parse_date_param("start", &start)?;
    let stats = server
        .climate_service
        .temperature_stats(DateRange::starting(start))
        .await?;
    Ok(Json(stats))
}

/// Temperature statistics over an inclusive date range
#[utoipa::path(
    get,
    path = "/api/v1.0/{start}/{end}",
    summary = "Temperature Stats For Range",
    description = "A start after the end is not an error; it matches nothing.",
    tags = ["Climate"],
    params(
        ("start" = String, Path, description = "Start date (YYYY-MM-DD), inclusive"),
        ("end" = String, Path, description = "End date (YYYY-MM-DD), inclusive")
    ),
    responses(
        (status = 200, description = "Min/avg/max temperature, null when nothing matched", body = TemperatureStats),
        (status = 400, description = "Malformed date", body = ApiErrorResponse),
        (status = 500, description = "Internal server error", body = ApiErrorResponse)
    )
)]
pub async fn get_temperature_stats_between(
    State(server): State<Server>,
    Path((start, end)): Path<(String, String)>,
) -> Result<Json<TemperatureStats>, AppError> {
    let start = parse_date_param("start", &start)?;
    let end = parse_date_param("end", &end)?;
    let stats = server
        .climate_service
        .temperature_stats(DateRange::between(start, end))
        .await?;
    Ok(Json(stats))
}
