//! Climate query service
//!
//! Resolves the trailing observation window from [`DatasetConfig`], runs the
//! read-only queries through request-scoped DAOs and shapes rows into the
//! JSON payloads served under `/api/v1.0`.

pub mod config;

use crate::climate::config::DatasetConfig;
use crate::database::{DatabaseManager, DatabaseResult, DateRange, TemperatureStats};
use crate::health::{HealthCheckResult, HealthChecker};
use crate::metrics;
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

/// Storage and wire format for calendar dates
pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parse a strict `YYYY-MM-DD` date: four-digit year, zero-padded month and day
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let canonical = raw.len() == 10
        && raw.bytes().enumerate().all(|(i, b)| match i {
            4 | 7 => b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !canonical {
        return None;
    }
    NaiveDate::parse_from_str(raw, DATE_FORMAT).ok()
}

/// Precipitation keyed by date. A date reported by several stations keeps the
/// value of the last row read.
pub type PrecipitationByDate = BTreeMap<String, Option<f64>>;

/// A single temperature reading, serialized as `{"<date>": <tobs>}`
#[derive(Debug, Clone, PartialEq)]
pub struct TemperatureObservation {
    pub date: String,
    pub temperature: f64,
}

impl Serialize for TemperatureObservation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.date, &self.temperature)?;
        map.end()
    }
}

pub struct ClimateService {
    database: Arc<dyn DatabaseManager>,
    dataset: DatasetConfig,
}

impl ClimateService {
    pub fn new(database: Arc<dyn DatabaseManager>, dataset: DatasetConfig) -> Self {
        Self { database, dataset }
    }

    /// Precipitation for every date in the trailing window
    pub async fn precipitation(&self) -> DatabaseResult<PrecipitationByDate> {
        let since = self.dataset.window_start();
        let rows = self.database.measurements().precipitation_since(since).await?;
        metrics::track_dataset_query("precipitation", rows.len());

        Ok(rows.into_iter().collect())
    }

    pub async fn station_ids(&self) -> DatabaseResult<Vec<String>> {
        let ids = self.database.stations().station_ids().await?;
        metrics::track_dataset_query("stations", ids.len());
        Ok(ids)
    }

    /// Temperature readings in the trailing window for the station with the most rows overall
    pub async fn most_active_station_observations(
        &self,
    ) -> DatabaseResult<Vec<TemperatureObservation>> {
        let measurements = self.database.measurements();

        let Some(most_active) = measurements.most_active_station().await? else {
            debug!("No measurements recorded, returning empty observations");
            metrics::track_dataset_query("tobs", 0);
            return Ok(Vec::new());
        };

        debug!(
            station_id = %most_active.station_id,
            observations = most_active.observations,
            "Resolved most active station"
        );

        let since = self.dataset.window_start();
        let rows = measurements
            .temperatures_for_station_since(&most_active.station_id, since)
            .await?;
        metrics::track_dataset_query("tobs", rows.len());

        Ok(rows
            .into_iter()
            .map(|(date, temperature)| TemperatureObservation { date, temperature })
            .collect())
    }

    pub async fn temperature_stats(&self, range: DateRange) -> DatabaseResult<TemperatureStats> {
        let stats = self.database.measurements().temperature_stats(&range).await?;
        metrics::track_dataset_query("temperature_stats", 1);
        Ok(stats)
    }
}

/// Reports whether the configured reference date still matches the newest row
#[async_trait]
impl HealthChecker for ClimateService {
    fn name(&self) -> &str {
        "dataset"
    }

    async fn check(&self) -> HealthCheckResult {
        let reference_date = format_date(self.dataset.reference_date);

        match self.database.measurements().date_bounds().await {
            Ok((earliest, latest)) => {
                let details = serde_json::json!({
                    "reference_date": reference_date,
                    "window_days": self.dataset.window_days,
                    "earliest_date": earliest,
                    "latest_date": latest,
                });

                if latest.as_deref() == Some(reference_date.as_str()) {
                    HealthCheckResult::healthy_with_details(details)
                } else {
                    HealthCheckResult::degraded_with_details(
                        "Reference date does not match the latest recorded date".to_string(),
                        details,
                    )
                }
            }
            Err(err) => HealthCheckResult::unhealthy_with_details(
                "Dataset query failed".to_string(),
                serde_json::json!({ "error": err.to_string() }),
            ),
        }
    }
}
