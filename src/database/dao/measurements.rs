use crate::climate::format_date;
use crate::database::entities::measurement;
use crate::database::{DatabaseError, DatabaseResult};
use chrono::NaiveDate;
use sea_orm::sea_query::{Expr, Func, SimpleExpr};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect,
};
use serde::Serialize;
use utoipa::ToSchema;

/// Inclusive date bounds for temperature aggregation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn starting(start: NaiveDate) -> Self {
        Self { start, end: None }
    }

    pub fn between(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start,
            end: Some(end),
        }
    }
}

/// Temperature aggregates; every field is `None` when no rows matched
#[derive(Debug, Clone, Default, PartialEq, FromQueryResult, Serialize, ToSchema)]
pub struct TemperatureStats {
    #[serde(rename = "Min Temperature")]
    pub min_temperature: Option<f64>,
    #[serde(rename = "Avg Temperature")]
    pub avg_temperature: Option<f64>,
    #[serde(rename = "Max Temperature")]
    pub max_temperature: Option<f64>,
}

/// Row count for a single station
#[derive(Debug, Clone, PartialEq, Eq, FromQueryResult, Serialize)]
pub struct StationActivity {
    pub station_id: String,
    pub observations: i64,
}

#[derive(Debug, FromQueryResult)]
struct DateBoundsRow {
    earliest: Option<String>,
    latest: Option<String>,
}

fn row_count() -> SimpleExpr {
    Func::count(Expr::col((measurement::Entity, measurement::Column::Id))).into()
}

fn date_column() -> Expr {
    Expr::col((measurement::Entity, measurement::Column::Date))
}

fn tobs_column() -> Expr {
    Expr::col((measurement::Entity, measurement::Column::TemperatureObservation))
}

/// Measurement DAO for read-only queries
pub struct MeasurementsDao {
    db: DatabaseConnection,
}

impl MeasurementsDao {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// `(date, precipitation)` pairs on or after `since`, in primary-key order
    pub async fn precipitation_since(
        &self,
        since: NaiveDate,
    ) -> DatabaseResult<Vec<(String, Option<f64>)>> {
        measurement::Entity::find()
            .select_only()
            .column(measurement::Column::Date)
            .column(measurement::Column::Precipitation)
            .filter(measurement::Column::Date.gte(format_date(since)))
            .order_by_asc(measurement::Column::Id)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))
    }

    /// Station with the most rows. Ties resolve to the lowest station id.
    pub async fn most_active_station(&self) -> DatabaseResult<Option<StationActivity>> {
        measurement::Entity::find()
            .select_only()
            .column_as(measurement::Column::StationId, "station_id")
            .column_as(row_count(), "observations")
            .group_by(measurement::Column::StationId)
            .order_by_desc(row_count())
            .order_by_asc(measurement::Column::StationId)
            .into_model::<StationActivity>()
            .one(&self.db)
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))
    }

    /// `(date, temperature)` pairs for one station on or after `since`, in primary-key order
    pub async fn temperatures_for_station_since(
        &self,
        station_id: &str,
        since: NaiveDate,
    ) -> DatabaseResult<Vec<(String, f64)>> {
        measurement::Entity::find()
            .select_only()
            .column(measurement::Column::Date)
            .column(measurement::Column::TemperatureObservation)
            .filter(measurement::Column::StationId.eq(station_id))
            .filter(measurement::Column::Date.gte(format_date(since)))
            .order_by_asc(measurement::Column::Id)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))
    }

    /// Min/avg/max temperature over the range
    pub async fn temperature_stats(&self, range: &DateRange) -> DatabaseResult<TemperatureStats> {
        let mut select = measurement::Entity::find()
            .select_only()
            .column_as(SimpleExpr::from(Func::min(tobs_column())), "min_temperature")
            .column_as(SimpleExpr::from(Func::avg(tobs_column())), "avg_temperature")
            .column_as(SimpleExpr::from(Func::max(tobs_column())), "max_temperature")
            .filter(measurement::Column::Date.gte(format_date(range.start)));

        if let Some(end) = range.end {
            select = select.filter(measurement::Column::Date.lte(format_date(end)));
        }

        let stats = select
            .into_model::<TemperatureStats>()
            .one(&self.db)
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))?;

        Ok(stats.unwrap_or_default())
    }

    /// Total number of measurement rows
    pub async fn count(&self) -> DatabaseResult<u64> {
        measurement::Entity::find()
            .count(&self.db)
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))
    }

    /// Earliest and latest recorded dates
    pub async fn date_bounds(&self) -> DatabaseResult<(Option<String>, Option<String>)> {
        let row = measurement::Entity::find()
            .select_only()
            .column_as(SimpleExpr::from(Func::min(date_column())), "earliest")
            .column_as(SimpleExpr::from(Func::max(date_column())), "latest")
            .into_model::<DateBoundsRow>()
            .one(&self.db)
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))?;

        Ok(row
            .map(|row| (row.earliest, row.latest))
            .unwrap_or((None, None)))
    }
}
