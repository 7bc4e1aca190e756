use crate::{
    config::Config,
    database::{
        DatabaseManagerImpl,
        config::DatabaseConfig,
        entities::{measurement, station},
    },
    server::Server,
};
use sea_orm::{ActiveModelTrait, ConnectionTrait, DatabaseConnection, NotSet, Set};
use std::sync::Arc;

/// Table layout of the published Hawaii climate database
pub const CLIMATE_SCHEMA: [&str; 2] = [
    "CREATE TABLE station (id INTEGER NOT NULL, station TEXT, name TEXT, latitude FLOAT, \
     longitude FLOAT, elevation FLOAT, PRIMARY KEY (id))",
    "CREATE TABLE measurement (id INTEGER NOT NULL, station TEXT, date TEXT, prcp FLOAT, \
     tobs FLOAT, PRIMARY KEY (id))",
];

/// A measurement row to insert; ids follow insertion order
#[derive(Debug, Clone)]
pub struct MeasurementSeed {
    pub station: String,
    pub date: String,
    pub precipitation: Option<f64>,
    pub temperature: f64,
}

impl MeasurementSeed {
    pub fn new(station: &str, date: &str, precipitation: Option<f64>, temperature: f64) -> Self {
        Self {
            station: station.to_string(),
            date: date.to_string(),
            precipitation,
            temperature,
        }
    }
}

async fn create_schema(db: &DatabaseConnection) {
    for statement in CLIMATE_SCHEMA {
        db.execute_unprepared(statement).await.unwrap();
    }
}

async fn insert_stations(db: &DatabaseConnection, stations: &[&str]) {
    for (index, station_id) in stations.iter().enumerate() {
        station::ActiveModel {
            id: NotSet,
            station_id: Set(station_id.to_string()),
            name: Set(format!("TEST STATION {}, HI US", index + 1)),
            latitude: Set(21.2716 + index as f64 * 0.01),
            longitude: Set(-157.8168),
            elevation: Set(3.0),
        }
        .insert(db)
        .await
        .unwrap();
    }
}

async fn insert_measurements(db: &DatabaseConnection, rows: &[MeasurementSeed]) {
    for row in rows {
        measurement::ActiveModel {
            id: NotSet,
            station_id: Set(row.station.clone()),
            date: Set(row.date.clone()),
            precipitation: Set(row.precipitation),
            temperature_observation: Set(row.temperature),
        }
        .insert(db)
        .await
        .unwrap();
    }
}

/// In-memory store holding the given stations and measurements
///
/// A single pooled connection keeps every query on the same in-memory database.
pub async fn seeded_database(
    stations: &[&str],
    rows: &[MeasurementSeed],
) -> Arc<DatabaseManagerImpl> {
    let config = DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
    };
    let database = DatabaseManagerImpl::new_from_config(&config).await.unwrap();

    create_schema(&database.connection).await;
    insert_stations(&database.connection, stations).await;
    insert_measurements(&database.connection, rows).await;

    Arc::new(database)
}

/// Test server builder over an in-memory climate store
pub struct TestServerBuilder {
    config: Config,
    stations: Vec<String>,
    measurements: Vec<MeasurementSeed>,
}

impl TestServerBuilder {
    pub fn new() -> Self {
        let mut config = Config::default();
        config.metrics.enabled = false;

        Self {
            config,
            stations: vec!["USC00519397".to_string(), "USC00519281".to_string()],
            measurements: vec![
                MeasurementSeed::new("USC00519397", "2017-08-22", Some(0.0), 82.0),
                MeasurementSeed::new("USC00519281", "2017-08-22", Some(0.5), 76.0),
                MeasurementSeed::new("USC00519397", "2017-08-23", Some(0.0), 81.0),
            ],
        }
    }

    /// Set a custom configuration
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Replace the seeded station identifiers
    pub fn with_stations(mut self, stations: &[&str]) -> Self {
        self.stations = stations.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Replace the seeded measurement rows
    pub fn with_measurements(mut self, measurements: Vec<MeasurementSeed>) -> Self {
        self.measurements = measurements;
        self
    }

    pub fn with_window_days(mut self, window_days: u32) -> Self {
        self.config.dataset.window_days = window_days;
        self
    }

    pub async fn build(self) -> Server {
        let stations: Vec<&str> = self.stations.iter().map(String::as_str).collect();
        let database = seeded_database(&stations, &self.measurements).await;
        Server::with_database(self.config, database).await
    }
}

impl Default for TestServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
