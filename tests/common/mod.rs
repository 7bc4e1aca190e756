use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use climate_api::{Config, Server};
use sea_orm::{ConnectionTrait, Database};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

/// Stations in table order
pub const STATIONS: [(&str, &str); 3] = [
    ("USC00519397", "WAIKIKI 717.2, HI US"),
    ("USC00513117", "KANEOHE 838.1, HI US"),
    ("USC00519281", "WAIHEE 837.5, HI US"),
];

/// (station, date, prcp, tobs) rows in table order
pub const MEASUREMENTS: [(&str, &str, Option<f64>, f64); 10] = [
    ("USC00519281", "2016-08-22", Some(0.40), 77.0),
    ("USC00519397", "2016-08-23", Some(0.00), 81.0),
    ("USC00519281", "2016-08-23", Some(1.79), 77.0),
    ("USC00519281", "2017-01-15", None, 65.0),
    ("USC00513117", "2017-03-01", Some(2.20), 70.0),
    ("USC00519281", "2017-05-10", Some(0.02), 74.0),
    ("USC00519281", "2017-08-18", Some(0.06), 79.0),
    ("USC00519397", "2017-08-21", Some(0.00), 81.0),
    ("USC00513117", "2017-08-23", Some(0.00), 82.0),
    ("USC00519397", "2017-08-23", Some(0.08), 76.0),
];

fn sql_real(value: Option<f64>) -> String {
    value.map_or_else(|| "NULL".to_string(), |v| v.to_string())
}

/// Create a climate database file the way the published dataset lays it out
pub async fn create_climate_database(dir: &TempDir, with_tables: bool) -> String {
    let path = dir.path().join("hawaii.sqlite");
    let db = Database::connect(format!("sqlite://{}?mode=rwc", path.display()))
        .await
        .unwrap();

    if with_tables {
        db.execute_unprepared(
            "CREATE TABLE station (id INTEGER NOT NULL, station TEXT, name TEXT, \
             latitude FLOAT, longitude FLOAT, elevation FLOAT, PRIMARY KEY (id))",
        )
        .await
        .unwrap();
        db.execute_unprepared(
            "CREATE TABLE measurement (id INTEGER NOT NULL, station TEXT, date TEXT, \
             prcp FLOAT, tobs FLOAT, PRIMARY KEY (id))",
        )
        .await
        .unwrap();

        for (station, name) in STATIONS {
            db.execute_unprepared(&format!(
                "INSERT INTO station (station, name, latitude, longitude, elevation) \
                 VALUES ('{station}', '{name}', 21.2716, -157.8168, 3.0)"
            ))
            .await
            .unwrap();
        }
        for (station, date, prcp, tobs) in MEASUREMENTS {
            db.execute_unprepared(&format!(
                "INSERT INTO measurement (station, date, prcp, tobs) \
                 VALUES ('{station}', '{date}', {}, {tobs})",
                sql_real(prcp)
            ))
            .await
            .unwrap();
        }
    }

    db.close().await.unwrap();
    format!("sqlite://{}?mode=ro", path.display())
}

/// Test config pointed at a database file
pub fn test_config(database_url: String) -> Config {
    let mut config = Config::default();
    config.database.url = database_url;
    config.metrics.enabled = false;
    config
}

/// Server over a seeded read-only database file
pub struct TestHarness {
    #[allow(dead_code)]
    pub config: Config,
    pub app: Router,
    _dir: TempDir,
}

impl TestHarness {
    pub async fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let url = create_climate_database(&dir, true).await;
        let config = test_config(url);

        let server = Server::new(config.clone()).await.unwrap();
        let app = server.create_app();

        Self {
            config,
            app,
            _dir: dir,
        }
    }

    /// GET a path, returning status and raw body
    pub async fn get_raw(&self, uri: &str) -> (StatusCode, Vec<u8>) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, body.to_vec())
    }

    /// GET a path, decoding the body as JSON
    #[allow(dead_code)]
    pub async fn get_json(&self, uri: &str) -> (StatusCode, Value) {
        let (status, body) = self.get_raw(uri).await;
        (status, serde_json::from_slice(&body).unwrap())
    }
}
