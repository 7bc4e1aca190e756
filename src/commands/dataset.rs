use crate::{
    Config,
    climate::format_date,
    database::{DatabaseManager, DatabaseManagerImpl, DatabaseResult, StationActivity},
};
use clap::Subcommand;
use tracing::info;

#[derive(Subcommand)]
pub enum DatasetAction {
    /// Print row counts, date coverage and the most active station
    Summary,
    /// Verify the store is reachable and both tables are queryable
    Check,
}

/// Shape of the configured climate store
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetSummary {
    pub stations: u64,
    pub measurements: u64,
    pub earliest_date: Option<String>,
    pub latest_date: Option<String>,
    pub most_active: Option<StationActivity>,
    pub most_active_name: Option<String>,
}

pub async fn summarize(database: &dyn DatabaseManager) -> DatabaseResult<DatasetSummary> {
    let stations = database.stations().count().await?;
    let measurements = database.measurements().count().await?;
    let (earliest_date, latest_date) = database.measurements().date_bounds().await?;
    let most_active = database.measurements().most_active_station().await?;

    let most_active_name = match &most_active {
        Some(activity) => database
            .stations()
            .find_by_station_id(&activity.station_id)
            .await?
            .map(|station| station.name),
        None => None,
    };

    Ok(DatasetSummary {
        stations,
        measurements,
        earliest_date,
        latest_date,
        most_active,
        most_active_name,
    })
}

pub async fn handle_dataset_command(
    action: DatasetAction,
    config: &Config,
) -> Result<(), Box<dyn std::error::Error>> {
    let database = DatabaseManagerImpl::new_from_config(&config.database).await?;

    match action {
        DatasetAction::Summary => {
            let summary = summarize(&database).await?;
            let unknown = || "n/a".to_string();

            println!("Stations:           {}", summary.stations);
            println!("Measurements:       {}", summary.measurements);
            println!(
                "Earliest date:      {}",
                summary.earliest_date.unwrap_or_else(unknown)
            );
            println!(
                "Latest date:        {}",
                summary.latest_date.unwrap_or_else(unknown)
            );
            match summary.most_active {
                Some(activity) => println!(
                    "Most active:        {} ({}) with {} observations",
                    activity.station_id,
                    summary.most_active_name.unwrap_or_else(unknown),
                    activity.observations
                ),
                None => println!("Most active:        n/a"),
            }
            println!(
                "Reference date:     {} (window {} days)",
                format_date(config.dataset.reference_date),
                config.dataset.window_days
            );
        }
        DatasetAction::Check => {
            database.health_check().await?;
            database.verify_schema().await?;
            info!("Dataset at {} is ready", config.database.url);
            println!("OK");
        }
    }

    database.close().await?;
    Ok(())
}
