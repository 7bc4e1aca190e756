pub mod dataset;

use crate::Config;
use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// Inspect the climate database
    Dataset {
        #[command(subcommand)]
        action: dataset::DatasetAction,
    },
}

pub async fn handle_command(
    command: Commands,
    config: &Config,
) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Dataset { action } => dataset::handle_dataset_command(action, config).await,
    }
}
