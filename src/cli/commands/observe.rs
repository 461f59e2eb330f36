//! Observe command implementation
//!
//! Fetches bulletins through the configured source and prints the decoded
//! observation for each requested station.

use super::shared::{
    CommandSummary, format_observation, load_configuration, print_summary, setup_logging,
};
use crate::app::services::observation_service::ObservationService;
use crate::cli::args::{ObserveArgs, OutputFormat};
use crate::Result;
use chrono::Utc;
use std::time::Instant;
use tracing::{debug, info};

/// Observe command runner
pub async fn run_observe(args: &ObserveArgs) -> Result<CommandSummary> {
    let start_time = Instant::now();

    setup_logging(&args.common)?;
    debug!("Command line arguments: {:?}", args);
    args.validate()?;

    let mut config = load_configuration(&args.common)?;
    if !args.stations.is_empty() {
        config.stations = args.stations.clone();
    }
    config.validate()?;

    let service = ObservationService::from_config(&config)?;
    info!(
        "Fetching {} station(s) for {} UTC",
        service.stations().len(),
        args.hour
    );

    let results = service
        .get_stations_at(args.hour, service.stations(), Utc::now())
        .await;

    let mut summary = CommandSummary::default();
    for result in results.values() {
        summary.record(result);
    }
    summary.elapsed = start_time.elapsed();

    match args.output_format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&results)?),
        OutputFormat::Human => {
            for result in results.values() {
                print!("{}", format_observation(result));
            }
            if !args.common.quiet && results.len() > 1 {
                print_summary(&summary, false);
            }
        }
    }

    Ok(summary)
}
