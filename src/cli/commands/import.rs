//! Import command implementation
//!
//! Fetches and decodes each station's observation for one synoptic hour and
//! stores the successful ones in the JSON archive. Stations are imported one
//! after another; a failing station is counted and the batch carries on.

use super::shared::{
    CommandSummary, create_progress_bar, load_configuration, print_summary, setup_logging,
};
use crate::app::models::SynopHour;
use crate::app::services::observation_archive::{ObservationArchive, UpsertOutcome};
use crate::app::services::observation_service::ObservationService;
use crate::cli::args::ImportArgs;
use crate::Result;
use chrono::{DateTime, Utc};
use colored::*;
use indicatif::ProgressBar;
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// Behaviour switches for an import run
#[derive(Debug, Clone, Copy, Default)]
pub struct ImportOptions {
    /// Replace documents that are already archived
    pub force: bool,
    /// Decode and count without writing
    pub dry_run: bool,
}

/// Import command runner
pub async fn run_import(args: &ImportArgs) -> Result<CommandSummary> {
    let start_time = Instant::now();

    setup_logging(&args.common)?;
    debug!("Command line arguments: {:?}", args);
    args.common.validate()?;

    let mut config = load_configuration(&args.common)?;
    if let Some(stations) = args.get_stations() {
        config.stations = stations;
    }
    if let Some(path) = &args.archive_path {
        config.archive.path = path.clone();
    }
    config.validate()?;

    let service = ObservationService::from_config(&config)?;
    let archive = ObservationArchive::from_config(&config.archive);
    let options = ImportOptions {
        force: args.force,
        dry_run: args.dry_run,
    };

    if options.dry_run {
        println!("{}", "DRY RUN - nothing will be written".yellow().bold());
    }
    info!(
        "Importing {} station(s) for {} UTC into {}",
        config.stations.len(),
        args.hour,
        archive.root().display()
    );

    let progress = args.common.show_progress().then(|| {
        create_progress_bar(config.stations.len() as u64, "Importing observations")
    });

    let mut summary = import_observations(
        &service,
        &archive,
        args.hour,
        &config.stations,
        options,
        Utc::now(),
        progress.as_ref(),
    )
    .await;
    summary.elapsed = start_time.elapsed();

    if let Some(pb) = progress {
        pb.finish_and_clear();
    }
    if !args.common.quiet {
        print_summary(&summary, true);
    }

    Ok(summary)
}

/// Fetch, decode and archive every station in `stations`
pub async fn import_observations(
    service: &ObservationService,
    archive: &ObservationArchive,
    hour: SynopHour,
    stations: &[u32],
    options: ImportOptions,
    now: DateTime<Utc>,
    progress: Option<&ProgressBar>,
) -> CommandSummary {
    let mut summary = CommandSummary::default();

    for &station in stations {
        if let Some(pb) = progress {
            pb.set_message(format!("station {}", station));
        }

        let result = service.get_observation_at(hour, station, now).await;
        summary.record(&result);

        match &result.observation {
            None => {
                warn!("Station {}: {}", station, result.message);
            }
            Some(observation) => {
                let date = observation.observed_at.date_naive();
                if !options.force && archive.exists(station, date, hour).await {
                    info!("Station {}: {} {} already archived", station, date, hour);
                    summary.skipped += 1;
                } else if options.dry_run {
                    info!("Station {}: would archive {} {}", station, date, hour);
                    summary.imported += 1;
                } else {
                    match archive.upsert(&result, hour).await {
                        Ok(UpsertOutcome::Created) => {
                            info!("Station {}: archived {} {}", station, date, hour);
                            summary.imported += 1;
                        }
                        Ok(UpsertOutcome::Updated) => {
                            info!("Station {}: replaced {} {}", station, date, hour);
                            summary.imported += 1;
                        }
                        Err(e) => {
                            error!("Station {}: archive write failed: {}", station, e);
                            summary.failed += 1;
                        }
                    }
                }
            }
        }

        if let Some(pb) = progress {
            pb.inc(1);
        }
    }

    summary
}
