//! Decode command implementation
//!
//! Decodes a bulletin read from a local file, without touching the
//! configured retrieval source.

use super::shared::{CommandSummary, format_observation, load_configuration, setup_logging};
use crate::app::services::observation_service::evaluate;
use crate::cli::args::{DecodeArgs, OutputFormat};
use crate::{Error, Result};
use chrono::Utc;
use std::time::Instant;
use tracing::{debug, info};

/// Decode command runner
pub async fn run_decode(args: &DecodeArgs) -> Result<CommandSummary> {
    let start_time = Instant::now();

    setup_logging(&args.common)?;
    debug!("Command line arguments: {:?}", args);
    args.validate()?;

    let config = load_configuration(&args.common)?;
    let now = args.reference_time.unwrap_or_else(Utc::now);

    let bytes = tokio::fs::read(&args.file).await.map_err(|e| {
        Error::io(format!("Failed to read bulletin '{}'", args.file.display()), e)
    })?;
    let text = String::from_utf8_lossy(&bytes);
    info!(
        "Decoding station {} from {} ({} bytes)",
        args.station,
        args.file.display(),
        bytes.len()
    );

    let result = evaluate(
        &text,
        args.hour,
        args.station,
        now,
        config.decoding.default_wind_unit,
    );

    match args.output_format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
        OutputFormat::Human => print!("{}", format_observation(&result)),
    }

    let mut summary = CommandSummary::default();
    summary.record(&result);
    summary.elapsed = start_time.elapsed();
    Ok(summary)
}
