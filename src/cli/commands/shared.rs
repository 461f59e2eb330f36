//! Shared components for CLI commands
//!
//! This module contains common types, utilities, and functions used across
//! multiple CLI command implementations.

use crate::app::models::ObservationResult;
use crate::cli::args::CommonArgs;
use crate::config::Config;
use crate::{Error, Result};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::fmt::Write as _;
use std::time::Duration;
use tracing::{debug, info};

/// Statistics for reporting across all commands
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandSummary {
    /// Stations requested
    pub total: usize,
    /// Stations decoded successfully
    pub success: usize,
    /// Stations that produced an error envelope
    pub error: usize,
    /// Observations written to the archive (or that would be, in dry-run mode)
    pub imported: usize,
    /// Observations already archived and left untouched
    pub skipped: usize,
    /// Archive writes that failed
    pub failed: usize,
    /// Wall-clock time spent
    pub elapsed: Duration,
}

impl CommandSummary {
    /// Record one observation envelope
    pub fn record(&mut self, result: &ObservationResult) {
        self.total += 1;
        if result.is_success() {
            self.success += 1;
        } else {
            self.error += 1;
        }
    }

    /// Whether any station or archive write failed
    pub fn has_failures(&self) -> bool {
        self.error > 0 || self.failed > 0
    }
}

/// Set up structured logging for a command
pub fn setup_logging(common: &CommonArgs) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = common.get_log_level();

    // Create filter
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("synop_processor={}", log_level)));

    let init = if common.quiet {
        // Minimal logging for quiet mode
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
    } else {
        // Standard logging with timestamps
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };
    init.map_err(|e| Error::configuration(format!("Failed to initialise logging: {}", e)))?;

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Load configuration using layered approach (defaults -> file -> env)
pub fn load_configuration(common: &CommonArgs) -> Result<Config> {
    let default_config_path = if common.config_file.is_none() {
        Config::default_config_path().ok()
    } else {
        None
    };

    let config_file = match &common.config_file {
        Some(path) => Some(path.as_path()),
        None => default_config_path
            .as_ref()
            .filter(|path| path.exists())
            .map(|path| path.as_path()),
    };

    if let Some(config_path) = config_file {
        info!("Using config file: {}", config_path.display());
    } else {
        info!("No config file found, using defaults and environment variables");
    }

    Config::load_layered(config_file)
}

/// Create a progress bar with appropriate styling
pub fn create_progress_bar(total: u64, message: &str) -> ProgressBar {
    let pb = ProgressBar::new(total);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-");
    pb.set_style(style);
    pb.set_message(message.to_string());
    pb
}

fn value(value: Option<f64>, unit: &str) -> String {
    match value {
        Some(v) => format!("{:.1} {}", v, unit),
        None => "n/a".dimmed().to_string(),
    }
}

fn text(value: Option<&str>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "n/a".dimmed().to_string(),
    }
}

/// Render an observation envelope for terminal output
pub fn format_observation(result: &ObservationResult) -> String {
    let mut out = String::new();

    let Some(obs) = &result.observation else {
        let _ = writeln!(
            out,
            "{} {} {}",
            "✗".red(),
            format!("Station {}:", result.station).bold(),
            result.message.red()
        );
        return out;
    };

    let _ = writeln!(
        out,
        "{} {} {} {}",
        "✓".green(),
        format!("Station {}", result.station).bold(),
        obs.date,
        obs.time
    );

    let wind_speed = match (obs.wind_speed, obs.wind_speed_unit) {
        (Some(speed), Some(unit)) => format!("{:.0} {}", speed, unit.label()),
        (Some(speed), None) => format!("{:.0} (unit unknown)", speed),
        (None, _) => "n/a".dimmed().to_string(),
    };

    let rows = [
        ("Temperature", value(obs.temperature, "°C")),
        ("Dew point", value(obs.dew_point, "°C")),
        ("Max / min", format!(
            "{} / {}",
            value(obs.max_temperature, "°C"),
            value(obs.min_temperature, "°C")
        )),
        (
            "Humidity",
            obs.relative_humidity
                .map(|rh| format!("{} %", rh))
                .unwrap_or_else(|| "n/a".dimmed().to_string()),
        ),
        ("Wind", format!(
            "{} {} ({})",
            text(obs.wind_direction.as_deref()),
            wind_speed,
            value(obs.wind_speed_kmh, "km/h")
        )),
        ("Station pressure", value(obs.station_pressure, "hPa")),
        ("Sea level pressure", value(obs.sea_level_pressure, "hPa")),
        ("Precipitation", format!(
            "{} (3h), {} (24h)",
            value(obs.precipitation_3h, "mm"),
            value(obs.precipitation_24h, "mm")
        )),
        ("Visibility", obs.visibility_description.clone()),
        ("Sky", text(obs.sky_condition.as_deref())),
        ("Weather", text(obs.present_weather_description.as_deref())),
    ];

    for (label, rendered) in rows {
        let _ = writeln!(out, "  {:<20} {}", format!("{}:", label), rendered);
    }
    out
}

/// Print a coloured end-of-run summary
pub fn print_summary(summary: &CommandSummary, archived: bool) {
    println!();
    println!("{}", "Summary".bold().underline());
    println!("  Total:    {}", summary.total);
    println!("  Success:  {}", summary.success.to_string().green());
    println!("  Error:    {}", colour_count(summary.error));
    if archived {
        println!("  Imported: {}", summary.imported.to_string().green());
        println!("  Skipped:  {}", summary.skipped.to_string().yellow());
        println!("  Failed:   {}", colour_count(summary.failed));
    }
    println!("  Time:     {}", indicatif::HumanDuration(summary.elapsed));
}

fn colour_count(count: usize) -> ColoredString {
    if count > 0 {
        count.to_string().red()
    } else {
        count.to_string().normal()
    }
}
