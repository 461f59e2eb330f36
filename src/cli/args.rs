//! Command-line argument definitions for the SYNOP processor
//!
//! This module defines the complete CLI interface using the clap derive API.

use crate::app::models::SynopHour;
use crate::constants::DEFAULT_LOG_LEVEL;
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::str::FromStr;

/// CLI arguments for the SYNOP bulletin processor
///
/// Decodes WMO FM-12 SYNOP station bulletins into structured surface
/// observations, fetching them from a local directory or an FTPS server.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "synop-processor",
    version,
    about = "Decode WMO FM-12 SYNOP bulletins into structured surface observations",
    long_about = "Fetches SYNOP bulletins for a synoptic hour, locates each station's report, \
                  decodes its section 1 and section 3 groups and converts them into physical \
                  quantities. Decoded observations can be printed or archived as JSON keyed by \
                  station, date and hour."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands for the SYNOP processor
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Decode a bulletin stored in a local file
    Decode(DecodeArgs),
    /// Fetch and decode observations from the configured source
    Observe(ObserveArgs),
    /// Fetch, decode and archive observations for a batch of stations
    Import(ImportArgs),
}

/// Options shared by every command
#[derive(Debug, Clone, Default, ClapArgs)]
pub struct CommonArgs {
    /// Path to configuration file
    ///
    /// TOML configuration file. If not specified, looks for
    /// config.toml in the user's synop-processor config directory.
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    pub config_file: Option<PathBuf>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output except errors
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

impl CommonArgs {
    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => DEFAULT_LOG_LEVEL,
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Check if we should show progress bars (not in quiet mode)
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }

    /// Validate the config file path if one was given
    pub fn validate(&self) -> Result<()> {
        if let Some(config_file) = &self.config_file {
            if !config_file.exists() {
                return Err(Error::configuration(format!(
                    "Config file does not exist: {}",
                    config_file.display()
                )));
            }
        }
        Ok(())
    }
}

/// Arguments for the decode command
#[derive(Debug, Clone, Parser)]
pub struct DecodeArgs {
    /// Bulletin file to decode
    #[arg(short = 'f', long = "file", value_name = "FILE")]
    pub file: PathBuf,

    /// Station number (5-digit WMO index)
    #[arg(short = 's', long = "station", value_name = "NUMBER")]
    pub station: u32,

    /// Synoptic hour of the bulletin
    #[arg(long = "hour", value_name = "HH", value_parser = parse_hour)]
    pub hour: SynopHour,

    /// Reference time for the freshness check (RFC 3339, defaults to now)
    ///
    /// Useful for decoding archived bulletins whose day no longer matches
    /// the current date.
    #[arg(long = "reference-time", value_name = "RFC3339", value_parser = parse_reference_time)]
    pub reference_time: Option<DateTime<Utc>>,

    /// Output format
    #[arg(long = "format", value_enum, default_value = "human")]
    pub output_format: OutputFormat,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Arguments for the observe command
#[derive(Debug, Clone, Parser)]
pub struct ObserveArgs {
    /// Synoptic hour to fetch
    #[arg(long = "hour", value_name = "HH", value_parser = parse_hour)]
    pub hour: SynopHour,

    /// Stations to fetch (repeatable); defaults to the configured list
    #[arg(short = 's', long = "station", value_name = "NUMBER")]
    pub stations: Vec<u32>,

    /// Output format
    #[arg(long = "format", value_enum, default_value = "human")]
    pub output_format: OutputFormat,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Arguments for the import command
#[derive(Debug, Clone, Parser)]
pub struct ImportArgs {
    /// Synoptic hour to import
    #[arg(long = "hour", value_name = "HH", value_parser = parse_hour)]
    pub hour: SynopHour,

    /// Comma-separated station list; defaults to the configured list
    #[arg(long = "stations", value_name = "LIST")]
    pub stations: Option<StationList>,

    /// Archive directory (overrides the configuration)
    #[arg(long = "archive", value_name = "PATH")]
    pub archive_path: Option<PathBuf>,

    /// Replace observations that are already archived
    #[arg(long = "force", help = "Replace observations that are already archived")]
    pub force: bool,

    /// Decode without writing to the archive
    #[arg(
        long = "dry-run",
        help = "Show what would be imported without writing to the archive"
    )]
    pub dry_run: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON format for scripting
    Json,
}

/// Wrapper for parsing comma-separated station lists
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationList {
    pub stations: Vec<u32>,
}

impl FromStr for StationList {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let stations = s
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(parse_station)
            .collect::<Result<Vec<u32>>>()?;

        if stations.is_empty() {
            return Err(Error::configuration("Station list cannot be empty"));
        }

        Ok(StationList { stations })
    }
}

/// Parse a 5-digit WMO station index
pub fn parse_station(s: &str) -> Result<u32> {
    let s = s.trim();
    if s.len() != 5 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::invalid_station(s));
    }
    s.parse().map_err(|_| Error::invalid_station(s))
}

fn parse_hour(s: &str) -> Result<SynopHour> {
    s.parse()
}

fn parse_reference_time(s: &str) -> Result<DateTime<Utc>> {
    Ok(DateTime::parse_from_rfc3339(s)?.with_timezone(&Utc))
}

impl Args {
    /// Get the command if one was specified
    pub fn get_command(&self) -> Option<&Commands> {
        self.command.as_ref()
    }
}

impl Commands {
    /// Subcommand name as typed on the command line
    pub fn name(&self) -> &'static str {
        match self {
            Commands::Decode(_) => "decode",
            Commands::Observe(_) => "observe",
            Commands::Import(_) => "import",
        }
    }

    /// Options shared by every command
    pub fn common(&self) -> &CommonArgs {
        match self {
            Commands::Decode(args) => &args.common,
            Commands::Observe(args) => &args.common,
            Commands::Import(args) => &args.common,
        }
    }
}

impl ObserveArgs {
    /// Validate station numbers given on the command line
    pub fn validate(&self) -> Result<()> {
        self.common.validate()?;
        for station in &self.stations {
            parse_station(&station.to_string())?;
        }
        Ok(())
    }
}

impl DecodeArgs {
    /// Validate the decode command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        self.common.validate()?;
        if !self.file.is_file() {
            return Err(Error::configuration(format!(
                "Bulletin file does not exist: {}",
                self.file.display()
            )));
        }
        parse_station(&self.station.to_string())?;
        Ok(())
    }
}

impl ImportArgs {
    /// Station override from the command line, if any
    pub fn get_stations(&self) -> Option<Vec<u32>> {
        self.stations.as_ref().map(|list| list.stations.clone())
    }
}
