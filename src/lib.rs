//! SYNOP Processor Library
//!
//! A Rust library for decoding WMO FM-12 SYNOP station bulletins into
//! structured surface observations.
//!
//! This library provides tools for:
//! - Splitting a multi-station bulletin into one station's section 1 and section 3
//! - Decoding the positional 5-character groups into a flat field record
//! - Converting coded fields into physical quantities with code table lookups
//! - Orchestrating retrieval, freshness checks and decoding into a result envelope
//! - Archiving decoded observations keyed by station, date and hour

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod code_tables;
        pub mod observation_archive;
        pub mod observation_service;
        pub mod report_source;
        pub mod synop_decoder;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{
    Observation, ObservationResult, RawReport, StationSections, Status, SynopHour, WindUnit,
};
pub use app::services::observation_service::ObservationService;
pub use config::Config;

/// Result type alias for the SYNOP processor
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for retrieval, configuration and archiving
///
/// Decoding itself never produces these: malformed groups degrade to
/// unavailable fields instead.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Hour code outside the synoptic set
    #[error("Invalid hour '{hour}'. Use one of: 00, 03, 06, 09, 12, 15, 18, 21")]
    InvalidHour { hour: String },

    /// Station number that is not a 5-digit WMO index
    #[error("Invalid station number '{station}': expected a 5-digit WMO index")]
    InvalidStation { station: String },

    /// Report retrieval failed
    #[error("Retrieval failed for station {station}: {message}")]
    Retrieval { station: u32, message: String },

    /// Retrieval attempt exceeded its time budget
    #[error("Retrieval timed out after {seconds}s")]
    Timeout { seconds: u64 },

    /// Station line absent from the bulletin
    #[error("Station {station} not found in bulletin")]
    StationNotFound { station: u32 },

    /// Observation archive error
    #[error("Archive error: {message}")]
    Archive { message: String },

    /// Serialization error
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// Date/time parsing error
    #[error("Date/time parsing error: {message}")]
    DateTimeParsing {
        message: String,
        #[source]
        source: chrono::ParseError,
    },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create an invalid hour error
    pub fn invalid_hour(hour: impl Into<String>) -> Self {
        Self::InvalidHour { hour: hour.into() }
    }

    /// Create an invalid station error
    pub fn invalid_station(station: impl Into<String>) -> Self {
        Self::InvalidStation {
            station: station.into(),
        }
    }

    /// Create a retrieval error
    pub fn retrieval(station: u32, message: impl Into<String>) -> Self {
        Self::Retrieval {
            station,
            message: message.into(),
        }
    }

    /// Create a timeout error
    pub fn timeout(seconds: u64) -> Self {
        Self::Timeout { seconds }
    }

    /// Create a station not found error
    pub fn station_not_found(station: u32) -> Self {
        Self::StationNotFound { station }
    }

    /// Create an archive error
    pub fn archive(message: impl Into<String>) -> Self {
        Self::Archive {
            message: message.into(),
        }
    }

    /// Whether retrying the same request could succeed
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Io { .. } | Self::Retrieval { .. } | Self::Timeout { .. })
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<toml::de::Error> for Error {
    fn from(error: toml::de::Error) -> Self {
        Self::Configuration {
            message: format!("Invalid TOML: {}", error),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialization {
            message: error.to_string(),
        }
    }
}

impl From<chrono::ParseError> for Error {
    fn from(error: chrono::ParseError) -> Self {
        Self::DateTimeParsing {
            message: "Date/time parsing failed".to_string(),
            source: error,
        }
    }
}
