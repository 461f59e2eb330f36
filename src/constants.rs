//! Application constants for the SYNOP processor
//!
//! This module contains bulletin markers, sentinel codes, default values
//! and file naming conventions used throughout the decoder and its adapters.

// =============================================================================
// Bulletin Structure
// =============================================================================

/// Bulletin end marker line
pub const BULLETIN_END_MARKER: &str = "NNNN";

/// First token of an FM-12 SYNOP bulletin header (`AAXX YYGGi`)
pub const SYNOP_HEADER_MARKER: &str = "AAXX";

/// Report terminator at the end of a station's data
pub const REPORT_TERMINATOR: char = '=';

/// Token opening section 3 (regional supplementary data)
pub const SECTION_3_MARKER: &str = "333";

// =============================================================================
// Synoptic Hours
// =============================================================================

/// File prefix for main synoptic hours
pub const MAIN_FILE_PREFIX: &str = "SM";

/// File prefix for intermediate synoptic hours
pub const INTERMEDIATE_FILE_PREFIX: &str = "SI";

// =============================================================================
// Decoding Sentinels
// =============================================================================

/// Sentinel values inside precipitation groups
pub mod precipitation {
    /// `RRR` code reporting a trace amount
    pub const TRACE_3H: &str = "990";

    /// `RRR` prefix flagging tenths of a millimetre in the following digit
    pub const TENTHS_PREFIX: &str = "99";

    /// `R24R24R24R24` code reporting a trace amount
    pub const TRACE_24H: &str = "9999";

    /// Amount reported for a trace, in millimetres
    pub const TRACE_AMOUNT_MM: f64 = 0.1;

    /// Amount reported when the group is absent
    pub const ABSENT_AMOUNT_MM: f64 = 0.0;
}

/// Missing-value marker used by some stations in section 3 extremes
pub const MISSING_EXTREME: &str = "--";

/// Sky cover digit meaning "not observed"
pub const SKY_NOT_OBSERVED: &str = "/";

/// Threshold below which a reconstructed pressure lacks its thousands digit
pub const PRESSURE_THOUSANDS_THRESHOLD_HPA: f64 = 500.0;

/// Maximum absolute day difference tolerated between bulletin and clock
pub const MAX_DAY_SKEW: i64 = 1;

// =============================================================================
// Magnus Formula
// =============================================================================

/// Saturation vapour pressure at 0 degC (hPa)
pub const MAGNUS_E0: f64 = 6.112;

/// Magnus coefficient `b`
pub const MAGNUS_B: f64 = 17.67;

/// Magnus coefficient `c` (degC)
pub const MAGNUS_C: f64 = 243.5;

// =============================================================================
// Unit Conversion
// =============================================================================

/// Metres per second to kilometres per hour
pub const MPS_TO_KMH: f64 = 3.6;

/// Knots to kilometres per hour
pub const KNOTS_TO_KMH: f64 = 1.852;

// =============================================================================
// Defaults
// =============================================================================

/// Stations imported when no list is configured
pub const DEFAULT_STATIONS: &[u32] = &[78350, 78351, 78352, 78353, 78354, 78355];

/// Default directory where downloaded report files are found
pub const DEFAULT_OBS_DIR: &str = "./media/obs";

/// Default scratch directory for downloads
pub const DEFAULT_TEMP_DIR: &str = "./media/temp";

/// Default directory for archived observations
pub const DEFAULT_ARCHIVE_DIR: &str = "./observations";

/// Default remote directory holding processed reports
pub const DEFAULT_REMOTE_DIR: &str = "/Reportes Procesados";

/// Default implicit FTPS port
pub const DEFAULT_FTPS_PORT: u16 = 990;

/// Default download attempts
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Default delay between download attempts, seconds
pub const DEFAULT_RETRY_DELAY_SECS: u64 = 5;

/// Default per-attempt download timeout, seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 90;

/// Default verbosity
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Configuration file name inside the user config directory
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Application directory name inside the user config directory
pub const APP_DIR_NAME: &str = "synop-processor";

/// Environment variable overrides
pub mod env_vars {
    pub const FTP_HOST: &str = "SYNOP_FTP_HOST";
    pub const FTP_USER: &str = "SYNOP_FTP_USER";
    pub const FTP_PASSWORD: &str = "SYNOP_FTP_PASSWORD";
    pub const OBS_DIR: &str = "SYNOP_OBS_DIR";
    pub const ARCHIVE_DIR: &str = "SYNOP_ARCHIVE_DIR";
}

// =============================================================================
// Output Formatting
// =============================================================================

/// Date format of the `date` field
pub const OBSERVATION_DATE_FORMAT: &str = "%d/%m/%Y";

/// Time format of the `time` field
pub const OBSERVATION_TIME_FORMAT: &str = "%H:%M";

/// Date format used in archive file names
pub const ARCHIVE_DATE_FORMAT: &str = "%Y-%m-%d";
