//! Command implementations for the SYNOP processor CLI
//!
//! Each command lives in its own module; shared logging, configuration and
//! output helpers are in [`shared`].

pub mod decode;
pub mod import;
pub mod observe;
pub mod shared;

pub use shared::CommandSummary;

use crate::cli::args::{Args, Commands};
use crate::{Error, Result};

/// Main command runner
///
/// Dispatches to the subcommand handler:
/// - `decode`: decode a bulletin file
/// - `observe`: fetch and print observations
/// - `import`: fetch, decode and archive observations
pub async fn run(args: Args) -> Result<CommandSummary> {
    match args.get_command() {
        Some(Commands::Decode(decode_args)) => decode::run_decode(decode_args).await,
        Some(Commands::Observe(observe_args)) => observe::run_observe(observe_args).await,
        Some(Commands::Import(import_args)) => import::run_import(import_args).await,
        None => Err(Error::configuration("No command given")),
    }
}
