use anyhow::{Context, Result};
use clap::Parser;
use std::process;
use synop_processor::cli::{args::Args, commands};

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    match run(args) {
        Ok(code) => process::exit(code),
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Run the selected command on a fresh runtime, returning the exit code
fn run(args: Args) -> Result<i32> {
    let command = args.get_command().map(|c| c.name()).unwrap_or("synop-processor");
    let runtime = tokio::runtime::Runtime::new().context("Failed to create async runtime")?;

    runtime.block_on(run_command(args, command))
}

async fn run_command(args: Args, command: &str) -> Result<i32> {
    tokio::select! {
        result = commands::run(args) => {
            let summary = result.with_context(|| format!("{} failed", command))?;
            Ok(if summary.has_failures() { 1 } else { 0 })
        }
        signal = tokio::signal::ctrl_c() => {
            signal.context("Failed to listen for CTRL+C")?;
            eprintln!("\nReceived CTRL+C, shutting down...");
            Ok(130)
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("SYNOP Processor - WMO FM-12 SYNOP Bulletin Decoder");
    println!("==================================================");
    println!();
    println!("Decode SYNOP station bulletins into structured surface observations:");
    println!("temperature, humidity, wind, pressure, precipitation, visibility and sky.");
    println!();
    println!("USAGE:");
    println!("    synop-processor <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    decode      Decode a bulletin stored in a local file");
    println!("    observe     Fetch and print observations from the configured source");
    println!("    import      Fetch, decode and archive observations");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Show help information");
    println!("    -V, --version    Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    # Decode one station from a downloaded bulletin:");
    println!("    synop-processor decode --file SM355.00 --station 78355 --hour 00");
    println!();
    println!("    # Print the 12 UTC observations of two stations as JSON:");
    println!("    synop-processor observe --hour 12 -s 78350 -s 78355 --format json");
    println!();
    println!("    # Archive the configured stations, replacing existing entries:");
    println!("    synop-processor import --hour 06 --force");
    println!();
    println!("For detailed help on any command, use:");
    println!("    synop-processor <COMMAND> --help");
}
