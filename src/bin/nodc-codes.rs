//! nodc-codes CLI binary.

use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use nodc_codes::cli::args::CodesArgs;
use nodc_codes::cli::commands::execute_command;

fn main() {
    // Parse command line arguments using clap
    let args = CodesArgs::parse();

    // Set up logging/verbosity based on args
    let default_level = match args.verbosity() {
        0 => "error", // Quiet mode
        1 => "warn",  // Default
        2 => "info",  // Verbose
        _ => "debug", // Very verbose (3+)
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    // Logs go to stderr so command output stays pipeable.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    // Execute the command
    if let Err(e) = execute_command(args) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
