// ============================================================================
// txtmerge - Plain-Text Reader & Concatenator
// Main Entry Point
//
// Parses the command line, loads the optional JSON configuration, installs
// the logger and hands the selected subcommand to the command handler.
// ============================================================================

use anyhow::{Context, Result}; // Error handling with context
use clap::Parser; // Command-line argument parsing with derive macros
use log::{debug, error}; // Structured logging for debugging and monitoring
use std::process::ExitCode; // Process exit status

use txtmerge::cli::Cli; // CLI structure
use txtmerge::commands::CommandHandler; // Command processing
use txtmerge::config::Config; // Configuration file management
use txtmerge::logging::Logger; // Console and file logger

fn main() -> Result<ExitCode> {
    // ========================================================================
    // INITIALIZATION PHASE
    // ========================================================================

    // Failures before the logger exists are reported by returning them
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => {
            let config = Config::load(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?;
            config.validate().context("Invalid configuration")?;
            config
        }
        None => Config::default(),
    };

    Logger::init(
        config.log_file.as_deref(),
        config.error_file.as_deref(),
        cli.log_level(),
        config.color && !cli.no_color,
    )
    .context("Failed to initialize logging")?;

    debug!("txtmerge starting up (verbosity {})", cli.verbose_count());

    // ========================================================================
    // COMMAND DISPATCH PHASE
    // ========================================================================

    // From here on failures are logged once, which also reaches the error file
    let handler = CommandHandler::new(&config, cli.no_color);
    if let Err(e) = handler.dispatch(cli.command) {
        error!("{:#}", e);
        return Ok(ExitCode::FAILURE);
    }

    debug!("txtmerge operation completed");
    Ok(ExitCode::SUCCESS)
}
