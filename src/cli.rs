// ============================================================================
// CLI Module - Command-Line Interface Definitions
//
// This module defines the command-line interface for txtmerge using the clap
// crate with derive macros. Each subcommand maps onto one processor
// operation: reading lines, joining two files, merging many files, combining
// names and classifying file names.
// ============================================================================

use clap::{Parser, Subcommand}; // Command-line parsing with derive macros
use log::LevelFilter; // Logging level configuration
use std::path::PathBuf; // Cross-platform file path handling

// ============================================================================
// MAIN CLI STRUCTURE
// ============================================================================

/// txtmerge - Plain-text file reader and concatenator
///
/// Reads text files line by line and joins them into a single output file,
/// either with the default trimmed joining or, when an encoding is given,
/// with raw joining around a `---MERGED---` marker.
///
/// Examples:
///   txtmerge read sample1.txt
///   txtmerge concat sample1.txt sample2.txt -o output.txt
///   txtmerge merge -o combined.txt a.txt b.txt c.txt
///   txtmerge check notes.txt notes.TXT
#[derive(Parser)]
#[command(
    name = "txtmerge",
    about = "Read and concatenate plain-text files",
    version,
    after_help = "Examples:\n  \
                  txtmerge read sample1.txt\n  \
                  txtmerge concat sample1.txt sample2.txt -o output.txt\n  \
                  txtmerge concat sample1.txt sample2.txt -o output.txt --encoding latin1\n  \
                  txtmerge merge -o combined.txt a.txt b.txt c.txt\n  \
                  txtmerge generate-config txtmerge.json"
)]
pub struct Cli {
    /// Increase verbosity level (can be used multiple times)
    #[arg(
        global = true,
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase verbosity (-v: debug, -vv: trace)"
    )]
    verbose: u8,

    /// Set the logging level explicitly
    #[arg(
        global = true,
        long,
        value_name = "LEVEL",
        help = "Set log level explicitly [error|warn|info|debug|trace]",
        long_help = "Set the logging level explicitly instead of using verbose flags.\n\
                     Available levels (in order of verbosity):\n\
                     - error: Only failures\n\
                     - warn: Lossy decoding and other suspicious input\n\
                     - info: Files read and written\n\
                     - debug: Per-file detail\n\
                     - trace: Everything\n\n\
                     Note: This overrides any -v flags if specified."
    )]
    log_level: Option<String>,

    /// JSON configuration file
    #[arg(
        global = true,
        short = 'c',
        long = "config",
        help = "JSON configuration file with default settings",
        value_name = "FILE"
    )]
    pub config: Option<PathBuf>,

    /// Disable colored output
    #[arg(global = true, long = "no-color", help = "Disable colored output")]
    pub no_color: bool,

    /// The operation to perform
    #[command(subcommand)]
    pub command: Commands,
}

// ============================================================================
// SUBCOMMAND DEFINITIONS
// ============================================================================

/// Available subcommands for different operations
#[derive(Subcommand)]
pub enum Commands {
    /// Print the trimmed lines of a file
    #[command(about = "Print the lines of a file with surrounding whitespace removed")]
    Read(ReadArgs),

    /// Join two files into one
    #[command(
        about = "Concatenate two files into an output file",
        long_about = "Concatenate two files into an output file.\n\n\
                      Without --encoding, trailing whitespace is trimmed from both files and \
                      the non-empty bodies are joined by a single newline.\n\
                      With --encoding, both files are copied verbatim with a \
                      '---MERGED---' marker line between them."
    )]
    Concat(ConcatArgs),

    /// Merge any number of files in order
    #[command(
        about = "Merge several files into an output file, one newline after each"
    )]
    Merge(MergeArgs),

    /// Print the underscore-joined name of two paths
    #[command(about = "Combine two file names with an underscore")]
    Combine(CombineArgs),

    /// Report whether names end with .txt
    #[command(about = "Check whether file names end with .txt")]
    Check(CheckArgs),

    /// Generate a configuration file template
    #[command(about = "Generate a JSON configuration file template")]
    GenerateConfig(GenerateConfigArgs),
}

// Arguments for the read command
#[derive(Parser, Clone)]
pub struct ReadArgs {
    #[arg(help = "File to read", value_name = "FILE")]
    pub file: PathBuf,

    #[arg(
        short = 'e',
        long = "encoding",
        help = "Decode with this encoding (e.g. utf-8, latin1)",
        value_name = "LABEL"
    )]
    pub encoding: Option<String>,
}

// Arguments for the concat command
#[derive(Parser, Clone)]
pub struct ConcatArgs {
    #[arg(help = "First input file", value_name = "FIRST")]
    pub first: PathBuf,

    #[arg(help = "Second input file", value_name = "SECOND")]
    pub second: PathBuf,

    #[arg(short = 'o', long = "output", help = "Destination file", value_name = "FILE")]
    pub output: PathBuf,

    #[arg(
        short = 'e',
        long = "encoding",
        help = "Read and write with this encoding and join around a marker line",
        value_name = "LABEL"
    )]
    pub encoding: Option<String>,
}

// Arguments for the merge command
#[derive(Parser, Clone)]
pub struct MergeArgs {
    #[arg(short = 'o', long = "output", help = "Destination file", value_name = "FILE")]
    pub output: PathBuf,

    #[arg(
        required = true,
        help = "Input files, merged in the order given",
        value_name = "FILES"
    )]
    pub files: Vec<PathBuf>,

    #[arg(
        short = 'e',
        long = "encoding",
        help = "Read and write with this encoding",
        value_name = "LABEL"
    )]
    pub encoding: Option<String>,
}

// Arguments for the combine command
#[derive(Parser, Clone)]
pub struct CombineArgs {
    #[arg(value_name = "FIRST")]
    pub first: PathBuf,

    #[arg(value_name = "SECOND")]
    pub second: PathBuf,
}

// Arguments for the check command
#[derive(Parser, Clone)]
pub struct CheckArgs {
    #[arg(required = true, help = "File names to classify", value_name = "NAMES")]
    pub names: Vec<String>,
}

// Arguments for the generate-config command
#[derive(Parser, Clone)]
pub struct GenerateConfigArgs {
    #[arg(help = "Destination path for configuration file", value_name = "FILE")]
    pub output: PathBuf,
}

// Implementation of helper methods for the Cli struct
impl Cli {
    // Explicit --log-level wins, otherwise -v flags raise the level from warn
    pub fn log_level(&self) -> LevelFilter {
        if let Some(level) = &self.log_level {
            return match level.to_ascii_lowercase().as_str() {
                "error" => LevelFilter::Error,
                "warn" => LevelFilter::Warn,
                "info" => LevelFilter::Info,
                "debug" => LevelFilter::Debug,
                "trace" => LevelFilter::Trace,
                "off" => LevelFilter::Off,
                _ => LevelFilter::Info,
            };
        }

        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }

    pub fn verbose_count(&self) -> u8 {
        self.verbose
    }
}
