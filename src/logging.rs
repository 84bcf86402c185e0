use anyhow::Result; // Importing Result type from anyhow for error handling
use chrono::Local; // Importing Local from chrono to get the current date and time
use crossterm::style::Stylize; // Importing Stylize from crossterm to style log levels
use log::{Level, LevelFilter, Metadata, Record}; // Importing logging types from the log crate
use std::{
    fs::{File, OpenOptions}, // Importing File and OpenOptions for file operations
    io::{self, Write},       // Importing io and the Write trait for console and file output
    path::Path,              // Importing Path to handle file paths
    sync::Mutex,             // Importing Mutex for thread-safe access to files
};

// Define a struct for the Logger
pub struct Logger {
    log_file: Option<Mutex<File>>, // Optional log file wrapped in a Mutex for thread-safe access
    error_file: Option<Mutex<File>>, // Optional error file wrapped in a Mutex for thread-safe access
    level: LevelFilter,              // Log level filter to control which log messages are recorded
    color: bool,                     // Whether levels are colored on the console
}

impl Logger {
    // Build a logger, opening the optional log and error files in append mode
    pub fn new(
        log_path: Option<&Path>,   // Optional path for the log file
        error_path: Option<&Path>, // Optional path for the error file
        level: LevelFilter,        // Log level filter
        color: bool,               // Color console levels
    ) -> Result<Self> {
        Ok(Self {
            log_file: log_path.map(Self::open_append).transpose()?,
            error_file: error_path.map(Self::open_append).transpose()?,
            level,
            color,
        })
    }

    // Install the logger as the global logger
    pub fn init(
        log_path: Option<&Path>,
        error_path: Option<&Path>,
        level: LevelFilter,
        color: bool,
    ) -> Result<()> {
        let logger = Self::new(log_path, error_path, level, color)?;

        // Set the global logger to the newly created logger
        log::set_boxed_logger(Box::new(logger))?;
        // Set the maximum log level
        log::set_max_level(level);

        Ok(())
    }

    fn open_append(path: &Path) -> Result<Mutex<File>> {
        let file = OpenOptions::new()
            .create(true) // Create the file if it doesn't exist
            .append(true) // Append to the file if it exists
            .open(path)?;
        Ok(Mutex::new(file))
    }

    // Format a log record into a string
    fn format_log(&self, record: &Record, color: bool) -> String {
        let level = record.level().to_string();
        // Style the log level based on its severity
        let level_str = if color {
            match record.level() {
                Level::Error => level.red().to_string(), // Red for errors
                Level::Warn => level.yellow().to_string(), // Yellow for warnings
                Level::Info => level.green().to_string(), // Green for info
                Level::Debug => level.blue().to_string(), // Blue for debug
                Level::Trace => level.magenta().to_string(), // Magenta for trace
            }
        } else {
            level
        };

        // Format the log message with the current time, log level, target, and message
        format!(
            "[{}] {} - {}: {}\n",
            Local::now().format("%Y-%m-%d %H:%M:%S"), // Current date and time
            level_str,                                // Styled log level
            record.target(),                          // Target of the log message
            record.args()                             // Log message
        )
    }

    fn write_to(file: &Option<Mutex<File>>, line: &str) {
        if let Some(file) = file {
            if let Ok(mut file) = file.lock() {
                let _ = file.write_all(line.as_bytes());
            }
        }
    }

    fn flush_file(file: &Option<Mutex<File>>) {
        if let Some(file) = file {
            if let Ok(mut file) = file.lock() {
                let _ = file.flush();
            }
        }
    }
}

// Implement the Log trait for the Logger struct
impl log::Log for Logger {
    // Check if a log message should be logged based on its metadata
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level // Only log messages at or below the set log level
    }

    // Log a message
    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        // Console output goes to stderr so stdout stays clean for file contents
        let _ = io::stderr().write_all(self.format_log(record, self.color).as_bytes());

        // Files never receive escape codes
        let plain = self.format_log(record, false);
        Self::write_to(&self.log_file, &plain);
        if record.level() == Level::Error {
            Self::write_to(&self.error_file, &plain);
        }
    }

    // Flush the log files
    fn flush(&self) {
        Self::flush_file(&self.log_file);
        Self::flush_file(&self.error_file);
    }
}
