use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Type alias for Result with ProcessorError as the error type
pub type ProcessorResult<T> = Result<T, ProcessorError>;

/// Errors raised while reading or concatenating text files
#[derive(Error, Debug)]
pub enum ProcessorError {
    /// Source path missing
    #[error("File not found: {}", .path.display())]
    FileNotFound { path: PathBuf },

    /// Path exists but cannot be opened for the requested access
    #[error("Permission denied: {}", .path.display())]
    PermissionDenied { path: PathBuf },

    /// Bytes are not valid in the configured encoding
    #[error("Invalid {encoding} data in file {}", .path.display())]
    Decode { path: PathBuf, encoding: String },

    /// Text contains characters the configured encoding cannot represent
    #[error("Text written to {} is not representable in {encoding}", .path.display())]
    Encode { path: PathBuf, encoding: String },

    /// Encoding label that encoding_rs does not recognise
    #[error("Unknown encoding: {0}")]
    UnknownEncoding(String),

    /// Any other IO failure
    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ProcessorError {
    /// Classify an IO error raised while touching `path`
    pub fn from_io(path: &Path, err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => ProcessorError::FileNotFound {
                path: path.to_path_buf(),
            },
            io::ErrorKind::PermissionDenied => ProcessorError::PermissionDenied {
                path: path.to_path_buf(),
            },
            _ => ProcessorError::Io {
                path: path.to_path_buf(),
                source: err,
            },
        }
    }
}

/// Specific errors related to configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Unknown encoding in configuration: {0}")]
    InvalidEncoding(String),

    #[error("Log directory is not writable: {0}")]
    LogDirectoryNotWritable(PathBuf),

    #[error("Invalid configuration format: {0}")]
    InvalidFormat(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::InvalidFormat(err.to_string())
    }
}
