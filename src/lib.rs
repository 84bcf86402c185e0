// Declare the processor module, which binds a path to a read/concatenate policy
pub mod processor;

// Declare the reader module, which iterates over the trimmed lines of a file
pub mod reader;

// Declare the policy module, which holds the decoding and separator rules
pub mod policy;

// Declare the encoding module, which resolves and applies text codecs
pub mod encoding;

// Declare the file_utils module, which provides whole-file read and write helpers
pub mod file_utils;

// Declare the errors module, which contains custom error types
pub mod errors;

// Declare the config module, which handles configuration management
pub mod config;

// Declare the logging module, which handles logging of messages and errors
pub mod logging;

// Declare the display module, which colors terminal status lines
pub mod display;

// Declare the cli module, which defines the command-line interface
pub mod cli;

// Declare the commands module, which runs each subcommand
pub mod commands;

pub use errors::{ProcessorError, ProcessorResult};
pub use policy::{ConcatenationPolicy, ProcessorPolicy, MERGE_MARKER};
pub use processor::{combine_paths, is_text_file, FileProcessor};
pub use reader::LineReader;
