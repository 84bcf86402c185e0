use crate::encoding::TextCodec; // Codec applied to every read and write
use crate::errors::{ProcessorError, ProcessorResult}; // Classified IO errors
use log::debug;
use std::{
    fs::{self, File},       // Import fs helpers and File for output handles
    io::{BufWriter, Write}, // Import buffered writer and the Write trait
    path::Path,             // Import the Path struct for handling file paths
};

// Define a struct for file utility functions
pub struct FileUtils;

impl FileUtils {
    // Read a whole file and decode it with the given codec
    pub fn read_text(path: &Path, codec: &TextCodec) -> ProcessorResult<String> {
        let bytes = fs::read(path).map_err(|e| ProcessorError::from_io(path, e))?;
        debug!("Read {} bytes from {}", bytes.len(), path.display());
        Ok(codec.decode(&bytes, path)?.into_owned())
    }

    // Encode text and replace the contents of the file, creating it if needed
    pub fn write_text(path: &Path, codec: &TextCodec, text: &str) -> ProcessorResult<()> {
        let bytes = codec.encode(text, path)?;
        fs::write(path, &bytes).map_err(|e| ProcessorError::from_io(path, e))?;
        debug!("Wrote {} bytes to {}", bytes.len(), path.display());
        Ok(())
    }

    // Create (or truncate) an output file behind a buffered writer
    pub fn create_output(path: &Path) -> ProcessorResult<BufWriter<File>> {
        let file = File::create(path).map_err(|e| ProcessorError::from_io(path, e))?;
        Ok(BufWriter::new(file))
    }

    // Encode text, append it to an open writer and flush it through to disk
    pub fn append_text(
        writer: &mut BufWriter<File>,
        path: &Path,
        codec: &TextCodec,
        text: &str,
    ) -> ProcessorResult<()> {
        let bytes = codec.encode(text, path)?;
        writer
            .write_all(&bytes)
            .and_then(|_| writer.flush())
            .map_err(|e| ProcessorError::from_io(path, e))
    }
}
