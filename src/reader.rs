use crate::encoding::{StreamingDecoder, TextCodec};
use crate::errors::{ProcessorError, ProcessorResult};
use log::{debug, warn};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::iter::FusedIterator;
use std::path::{Path, PathBuf};

const READ_BUFFER_SIZE: usize = 8 * 1024; // 8KB reads

/// Lazy iterator over the trimmed lines of a file
///
/// The file stays open for as long as the reader is alive and is closed when
/// it is dropped, whether iteration ran to the end or was abandoned. Once the
/// end of the file or an error is reached the reader only yields `None`; to
/// iterate again, open a new reader.
pub struct LineReader {
    path: PathBuf,
    source: BufReader<File>,
    decoder: StreamingDecoder,
    pending: String, // Decoded text not yet handed out
    scanned: usize,  // Prefix of `pending` known to hold no line break
    lines_read: usize,
    eof: bool,
    finished: bool,
}

impl LineReader {
    /// Open `path` for line iteration with the given codec
    pub fn open(path: &Path, codec: TextCodec) -> ProcessorResult<Self> {
        let file = File::open(path).map_err(|e| ProcessorError::from_io(path, e))?;
        debug!("Opened {} for reading ({})", path.display(), codec.name());

        Ok(Self {
            path: path.to_path_buf(),
            source: BufReader::with_capacity(READ_BUFFER_SIZE, file),
            decoder: StreamingDecoder::new(codec),
            pending: String::new(),
            scanned: 0,
            lines_read: 0,
            eof: false,
            finished: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether invalid bytes were replaced with U+FFFD so far
    pub fn had_replacements(&self) -> bool {
        self.decoder.had_replacements()
    }

    /// Number of lines yielded so far
    pub fn lines_read(&self) -> usize {
        self.lines_read
    }

    // Pull the next chunk from the file into `pending`
    fn fill_pending(&mut self) -> ProcessorResult<()> {
        let chunk = self
            .source
            .fill_buf()
            .map_err(|e| ProcessorError::from_io(&self.path, e))?;
        let read = chunk.len();
        self.eof = read == 0;

        self.decoder
            .decode_chunk(chunk, &mut self.pending, self.eof, &self.path)?;
        self.source.consume(read);

        if self.decoder.take_first_replacement() {
            warn!(
                "Invalid {} data in {}: some characters were replaced",
                self.decoder.codec().name(),
                self.path.display()
            );
        }
        Ok(())
    }

    fn take_line(&mut self, end: usize, consumed: usize) -> String {
        let line = self.pending[..end].trim().to_string();
        self.pending.drain(..consumed);
        self.scanned = 0;
        self.lines_read += 1;
        line
    }

    fn finish(&mut self) {
        self.finished = true;
        debug!(
            "Finished reading {} ({} lines)",
            self.path.display(),
            self.lines_read
        );
    }
}

impl Iterator for LineReader {
    type Item = ProcessorResult<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        loop {
            // \n, \r\n and a lone \r all end a line
            if let Some(offset) = self.pending[self.scanned..].find(|c: char| c == '\n' || c == '\r') {
                let end = self.scanned + offset;
                let bytes = self.pending.as_bytes();
                let is_cr = bytes[end] == b'\r';
                let next = bytes.get(end + 1).copied();

                match (is_cr, next) {
                    (true, Some(b'\n')) => return Some(Ok(self.take_line(end, end + 2))),
                    // A \r at the end of the buffer may be the first half of \r\n
                    (true, None) if !self.eof => self.scanned = end,
                    _ => return Some(Ok(self.take_line(end, end + 1))),
                }
            } else {
                self.scanned = self.pending.len();
            }

            if self.eof {
                // Last line without a terminator
                let line = if self.pending.is_empty() {
                    None
                } else {
                    let len = self.pending.len();
                    Some(self.take_line(len, len))
                };
                self.finish();
                return line.map(Ok);
            }

            if let Err(e) = self.fill_pending() {
                self.finished = true;
                return Some(Err(e));
            }
        }
    }
}

impl FusedIterator for LineReader {}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use std::io::Write;
    use tempfile::{tempdir, NamedTempFile};

    fn fixture(bytes: &[u8]) -> Result<NamedTempFile> {
        let mut file = NamedTempFile::new()?;
        file.write_all(bytes)?;
        file.flush()?;
        Ok(file)
    }

    fn collect(path: &Path, codec: TextCodec) -> ProcessorResult<Vec<String>> {
        LineReader::open(path, codec)?.collect()
    }

    #[test]
    fn test_lines_are_trimmed() -> Result<()> {
        let file = fixture(b"  alpha  \n\tbeta\r\n\ngamma")?;
        let lines = collect(file.path(), TextCodec::default())?;
        assert_eq!(lines, vec!["alpha", "beta", "", "gamma"]);
        Ok(())
    }

    #[test]
    fn test_carriage_returns_end_lines() -> Result<()> {
        let file = fixture(b"a\rb\r\nc\n\rd\r")?;
        let lines = collect(file.path(), TextCodec::default())?;
        assert_eq!(lines, vec!["a", "b", "c", "", "d"]);
        Ok(())
    }

    #[test]
    fn test_crlf_split_across_buffer_refill() -> Result<()> {
        // The \r is the last byte of the first buffer and the \n the first of the next
        let first = "x".repeat(READ_BUFFER_SIZE - 1);
        let file = fixture(format!("{first}\r\ny\n").as_bytes())?;
        let lines = collect(file.path(), TextCodec::default())?;
        assert_eq!(lines, vec![first, "y".to_string()]);
        Ok(())
    }

    #[test]
    fn test_replacements_are_reported_before_eof() -> Result<()> {
        let file = fixture(b"caf\xE9\nok\n")?;
        let mut reader = LineReader::open(file.path(), TextCodec::default())?;

        assert_eq!(reader.next().transpose()?, Some("caf\u{FFFD}".to_string()));
        assert!(reader.had_replacements());
        Ok(())
    }

    #[test]
    fn test_line_count_matches_file() -> Result<()> {
        let file = fixture(b"one\ntwo\nthree\n")?;
        let mut reader = LineReader::open(file.path(), TextCodec::default())?;
        assert_eq!(reader.by_ref().count(), 3);
        assert_eq!(reader.lines_read(), 3);
        assert!(reader.next().is_none());
        Ok(())
    }

    #[test]
    fn test_empty_file_yields_nothing() -> Result<()> {
        let file = fixture(b"")?;
        assert!(collect(file.path(), TextCodec::default())?.is_empty());
        Ok(())
    }

    #[test]
    fn test_two_readers_yield_same_lines() -> Result<()> {
        let file = fixture(b"x\ny\n")?;
        let first = collect(file.path(), TextCodec::default())?;
        let second = collect(file.path(), TextCodec::default())?;
        assert_eq!(first, second);
        Ok(())
    }

    #[test]
    fn test_long_lines_span_buffer_refills() -> Result<()> {
        let long = "z".repeat(READ_BUFFER_SIZE * 3 + 17);
        let file = fixture(format!("{long}\nshort\n").as_bytes())?;
        let lines = collect(file.path(), TextCodec::default())?;
        assert_eq!(lines, vec![long, "short".to_string()]);
        Ok(())
    }

    #[test]
    fn test_missing_file() {
        let dir = tempdir().unwrap();
        let err = LineReader::open(&dir.path().join("nope.txt"), TextCodec::default())
            .err()
            .unwrap();
        assert!(matches!(err, ProcessorError::FileNotFound { .. }));
    }

    #[test]
    fn test_strict_decode_error_then_fused() -> Result<()> {
        let file = fixture(b"good\nbad \xFF\nnever\n")?;
        let mut reader = LineReader::open(file.path(), TextCodec::for_label("utf-8")?)?;

        // The whole file fits in one chunk, so decoding fails before any line
        let first = reader.next().unwrap();
        assert!(matches!(first, Err(ProcessorError::Decode { .. })));
        assert!(reader.next().is_none());
        Ok(())
    }

    #[test]
    fn test_latin1_lines() -> Result<()> {
        let file = fixture(b"caf\xE9\nna\xEFve\n")?;
        let lines = collect(file.path(), TextCodec::for_label("latin1")?)?;
        assert_eq!(lines, vec!["café", "naïve"]);
        Ok(())
    }

    #[test]
    fn test_default_codec_replaces_invalid_bytes() -> Result<()> {
        let file = fixture(b"caf\xE9\n")?;
        let lines = collect(file.path(), TextCodec::default())?;
        assert_eq!(lines, vec!["caf\u{FFFD}"]);
        Ok(())
    }
}
