// ============================================================================
// Streaming Conversion Module
//
// Decodes a file chunk by chunk into UTF-8 so that line iteration never has
// to hold the whole file, while multi-byte sequences that straddle a chunk
// boundary still decode correctly.
// ============================================================================

use super::{DecodeMode, TextCodec};
use crate::errors::ProcessorResult;
use encoding_rs::{CoderResult, Decoder, DecoderResult};
use std::path::Path;

/// Incremental decoder bound to a single file
pub struct StreamingDecoder {
    codec: TextCodec,
    decoder: Decoder,
    replaced: bool,
    reported: bool,
}

impl StreamingDecoder {
    pub fn new(codec: TextCodec) -> Self {
        Self {
            codec,
            decoder: codec.new_decoder(),
            replaced: false,
            reported: false,
        }
    }

    /// Decode `src` and append the text to `dst`
    ///
    /// `last` must be true exactly once, for the final (possibly empty) chunk,
    /// so that a truncated trailing sequence is reported.
    pub fn decode_chunk(
        &mut self,
        mut src: &[u8],
        dst: &mut String,
        last: bool,
        path: &Path,
    ) -> ProcessorResult<()> {
        loop {
            match self.codec.mode() {
                DecodeMode::Strict => {
                    if let Some(needed) = self
                        .decoder
                        .max_utf8_buffer_length_without_replacement(src.len())
                    {
                        dst.reserve(needed);
                    }
                    let (result, read) =
                        self.decoder
                            .decode_to_string_without_replacement(src, dst, last);
                    src = &src[read..];
                    match result {
                        DecoderResult::InputEmpty => return Ok(()),
                        DecoderResult::OutputFull => continue,
                        DecoderResult::Malformed(_, _) => {
                            return Err(self.codec.decode_error(path))
                        }
                    }
                }
                DecodeMode::Lossy => {
                    if let Some(needed) = self.decoder.max_utf8_buffer_length(src.len()) {
                        dst.reserve(needed);
                    }
                    let (result, read, replaced) = self.decoder.decode_to_string(src, dst, last);
                    self.replaced |= replaced;
                    src = &src[read..];
                    match result {
                        CoderResult::InputEmpty => return Ok(()),
                        CoderResult::OutputFull => continue,
                    }
                }
            }
        }
    }

    /// Whether any replacement characters were produced so far
    pub fn had_replacements(&self) -> bool {
        self.replaced
    }

    /// True exactly once: on the first call after a replacement happened
    pub fn take_first_replacement(&mut self) -> bool {
        if self.replaced && !self.reported {
            self.reported = true;
            return true;
        }
        false
    }

    pub fn codec(&self) -> TextCodec {
        self.codec
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ProcessorError;

    #[test]
    fn test_sequence_split_across_chunks() {
        let mut decoder = StreamingDecoder::new(TextCodec::for_label("utf-8").unwrap());
        let mut out = String::new();
        let bytes = "café".as_bytes();
        let path = Path::new("split.txt");

        decoder
            .decode_chunk(&bytes[..4], &mut out, false, path)
            .unwrap();
        decoder
            .decode_chunk(&bytes[4..], &mut out, false, path)
            .unwrap();
        decoder.decode_chunk(&[], &mut out, true, path).unwrap();

        assert_eq!(out, "café");
        assert!(!decoder.had_replacements());
    }

    #[test]
    fn test_truncated_sequence_is_malformed_when_strict() {
        let mut decoder = StreamingDecoder::new(TextCodec::for_label("utf-8").unwrap());
        let mut out = String::new();
        let path = Path::new("truncated.txt");

        decoder.decode_chunk(b"caf\xC3", &mut out, false, path).unwrap();
        let err = decoder.decode_chunk(&[], &mut out, true, path).unwrap_err();
        assert!(matches!(err, ProcessorError::Decode { .. }));
    }

    #[test]
    fn test_lossy_records_replacements() {
        let mut decoder = StreamingDecoder::new(TextCodec::platform_default());
        let mut out = String::new();

        decoder
            .decode_chunk(b"a\xFFb", &mut out, true, Path::new("bad.txt"))
            .unwrap();
        assert_eq!(out, "a\u{FFFD}b");
        assert!(decoder.had_replacements());
    }

    #[test]
    fn test_first_replacement_reported_once() {
        let mut decoder = StreamingDecoder::new(TextCodec::platform_default());
        let mut out = String::new();
        let path = Path::new("bad.txt");

        decoder.decode_chunk(b"clean\n", &mut out, false, path).unwrap();
        assert!(!decoder.take_first_replacement());

        decoder.decode_chunk(b"\xFF\n", &mut out, false, path).unwrap();
        assert!(decoder.take_first_replacement());

        decoder.decode_chunk(b"\xFE\n", &mut out, true, path).unwrap();
        assert!(!decoder.take_first_replacement());
    }

    #[test]
    fn test_utf16_decoding() {
        let mut decoder = StreamingDecoder::new(TextCodec::for_label("utf-16le").unwrap());
        let mut out = String::new();

        decoder
            .decode_chunk(b"h\x00i\x00\n\x00", &mut out, true, Path::new("wide.txt"))
            .unwrap();
        assert_eq!(out, "hi\n");
    }
}
