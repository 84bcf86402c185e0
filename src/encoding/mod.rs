// ============================================================================
// Encoding Module - Public API
//
// Resolves the text codec a processor reads and writes with. The default
// codec is UTF-8 with replacement characters for invalid input, so it never
// fails; an explicit encoding label selects a strict codec that reports
// malformed input as a decode error.
// ============================================================================

use crate::errors::{ProcessorError, ProcessorResult};
use encoding_rs::{Decoder, Encoding, UTF_16BE, UTF_16LE, UTF_8};
use log::warn;
use std::borrow::Cow;
use std::path::Path;

pub mod converter;

pub use converter::StreamingDecoder;

/// How malformed byte sequences are handled while decoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeMode {
    /// Substitute U+FFFD and log a warning
    Lossy,

    /// Fail with a decode error
    Strict,
}

/// An encoding paired with the decode mode used for every read of a processor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextCodec {
    encoding: &'static Encoding,
    mode: DecodeMode,
}

impl TextCodec {
    /// The codec used when no encoding has been configured
    pub fn platform_default() -> Self {
        Self {
            encoding: UTF_8,
            mode: DecodeMode::Lossy,
        }
    }

    /// Resolve a WHATWG encoding label such as `"utf-8"` or `"latin1"`
    pub fn for_label(label: &str) -> ProcessorResult<Self> {
        Encoding::for_label(label.as_bytes())
            .map(|encoding| Self {
                encoding,
                mode: DecodeMode::Strict,
            })
            .ok_or_else(|| ProcessorError::UnknownEncoding(label.to_string()))
    }

    pub fn encoding(&self) -> &'static Encoding {
        self.encoding
    }

    /// Canonical name of the encoding, e.g. `windows-1252` for `latin1`
    pub fn name(&self) -> &'static str {
        self.encoding.name()
    }

    pub fn mode(&self) -> DecodeMode {
        self.mode
    }

    pub fn is_strict(&self) -> bool {
        self.mode == DecodeMode::Strict
    }

    /// Fresh incremental decoder; BOMs are treated as content
    pub fn new_decoder(&self) -> Decoder {
        self.encoding.new_decoder_without_bom_handling()
    }

    /// Decode a complete file body read from `path`
    pub fn decode<'a>(&self, bytes: &'a [u8], path: &Path) -> ProcessorResult<Cow<'a, str>> {
        match self.mode {
            DecodeMode::Strict => self
                .encoding
                .decode_without_bom_handling_and_without_replacement(bytes)
                .ok_or_else(|| self.decode_error(path)),
            DecodeMode::Lossy => {
                let (text, had_errors) = self.encoding.decode_without_bom_handling(bytes);
                if had_errors {
                    warn!(
                        "Invalid {} data in {}: some characters were replaced",
                        self.name(),
                        path.display()
                    );
                }
                Ok(text)
            }
        }
    }

    /// Encode text destined for `path`
    ///
    /// Characters the target encoding cannot represent are an error rather
    /// than being rewritten as numeric character references. UTF-16 is
    /// written as UTF-16 without a BOM.
    pub fn encode<'a>(&self, text: &'a str, path: &Path) -> ProcessorResult<Cow<'a, [u8]>> {
        if self.encoding == UTF_16LE {
            return Ok(Cow::Owned(text.encode_utf16().flat_map(u16::to_le_bytes).collect()));
        }
        if self.encoding == UTF_16BE {
            return Ok(Cow::Owned(text.encode_utf16().flat_map(u16::to_be_bytes).collect()));
        }

        let (bytes, output_encoding, had_unmappable) = self.encoding.encode(text);
        // encoding_rs falls back to UTF-8 for encodings it cannot write
        if had_unmappable || output_encoding != self.encoding {
            return Err(self.encode_error(path));
        }
        Ok(bytes)
    }

    fn encode_error(&self, path: &Path) -> ProcessorError {
        ProcessorError::Encode {
            path: path.to_path_buf(),
            encoding: self.name().to_string(),
        }
    }

    pub(crate) fn decode_error(&self, path: &Path) -> ProcessorError {
        ProcessorError::Decode {
            path: path.to_path_buf(),
            encoding: self.name().to_string(),
        }
    }
}

impl Default for TextCodec {
    fn default() -> Self {
        Self::platform_default()
    }
}
