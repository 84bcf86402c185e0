use crate::encoding::TextCodec;
use crate::errors::ProcessorResult;
use std::fmt;

/// Marker line placed between the two sources of an encoding-aware merge
pub const MERGE_MARKER: &str = "\n---MERGED---\n";

/// How a processor decodes its files and joins two of them
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ProcessorPolicy {
    /// Lossy UTF-8 and trimmed joining
    #[default]
    Default,

    /// Explicit encoding and raw joining around [`MERGE_MARKER`]
    EncodingAware(TextCodec),
}

impl ProcessorPolicy {
    /// Encoding-aware policy for a label such as `"utf-8"`
    pub fn encoding_aware(label: &str) -> ProcessorResult<Self> {
        TextCodec::for_label(label).map(ProcessorPolicy::EncodingAware)
    }

    /// Codec used for every read and write under this policy
    pub fn codec(&self) -> TextCodec {
        match self {
            ProcessorPolicy::Default => TextCodec::platform_default(),
            ProcessorPolicy::EncodingAware(codec) => *codec,
        }
    }

    /// Separator policy of the two-file concatenation
    pub fn pair_policy(&self) -> ConcatenationPolicy {
        match self {
            ProcessorPolicy::Default => ConcatenationPolicy::SingleNewlineIfBothNonEmpty,
            ProcessorPolicy::EncodingAware(_) => ConcatenationPolicy::ExplicitSeparatorMarker,
        }
    }
}

impl fmt::Display for ProcessorPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessorPolicy::Default => write!(f, "default"),
            ProcessorPolicy::EncodingAware(codec) => write!(f, "encoding-aware ({})", codec.name()),
        }
    }
}

/// Rule for joining decoded file bodies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConcatenationPolicy {
    /// Trailing whitespace trimmed from every body, empty bodies skipped,
    /// one `\n` between the rest and none at the end
    SingleNewlineIfBothNonEmpty,

    /// Bodies kept verbatim, each followed by one `\n`
    RawPassthroughWithTrailingNewlinePerFile,

    /// Bodies kept verbatim with [`MERGE_MARKER`] between them, even when empty
    ExplicitSeparatorMarker,
}

impl ConcatenationPolicy {
    pub fn join<S: AsRef<str>>(&self, bodies: &[S]) -> String {
        match self {
            ConcatenationPolicy::SingleNewlineIfBothNonEmpty => bodies
                .iter()
                .map(|body| body.as_ref().trim_end())
                .filter(|body| !body.is_empty())
                .collect::<Vec<_>>()
                .join("\n"),
            ConcatenationPolicy::RawPassthroughWithTrailingNewlinePerFile => {
                bodies.iter().fold(String::new(), |mut out, body| {
                    out.push_str(body.as_ref());
                    out.push('\n');
                    out
                })
            }
            ConcatenationPolicy::ExplicitSeparatorMarker => bodies
                .iter()
                .map(|body| body.as_ref())
                .collect::<Vec<_>>()
                .join(MERGE_MARKER),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRIMMED: ConcatenationPolicy = ConcatenationPolicy::SingleNewlineIfBothNonEmpty;
    const RAW: ConcatenationPolicy = ConcatenationPolicy::RawPassthroughWithTrailingNewlinePerFile;
    const MARKED: ConcatenationPolicy = ConcatenationPolicy::ExplicitSeparatorMarker;

    #[test]
    fn test_trimmed_join() {
        assert_eq!(TRIMMED.join(&["A", "B"]), "A\nB");
        assert_eq!(TRIMMED.join(&["A\n\n", "B \n"]), "A\nB");
        assert_eq!(TRIMMED.join(&["", "B"]), "B");
        assert_eq!(TRIMMED.join(&["A", "\n  \n"]), "A");
        assert_eq!(TRIMMED.join(&["", ""]), "");
    }

    #[test]
    fn test_trimmed_join_keeps_leading_whitespace() {
        assert_eq!(TRIMMED.join(&["  A", "\tB"]), "  A\n\tB");
    }

    #[test]
    fn test_raw_join_adds_newline_per_body() {
        assert_eq!(RAW.join(&["X\n", "Y", "Z\n"]), "X\n\nY\nZ\n\n");
        assert_eq!(RAW.join(&[""]), "\n");
    }

    #[test]
    fn test_marker_join_ignores_emptiness() {
        assert_eq!(MARKED.join(&["a\n", "b\n"]), "a\n\n---MERGED---\nb\n");
        assert_eq!(MARKED.join(&["", ""]), "\n---MERGED---\n");
    }

    #[test]
    fn test_policy_selection() {
        assert_eq!(ProcessorPolicy::default().pair_policy(), TRIMMED);
        let aware = ProcessorPolicy::encoding_aware("utf-8").unwrap();
        assert_eq!(aware.pair_policy(), MARKED);
        assert_eq!(aware.to_string(), "encoding-aware (UTF-8)");
    }
}
