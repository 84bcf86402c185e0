use crate::errors::ProcessorResult;
use crate::file_utils::FileUtils;
use crate::policy::{ConcatenationPolicy, ProcessorPolicy};
use crate::reader::LineReader;
use log::{debug, info};
use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};

const SUCCESS_MESSAGE: &str = "File processed successfully!";

/// A file path bound to the policy used to read and concatenate it
#[derive(Debug, Clone, PartialEq)]
pub struct FileProcessor {
    /// The bound path; may be reassigned freely
    pub path: PathBuf,
    policy: ProcessorPolicy,
}

impl FileProcessor {
    /// Processor using the default policy
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_policy(path, ProcessorPolicy::Default)
    }

    /// Processor that reads and writes with the encoding named by `label`
    pub fn with_encoding(path: impl Into<PathBuf>, label: &str) -> ProcessorResult<Self> {
        Ok(Self::with_policy(path, ProcessorPolicy::encoding_aware(label)?))
    }

    pub fn with_policy(path: impl Into<PathBuf>, policy: ProcessorPolicy) -> Self {
        Self {
            path: path.into(),
            policy,
        }
    }

    /// Named constructor for a processor bound to an existing file name
    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        Self::new(path)
    }

    pub fn policy(&self) -> &ProcessorPolicy {
        &self.policy
    }

    /// Open the bound file and iterate over its trimmed lines
    pub fn read_lines(&self) -> ProcessorResult<LineReader> {
        LineReader::open(&self.path, self.policy.codec())
    }

    /// Join the bound file and `other` into `output`
    ///
    /// Under the default policy trailing whitespace is trimmed from both
    /// bodies and the non-empty ones are joined by a single newline. Under
    /// the encoding-aware policy the raw bodies are joined around the
    /// `---MERGED---` marker line. Both sources are read before `output` is
    /// touched.
    pub fn concat_files(
        &self,
        other: impl AsRef<Path>,
        output: impl AsRef<Path>,
    ) -> ProcessorResult<()> {
        let (other, output) = (other.as_ref(), output.as_ref());
        let codec = self.policy.codec();
        let separator = self.policy.pair_policy();

        info!(
            "Reading from: {} and {}",
            self.path.display(),
            other.display()
        );
        let first = FileUtils::read_text(&self.path, &codec)?;
        let second = FileUtils::read_text(other, &codec)?;

        info!("Writing to: {}", output.display());
        let merged = separator.join(&[first, second]);
        FileUtils::write_text(output, &codec, &merged)?;

        debug!("Concatenated with {:?} ({} policy)", separator, self.policy);
        Ok(())
    }

    /// Write every source, in order, to `output`, each followed by a newline
    ///
    /// Content already written when a later source fails stays in `output`.
    pub fn concat_multiple_files<I, P>(&self, output: impl AsRef<Path>, sources: I) -> ProcessorResult<()>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        self.concat_multiple_files_observed(output, sources, |_, _| {})
    }

    /// Like [`concat_multiple_files`](Self::concat_multiple_files), calling
    /// `on_file` with the zero-based index and path of each finished source
    pub fn concat_multiple_files_observed<I, P, F>(
        &self,
        output: impl AsRef<Path>,
        sources: I,
        mut on_file: F,
    ) -> ProcessorResult<()>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
        F: FnMut(usize, &Path),
    {
        let output = output.as_ref();
        let codec = self.policy.codec();
        let framing = ConcatenationPolicy::RawPassthroughWithTrailingNewlinePerFile;

        info!("Merging multiple files into: {}", output.display());
        let mut writer = FileUtils::create_output(output)?;

        let mut merged = 0;
        for (index, source) in sources.into_iter().enumerate() {
            let source = source.as_ref();
            let body = FileUtils::read_text(source, &codec)?;
            FileUtils::append_text(&mut writer, output, &codec, &framing.join(&[body]))?;
            debug!("Appended {}", source.display());
            on_file(index, source);
            merged += 1;
        }

        info!("Merged {} files into {}", merged, output.display());
        Ok(())
    }

    /// New default-policy processor bound to `<self>_<other>`; no file is touched
    pub fn combine(&self, other: &FileProcessor) -> FileProcessor {
        FileProcessor::new(combine_paths(&self.path, &other.path))
    }

    pub fn success_message(&self) -> &'static str {
        SUCCESS_MESSAGE
    }
}

impl fmt::Display for FileProcessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FileProcessor({})", self.path.display())
    }
}

/// Join two paths as strings with an underscore: `a.txt` + `b.txt` is `a.txt_b.txt`
pub fn combine_paths(first: impl AsRef<Path>, second: impl AsRef<Path>) -> PathBuf {
    let mut combined = OsString::from(first.as_ref().as_os_str());
    combined.push("_");
    combined.push(second.as_ref().as_os_str());
    PathBuf::from(combined)
}

/// Whether `name` ends with `.txt` (case-sensitive)
pub fn is_text_file(name: &str) -> bool {
    name.ends_with(".txt")
}
