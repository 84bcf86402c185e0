// Import required dependencies
use crate::encoding::TextCodec; // For resolving encoding labels
use crate::errors::ConfigError; // Configuration error type
use serde::{Deserialize, Serialize}; // For JSON serialization/deserialization
use std::fs; // For file operations
use std::path::{Path, PathBuf}; // For file path handling

// Configuration structure that can be serialized to/from JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub encoding: Option<String>,    // Encoding label; unset means the default policy
    pub color: bool,                 // Color terminal output
    pub log_file: Option<PathBuf>,   // Append every log line here
    pub error_file: Option<PathBuf>, // Append error log lines here
}

impl Default for Config {
    fn default() -> Self {
        Self {
            encoding: None,
            color: true,
            log_file: None,
            error_file: None,
        }
    }
}

impl Config {
    // Load configuration from a JSON file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    // Save configuration to a JSON file
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::SerializationError(e.to_string()))?;
        fs::write(path, content)?;
        Ok(())
    }

    // Create a configuration template with every field filled in
    pub fn template() -> Self {
        Self {
            encoding: Some("utf-8".to_string()),
            color: true,
            log_file: Some(PathBuf::from("/tmp/txtmerge.log")),
            error_file: Some(PathBuf::from("/tmp/txtmerge_errors.log")),
        }
    }

    // Check the encoding label and that the log directories accept new files
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(label) = &self.encoding {
            TextCodec::for_label(label)
                .map_err(|_| ConfigError::InvalidEncoding(label.clone()))?;
        }

        for path in [&self.log_file, &self.error_file].into_iter().flatten() {
            Self::validate_log_directory(path)?;
        }

        Ok(())
    }

    fn validate_log_directory(path: &Path) -> Result<(), ConfigError> {
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        if !parent.is_dir() {
            return Err(ConfigError::LogDirectoryNotWritable(parent.to_path_buf()));
        }

        // Check if directory is writable by attempting to create a temporary file
        match tempfile::Builder::new()
            .prefix(".test-write-")
            .tempfile_in(parent)
        {
            Ok(scratch) => {
                // Clean up temporary file
                let _ = scratch.close();
                Ok(())
            }
            Err(_) => Err(ConfigError::LogDirectoryNotWritable(parent.to_path_buf())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_save_and_load() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("config.json");

        let config = Config::template();
        config.save(&path)?;
        assert_eq!(Config::load(&path)?, config);
        Ok(())
    }

    #[test]
    fn test_missing_fields_take_defaults() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "encoding": "latin1" }"#)?;

        let config = Config::load(&path)?;
        assert_eq!(config.encoding.as_deref(), Some("latin1"));
        assert!(config.color);
        assert!(config.log_file.is_none());
        Ok(())
    }

    #[test]
    fn test_invalid_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "not json").unwrap();

        assert!(matches!(
            Config::load(&path),
            Err(ConfigError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_validate() {
        let dir = tempdir().unwrap();
        let mut config = Config {
            log_file: Some(dir.path().join("run.log")),
            ..Config::default()
        };
        assert!(config.validate().is_ok());

        config.encoding = Some("no-such-encoding".to_string());
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidEncoding(_))
        ));

        config.encoding = None;
        config.error_file = Some(dir.path().join("missing").join("errors.log"));
        assert!(matches!(
            config.validate(),
            Err(ConfigError::LogDirectoryNotWritable(_))
        ));
    }
}
