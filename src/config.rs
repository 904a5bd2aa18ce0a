//! YAML configuration file support for filmlink.
//!
//! Every section is optional and falls back to its defaults, so an empty
//! document apart from `version` is a valid configuration.
//!
//! ## Example YAML Configuration
//!
//! ```yaml
//! version: "1.0"
//!
//! ingest:
//!   queue_capacity: 1000
//!   title_prefix: "Wikipedia: "
//!
//! matcher:
//!   title_bias: 0.5
//!   candidate_queue_capacity: 100
//!   checkpoint_every: 100
//!
//! output:
//!   path: "matches.csv"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use ingest::IngestConfig;
use matcher::MatchConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when loading YAML configuration files
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("unsupported config version: {0}")]
    UnsupportedVersion(String),
}

/// Top-level configuration for a match run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub struct FilmlinkConfig {
    /// Configuration format version
    pub version: String,

    /// Document stream reader settings
    #[serde(default)]
    pub ingest: IngestConfig,

    /// Scoring and orchestration settings
    #[serde(default)]
    pub matcher: MatchConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

/// Where the match table is written.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    pub path: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("matches.csv"),
        }
    }
}

impl Default for FilmlinkConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            ingest: IngestConfig::default(),
            matcher: MatchConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl FilmlinkConfig {
    /// Load a YAML configuration file from the given path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse YAML configuration from a string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        let config: FilmlinkConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        match self.version.as_str() {
            "1.0" | "1" => Ok(()),
            v => Err(ConfigLoadError::UnsupportedVersion(v.to_string())),
        }?;

        self.ingest
            .validate()
            .map_err(|e| ConfigLoadError::Validation(format!("ingest: {e}")))?;
        self.matcher
            .validate()
            .map_err(|e| ConfigLoadError::Validation(format!("matcher: {e}")))?;
        if self.output.path.as_os_str().is_empty() {
            return Err(ConfigLoadError::Validation(
                "output.path must not be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Serialize back to YAML
    pub fn to_yaml(&self) -> Result<String, ConfigLoadError> {
        Ok(serde_yaml::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_valid_yaml() {
        let yaml = r#"
version: "1.0"
ingest:
  queue_capacity: 50
matcher:
  title_bias: 0.25
output:
  path: "out/matches.csv"
"#;

        let config = FilmlinkConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.ingest.queue_capacity, 50);
        assert_eq!(config.ingest.title_prefix, "Wikipedia: ");
        assert_eq!(config.matcher.title_bias, 0.25);
        assert_eq!(config.matcher.checkpoint_every, 100);
        assert_eq!(config.output.path, PathBuf::from("out/matches.csv"));
    }

    #[test]
    fn test_load_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"version: \"1\"\n").unwrap();

        let config = FilmlinkConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config, FilmlinkConfig {
            version: "1".to_string(),
            ..Default::default()
        });
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = FilmlinkConfig::default();
        assert_eq!(config.version, "1.0");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_unsupported_version() {
        let result = FilmlinkConfig::from_yaml("version: \"2.0\"\n");
        assert!(matches!(result, Err(ConfigLoadError::UnsupportedVersion(v)) if v == "2.0"));
    }

    #[test]
    fn test_zero_queue_capacity_rejected() {
        let yaml = r#"
version: "1.0"
ingest:
  queue_capacity: 0
"#;
        assert!(matches!(
            FilmlinkConfig::from_yaml(yaml),
            Err(ConfigLoadError::Validation(_))
        ));
    }

    #[test]
    fn test_bias_out_of_range_rejected() {
        let yaml = r#"
version: "1.0"
matcher:
  title_bias: 2.0
"#;
        assert!(FilmlinkConfig::from_yaml(yaml).is_err());
    }

    #[test]
    fn test_yaml_round_trip() {
        let config = FilmlinkConfig::default();
        let yaml = config.to_yaml().unwrap();
        assert_eq!(FilmlinkConfig::from_yaml(&yaml).unwrap(), config);
    }
}
