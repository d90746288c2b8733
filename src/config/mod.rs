//! Configuration loading.
//!
//! Every field has a default, so an empty config (or no config file at all)
//! reads `sample_data.csv` and writes into `Outputs/`.

mod vars;

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};
use snafu::prelude::*;
use std::path::{Path, PathBuf};

use crate::error::{
    ConfigError, EmptyFileNameSnafu, EmptyInputPathSnafu, EmptyOutputDirSnafu, EmptyQuerySnafu,
    EnvInterpolationSnafu, InvalidDateFormatSnafu, ReadFileSnafu, YamlParseSnafu,
};

pub use vars::{expand_env, expand_with};

/// Main configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Input CSV location and the label recorded for it in the summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Path to the input CSV (default: "sample_data.csv").
    #[serde(default = "default_input_path")]
    pub path: String,

    /// Label written to the `query` column of the summary (default: "sample_data").
    #[serde(default = "default_query")]
    pub query: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            path: default_input_path(),
            query: default_query(),
        }
    }
}

fn default_input_path() -> String {
    "sample_data.csv".to_string()
}

fn default_query() -> String {
    "sample_data".to_string()
}

/// Where the per-row and summary CSVs go.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Output directory, created if absent (default: "Outputs").
    #[serde(default = "default_output_dir")]
    pub dir: String,

    /// Per-row results file name, overwritten each run.
    #[serde(default = "default_rows_file")]
    pub rows_file: String,

    /// Summary file name, appended to each run.
    #[serde(default = "default_summary_file")]
    pub summary_file: String,

    /// strftime format of the summary `date` column (default: "%d-%m-%Y").
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            rows_file: default_rows_file(),
            summary_file: default_summary_file(),
            date_format: default_date_format(),
        }
    }
}

fn default_output_dir() -> String {
    "Outputs".to_string()
}

fn default_rows_file() -> String {
    "output_sample_data.csv".to_string()
}

fn default_summary_file() -> String {
    "sentiment_summary.csv".to_string()
}

fn default_date_format() -> String {
    "%d-%m-%Y".to_string()
}

impl OutputConfig {
    /// Full path of the per-row results file.
    pub fn rows_path(&self) -> PathBuf {
        Path::new(&self.dir).join(&self.rows_file)
    }

    /// Full path of the summary file.
    pub fn summary_path(&self) -> PathBuf {
        Path::new(&self.dir).join(&self.summary_file)
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default level when `RUST_LOG` is unset (default: "info").
    #[serde(default = "default_log_level")]
    pub level: String,

    /// File that log lines are appended to; `null` disables it (default: "app.log").
    #[serde(default = "default_log_file")]
    pub file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> Option<String> {
    Some("app.log".to_string())
}

impl Config {
    /// Load configuration from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_file_with_options(path, true)
    }

    /// Load configuration from a YAML file with optional environment variable expansion.
    pub fn from_file_with_options(
        path: impl AsRef<Path>,
        expand_vars: bool,
    ) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).context(ReadFileSnafu)?;
        let content = if expand_vars {
            expand_env(&content).map_err(|errors| {
                EnvInterpolationSnafu {
                    message: errors.join("\n"),
                }
                .build()
            })?
        } else {
            content
        };
        Self::from_yaml(&content)
    }

    /// Parse and validate configuration from YAML text.
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        // An empty document deserializes to unit, not to an empty mapping.
        let config: Config = if content.trim().is_empty() {
            Config::default()
        } else {
            serde_yaml::from_str(content).context(YamlParseSnafu)?
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure!(!self.source.path.is_empty(), EmptyInputPathSnafu);
        ensure!(!self.source.query.is_empty(), EmptyQuerySnafu);
        ensure!(!self.output.dir.is_empty(), EmptyOutputDirSnafu);
        ensure!(
            !self.output.rows_file.is_empty(),
            EmptyFileNameSnafu { which: "rows" }
        );
        ensure!(
            !self.output.summary_file.is_empty(),
            EmptyFileNameSnafu { which: "summary" }
        );
        let format = &self.output.date_format;
        ensure!(
            !StrftimeItems::new(format).any(|item| matches!(item, Item::Error)),
            InvalidDateFormatSnafu { format }
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_fixed_layout() {
        let config = Config::default();
        assert_eq!(config.source.path, "sample_data.csv");
        assert_eq!(config.source.query, "sample_data");
        assert_eq!(
            config.output.rows_path(),
            Path::new("Outputs").join("output_sample_data.csv")
        );
        assert_eq!(
            config.output.summary_path(),
            Path::new("Outputs").join("sentiment_summary.csv")
        );
        assert_eq!(config.output.date_format, "%d-%m-%Y");
        assert_eq!(config.logging.file.as_deref(), Some("app.log"));
    }

    #[test]
    fn test_empty_document_is_default() {
        assert_eq!(Config::from_yaml("").unwrap(), Config::default());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let yaml = r#"
source:
  path: "tweets/bitcoin.csv"
  query: bitcoin
logging:
  file: null
"#;
        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(config.source.path, "tweets/bitcoin.csv");
        assert_eq!(config.source.query, "bitcoin");
        assert_eq!(config.output, OutputConfig::default());
        assert_eq!(config.logging.level, "info");
        assert!(config.logging.file.is_none());
    }

    #[test]
    fn test_validation_rejects_empty_fields() {
        let err = Config::from_yaml("source:\n  path: \"\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::EmptyInputPath));

        let err = Config::from_yaml("output:\n  summary_file: \"\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::EmptyFileName { ref which } if which == "summary"));
    }

    #[test]
    fn test_validation_rejects_bad_date_format() {
        let err = Config::from_yaml("output:\n  date_format: \"%d-%Q\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidDateFormat { .. }));
        assert!(Config::from_yaml("output:\n  date_format: \"%Y/%m/%d\"\n").is_ok());
    }
}
