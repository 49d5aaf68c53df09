//! Configuration file handling
//!
//! A JSON object; every field is optional:
//!
//! ```json
//! {
//!   "data_dir": "./data",
//!   "providers_file": "providers_data.csv",
//!   "receivers_file": "receivers_data.csv",
//!   "food_listings_file": "food_listings_data.csv",
//!   "claims_file": "claims_data.csv",
//!   "delimiter": ","
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::dataset::{CsvSource, SourceFiles};

use super::errors::{CliError, CliResult};

/// Configuration file structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Directory holding the data files (default ".")
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    #[serde(default = "default_providers_file")]
    pub providers_file: String,

    #[serde(default = "default_receivers_file")]
    pub receivers_file: String,

    #[serde(default = "default_food_listings_file")]
    pub food_listings_file: String,

    #[serde(default = "default_claims_file")]
    pub claims_file: String,

    /// Field delimiter, a single ASCII character (default ",")
    #[serde(default = "default_delimiter")]
    pub delimiter: String,
}

fn default_data_dir() -> String {
    ".".to_string()
}
fn default_providers_file() -> String {
    SourceFiles::default().providers
}
fn default_receivers_file() -> String {
    SourceFiles::default().receivers
}
fn default_food_listings_file() -> String {
    SourceFiles::default().food_listings
}
fn default_claims_file() -> String {
    SourceFiles::default().claims
}
fn default_delimiter() -> String {
    ",".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            providers_file: default_providers_file(),
            receivers_file: default_receivers_file(),
            food_listings_file: default_food_listings_file(),
            claims_file: default_claims_file(),
            delimiter: default_delimiter(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::Config(format!("Failed to read config: {}", e)))?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::Config(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Loads `path` if given, otherwise the defaults
    pub fn resolve(path: Option<&Path>) -> CliResult<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Validate field values
    pub fn validate(&self) -> CliResult<()> {
        if self.data_dir.trim().is_empty() {
            return Err(CliError::Config("data_dir must not be empty".into()));
        }

        for (field, value) in [
            ("providers_file", &self.providers_file),
            ("receivers_file", &self.receivers_file),
            ("food_listings_file", &self.food_listings_file),
            ("claims_file", &self.claims_file),
        ] {
            if value.trim().is_empty() {
                return Err(CliError::Config(format!("{} must not be empty", field)));
            }
        }

        self.delimiter_byte()?;

        Ok(())
    }

    /// The delimiter as a single byte
    pub fn delimiter_byte(&self) -> CliResult<u8> {
        match self.delimiter.as_bytes() {
            [b] if b.is_ascii() => Ok(*b),
            _ => Err(CliError::Config(format!(
                "Invalid delimiter: '{}'. Must be a single ASCII character.",
                self.delimiter
            ))),
        }
    }

    /// Get data directory as Path
    pub fn data_path(&self) -> &Path {
        Path::new(&self.data_dir)
    }

    /// Builds the dataset source, with `data_dir` overriding the configured directory
    pub fn csv_source(&self, data_dir: Option<&Path>) -> CliResult<CsvSource> {
        let dir: PathBuf = data_dir.unwrap_or_else(|| self.data_path()).to_path_buf();
        let files = SourceFiles {
            providers: self.providers_file.clone(),
            receivers: self.receivers_file.clone(),
            food_listings: self.food_listings_file.clone(),
            claims: self.claims_file.clone(),
        };

        Ok(CsvSource::new(dir)
            .with_files(files)
            .with_delimiter(self.delimiter_byte()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::TableName;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, body: &str) -> PathBuf {
        let path = dir.path().join("feedline.json");
        fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn test_defaults_when_fields_missing() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "{}");

        let config = Config::load(&path).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.delimiter_byte().unwrap(), b',');
    }

    #[test]
    fn test_custom_fields() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            r#"{"data_dir": "/srv/data", "claims_file": "claims.tsv", "delimiter": "\t"}"#,
        );

        let config = Config::load(&path).unwrap();
        let source = config.csv_source(None).unwrap();
        assert_eq!(source.path_for(TableName::Claims), PathBuf::from("/srv/data/claims.tsv"));
        assert_eq!(
            source.path_for(TableName::Providers),
            PathBuf::from("/srv/data/providers_data.csv")
        );
    }

    #[test]
    fn test_data_dir_override() {
        let config = Config::default();
        let source = config.csv_source(Some(Path::new("/elsewhere"))).unwrap();
        assert_eq!(source.data_dir(), Path::new("/elsewhere"));
    }

    #[test]
    fn test_invalid_delimiter() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, r#"{"delimiter": ";;"}"#);

        let err = Config::load(&path).unwrap_err();
        assert_eq!(err.code(), "FEED_CLI_CONFIG_ERROR");
        assert!(err.to_string().contains("delimiter"));
    }

    #[test]
    fn test_empty_file_name() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, r#"{"receivers_file": " "}"#);

        let err = Config::load(&path).unwrap_err();
        assert!(err.to_string().contains("receivers_file"));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, r#"{"max_wal_size_bytes": 10}"#);
        assert!(Config::load(&path).is_err());
    }

    #[test]
    fn test_missing_file() {
        let err = Config::load(Path::new("/nonexistent/feedline.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config"));
    }
}
