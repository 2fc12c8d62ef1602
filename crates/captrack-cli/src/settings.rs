//! Layered CLI configuration
//!
//! Defaults, then a TOML file, then `CAPTRACK_*` environment variables.
//! Global command-line flags are applied on top in `main`.

use std::path::{Path, PathBuf};

use captrack_core::logging_facility::Profile;
use captrack_core::ops::store::DEFAULT_CURRENT_USER;
use captrack_core::timeline::DEFAULT_PADDING_MONTHS;
use captrack_core::TrackerError;
use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

/// Config file picked up from the working directory when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "captrack.toml";

pub const DEFAULT_DATA_FILE: &str = ".captrack/workspace.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Workspace snapshot file
    pub data_file: PathBuf,
    /// Acting user written into new workspaces
    pub current_user: String,
    /// development, production or test
    pub log_profile: String,
    pub timeline_padding_months: u32,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            current_user: DEFAULT_CURRENT_USER.to_string(),
            log_profile: Profile::Development.to_string(),
            timeline_padding_months: DEFAULT_PADDING_MONTHS,
        }
    }
}

impl TrackerConfig {
    pub fn profile(&self) -> Result<Profile, TrackerError> {
        self.log_profile.parse()
    }

    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

/// Load configuration with layered merging
///
/// An explicit path must exist; the default `captrack.toml` is optional.
pub fn load(explicit: Option<&Path>) -> Result<TrackerConfig, ConfigError> {
    let defaults = serde_json::to_string(&TrackerConfig::default())
        .map_err(|e| ConfigError::Foreign(Box::new(e)))?;

    let file = match explicit {
        Some(path) => File::from(path).format(FileFormat::Toml).required(true),
        None => File::from(Path::new(DEFAULT_CONFIG_FILE))
            .format(FileFormat::Toml)
            .required(false),
    };

    Config::builder()
        .add_source(File::from_str(&defaults, FileFormat::Json))
        .add_source(file)
        .add_source(Environment::with_prefix("CAPTRACK").try_parsing(true))
        .build()?
        .try_deserialize()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = TrackerConfig::default();
        assert_eq!(config.data_file, PathBuf::from(".captrack/workspace.json"));
        assert_eq!(config.current_user, "1");
        assert_eq!(config.profile().unwrap(), Profile::Development);
        assert_eq!(config.timeline_padding_months, 6);
    }

    #[test]
    fn test_file_overrides_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("tracker.toml");
        std::fs::write(&path, "current_user = \"7\"\nlog_profile = \"production\"\n").unwrap();

        let config = load(Some(path.as_path())).unwrap();

        assert_eq!(config.current_user, "7");
        assert_eq!(config.profile().unwrap(), Profile::Production);
        assert_eq!(config.data_file, PathBuf::from(DEFAULT_DATA_FILE));
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        assert!(load(Some(temp_dir.path().join("absent.toml").as_path())).is_err());
    }

    #[test]
    fn test_toml_output_parses_back() {
        let config = TrackerConfig {
            timeline_padding_months: 3,
            ..Default::default()
        };
        let text = config.to_toml().unwrap();
        let parsed: TrackerConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }
}
