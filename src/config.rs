//! Configuration for mgnctl.
//!
//! Handles loading and merging configuration from multiple sources:
//! - Default values
//! - System configuration (/etc/mgnctl/mgnctl.cfg)
//! - User configuration (~/.mgnctl.cfg, ~/.mgnctl/config)
//! - Project configuration (./mgnctl.cfg)
//! - Environment variables
//! - Command-line arguments (applied by the CLI layer)

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Default settings
    pub defaults: Defaults,

    /// Credential resolution settings
    pub credentials: CredentialsConfig,

    /// Colors and output settings
    pub colors: ColorsConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

/// Default configuration values.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    /// AWS region for service calls
    pub region: Option<String>,

    /// Credential profile name
    pub profile: Option<String>,

    /// Endpoint URL override (testing/private endpoints)
    pub endpoint_url: Option<String>,

    /// Output format: human or json
    pub output: String,

    /// Show progress records during long calls
    pub progress: bool,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            region: None,
            profile: None,
            endpoint_url: None,
            output: "human".to_string(),
            progress: true,
        }
    }
}

/// Credential resolution settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CredentialsConfig {
    /// Shared credentials file override. When set, the keychain is skipped.
    pub profiles_location: Option<PathBuf>,
}

/// Colors and output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorsConfig {
    /// Use colored output
    pub enabled: bool,
}

impl Default for ColorsConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default log level when no verbosity flags are given
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

impl Config {
    /// Loads configuration, merging from standard locations and applying
    /// environment variable overrides.
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        let mut config = Config::default();

        for path in Self::get_config_paths(config_path) {
            if path.exists() {
                config.merge_from_file(&path)?;
            }
        }

        config.apply_env_overrides();
        Ok(config)
    }

    /// The list of configuration file paths to check, lowest precedence
    /// first. An explicit path replaces the whole list.
    fn get_config_paths(explicit_path: Option<&PathBuf>) -> Vec<PathBuf> {
        if let Some(path) = explicit_path {
            return vec![path.clone()];
        }

        let mut paths = vec![PathBuf::from("/etc/mgnctl/mgnctl.cfg")];
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".mgnctl.cfg"));
            paths.push(home.join(".mgnctl/config"));
        }
        paths.push(PathBuf::from("mgnctl.cfg"));
        paths
    }

    fn merge_from_file(&mut self, path: &PathBuf) -> Result<()> {
        let content = fs::read_to_string(path)?;
        let loaded: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))?;
        self.overlay(loaded);
        Ok(())
    }

    /// Later files override earlier ones field by field; unset options fall
    /// through to the previous layer.
    fn overlay(&mut self, other: Config) {
        if other.defaults.region.is_some() {
            self.defaults.region = other.defaults.region;
        }
        if other.defaults.profile.is_some() {
            self.defaults.profile = other.defaults.profile;
        }
        if other.defaults.endpoint_url.is_some() {
            self.defaults.endpoint_url = other.defaults.endpoint_url;
        }
        // Non-Option fields deserialize to their defaults when a file leaves
        // them out, so only a value that differs from the default counts as
        // set by this layer.
        let unset = Defaults::default();
        if other.defaults.output != unset.output {
            self.defaults.output = other.defaults.output;
        }
        if other.defaults.progress != unset.progress {
            self.defaults.progress = other.defaults.progress;
        }
        if other.credentials.profiles_location.is_some() {
            self.credentials.profiles_location = other.credentials.profiles_location;
        }
        if other.colors.enabled != ColorsConfig::default().enabled {
            self.colors.enabled = other.colors.enabled;
        }
        if other.logging.level != LoggingConfig::default().level {
            self.logging.level = other.logging.level;
        }
    }

    /// Standard AWS environment variables override file configuration.
    fn apply_env_overrides(&mut self) {
        if let Ok(region) = std::env::var("AWS_REGION") {
            self.defaults.region = Some(region);
        } else if let Ok(region) = std::env::var("AWS_DEFAULT_REGION") {
            self.defaults.region = Some(region);
        }
        if let Ok(profile) = std::env::var("AWS_PROFILE") {
            self.defaults.profile = Some(profile);
        }
        if let Ok(endpoint) = std::env::var("AWS_ENDPOINT_URL") {
            self.defaults.endpoint_url = Some(endpoint);
        }
        if let Ok(location) = std::env::var("AWS_SHARED_CREDENTIALS_FILE") {
            self.credentials.profiles_location = Some(PathBuf::from(location));
        }

        // Config files and env vars may spell the credentials path with a
        // leading tilde.
        if let Some(location) = &self.credentials.profiles_location {
            if let Some(raw) = location.to_str() {
                let expanded = shellexpand::tilde(raw);
                if expanded != raw {
                    self.credentials.profiles_location = Some(PathBuf::from(expanded.as_ref()));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sensible() {
        let config = Config::default();
        assert_eq!(config.defaults.output, "human");
        assert!(config.defaults.progress);
        assert!(config.defaults.region.is_none());
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn overlay_keeps_unset_options() {
        let mut base = Config::default();
        base.defaults.region = Some("eu-west-1".into());
        base.defaults.profile = Some("migration".into());

        let mut layer = Config::default();
        layer.defaults.region = Some("us-east-2".into());
        base.overlay(layer);

        assert_eq!(base.defaults.region.as_deref(), Some("us-east-2"));
        assert_eq!(base.defaults.profile.as_deref(), Some("migration"));
    }

    #[test]
    fn overlay_keeps_non_option_settings_from_earlier_layers() {
        let mut base = Config::default();
        base.defaults.output = "json".to_string();
        base.defaults.progress = false;
        base.colors.enabled = false;
        base.logging.level = "debug".to_string();

        // A project-level file that only pins the region.
        let region_only: Config = toml::from_str(
            r#"
            [defaults]
            region = "us-west-2"
            "#,
        )
        .unwrap();
        base.overlay(region_only);

        assert_eq!(base.defaults.region.as_deref(), Some("us-west-2"));
        assert_eq!(base.defaults.output, "json");
        assert!(!base.defaults.progress);
        assert!(!base.colors.enabled);
        assert_eq!(base.logging.level, "debug");
    }

    #[test]
    fn overlay_applies_non_option_settings_when_set() {
        let mut base = Config::default();
        let layer: Config = toml::from_str(
            r#"
            [defaults]
            output = "json"
            progress = false

            [logging]
            level = "trace"
            "#,
        )
        .unwrap();
        base.overlay(layer);

        assert_eq!(base.defaults.output, "json");
        assert!(!base.defaults.progress);
        assert_eq!(base.logging.level, "trace");
    }

    #[test]
    fn parses_toml_config() {
        let parsed: Config = toml::from_str(
            r#"
            [defaults]
            region = "ap-southeast-2"
            output = "json"
            progress = false

            [credentials]
            profiles_location = "/tmp/creds"
            "#,
        )
        .unwrap();
        assert_eq!(parsed.defaults.region.as_deref(), Some("ap-southeast-2"));
        assert_eq!(parsed.defaults.output, "json");
        assert!(!parsed.defaults.progress);
        assert_eq!(
            parsed.credentials.profiles_location,
            Some(PathBuf::from("/tmp/creds"))
        );
    }
}
