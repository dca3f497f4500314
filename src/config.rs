//! Settings management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/treeconf/treeconf.toml`
//! 3. Explicit config file (`--config <FILE>`)
//! 4. Environment variables: `TREECONF_*` prefix, `__` for nesting

use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, ConfigError, Environment, File, FileFormat};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;

/// HTTP settings shared by the network drivers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct HttpSettings {
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self { timeout_secs: 10 }
    }
}

/// Ports used when a network URI does not name one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PortSettings {
    pub etcd: u16,
    pub consul: u16,
}

impl Default for PortSettings {
    fn default() -> Self {
        Self {
            etcd: 2379,
            consul: 8500,
        }
    }
}

/// Unified settings for treeconf.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Separator new configurations split paths with (default: `/`)
    pub path_separator: char,
    pub http: HttpSettings,
    pub ports: PortSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            path_separator: '/',
            http: HttpSettings::default(),
            ports: PortSettings::default(),
        }
    }
}

/// Get the XDG config directory for treeconf.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "treeconf").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("treeconf.toml"))
}

impl Settings {
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http.timeout_secs)
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `explicit` - Optional config file given on the command line; it must exist
    pub fn load(explicit: Option<&Path>) -> Result<Self, ApplicationError> {
        let global = global_config_path().filter(|p| p.exists());
        Self::load_from(global.as_deref(), explicit, true)
    }

    /// Load from the given files only, optionally applying `TREECONF_*` overrides.
    ///
    /// Used directly by tests to stay independent of the user's global config.
    pub fn load_from(
        global: Option<&Path>,
        explicit: Option<&Path>,
        with_env: bool,
    ) -> Result<Self, ApplicationError> {
        let defaults = Settings::default();
        let mut builder = Config::builder()
            .set_default("path_separator", defaults.path_separator.to_string())
            .map_err(config_err)?
            .set_default("http.timeout_secs", defaults.http.timeout_secs)
            .map_err(config_err)?
            .set_default("ports.etcd", u64::from(defaults.ports.etcd))
            .map_err(config_err)?
            .set_default("ports.consul", u64::from(defaults.ports.consul))
            .map_err(config_err)?;

        if let Some(path) = global {
            builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(false));
        }
        if let Some(path) = explicit {
            builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(true));
        }
        if with_env {
            builder = builder.add_source(
                Environment::with_prefix("TREECONF")
                    .prefix_separator("_")
                    .separator("__"),
            );
        }

        let config = builder.build().map_err(config_err)?;
        config.try_deserialize().map_err(config_err)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# treeconf configuration
#
# Locations (by precedence, lowest to highest):
#   Global:   ~/.config/treeconf/treeconf.toml
#   Explicit: treeconf --config <FILE>
#   Env:      TREECONF_* environment variables (TREECONF_HTTP__TIMEOUT_SECS=5)

# Separator used to split path arguments
# path_separator = "/"

[http]
# Per-request timeout for etcd and Consul, in seconds
# timeout_secs = 10

[ports]
# Used when a URI omits the port
# etcd = 2379
# consul = 8500
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_no_files_when_loading_then_uses_defaults() {
        let settings = Settings::load_from(None, None, false).expect("load defaults");
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.http_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn given_template_when_parsing_then_yields_defaults() {
        let parsed: Settings = toml::from_str(&Settings::template()).expect("template parses");
        assert_eq!(parsed, Settings::default());
    }

    #[test]
    fn given_settings_when_serializing_then_round_trips_through_toml() {
        let settings = Settings {
            path_separator: '.',
            ..Settings::default()
        };
        let text = settings.to_toml().unwrap();
        let parsed: Settings = toml::from_str(&text).unwrap();
        assert_eq!(parsed, settings);
    }
}
