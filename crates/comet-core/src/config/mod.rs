//! # Comet Core Host Configuration
//!
//! [`HostConfig`] carries the settings a [`Host`](crate::host::Host) is built
//! from. It can be written by hand or loaded from a file, whose format is
//! picked from the extension:
//!
//! - `.json`, always available,
//! - `.toml` with the `toml-config` feature (on by default),
//! - `.yaml` / `.yml` with the `yaml-config` feature (on by default).
//!
//! Missing fields fall back to their defaults, so an empty document is a valid
//! configuration.
use std::fs;
use std::path::Path;

use serde::Deserialize;

pub mod error;

pub use error::ConfigError;

use crate::constants;

/// File formats a [`HostConfig`] can be read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    #[cfg(feature = "yaml-config")]
    Yaml,
    #[cfg(feature = "toml-config")]
    Toml,
}

impl ConfigFormat {
    /// Canonical extension, also used to name the format in errors.
    pub fn extension(&self) -> &'static str {
        match self {
            ConfigFormat::Json => "json",
            #[cfg(feature = "yaml-config")]
            ConfigFormat::Yaml => "yaml",
            #[cfg(feature = "toml-config")]
            ConfigFormat::Toml => "toml",
        }
    }

    /// Picks the format from `path`'s extension, ignoring case. `None` for
    /// unknown extensions and for formats whose feature is disabled.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(ConfigFormat::Json),
            #[cfg(feature = "yaml-config")]
            "yaml" | "yml" => Some(ConfigFormat::Yaml),
            #[cfg(feature = "toml-config")]
            "toml" => Some(ConfigFormat::Toml),
            _ => None,
        }
    }
}

/// Settings for a single host.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    /// Name used in log lines and error messages.
    pub label: String,
    /// Initial interface table capacity; `0` picks the default.
    pub capacity_hint: usize,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            label: constants::DEFAULT_HOST_LABEL.to_string(),
            capacity_hint: 0,
        }
    }
}

impl HostConfig {
    /// Table capacity the host is created with.
    pub fn effective_capacity(&self) -> usize {
        if self.capacity_hint == 0 {
            constants::DEFAULT_TABLE_CAPACITY
        } else {
            self.capacity_hint
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.label.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "label".to_string(),
                message: "host label must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Parses `data` as `format`. Nothing is validated here; see
    /// [`validate`](Self::validate).
    pub fn parse(data: &str, format: ConfigFormat) -> Result<Self, ConfigError> {
        let parsed: Self = match format {
            ConfigFormat::Json => serde_json::from_str(data).map_err(|e| ConfigError::Deserialization {
                format: format.extension().to_string(),
                source: Box::new(e),
            }),
            #[cfg(feature = "yaml-config")]
            ConfigFormat::Yaml => {
                // An empty YAML document is `null`, not an empty mapping.
                if data.trim().is_empty() {
                    return Ok(Self::default());
                }
                serde_yaml::from_str(data).map_err(|e| ConfigError::Deserialization {
                    format: format.extension().to_string(),
                    source: Box::new(e),
                })
            }
            #[cfg(feature = "toml-config")]
            ConfigFormat::Toml => toml::from_str(data).map_err(|e| ConfigError::Deserialization {
                format: format.extension().to_string(),
                source: Box::new(e),
            }),
        }?;
        log::debug!("Parsed host configuration from {}: {:?}", format.extension(), parsed);
        Ok(parsed)
    }

    /// Reads, parses and validates the file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let format = ConfigFormat::from_path(path)
            .ok_or_else(|| ConfigError::UnsupportedFormat(path.to_path_buf()))?;
        let data = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::parse(&data, format)?;
        config.validate()?;
        log::info!("Loaded host configuration '{}' from {}", config.label, path.display());
        Ok(config)
    }
}
