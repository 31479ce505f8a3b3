mod defaults;

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::LinguaError;
use crate::locale::Locale;
use defaults::*;

/// Top-level Lingua configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub lingua: LinguaConfig,
    #[serde(default)]
    pub locale: LocaleConfig,
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub tracking: TrackingConfig,
}

/// General settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinguaConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for LinguaConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Locale settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocaleConfig {
    /// Locale whose variant is the fallback when a translation is missing.
    #[serde(default = "default_base_locale")]
    pub base: Locale,
    /// Ambient locale before anything sets one; also the detection fallback.
    #[serde(default = "default_locale")]
    pub default: Locale,
    /// Directory of `<tag>.json` tables. Unset = the embedded catalog.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog_dir: Option<String>,
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            base: default_base_locale(),
            default: default_locale(),
            catalog_dir: None,
        }
    }
}

/// Which message source the resolver dispatches to.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Look messages up in the in-process table (default).
    #[default]
    Local,
    /// Delegate to server-registered handlers, table as backstop.
    Server,
}

/// Message source config.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceConfig {
    #[serde(default)]
    pub kind: SourceKind,
}

/// How message calls are tracked.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackingMode {
    /// No tracking (default).
    #[default]
    Off,
    /// Emit a trace event per call.
    Log,
    /// Count calls per key and locale in memory.
    Count,
}

/// Call tracking config.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrackingConfig {
    #[serde(default)]
    pub mode: TrackingMode,
}

/// Load configuration from a TOML file.
///
/// Falls back to defaults if the file does not exist.
pub fn load(path: &str) -> Result<Config, LinguaError> {
    let path = Path::new(path);
    if !path.exists() {
        tracing::info!(
            "Config file not found at {}, using defaults",
            path.display()
        );
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| LinguaError::Config(format!("failed to read {}: {}", path.display(), e)))?;

    let config: Config = toml::from_str(&content)
        .map_err(|e| LinguaError::Config(format!("failed to parse config: {}", e)))?;

    Ok(config)
}
