//! Configuration (config.toml in the platform config directory)
//!
//! Every field has a default, so a missing or partial file is fine. A file
//! that fails to parse is ignored with a warning once logging is up.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub save: SaveConfig,
    #[serde(default)]
    pub uncompress: UncompressConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter used when RUST_LOG is unset (default: "info")
    #[serde(default = "default_filter")]
    pub filter: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveConfig {
    /// Write compressed chunks when saving (default: true)
    #[serde(default = "default_true")]
    pub compress: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct UncompressConfig {
    /// Copy the input to `<path>.bak` before overwriting it in place
    #[serde(default)]
    pub keep_backup: bool,
}

fn default_filter() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
        }
    }
}

impl Default for SaveConfig {
    fn default() -> Self {
        Self {
            compress: default_true(),
        }
    }
}

/// Platform configuration directory
///
/// On Linux: `~/.config/loco`
pub fn config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("org", "OpenLoco", "loco")
        .map(|dirs| dirs.config_dir().to_path_buf())
}

/// Outcome of reading the config file
pub struct Loaded {
    pub config: Config,
    /// Parse error to report once logging is initialised
    pub error: Option<String>,
}

/// Load `config.toml`, falling back to defaults.
pub fn load() -> Loaded {
    let Some(path) = config_dir().map(|dir| dir.join("config.toml")) else {
        return Loaded {
            config: Config::default(),
            error: None,
        };
    };
    match std::fs::read_to_string(&path) {
        Ok(content) => parse(&content).unwrap_or_else(|err| Loaded {
            config: Config::default(),
            error: Some(format!("{}: {}", path.display(), err)),
        }),
        Err(_) => Loaded {
            config: Config::default(),
            error: None,
        },
    }
}

fn parse(content: &str) -> Result<Loaded, toml::de::Error> {
    Ok(Loaded {
        config: toml::from_str(content)?,
        error: None,
    })
}
