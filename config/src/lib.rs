//! Configuration file loading for rulebook.
//!
//! Lookup order, first hit wins:
//! 1. `$RULEBOOK_CONFIG` (explicit path)
//! 2. `<base_dir>/.rulebook.toml` (project)
//! 3. `~/.rulebook/config.toml` (user)
//!
//! A missing file is not an error; defaults apply.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use rulebook_loader::DiscoveryConfig;
use rulebook_types::{MatchOptions, RegistryOptions};
use serde::Deserialize;
use thiserror::Error;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "RULEBOOK_CONFIG";

/// File name of the per-project config, looked up in the base directory.
pub const PROJECT_CONFIG_FILE: &str = ".rulebook.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RulebookConfig {
    #[serde(default)]
    pub matching: MatchOptions,
    #[serde(default)]
    pub registry: RegistryConfig,
    #[serde(default)]
    pub discovery: DiscoveryConfig,
}

/// ```toml
/// [registry]
/// strict = true
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct RegistryConfig {
    /// Reject documents whose exact pattern collides with a different body.
    #[serde(default)]
    pub strict: bool,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl ConfigError {
    #[must_use]
    pub fn path(&self) -> &PathBuf {
        match self {
            ConfigError::Read { path, .. } | ConfigError::Parse { path, .. } => path,
        }
    }
}

/// Replaces `${VAR}` with the variable's value (empty when unset).
///
/// An unclosed `${` is kept verbatim.
#[must_use]
pub fn expand_env_vars(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut rest = value;

    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find('}') else {
            out.push_str(&rest[start..]);
            return out;
        };
        let var = &after[..end];
        if !var.is_empty() {
            out.push_str(&env::var(var).unwrap_or_default());
        }
        rest = &after[end + 1..];
    }
    out.push_str(rest);
    out
}

impl RulebookConfig {
    /// Loads the first config file found for `base_dir`, or defaults.
    pub fn load_for(base_dir: &Path) -> Result<Self, ConfigError> {
        let Some(path) = Self::locate(base_dir) else {
            tracing::debug!(base = %base_dir.display(), "No rulebook config found, using defaults");
            return Ok(Self::default());
        };
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!("Failed to read config at {:?}: {}", path, err);
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source: err,
                });
            }
        };
        Self::parse(&content).map_err(|err| {
            tracing::warn!("Failed to parse config at {:?}: {}", path, err);
            ConfigError::Parse {
                path: path.to_path_buf(),
                source: err,
            }
        })
    }

    /// Parses TOML text. Discovery roots have `${VAR}` references expanded.
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(content)?;
        for root in &mut config.discovery.roots {
            *root = expand_env_vars(root);
        }
        Ok(config)
    }

    /// Which file [`load_for`](Self::load_for) would read.
    #[must_use]
    pub fn locate(base_dir: &Path) -> Option<PathBuf> {
        if let Ok(explicit) = env::var(CONFIG_ENV_VAR)
            && !explicit.trim().is_empty()
        {
            return Some(PathBuf::from(explicit));
        }
        let project = base_dir.join(PROJECT_CONFIG_FILE);
        if project.is_file() {
            return Some(project);
        }
        config_path().filter(|path| path.is_file())
    }

    #[must_use]
    pub fn registry_options(&self) -> RegistryOptions {
        RegistryOptions {
            strict: self.registry.strict,
            matching: self.matching,
        }
    }
}

/// User-level config path: `~/.rulebook/config.toml`.
#[must_use]
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".rulebook").join("config.toml"))
}
