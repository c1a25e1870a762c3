use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

const CONFIG_FILE_NAME: &str = ".msg-composer.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing {0}: pass --{0}, set COMPOSER_{1}, or add `{0}` to the config file")]
    MissingValue(&'static str, &'static str),
    #[error("Failed to read config file at {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Deserialize, Default)]
struct ConfigFile {
    sender: Option<String>,
    contract: Option<String>,
}

/// Sender and contract address a composer is bound to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposerConfig {
    pub sender: String,
    pub contract: String,
}

/// Resolve the composer binding.
///
/// Precedence: CLI flag (or its env var, handled by clap), then the config
/// file, given explicitly or found in the home directory.
pub fn resolve(
    sender_flag: Option<String>,
    contract_flag: Option<String>,
    config_path: Option<&Path>,
) -> Result<ComposerConfig, ConfigError> {
    let file = match config_path {
        Some(path) => load_config_file(path)?,
        None => match default_config_path() {
            Some(path) if path.exists() => load_config_file(&path)?,
            _ => ConfigFile::default(),
        },
    };

    let sender = sender_flag
        .or(file.sender)
        .ok_or(ConfigError::MissingValue("sender", "SENDER"))?;
    let contract = contract_flag
        .or(file.contract)
        .ok_or(ConfigError::MissingValue("contract", "CONTRACT"))?;

    debug!(%sender, %contract, "composer configuration resolved");
    Ok(ComposerConfig { sender, contract })
}

fn load_config_file(path: &Path) -> Result<ConfigFile, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.display().to_string(),
        source,
    })?;
    toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.display().to_string(),
        source,
    })
}

fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|mut p| {
        p.push(CONFIG_FILE_NAME);
        p
    })
}
