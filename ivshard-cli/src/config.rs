use std::ffi::OsStr;
use std::fs::read_to_string;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Defaults for the `overlap` command. Command line flags take precedence.
#[derive(Deserialize, Serialize, Debug, PartialEq, Default)]
pub struct OverlapConfig {
    pub universe: Option<String>,
    pub presorted: Option<bool>,
    pub min_width: Option<u32>,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing or invalid file extension in config file. It must be `toml`")]
    InvalidFileType,
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

impl TryFrom<&Path> for OverlapConfig {
    type Error = ConfigError;

    fn try_from(path: &Path) -> ConfigResult<Self> {
        match path.extension().and_then(OsStr::to_str) {
            Some("toml") => {}
            _ => return Err(ConfigError::InvalidFileType),
        }
        let toml_str = read_to_string(path)?;
        let config = toml::from_str(&toml_str)?;
        Ok(config)
    }
}
