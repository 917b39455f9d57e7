use crate::logging;
use serde::Deserialize;
use std::{
    env, fs,
    path::{Path, PathBuf},
};
use thiserror::Error;

pub const SEED_ENV: &str = "GASH_SEED";
pub const LOG_ENV: &str = "GASH_LOG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },
    #[error("Invalid generator seed `{value}`; expected an unsigned 32-bit integer")]
    InvalidSeed { value: String },
}

/// Runtime settings, read from the `[runtime]` table of `gash.toml`.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub seed: Option<u32>,
    pub log_level: Option<String>,
}

#[derive(Deserialize)]
struct RawConfig {
    #[serde(default)]
    runtime: RuntimeConfig,
}

impl RuntimeConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(path, &text)
    }

    pub fn parse(path: &Path, text: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = toml::from_str(text).map_err(|err| ConfigError::Parse {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;
        Ok(raw.runtime)
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.apply_env()?;
        Ok(config)
    }

    /// Overrides fields with `GASH_SEED` / `GASH_LOG` when they are set.
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        if let Some(value) = env::var(SEED_ENV).ok().filter(|v| !v.trim().is_empty()) {
            let seed = value
                .trim()
                .parse::<u32>()
                .map_err(|_| ConfigError::InvalidSeed { value })?;
            self.seed = Some(seed);
        }
        if let Some(level) = env::var(LOG_ENV).ok().filter(|v| !v.trim().is_empty()) {
            self.log_level = Some(level);
        }
        Ok(())
    }

    pub fn init_logging(&self) -> bool {
        logging::init_with_level(self.log_level.as_deref())
    }
}
