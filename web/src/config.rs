use std::sync::OnceLock;

use thiserror::Error;

pub const MAPS_API_KEY_VAR: &str = "GOOGLE_MAPS_API_KEY";

static MAPS_CONFIG: OnceLock<MapsConfig> = OnceLock::new();

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("maps configuration already initialized")]
    AlreadyInitialized,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct MapsConfig {
    /// Browser key for the Maps JavaScript API. Blank values count as unset.
    pub api_key: Option<String>,
}

impl MapsConfig {
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let api_key = lookup(MAPS_API_KEY_VAR)
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty());
        Self { api_key }
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }
}

pub fn init_config() -> Result<&'static MapsConfig, ConfigError> {
    MAPS_CONFIG
        .set(MapsConfig::from_env())
        .map_err(|_| ConfigError::AlreadyInitialized)?;
    MAPS_CONFIG.get().ok_or(ConfigError::AlreadyInitialized)
}

/// Configuration set by `init_config`, or read fresh from the environment.
pub fn maps_config() -> MapsConfig {
    MAPS_CONFIG.get().cloned().unwrap_or_else(MapsConfig::from_env)
}
