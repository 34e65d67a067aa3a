//! CLI configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `HEMPLINE_CART_DIR` - Directory holding cart snapshot files
//!   (default: `.hempline` in the current directory)
//! - `HEMPLINE_CART_KEY` - Storage key for the cart snapshot
//!   (default: `cart`)

use std::env;
use std::path::PathBuf;

use thiserror::Error;

/// Default directory for cart snapshot files.
const DEFAULT_CART_DIR: &str = ".hempline";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An environment variable is set but not valid unicode.
    #[error("environment variable {0} is not valid unicode")]
    InvalidEnvVar(String),
}

/// CLI configuration.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Directory the file-backed cart storage writes into.
    pub cart_dir: PathBuf,
    /// Storage key the cart snapshot lives under.
    pub cart_key: String,
}

impl CliConfig {
    /// Load configuration from the environment, applying defaults.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if a set variable is not valid unicode.
    pub fn load() -> Result<Self, ConfigError> {
        Ok(Self {
            cart_dir: get_optional_env("HEMPLINE_CART_DIR")?
                .map_or_else(|| PathBuf::from(DEFAULT_CART_DIR), PathBuf::from),
            cart_key: get_optional_env("HEMPLINE_CART_KEY")?
                .unwrap_or_else(|| hempline_cart::store::DEFAULT_STORAGE_KEY.to_owned()),
        })
    }
}

/// Read an optional environment variable.
fn get_optional_env(key: &str) -> Result<Option<String>, ConfigError> {
    match env::var(key) {
        Ok(value) => Ok(Some(value)),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(env::VarError::NotUnicode(_)) => Err(ConfigError::InvalidEnvVar(key.to_owned())),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_env_absent() {
        // Env mutation is process-global; rely on these vars being unset in
        // the test environment rather than setting/unsetting them here.
        if env::var_os("HEMPLINE_CART_DIR").is_none() && env::var_os("HEMPLINE_CART_KEY").is_none()
        {
            let config = CliConfig::load().unwrap();
            assert_eq!(config.cart_dir, PathBuf::from(DEFAULT_CART_DIR));
            assert_eq!(config.cart_key, "cart");
        }
    }
}
