//! Bootstrap configuration for constructing a registry.

use crate::error::ConfigError;
use crate::principal::Principal;
use crate::registry::AuthorityRegistry;
use serde::Deserialize;
use std::{fs, path::Path};

/// Environment variable consulted when no config file is given.
pub const BOOTSTRAP_ADMIN_ENV: &str = "BOOTSTRAP_ADMIN";

#[derive(Debug, Clone, Deserialize)]
pub struct RegistryConfig {
    /// Identifier of the principal that holds the admin role at
    /// construction
    pub bootstrap_admin: String,
}

impl RegistryConfig {
    /// Load configuration from a TOML file, or from the environment when no
    /// path is given.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = if let Some(path) = config_path {
            let content = fs::read_to_string(path)?;
            toml::from_str(&content)?
        } else {
            Self::from_env()?
        };

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from the environment.
    fn from_env() -> Result<Self, ConfigError> {
        let bootstrap_admin = std::env::var(BOOTSTRAP_ADMIN_ENV)
            .map_err(|_| ConfigError::MissingBootstrapAdmin)?;

        Ok(RegistryConfig { bootstrap_admin })
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        // An empty identifier can never match a caller
        if self.bootstrap_admin.trim().is_empty() {
            return Err(ConfigError::InvalidBootstrapAdmin);
        }
        Ok(())
    }

    /// The bootstrap admin as a [`Principal`].
    pub fn bootstrap_admin(&self) -> Principal {
        Principal::new(self.bootstrap_admin.clone())
    }

    /// Construct a registry from this configuration.
    pub fn build(&self) -> AuthorityRegistry {
        AuthorityRegistry::new(self.bootstrap_admin())
    }
}
