//! Environment-driven configuration.
//!
//! # Environment Variables
//!
//! - `APP_NAME`: Application name (default: `Redayit`)
//! - `NODE_ENV`: Environment tag (default: `dev`)
//! - `HOST`: Server host address (default: `0.0.0.0`)
//! - `PORT`: Server port (default: `3000`)
//! - `CORS_ORIGIN`: The single origin allowed by CORS (default: `http://localhost:3001`)
//!
//! Storage settings are read by
//! [`RepositoryConfig`](crate::infrastructure::RepositoryConfig).

use std::env;

use thiserror::Error;

pub const DEFAULT_APP_NAME: &str = "Redayit";
pub const DEFAULT_ENVIRONMENT: &str = "dev";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3001";

// =============================================================================
// Error Types
// =============================================================================

/// Errors that can occur while reading configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    /// Invalid storage mode value.
    #[error("Invalid storage mode: '{0}'. Expected 'mongodb' or 'in_memory'")]
    InvalidStorageMode(String),

    /// A port variable could not be parsed.
    #[error("Invalid port in {variable}: '{value}'")]
    InvalidPort { variable: &'static str, value: String },

    /// A required variable has no value and no default.
    #[error("{0} environment variable is required when STORAGE_MODE=mongodb")]
    MissingVariable(&'static str),
}

// =============================================================================
// Lookup Helpers
// =============================================================================

/// Reads a variable from the process environment.
pub fn env_lookup(key: &str) -> Option<String> {
    env::var(key).ok()
}

/// Looks up `key`, trimming the value and discarding it when blank.
pub(crate) fn lookup_trimmed<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Looks up and parses a port, falling back to `default` when unset.
pub(crate) fn lookup_port<F>(
    lookup: &F,
    key: &'static str,
    default: u16,
) -> Result<u16, ConfigurationError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup_trimmed(lookup, key).map_or(Ok(default), |value| {
        value
            .parse()
            .map_err(|_| ConfigurationError::InvalidPort {
                variable: key,
                value,
            })
    })
}

// =============================================================================
// Deployment
// =============================================================================

/// Names a deployment of the service.
///
/// The database and collection names are derived from the application name
/// and environment tag, so two deployments with different tags never share
/// data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deployment {
    /// Application name as configured (case preserved).
    pub app_name: String,
    /// Environment tag, e.g. `dev` or `prod`.
    pub environment: String,
}

impl Deployment {
    /// Creates a deployment from an application name and environment tag.
    #[must_use]
    pub fn new(app_name: impl Into<String>, environment: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
            environment: environment.into(),
        }
    }

    /// Reads the deployment from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(env_lookup)
    }

    /// Reads the deployment through an arbitrary lookup function.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            app_name: lookup_trimmed(&lookup, "APP_NAME")
                .unwrap_or_else(|| DEFAULT_APP_NAME.to_string()),
            environment: lookup_trimmed(&lookup, "NODE_ENV")
                .unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_string()),
        }
    }

    /// `lowercase(app_name)_environment`
    #[must_use]
    pub fn database_name(&self) -> String {
        format!("{}_{}", self.app_name.to_lowercase(), self.environment)
    }

    /// `lowercase(app_name)_environment_todos`
    #[must_use]
    pub fn collection_name(&self) -> String {
        format!("{}_todos", self.database_name())
    }

    /// Route prefix under which the todo collection is exposed.
    #[must_use]
    pub fn collection_path(&self) -> String {
        format!("/api/{}", self.collection_name())
    }
}

impl Default for Deployment {
    fn default() -> Self {
        Self::new(DEFAULT_APP_NAME, DEFAULT_ENVIRONMENT)
    }
}

// =============================================================================
// Server Configuration
// =============================================================================

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address to bind.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// The only origin accepted for cross-origin requests.
    pub cors_origin: String,
}

impl ServerConfig {
    /// Reads the server configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::InvalidPort` if `PORT` is not a valid port.
    pub fn from_env() -> Result<Self, ConfigurationError> {
        Self::from_lookup(env_lookup)
    }

    /// Reads the server configuration through an arbitrary lookup function.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::InvalidPort` if `PORT` is not a valid port.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigurationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            host: lookup_trimmed(&lookup, "HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: lookup_port(&lookup, "PORT", DEFAULT_PORT)?,
            cors_origin: lookup_trimmed(&lookup, "CORS_ORIGIN")
                .unwrap_or_else(|| DEFAULT_CORS_ORIGIN.to_string()),
        })
    }

    /// `host:port` string suitable for binding.
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            cors_origin: DEFAULT_CORS_ORIGIN.to_string(),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
