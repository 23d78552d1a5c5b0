//! Repository factory for runtime backend selection.
//!
//! This module builds the storage handle at startup. It supports switching
//! between MongoDB and an in-memory backend at runtime.
//!
//! # Environment Variables
//!
//! - `STORAGE_MODE`: `mongodb` (default) | `in_memory`
//! - `DB_HOST`: MongoDB host (default: `mongodb`)
//! - `DB_PORT`: MongoDB port (default: `27017`)
//! - `DB_USER`: MongoDB user (required when `STORAGE_MODE=mongodb`)
//! - `DB_PASSWORD`: MongoDB password (required when `STORAGE_MODE=mongodb`)
//!
//! The database and collection names come from the [`Deployment`].
//!
//! # Example
//!
//! ```ignore
//! let config = RepositoryConfig::from_env(Deployment::from_env())?;
//! let repositories = RepositoryFactory::new(config).create().await?;
//!
//! let todos = repositories.todo_repository.list().await?;
//! ```

use std::str::FromStr;
use std::sync::Arc;

use mongodb::Client;
use thiserror::Error;

use super::{
    InMemoryTodoRepository, MongoTodoRepository, StorageStatus, TodoRepository,
    UnavailableTodoRepository,
};
use crate::config::{ConfigurationError, Deployment, env_lookup, lookup_port, lookup_trimmed};

pub const DEFAULT_DATABASE_HOST: &str = "mongodb";
pub const DEFAULT_DATABASE_PORT: u16 = 27017;

// =============================================================================
// Configuration Types
// =============================================================================

/// Storage mode for todo documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageMode {
    /// MongoDB storage for production use.
    #[default]
    MongoDb,
    /// In-memory storage. Data is lost on restart.
    InMemory,
}

impl FromStr for StorageMode {
    type Err = ConfigurationError;

    /// Parses a storage mode from a string.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::InvalidStorageMode` if the string is not recognized.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "mongodb" | "mongo" => Ok(Self::MongoDb),
            "in_memory" | "inmemory" | "memory" => Ok(Self::InMemory),
            _ => Err(ConfigurationError::InvalidStorageMode(value.to_string())),
        }
    }
}

/// Configuration for the repository factory.
///
/// Use `RepositoryConfigBuilder` for a fluent API to construct this.
#[derive(Debug, Clone, Default)]
pub struct RepositoryConfig {
    /// Which backend to use.
    pub storage_mode: StorageMode,
    /// Names the database and collection.
    pub deployment: Deployment,
    /// MongoDB host.
    pub database_host: String,
    /// MongoDB port.
    pub database_port: u16,
    /// MongoDB user (required when `storage_mode` is `MongoDb`).
    pub database_user: Option<String>,
    /// MongoDB password (required when `storage_mode` is `MongoDb`).
    pub database_password: Option<String>,
}

impl RepositoryConfig {
    /// Creates a new configuration builder.
    pub fn builder() -> RepositoryConfigBuilder {
        RepositoryConfigBuilder::default()
    }

    /// Creates a configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError` if:
    /// - `STORAGE_MODE` contains an invalid value
    /// - `DB_PORT` is not a valid port
    /// - `DB_USER` or `DB_PASSWORD` is missing when `STORAGE_MODE=mongodb`
    pub fn from_env(deployment: Deployment) -> Result<Self, ConfigurationError> {
        Self::from_lookup(deployment, env_lookup)
    }

    /// Creates a configuration through an arbitrary lookup function.
    ///
    /// # Errors
    ///
    /// See [`RepositoryConfig::from_env`].
    pub fn from_lookup<F>(deployment: Deployment, lookup: F) -> Result<Self, ConfigurationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let storage_mode = lookup_trimmed(&lookup, "STORAGE_MODE")
            .map_or(Ok(StorageMode::default()), |value| value.parse())?;

        let config = Self {
            storage_mode,
            deployment,
            database_host: lookup_trimmed(&lookup, "DB_HOST")
                .unwrap_or_else(|| DEFAULT_DATABASE_HOST.to_string()),
            database_port: lookup_port(&lookup, "DB_PORT", DEFAULT_DATABASE_PORT)?,
            database_user: lookup_trimmed(&lookup, "DB_USER"),
            database_password: lookup_trimmed(&lookup, "DB_PASSWORD"),
        };

        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::MissingVariable` if credentials are missing
    /// for MongoDB storage.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.storage_mode == StorageMode::MongoDb {
            if self.database_user.is_none() {
                return Err(ConfigurationError::MissingVariable("DB_USER"));
            }
            if self.database_password.is_none() {
                return Err(ConfigurationError::MissingVariable("DB_PASSWORD"));
            }
        }
        Ok(())
    }

    /// Builds the credentialed MongoDB connection string.
    ///
    /// Authentication is performed against the `admin` database.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::MissingVariable` if credentials are missing.
    pub fn connection_uri(&self) -> Result<String, ConfigurationError> {
        let user = self
            .database_user
            .as_deref()
            .ok_or(ConfigurationError::MissingVariable("DB_USER"))?;
        let password = self
            .database_password
            .as_deref()
            .ok_or(ConfigurationError::MissingVariable("DB_PASSWORD"))?;

        Ok(format!(
            "mongodb://{user}:{password}@{host}:{port}/{database}?authSource=admin",
            host = self.database_host,
            port = self.database_port,
            database = self.deployment.database_name(),
        ))
    }
}

/// Builder for `RepositoryConfig`.
///
/// # Example
///
/// ```ignore
/// let config = RepositoryConfig::builder()
///     .deployment(Deployment::new("Redayit", "prod"))
///     .credentials("admin", "secret")
///     .build()?;
/// ```
#[derive(Debug, Clone)]
pub struct RepositoryConfigBuilder {
    config: RepositoryConfig,
}

impl Default for RepositoryConfigBuilder {
    fn default() -> Self {
        Self {
            config: RepositoryConfig {
                database_host: DEFAULT_DATABASE_HOST.to_string(),
                database_port: DEFAULT_DATABASE_PORT,
                ..RepositoryConfig::default()
            },
        }
    }
}

impl RepositoryConfigBuilder {
    /// Sets the storage mode.
    #[must_use]
    pub const fn storage_mode(mut self, mode: StorageMode) -> Self {
        self.config.storage_mode = mode;
        self
    }

    /// Sets the deployment.
    #[must_use]
    pub fn deployment(mut self, deployment: Deployment) -> Self {
        self.config.deployment = deployment;
        self
    }

    /// Sets the MongoDB host and port.
    #[must_use]
    pub fn address(mut self, host: impl Into<String>, port: u16) -> Self {
        self.config.database_host = host.into();
        self.config.database_port = port;
        self
    }

    /// Sets the MongoDB user and password.
    #[must_use]
    pub fn credentials(mut self, user: impl Into<String>, password: impl Into<String>) -> Self {
        self.config.database_user = Some(user.into());
        self.config.database_password = Some(password.into());
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError` if the configuration is invalid.
    pub fn build(self) -> Result<RepositoryConfig, ConfigurationError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

// =============================================================================
// Error Types
// =============================================================================

/// Errors that can occur during factory initialization.
///
/// Connection failures are not part of this type: they leave the service
/// running with a degraded repository.
#[derive(Debug, Error)]
pub enum FactoryError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),
}

// =============================================================================
// Repository Factory
// =============================================================================

/// The storage handle built at startup.
#[derive(Clone)]
pub struct Repositories {
    /// Todo repository shared by all handlers.
    pub todo_repository: Arc<dyn TodoRepository + Send + Sync>,
    /// Whether the backend answered at startup.
    pub storage_status: StorageStatus,
}

impl std::fmt::Debug for Repositories {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("Repositories")
            .field("todo_repository", &"Arc<dyn TodoRepository>")
            .field("storage_status", &self.storage_status)
            .finish()
    }
}

/// Factory for creating the repository based on configuration.
#[derive(Debug, Clone)]
pub struct RepositoryFactory {
    config: RepositoryConfig,
}

impl RepositoryFactory {
    /// Creates a new repository factory with the given configuration.
    #[must_use]
    pub const fn new(config: RepositoryConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration used by this factory.
    #[must_use]
    pub const fn config(&self) -> &RepositoryConfig {
        &self.config
    }

    /// Creates the repository for the configured storage mode.
    ///
    /// A MongoDB connection failure is logged and yields a degraded
    /// repository rather than an error. No retry is attempted.
    ///
    /// # Errors
    ///
    /// Returns `FactoryError::Configuration` if the connection string cannot
    /// be built.
    pub async fn create(&self) -> Result<Repositories, FactoryError> {
        match self.config.storage_mode {
            StorageMode::InMemory => Ok(Self::create_in_memory_repositories()),
            StorageMode::MongoDb => self.create_mongo_repositories().await,
        }
    }

    /// Creates in-memory repositories.
    fn create_in_memory_repositories() -> Repositories {
        tracing::info!("Using in-memory storage");
        Repositories {
            todo_repository: Arc::new(InMemoryTodoRepository::new()),
            storage_status: StorageStatus::Connected,
        }
    }

    /// Creates MongoDB-backed repositories.
    async fn create_mongo_repositories(&self) -> Result<Repositories, FactoryError> {
        let uri = self.config.connection_uri()?;
        let database = self.config.deployment.database_name();
        let collection = self.config.deployment.collection_name();

        let client = match Client::with_uri_str(&uri).await {
            Ok(client) => client,
            Err(error) => {
                tracing::error!(%error, "MongoDB connection error");
                return Ok(Repositories {
                    todo_repository: Arc::new(UnavailableTodoRepository::new(error.to_string())),
                    storage_status: StorageStatus::Degraded,
                });
            }
        };

        let repository = MongoTodoRepository::new(client, &database, &collection);

        let storage_status = match repository.ping().await {
            Ok(()) => {
                tracing::info!(%database, %collection, "Connected to MongoDB: Database \"{}\"", database);
                StorageStatus::Connected
            }
            Err(error) => {
                tracing::error!(%error, %database, "MongoDB connection error");
                StorageStatus::Degraded
            }
        };

        Ok(Repositories {
            todo_repository: Arc::new(repository),
            storage_status,
        })
    }
}

// =============================================================================
// Tests
// =============================================================================
