//! Repository trait for the todo collection.
//!
//! Every method returns a boxed `'static` future so implementations can be
//! used behind `Arc<dyn TodoRepository>` and awaited from axum handlers.

use futures::future::BoxFuture;
use thiserror::Error;

use crate::domain::{Todo, TodoId};

// =============================================================================
// Repository Error
// =============================================================================

/// Errors that can occur during repository operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// The database rejected or failed the operation.
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// A stored document could not be decoded, or a todo could not be encoded.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// No storage connection was established at startup.
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

impl From<mongodb::error::Error> for RepositoryError {
    fn from(error: mongodb::error::Error) -> Self {
        match *error.kind {
            mongodb::error::ErrorKind::BsonDeserialization(_)
            | mongodb::error::ErrorKind::BsonSerialization(_) => {
                Self::SerializationError(error.to_string())
            }
            _ => Self::DatabaseError(error.to_string()),
        }
    }
}

// =============================================================================
// Storage Status
// =============================================================================

/// Outcome of the startup connection attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageStatus {
    /// The backend answered at startup.
    Connected,
    /// The backend could not be reached at startup; requests will fail
    /// individually until it becomes reachable.
    Degraded,
}

// =============================================================================
// Todo Repository
// =============================================================================

/// Repository trait for todo documents.
pub trait TodoRepository: Send + Sync {
    /// Returns every todo in the backend's natural order.
    fn list(&self) -> BoxFuture<'static, Result<Vec<Todo>, RepositoryError>>;

    /// Inserts a new todo.
    fn insert(&self, todo: &Todo) -> BoxFuture<'static, Result<(), RepositoryError>>;

    /// Sets `completed` on the todo with the given ID.
    ///
    /// Returns the updated todo, or `Ok(None)` if no todo has that ID.
    fn set_completed(
        &self,
        id: &TodoId,
        completed: bool,
    ) -> BoxFuture<'static, Result<Option<Todo>, RepositoryError>>;

    /// Deletes a todo by its ID.
    ///
    /// Returns `Ok(true)` if the todo was deleted, `Ok(false)` if it didn't exist.
    fn delete(&self, id: &TodoId) -> BoxFuture<'static, Result<bool, RepositoryError>>;

    /// Releases the underlying connection.
    fn shutdown(&self) -> BoxFuture<'static, ()>;
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::doc;
    use rstest::rstest;

    #[rstest]
    fn test_bson_deserialization_error_maps_to_serialization_error() {
        let bson_error =
            mongodb::bson::from_document::<Todo>(doc! { "title": 5 }).unwrap_err();
        let error = RepositoryError::from(mongodb::error::Error::from(bson_error));

        assert!(matches!(error, RepositoryError::SerializationError(_)));
    }

    #[rstest]
    fn test_other_driver_error_maps_to_database_error() {
        let io_error =
            std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "connection refused");
        let error = RepositoryError::from(mongodb::error::Error::from(io_error));

        match error {
            RepositoryError::DatabaseError(message) => {
                assert!(message.contains("connection refused"));
            }
            other => panic!("Expected DatabaseError, got {other:?}"),
        }
    }
}
