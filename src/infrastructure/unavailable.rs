//! Repository used when no storage connection could be established.
//!
//! The service keeps running in this state; every storage call fails with
//! `RepositoryError::Unavailable` and is surfaced as a 500 by the handlers.

use futures::future::BoxFuture;

use crate::domain::{Todo, TodoId};
use crate::infrastructure::{RepositoryError, TodoRepository};

/// A `TodoRepository` whose every operation fails.
#[derive(Debug, Clone)]
pub struct UnavailableTodoRepository {
    reason: String,
}

impl UnavailableTodoRepository {
    /// Creates a repository that reports `reason` on every call.
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    fn fail<T: Send + 'static>(&self) -> BoxFuture<'static, Result<T, RepositoryError>> {
        let error = RepositoryError::Unavailable(self.reason.clone());
        Box::pin(async move { Err(error) })
    }
}

impl TodoRepository for UnavailableTodoRepository {
    fn list(&self) -> BoxFuture<'static, Result<Vec<Todo>, RepositoryError>> {
        self.fail()
    }

    fn insert(&self, _todo: &Todo) -> BoxFuture<'static, Result<(), RepositoryError>> {
        self.fail()
    }

    fn set_completed(
        &self,
        _id: &TodoId,
        _completed: bool,
    ) -> BoxFuture<'static, Result<Option<Todo>, RepositoryError>> {
        self.fail()
    }

    fn delete(&self, _id: &TodoId) -> BoxFuture<'static, Result<bool, RepositoryError>> {
        self.fail()
    }

    fn shutdown(&self) -> BoxFuture<'static, ()> {
        Box::pin(async {})
    }
}
