//! In-memory repository implementation.
//!
//! Suitable for tests and for running the service without a database
//! (`STORAGE_MODE=in_memory`). Todos are kept in insertion order, which is
//! the order `list` returns.

use std::sync::Arc;

use futures::future::BoxFuture;
use tokio::sync::RwLock;

use crate::domain::{Todo, TodoId};
use crate::infrastructure::{RepositoryError, TodoRepository};

/// In-memory implementation of `TodoRepository`.
///
/// # Example
///
/// ```ignore
/// let repository = InMemoryTodoRepository::new();
/// let todo = Todo::new(TodoId::generate(), "Buy milk");
///
/// repository.insert(&todo).await?;
/// let todos = repository.list().await?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryTodoRepository {
    todos: Arc<RwLock<Vec<Todo>>>,
}

impl InMemoryTodoRepository {
    /// Creates a new empty in-memory todo repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[allow(clippy::significant_drop_tightening)]
impl TodoRepository for InMemoryTodoRepository {
    fn list(&self) -> BoxFuture<'static, Result<Vec<Todo>, RepositoryError>> {
        let todos = Arc::clone(&self.todos);
        Box::pin(async move { Ok(todos.read().await.clone()) })
    }

    fn insert(&self, todo: &Todo) -> BoxFuture<'static, Result<(), RepositoryError>> {
        let todos = Arc::clone(&self.todos);
        let todo = todo.clone();
        Box::pin(async move {
            let mut guard = todos.write().await;
            if guard.iter().any(|existing| existing.todo_id == todo.todo_id) {
                return Err(RepositoryError::DatabaseError(format!(
                    "duplicate key: {}",
                    todo.todo_id
                )));
            }
            guard.push(todo);
            Ok(())
        })
    }

    fn set_completed(
        &self,
        id: &TodoId,
        completed: bool,
    ) -> BoxFuture<'static, Result<Option<Todo>, RepositoryError>> {
        let todos = Arc::clone(&self.todos);
        let id = *id;
        Box::pin(async move {
            let mut guard = todos.write().await;
            Ok(guard
                .iter_mut()
                .find(|todo| todo.todo_id == id)
                .map(|todo| {
                    todo.completed = completed;
                    todo.clone()
                }))
        })
    }

    fn delete(&self, id: &TodoId) -> BoxFuture<'static, Result<bool, RepositoryError>> {
        let todos = Arc::clone(&self.todos);
        let id = *id;
        Box::pin(async move {
            let mut guard = todos.write().await;
            let before = guard.len();
            guard.retain(|todo| todo.todo_id != id);
            Ok(guard.len() != before)
        })
    }

    fn shutdown(&self) -> BoxFuture<'static, ()> {
        Box::pin(async {})
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn test_todo(title: &str) -> Todo {
        Todo::new(TodoId::generate(), title)
    }

    #[rstest]
    #[tokio::test]
    async fn test_list_empty() {
        let repository = InMemoryTodoRepository::new();
        assert!(repository.list().await.unwrap().is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn test_list_preserves_insertion_order() {
        let repository = InMemoryTodoRepository::new();
        let first = test_todo("first");
        let second = test_todo("second");

        repository.insert(&first).await.unwrap();
        repository.insert(&second).await.unwrap();

        let todos = repository.list().await.unwrap();
        assert_eq!(todos, vec![first, second]);
    }

    #[rstest]
    #[tokio::test]
    async fn test_insert_duplicate_id_fails() {
        let repository = InMemoryTodoRepository::new();
        let todo = test_todo("once");

        repository.insert(&todo).await.unwrap();
        let result = repository.insert(&todo).await;

        assert!(matches!(result, Err(RepositoryError::DatabaseError(_))));
        assert_eq!(repository.list().await.unwrap().len(), 1);
    }

    #[rstest]
    #[case(true)]
    #[case(false)]
    #[tokio::test]
    async fn test_set_completed_existing(#[case] completed: bool) {
        let repository = InMemoryTodoRepository::new();
        let todo = test_todo("toggle").with_completed(!completed);
        repository.insert(&todo).await.unwrap();

        let updated = repository
            .set_completed(&todo.todo_id, completed)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.completed, completed);
        assert_eq!(repository.list().await.unwrap()[0].completed, completed);
    }

    #[rstest]
    #[tokio::test]
    async fn test_set_completed_missing_returns_none() {
        let repository = InMemoryTodoRepository::new();

        let result = repository
            .set_completed(&TodoId::generate(), true)
            .await
            .unwrap();

        assert!(result.is_none());
        assert!(repository.list().await.unwrap().is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let repository = InMemoryTodoRepository::new();
        let todo = test_todo("remove me");
        repository.insert(&todo).await.unwrap();

        assert!(repository.delete(&todo.todo_id).await.unwrap());
        assert!(!repository.delete(&todo.todo_id).await.unwrap());
        assert!(repository.list().await.unwrap().is_empty());
    }
}
