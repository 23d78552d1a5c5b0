//! Common test helpers for integration tests.
//!
//! # Note
//!
//! The `#![allow(dead_code)]` attribute is necessary because Rust compiles each
//! integration test file as a separate crate, and not every file uses every
//! helper.

#![allow(dead_code)]

use std::sync::Arc;

use axum::http::HeaderValue;

use todo_api::api::{AppState, TodoResponse, router};
use todo_api::config::Deployment;
use todo_api::domain::{Todo, TodoId};
use todo_api::infrastructure::{
    InMemoryTodoRepository, StorageStatus, UnavailableTodoRepository,
};

pub const TEST_ORIGIN: &str = "http://localhost:3001";

/// Deployment used by every test: collection `redayit_test_todos`.
pub fn test_deployment() -> Deployment {
    Deployment::new("Redayit", "test")
}

/// Creates a test `AppState` backed by an in-memory repository.
pub fn create_test_app_state() -> AppState {
    AppState {
        todo_repository: Arc::new(InMemoryTodoRepository::new()),
        storage_status: StorageStatus::Connected,
        deployment: Arc::new(test_deployment()),
    }
}

/// Creates an `AppState` whose repository fails every call.
pub fn create_degraded_app_state() -> AppState {
    AppState {
        todo_repository: Arc::new(UnavailableTodoRepository::new("connection refused")),
        storage_status: StorageStatus::Degraded,
        deployment: Arc::new(test_deployment()),
    }
}

/// Builds the full router over `state`.
pub fn create_test_router(state: AppState) -> axum::Router {
    router(state, HeaderValue::from_static(TEST_ORIGIN))
}

/// Inserts a todo directly through the repository.
pub async fn create_and_save_todo(state: &AppState, title: &str) -> Todo {
    let todo = Todo::new(TodoId::generate(), title);
    state
        .todo_repository
        .insert(&todo)
        .await
        .expect("Failed to save todo");
    todo
}

/// Returns the current list of todos from the repository.
pub async fn list_all(state: &AppState) -> Vec<TodoResponse> {
    state
        .todo_repository
        .list()
        .await
        .expect("Failed to list todos")
        .iter()
        .map(TodoResponse::from)
        .collect()
}
