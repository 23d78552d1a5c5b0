//! Integration tests for the todo handlers.
//!
//! Handlers are called directly with an in-memory `AppState`.

mod common;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use rstest::rstest;

use common::{create_and_save_todo, create_degraded_app_state, create_test_app_state, list_all};
use todo_api::api::dto::{CreateTodoRequest, UpdateTodoRequest};
use todo_api::api::{JsonBody, create_todo, delete_todo, list_todos, update_todo};
use todo_api::domain::TodoId;

fn create_request(title: Option<&str>, description: Option<&str>) -> CreateTodoRequest {
    CreateTodoRequest {
        title: title.map(str::to_string),
        description: description.map(str::to_string),
    }
}

// =============================================================================
// POST Tests
// =============================================================================

#[rstest]
#[tokio::test]
async fn test_create_todo_defaults_completed_to_false() {
    let state = create_test_app_state();

    let (status, Json(todo)) = create_todo(
        State(state.clone()),
        JsonBody(create_request(Some("Buy milk"), None)),
    )
    .await
    .unwrap();

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(todo.title, "Buy milk");
    assert!(!todo.completed);
    assert!(!todo.id.is_empty());
    assert!(todo.description.is_none());
}

#[rstest]
#[tokio::test]
async fn test_create_todo_keeps_description() {
    let state = create_test_app_state();

    let (_, Json(todo)) = create_todo(
        State(state.clone()),
        JsonBody(create_request(Some("Buy milk"), Some("2 liters"))),
    )
    .await
    .unwrap();

    assert_eq!(todo.description.as_deref(), Some("2 liters"));
}

#[rstest]
#[case(None)]
#[case(Some(""))]
#[case(Some("   "))]
#[tokio::test]
async fn test_create_todo_without_title_writes_nothing(#[case] title: Option<&str>) {
    let state = create_test_app_state();
    create_and_save_todo(&state, "Existing").await;

    let error = create_todo(State(state.clone()), JsonBody(create_request(title, None)))
        .await
        .unwrap_err();

    assert_eq!(error.status, StatusCode::BAD_REQUEST);
    assert_eq!(error.error.message, "Task title is required");
    assert_eq!(list_all(&state).await.len(), 1);
}

#[rstest]
#[tokio::test]
async fn test_create_todo_stores_text_as_sent() {
    let state = create_test_app_state();

    let (_, Json(todo)) = create_todo(
        State(state.clone()),
        JsonBody(create_request(Some(" Buy milk "), Some(""))),
    )
    .await
    .unwrap();

    assert_eq!(todo.title, " Buy milk ");
    assert_eq!(todo.description.as_deref(), Some(""));

    let todos = list_all(&state).await;
    assert_eq!(todos[0].title, " Buy milk ");
    assert_eq!(todos[0].description.as_deref(), Some(""));
}

#[rstest]
#[tokio::test]
async fn test_created_todo_appears_exactly_once_in_list() {
    let state = create_test_app_state();

    let (_, Json(created)) = create_todo(
        State(state.clone()),
        JsonBody(create_request(Some("Buy milk"), None)),
    )
    .await
    .unwrap();

    let Json(todos) = list_todos(State(state.clone())).await.unwrap();
    let matches = todos.iter().filter(|todo| todo.id == created.id).count();

    assert_eq!(matches, 1);
    assert_eq!(todos.len(), 1);
}

// =============================================================================
// PUT Tests
// =============================================================================

#[rstest]
#[tokio::test]
async fn test_update_todo_sets_completed() {
    let state = create_test_app_state();
    let todo = create_and_save_todo(&state, "Buy milk").await;

    let Json(updated) = update_todo(
        State(state.clone()),
        Path(todo.todo_id.to_string()),
        JsonBody(UpdateTodoRequest { completed: true }),
    )
    .await
    .unwrap();

    let updated = updated.expect("todo should exist");
    assert!(updated.completed);
    assert_eq!(updated.title, "Buy milk");

    let todos = list_all(&state).await;
    assert!(todos[0].completed);
}

#[rstest]
#[tokio::test]
async fn test_update_missing_todo_returns_null_and_creates_nothing() {
    let state = create_test_app_state();

    let Json(updated) = update_todo(
        State(state.clone()),
        Path(TodoId::generate().to_string()),
        JsonBody(UpdateTodoRequest { completed: true }),
    )
    .await
    .unwrap();

    assert!(updated.is_none());
    assert!(list_all(&state).await.is_empty());
}

#[rstest]
#[tokio::test]
async fn test_update_malformed_id_is_bad_request() {
    let state = create_test_app_state();

    let error = update_todo(
        State(state),
        Path("not-an-id".to_string()),
        JsonBody(UpdateTodoRequest { completed: true }),
    )
    .await
    .unwrap_err();

    assert_eq!(error.status, StatusCode::BAD_REQUEST);
    assert_eq!(error.error.code, "INVALID_ID");
}

// =============================================================================
// DELETE Tests
// =============================================================================

#[rstest]
#[tokio::test]
async fn test_delete_todo_is_idempotent() {
    let state = create_test_app_state();
    let todo = create_and_save_todo(&state, "Buy milk").await;
    let other = create_and_save_todo(&state, "Walk dog").await;

    let first = delete_todo(State(state.clone()), Path(todo.todo_id.to_string()))
        .await
        .unwrap();
    let second = delete_todo(State(state.clone()), Path(todo.todo_id.to_string()))
        .await
        .unwrap();

    assert_eq!(first, StatusCode::NO_CONTENT);
    assert_eq!(second, StatusCode::NO_CONTENT);

    let todos = list_all(&state).await;
    assert_eq!(todos.len(), 1);
    assert_eq!(todos[0].id, other.todo_id.to_string());
}

// =============================================================================
// Storage Failure Tests
// =============================================================================

#[rstest]
#[tokio::test]
async fn test_storage_failure_maps_to_internal_error() {
    let state = create_degraded_app_state();
    let id = TodoId::generate().to_string();

    let list = list_todos(State(state.clone())).await.unwrap_err();
    let create = create_todo(
        State(state.clone()),
        JsonBody(create_request(Some("Buy milk"), None)),
    )
    .await
    .unwrap_err();
    let update = update_todo(
        State(state.clone()),
        Path(id.clone()),
        JsonBody(UpdateTodoRequest { completed: true }),
    )
    .await
    .unwrap_err();
    let delete = delete_todo(State(state), Path(id)).await.unwrap_err();

    for (error, message) in [
        (list, "Error fetching tasks"),
        (create, "Error creating task"),
        (update, "Error updating task"),
        (delete, "Error deleting task"),
    ] {
        assert_eq!(error.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error.error.code, "STORAGE_ERROR");
        assert_eq!(error.error.message, message);
        assert_eq!(
            error.error.error.as_deref(),
            Some("Storage unavailable: connection refused")
        );
    }
}

#[rstest]
#[tokio::test]
async fn test_validation_runs_before_storage() {
    let state = create_degraded_app_state();

    let error = create_todo(State(state), JsonBody(create_request(None, None)))
        .await
        .unwrap_err();

    assert_eq!(error.status, StatusCode::BAD_REQUEST);
}
