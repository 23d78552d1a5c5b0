//! HTTP handlers for the todo API.
//!
//! Each handler performs exactly one repository call and maps the outcome
//! to a response. Handlers share nothing but the repository handle in
//! [`AppState`].

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use super::dto::{CreateTodoRequest, TodoResponse, UpdateTodoRequest, validate_title};
use super::error::ApiErrorResponse;
use super::extract::JsonBody;
use crate::config::Deployment;
use crate::domain::{Todo, TodoId};
use crate::infrastructure::{Repositories, StorageStatus, TodoRepository};

// =============================================================================
// Application State
// =============================================================================

/// Shared application dependencies.
///
/// The repository is a trait object so the backend (MongoDB, in-memory or
/// degraded) is chosen at runtime by the `RepositoryFactory`.
#[derive(Clone)]
pub struct AppState {
    /// Todo repository for persistence.
    pub todo_repository: Arc<dyn TodoRepository + Send + Sync>,
    /// Whether the backend answered at startup.
    pub storage_status: StorageStatus,
    /// Names the collection and the application.
    pub deployment: Arc<Deployment>,
}

impl AppState {
    /// Creates a new `AppState` from initialized repositories.
    #[must_use]
    pub fn from_repositories(repositories: Repositories, deployment: Deployment) -> Self {
        Self {
            todo_repository: repositories.todo_repository,
            storage_status: repositories.storage_status,
            deployment: Arc::new(deployment),
        }
    }
}

// =============================================================================
// GET /api/{collection} Handler
// =============================================================================

/// Lists every todo.
///
/// # Response
///
/// - **200 OK**: JSON array of todos, in storage order
/// - **500 Internal Server Error**: Storage error
///
/// # Errors
///
/// Returns [`ApiErrorResponse`] if the repository call fails.
pub async fn list_todos(
    State(state): State<AppState>,
) -> Result<Json<Vec<TodoResponse>>, ApiErrorResponse> {
    let todos = state
        .todo_repository
        .list()
        .await
        .map_err(|error| ApiErrorResponse::storage("Error fetching tasks", &error))?;

    Ok(Json(todos.iter().map(TodoResponse::from).collect()))
}

// =============================================================================
// POST /api/{collection} Handler
// =============================================================================

/// Creates a new todo.
///
/// # Request Body
///
/// ```json
/// {
///   "title": "Todo title",
///   "description": "Optional description"
/// }
/// ```
///
/// # Response
///
/// A request without a JSON body is read as `{}` and fails title validation.
///
/// - **201 Created**: Todo created, `completed` is `false`
/// - **400 Bad Request**: Title missing or blank, or body is not valid JSON;
///   nothing is written
/// - **500 Internal Server Error**: Storage error
///
/// # Errors
///
/// Returns [`ApiErrorResponse`] for validation and storage failures.
pub async fn create_todo(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<CreateTodoRequest>,
) -> Result<(StatusCode, Json<TodoResponse>), ApiErrorResponse> {
    let validated = validate_create_request(&request)?;
    let todo = build_todo(TodoId::generate(), validated);

    state
        .todo_repository
        .insert(&todo)
        .await
        .map_err(|error| ApiErrorResponse::storage("Error creating task", &error))?;

    tracing::debug!(todo_id = %todo.todo_id, "Todo created");

    Ok((StatusCode::CREATED, Json(TodoResponse::from(todo))))
}

// =============================================================================
// PUT /api/{collection}/{id} Handler
// =============================================================================

/// Sets the `completed` flag of a todo.
///
/// # Response
///
/// - **200 OK**: The updated todo, or `null` if no todo has this ID
/// - **400 Bad Request**: Malformed ID, or body without a boolean `completed`
/// - **500 Internal Server Error**: Storage error
///
/// # Errors
///
/// Returns [`ApiErrorResponse`] for a malformed ID or a storage failure.
pub async fn update_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(request): JsonBody<UpdateTodoRequest>,
) -> Result<Json<Option<TodoResponse>>, ApiErrorResponse> {
    let todo_id: TodoId = id.parse()?;

    let updated = state
        .todo_repository
        .set_completed(&todo_id, request.completed)
        .await
        .map_err(|error| ApiErrorResponse::storage("Error updating task", &error))?;

    if updated.is_none() {
        tracing::debug!(%todo_id, "Update target not found");
    }

    Ok(Json(updated.map(TodoResponse::from)))
}

// =============================================================================
// DELETE /api/{collection}/{id} Handler
// =============================================================================

/// Deletes a todo.
///
/// # Response
///
/// - **204 No Content**: Whether or not the todo existed
/// - **400 Bad Request**: Malformed ID
/// - **500 Internal Server Error**: Storage error
///
/// # Errors
///
/// Returns [`ApiErrorResponse`] for a malformed ID or a storage failure.
pub async fn delete_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiErrorResponse> {
    let todo_id: TodoId = id.parse()?;

    let deleted = state
        .todo_repository
        .delete(&todo_id)
        .await
        .map_err(|error| ApiErrorResponse::storage("Error deleting task", &error))?;

    tracing::debug!(%todo_id, deleted, "Todo delete processed");

    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
// Helper Types and Functions
// =============================================================================

/// Validated create todo data.
#[derive(Debug)]
struct ValidatedCreateTodo {
    title: String,
    description: Option<String>,
}

/// Validates a create todo request.
fn validate_create_request(
    request: &CreateTodoRequest,
) -> Result<ValidatedCreateTodo, ApiErrorResponse> {
    Ok(ValidatedCreateTodo {
        title: validate_title(request.title.as_deref())?,
        description: request.description.clone(),
    })
}

/// Builds a todo from validated data.
fn build_todo(todo_id: TodoId, validated: ValidatedCreateTodo) -> Todo {
    let todo = Todo::new(todo_id, validated.title);
    match validated.description {
        Some(description) => todo.with_description(description),
        None => todo,
    }
}

// =============================================================================
// GET / Handler
// =============================================================================

/// Welcome message served at `/`. Fixed text, independent of `APP_NAME`.
pub const WELCOME_MESSAGE: &str = "Welcome to the Redayit V6 App!";

/// Plain-text welcome message.
pub async fn welcome() -> &'static str {
    WELCOME_MESSAGE
}

// =============================================================================
// GET /health Handler
// =============================================================================

/// Health check response body.
#[derive(Debug, Clone, serde::Serialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: &'static str,
    /// Service version.
    pub version: &'static str,
    /// Outcome of the startup storage connection.
    pub storage: StorageStatus,
}

/// Health check endpoint.
///
/// # Response
///
/// - **200 OK**
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "storage": "connected"
/// }
/// ```
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        storage: state.storage_status,
    })
}

// =============================================================================
// Tests
// =============================================================================
