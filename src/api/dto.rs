//! Data Transfer Objects for API requests and responses.
//!
//! This module contains DTOs that are separate from the domain model,
//! providing a clean API contract.

use serde::{Deserialize, Serialize};

use super::error::ValidationError;
use crate::domain::Todo;

/// Message returned when a todo is created without a title.
pub const TITLE_REQUIRED: &str = "Task title is required";

// =============================================================================
// Todo DTOs
// =============================================================================

/// Request DTO for creating a new todo.
///
/// `title` is optional at the type level so a missing title is reported as a
/// validation error rather than a deserialization failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateTodoRequest {
    /// Title of the todo.
    #[serde(default)]
    pub title: Option<String>,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
}

/// Request DTO for updating a todo's completion flag.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct UpdateTodoRequest {
    /// New value for `completed`.
    pub completed: bool,
}

/// Response DTO for a todo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoResponse {
    /// Todo ID as a hex string.
    #[serde(rename = "_id")]
    pub id: String,
    /// Title of the todo.
    pub title: String,
    /// Description of the todo.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether the todo is completed.
    pub completed: bool,
}

impl From<&Todo> for TodoResponse {
    fn from(todo: &Todo) -> Self {
        Self {
            id: todo.todo_id.to_string(),
            title: todo.title.clone(),
            description: todo.description.clone(),
            completed: todo.completed,
        }
    }
}

impl From<Todo> for TodoResponse {
    fn from(todo: Todo) -> Self {
        Self::from(&todo)
    }
}

// =============================================================================
// Validation Functions
// =============================================================================

/// Validates a todo title.
///
/// # Validation Rules
///
/// - Title must be present
/// - Title must not be empty after trimming whitespace
///
/// The title is returned exactly as sent.
///
/// # Errors
///
/// Returns `ValidationError` if the title is missing or blank.
pub fn validate_title(title: Option<&str>) -> Result<String, ValidationError> {
    title
        .filter(|title| !title.trim().is_empty())
        .map(str::to_string)
        .ok_or_else(|| ValidationError::single("title", TITLE_REQUIRED))
}

// =============================================================================
// Tests
// =============================================================================
