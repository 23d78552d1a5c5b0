//! Todo domain model.
//!
//! A `Todo` is the only entity managed by the service. Its title and
//! description are fixed at creation; `completed` is the one mutable field.

use std::str::FromStr;

use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// Value Objects - Newtypes
// =============================================================================

/// Unique identifier for a todo.
///
/// Wraps a MongoDB `ObjectId` so the identifier is stored natively in BSON
/// and rendered as a 24 character hex string everywhere else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(ObjectId);

impl TodoId {
    /// Creates a `TodoId` from an existing `ObjectId`.
    #[must_use]
    pub const fn from_object_id(object_id: ObjectId) -> Self {
        Self(object_id)
    }

    /// Returns the inner `ObjectId`.
    #[must_use]
    pub const fn as_object_id(&self) -> &ObjectId {
        &self.0
    }

    /// Generates a new `TodoId`.
    ///
    /// **Note**: This is an impure function (side effect: clock + counter).
    #[must_use]
    pub fn generate() -> Self {
        Self(ObjectId::new())
    }
}

impl std::fmt::Display for TodoId {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0.to_hex())
    }
}

/// Error returned when a string is not a valid todo identifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid todo id: '{0}'")]
pub struct InvalidTodoId(pub String);

impl FromStr for TodoId {
    type Err = InvalidTodoId;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        ObjectId::parse_str(value.trim())
            .map(Self)
            .map_err(|_| InvalidTodoId(value.to_string()))
    }
}

// =============================================================================
// Todo Entity
// =============================================================================

/// A single to-do item.
///
/// The serialized form is the stored document shape: the identifier lives in
/// `_id`, and an absent description is omitted rather than stored as null.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    /// Identifier assigned on creation.
    #[serde(rename = "_id")]
    pub todo_id: TodoId,
    /// Title of the todo. Never empty.
    pub title: String,
    /// Optional free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether the todo has been completed.
    #[serde(default)]
    pub completed: bool,
}

impl Todo {
    /// Creates a new, not yet completed todo.
    #[must_use]
    pub fn new(todo_id: TodoId, title: impl Into<String>) -> Self {
        Self {
            todo_id,
            title: title.into(),
            description: None,
            completed: false,
        }
    }

    /// Returns a copy of this todo with the given description.
    #[must_use]
    pub fn with_description(self, description: impl Into<String>) -> Self {
        Self {
            description: Some(description.into()),
            ..self
        }
    }

    /// Returns a copy of this todo with `completed` replaced.
    #[must_use]
    pub fn with_completed(self, completed: bool) -> Self {
        Self { completed, ..self }
    }
}

// =============================================================================
// Tests
// =============================================================================
