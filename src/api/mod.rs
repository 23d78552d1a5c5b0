//! API module for HTTP handlers.
//!
//! This module contains route definitions and request/response handlers.

pub mod dto;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod routes;

pub use dto::{CreateTodoRequest, TodoResponse, UpdateTodoRequest};
pub use error::{ApiError, ApiErrorResponse, ErrorKind, FieldError, ValidationError};
pub use extract::JsonBody;
pub use handlers::{
    AppState, HealthResponse, WELCOME_MESSAGE, create_todo, delete_todo, health_check, list_todos,
    update_todo, welcome,
};
pub use routes::{cors_layer, router};
