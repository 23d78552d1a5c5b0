//! Todo list API library.
//!
//! A CRUD HTTP API over a single MongoDB collection whose name is derived
//! from the application name and environment tag.

pub mod api;
pub mod config;
pub mod domain;
pub mod infrastructure;
