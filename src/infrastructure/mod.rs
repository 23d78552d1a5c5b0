//! Infrastructure module for external services.
//!
//! This module contains the storage backends and the factory that selects
//! one at startup.

pub mod factory;
pub mod in_memory;
pub mod mongo;
pub mod repository;
pub mod unavailable;

pub use factory::{
    FactoryError, Repositories, RepositoryConfig, RepositoryConfigBuilder, RepositoryFactory,
    StorageMode,
};
pub use in_memory::InMemoryTodoRepository;
pub use mongo::MongoTodoRepository;
pub use repository::{RepositoryError, StorageStatus, TodoRepository};
pub use unavailable::UnavailableTodoRepository;
