//! MongoDB repository implementation.
//!
//! Todos are stored one document per todo in a collection named after the
//! deployment (see [`Deployment::collection_name`](crate::config::Deployment::collection_name)).
//! The driver's `Client` pools connections internally and is shared by all
//! requests.
//!
//! # Document Shape
//!
//! ```json
//! { "_id": ObjectId, "title": "...", "description": "...", "completed": false }
//! ```
//!
//! `description` is omitted when absent. Unknown fields such as `__v` are
//! ignored on read.

use futures::TryStreamExt;
use futures::future::BoxFuture;
use mongodb::bson::doc;
use mongodb::options::ReturnDocument;
use mongodb::{Client, Collection};

use crate::domain::{Todo, TodoId};
use crate::infrastructure::{RepositoryError, TodoRepository};

/// MongoDB implementation of `TodoRepository`.
#[derive(Debug, Clone)]
pub struct MongoTodoRepository {
    client: Client,
    collection: Collection<Todo>,
}

impl MongoTodoRepository {
    /// Creates a repository over `database.collection` using `client`.
    #[must_use]
    pub fn new(client: Client, database: &str, collection: &str) -> Self {
        let collection = client.database(database).collection::<Todo>(collection);
        Self { client, collection }
    }

    /// Sends a `ping` to the server.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::DatabaseError` if the server cannot be reached
    /// or rejects the credentials.
    pub async fn ping(&self) -> Result<(), RepositoryError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await?;
        Ok(())
    }
}

impl TodoRepository for MongoTodoRepository {
    fn list(&self) -> BoxFuture<'static, Result<Vec<Todo>, RepositoryError>> {
        let collection = self.collection.clone();

        Box::pin(async move {
            let cursor = collection.find(doc! {}).await?;
            let todos: Vec<Todo> = cursor.try_collect().await?;
            Ok(todos)
        })
    }

    fn insert(&self, todo: &Todo) -> BoxFuture<'static, Result<(), RepositoryError>> {
        let collection = self.collection.clone();
        let todo = todo.clone();

        Box::pin(async move {
            collection.insert_one(&todo).await?;
            Ok(())
        })
    }

    fn set_completed(
        &self,
        id: &TodoId,
        completed: bool,
    ) -> BoxFuture<'static, Result<Option<Todo>, RepositoryError>> {
        let collection = self.collection.clone();
        let object_id = *id.as_object_id();

        Box::pin(async move {
            Ok(collection
                .find_one_and_update(
                    doc! { "_id": object_id },
                    doc! { "$set": { "completed": completed } },
                )
                .return_document(ReturnDocument::After)
                .await?)
        })
    }

    fn delete(&self, id: &TodoId) -> BoxFuture<'static, Result<bool, RepositoryError>> {
        let collection = self.collection.clone();
        let object_id = *id.as_object_id();

        Box::pin(async move {
            let result = collection.delete_one(doc! { "_id": object_id }).await?;
            Ok(result.deleted_count > 0)
        })
    }

    fn shutdown(&self) -> BoxFuture<'static, ()> {
        let client = self.client.clone();
        Box::pin(async move {
            client.shutdown().await;
        })
    }
}

// =============================================================================
// Tests
// =============================================================================
