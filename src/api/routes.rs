//! Route table.
//!
//! The todo routes live under `/api/{collection}` where `{collection}` is
//! the deployment's collection name, fixed at startup.

use axum::Router;
use axum::http::{HeaderValue, Method, header};
use axum::routing::{get, put};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::handlers::{
    AppState, create_todo, delete_todo, health_check, list_todos, update_todo, welcome,
};

/// Builds the CORS layer allowing a single origin.
#[must_use]
pub fn cors_layer(origin: HeaderValue) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
}

/// Builds the application router.
pub fn router(state: AppState, cors_origin: HeaderValue) -> Router {
    let collection_path = state.deployment.collection_path();
    let item_path = format!("{collection_path}/{{id}}");

    Router::new()
        .route("/", get(welcome))
        .route("/health", get(health_check))
        .route(&collection_path, get(list_todos).post(create_todo))
        .route(&item_path, put(update_todo).delete(delete_todo))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(cors_origin)),
        )
        .with_state(state)
}
