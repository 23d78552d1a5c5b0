//! Request body extraction.
//!
//! `JsonBody` reads the body the way a lenient JSON body parser does: a
//! request without a JSON content type, or with an empty body, is read as
//! `{}`. Every failure is reported as an [`ApiErrorResponse`] so rejections
//! carry a stable code like every other API error.

use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use axum::http::{HeaderMap, header};
use serde::de::DeserializeOwned;

use super::error::ApiErrorResponse;

/// JSON request body extractor with API error rejections.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiErrorResponse;

    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = has_json_content_type(request.headers());
        let bytes = Bytes::from_request(request, state)
            .await
            .map_err(|rejection| ApiErrorResponse::invalid_body(rejection.body_text()))?;

        let body: &[u8] = if !is_json || bytes.iter().all(u8::is_ascii_whitespace) {
            b"{}"
        } else {
            &bytes
        };

        serde_json::from_slice(body)
            .map(Self)
            .map_err(|error| ApiErrorResponse::invalid_body(error.to_string()))
    }
}

/// `application/json` or any `+json` media type.
fn has_json_content_type(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(|mime| mime.trim().to_ascii_lowercase())
        .is_some_and(|mime| mime == "application/json" || mime.ends_with("+json"))
}

// =============================================================================
// Tests
// =============================================================================
