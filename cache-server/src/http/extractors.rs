//! Custom Axum extractors
//!
//! Rejections map to `ApiError::BadRequest` so every malformed input
//! produces a 400 with a short message.

use axum::body::Bytes;
use axum::extract::{FromRequest, FromRequestParts, Path, Query, Request};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;

use super::error::ApiError;

/// Extract a numeric record id from the trailing path segment
pub struct ValidId(pub i64);

impl<S> FromRequestParts<S> for ValidId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::BadRequest("invalid id"))?;

        let id = id
            .parse::<i64>()
            .map_err(|_| ApiError::BadRequest("invalid id"))?;
        Ok(Self(id))
    }
}

/// Raw query string pairs in request order
///
/// Lookups return the first value for a key, so `?q=a&q=b` means `q=a`.
#[derive(Debug, Default)]
pub struct QueryParams(pub Vec<(String, String)>);

impl QueryParams {
    pub fn first(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

impl<S> FromRequestParts<S> for QueryParams
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(pairs) = Query::<Vec<(String, String)>>::from_request_parts(parts, state)
            .await
            .map_err(|err| {
                tracing::debug!("failed to decode query: {}", err);
                ApiError::BadRequest("invalid query")
            })?;
        Ok(Self(pairs))
    }
}

/// JSON body decoded regardless of `Content-Type`
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.map_err(|err| {
            tracing::debug!("failed to read body: {}", err);
            ApiError::BadRequest("invalid body")
        })?;

        let value = serde_json::from_slice(&bytes).map_err(|err| {
            tracing::debug!("failed to decode body: {}", err);
            ApiError::BadRequest("invalid body")
        })?;
        Ok(Self(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request as HttpRequest, StatusCode};
    use axum::routing::{get, post};
    use axum::Router;
    use tower::ServiceExt;

    use crate::models::LocationInput;

    fn app() -> Router {
        Router::new()
            .route(
                "/search",
                get(|params: QueryParams| async move {
                    params.first("q").unwrap_or("-").to_string()
                }),
            )
            .route("/things/{id}", get(|ValidId(id): ValidId| async move { id.to_string() }))
            .route(
                "/things",
                post(|JsonBody(input): JsonBody<LocationInput>| async move { input.name }),
            )
    }

    #[tokio::test]
    async fn id_must_be_integer() {
        for (uri, status) in [
            ("/things/42", StatusCode::OK),
            ("/things/-1", StatusCode::OK),
            ("/things/abc", StatusCode::BAD_REQUEST),
            ("/things/1.5", StatusCode::BAD_REQUEST),
        ] {
            let response = app()
                .oneshot(HttpRequest::builder().uri(uri).body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), status, "{uri}");
        }
    }

    #[tokio::test]
    async fn repeated_query_key_takes_first_value() {
        for (uri, expected) in [
            ("/search?q=a&q=b", "a"),
            ("/search?other=1&q=b%20c", "b c"),
            ("/search", "-"),
        ] {
            let response = app()
                .oneshot(HttpRequest::builder().uri(uri).body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);
            let body = axum::body::to_bytes(response.into_body(), usize::MAX)
                .await
                .unwrap();
            assert_eq!(&body[..], expected.as_bytes(), "{uri}");
        }
    }

    #[tokio::test]
    async fn body_without_content_type_is_decoded() {
        let response = app()
            .oneshot(
                HttpRequest::builder()
                    .method("POST")
                    .uri("/things")
                    .body(Body::from(r#"{"name":"Garage"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn malformed_body_is_400() {
        let response = app()
            .oneshot(
                HttpRequest::builder()
                    .method("POST")
                    .uri("/things")
                    .header("content-type", "application/json")
                    .body(Body::from("{not json"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
