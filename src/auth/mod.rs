//! Admin key gate for the mutating routes.

use axum::{
    extract::Request,
    http::{header, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};
use subtle::ConstantTimeEq;

use crate::errors::{AppError, AppErrorWithRevision};

/// Header name for the admin key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Middleware guarding the admin router. With no key configured every request passes.
pub async fn admin_key_layer(
    expected_key: Option<String>,
    request: Request,
    next: Next,
) -> Response {
    let checked = authorize(expected_key.as_deref(), request.headers());
    match checked {
        Ok(()) => next.run(request).await,
        Err(error) => {
            tracing::warn!(path = %request.uri().path(), "Rejected admin request: {}", error.message());
            AppErrorWithRevision {
                error,
                revision_id: 0,
            }
            .into_response()
        }
    }
}

fn authorize(expected: Option<&str>, headers: &HeaderMap) -> Result<(), AppError> {
    let Some(expected) = expected else {
        return Ok(());
    };

    match presented_key(headers) {
        None => Err(AppError::Unauthorized("Missing admin key".to_string())),
        Some(key) if bool::from(key.as_bytes().ct_eq(expected.as_bytes())) => Ok(()),
        Some(_) => Err(AppError::Unauthorized("Invalid admin key".to_string())),
    }
}

/// Key sent by the caller: `x-api-key` first, else an `Authorization: Bearer` token.
fn presented_key(headers: &HeaderMap) -> Option<&str> {
    header_str(headers, API_KEY_HEADER).or_else(|| {
        header_str(headers, header::AUTHORIZATION.as_str())?.strip_prefix("Bearer ")
    })
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::StatusCode, middleware, routing::post, Router};
    use serde_json::Value;
    use tower::ServiceExt;

    const KEY: &str = "admin-key-123";

    fn gated(expected: Option<&str>) -> Router {
        let expected = expected.map(str::to_string);
        Router::new()
            .route("/admin", post(|| async { "ok" }))
            .layer(middleware::from_fn(move |req, next| {
                admin_key_layer(expected.clone(), req, next)
            }))
    }

    async fn send(expected: Option<&str>, headers: &[(&str, &str)]) -> (StatusCode, Option<Value>) {
        let mut builder = Request::builder().method("POST").uri("/admin");
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }

        let response = gated(expected)
            .oneshot(builder.body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).ok())
    }

    #[tokio::test]
    async fn test_accepts_key_header_and_bearer() {
        let (status, _) = send(Some(KEY), &[(API_KEY_HEADER, KEY)]).await;
        assert_eq!(status, StatusCode::OK);

        let bearer = format!("Bearer {}", KEY);
        let (status, _) = send(Some(KEY), &[("authorization", bearer.as_str())]).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_bearer_prefix_required() {
        let (status, body) = send(Some(KEY), &[("authorization", KEY)]).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        let body = body.unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["error"]["code"], "UNAUTHORIZED");
        assert_eq!(body["error"]["message"], "Missing admin key");
    }

    #[tokio::test]
    async fn test_right_key_in_wrong_header() {
        let (status, _) = send(Some(KEY), &[("x-admin-key", KEY)]).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_wrong_key_header_wins_over_bearer() {
        let bearer = format!("Bearer {}", KEY);
        let (status, body) = send(
            Some(KEY),
            &[(API_KEY_HEADER, "admin-key-124"), ("authorization", bearer.as_str())],
        )
        .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body.unwrap()["error"]["message"], "Invalid admin key");
    }

    #[tokio::test]
    async fn test_open_without_configured_key() {
        let (status, _) = send(None, &[]).await;
        assert_eq!(status, StatusCode::OK);
    }
}
