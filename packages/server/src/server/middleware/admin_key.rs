use axum::response::IntoResponse;
use axum::{middleware::Next, response::Response};
use tracing::debug;

use crate::common::ApiError;

/// Admin key middleware
///
/// The back office authenticates with the association's privileged access
/// key, sent as `Authorization: Bearer <key>` or an `x-admin-key` header.
/// Requests without the key are rejected before reaching any handler.
pub async fn admin_key_middleware(
    admin_key: String,
    request: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    if !is_authorized(&request, &admin_key) {
        debug!("Rejected admin request without valid key");
        return ApiError::unauthorized("admin key required").into_response();
    }

    next.run(request).await
}

/// Check the privileged key on an admin request
fn is_authorized(request: &axum::http::Request<axum::body::Body>, admin_key: &str) -> bool {
    let presented = request
        .headers()
        .get("authorization")
        .and_then(|h| h.to_str().ok())
        .map(|h| h.strip_prefix("Bearer ").unwrap_or(h))
        .or_else(|| {
            request
                .headers()
                .get("x-admin-key")
                .and_then(|h| h.to_str().ok())
        });

    presented == Some(admin_key)
}
