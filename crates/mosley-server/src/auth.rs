use axum::body::Body;
use axum::extract::Request;
use axum::http::{HeaderMap, StatusCode};
use axum::middleware::Next;
use axum::response::Response;

/// Authentication configuration.
#[derive(Clone, Default)]
pub struct AuthConfig {
    /// Bearer token for API access. None = auth disabled.
    pub bearer_token: Option<String>,
}

impl AuthConfig {
    /// Whether a request carrying `headers` may proceed.
    pub fn permits(&self, headers: &HeaderMap) -> bool {
        let Some(expected) = &self.bearer_token else {
            return true;
        };
        headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .is_some_and(|token| token == expected)
    }
}

/// Axum middleware that validates Bearer token authentication.
/// If no token is configured, all requests are allowed through.
pub async fn bearer_auth_middleware(
    request: Request<Body>,
    next: Next,
) -> Result<Response, StatusCode> {
    let auth_config = request
        .extensions()
        .get::<AuthConfig>()
        .cloned()
        .unwrap_or_default();

    if !auth_config.permits(request.headers()) {
        tracing::warn!(path = %request.uri().path(), "Rejected unauthenticated request");
        return Err(StatusCode::UNAUTHORIZED);
    }

    Ok(next.run(request).await)
}
