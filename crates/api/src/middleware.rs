use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    extract::State,
    http::{HeaderValue, header::HOST},
    middleware::Next,
    response::Response,
};
use tracing::Instrument;
use uuid::Uuid;

use courseware_auth::KeyValidator;

use crate::app::errors::ApiError;
use crate::context::RequestContext;

/// Header carrying the client's API key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Header echoing the request correlation id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

#[derive(Clone)]
pub struct AuthState {
    pub validator: Arc<dyn KeyValidator>,
}

pub async fn api_key_middleware(
    State(state): State<AuthState>,
    req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let presented = req
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok());

    state.validator.validate(presented)?;

    Ok(next.run(req).await)
}

#[derive(Debug, Clone)]
pub struct ContextState {
    pub public_base_url: Option<String>,
    pub base_path: String,
}

pub async fn request_context_middleware(
    State(state): State<ContextState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let origin = match &state.public_base_url {
        Some(url) => url.clone(),
        None => {
            let host = req
                .headers()
                .get(HOST)
                .and_then(|value| value.to_str().ok())
                .unwrap_or("localhost");
            format!("http://{host}")
        }
    };

    req.extensions_mut()
        .insert(RequestContext::new(format!("{origin}{}", state.base_path)));

    next.run(req).await
}

/// Wraps each request in a span carrying a fresh correlation id.
pub async fn trace_middleware(req: axum::http::Request<axum::body::Body>, next: Next) -> Response {
    let request_id = Uuid::now_v7();
    let span = tracing::info_span!(
        "request",
        %request_id,
        method = %req.method(),
        path = %req.uri().path(),
    );

    let started = Instant::now();
    let mut response = next.run(req).instrument(span.clone()).await;

    span.in_scope(|| {
        tracing::debug!(
            status = response.status().as_u16(),
            elapsed_ms = elapsed_millis(started.elapsed()),
            "request completed"
        );
    });

    if let Ok(value) = HeaderValue::from_str(&request_id.to_string()) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}

/// Whole milliseconds, saturating at `u64::MAX`.
fn elapsed_millis(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapsed_millis_saturates() {
        assert_eq!(elapsed_millis(Duration::from_millis(1500)), 1500);
        assert_eq!(elapsed_millis(Duration::MAX), u64::MAX);
    }
}
