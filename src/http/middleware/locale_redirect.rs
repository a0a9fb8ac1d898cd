//! Locale redirect middleware.
//! Enforces the `/{locale}/{audience}` prefix on page requests.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderValue, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::http::middleware::scope::FrameworkScope;
use crate::observability::metrics::{self, NormalizationOutcome};
use crate::routing::matcher::PathMatcher;
use crate::routing::{NormalizationDecision, PathNormalizer};

/// State required for the locale redirect.
#[derive(Clone)]
pub struct RedirectState {
    pub normalizer: Arc<PathNormalizer>,
    pub scope: Arc<FrameworkScope>,
    pub status: StatusCode,
}

impl RedirectState {
    pub fn new(normalizer: Arc<PathNormalizer>, scope: FrameworkScope, status: StatusCode) -> Self {
        Self {
            normalizer,
            scope: Arc::new(scope),
            status,
        }
    }
}

pub async fn locale_redirect_middleware(
    State(state): State<RedirectState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let path = req.uri().path().to_owned();

    // 1. Framework routes never reach the normalizer.
    if state.scope.matches(&path) {
        metrics::record_normalization(NormalizationOutcome::Scope);
        return next.run(req).await;
    }

    // 2. Normalize.
    match state.normalizer.normalize(&path) {
        NormalizationDecision::Pass => {
            match state.normalizer.context(&path) {
                Some(ctx) => {
                    metrics::record_normalization(NormalizationOutcome::Pass);
                    req.extensions_mut().insert(ctx);
                }
                None => metrics::record_normalization(NormalizationOutcome::Bypass),
            }
            next.run(req).await
        }
        NormalizationDecision::Redirect { new_path } => {
            let location = with_query(&new_path, req.uri().query());
            tracing::debug!(path = %path, location = %location, "Redirecting to normalized path");
            metrics::record_normalization(NormalizationOutcome::Redirect);
            redirect_response(state.status, &location)
        }
    }
}

/// Append the original query string, if any, to a normalized path.
pub fn with_query(path: &str, query: Option<&str>) -> String {
    match query {
        Some(q) if !q.is_empty() => format!("{path}?{q}"),
        _ => path.to_string(),
    }
}

fn redirect_response(status: StatusCode, location: &str) -> Response {
    match HeaderValue::from_str(location) {
        Ok(value) => (status, [(header::LOCATION, value)]).into_response(),
        Err(_) => {
            tracing::warn!(location = %location, "Normalized path is not a valid header value");
            (StatusCode::BAD_REQUEST, "Invalid request path").into_response()
        }
    }
}
