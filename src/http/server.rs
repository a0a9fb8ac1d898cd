//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (tracing, timeout, request ID, metrics)
//! - Run the locale redirect ahead of page dispatch
//! - Forward normalized requests to the upstream renderer
//! - Serve until the shutdown signal fires

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    extract::State,
    http::{
        uri::{Authority, PathAndQuery, Scheme},
        HeaderValue, Request, StatusCode, Uri, Version,
    },
    middleware,
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::{validate_config, ConfigError, GatewayConfig, ValidationError};
use crate::http::middleware::{
    locale_redirect_middleware, FrameworkScope, RedirectState, X_SITE_AUDIENCE, X_SITE_LOCALE,
};
use crate::http::request::{
    propagate_request_id_layer, request_id, set_request_id_layer, track_metrics,
};
use crate::routing::{LocaleContext, PathNormalizer};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub client: Client<HttpConnector, Body>,
    pub upstream: Authority,
}

/// HTTP server for the locale gateway.
pub struct HttpServer {
    router: Router,
    config: GatewayConfig,
    normalizer: Arc<PathNormalizer>,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    ///
    /// The configuration is validated again here; a server is never built
    /// from a config that would fail at request time.
    pub fn new(config: GatewayConfig) -> Result<Self, ConfigError> {
        validate_config(&config).map_err(ConfigError::Validation)?;

        let normalizer = Arc::new(
            PathNormalizer::from_config(&config.locales, &config.bypass)
                .map_err(|e| ConfigError::Validation(vec![e]))?,
        );
        let status = StatusCode::from_u16(config.redirect.status).map_err(|_| {
            ConfigError::Validation(vec![ValidationError::RedirectStatus(config.redirect.status)])
        })?;
        let upstream = Authority::from_str(&config.upstream.address).map_err(|_| {
            ConfigError::Validation(vec![ValidationError::InvalidAddress {
                field: "upstream.address",
                value: config.upstream.address.clone(),
            }])
        })?;

        let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());

        let state = AppState { client, upstream };
        let redirect = RedirectState::new(
            normalizer.clone(),
            FrameworkScope::from_prefixes(&config.bypass.prefixes),
            status,
        );

        let router = Self::build_router(&config, state, redirect);
        Ok(Self {
            router,
            config,
            normalizer,
        })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &GatewayConfig, state: AppState, redirect: RedirectState) -> Router {
        Router::new()
            .route("/{*path}", any(forward_handler))
            .route("/", any(forward_handler))
            .route_layer(middleware::from_fn_with_state(
                redirect,
                locale_redirect_middleware,
            ))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(middleware::from_fn(track_metrics))
            .layer(propagate_request_id_layer())
            .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    path = %request.uri().path(),
                    request_id = %request_id(request.headers()),
                )
            }))
            .layer(set_request_id_layer())
    }

    /// Run the server, accepting connections on the given listener until
    /// `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            upstream = %self.config.upstream.address,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// The assembled router, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    pub fn normalizer(&self) -> &PathNormalizer {
        &self.normalizer
    }
}

/// Forward a normalized request to the upstream renderer.
async fn forward_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let request_id = request_id(request.headers()).to_string();
    let context = request.extensions().get::<LocaleContext>().cloned();
    let (mut parts, body) = request.into_parts();

    // URI rewrite
    let mut uri_parts = parts.uri.clone().into_parts();
    uri_parts.scheme = Some(Scheme::HTTP);
    uri_parts.authority = Some(state.upstream.clone());
    if uri_parts.path_and_query.is_none() {
        uri_parts.path_and_query = Some(PathAndQuery::from_static("/"));
    }
    parts.uri = match Uri::from_parts(uri_parts) {
        Ok(uri) => uri,
        Err(e) => {
            tracing::warn!(request_id = %request_id, error = %e, "Cannot build upstream URI");
            return (StatusCode::BAD_REQUEST, "Invalid request URI").into_response();
        }
    };
    parts.version = Version::HTTP_11;

    // Context headers are set only by the gateway
    parts.headers.remove(X_SITE_LOCALE);
    parts.headers.remove(X_SITE_AUDIENCE);
    if let Some(ctx) = context {
        insert_header(&mut parts.headers, X_SITE_LOCALE, &ctx.locale);
        insert_header(&mut parts.headers, X_SITE_AUDIENCE, &ctx.audience);
    }

    tracing::debug!(request_id = %request_id, uri = %parts.uri, "Forwarding request");

    match state.client.request(Request::from_parts(parts, body)).await {
        Ok(response) => {
            let (parts, body) = response.into_parts();
            Response::from_parts(parts, Body::new(body))
        }
        Err(e) => {
            tracing::error!(request_id = %request_id, error = %e, "Upstream error");
            (StatusCode::BAD_GATEWAY, "Upstream request failed").into_response()
        }
    }
}

fn insert_header(
    headers: &mut axum::http::HeaderMap,
    name: axum::http::HeaderName,
    value: &str,
) {
    if let Ok(value) = HeaderValue::from_str(value) {
        headers.insert(name, value);
    }
}
