//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::time::Duration;

use axum::{body::Body, http::Request, routing::any, Json, Router};
use locale_gateway::config::GatewayConfig;
use locale_gateway::{HttpServer, Shutdown};
use serde_json::{json, Value};
use tokio::net::TcpListener;

/// Start a renderer stand-in that echoes what it received as JSON.
pub async fn start_echo_upstream() -> SocketAddr {
    async fn echo(request: Request<Body>) -> Json<Value> {
        let header = |name: &str| {
            request
                .headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        Json(json!({
            "path": request.uri().path(),
            "query": request.uri().query(),
            "locale": header("x-site-locale"),
            "audience": header("x-site-audience"),
            "request_id": header("x-request-id"),
        }))
    }

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = Router::new()
        .route("/", any(echo))
        .route("/{*path}", any(echo));

    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    addr
}

/// An address nothing is listening on.
#[allow(dead_code)]
pub async fn closed_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

pub struct TestGateway {
    pub address: String,
    pub shutdown: Shutdown,
    pub handle: tokio::task::JoinHandle<Result<(), std::io::Error>>,
}

/// Spawn a gateway in front of `upstream`, letting the test adjust the config.
pub async fn spawn_gateway<F>(upstream: SocketAddr, customize: F) -> TestGateway
where
    F: FnOnce(&mut GatewayConfig),
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let mut config = GatewayConfig::default();
    config.listener.bind_address = addr.to_string();
    config.upstream.address = upstream.to_string();
    customize(&mut config);

    let server = HttpServer::new(config).expect("valid test config");
    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let handle = tokio::spawn(async move { server.run(listener, server_shutdown).await });

    // Wait for server to start
    tokio::time::sleep(Duration::from_millis(50)).await;

    TestGateway {
        address: format!("http://{}", addr),
        shutdown,
        handle,
    }
}

/// Client that reports redirects instead of following them.
pub fn no_redirect_client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .no_proxy()
        .build()
        .unwrap()
}

#[allow(dead_code)]
pub fn following_client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}
