#![allow(dead_code)]

use std::net::{SocketAddr, TcpListener};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use okta_env_oidc::{DiscoveryClient, DiscoveryError};
use serde_json::{json, Value};
use url::Url;

/// Serve `router` on a background thread; returns its base URL.
pub fn serve(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    listener.set_nonblocking(true).unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();

    std::thread::spawn(move || {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        runtime.block_on(async move {
            let listener = tokio::net::TcpListener::from_std(listener).unwrap();
            axum::serve(listener, router).await.unwrap();
        });
    });

    format!("http://{addr}")
}

pub fn okta_document(issuer: &str) -> Value {
    json!({
        "issuer": issuer,
        "authorization_endpoint": format!("{issuer}/v1/authorize"),
        "token_endpoint": format!("{issuer}/v1/token"),
        "userinfo_endpoint": format!("{issuer}/v1/userinfo"),
        "jwks_uri": format!("{issuer}/v1/keys"),
        "introspection_endpoint": format!("{issuer}/v1/introspect"),
        "token_endpoint_auth_methods_supported": ["client_secret_basic", "none"]
    })
}

/// Serves a fixed document at the discovery path under `/oauth2/default`.
pub fn discovery_server(document: Value) -> String {
    serve(Router::new().route(
        "/oauth2/default/.well-known/openid-configuration",
        get(move || {
            let document = document.clone();
            async move { Json(document) }
        }),
    ))
}

pub fn malformed_server() -> String {
    serve(Router::new().route(
        "/.well-known/openid-configuration",
        get(|| async { "<html>definitely not json</html>" }),
    ))
}

pub fn status_server(status: StatusCode) -> String {
    serve(Router::new().route(
        "/.well-known/openid-configuration",
        get(move || async move { (status, "error") }),
    ))
}

pub fn slow_server(delay: Duration) -> String {
    serve(Router::new().route(
        "/.well-known/openid-configuration",
        get(move || async move {
            tokio::time::sleep(delay).await;
            Json(json!({}))
        }),
    ))
}

/// An address nothing listens on.
pub fn closed_address() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

/// In-memory client that records every request.
#[derive(Clone)]
pub struct RecordingClient {
    response: Arc<dyn Fn() -> Result<Value, DiscoveryError> + Send + Sync>,
    calls: Arc<AtomicUsize>,
    urls: Arc<std::sync::Mutex<Vec<String>>>,
}

impl RecordingClient {
    pub fn returning(document: Value) -> Self {
        Self::with(move || Ok(document.clone()))
    }

    pub fn failing(make: fn() -> DiscoveryError) -> Self {
        Self::with(move || Err(make()))
    }

    fn with(response: impl Fn() -> Result<Value, DiscoveryError> + Send + Sync + 'static) -> Self {
        Self {
            response: Arc::new(response),
            calls: Arc::new(AtomicUsize::new(0)),
            urls: Arc::new(std::sync::Mutex::new(Vec::new())),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn urls(&self) -> Vec<String> {
        self.urls.lock().unwrap().clone()
    }
}

impl DiscoveryClient for RecordingClient {
    fn get_json(&self, url: &Url) -> Result<Value, DiscoveryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.urls.lock().unwrap().push(url.to_string());
        (self.response)()
    }
}
