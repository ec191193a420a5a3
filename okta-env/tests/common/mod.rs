#![allow(dead_code)]

use std::cell::RefCell;
use std::net::{SocketAddr, TcpListener};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::routing::get;
use axum::{Json, Router};
use okta_env::{DiscoveryClient, DiscoveryError, Environment, LogSink};
use okta_env_core::{LogRecord, StaticLayer};
use serde_json::{json, Value};
use tracing::Level;
use url::Url;

pub const ISSUER: &str = "https://example.okta.com/oauth2/default";

/// Environment with a single `application` layer holding `pairs`.
pub fn env_with(pairs: &[(&str, &str)]) -> Environment {
    let mut layer = StaticLayer::new("application");
    for (key, value) in pairs {
        layer = layer.with(*key, *value);
    }
    let mut env = Environment::empty();
    env.add_last(layer);
    env
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

pub fn auth0_document(issuer: &str) -> Value {
    json!({
        "issuer": issuer,
        "authorization_endpoint": format!("{issuer}authorize"),
        "token_endpoint": format!("{issuer}oauth/token"),
        "userinfo_endpoint": format!("{issuer}userinfo"),
        "jwks_uri": format!("{issuer}.well-known/jwks.json"),
        "token_endpoint_auth_methods_supported": ["client_secret_basic", "client_secret_post", "none"]
    })
}

/// Serve `router` on a background thread; returns its base URL.
pub fn serve(router: Router) -> String {
    serve_on(TcpListener::bind("127.0.0.1:0").unwrap(), router)
}

fn serve_on(listener: TcpListener, router: Router) -> String {
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

/// Serves `document(issuer)` at the discovery path of an issuer under
/// `/oauth2/default`. Returns the issuer.
pub fn discovery_server(document: fn(&str) -> Value) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let issuer = format!("http://{}/oauth2/default", listener.local_addr().unwrap());
    let body = document(&issuer);
    serve_on(
        listener,
        Router::new().route(
            "/oauth2/default/.well-known/openid-configuration",
            get(move || {
                let body = body.clone();
                async move { Json(body) }
            }),
        ),
    );
    issuer
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

/// In-memory client that records every request.
#[derive(Clone)]
pub struct RecordingClient {
    response: Arc<dyn Fn() -> Result<Value, DiscoveryError> + Send + Sync>,
    calls: Arc<AtomicUsize>,
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
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl DiscoveryClient for RecordingClient {
    fn get_json(&self, _url: &Url) -> Result<Value, DiscoveryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        (self.response)()
    }
}

#[derive(Default)]
pub struct RecordingSink(RefCell<Vec<LogRecord>>);

impl RecordingSink {
    pub fn warnings(&self) -> Vec<String> {
        self.0
            .borrow()
            .iter()
            .filter(|r| r.level == Level::WARN)
            .map(|r| r.message.clone())
            .collect()
    }
}

impl LogSink for RecordingSink {
    fn log(&self, record: &LogRecord) {
        self.0.borrow_mut().push(record.clone());
    }
}
