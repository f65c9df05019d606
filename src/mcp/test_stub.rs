//! Shared stub server for MCP handler tests.
//!
//! Same shape as the engine tests: an Axum fallback route that records every
//! request and answers with a canned status/body, wrapped in a handler.

use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::any;
use tokio::net::TcpListener;

use crate::config::Config;
use crate::twapi::Engine;

use super::TeamworkMcp;

#[derive(Debug, Clone)]
pub(crate) struct Recorded {
    pub method: String,
    pub path_and_query: String,
    pub body: Vec<u8>,
}

pub(crate) type Log = Arc<Mutex<Vec<Recorded>>>;

#[derive(Clone)]
struct StubState {
    log: Log,
    status: StatusCode,
    body: &'static str,
}

async fn record(
    State(state): State<StubState>,
    method: Method,
    uri: Uri,
    body: Bytes,
) -> Response {
    state.log.lock().unwrap().push(Recorded {
        method: method.to_string(),
        path_and_query: uri
            .path_and_query()
            .map(|pq| pq.to_string())
            .unwrap_or_default(),
        body: body.to_vec(),
    });
    (state.status, state.body).into_response()
}

/// Starts a stub installation and returns a handler pointed at it plus the
/// request log.
pub(crate) async fn stub_mcp(status: StatusCode, body: &'static str) -> (TeamworkMcp, Log) {
    rustls::crypto::ring::default_provider().install_default().ok();
    let log: Log = Arc::new(Mutex::new(Vec::new()));
    let state = StubState {
        log: Arc::clone(&log),
        status,
        body,
    };
    let app = Router::new().fallback(any(record)).with_state(state);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let config = Config {
        server: format!("http://{addr}"),
        api_token: "test-token".to_string(),
    };
    (TeamworkMcp::new(Engine::new(config)), log)
}
