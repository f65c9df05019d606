//! Engine tests against an in-process stub server.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::any;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use tokio::net::TcpListener;

use crate::config::Config;

use super::{Engine, Error, RequestOption, milestone, project};

#[derive(Debug, Clone)]
struct Recorded {
    method: String,
    path_and_query: String,
    authorization: Option<String>,
    accept: Option<String>,
    body: Vec<u8>,
}

type Log = Arc<Mutex<Vec<Recorded>>>;

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
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    state.log.lock().unwrap().push(Recorded {
        method: method.to_string(),
        path_and_query: uri
            .path_and_query()
            .map(|pq| pq.to_string())
            .unwrap_or_default(),
        authorization: headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        accept: headers
            .get("accept")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body: body.to_vec(),
    });
    (state.status, state.body).into_response()
}

/// Starts a stub that answers every route with `status`/`body` and records
/// each request. Returns the engine pointed at it and the request log.
async fn stub_engine(status: StatusCode, body: &'static str) -> (Engine, Log) {
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
    (Engine::new(config), log)
}

#[tokio::test]
async fn test_every_request_carries_basic_auth() {
    let (engine, log) = stub_engine(StatusCode::OK, "{\"projects\":[]}").await;

    let mut entity = project::Multiple::default();
    engine.dispatch(&mut entity, &mut []).await.unwrap();

    let recorded = log.lock().unwrap();
    let expected = format!("Basic {}", BASE64.encode("test-token:"));
    assert_eq!(recorded[0].authorization.as_deref(), Some(expected.as_str()));
    assert_eq!(recorded[0].accept.as_deref(), Some("application/json"));
}

#[tokio::test]
async fn test_get_decodes_and_is_idempotent() {
    let body = "{\"projects\":[{\"id\":7,\"name\":\"Alpha\"}],\"meta\":{\"page\":{\"hasMore\":true}}}";
    let (engine, _log) = stub_engine(StatusCode::OK, body).await;

    let mut first = project::Multiple::default();
    engine.dispatch(&mut first, &mut []).await.unwrap();
    let mut second = project::Multiple::default();
    engine.dispatch(&mut second, &mut []).await.unwrap();

    assert_eq!(first.projects, second.projects);
    assert_eq!(first.projects.len(), 1);
    assert_eq!(first.projects[0].id, 7);
    assert_eq!(first.projects[0].name, "Alpha");
    assert!(first.meta.page.has_more);
}

#[tokio::test]
async fn test_get_populates_web_links_from_server_url() {
    let body = "{\"project\":{\"id\":7,\"name\":\"Alpha\"}}";
    let (engine, _log) = stub_engine(StatusCode::OK, body).await;

    let mut entity = project::Single::new(7);
    engine.dispatch(&mut entity, &mut []).await.unwrap();

    let link = entity.project.web_link.as_deref().unwrap();
    assert_eq!(link, format!("{}/app/projects/7", engine.server()));
}

#[tokio::test]
async fn test_non_2xx_is_classified_with_status_and_body() {
    let (engine, _log) = stub_engine(StatusCode::NOT_FOUND, "no such project").await;

    let mut entity = project::Single::new(1);
    let err = engine.dispatch(&mut entity, &mut []).await.unwrap_err();

    match &err {
        Error::UnexpectedStatus { status, body } => {
            assert_eq!(*status, 404);
            assert_eq!(body, "no such project");
        }
        other => panic!("expected UnexpectedStatus, got {other:?}"),
    }
    assert_eq!(
        err.to_string(),
        "unexpected status code: 404, body: no such project"
    );
}

#[tokio::test]
async fn test_server_errors_are_classified_too() {
    let (engine, _log) = stub_engine(StatusCode::INTERNAL_SERVER_ERROR, "").await;

    let mut entity = project::Single::new(1);
    let err = engine.dispatch(&mut entity, &mut []).await.unwrap_err();
    assert_eq!(err.to_string(), "unexpected status code: 500");
}

#[tokio::test]
async fn test_decode_failure_surfaces_entity_context() {
    let (engine, _log) = stub_engine(StatusCode::OK, "{\"project\":3}").await;

    let mut entity = project::Single::new(1);
    let err = engine.dispatch(&mut entity, &mut []).await.unwrap_err();
    assert!(matches!(err, Error::Decode { entity: "project", .. }));
}

#[tokio::test]
async fn test_id_callback_top_level_number() {
    let (engine, _log) = stub_engine(StatusCode::CREATED, "{\"id\":42}").await;

    let mut entity = project::Create::default();
    entity.project.name = "Beta".to_string();

    let mut seen = Vec::new();
    let mut sink = |id: i64| seen.push(id);
    engine
        .dispatch(
            &mut entity,
            &mut [RequestOption::id_callback("id", &mut sink)],
        )
        .await
        .unwrap();

    assert_eq!(seen, vec![42]);
}

#[tokio::test]
async fn test_id_callback_under_single_wrapper() {
    let (engine, _log) =
        stub_engine(StatusCode::OK, "{\"project\":{\"id\":\"42\"}}").await;

    let mut entity = project::Create::default();
    entity.project.name = "Beta".to_string();

    let id = project::create(&engine, &mut entity).await.unwrap();
    assert_eq!(id, 42);
}

#[tokio::test]
async fn test_dispatch_with_id_callback_runs_on_a_spawned_task() {
    // tool handlers run on the multithreaded runtime, so the dispatch
    // future, sink included, must be Send; tokio::spawn enforces that.
    let (engine, _log) = stub_engine(StatusCode::CREATED, "{\"id\":42}").await;

    let handle = tokio::spawn(async move {
        let mut entity = project::Create::default();
        entity.project.name = "Beta".to_string();
        project::create(&engine, &mut entity).await
    });
    assert_eq!(handle.await.unwrap().unwrap(), 42);
}

#[tokio::test]
async fn test_id_callback_missing_key_is_an_error() {
    let (engine, _log) = stub_engine(StatusCode::OK, "{\"status\":\"OK\"}").await;

    let mut entity = project::Create::default();
    let mut sink = |_id: i64| {};
    let err = engine
        .dispatch(
            &mut entity,
            &mut [RequestOption::id_callback("id", &mut sink)],
        )
        .await
        .unwrap_err();

    assert!(matches!(err, Error::IdExtraction { .. }));
}

#[tokio::test]
async fn test_non_get_never_decodes_into_the_entity() {
    // A create response that would not decode as an entity must not fail.
    let (engine, _log) = stub_engine(StatusCode::OK, "{\"milestoneId\":\"9\"}").await;

    let mut entity = milestone::Create {
        project_id: 1,
        milestone: milestone::CreateBody {
            title: "Beta".to_string(),
            deadline: "20251231".parse().unwrap(),
            responsible_parties: "7".parse().unwrap(),
            ..Default::default()
        },
    };
    let id = milestone::create(&engine, &mut entity).await.unwrap();
    assert_eq!(id, 9);
}

#[tokio::test]
async fn test_unset_filters_take_no_wire_slot() {
    let (engine, log) = stub_engine(StatusCode::OK, "{\"milestones\":[]}").await;

    let mut entity = milestone::Multiple::default();
    engine.dispatch(&mut entity, &mut []).await.unwrap();

    let recorded = log.lock().unwrap();
    assert_eq!(
        recorded[0].path_and_query,
        "/projects/api/v3/milestones.json"
    );
}

#[tokio::test]
async fn test_dropping_the_dispatch_future_cancels_the_call() {
    // Stub that never answers: bind a listener and accept nothing beyond the
    // TCP handshake.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _keep_open = listener.accept().await;
        tokio::time::sleep(Duration::from_secs(60)).await;
    });

    let engine = Engine::new(Config {
        server: format!("http://{addr}"),
        api_token: "test-token".to_string(),
    });

    let mut entity = project::Single::new(1);
    let result =
        tokio::time::timeout(Duration::from_millis(300), engine.dispatch(&mut entity, &mut []))
            .await;
    assert!(result.is_err(), "dispatch should still be pending when the deadline hits");
}
