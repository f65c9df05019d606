//! Resource catalog and `twapi://` URI resolution tests.

use axum::http::StatusCode;
use rmcp::model::{ErrorCode, ResourceContents};

use super::resources;
use super::test_stub::stub_mcp;

#[test]
fn test_catalog_lists_every_browsable_domain() {
    let uris: Vec<String> = resources::list()
        .into_iter()
        .map(|r| r.raw.uri.clone())
        .collect();

    for expected in [
        "twapi://projects",
        "twapi://tasklists",
        "twapi://tasks",
        "twapi://milestones",
        "twapi://timelogs",
        "twapi://people",
        "twapi://teams",
        "twapi://companies",
        "twapi://tags",
        "twapi://skills",
        "twapi://jobroles",
        "twapi://industries",
    ] {
        assert!(uris.iter().any(|u| u == expected), "missing {expected}");
    }
    // The workload report is a tool, not a browsable collection.
    assert!(!uris.iter().any(|u| u.contains("workload")));
}

#[test]
fn test_templates_skip_domains_without_a_single_item_read() {
    let templates: Vec<String> = resources::templates()
        .into_iter()
        .map(|t| t.raw.uri_template.clone())
        .collect();

    assert!(templates.iter().any(|t| t == "twapi://projects/{id}"));
    assert!(templates.iter().any(|t| t == "twapi://timelogs/{id}"));
    assert!(!templates.iter().any(|t| t.starts_with("twapi://industries")));
}

#[tokio::test]
async fn test_read_list_yields_one_block_per_item() {
    let body = "{\"projects\":[{\"id\":7,\"name\":\"Alpha\"},{\"id\":8,\"name\":\"Beta\"}]}";
    let (mcp, _log) = stub_mcp(StatusCode::OK, body).await;

    let result = resources::read(mcp.engine(), "twapi://projects").await.unwrap();
    assert_eq!(result.contents.len(), 2);

    let ResourceContents::TextResourceContents { uri, text, .. } = &result.contents[0] else {
        panic!("expected text contents");
    };
    assert_eq!(uri, "twapi://projects");
    let json: serde_json::Value = serde_json::from_str(text).unwrap();
    assert_eq!(json["id"], 7);
}

#[tokio::test]
async fn test_read_single_resolves_the_id_segment() {
    let body = "{\"project\":{\"id\":7,\"name\":\"Alpha\"}}";
    let (mcp, log) = stub_mcp(StatusCode::OK, body).await;

    let result = resources::read(mcp.engine(), "twapi://projects/7").await.unwrap();
    assert_eq!(result.contents.len(), 1);

    let recorded = log.lock().unwrap();
    assert_eq!(recorded[0].path_and_query, "/projects/api/v3/projects/7.json");
}

#[tokio::test]
async fn test_read_rejects_unknown_uris() {
    let (mcp, log) = stub_mcp(StatusCode::OK, "{}").await;

    for uri in ["file:///etc/passwd", "twapi://widgets", "twapi://industries/3"] {
        let err = resources::read(mcp.engine(), uri).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::RESOURCE_NOT_FOUND, "uri {uri}");
    }
    assert!(log.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_read_rejects_non_numeric_ids_before_http() {
    let (mcp, log) = stub_mcp(StatusCode::OK, "{}").await;

    let err = resources::read(mcp.engine(), "twapi://projects/seven")
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
    assert!(err.message.contains("invalid project ID"));
    assert!(log.lock().unwrap().is_empty());
}
