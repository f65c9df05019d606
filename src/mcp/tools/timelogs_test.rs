//! Timelog tool tests against a stub installation.

use axum::http::StatusCode;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{ErrorCode, RawContent};

use crate::mcp::test_stub::stub_mcp;

use super::timelogs::{CreateTimelogParams, RetrieveProjectTimelogsParams};

fn text_of(result: &rmcp::model::CallToolResult) -> &str {
    match &result.content[0].raw {
        RawContent::Text(text) => text.text.as_str(),
        _ => panic!("expected text content"),
    }
}

fn create_params() -> CreateTimelogParams {
    CreateTimelogParams {
        project_id: None,
        task_id: None,
        description: Some("code review".to_string()),
        date: "2025-06-01".to_string(),
        time: None,
        hours: 1,
        minutes: 30,
        billable: Some(true),
        user_id: None,
        tag_ids: None,
    }
}

#[tokio::test]
async fn test_retrieve_project_timelogs_scopes_url_and_filters() {
    let body = "{\"timelogs\":[{\"id\":3,\"minutes\":90}],\"meta\":{\"page\":{\"hasMore\":false}}}";
    let (mcp, log) = stub_mcp(StatusCode::OK, body).await;

    let result = mcp
        .retrieve_project_timelogs(Parameters(RetrieveProjectTimelogsParams {
            project_id: 12,
            page: None,
            page_size: None,
            start_date: Some("2025-06-01".to_string()),
            end_date: None,
            billable: Some(true),
        }))
        .await
        .unwrap();

    let json: serde_json::Value = serde_json::from_str(text_of(&result)).unwrap();
    assert_eq!(json["timelogs"][0]["id"], 3);

    let recorded = log.lock().unwrap();
    assert!(
        recorded[0]
            .path_and_query
            .starts_with("/projects/api/v3/projects/12/time.json?")
    );
    assert!(recorded[0].path_and_query.contains("startDate=2025-06-01"));
    assert!(recorded[0].path_and_query.contains("billableType=billable"));
}

#[tokio::test]
async fn test_create_timelog_against_a_task() {
    let (mcp, log) = stub_mcp(StatusCode::CREATED, "{\"timelog\":{\"id\":77}}").await;

    let result = mcp
        .create_timelog(Parameters(CreateTimelogParams {
            task_id: Some(9),
            ..create_params()
        }))
        .await
        .unwrap();

    assert_eq!(text_of(&result), "Timelog 77 created successfully");

    let recorded = log.lock().unwrap();
    assert_eq!(recorded[0].method, "POST");
    assert_eq!(recorded[0].path_and_query, "/projects/api/v3/tasks/9/time.json");
    let body: serde_json::Value = serde_json::from_slice(&recorded[0].body).unwrap();
    assert_eq!(body["timelog"]["date"], "2025-06-01");
    assert_eq!(body["timelog"]["hours"], 1);
    assert_eq!(body["timelog"]["minutes"], 30);
    assert_eq!(body["timelog"]["isBillable"], true);
}

#[tokio::test]
async fn test_create_timelog_requires_exactly_one_target() {
    let (mcp, log) = stub_mcp(StatusCode::CREATED, "{\"timelog\":{\"id\":77}}").await;

    let neither = mcp.create_timelog(Parameters(create_params())).await.unwrap_err();
    let both = mcp
        .create_timelog(Parameters(CreateTimelogParams {
            project_id: Some(12),
            task_id: Some(9),
            ..create_params()
        }))
        .await
        .unwrap_err();

    for err in [neither, both] {
        assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
        assert!(
            err.message
                .contains("exactly one of project-id or task-id must be provided")
        );
    }
    assert!(log.lock().unwrap().is_empty(), "no request should go out");
}
