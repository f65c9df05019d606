//! Milestone tool tests against a stub installation.

use axum::http::StatusCode;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{ErrorCode, RawContent};

use crate::mcp::test_stub::stub_mcp;

use super::milestones::{
    CreateMilestoneParams, MilestoneAssignees, RetrieveMilestoneParams, RetrieveMilestonesParams,
};

fn text_of(result: &rmcp::model::CallToolResult) -> &str {
    match &result.content[0].raw {
        RawContent::Text(text) => text.text.as_str(),
        _ => panic!("expected text content"),
    }
}

#[tokio::test]
async fn test_retrieve_milestones_returns_list_and_meta() {
    let body = "{\"milestones\":[{\"id\":5,\"name\":\"Beta\"}],\"meta\":{\"page\":{\"hasMore\":false}}}";
    let (mcp, log) = stub_mcp(StatusCode::OK, body).await;

    let result = mcp
        .retrieve_milestones(Parameters(RetrieveMilestonesParams {
            search_term: Some("Beta".to_string()),
            page: Some(2),
            page_size: None,
            tag_ids: None,
            match_all_tags: None,
        }))
        .await
        .unwrap();

    let json: serde_json::Value = serde_json::from_str(text_of(&result)).unwrap();
    assert_eq!(json["milestones"][0]["id"], 5);
    assert_eq!(json["meta"]["page"]["hasMore"], false);

    let recorded = log.lock().unwrap();
    assert_eq!(recorded[0].method, "GET");
    assert!(recorded[0].path_and_query.starts_with("/projects/api/v3/milestones.json?"));
    assert!(recorded[0].path_and_query.contains("searchTerm=Beta"));
    assert!(recorded[0].path_and_query.contains("page=2"));
}

#[tokio::test]
async fn test_create_milestone_posts_legacy_body_and_confirms() {
    let (mcp, log) = stub_mcp(StatusCode::CREATED, "{\"milestoneId\":\"42\"}").await;

    let result = mcp
        .create_milestone(Parameters(CreateMilestoneParams {
            project_id: 12,
            name: "Beta".to_string(),
            description: Some("beta cut".to_string()),
            due_date: "20251231".to_string(),
            tasklist_ids: Some(vec![3]),
            tag_ids: Some(vec![9]),
            assignees: MilestoneAssignees {
                user_ids: Some(vec![7]),
                ..Default::default()
            },
        }))
        .await
        .unwrap();

    assert_eq!(text_of(&result), "Milestone created successfully");

    let recorded = log.lock().unwrap();
    assert_eq!(recorded[0].method, "POST");
    assert_eq!(recorded[0].path_and_query, "/projects/12/milestones.json");
    let body: serde_json::Value = serde_json::from_slice(&recorded[0].body).unwrap();
    assert_eq!(body["milestone"]["title"], "Beta");
    assert_eq!(body["milestone"]["description"], "beta cut");
    assert_eq!(body["milestone"]["deadline"], "20251231");
    assert_eq!(body["milestone"]["responsible-party-ids"], "7");
}

#[tokio::test]
async fn test_create_milestone_without_assignees_is_rejected_before_http() {
    let (mcp, log) = stub_mcp(StatusCode::CREATED, "{\"milestoneId\":\"42\"}").await;

    let err = mcp
        .create_milestone(Parameters(CreateMilestoneParams {
            project_id: 12,
            name: "Beta".to_string(),
            description: None,
            due_date: "20251231".to_string(),
            tasklist_ids: None,
            tag_ids: None,
            assignees: MilestoneAssignees::default(),
        }))
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
    assert!(err.message.contains("at least one assignee must be provided"));
    assert!(log.lock().unwrap().is_empty(), "no request should go out");
}

#[tokio::test]
async fn test_create_milestone_bad_due_date_is_invalid_params() {
    let (mcp, log) = stub_mcp(StatusCode::CREATED, "{\"milestoneId\":\"42\"}").await;

    let err = mcp
        .create_milestone(Parameters(CreateMilestoneParams {
            project_id: 12,
            name: "Beta".to_string(),
            description: None,
            due_date: "2025-12-31".to_string(),
            tasklist_ids: None,
            tag_ids: None,
            assignees: MilestoneAssignees {
                user_ids: Some(vec![7]),
                ..Default::default()
            },
        }))
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
    assert!(err.message.contains("invalid due-date"));
    assert!(log.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_retrieve_milestone_upstream_failure_is_internal_error() {
    let (mcp, _log) = stub_mcp(StatusCode::NOT_FOUND, "no such milestone").await;

    let err = mcp
        .retrieve_milestone(Parameters(RetrieveMilestoneParams { milestone_id: 9 }))
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::INTERNAL_ERROR);
    assert!(err.message.contains("unexpected status code: 404"));
}
