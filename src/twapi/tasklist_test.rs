use reqwest::Client;
use serde_json::json;

use super::tasklist::*;
use super::{Entity, PageFilters};

const SERVER: &str = "https://acme.teamwork.com";

fn build(entity: &impl Entity) -> reqwest::Request {
    entity.build(&Client::new(), SERVER).unwrap().build().unwrap()
}

fn body_json(request: &reqwest::Request) -> serde_json::Value {
    let bytes = request.body().unwrap().as_bytes().unwrap();
    serde_json::from_slice(bytes).unwrap()
}

#[test]
fn test_single_and_delete_are_v3() {
    let single = build(&Single::new(8));
    assert_eq!(
        single.url().as_str(),
        "https://acme.teamwork.com/projects/api/v3/tasklists/8.json"
    );

    let delete = build(&Delete { id: 8 });
    assert_eq!(delete.method(), "DELETE");
    assert_eq!(
        delete.url().as_str(),
        "https://acme.teamwork.com/projects/api/v3/tasklists/8.json"
    );
}

#[test]
fn test_multiple_scoped_to_project() {
    let entity = Multiple {
        project_id: Some(12),
        filters: PageFilters {
            page: 1,
            page_size: 50,
            search_term: None,
        },
        ..Default::default()
    };
    let request = build(&entity);

    assert_eq!(
        request.url().path(),
        "/projects/api/v3/projects/12/tasklists.json"
    );
    let pairs: Vec<(String, String)> = request
        .url()
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    assert!(pairs.contains(&("page".to_string(), "1".to_string())));
    assert!(pairs.contains(&("pageSize".to_string(), "50".to_string())));
    assert!(!pairs.iter().any(|(k, _)| k == "searchTerm"));
}

#[test]
fn test_create_posts_todo_list_envelope_to_legacy_path() {
    let entity = Create {
        project_id: 12,
        tasklist: CreateBody {
            name: "Sprint 1".to_string(),
            description: Some("first sprint".to_string()),
            milestone_id: Some(4),
        },
    };
    let request = build(&entity);

    assert_eq!(request.method(), "POST");
    assert_eq!(
        request.url().as_str(),
        "https://acme.teamwork.com/projects/12/tasklists.json"
    );
    assert_eq!(
        body_json(&request),
        json!({
            "todo-list": {
                "name": "Sprint 1",
                "description": "first sprint",
                "milestone-id": 4
            }
        })
    );
}

#[test]
fn test_update_is_a_post_to_the_quirky_path() {
    let entity = Update {
        id: 8,
        tasklist: CreateBody {
            name: "Sprint 1b".to_string(),
            ..Default::default()
        },
    };
    let request = build(&entity);

    assert_eq!(request.method(), "POST");
    assert_eq!(
        request.url().as_str(),
        "https://acme.teamwork.com/projects/tasklists/8.json"
    );
    assert_eq!(body_json(&request), json!({"todo-list": {"name": "Sprint 1b"}}));
}

#[test]
fn test_single_decode_strips_envelope() {
    let mut entity = Single::new(8);
    let body = json!({
        "tasklist": {
            "id": 8,
            "name": "Sprint 1",
            "project": {"id": 12, "type": "projects"}
        }
    });
    entity.decode(body.to_string().as_bytes()).unwrap();

    assert_eq!(entity.tasklist.id, 8);
    assert_eq!(entity.tasklist.project.as_ref().unwrap().id, 12);
}
