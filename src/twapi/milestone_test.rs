use reqwest::Client;
use serde_json::json;

use super::milestone::*;
use super::{Entity, Error, PageFilters};

const SERVER: &str = "https://acme.teamwork.com";

fn build(entity: &impl super::Entity) -> reqwest::Request {
    entity.build(&Client::new(), SERVER).unwrap().build().unwrap()
}

fn body_json(request: &reqwest::Request) -> serde_json::Value {
    let bytes = request.body().unwrap().as_bytes().unwrap();
    serde_json::from_slice(bytes).unwrap()
}

#[test]
fn test_single_url() {
    let request = build(&Single::new(17));
    assert_eq!(request.method(), "GET");
    assert_eq!(
        request.url().as_str(),
        "https://acme.teamwork.com/projects/api/v3/milestones/17.json"
    );
}

#[test]
fn test_multiple_url_without_filters_has_no_query() {
    let request = build(&Multiple::default());
    assert_eq!(
        request.url().as_str(),
        "https://acme.teamwork.com/projects/api/v3/milestones.json"
    );
}

#[test]
fn test_multiple_scoped_to_project() {
    let entity = Multiple {
        project_id: Some(5),
        ..Default::default()
    };
    let request = build(&entity);
    assert_eq!(
        request.url().path(),
        "/projects/api/v3/projects/5/milestones.json"
    );
}

#[test]
fn test_multiple_filters_are_joined_and_paged() {
    let entity = Multiple {
        project_id: None,
        filters: Filters {
            page: PageFilters {
                search_term: Some("q".to_string()),
                page: 1,
                page_size: 10,
            },
            tag_ids: vec![1, 2, 3],
            match_all_tags: Some(true),
        },
        ..Default::default()
    };
    let request = build(&entity);

    let pairs: Vec<(String, String)> = request
        .url()
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    // Parameter order is part of the documented URL shape.
    assert_eq!(
        pairs,
        vec![
            ("matchAllTags".to_string(), "true".to_string()),
            ("page".to_string(), "1".to_string()),
            ("pageSize".to_string(), "10".to_string()),
            ("searchTerm".to_string(), "q".to_string()),
            ("tagIds".to_string(), "1,2,3".to_string()),
        ]
    );
}

#[test]
fn test_multiple_zero_page_is_omitted() {
    let entity = Multiple {
        filters: Filters {
            page: PageFilters {
                page: 0,
                page_size: 0,
                search_term: None,
            },
            tag_ids: vec![],
            match_all_tags: None,
        },
        ..Default::default()
    };
    let request = build(&entity);
    assert_eq!(request.url().query(), None);
}

#[test]
fn test_create_uses_legacy_path_and_envelope() {
    let entity = Create {
        project_id: 12,
        milestone: CreateBody {
            title: "Beta".to_string(),
            description: Some("beta cut".to_string()),
            deadline: "20251231".parse().unwrap(),
            tasklist_ids: vec![3],
            tag_ids: vec![9],
            responsible_parties: "7".parse().unwrap(),
        },
    };
    let request = build(&entity);

    assert_eq!(request.method(), "POST");
    assert_eq!(
        request.url().as_str(),
        "https://acme.teamwork.com/projects/12/milestones.json"
    );
    assert_eq!(
        body_json(&request),
        json!({
            "milestone": {
                "title": "Beta",
                "description": "beta cut",
                "deadline": "20251231",
                "tasklistIds": [3],
                "tagIds": [9],
                "responsible-party-ids": "7"
            }
        })
    );
}

#[test]
fn test_create_without_assignees_is_rejected_before_http() {
    let entity = Create {
        project_id: 12,
        milestone: CreateBody {
            title: "Beta".to_string(),
            deadline: "20251231".parse().unwrap(),
            ..Default::default()
        },
    };
    let err = entity.build(&Client::new(), SERVER).unwrap_err();

    assert!(matches!(err, Error::InvalidParameters(_)));
    assert_eq!(
        err.to_string(),
        "invalid parameters: at least one assignee must be provided"
    );
}

#[test]
fn test_update_puts_id_in_url_only() {
    let entity = Update {
        id: 99,
        milestone: CreateBody {
            title: "Beta".to_string(),
            deadline: "20251231".parse().unwrap(),
            responsible_parties: "7,c2".parse().unwrap(),
            ..Default::default()
        },
    };
    let request = build(&entity);

    assert_eq!(request.method(), "PUT");
    assert_eq!(
        request.url().as_str(),
        "https://acme.teamwork.com/milestones/99.json"
    );
    let body = body_json(&request);
    assert!(body["milestone"].get("id").is_none());
    assert_eq!(body["milestone"]["responsible-party-ids"], "7,c2");
}

#[test]
fn test_delete_url() {
    let request = build(&Delete { id: 4 });
    assert_eq!(request.method(), "DELETE");
    assert_eq!(
        request.url().as_str(),
        "https://acme.teamwork.com/milestones/4.json"
    );
}

#[test]
fn test_update_without_id_is_rejected_before_http() {
    let entity = Update {
        id: 0,
        milestone: CreateBody {
            title: "Beta".to_string(),
            deadline: "20251231".parse().unwrap(),
            responsible_parties: "7".parse().unwrap(),
            ..Default::default()
        },
    };
    let err = entity.build(&Client::new(), SERVER).unwrap_err();

    assert!(matches!(err, Error::InvalidParameters(_)));
    assert_eq!(
        err.to_string(),
        "invalid parameters: a positive milestone ID is required"
    );
}

#[test]
fn test_delete_without_id_is_rejected_before_http() {
    let err = Delete { id: -3 }.build(&Client::new(), SERVER).unwrap_err();

    assert!(matches!(err, Error::InvalidParameters(_)));
    assert_eq!(
        err.to_string(),
        "invalid parameters: a positive milestone ID is required"
    );
}

#[test]
fn test_decode_strips_list_envelope_and_keeps_meta() {
    let mut entity = Multiple::default();
    let body = json!({
        "milestones": [
            {"id": 1, "name": "Alpha", "deadline": "2025-12-31"},
            {"id": 2, "name": "Beta"}
        ],
        "meta": {"page": {"hasMore": false}}
    });
    super::Entity::decode(&mut entity, body.to_string().as_bytes()).unwrap();

    assert_eq!(entity.milestones.len(), 2);
    assert_eq!(entity.milestones[0].name, "Alpha");
    assert_eq!(
        entity.milestones[0].deadline.unwrap().to_string(),
        "2025-12-31"
    );
    assert!(!entity.meta.page.has_more);
}
