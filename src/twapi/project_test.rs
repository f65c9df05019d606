use reqwest::Client;
use serde_json::json;

use super::project::*;
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
fn test_single_url() {
    let request = build(&Single::new(7));
    assert_eq!(request.method(), "GET");
    assert_eq!(
        request.url().as_str(),
        "https://acme.teamwork.com/projects/api/v3/projects/7.json"
    );
}

#[test]
fn test_multiple_status_and_search_filters() {
    let entity = Multiple {
        filters: Filters {
            page: PageFilters {
                search_term: Some("website".to_string()),
                page: 2,
                page_size: 25,
            },
            status: Some("active".to_string()),
            tag_ids: vec![],
            match_all_tags: None,
        },
        ..Default::default()
    };
    let request = build(&entity);

    assert_eq!(request.url().path(), "/projects/api/v3/projects.json");
    let pairs: Vec<(String, String)> = request
        .url()
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    assert!(pairs.contains(&("page".to_string(), "2".to_string())));
    assert!(pairs.contains(&("pageSize".to_string(), "25".to_string())));
    assert!(pairs.contains(&("searchTerm".to_string(), "website".to_string())));
    assert!(pairs.contains(&("status".to_string(), "active".to_string())));
    assert!(!pairs.iter().any(|(k, _)| k == "matchAllTags" || k == "tagIds"));
}

#[test]
fn test_create_posts_legacy_envelope() {
    let entity = Create {
        project: CreateBody {
            name: "Website Redesign".to_string(),
            description: Some("public site refresh".to_string()),
            start_date: Some("20250101".parse().unwrap()),
            end_date: Some("20250630".parse().unwrap()),
            company_id: Some(3),
            tag_ids: vec![4, 5],
        },
    };
    let request = build(&entity);

    assert_eq!(request.method(), "POST");
    assert_eq!(request.url().as_str(), "https://acme.teamwork.com/projects.json");
    assert_eq!(
        body_json(&request),
        json!({
            "project": {
                "name": "Website Redesign",
                "description": "public site refresh",
                "startDate": "20250101",
                "endDate": "20250630",
                "companyId": 3,
                "tagIds": [4, 5]
            }
        })
    );
}

#[test]
fn test_create_omits_unset_fields() {
    let entity = Create {
        project: CreateBody {
            name: "Bare".to_string(),
            ..Default::default()
        },
    };
    let body = body_json(&build(&entity));
    assert_eq!(body, json!({"project": {"name": "Bare"}}));
}

#[test]
fn test_update_puts_to_installation_root() {
    let entity = Update {
        id: 7,
        project: CreateBody {
            name: "Renamed".to_string(),
            ..Default::default()
        },
    };
    let request = build(&entity);

    assert_eq!(request.method(), "PUT");
    assert_eq!(
        request.url().as_str(),
        "https://acme.teamwork.com/projects/7.json"
    );
    assert!(body_json(&request)["project"].get("id").is_none());
}

#[test]
fn test_update_without_id_is_rejected_before_http() {
    let entity = Update {
        id: 0,
        project: CreateBody {
            name: "Renamed".to_string(),
            ..Default::default()
        },
    };
    let err = entity.build(&Client::new(), SERVER).unwrap_err();

    assert!(matches!(err, super::Error::InvalidParameters(_)));
    assert_eq!(
        err.to_string(),
        "invalid parameters: a positive project ID is required"
    );
}

#[test]
fn test_single_decode_strips_envelope() {
    let mut entity = Single::new(7);
    let body = json!({
        "project": {
            "id": 7,
            "name": "Website Redesign",
            "status": "active",
            "company": {"id": 3, "type": "companies"}
        }
    });
    entity.decode(body.to_string().as_bytes()).unwrap();

    assert_eq!(entity.project.id, 7);
    assert_eq!(entity.project.name, "Website Redesign");
    assert_eq!(entity.project.company.as_ref().unwrap().kind, "companies");
}

#[test]
fn test_multiple_decode_reads_meta() {
    let mut entity = Multiple::default();
    let body = json!({
        "projects": [{"id": 1, "name": "A"}, {"id": 2, "name": "B"}],
        "meta": {"page": {"hasMore": true}}
    });
    entity.decode(body.to_string().as_bytes()).unwrap();

    assert_eq!(entity.projects.len(), 2);
    assert!(entity.meta.page.has_more);
}
