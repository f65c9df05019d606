//! Handler surface tests: capabilities and the registered tool catalog.

use rmcp::ServerHandler;

use crate::config::Config;
use crate::twapi::Engine;

use super::{TeamworkMcp, tools};

fn handler() -> TeamworkMcp {
    TeamworkMcp::new(Engine::new(Config {
        server: "https://acme.teamwork.com".to_string(),
        api_token: "test-token".to_string(),
    }))
}

#[test]
fn test_server_info_advertises_tools_and_resources() {
    let info = handler().get_info();

    assert!(info.capabilities.tools.is_some(), "tools must be advertised");
    assert!(
        info.capabilities.resources.is_some(),
        "resources must be advertised"
    );
    assert!(info.instructions.is_some());
}

#[test]
fn test_tool_catalog_covers_every_domain() {
    let names: Vec<String> = tools::router()
        .list_all()
        .into_iter()
        .map(|tool| tool.name.to_string())
        .collect();

    // One spot check per domain; full coverage lives in the domain tests.
    for expected in [
        "retrieve-projects",
        "create-project",
        "retrieve-tasklists",
        "retrieve-tasks",
        "create-task",
        "retrieve-milestones",
        "create-milestone",
        "retrieve-timelogs",
        "create-timelog",
        "retrieve-people",
        "add-project-people",
        "retrieve-teams",
        "retrieve-companies",
        "retrieve-tags",
        "retrieve-skills",
        "retrieve-jobroles",
        "assign-jobrole-users",
        "retrieve-industries",
        "retrieve-workload",
    ] {
        assert!(names.iter().any(|n| n == expected), "missing tool {expected}");
    }
}

#[test]
fn test_tool_names_are_kebab_case() {
    for tool in tools::router().list_all() {
        let name = tool.name.to_string();
        assert!(
            name.chars().all(|c| c.is_ascii_lowercase() || c == '-'),
            "tool name {name} is not kebab-case"
        );
    }
}
