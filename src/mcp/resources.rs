//! MCP resource catalog over the Teamwork domains.
//!
//! Every browsable domain is published as `twapi://<plural>` for the full
//! list and, where the upstream API has a single-item read, as the
//! `twapi://<plural>/{id}` template. Each item becomes one JSON text block.

use rmcp::ErrorData as McpError;
use rmcp::model::{
    AnnotateAble, RawResource, RawResourceTemplate, ReadResourceResult, Resource,
    ResourceContents, ResourceTemplate,
};
use serde::Serialize;

use crate::twapi::{
    company, industry, jobrole, milestone, project, skill, tag, task, tasklist, team, timelog,
    user, Engine,
};

use super::tools::map_engine_error;

struct Domain {
    plural: &'static str,
    singular: &'static str,
    description: &'static str,
    /// Whether the upstream API has a single-item read for the domain.
    has_single: bool,
}

const DOMAINS: &[Domain] = &[
    Domain {
        plural: "projects",
        singular: "project",
        description: "Projects on the installation",
        has_single: true,
    },
    Domain {
        plural: "tasklists",
        singular: "tasklist",
        description: "Tasklists across all projects",
        has_single: true,
    },
    Domain {
        plural: "tasks",
        singular: "task",
        description: "Tasks across all projects",
        has_single: true,
    },
    Domain {
        plural: "milestones",
        singular: "milestone",
        description: "Milestones across all projects",
        has_single: true,
    },
    Domain {
        plural: "timelogs",
        singular: "timelog",
        description: "Logged time across all projects",
        has_single: true,
    },
    Domain {
        plural: "people",
        singular: "person",
        description: "People on the installation",
        has_single: true,
    },
    Domain {
        plural: "teams",
        singular: "team",
        description: "Teams on the installation",
        has_single: true,
    },
    Domain {
        plural: "companies",
        singular: "company",
        description: "Companies on the installation",
        has_single: true,
    },
    Domain {
        plural: "tags",
        singular: "tag",
        description: "Tags on the installation",
        has_single: true,
    },
    Domain {
        plural: "skills",
        singular: "skill",
        description: "Skills on the installation",
        has_single: true,
    },
    Domain {
        plural: "jobroles",
        singular: "jobrole",
        description: "Job roles on the installation",
        has_single: true,
    },
    Domain {
        plural: "industries",
        singular: "industry",
        description: "The industry catalog used to classify companies",
        has_single: false,
    },
];

pub(crate) fn list() -> Vec<Resource> {
    DOMAINS
        .iter()
        .map(|domain| {
            let mut raw = RawResource::new(format!("twapi://{}", domain.plural), domain.plural);
            raw.description = Some(domain.description.to_string());
            raw.mime_type = Some("application/json".to_string());
            raw.no_annotation()
        })
        .collect()
}

pub(crate) fn templates() -> Vec<ResourceTemplate> {
    DOMAINS
        .iter()
        .filter(|domain| domain.has_single)
        .map(|domain| {
            RawResourceTemplate {
                uri_template: format!("twapi://{}/{{id}}", domain.plural),
                name: format!("{} by ID", domain.singular),
                title: None,
                description: Some(format!("A single {} fetched by its ID", domain.singular)),
                mime_type: Some("application/json".to_string()),
                icons: None,
            }
            .no_annotation()
        })
        .collect()
}

/// Resolves a `twapi://` URI and reads it through the engine.
pub(crate) async fn read(engine: &Engine, uri: &str) -> Result<ReadResourceResult, McpError> {
    let rest = uri.strip_prefix("twapi://").ok_or_else(|| unknown(uri))?;
    let (plural, raw_id) = match rest.split_once('/') {
        Some((plural, id)) => (plural, Some(id)),
        None => (rest, None),
    };
    let domain = DOMAINS
        .iter()
        .find(|d| d.plural == plural)
        .ok_or_else(|| unknown(uri))?;

    let contents = match raw_id {
        None => read_list(engine, domain, uri).await?,
        Some(raw_id) => {
            if !domain.has_single {
                return Err(unknown(uri));
            }
            let id = parse_id(domain.singular, raw_id)?;
            read_single(engine, domain, uri, id).await?
        }
    };

    Ok(ReadResourceResult::new(contents))
}

fn unknown(uri: &str) -> McpError {
    McpError::resource_not_found(format!("unknown resource URI: {uri}"), None)
}

/// IDs are plain ASCII digit runs; anything else is a caller error.
fn parse_id(singular: &str, raw: &str) -> Result<i64, McpError> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(McpError::invalid_params(format!("invalid {singular} ID"), None));
    }
    raw.parse()
        .map_err(|_| McpError::invalid_params(format!("invalid {singular} ID"), None))
}

fn json_contents<T: Serialize>(uri: &str, items: &[T]) -> Result<Vec<ResourceContents>, McpError> {
    items
        .iter()
        .map(|item| {
            let text = serde_json::to_string_pretty(item)
                .map_err(|e| McpError::internal_error(e.to_string(), None))?;
            Ok(ResourceContents::text(text, uri))
        })
        .collect()
}

async fn read_list(
    engine: &Engine,
    domain: &Domain,
    uri: &str,
) -> Result<Vec<ResourceContents>, McpError> {
    macro_rules! fetch {
        ($module:ident, $field:ident) => {{
            let mut entity = $module::Multiple::default();
            engine
                .dispatch(&mut entity, &mut [])
                .await
                .map_err(map_engine_error)?;
            json_contents(uri, &entity.$field)
        }};
    }

    match domain.plural {
        "projects" => fetch!(project, projects),
        "tasklists" => fetch!(tasklist, tasklists),
        "tasks" => fetch!(task, tasks),
        "milestones" => fetch!(milestone, milestones),
        "timelogs" => fetch!(timelog, timelogs),
        "people" => fetch!(user, people),
        "teams" => fetch!(team, teams),
        "companies" => fetch!(company, companies),
        "tags" => fetch!(tag, tags),
        "skills" => fetch!(skill, skills),
        "jobroles" => fetch!(jobrole, jobroles),
        "industries" => fetch!(industry, industries),
        _ => Err(unknown(uri)),
    }
}

async fn read_single(
    engine: &Engine,
    domain: &Domain,
    uri: &str,
    id: i64,
) -> Result<Vec<ResourceContents>, McpError> {
    macro_rules! fetch {
        ($module:ident, $field:ident) => {{
            let mut entity = $module::Single::new(id);
            engine
                .dispatch(&mut entity, &mut [])
                .await
                .map_err(map_engine_error)?;
            json_contents(uri, std::slice::from_ref(&entity.$field))
        }};
    }

    match domain.plural {
        "projects" => fetch!(project, project),
        "tasklists" => fetch!(tasklist, tasklist),
        "tasks" => fetch!(task, task),
        "milestones" => fetch!(milestone, milestone),
        "timelogs" => fetch!(timelog, timelog),
        "people" => fetch!(user, person),
        "teams" => fetch!(team, team),
        "companies" => fetch!(company, company),
        "tags" => fetch!(tag, tag),
        "skills" => fetch!(skill, skill),
        "jobroles" => fetch!(jobrole, jobrole),
        _ => Err(unknown(uri)),
    }
}
