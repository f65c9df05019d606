//! Project entities.
//!
//! Reads are v3; create and update still go through the legacy v1 endpoints
//! at the installation root with compact dates.

use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, Serialize};

use super::codec::{Date, LegacyDate, OptionalDateTime};
use super::relationship::Relationship;
use super::{Engine, Entity, Error, Meta, PageFilters, QueryPairs, RequestOption, require_id, V3};

/// A unit of work containing tasklists, tasks, milestones and tags.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Project {
    pub id: i64,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<Date>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<Date>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<Relationship>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owned_by: Option<Relationship>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<Relationship>,
    pub created_at: OptionalDateTime,
    pub updated_at: OptionalDateTime,
    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub web_link: Option<String>,
}

impl Project {
    fn set_link(&mut self, server: &str) {
        if self.id > 0 {
            self.web_link = Some(format!("{server}/app/projects/{}", self.id));
        }
    }
}

/// `GET /projects/api/v3/projects/{id}.json`
#[derive(Debug, Default)]
pub struct Single {
    pub id: i64,
    pub project: Project,
}

impl Single {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            project: Project::default(),
        }
    }
}

#[derive(Deserialize)]
struct SingleEnvelope {
    project: Project,
}

impl Entity for Single {
    fn name(&self) -> &'static str {
        "project"
    }

    fn build(&self, client: &Client, server: &str) -> Result<RequestBuilder, Error> {
        Ok(client.get(format!("{server}{V3}/projects/{}.json", self.id)))
    }

    fn decode(&mut self, body: &[u8]) -> Result<(), Error> {
        let envelope: SingleEnvelope =
            serde_json::from_slice(body).map_err(|e| Error::decode("project", e))?;
        self.project = envelope.project;
        Ok(())
    }

    fn link(&mut self, server: &str) {
        self.project.set_link(server);
    }
}

#[derive(Debug, Default, Clone)]
pub struct Filters {
    pub page: PageFilters,
    pub tag_ids: Vec<i64>,
    pub match_all_tags: Option<bool>,
    pub status: Option<String>,
}

/// `GET /projects/api/v3/projects.json`
#[derive(Debug, Default)]
pub struct Multiple {
    pub filters: Filters,
    pub projects: Vec<Project>,
    pub meta: Meta,
}

#[derive(Deserialize)]
struct MultipleEnvelope {
    #[serde(default)]
    projects: Vec<Project>,
    #[serde(default)]
    meta: Meta,
}

impl Entity for Multiple {
    fn name(&self) -> &'static str {
        "projects"
    }

    fn build(&self, client: &Client, server: &str) -> Result<RequestBuilder, Error> {
        let mut query = QueryPairs::new();
        query.push_opt("matchAllTags", self.filters.match_all_tags);
        self.filters.page.fill(&mut query);
        query.push_str("status", self.filters.status.as_deref());
        query.push_list("tagIds", &self.filters.tag_ids);
        Ok(query.apply(client.get(format!("{server}{V3}/projects.json"))))
    }

    fn decode(&mut self, body: &[u8]) -> Result<(), Error> {
        let envelope: MultipleEnvelope =
            serde_json::from_slice(body).map_err(|e| Error::decode("projects", e))?;
        self.projects = envelope.projects;
        self.meta = envelope.meta;
        Ok(())
    }

    fn link(&mut self, server: &str) {
        for project in &mut self.projects {
            project.set_link(server);
        }
    }
}

/// Legacy create/update body: compact dates, IDs as plain numbers.
#[derive(Debug, Default, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBody {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<LegacyDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<LegacyDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_id: Option<i64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tag_ids: Vec<i64>,
}

#[derive(Serialize)]
struct CreateEnvelope<'a> {
    project: &'a CreateBody,
}

/// `POST /projects.json` (legacy v1).
#[derive(Debug, Default)]
pub struct Create {
    pub project: CreateBody,
}

impl Entity for Create {
    fn name(&self) -> &'static str {
        "project"
    }

    fn build(&self, client: &Client, server: &str) -> Result<RequestBuilder, Error> {
        Ok(client
            .post(format!("{server}/projects.json"))
            .json(&CreateEnvelope {
                project: &self.project,
            }))
    }
}

/// `PUT /projects/{id}.json` (legacy v1). The upstream docs put the target ID
/// in the URL; it takes no body slot.
#[derive(Debug, Default)]
pub struct Update {
    pub id: i64,
    pub project: CreateBody,
}

impl Entity for Update {
    fn name(&self) -> &'static str {
        "project"
    }

    fn build(&self, client: &Client, server: &str) -> Result<RequestBuilder, Error> {
        let id = require_id("project", self.id)?;
        Ok(client
            .put(format!("{server}/projects/{id}.json"))
            .json(&CreateEnvelope {
                project: &self.project,
            }))
    }
}

/// Creates the project and reports the server-assigned ID.
pub async fn create(engine: &Engine, entity: &mut Create) -> Result<i64, Error> {
    let mut id = 0i64;
    let mut sink = |value: i64| id = value;
    engine
        .dispatch(entity, &mut [RequestOption::id_callback("id", &mut sink)])
        .await?;
    Ok(id)
}
