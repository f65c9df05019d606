//! Milestone entities.
//!
//! Milestones straddle both API generations: list and single reads are v3
//! (`/projects/api/v3/milestones…`), while create, update and delete still go
//! through the legacy v1 endpoints at the installation root with compact
//! dates and the class-prefixed assignee list.

use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, Serialize};

use super::codec::{Date, LegacyDate, OptionalDateTime};
use super::relationship::{LegacyUserGroups, Relationship};
use super::{Engine, Entity, Error, Meta, PageFilters, QueryPairs, RequestOption, require_id, V3};

/// A dated checkpoint inside a project.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Milestone {
    pub id: i64,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<Date>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<Relationship>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tasklists: Vec<Relationship>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub responsible_parties: Vec<Relationship>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<Relationship>,
    pub created_at: OptionalDateTime,
    pub updated_at: OptionalDateTime,
    /// Human-facing URL, populated after decode; never on the wire.
    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub web_link: Option<String>,
}

impl Milestone {
    fn set_link(&mut self, server: &str) {
        if self.id > 0 {
            self.web_link = Some(format!("{server}/app/milestones/{}", self.id));
        }
    }
}

/// `GET /projects/api/v3/milestones/{id}.json`
#[derive(Debug, Default)]
pub struct Single {
    pub id: i64,
    pub milestone: Milestone,
}

impl Single {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            milestone: Milestone::default(),
        }
    }
}

#[derive(Deserialize)]
struct SingleEnvelope {
    milestone: Milestone,
}

impl Entity for Single {
    fn name(&self) -> &'static str {
        "milestone"
    }

    fn build(&self, client: &Client, server: &str) -> Result<RequestBuilder, Error> {
        Ok(client.get(format!("{server}{V3}/milestones/{}.json", self.id)))
    }

    fn decode(&mut self, body: &[u8]) -> Result<(), Error> {
        let envelope: SingleEnvelope =
            serde_json::from_slice(body).map_err(|e| Error::decode("milestone", e))?;
        self.milestone = envelope.milestone;
        Ok(())
    }

    fn link(&mut self, server: &str) {
        self.milestone.set_link(server);
    }
}

/// Filters for the milestone list endpoints.
#[derive(Debug, Default, Clone)]
pub struct Filters {
    pub page: PageFilters,
    pub tag_ids: Vec<i64>,
    /// Tri-state: `Some(true)` requires every tag, `Some(false)` any tag,
    /// `None` omits the parameter.
    pub match_all_tags: Option<bool>,
}

/// `GET /projects/api/v3/milestones.json`, optionally scoped to one project
/// via `GET /projects/api/v3/projects/{id}/milestones.json`.
#[derive(Debug, Default)]
pub struct Multiple {
    pub project_id: Option<i64>,
    pub filters: Filters,
    pub milestones: Vec<Milestone>,
    pub meta: Meta,
}

#[derive(Deserialize)]
struct MultipleEnvelope {
    #[serde(default)]
    milestones: Vec<Milestone>,
    #[serde(default)]
    meta: Meta,
}

impl Entity for Multiple {
    fn name(&self) -> &'static str {
        "milestones"
    }

    fn build(&self, client: &Client, server: &str) -> Result<RequestBuilder, Error> {
        let url = match self.project_id {
            Some(project_id) => format!("{server}{V3}/projects/{project_id}/milestones.json"),
            None => format!("{server}{V3}/milestones.json"),
        };
        let mut query = QueryPairs::new();
        query.push_opt("matchAllTags", self.filters.match_all_tags);
        self.filters.page.fill(&mut query);
        query.push_list("tagIds", &self.filters.tag_ids);
        Ok(query.apply(client.get(url)))
    }

    fn decode(&mut self, body: &[u8]) -> Result<(), Error> {
        let envelope: MultipleEnvelope =
            serde_json::from_slice(body).map_err(|e| Error::decode("milestones", e))?;
        self.milestones = envelope.milestones;
        self.meta = envelope.meta;
        Ok(())
    }

    fn link(&mut self, server: &str) {
        for milestone in &mut self.milestones {
            milestone.set_link(server);
        }
    }
}

/// Legacy create body: compact deadline, class-prefixed assignee string.
#[derive(Debug, Default, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBody {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub deadline: LegacyDate,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tasklist_ids: Vec<i64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tag_ids: Vec<i64>,
    #[serde(rename = "responsible-party-ids")]
    pub responsible_parties: LegacyUserGroups,
}

/// `POST /projects/{projectId}/milestones.json` (legacy v1).
#[derive(Debug, Default)]
pub struct Create {
    pub project_id: i64,
    pub milestone: CreateBody,
}

#[derive(Serialize)]
struct CreateEnvelope<'a> {
    milestone: &'a CreateBody,
}

impl Entity for Create {
    fn name(&self) -> &'static str {
        "milestone"
    }

    fn build(&self, client: &Client, server: &str) -> Result<RequestBuilder, Error> {
        // A milestone without any responsible party cannot exist upstream;
        // reject it before any HTTP traffic.
        if self.milestone.responsible_parties.is_empty() {
            return Err(Error::InvalidParameters(
                "at least one assignee must be provided".to_string(),
            ));
        }
        Ok(client
            .post(format!("{server}/projects/{}/milestones.json", self.project_id))
            .json(&CreateEnvelope {
                milestone: &self.milestone,
            }))
    }
}

/// `PUT /milestones/{id}.json` (legacy v1). The target ID lives in the URL
/// only and takes no body slot.
#[derive(Debug, Default)]
pub struct Update {
    pub id: i64,
    pub milestone: CreateBody,
}

impl Entity for Update {
    fn name(&self) -> &'static str {
        "milestone"
    }

    fn build(&self, client: &Client, server: &str) -> Result<RequestBuilder, Error> {
        let id = require_id("milestone", self.id)?;
        if self.milestone.responsible_parties.is_empty() {
            return Err(Error::InvalidParameters(
                "at least one assignee must be provided".to_string(),
            ));
        }
        Ok(client
            .put(format!("{server}/milestones/{id}.json"))
            .json(&CreateEnvelope {
                milestone: &self.milestone,
            }))
    }
}

/// `DELETE /milestones/{id}.json` (legacy v1).
#[derive(Debug, Default)]
pub struct Delete {
    pub id: i64,
}

impl Entity for Delete {
    fn name(&self) -> &'static str {
        "milestone"
    }

    fn build(&self, client: &Client, server: &str) -> Result<RequestBuilder, Error> {
        let id = require_id("milestone", self.id)?;
        Ok(client.delete(format!("{server}/milestones/{id}.json")))
    }
}

/// Creates the milestone and reports the server-assigned ID. The legacy
/// endpoint answers `{"milestoneId": "..."}` with a string-encoded number.
pub async fn create(engine: &Engine, entity: &mut Create) -> Result<i64, Error> {
    let mut id = 0i64;
    let mut sink = |value: i64| id = value;
    engine
        .dispatch(entity, &mut [RequestOption::id_callback("milestoneId", &mut sink)])
        .await?;
    Ok(id)
}
