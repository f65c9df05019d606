//! Tasklist entities.
//!
//! Reads and delete are v3. Create posts to the legacy
//! `/projects/{id}/tasklists.json` path and update — an upstream quirk — is a
//! `POST` to `/projects/tasklists/{id}.json`; both wrap the body in the
//! legacy `todo-list` envelope.

use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, Serialize};

use super::codec::OptionalDateTime;
use super::relationship::Relationship;
use super::{Engine, Entity, Error, Meta, PageFilters, QueryPairs, RequestOption, require_id, V3};

/// A named grouping of tasks inside one project.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Tasklist {
    pub id: i64,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<Relationship>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub milestone: Option<Relationship>,
    pub created_at: OptionalDateTime,
    pub updated_at: OptionalDateTime,
    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub web_link: Option<String>,
}

impl Tasklist {
    fn set_link(&mut self, server: &str) {
        if self.id > 0 {
            self.web_link = Some(format!("{server}/app/tasklists/{}", self.id));
        }
    }
}

/// `GET /projects/api/v3/tasklists/{id}.json`
#[derive(Debug, Default)]
pub struct Single {
    pub id: i64,
    pub tasklist: Tasklist,
}

impl Single {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            tasklist: Tasklist::default(),
        }
    }
}

#[derive(Deserialize)]
struct SingleEnvelope {
    tasklist: Tasklist,
}

impl Entity for Single {
    fn name(&self) -> &'static str {
        "tasklist"
    }

    fn build(&self, client: &Client, server: &str) -> Result<RequestBuilder, Error> {
        Ok(client.get(format!("{server}{V3}/tasklists/{}.json", self.id)))
    }

    fn decode(&mut self, body: &[u8]) -> Result<(), Error> {
        let envelope: SingleEnvelope =
            serde_json::from_slice(body).map_err(|e| Error::decode("tasklist", e))?;
        self.tasklist = envelope.tasklist;
        Ok(())
    }

    fn link(&mut self, server: &str) {
        self.tasklist.set_link(server);
    }
}

/// `GET /projects/api/v3/tasklists.json`, optionally scoped to one project.
#[derive(Debug, Default)]
pub struct Multiple {
    pub project_id: Option<i64>,
    pub filters: PageFilters,
    pub tasklists: Vec<Tasklist>,
    pub meta: Meta,
}

#[derive(Deserialize)]
struct MultipleEnvelope {
    #[serde(default)]
    tasklists: Vec<Tasklist>,
    #[serde(default)]
    meta: Meta,
}

impl Entity for Multiple {
    fn name(&self) -> &'static str {
        "tasklists"
    }

    fn build(&self, client: &Client, server: &str) -> Result<RequestBuilder, Error> {
        let url = match self.project_id {
            Some(project_id) => format!("{server}{V3}/projects/{project_id}/tasklists.json"),
            None => format!("{server}{V3}/tasklists.json"),
        };
        let mut query = QueryPairs::new();
        self.filters.fill(&mut query);
        Ok(query.apply(client.get(url)))
    }

    fn decode(&mut self, body: &[u8]) -> Result<(), Error> {
        let envelope: MultipleEnvelope =
            serde_json::from_slice(body).map_err(|e| Error::decode("tasklists", e))?;
        self.tasklists = envelope.tasklists;
        self.meta = envelope.meta;
        Ok(())
    }

    fn link(&mut self, server: &str) {
        for tasklist in &mut self.tasklists {
            tasklist.set_link(server);
        }
    }
}

/// Legacy body; the envelope key is the v1 name `todo-list`.
#[derive(Debug, Default, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBody {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "milestone-id", skip_serializing_if = "Option::is_none")]
    pub milestone_id: Option<i64>,
}

#[derive(Serialize)]
struct CreateEnvelope<'a> {
    #[serde(rename = "todo-list")]
    todo_list: &'a CreateBody,
}

/// `POST /projects/{projectId}/tasklists.json` (legacy v1).
#[derive(Debug, Default)]
pub struct Create {
    pub project_id: i64,
    pub tasklist: CreateBody,
}

impl Entity for Create {
    fn name(&self) -> &'static str {
        "tasklist"
    }

    fn build(&self, client: &Client, server: &str) -> Result<RequestBuilder, Error> {
        Ok(client
            .post(format!("{server}/projects/{}/tasklists.json", self.project_id))
            .json(&CreateEnvelope {
                todo_list: &self.tasklist,
            }))
    }
}

/// `POST /projects/tasklists/{id}.json` (legacy v1; the quirky method is what
/// the service actually accepts for updates).
#[derive(Debug, Default)]
pub struct Update {
    pub id: i64,
    pub tasklist: CreateBody,
}

impl Entity for Update {
    fn name(&self) -> &'static str {
        "tasklist"
    }

    fn build(&self, client: &Client, server: &str) -> Result<RequestBuilder, Error> {
        let id = require_id("tasklist", self.id)?;
        Ok(client
            .post(format!("{server}/projects/tasklists/{id}.json"))
            .json(&CreateEnvelope {
                todo_list: &self.tasklist,
            }))
    }
}

/// `DELETE /projects/api/v3/tasklists/{id}.json`
#[derive(Debug, Default)]
pub struct Delete {
    pub id: i64,
}

impl Entity for Delete {
    fn name(&self) -> &'static str {
        "tasklist"
    }

    fn build(&self, client: &Client, server: &str) -> Result<RequestBuilder, Error> {
        let id = require_id("tasklist", self.id)?;
        Ok(client.delete(format!("{server}{V3}/tasklists/{id}.json")))
    }
}

/// Creates the tasklist and reports the server-assigned ID. The legacy
/// endpoint answers with the ID under the all-caps `TASKLISTID` key.
pub async fn create(engine: &Engine, entity: &mut Create) -> Result<i64, Error> {
    let mut id = 0i64;
    let mut sink = |value: i64| id = value;
    engine
        .dispatch(entity, &mut [RequestOption::id_callback("TASKLISTID", &mut sink)])
        .await?;
    Ok(id)
}
