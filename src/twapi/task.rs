//! Task entities. Fully modern: every operation is v3.

use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, Serialize};

use super::codec::{Date, OptionalDateTime};
use super::relationship::{Relationship, UserGroups};
use super::{Engine, Entity, Error, Meta, PageFilters, QueryPairs, RequestOption, require_id, V3};

/// A unit of work assigned to users, companies or teams inside a tasklist.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Task {
    pub id: i64,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<Date>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<Date>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tasklist: Option<Relationship>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub assignees: Vec<Relationship>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<Relationship>,
    pub created_at: OptionalDateTime,
    pub updated_at: OptionalDateTime,
    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub web_link: Option<String>,
}

impl Task {
    fn set_link(&mut self, server: &str) {
        if self.id > 0 {
            self.web_link = Some(format!("{server}/app/tasks/{}", self.id));
        }
    }
}

/// `GET /projects/api/v3/tasks/{id}.json`
#[derive(Debug, Default)]
pub struct Single {
    pub id: i64,
    pub task: Task,
}

impl Single {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            task: Task::default(),
        }
    }
}

#[derive(Deserialize)]
struct SingleEnvelope {
    task: Task,
}

impl Entity for Single {
    fn name(&self) -> &'static str {
        "task"
    }

    fn build(&self, client: &Client, server: &str) -> Result<RequestBuilder, Error> {
        Ok(client.get(format!("{server}{V3}/tasks/{}.json", self.id)))
    }

    fn decode(&mut self, body: &[u8]) -> Result<(), Error> {
        let envelope: SingleEnvelope =
            serde_json::from_slice(body).map_err(|e| Error::decode("task", e))?;
        self.task = envelope.task;
        Ok(())
    }

    fn link(&mut self, server: &str) {
        self.task.set_link(server);
    }
}

/// Scope for the three task list endpoints.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    #[default]
    All,
    Project(i64),
    Tasklist(i64),
}

#[derive(Debug, Default, Clone)]
pub struct Filters {
    pub page: PageFilters,
    pub tag_ids: Vec<i64>,
    pub match_all_tags: Option<bool>,
}

/// `GET /projects/api/v3/tasks.json` and its project/tasklist-scoped forms.
#[derive(Debug, Default)]
pub struct Multiple {
    pub scope: Scope,
    pub filters: Filters,
    pub tasks: Vec<Task>,
    pub meta: Meta,
}

#[derive(Deserialize)]
struct MultipleEnvelope {
    #[serde(default)]
    tasks: Vec<Task>,
    #[serde(default)]
    meta: Meta,
}

impl Entity for Multiple {
    fn name(&self) -> &'static str {
        "tasks"
    }

    fn build(&self, client: &Client, server: &str) -> Result<RequestBuilder, Error> {
        let url = match self.scope {
            Scope::All => format!("{server}{V3}/tasks.json"),
            Scope::Project(id) => format!("{server}{V3}/projects/{id}/tasks.json"),
            Scope::Tasklist(id) => format!("{server}{V3}/tasklists/{id}/tasks.json"),
        };
        let mut query = QueryPairs::new();
        query.push_opt("matchAllTags", self.filters.match_all_tags);
        self.filters.page.fill(&mut query);
        query.push_list("tagIds", &self.filters.tag_ids);
        Ok(query.apply(client.get(url)))
    }

    fn decode(&mut self, body: &[u8]) -> Result<(), Error> {
        let envelope: MultipleEnvelope =
            serde_json::from_slice(body).map_err(|e| Error::decode("tasks", e))?;
        self.tasks = envelope.tasks;
        self.meta = envelope.meta;
        Ok(())
    }

    fn link(&mut self, server: &str) {
        for task in &mut self.tasks {
            task.set_link(server);
        }
    }
}

/// Modern create/update body; assignees use the three-array object form.
#[derive(Debug, Default, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBody {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<Date>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<Date>,
    #[serde(skip_serializing_if = "UserGroups::is_empty")]
    pub assignees: UserGroups,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tag_ids: Vec<i64>,
}

#[derive(Serialize)]
struct CreateEnvelope<'a> {
    task: &'a CreateBody,
}

/// `POST /projects/api/v3/tasklists/{tasklistId}/tasks.json`
#[derive(Debug, Default)]
pub struct Create {
    pub tasklist_id: i64,
    pub task: CreateBody,
}

impl Entity for Create {
    fn name(&self) -> &'static str {
        "task"
    }

    fn build(&self, client: &Client, server: &str) -> Result<RequestBuilder, Error> {
        Ok(client
            .post(format!(
                "{server}{V3}/tasklists/{}/tasks.json",
                self.tasklist_id
            ))
            .json(&CreateEnvelope { task: &self.task }))
    }
}

/// `PATCH /projects/api/v3/tasks/{id}.json`
#[derive(Debug, Default)]
pub struct Update {
    pub id: i64,
    pub task: CreateBody,
}

impl Entity for Update {
    fn name(&self) -> &'static str {
        "task"
    }

    fn build(&self, client: &Client, server: &str) -> Result<RequestBuilder, Error> {
        let id = require_id("task", self.id)?;
        Ok(client
            .patch(format!("{server}{V3}/tasks/{id}.json"))
            .json(&CreateEnvelope { task: &self.task }))
    }
}

/// Creates the task and reports the server-assigned ID.
pub async fn create(engine: &Engine, entity: &mut Create) -> Result<i64, Error> {
    let mut id = 0i64;
    let mut sink = |value: i64| id = value;
    engine
        .dispatch(entity, &mut [RequestOption::id_callback("id", &mut sink)])
        .await?;
    Ok(id)
}
