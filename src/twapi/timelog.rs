//! Timelog entities. Fully modern: every operation is v3.

use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, Serialize};

use super::codec::{Date, OptionalDateTime, Time};
use super::relationship::Relationship;
use super::{Engine, Entity, Error, Meta, PageFilters, QueryPairs, RequestOption, require_id, V3};

/// A period of time charged to a project, optionally against one task.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Timelog {
    pub id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub minutes: i64,
    pub billable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<Date>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<Time>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<Relationship>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<Relationship>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task: Option<Relationship>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<Relationship>,
    pub created_at: OptionalDateTime,
    pub updated_at: OptionalDateTime,
}

/// `GET /projects/api/v3/time/{id}.json`
#[derive(Debug, Default)]
pub struct Single {
    pub id: i64,
    pub timelog: Timelog,
}

impl Single {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            timelog: Timelog::default(),
        }
    }
}

#[derive(Deserialize)]
struct SingleEnvelope {
    timelog: Timelog,
}

impl Entity for Single {
    fn name(&self) -> &'static str {
        "timelog"
    }

    fn build(&self, client: &Client, server: &str) -> Result<RequestBuilder, Error> {
        Ok(client.get(format!("{server}{V3}/time/{}.json", self.id)))
    }

    fn decode(&mut self, body: &[u8]) -> Result<(), Error> {
        let envelope: SingleEnvelope =
            serde_json::from_slice(body).map_err(|e| Error::decode("timelog", e))?;
        self.timelog = envelope.timelog;
        Ok(())
    }
}

/// Scope for the three timelog list endpoints.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    #[default]
    All,
    Project(i64),
    Task(i64),
}

#[derive(Debug, Default, Clone)]
pub struct Filters {
    pub page: PageFilters,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    /// Tri-state: billable only, non-billable only, or omit.
    pub billable: Option<bool>,
}

/// `GET /projects/api/v3/time.json` and its project/task-scoped forms.
#[derive(Debug, Default)]
pub struct Multiple {
    pub scope: Scope,
    pub filters: Filters,
    pub timelogs: Vec<Timelog>,
    pub meta: Meta,
}

#[derive(Deserialize)]
struct MultipleEnvelope {
    #[serde(default)]
    timelogs: Vec<Timelog>,
    #[serde(default)]
    meta: Meta,
}

impl Entity for Multiple {
    fn name(&self) -> &'static str {
        "timelogs"
    }

    fn build(&self, client: &Client, server: &str) -> Result<RequestBuilder, Error> {
        let url = match self.scope {
            Scope::All => format!("{server}{V3}/time.json"),
            Scope::Project(id) => format!("{server}{V3}/projects/{id}/time.json"),
            Scope::Task(id) => format!("{server}{V3}/tasks/{id}/time.json"),
        };
        let mut query = QueryPairs::new();
        query.push_opt("billableType", self.filters.billable.map(|b| {
            if b { "billable" } else { "non-billable" }
        }));
        query.push_opt("endDate", self.filters.end_date);
        self.filters.page.fill(&mut query);
        query.push_opt("startDate", self.filters.start_date);
        Ok(query.apply(client.get(url)))
    }

    fn decode(&mut self, body: &[u8]) -> Result<(), Error> {
        let envelope: MultipleEnvelope =
            serde_json::from_slice(body).map_err(|e| Error::decode("timelogs", e))?;
        self.timelogs = envelope.timelogs;
        self.meta = envelope.meta;
        Ok(())
    }
}

/// Modern create/update body.
#[derive(Debug, Default, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub date: Date,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<Time>,
    pub hours: i64,
    pub minutes: i64,
    pub is_billable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tag_ids: Vec<i64>,
}

#[derive(Serialize)]
struct CreateEnvelope<'a> {
    timelog: &'a CreateBody,
}

/// Where a new timelog is charged: a project or a single task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Project(i64),
    Task(i64),
}

impl Default for Target {
    fn default() -> Self {
        Target::Project(0)
    }
}

/// `POST /projects/api/v3/projects/{id}/time.json` or
/// `POST /projects/api/v3/tasks/{id}/time.json`
#[derive(Debug, Default)]
pub struct Create {
    pub target: Target,
    pub timelog: CreateBody,
}

impl Entity for Create {
    fn name(&self) -> &'static str {
        "timelog"
    }

    fn build(&self, client: &Client, server: &str) -> Result<RequestBuilder, Error> {
        let url = match self.target {
            Target::Project(id) => format!("{server}{V3}/projects/{id}/time.json"),
            Target::Task(id) => format!("{server}{V3}/tasks/{id}/time.json"),
        };
        Ok(client.post(url).json(&CreateEnvelope {
            timelog: &self.timelog,
        }))
    }
}

/// `PATCH /projects/api/v3/time/{id}.json`
#[derive(Debug, Default)]
pub struct Update {
    pub id: i64,
    pub timelog: CreateBody,
}

impl Entity for Update {
    fn name(&self) -> &'static str {
        "timelog"
    }

    fn build(&self, client: &Client, server: &str) -> Result<RequestBuilder, Error> {
        let id = require_id("timelog", self.id)?;
        Ok(client
            .patch(format!("{server}{V3}/time/{id}.json"))
            .json(&CreateEnvelope {
                timelog: &self.timelog,
            }))
    }
}

/// `DELETE /projects/api/v3/time/{id}.json`
#[derive(Debug, Default)]
pub struct Delete {
    pub id: i64,
}

impl Entity for Delete {
    fn name(&self) -> &'static str {
        "timelog"
    }

    fn build(&self, client: &Client, server: &str) -> Result<RequestBuilder, Error> {
        let id = require_id("timelog", self.id)?;
        Ok(client.delete(format!("{server}{V3}/time/{id}.json")))
    }
}

/// Creates the timelog and reports the server-assigned ID.
pub async fn create(engine: &Engine, entity: &mut Create) -> Result<i64, Error> {
    let mut id = 0i64;
    let mut sink = |value: i64| id = value;
    engine
        .dispatch(entity, &mut [RequestOption::id_callback("id", &mut sink)])
        .await?;
    Ok(id)
}
