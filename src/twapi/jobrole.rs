//! Job-role entities, including the user assign/unassign operations.
//! Fully modern: every operation is v3.

use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, Serialize};

use super::codec::OptionalDateTime;
use super::relationship::Relationship;
use super::{Engine, Entity, Error, Meta, PageFilters, QueryPairs, RequestOption, require_id, V3};

/// A named role users can hold, possibly as their primary role.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JobRole {
    pub id: i64,
    pub name: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub users: Vec<Relationship>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub primary_users: Vec<Relationship>,
    pub created_at: OptionalDateTime,
    pub updated_at: OptionalDateTime,
}

/// `GET /projects/api/v3/jobroles/{id}.json`
#[derive(Debug, Default)]
pub struct Single {
    pub id: i64,
    pub jobrole: JobRole,
}

impl Single {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            jobrole: JobRole::default(),
        }
    }
}

#[derive(Deserialize)]
struct SingleEnvelope {
    jobrole: JobRole,
}

impl Entity for Single {
    fn name(&self) -> &'static str {
        "jobrole"
    }

    fn build(&self, client: &Client, server: &str) -> Result<RequestBuilder, Error> {
        Ok(client.get(format!("{server}{V3}/jobroles/{}.json", self.id)))
    }

    fn decode(&mut self, body: &[u8]) -> Result<(), Error> {
        let envelope: SingleEnvelope =
            serde_json::from_slice(body).map_err(|e| Error::decode("jobrole", e))?;
        self.jobrole = envelope.jobrole;
        Ok(())
    }
}

/// `GET /projects/api/v3/jobroles.json`
#[derive(Debug, Default)]
pub struct Multiple {
    pub filters: PageFilters,
    pub jobroles: Vec<JobRole>,
    pub meta: Meta,
}

#[derive(Deserialize)]
struct MultipleEnvelope {
    #[serde(default)]
    jobroles: Vec<JobRole>,
    #[serde(default)]
    meta: Meta,
}

impl Entity for Multiple {
    fn name(&self) -> &'static str {
        "jobroles"
    }

    fn build(&self, client: &Client, server: &str) -> Result<RequestBuilder, Error> {
        let mut query = QueryPairs::new();
        self.filters.fill(&mut query);
        Ok(query.apply(client.get(format!("{server}{V3}/jobroles.json"))))
    }

    fn decode(&mut self, body: &[u8]) -> Result<(), Error> {
        let envelope: MultipleEnvelope =
            serde_json::from_slice(body).map_err(|e| Error::decode("jobroles", e))?;
        self.jobroles = envelope.jobroles;
        self.meta = envelope.meta;
        Ok(())
    }
}

#[derive(Debug, Default, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBody {
    pub name: String,
}

#[derive(Serialize)]
struct CreateEnvelope<'a> {
    jobrole: &'a CreateBody,
}

/// `POST /projects/api/v3/jobroles.json`
#[derive(Debug, Default)]
pub struct Create {
    pub jobrole: CreateBody,
}

impl Entity for Create {
    fn name(&self) -> &'static str {
        "jobrole"
    }

    fn build(&self, client: &Client, server: &str) -> Result<RequestBuilder, Error> {
        Ok(client
            .post(format!("{server}{V3}/jobroles.json"))
            .json(&CreateEnvelope {
                jobrole: &self.jobrole,
            }))
    }
}

/// `PATCH /projects/api/v3/jobroles/{id}.json`
#[derive(Debug, Default)]
pub struct Update {
    pub id: i64,
    pub jobrole: CreateBody,
}

impl Entity for Update {
    fn name(&self) -> &'static str {
        "jobrole"
    }

    fn build(&self, client: &Client, server: &str) -> Result<RequestBuilder, Error> {
        let id = require_id("jobrole", self.id)?;
        Ok(client
            .patch(format!("{server}{V3}/jobroles/{id}.json"))
            .json(&CreateEnvelope {
                jobrole: &self.jobrole,
            }))
    }
}

/// `DELETE /projects/api/v3/jobroles/{id}.json`
#[derive(Debug, Default)]
pub struct Delete {
    pub id: i64,
}

impl Entity for Delete {
    fn name(&self) -> &'static str {
        "jobrole"
    }

    fn build(&self, client: &Client, server: &str) -> Result<RequestBuilder, Error> {
        let id = require_id("jobrole", self.id)?;
        Ok(client.delete(format!("{server}{V3}/jobroles/{id}.json")))
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UsersBody<'a> {
    user_ids: &'a [i64],
}

/// `POST /projects/api/v3/jobroles/{id}/people.json` — assigns users to the
/// role. Body is the bare `{"userIds":[…]}` object.
#[derive(Debug, Default)]
pub struct AssignUsers {
    pub id: i64,
    pub user_ids: Vec<i64>,
}

impl Entity for AssignUsers {
    fn name(&self) -> &'static str {
        "jobrole users"
    }

    fn build(&self, client: &Client, server: &str) -> Result<RequestBuilder, Error> {
        let id = require_id("jobrole", self.id)?;
        if self.user_ids.is_empty() {
            return Err(Error::InvalidParameters(
                "at least one user ID must be provided".to_string(),
            ));
        }
        Ok(client
            .post(format!("{server}{V3}/jobroles/{id}/people.json"))
            .json(&UsersBody {
                user_ids: &self.user_ids,
            }))
    }
}

/// `DELETE /projects/api/v3/jobroles/{id}/people.json` — removes users from
/// the role.
#[derive(Debug, Default)]
pub struct UnassignUsers {
    pub id: i64,
    pub user_ids: Vec<i64>,
}

impl Entity for UnassignUsers {
    fn name(&self) -> &'static str {
        "jobrole users"
    }

    fn build(&self, client: &Client, server: &str) -> Result<RequestBuilder, Error> {
        let id = require_id("jobrole", self.id)?;
        if self.user_ids.is_empty() {
            return Err(Error::InvalidParameters(
                "at least one user ID must be provided".to_string(),
            ));
        }
        Ok(client
            .delete(format!("{server}{V3}/jobroles/{id}/people.json"))
            .json(&UsersBody {
                user_ids: &self.user_ids,
            }))
    }
}

/// Creates the job role and reports the server-assigned ID.
pub async fn create(engine: &Engine, entity: &mut Create) -> Result<i64, Error> {
    let mut id = 0i64;
    let mut sink = |value: i64| id = value;
    engine
        .dispatch(entity, &mut [RequestOption::id_callback("id", &mut sink)])
        .await?;
    Ok(id)
}
