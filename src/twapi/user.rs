//! Person entities (the API calls users "people").
//!
//! Reads are v3; create and update go through the legacy v1 endpoints with
//! their hyphenated body keys. Also carries the project-membership operation
//! (`PUT /projects/{id}/people.json`).

use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, Serialize};

use super::codec::OptionalDateTime;
use super::relationship::Relationship;
use super::{Engine, Entity, Error, Meta, PageFilters, QueryPairs, RequestOption, require_id, V3};

/// A person: site owner, standard user, collaborator or client contact.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Person {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub user_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_admin: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<Relationship>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub job_roles: Vec<Relationship>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skills: Vec<Relationship>,
    pub created_at: OptionalDateTime,
    pub updated_at: OptionalDateTime,
    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub web_link: Option<String>,
}

impl Person {
    fn set_link(&mut self, server: &str) {
        if self.id > 0 {
            self.web_link = Some(format!("{server}/app/people/{}", self.id));
        }
    }
}

/// `GET /projects/api/v3/people/{id}.json`
#[derive(Debug, Default)]
pub struct Single {
    pub id: i64,
    pub person: Person,
}

impl Single {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            person: Person::default(),
        }
    }
}

#[derive(Deserialize)]
struct SingleEnvelope {
    person: Person,
}

impl Entity for Single {
    fn name(&self) -> &'static str {
        "person"
    }

    fn build(&self, client: &Client, server: &str) -> Result<RequestBuilder, Error> {
        Ok(client.get(format!("{server}{V3}/people/{}.json", self.id)))
    }

    fn decode(&mut self, body: &[u8]) -> Result<(), Error> {
        let envelope: SingleEnvelope =
            serde_json::from_slice(body).map_err(|e| Error::decode("person", e))?;
        self.person = envelope.person;
        Ok(())
    }

    fn link(&mut self, server: &str) {
        self.person.set_link(server);
    }
}

/// `GET /projects/api/v3/people.json`, optionally scoped to one project.
#[derive(Debug, Default)]
pub struct Multiple {
    pub project_id: Option<i64>,
    pub filters: PageFilters,
    pub people: Vec<Person>,
    pub meta: Meta,
}

#[derive(Deserialize)]
struct MultipleEnvelope {
    #[serde(default)]
    people: Vec<Person>,
    #[serde(default)]
    meta: Meta,
}

impl Entity for Multiple {
    fn name(&self) -> &'static str {
        "people"
    }

    fn build(&self, client: &Client, server: &str) -> Result<RequestBuilder, Error> {
        let url = match self.project_id {
            Some(project_id) => format!("{server}{V3}/projects/{project_id}/people.json"),
            None => format!("{server}{V3}/people.json"),
        };
        let mut query = QueryPairs::new();
        self.filters.fill(&mut query);
        Ok(query.apply(client.get(url)))
    }

    fn decode(&mut self, body: &[u8]) -> Result<(), Error> {
        let envelope: MultipleEnvelope =
            serde_json::from_slice(body).map_err(|e| Error::decode("people", e))?;
        self.people = envelope.people;
        self.meta = envelope.meta;
        Ok(())
    }

    fn link(&mut self, server: &str) {
        for person in &mut self.people {
            person.set_link(server);
        }
    }
}

/// Legacy create/update body with the v1 hyphenated keys.
#[derive(Debug, Default, Clone, Serialize)]
pub struct CreateBody {
    #[serde(rename = "first-name")]
    pub first_name: String,
    #[serde(rename = "last-name")]
    pub last_name: String,
    #[serde(rename = "email-address")]
    pub email: String,
    #[serde(rename = "user-type", skip_serializing_if = "Option::is_none")]
    pub user_type: Option<String>,
    #[serde(rename = "title", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "company-id", skip_serializing_if = "Option::is_none")]
    pub company_id: Option<i64>,
}

#[derive(Serialize)]
struct CreateEnvelope<'a> {
    person: &'a CreateBody,
}

/// `POST /people.json` (legacy v1).
#[derive(Debug, Default)]
pub struct Create {
    pub person: CreateBody,
}

impl Entity for Create {
    fn name(&self) -> &'static str {
        "person"
    }

    fn build(&self, client: &Client, server: &str) -> Result<RequestBuilder, Error> {
        Ok(client
            .post(format!("{server}/people.json"))
            .json(&CreateEnvelope {
                person: &self.person,
            }))
    }
}

/// `PUT /people/{id}.json` (legacy v1).
#[derive(Debug, Default)]
pub struct Update {
    pub id: i64,
    pub person: CreateBody,
}

impl Entity for Update {
    fn name(&self) -> &'static str {
        "person"
    }

    fn build(&self, client: &Client, server: &str) -> Result<RequestBuilder, Error> {
        let id = require_id("person", self.id)?;
        Ok(client
            .put(format!("{server}/people/{id}.json"))
            .json(&CreateEnvelope {
                person: &self.person,
            }))
    }
}

/// `DELETE /people/{id}.json` (legacy v1).
#[derive(Debug, Default)]
pub struct Delete {
    pub id: i64,
}

impl Entity for Delete {
    fn name(&self) -> &'static str {
        "person"
    }

    fn build(&self, client: &Client, server: &str) -> Result<RequestBuilder, Error> {
        let id = require_id("person", self.id)?;
        Ok(client.delete(format!("{server}/people/{id}.json")))
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AddProjectBody<'a> {
    user_ids: &'a [i64],
}

/// `PUT /projects/{projectId}/people.json` — grants project membership to a
/// set of users. The body is the bare `{"userIds":[…]}` object, no envelope.
#[derive(Debug, Default)]
pub struct AddProject {
    pub project_id: i64,
    pub user_ids: Vec<i64>,
}

impl Entity for AddProject {
    fn name(&self) -> &'static str {
        "project people"
    }

    fn build(&self, client: &Client, server: &str) -> Result<RequestBuilder, Error> {
        let project_id = require_id("project", self.project_id)?;
        if self.user_ids.is_empty() {
            return Err(Error::InvalidParameters(
                "at least one user ID must be provided".to_string(),
            ));
        }
        Ok(client
            .put(format!("{server}/projects/{project_id}/people.json"))
            .json(&AddProjectBody {
                user_ids: &self.user_ids,
            }))
    }
}

/// Creates the person and reports the server-assigned ID.
pub async fn create(engine: &Engine, entity: &mut Create) -> Result<i64, Error> {
    let mut id = 0i64;
    let mut sink = |value: i64| id = value;
    engine
        .dispatch(entity, &mut [RequestOption::id_callback("id", &mut sink)])
        .await?;
    Ok(id)
}
