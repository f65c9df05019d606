//! Skill entities. Fully modern: every operation is v3.

use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, Serialize};

use super::codec::OptionalDateTime;
use super::{Engine, Entity, Error, Meta, PageFilters, QueryPairs, RequestOption, require_id, V3};

/// A capability that can be attached to users.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Skill {
    pub id: i64,
    pub name: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub user_ids: Vec<i64>,
    pub created_at: OptionalDateTime,
    pub updated_at: OptionalDateTime,
}

/// `GET /projects/api/v3/skills/{id}.json`
#[derive(Debug, Default)]
pub struct Single {
    pub id: i64,
    pub skill: Skill,
}

impl Single {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            skill: Skill::default(),
        }
    }
}

#[derive(Deserialize)]
struct SingleEnvelope {
    skill: Skill,
}

impl Entity for Single {
    fn name(&self) -> &'static str {
        "skill"
    }

    fn build(&self, client: &Client, server: &str) -> Result<RequestBuilder, Error> {
        Ok(client.get(format!("{server}{V3}/skills/{}.json", self.id)))
    }

    fn decode(&mut self, body: &[u8]) -> Result<(), Error> {
        let envelope: SingleEnvelope =
            serde_json::from_slice(body).map_err(|e| Error::decode("skill", e))?;
        self.skill = envelope.skill;
        Ok(())
    }
}

/// `GET /projects/api/v3/skills.json`
#[derive(Debug, Default)]
pub struct Multiple {
    pub filters: PageFilters,
    pub skills: Vec<Skill>,
    pub meta: Meta,
}

#[derive(Deserialize)]
struct MultipleEnvelope {
    #[serde(default)]
    skills: Vec<Skill>,
    #[serde(default)]
    meta: Meta,
}

impl Entity for Multiple {
    fn name(&self) -> &'static str {
        "skills"
    }

    fn build(&self, client: &Client, server: &str) -> Result<RequestBuilder, Error> {
        let mut query = QueryPairs::new();
        self.filters.fill(&mut query);
        Ok(query.apply(client.get(format!("{server}{V3}/skills.json"))))
    }

    fn decode(&mut self, body: &[u8]) -> Result<(), Error> {
        let envelope: MultipleEnvelope =
            serde_json::from_slice(body).map_err(|e| Error::decode("skills", e))?;
        self.skills = envelope.skills;
        self.meta = envelope.meta;
        Ok(())
    }
}

#[derive(Debug, Default, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBody {
    pub name: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub user_ids: Vec<i64>,
}

#[derive(Serialize)]
struct CreateEnvelope<'a> {
    skill: &'a CreateBody,
}

/// `POST /projects/api/v3/skills.json`
#[derive(Debug, Default)]
pub struct Create {
    pub skill: CreateBody,
}

impl Entity for Create {
    fn name(&self) -> &'static str {
        "skill"
    }

    fn build(&self, client: &Client, server: &str) -> Result<RequestBuilder, Error> {
        Ok(client
            .post(format!("{server}{V3}/skills.json"))
            .json(&CreateEnvelope { skill: &self.skill }))
    }
}

/// `PATCH /projects/api/v3/skills/{id}.json`
#[derive(Debug, Default)]
pub struct Update {
    pub id: i64,
    pub skill: CreateBody,
}

impl Entity for Update {
    fn name(&self) -> &'static str {
        "skill"
    }

    fn build(&self, client: &Client, server: &str) -> Result<RequestBuilder, Error> {
        let id = require_id("skill", self.id)?;
        Ok(client
            .patch(format!("{server}{V3}/skills/{id}.json"))
            .json(&CreateEnvelope { skill: &self.skill }))
    }
}

/// `DELETE /projects/api/v3/skills/{id}.json`
#[derive(Debug, Default)]
pub struct Delete {
    pub id: i64,
}

impl Entity for Delete {
    fn name(&self) -> &'static str {
        "skill"
    }

    fn build(&self, client: &Client, server: &str) -> Result<RequestBuilder, Error> {
        let id = require_id("skill", self.id)?;
        Ok(client.delete(format!("{server}{V3}/skills/{id}.json")))
    }
}

/// Creates the skill and reports the server-assigned ID.
pub async fn create(engine: &Engine, entity: &mut Create) -> Result<i64, Error> {
    let mut id = 0i64;
    let mut sink = |value: i64| id = value;
    engine
        .dispatch(entity, &mut [RequestOption::id_callback("id", &mut sink)])
        .await?;
    Ok(id)
}
