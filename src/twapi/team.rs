//! Team entities. Teams never made the jump to v3: every operation is legacy
//! v1, with string-encoded IDs throughout.

use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, Serialize};

use super::codec::{LegacyNumber, LegacyNumericList};
use super::relationship::LegacyRelationship;
use super::{Engine, Entity, Error, RequestOption, require_id};

/// A named group of users, optionally nested under a parent team and scoped
/// to a company or project.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Team {
    pub id: LegacyNumber,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub handle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_team: Option<LegacyRelationship>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<LegacyRelationship>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<LegacyRelationship>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub members: Option<LegacyNumericList>,
    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub web_link: Option<String>,
}

impl Team {
    fn set_link(&mut self, server: &str) {
        if self.id.0 > 0 {
            self.web_link = Some(format!("{server}/app/teams/{}", self.id));
        }
    }
}

/// `GET /teams/{id}.json` (legacy v1).
#[derive(Debug, Default)]
pub struct Single {
    pub id: i64,
    pub team: Team,
}

impl Single {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            team: Team::default(),
        }
    }
}

#[derive(Deserialize)]
struct SingleEnvelope {
    team: Team,
}

impl Entity for Single {
    fn name(&self) -> &'static str {
        "team"
    }

    fn build(&self, client: &Client, server: &str) -> Result<RequestBuilder, Error> {
        Ok(client.get(format!("{server}/teams/{}.json", self.id)))
    }

    fn decode(&mut self, body: &[u8]) -> Result<(), Error> {
        let envelope: SingleEnvelope =
            serde_json::from_slice(body).map_err(|e| Error::decode("team", e))?;
        self.team = envelope.team;
        Ok(())
    }

    fn link(&mut self, server: &str) {
        self.team.set_link(server);
    }
}

/// `GET /teams.json` (legacy v1).
#[derive(Debug, Default)]
pub struct Multiple {
    pub teams: Vec<Team>,
}

#[derive(Deserialize)]
struct MultipleEnvelope {
    #[serde(default)]
    teams: Vec<Team>,
}

impl Entity for Multiple {
    fn name(&self) -> &'static str {
        "teams"
    }

    fn build(&self, client: &Client, server: &str) -> Result<RequestBuilder, Error> {
        Ok(client.get(format!("{server}/teams.json")))
    }

    fn decode(&mut self, body: &[u8]) -> Result<(), Error> {
        let envelope: MultipleEnvelope =
            serde_json::from_slice(body).map_err(|e| Error::decode("teams", e))?;
        self.teams = envelope.teams;
        Ok(())
    }

    fn link(&mut self, server: &str) {
        for team in &mut self.teams {
            team.set_link(server);
        }
    }
}

/// Legacy create/update body; member lists use the comma-joined string form.
#[derive(Debug, Default, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBody {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub handle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_team_id: Option<LegacyNumber>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_id: Option<LegacyNumber>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<LegacyNumber>,
    #[serde(rename = "userIds", skip_serializing_if = "Option::is_none")]
    pub member_ids: Option<LegacyNumericList>,
}

#[derive(Serialize)]
struct CreateEnvelope<'a> {
    team: &'a CreateBody,
}

/// `POST /teams.json` (legacy v1).
#[derive(Debug, Default)]
pub struct Create {
    pub team: CreateBody,
}

impl Entity for Create {
    fn name(&self) -> &'static str {
        "team"
    }

    fn build(&self, client: &Client, server: &str) -> Result<RequestBuilder, Error> {
        Ok(client
            .post(format!("{server}/teams.json"))
            .json(&CreateEnvelope { team: &self.team }))
    }
}

/// `PUT /teams/{id}.json` (legacy v1).
#[derive(Debug, Default)]
pub struct Update {
    pub id: i64,
    pub team: CreateBody,
}

impl Entity for Update {
    fn name(&self) -> &'static str {
        "team"
    }

    fn build(&self, client: &Client, server: &str) -> Result<RequestBuilder, Error> {
        let id = require_id("team", self.id)?;
        Ok(client
            .put(format!("{server}/teams/{id}.json"))
            .json(&CreateEnvelope { team: &self.team }))
    }
}

/// `DELETE /teams/{id}.json` (legacy v1).
#[derive(Debug, Default)]
pub struct Delete {
    pub id: i64,
}

impl Entity for Delete {
    fn name(&self) -> &'static str {
        "team"
    }

    fn build(&self, client: &Client, server: &str) -> Result<RequestBuilder, Error> {
        let id = require_id("team", self.id)?;
        Ok(client.delete(format!("{server}/teams/{id}.json")))
    }
}

/// Creates the team and reports the server-assigned ID. The legacy endpoint
/// answers `{"id": "..."}` with a string-encoded number.
pub async fn create(engine: &Engine, entity: &mut Create) -> Result<i64, Error> {
    let mut id = 0i64;
    let mut sink = |value: i64| id = value;
    engine
        .dispatch(entity, &mut [RequestOption::id_callback("id", &mut sink)])
        .await?;
    Ok(id)
}
