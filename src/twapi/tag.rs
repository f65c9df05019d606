//! Tag entities. Fully modern: every operation is v3.

use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, Serialize};

use super::relationship::Relationship;
use super::{Engine, Entity, Error, Meta, PageFilters, QueryPairs, RequestOption, require_id, V3};

/// A classification label, optionally scoped to one project.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Tag {
    pub id: i64,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<Relationship>,
}

/// `GET /projects/api/v3/tags/{id}.json`
#[derive(Debug, Default)]
pub struct Single {
    pub id: i64,
    pub tag: Tag,
}

impl Single {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            tag: Tag::default(),
        }
    }
}

#[derive(Deserialize)]
struct SingleEnvelope {
    tag: Tag,
}

impl Entity for Single {
    fn name(&self) -> &'static str {
        "tag"
    }

    fn build(&self, client: &Client, server: &str) -> Result<RequestBuilder, Error> {
        Ok(client.get(format!("{server}{V3}/tags/{}.json", self.id)))
    }

    fn decode(&mut self, body: &[u8]) -> Result<(), Error> {
        let envelope: SingleEnvelope =
            serde_json::from_slice(body).map_err(|e| Error::decode("tag", e))?;
        self.tag = envelope.tag;
        Ok(())
    }
}

#[derive(Debug, Default, Clone)]
pub struct Filters {
    pub page: PageFilters,
    /// Restricts tags to those attached to one kind of item, e.g. `"project"`.
    pub item_type: Option<String>,
    pub project_ids: Vec<i64>,
}

/// `GET /projects/api/v3/tags.json`
#[derive(Debug, Default)]
pub struct Multiple {
    pub filters: Filters,
    pub tags: Vec<Tag>,
    pub meta: Meta,
}

#[derive(Deserialize)]
struct MultipleEnvelope {
    #[serde(default)]
    tags: Vec<Tag>,
    #[serde(default)]
    meta: Meta,
}

impl Entity for Multiple {
    fn name(&self) -> &'static str {
        "tags"
    }

    fn build(&self, client: &Client, server: &str) -> Result<RequestBuilder, Error> {
        let mut query = QueryPairs::new();
        query.push_str("itemType", self.filters.item_type.as_deref());
        self.filters.page.fill(&mut query);
        query.push_list("projectIds", &self.filters.project_ids);
        Ok(query.apply(client.get(format!("{server}{V3}/tags.json"))))
    }

    fn decode(&mut self, body: &[u8]) -> Result<(), Error> {
        let envelope: MultipleEnvelope =
            serde_json::from_slice(body).map_err(|e| Error::decode("tags", e))?;
        self.tags = envelope.tags;
        self.meta = envelope.meta;
        Ok(())
    }
}

#[derive(Debug, Default, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBody {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<i64>,
}

#[derive(Serialize)]
struct CreateEnvelope<'a> {
    tag: &'a CreateBody,
}

/// `POST /projects/api/v3/tags.json`
#[derive(Debug, Default)]
pub struct Create {
    pub tag: CreateBody,
}

impl Entity for Create {
    fn name(&self) -> &'static str {
        "tag"
    }

    fn build(&self, client: &Client, server: &str) -> Result<RequestBuilder, Error> {
        Ok(client
            .post(format!("{server}{V3}/tags.json"))
            .json(&CreateEnvelope { tag: &self.tag }))
    }
}

/// `PATCH /projects/api/v3/tags/{id}.json`
#[derive(Debug, Default)]
pub struct Update {
    pub id: i64,
    pub tag: CreateBody,
}

impl Entity for Update {
    fn name(&self) -> &'static str {
        "tag"
    }

    fn build(&self, client: &Client, server: &str) -> Result<RequestBuilder, Error> {
        let id = require_id("tag", self.id)?;
        Ok(client
            .patch(format!("{server}{V3}/tags/{id}.json"))
            .json(&CreateEnvelope { tag: &self.tag }))
    }
}

/// `DELETE /projects/api/v3/tags/{id}.json`
#[derive(Debug, Default)]
pub struct Delete {
    pub id: i64,
}

impl Entity for Delete {
    fn name(&self) -> &'static str {
        "tag"
    }

    fn build(&self, client: &Client, server: &str) -> Result<RequestBuilder, Error> {
        let id = require_id("tag", self.id)?;
        Ok(client.delete(format!("{server}{V3}/tags/{id}.json")))
    }
}

/// Creates the tag and reports the server-assigned ID.
pub async fn create(engine: &Engine, entity: &mut Create) -> Result<i64, Error> {
    let mut id = 0i64;
    let mut sink = |value: i64| id = value;
    engine
        .dispatch(entity, &mut [RequestOption::id_callback("id", &mut sink)])
        .await?;
    Ok(id)
}
