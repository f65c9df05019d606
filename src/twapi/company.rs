//! Company entities. Fully modern: every operation is v3.

use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, Serialize};

use super::codec::OptionalDateTime;
use super::relationship::Relationship;
use super::{Engine, Entity, Error, Meta, PageFilters, QueryPairs, RequestOption, require_id, V3};

/// An organization: the owning installation account or a client.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Company {
    pub id: i64,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_one: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_two: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub industry: Option<Relationship>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manager: Option<Relationship>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<Relationship>,
    pub created_at: OptionalDateTime,
    pub updated_at: OptionalDateTime,
    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub web_link: Option<String>,
}

impl Company {
    fn set_link(&mut self, server: &str) {
        if self.id > 0 {
            self.web_link = Some(format!("{server}/app/companies/{}", self.id));
        }
    }
}

/// `GET /projects/api/v3/companies/{id}.json`
#[derive(Debug, Default)]
pub struct Single {
    pub id: i64,
    pub company: Company,
}

impl Single {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            company: Company::default(),
        }
    }
}

#[derive(Deserialize)]
struct SingleEnvelope {
    company: Company,
}

impl Entity for Single {
    fn name(&self) -> &'static str {
        "company"
    }

    fn build(&self, client: &Client, server: &str) -> Result<RequestBuilder, Error> {
        Ok(client.get(format!("{server}{V3}/companies/{}.json", self.id)))
    }

    fn decode(&mut self, body: &[u8]) -> Result<(), Error> {
        let envelope: SingleEnvelope =
            serde_json::from_slice(body).map_err(|e| Error::decode("company", e))?;
        self.company = envelope.company;
        Ok(())
    }

    fn link(&mut self, server: &str) {
        self.company.set_link(server);
    }
}

#[derive(Debug, Default, Clone)]
pub struct Filters {
    pub page: PageFilters,
    pub tag_ids: Vec<i64>,
    pub match_all_tags: Option<bool>,
}

/// `GET /projects/api/v3/companies.json`
#[derive(Debug, Default)]
pub struct Multiple {
    pub filters: Filters,
    pub companies: Vec<Company>,
    pub meta: Meta,
}

#[derive(Deserialize)]
struct MultipleEnvelope {
    #[serde(default)]
    companies: Vec<Company>,
    #[serde(default)]
    meta: Meta,
}

impl Entity for Multiple {
    fn name(&self) -> &'static str {
        "companies"
    }

    fn build(&self, client: &Client, server: &str) -> Result<RequestBuilder, Error> {
        let mut query = QueryPairs::new();
        query.push_opt("matchAllTags", self.filters.match_all_tags);
        self.filters.page.fill(&mut query);
        query.push_list("tagIds", &self.filters.tag_ids);
        Ok(query.apply(client.get(format!("{server}{V3}/companies.json"))))
    }

    fn decode(&mut self, body: &[u8]) -> Result<(), Error> {
        let envelope: MultipleEnvelope =
            serde_json::from_slice(body).map_err(|e| Error::decode("companies", e))?;
        self.companies = envelope.companies;
        self.meta = envelope.meta;
        Ok(())
    }

    fn link(&mut self, server: &str) {
        for company in &mut self.companies {
            company.set_link(server);
        }
    }
}

/// Modern create/update body.
#[derive(Debug, Default, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBody {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_one: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub industry_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manager_id: Option<i64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tag_ids: Vec<i64>,
}

#[derive(Serialize)]
struct CreateEnvelope<'a> {
    company: &'a CreateBody,
}

/// `POST /projects/api/v3/companies.json`
#[derive(Debug, Default)]
pub struct Create {
    pub company: CreateBody,
}

impl Entity for Create {
    fn name(&self) -> &'static str {
        "company"
    }

    fn build(&self, client: &Client, server: &str) -> Result<RequestBuilder, Error> {
        Ok(client
            .post(format!("{server}{V3}/companies.json"))
            .json(&CreateEnvelope {
                company: &self.company,
            }))
    }
}

/// `PATCH /projects/api/v3/companies/{id}.json`
#[derive(Debug, Default)]
pub struct Update {
    pub id: i64,
    pub company: CreateBody,
}

impl Entity for Update {
    fn name(&self) -> &'static str {
        "company"
    }

    fn build(&self, client: &Client, server: &str) -> Result<RequestBuilder, Error> {
        let id = require_id("company", self.id)?;
        Ok(client
            .patch(format!("{server}{V3}/companies/{id}.json"))
            .json(&CreateEnvelope {
                company: &self.company,
            }))
    }
}

/// `DELETE /projects/api/v3/companies/{id}.json`
#[derive(Debug, Default)]
pub struct Delete {
    pub id: i64,
}

impl Entity for Delete {
    fn name(&self) -> &'static str {
        "company"
    }

    fn build(&self, client: &Client, server: &str) -> Result<RequestBuilder, Error> {
        let id = require_id("company", self.id)?;
        Ok(client.delete(format!("{server}{V3}/companies/{id}.json")))
    }
}

/// Creates the company and reports the server-assigned ID.
pub async fn create(engine: &Engine, entity: &mut Create) -> Result<i64, Error> {
    let mut id = 0i64;
    let mut sink = |value: i64| id = value;
    engine
        .dispatch(entity, &mut [RequestOption::id_callback("id", &mut sink)])
        .await?;
    Ok(id)
}
