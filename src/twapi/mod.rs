//! Typed client for the Teamwork.com REST API.
//!
//! Two generations of the upstream API coexist behind one installation URL:
//! the modern v3 endpoints under `/projects/api/v3/` and the legacy v1
//! endpoints at the root (`/milestones.json`, `/teams.json`, ...). The legacy
//! generation encodes dates as compact `YYYYMMDD` strings, integers as JSON
//! strings and assignee lists as a single `N`/`cN`/`tN` comma-joined token
//! string; those codecs live in [`codec`] and [`relationship`].
//!
//! Each domain module (e.g. [`milestone`]) exposes up to five request
//! entities — `Single`, `Multiple`, `Create`, `Update`, `Delete` — that
//! implement [`Entity`] and carry the full wire knowledge for one endpoint.
//! [`Engine::dispatch`] turns any of them into exactly one authenticated
//! HTTP round trip.

pub mod codec;
mod engine;
mod error;
pub mod relationship;

pub mod company;
pub mod industry;
pub mod jobrole;
pub mod milestone;
pub mod project;
pub mod skill;
pub mod tag;
pub mod task;
pub mod tasklist;
pub mod team;
pub mod timelog;
pub mod user;
pub mod workload;

#[cfg(test)]
mod codec_test;
#[cfg(test)]
mod engine_test;
#[cfg(test)]
mod milestone_test;
#[cfg(test)]
mod project_test;
#[cfg(test)]
mod relationship_test;
#[cfg(test)]
mod tasklist_test;

pub use engine::{Engine, Entity, RequestOption};
pub use error::Error;

use serde::{Deserialize, Serialize};

/// Path prefix shared by the modern-generation endpoints.
pub(crate) const V3: &str = "/projects/api/v3";

/// A zero ID means "not yet assigned" and never reaches the wire in an
/// update or delete request.
pub(crate) fn require_id(entity: &'static str, id: i64) -> Result<i64, Error> {
    if id <= 0 {
        return Err(Error::InvalidParameters(format!(
            "a positive {entity} ID is required"
        )));
    }
    Ok(id)
}

/// Pagination metadata returned by v3 list endpoints.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meta {
    #[serde(default)]
    pub page: MetaPage,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaPage {
    #[serde(default)]
    pub has_more: bool,
}

/// Query-string assembler enforcing the omit rules shared by every list
/// endpoint: unset, zero, empty and absent values take no wire slot.
#[derive(Debug, Default)]
pub(crate) struct QueryPairs(Vec<(&'static str, String)>);

impl QueryPairs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: &'static str, value: impl ToString) {
        self.0.push((key, value.to_string()));
    }

    /// Adds the parameter only when the value is present.
    pub fn push_opt(&mut self, key: &'static str, value: Option<impl ToString>) {
        if let Some(value) = value {
            self.0.push((key, value.to_string()));
        }
    }

    /// Adds the parameter only when the string is set and non-empty.
    pub fn push_str(&mut self, key: &'static str, value: Option<&str>) {
        if let Some(value) = value
            && !value.is_empty()
        {
            self.0.push((key, value.to_string()));
        }
    }

    /// Joins a numeric list with commas; an empty list takes no wire slot.
    pub fn push_list(&mut self, key: &'static str, values: &[i64]) {
        if !values.is_empty() {
            let joined = values
                .iter()
                .map(|v| v.to_string())
                .collect::<Vec<_>>()
                .join(",");
            self.0.push((key, joined));
        }
    }

    /// `page` and `pageSize` are only sent when strictly positive.
    pub fn push_page(&mut self, page: i64, page_size: i64) {
        if page > 0 {
            self.push("page", page);
        }
        if page_size > 0 {
            self.push("pageSize", page_size);
        }
    }

    pub fn apply(self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        if self.0.is_empty() {
            builder
        } else {
            builder.query(&self.0)
        }
    }
}

/// Common pagination and search filters shared by the v3 list entities.
#[derive(Debug, Default, Clone)]
pub struct PageFilters {
    pub search_term: Option<String>,
    pub page: i64,
    pub page_size: i64,
}

impl PageFilters {
    pub(crate) fn fill(&self, query: &mut QueryPairs) {
        query.push_page(self.page, self.page_size);
        query.push_str("searchTerm", self.search_term.as_deref());
    }
}
