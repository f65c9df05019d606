//! Workload entities: a time-window capacity report over a set of users.
//! Read-only; the date range is mandatory.

use std::collections::BTreeMap;

use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, Serialize};

use super::codec::Date;
use super::{Entity, Error, Meta, QueryPairs, V3};

/// Per-day capacity entry for one user.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DateEntry {
    pub capacity_minutes: i64,
    pub allocated_minutes: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unavailable: Option<bool>,
}

/// One user's slice of the report. The per-day map is keyed by [`Date`] in
/// its plain-text form, which is why the scalar codecs double as map keys.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserWorkload {
    pub user_id: i64,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub date_entries: BTreeMap<Date, DateEntry>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Workload {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub users: Vec<UserWorkload>,
}

#[derive(Debug, Default, Clone)]
pub struct Filters {
    pub start_date: Date,
    pub end_date: Date,
    pub user_ids: Vec<i64>,
    pub page: i64,
    pub page_size: i64,
}

/// `GET /projects/api/v3/workload`. `omitEmptyDateEntries` is always sent to
/// keep responses small.
#[derive(Debug, Default)]
pub struct Multiple {
    pub filters: Filters,
    pub workload: Workload,
    pub meta: Meta,
}

#[derive(Deserialize)]
struct MultipleEnvelope {
    #[serde(default)]
    workload: Workload,
    #[serde(default)]
    meta: Meta,
}

impl Entity for Multiple {
    fn name(&self) -> &'static str {
        "workload"
    }

    fn build(&self, client: &Client, server: &str) -> Result<RequestBuilder, Error> {
        let mut query = QueryPairs::new();
        query.push("endDate", self.filters.end_date);
        query.push("omitEmptyDateEntries", true);
        query.push_page(self.filters.page, self.filters.page_size);
        query.push("startDate", self.filters.start_date);
        query.push_list("userIds", &self.filters.user_ids);
        Ok(query.apply(client.get(format!("{server}{V3}/workload"))))
    }

    fn decode(&mut self, body: &[u8]) -> Result<(), Error> {
        let envelope: MultipleEnvelope =
            serde_json::from_slice(body).map_err(|e| Error::decode("workload", e))?;
        self.workload = envelope.workload;
        self.meta = envelope.meta;
        Ok(())
    }
}
