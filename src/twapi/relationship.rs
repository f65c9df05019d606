//! Shared reference types: polymorphic sideloaded relationships and the
//! three-class user/company/team ID groups.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::de;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use super::codec::LegacyNumber;

/// Polymorphic pointer to a sideloaded record: `{"id": 7, "type": "users"}`,
/// optionally with a `meta` payload.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relationship {
    #[serde(default)]
    pub id: i64,
    #[serde(rename = "type", default, skip_serializing_if = "String::is_empty")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<HashMap<String, serde_json::Value>>,
}

/// Same shape as [`Relationship`] but the legacy API serializes the ID as a
/// decimal string.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegacyRelationship {
    #[serde(default)]
    pub id: LegacyNumber,
    #[serde(rename = "type", default, skip_serializing_if = "String::is_empty")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<HashMap<String, serde_json::Value>>,
}

/// Assignee set split over the three principal classes, as the modern
/// endpoints expect it: a JSON object with one array per class.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserGroups {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub user_ids: Vec<i64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub company_ids: Vec<i64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub team_ids: Vec<i64>,
}

impl UserGroups {
    pub fn is_empty(&self) -> bool {
        self.user_ids.is_empty() && self.company_ids.is_empty() && self.team_ids.is_empty()
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum UserGroupsParseError {
    #[error("invalid user ID format: {0}")]
    InvalidUser(String),
    #[error("invalid company ID format: {0}")]
    InvalidCompany(String),
    #[error("invalid team ID format: {0}")]
    InvalidTeam(String),
}

/// The same three classes in the legacy single-string encoding: users as bare
/// numbers, companies prefixed `c`, teams prefixed `t`, comma-joined in that
/// class order (`"1,2,c5,t9"`).
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LegacyUserGroups {
    pub user_ids: Vec<i64>,
    pub company_ids: Vec<i64>,
    pub team_ids: Vec<i64>,
}

impl LegacyUserGroups {
    pub fn is_empty(&self) -> bool {
        self.user_ids.is_empty() && self.company_ids.is_empty() && self.team_ids.is_empty()
    }
}

impl From<UserGroups> for LegacyUserGroups {
    fn from(groups: UserGroups) -> Self {
        Self {
            user_ids: groups.user_ids,
            company_ids: groups.company_ids,
            team_ids: groups.team_ids,
        }
    }
}

impl fmt::Display for LegacyUserGroups {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        let mut write = |token: String, f: &mut fmt::Formatter<'_>| -> fmt::Result {
            if !first {
                f.write_str(",")?;
            }
            first = false;
            f.write_str(&token)
        };
        for id in &self.user_ids {
            write(id.to_string(), f)?;
        }
        for id in &self.company_ids {
            write(format!("c{id}"), f)?;
        }
        for id in &self.team_ids {
            write(format!("t{id}"), f)?;
        }
        Ok(())
    }
}

impl FromStr for LegacyUserGroups {
    type Err = UserGroupsParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut groups = LegacyUserGroups::default();
        for token in s.split(',') {
            // Empty tokens are tolerated; a bare class prefix is not.
            if token.is_empty() {
                continue;
            }
            if let Some(rest) = token.strip_prefix('c') {
                let id = rest
                    .parse()
                    .map_err(|_| UserGroupsParseError::InvalidCompany(token.to_string()))?;
                groups.company_ids.push(id);
            } else if let Some(rest) = token.strip_prefix('t') {
                let id = rest
                    .parse()
                    .map_err(|_| UserGroupsParseError::InvalidTeam(token.to_string()))?;
                groups.team_ids.push(id);
            } else {
                let id = token
                    .parse()
                    .map_err(|_| UserGroupsParseError::InvalidUser(token.to_string()))?;
                groups.user_ids.push(id);
            }
        }
        Ok(groups)
    }
}

impl Serialize for LegacyUserGroups {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for LegacyUserGroups {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}
