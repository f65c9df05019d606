//! MCP tool implementations, one module per Teamwork domain.
//!
//! Each module contributes a named `#[tool_router]` impl block on
//! [`TeamworkMcp`](super::server::TeamworkMcp); [`router`] combines them into
//! the single router the server dispatches against. Shared helpers for error
//! mapping and parameter coercion live here.

use std::str::FromStr;

use rmcp::ErrorData as McpError;
use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::model::{CallToolResult, Content};
use serde::Serialize;

use crate::twapi::{self, PageFilters};

use super::server::TeamworkMcp;

mod companies;
mod industries;
mod jobroles;
mod milestones;
mod people;
mod projects;
mod skills;
mod tags;
mod tasklists;
mod tasks;
mod teams;
mod timelogs;
mod workloads;

#[cfg(test)]
mod milestones_test;
#[cfg(test)]
mod timelogs_test;

/// The combined router over every domain's tools.
pub(crate) fn router() -> ToolRouter<TeamworkMcp> {
    companies::router()
        + industries::router()
        + jobroles::router()
        + milestones::router()
        + people::router()
        + projects::router()
        + skills::router()
        + tags::router()
        + tasklists::router()
        + tasks::router()
        + teams::router()
        + timelogs::router()
        + workloads::router()
}

/// Maps an engine error onto the MCP error taxonomy: parameter validation
/// failures are the caller's fault, everything else is internal.
pub(crate) fn map_engine_error(error: twapi::Error) -> McpError {
    match &error {
        twapi::Error::InvalidParameters(_) => McpError::invalid_params(error.to_string(), None),
        _ => McpError::internal_error(error.to_string(), None),
    }
}

/// Renders a serializable value as a single pretty-printed JSON text block.
pub(crate) fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(e.to_string(), None))?;
    Ok(CallToolResult::success(vec![Content::text(text)]))
}

pub(crate) fn text_result(text: String) -> Result<CallToolResult, McpError> {
    Ok(CallToolResult::success(vec![Content::text(text)]))
}

/// Parses a textual scalar parameter (dates, times) and reports a parse
/// failure against the parameter name.
pub(crate) fn parse_scalar<T: FromStr>(name: &str, value: &str) -> Result<T, McpError> {
    value
        .parse()
        .map_err(|_| McpError::invalid_params(format!("invalid {name}"), None))
}

/// Optional flavor of [`parse_scalar`].
pub(crate) fn parse_scalar_opt<T: FromStr>(
    name: &str,
    value: Option<&str>,
) -> Result<Option<T>, McpError> {
    value.map(|v| parse_scalar(name, v)).transpose()
}

/// Assembles the common pagination filters; absent values stay zero so the
/// query builder omits them.
pub(crate) fn page_filters(
    search_term: Option<String>,
    page: Option<i64>,
    page_size: Option<i64>,
) -> PageFilters {
    PageFilters {
        search_term,
        page: page.unwrap_or(0),
        page_size: page_size.unwrap_or(0),
    }
}
