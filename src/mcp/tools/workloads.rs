//! MCP tool for the workload capacity report.

use rmcp::{
    ErrorData as McpError,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::CallToolResult,
    schemars,
    schemars::JsonSchema,
    tool, tool_router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::mcp::server::TeamworkMcp;
use crate::twapi::workload;

use super::{json_result, map_engine_error, parse_scalar};

pub(crate) fn router() -> ToolRouter<TeamworkMcp> {
    TeamworkMcp::workloads_tool_router()
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub struct RetrieveWorkloadParams {
    #[schemars(description = "First day of the report window, YYYY-MM-DD")]
    pub start_date: String,
    #[schemars(description = "Last day of the report window, YYYY-MM-DD")]
    pub end_date: String,
    #[schemars(description = "Restrict the report to these user IDs")]
    pub user_ids: Option<Vec<i64>>,
    #[schemars(description = "Page number, starting at 1")]
    pub page: Option<i64>,
    #[schemars(description = "Number of users per page")]
    pub page_size: Option<i64>,
}

#[tool_router(router = workloads_tool_router)]
impl TeamworkMcp {
    #[tool(
        name = "retrieve-workload",
        description = "Report per-user, per-day capacity and allocated minutes over a date range."
    )]
    pub async fn retrieve_workload(
        &self,
        params: Parameters<RetrieveWorkloadParams>,
    ) -> Result<CallToolResult, McpError> {
        let mut entity = workload::Multiple {
            filters: workload::Filters {
                start_date: parse_scalar("start-date", &params.0.start_date)?,
                end_date: parse_scalar("end-date", &params.0.end_date)?,
                user_ids: params.0.user_ids.unwrap_or_default(),
                page: params.0.page.unwrap_or(0),
                page_size: params.0.page_size.unwrap_or(0),
            },
            ..Default::default()
        };
        self.engine()
            .dispatch(&mut entity, &mut [])
            .await
            .map_err(map_engine_error)?;

        json_result(&json!({"workload": entity.workload, "meta": entity.meta}))
    }
}
