//! MCP tool for the read-only industry catalog.

use rmcp::{
    ErrorData as McpError, handler::server::router::tool::ToolRouter, model::CallToolResult, tool,
    tool_router,
};
use serde_json::json;

use crate::mcp::server::TeamworkMcp;
use crate::twapi::industry;

use super::{json_result, map_engine_error};

pub(crate) fn router() -> ToolRouter<TeamworkMcp> {
    TeamworkMcp::industries_tool_router()
}

#[tool_router(router = industries_tool_router)]
impl TeamworkMcp {
    #[tool(
        name = "retrieve-industries",
        description = "List the industry catalog used to classify companies."
    )]
    pub async fn retrieve_industries(&self) -> Result<CallToolResult, McpError> {
        let mut entity = industry::Multiple::default();
        self.engine()
            .dispatch(&mut entity, &mut [])
            .await
            .map_err(map_engine_error)?;

        json_result(&json!({"industries": entity.industries}))
    }
}
