//! MCP tools for tasklist management.

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
use tracing::debug;

use crate::mcp::server::TeamworkMcp;
use crate::twapi::tasklist;

use super::{json_result, map_engine_error, page_filters, text_result};

pub(crate) fn router() -> ToolRouter<TeamworkMcp> {
    TeamworkMcp::tasklists_tool_router()
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub struct RetrieveTasklistsParams {
    #[schemars(description = "Filter tasklists by name")]
    pub search_term: Option<String>,
    #[schemars(description = "Page number, starting at 1")]
    pub page: Option<i64>,
    #[schemars(description = "Number of tasklists per page")]
    pub page_size: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub struct RetrieveProjectTasklistsParams {
    #[schemars(description = "Project ID to list tasklists from")]
    pub project_id: i64,
    #[schemars(description = "Filter tasklists by name")]
    pub search_term: Option<String>,
    #[schemars(description = "Page number, starting at 1")]
    pub page: Option<i64>,
    #[schemars(description = "Number of tasklists per page")]
    pub page_size: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub struct RetrieveTasklistParams {
    #[schemars(description = "Tasklist ID")]
    pub tasklist_id: i64,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub struct CreateTasklistParams {
    #[schemars(description = "Project the tasklist belongs to")]
    pub project_id: i64,
    #[schemars(description = "Tasklist name")]
    pub name: String,
    #[schemars(description = "Tasklist description")]
    pub description: Option<String>,
    #[schemars(description = "Milestone to attach the tasklist to")]
    pub milestone_id: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub struct UpdateTasklistParams {
    #[schemars(description = "Tasklist ID to update")]
    pub tasklist_id: i64,
    #[schemars(description = "Tasklist name")]
    pub name: String,
    #[schemars(description = "Tasklist description")]
    pub description: Option<String>,
    #[schemars(description = "Milestone to attach the tasklist to")]
    pub milestone_id: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub struct DeleteTasklistParams {
    #[schemars(description = "Tasklist ID to delete")]
    pub tasklist_id: i64,
}

#[tool_router(router = tasklists_tool_router)]
impl TeamworkMcp {
    #[tool(
        name = "retrieve-tasklists",
        description = "List tasklists across all projects. Supports name search and pagination."
    )]
    pub async fn retrieve_tasklists(
        &self,
        params: Parameters<RetrieveTasklistsParams>,
    ) -> Result<CallToolResult, McpError> {
        let mut entity = tasklist::Multiple {
            project_id: None,
            filters: page_filters(params.0.search_term, params.0.page, params.0.page_size),
            ..Default::default()
        };
        self.engine()
            .dispatch(&mut entity, &mut [])
            .await
            .map_err(map_engine_error)?;

        json_result(&json!({"tasklists": entity.tasklists, "meta": entity.meta}))
    }

    #[tool(
        name = "retrieve-project-tasklists",
        description = "List the tasklists of one project."
    )]
    pub async fn retrieve_project_tasklists(
        &self,
        params: Parameters<RetrieveProjectTasklistsParams>,
    ) -> Result<CallToolResult, McpError> {
        let mut entity = tasklist::Multiple {
            project_id: Some(params.0.project_id),
            filters: page_filters(params.0.search_term, params.0.page, params.0.page_size),
            ..Default::default()
        };
        self.engine()
            .dispatch(&mut entity, &mut [])
            .await
            .map_err(map_engine_error)?;

        json_result(&json!({"tasklists": entity.tasklists, "meta": entity.meta}))
    }

    #[tool(name = "retrieve-tasklist", description = "Get a single tasklist by ID.")]
    pub async fn retrieve_tasklist(
        &self,
        params: Parameters<RetrieveTasklistParams>,
    ) -> Result<CallToolResult, McpError> {
        let mut entity = tasklist::Single::new(params.0.tasklist_id);
        self.engine()
            .dispatch(&mut entity, &mut [])
            .await
            .map_err(map_engine_error)?;

        json_result(&entity.tasklist)
    }

    #[tool(name = "create-tasklist", description = "Create a tasklist in a project.")]
    pub async fn create_tasklist(
        &self,
        params: Parameters<CreateTasklistParams>,
    ) -> Result<CallToolResult, McpError> {
        let mut entity = tasklist::Create {
            project_id: params.0.project_id,
            tasklist: tasklist::CreateBody {
                name: params.0.name,
                description: params.0.description,
                milestone_id: params.0.milestone_id,
            },
        };
        let id = tasklist::create(self.engine(), &mut entity)
            .await
            .map_err(map_engine_error)?;
        debug!(id, "tasklist created");

        text_result(format!("Tasklist {id} created successfully"))
    }

    #[tool(
        name = "update-tasklist",
        description = "Update a tasklist. The full field set is written."
    )]
    pub async fn update_tasklist(
        &self,
        params: Parameters<UpdateTasklistParams>,
    ) -> Result<CallToolResult, McpError> {
        let mut entity = tasklist::Update {
            id: params.0.tasklist_id,
            tasklist: tasklist::CreateBody {
                name: params.0.name,
                description: params.0.description,
                milestone_id: params.0.milestone_id,
            },
        };
        self.engine()
            .dispatch(&mut entity, &mut [])
            .await
            .map_err(map_engine_error)?;

        text_result(format!(
            "Tasklist {} updated successfully",
            params.0.tasklist_id
        ))
    }

    #[tool(name = "delete-tasklist", description = "Delete a tasklist permanently.")]
    pub async fn delete_tasklist(
        &self,
        params: Parameters<DeleteTasklistParams>,
    ) -> Result<CallToolResult, McpError> {
        let mut entity = tasklist::Delete {
            id: params.0.tasklist_id,
        };
        self.engine()
            .dispatch(&mut entity, &mut [])
            .await
            .map_err(map_engine_error)?;

        text_result(format!(
            "Tasklist {} deleted successfully",
            params.0.tasklist_id
        ))
    }
}
