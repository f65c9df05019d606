//! MCP tools for job-role management, including user assignment.

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
use crate::twapi::jobrole;

use super::{json_result, map_engine_error, page_filters, text_result};

pub(crate) fn router() -> ToolRouter<TeamworkMcp> {
    TeamworkMcp::jobroles_tool_router()
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub struct RetrieveJobRolesParams {
    #[schemars(description = "Filter job roles by name")]
    pub search_term: Option<String>,
    #[schemars(description = "Page number, starting at 1")]
    pub page: Option<i64>,
    #[schemars(description = "Number of job roles per page")]
    pub page_size: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub struct RetrieveJobRoleParams {
    #[schemars(description = "Job role ID")]
    pub jobrole_id: i64,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub struct CreateJobRoleParams {
    #[schemars(description = "Job role name")]
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub struct UpdateJobRoleParams {
    #[schemars(description = "Job role ID to update")]
    pub jobrole_id: i64,
    #[schemars(description = "Job role name")]
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub struct DeleteJobRoleParams {
    #[schemars(description = "Job role ID to delete")]
    pub jobrole_id: i64,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub struct JobRoleUsersParams {
    #[schemars(description = "Job role ID")]
    pub jobrole_id: i64,
    #[schemars(description = "User IDs to assign or unassign")]
    pub user_ids: Vec<i64>,
}

#[tool_router(router = jobroles_tool_router)]
impl TeamworkMcp {
    #[tool(
        name = "retrieve-jobroles",
        description = "List job roles. Supports name search and pagination."
    )]
    pub async fn retrieve_jobroles(
        &self,
        params: Parameters<RetrieveJobRolesParams>,
    ) -> Result<CallToolResult, McpError> {
        let mut entity = jobrole::Multiple {
            filters: page_filters(params.0.search_term, params.0.page, params.0.page_size),
            ..Default::default()
        };
        self.engine()
            .dispatch(&mut entity, &mut [])
            .await
            .map_err(map_engine_error)?;

        json_result(&json!({"jobroles": entity.jobroles, "meta": entity.meta}))
    }

    #[tool(
        name = "retrieve-jobrole",
        description = "Get a single job role by ID with its assigned users."
    )]
    pub async fn retrieve_jobrole(
        &self,
        params: Parameters<RetrieveJobRoleParams>,
    ) -> Result<CallToolResult, McpError> {
        let mut entity = jobrole::Single::new(params.0.jobrole_id);
        self.engine()
            .dispatch(&mut entity, &mut [])
            .await
            .map_err(map_engine_error)?;

        json_result(&entity.jobrole)
    }

    #[tool(name = "create-jobrole", description = "Create a job role.")]
    pub async fn create_jobrole(
        &self,
        params: Parameters<CreateJobRoleParams>,
    ) -> Result<CallToolResult, McpError> {
        let mut entity = jobrole::Create {
            jobrole: jobrole::CreateBody {
                name: params.0.name,
            },
        };
        let id = jobrole::create(self.engine(), &mut entity)
            .await
            .map_err(map_engine_error)?;
        debug!(id, "job role created");

        text_result(format!("Job role {id} created successfully"))
    }

    #[tool(name = "update-jobrole", description = "Rename a job role.")]
    pub async fn update_jobrole(
        &self,
        params: Parameters<UpdateJobRoleParams>,
    ) -> Result<CallToolResult, McpError> {
        let mut entity = jobrole::Update {
            id: params.0.jobrole_id,
            jobrole: jobrole::CreateBody {
                name: params.0.name,
            },
        };
        self.engine()
            .dispatch(&mut entity, &mut [])
            .await
            .map_err(map_engine_error)?;

        text_result(format!(
            "Job role {} updated successfully",
            params.0.jobrole_id
        ))
    }

    #[tool(name = "delete-jobrole", description = "Delete a job role permanently.")]
    pub async fn delete_jobrole(
        &self,
        params: Parameters<DeleteJobRoleParams>,
    ) -> Result<CallToolResult, McpError> {
        let mut entity = jobrole::Delete {
            id: params.0.jobrole_id,
        };
        self.engine()
            .dispatch(&mut entity, &mut [])
            .await
            .map_err(map_engine_error)?;

        text_result(format!(
            "Job role {} deleted successfully",
            params.0.jobrole_id
        ))
    }

    #[tool(
        name = "assign-jobrole-users",
        description = "Assign a set of users to a job role. At least one user ID is required."
    )]
    pub async fn assign_jobrole_users(
        &self,
        params: Parameters<JobRoleUsersParams>,
    ) -> Result<CallToolResult, McpError> {
        let mut entity = jobrole::AssignUsers {
            id: params.0.jobrole_id,
            user_ids: params.0.user_ids,
        };
        self.engine()
            .dispatch(&mut entity, &mut [])
            .await
            .map_err(map_engine_error)?;

        text_result(format!(
            "Users assigned to job role {} successfully",
            params.0.jobrole_id
        ))
    }

    #[tool(
        name = "unassign-jobrole-users",
        description = "Remove a set of users from a job role. At least one user ID is required."
    )]
    pub async fn unassign_jobrole_users(
        &self,
        params: Parameters<JobRoleUsersParams>,
    ) -> Result<CallToolResult, McpError> {
        let mut entity = jobrole::UnassignUsers {
            id: params.0.jobrole_id,
            user_ids: params.0.user_ids,
        };
        self.engine()
            .dispatch(&mut entity, &mut [])
            .await
            .map_err(map_engine_error)?;

        text_result(format!(
            "Users removed from job role {} successfully",
            params.0.jobrole_id
        ))
    }
}
