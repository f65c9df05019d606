//! MCP tools for team management.

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
use crate::twapi::codec::{LegacyNumber, LegacyNumericList};
use crate::twapi::team;

use super::{json_result, map_engine_error, text_result};

pub(crate) fn router() -> ToolRouter<TeamworkMcp> {
    TeamworkMcp::teams_tool_router()
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub struct RetrieveTeamParams {
    #[schemars(description = "Team ID")]
    pub team_id: i64,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub struct CreateTeamParams {
    #[schemars(description = "Team name")]
    pub name: String,
    #[schemars(description = "Team description")]
    pub description: Option<String>,
    #[schemars(description = "Mention handle, without the @")]
    pub handle: Option<String>,
    #[schemars(description = "Parent team for nested teams")]
    pub parent_team_id: Option<i64>,
    #[schemars(description = "Company the team belongs to")]
    pub company_id: Option<i64>,
    #[schemars(description = "Project the team is scoped to")]
    pub project_id: Option<i64>,
    #[schemars(description = "User IDs of the team members")]
    pub user_ids: Option<Vec<i64>>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub struct UpdateTeamParams {
    #[schemars(description = "Team ID to update")]
    pub team_id: i64,
    #[schemars(description = "Team name")]
    pub name: String,
    #[schemars(description = "Team description")]
    pub description: Option<String>,
    #[schemars(description = "Mention handle, without the @")]
    pub handle: Option<String>,
    #[schemars(description = "Parent team for nested teams")]
    pub parent_team_id: Option<i64>,
    #[schemars(description = "Company the team belongs to")]
    pub company_id: Option<i64>,
    #[schemars(description = "Project the team is scoped to")]
    pub project_id: Option<i64>,
    #[schemars(description = "User IDs of the team members")]
    pub user_ids: Option<Vec<i64>>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub struct DeleteTeamParams {
    #[schemars(description = "Team ID to delete")]
    pub team_id: i64,
}

fn team_body(params: CreateTeamParams) -> team::CreateBody {
    team::CreateBody {
        name: params.name,
        description: params.description,
        handle: params.handle,
        parent_team_id: params.parent_team_id.map(LegacyNumber),
        company_id: params.company_id.map(LegacyNumber),
        project_id: params.project_id.map(LegacyNumber),
        member_ids: params.user_ids.map(LegacyNumericList),
    }
}

#[tool_router(router = teams_tool_router)]
impl TeamworkMcp {
    #[tool(name = "retrieve-teams", description = "List every team on the installation.")]
    pub async fn retrieve_teams(&self) -> Result<CallToolResult, McpError> {
        let mut entity = team::Multiple::default();
        self.engine()
            .dispatch(&mut entity, &mut [])
            .await
            .map_err(map_engine_error)?;

        json_result(&json!({"teams": entity.teams}))
    }

    #[tool(
        name = "retrieve-team",
        description = "Get a single team by ID with its members and parent."
    )]
    pub async fn retrieve_team(
        &self,
        params: Parameters<RetrieveTeamParams>,
    ) -> Result<CallToolResult, McpError> {
        let mut entity = team::Single::new(params.0.team_id);
        self.engine()
            .dispatch(&mut entity, &mut [])
            .await
            .map_err(map_engine_error)?;

        json_result(&entity.team)
    }

    #[tool(name = "create-team", description = "Create a team.")]
    pub async fn create_team(
        &self,
        params: Parameters<CreateTeamParams>,
    ) -> Result<CallToolResult, McpError> {
        let mut entity = team::Create {
            team: team_body(params.0),
        };
        let id = team::create(self.engine(), &mut entity)
            .await
            .map_err(map_engine_error)?;
        debug!(id, "team created");

        text_result(format!("Team {id} created successfully"))
    }

    #[tool(name = "update-team", description = "Update a team. The full field set is written.")]
    pub async fn update_team(
        &self,
        params: Parameters<UpdateTeamParams>,
    ) -> Result<CallToolResult, McpError> {
        let team_id = params.0.team_id;
        let mut entity = team::Update {
            id: team_id,
            team: team::CreateBody {
                name: params.0.name,
                description: params.0.description,
                handle: params.0.handle,
                parent_team_id: params.0.parent_team_id.map(LegacyNumber),
                company_id: params.0.company_id.map(LegacyNumber),
                project_id: params.0.project_id.map(LegacyNumber),
                member_ids: params.0.user_ids.map(LegacyNumericList),
            },
        };
        self.engine()
            .dispatch(&mut entity, &mut [])
            .await
            .map_err(map_engine_error)?;

        text_result(format!("Team {team_id} updated successfully"))
    }

    #[tool(name = "delete-team", description = "Delete a team permanently.")]
    pub async fn delete_team(
        &self,
        params: Parameters<DeleteTeamParams>,
    ) -> Result<CallToolResult, McpError> {
        let mut entity = team::Delete {
            id: params.0.team_id,
        };
        self.engine()
            .dispatch(&mut entity, &mut [])
            .await
            .map_err(map_engine_error)?;

        text_result(format!("Team {} deleted successfully", params.0.team_id))
    }
}
