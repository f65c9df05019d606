//! MCP tools for milestone management.

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
use crate::twapi::milestone;
use crate::twapi::relationship::{LegacyUserGroups, UserGroups};

use super::{json_result, map_engine_error, page_filters, parse_scalar, text_result};

pub(crate) fn router() -> ToolRouter<TeamworkMcp> {
    TeamworkMcp::milestones_tool_router()
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub struct RetrieveMilestonesParams {
    #[schemars(description = "Filter milestones by name")]
    pub search_term: Option<String>,
    #[schemars(description = "Page number, starting at 1")]
    pub page: Option<i64>,
    #[schemars(description = "Number of milestones per page")]
    pub page_size: Option<i64>,
    #[schemars(description = "Only milestones carrying these tag IDs")]
    pub tag_ids: Option<Vec<i64>>,
    #[schemars(description = "Require every listed tag instead of any")]
    pub match_all_tags: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub struct RetrieveProjectMilestonesParams {
    #[schemars(description = "Project ID to list milestones from")]
    pub project_id: i64,
    #[schemars(description = "Filter milestones by name")]
    pub search_term: Option<String>,
    #[schemars(description = "Page number, starting at 1")]
    pub page: Option<i64>,
    #[schemars(description = "Number of milestones per page")]
    pub page_size: Option<i64>,
    #[schemars(description = "Only milestones carrying these tag IDs")]
    pub tag_ids: Option<Vec<i64>>,
    #[schemars(description = "Require every listed tag instead of any")]
    pub match_all_tags: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub struct RetrieveMilestoneParams {
    #[schemars(description = "Milestone ID")]
    pub milestone_id: i64,
}

#[derive(Debug, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub struct MilestoneAssignees {
    #[schemars(description = "User IDs responsible for the milestone")]
    pub user_ids: Option<Vec<i64>>,
    #[schemars(description = "Company IDs responsible for the milestone")]
    pub company_ids: Option<Vec<i64>>,
    #[schemars(description = "Team IDs responsible for the milestone")]
    pub team_ids: Option<Vec<i64>>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub struct CreateMilestoneParams {
    #[schemars(description = "Project the milestone belongs to")]
    pub project_id: i64,
    #[schemars(description = "Milestone name")]
    pub name: String,
    #[schemars(description = "Milestone description")]
    pub description: Option<String>,
    #[schemars(description = "Due date in compact YYYYMMDD form, e.g. 20251231")]
    pub due_date: String,
    #[schemars(description = "Tasklist IDs to attach to the milestone")]
    pub tasklist_ids: Option<Vec<i64>>,
    #[schemars(description = "Tag IDs to attach to the milestone")]
    pub tag_ids: Option<Vec<i64>>,
    #[schemars(description = "Responsible users, companies and teams; at least one is required")]
    pub assignees: MilestoneAssignees,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub struct UpdateMilestoneParams {
    #[schemars(description = "Milestone ID to update")]
    pub milestone_id: i64,
    #[schemars(description = "Milestone name")]
    pub name: String,
    #[schemars(description = "Milestone description")]
    pub description: Option<String>,
    #[schemars(description = "Due date in compact YYYYMMDD form, e.g. 20251231")]
    pub due_date: String,
    #[schemars(description = "Tasklist IDs to attach to the milestone")]
    pub tasklist_ids: Option<Vec<i64>>,
    #[schemars(description = "Tag IDs to attach to the milestone")]
    pub tag_ids: Option<Vec<i64>>,
    #[schemars(description = "Responsible users, companies and teams; at least one is required")]
    pub assignees: MilestoneAssignees,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub struct DeleteMilestoneParams {
    #[schemars(description = "Milestone ID to delete")]
    pub milestone_id: i64,
}

fn responsible_parties(assignees: MilestoneAssignees) -> LegacyUserGroups {
    LegacyUserGroups::from(UserGroups {
        user_ids: assignees.user_ids.unwrap_or_default(),
        company_ids: assignees.company_ids.unwrap_or_default(),
        team_ids: assignees.team_ids.unwrap_or_default(),
    })
}

#[tool_router(router = milestones_tool_router)]
impl TeamworkMcp {
    #[tool(
        name = "retrieve-milestones",
        description = "List milestones across all projects. Supports name search, tag filters and pagination."
    )]
    pub async fn retrieve_milestones(
        &self,
        params: Parameters<RetrieveMilestonesParams>,
    ) -> Result<CallToolResult, McpError> {
        let mut entity = milestone::Multiple {
            project_id: None,
            filters: milestone::Filters {
                page: page_filters(params.0.search_term, params.0.page, params.0.page_size),
                tag_ids: params.0.tag_ids.unwrap_or_default(),
                match_all_tags: params.0.match_all_tags,
            },
            ..Default::default()
        };
        self.engine()
            .dispatch(&mut entity, &mut [])
            .await
            .map_err(map_engine_error)?;

        json_result(&json!({"milestones": entity.milestones, "meta": entity.meta}))
    }

    #[tool(
        name = "retrieve-project-milestones",
        description = "List the milestones of one project."
    )]
    pub async fn retrieve_project_milestones(
        &self,
        params: Parameters<RetrieveProjectMilestonesParams>,
    ) -> Result<CallToolResult, McpError> {
        let mut entity = milestone::Multiple {
            project_id: Some(params.0.project_id),
            filters: milestone::Filters {
                page: page_filters(params.0.search_term, params.0.page, params.0.page_size),
                tag_ids: params.0.tag_ids.unwrap_or_default(),
                match_all_tags: params.0.match_all_tags,
            },
            ..Default::default()
        };
        self.engine()
            .dispatch(&mut entity, &mut [])
            .await
            .map_err(map_engine_error)?;

        json_result(&json!({"milestones": entity.milestones, "meta": entity.meta}))
    }

    #[tool(
        name = "retrieve-milestone",
        description = "Get a single milestone by ID with its tasklists, tags and responsible parties."
    )]
    pub async fn retrieve_milestone(
        &self,
        params: Parameters<RetrieveMilestoneParams>,
    ) -> Result<CallToolResult, McpError> {
        let mut entity = milestone::Single::new(params.0.milestone_id);
        self.engine()
            .dispatch(&mut entity, &mut [])
            .await
            .map_err(map_engine_error)?;

        json_result(&entity.milestone)
    }

    #[tool(
        name = "create-milestone",
        description = "Create a milestone in a project. At least one responsible user, company or team is required."
    )]
    pub async fn create_milestone(
        &self,
        params: Parameters<CreateMilestoneParams>,
    ) -> Result<CallToolResult, McpError> {
        let mut entity = milestone::Create {
            project_id: params.0.project_id,
            milestone: milestone::CreateBody {
                title: params.0.name,
                description: params.0.description,
                deadline: parse_scalar("due-date", &params.0.due_date)?,
                tasklist_ids: params.0.tasklist_ids.unwrap_or_default(),
                tag_ids: params.0.tag_ids.unwrap_or_default(),
                responsible_parties: responsible_parties(params.0.assignees),
            },
        };
        let id = milestone::create(self.engine(), &mut entity)
            .await
            .map_err(map_engine_error)?;
        debug!(id, "milestone created");

        text_result("Milestone created successfully".to_string())
    }

    #[tool(
        name = "update-milestone",
        description = "Update a milestone. The full field set is written; at least one responsible party is required."
    )]
    pub async fn update_milestone(
        &self,
        params: Parameters<UpdateMilestoneParams>,
    ) -> Result<CallToolResult, McpError> {
        let mut entity = milestone::Update {
            id: params.0.milestone_id,
            milestone: milestone::CreateBody {
                title: params.0.name,
                description: params.0.description,
                deadline: parse_scalar("due-date", &params.0.due_date)?,
                tasklist_ids: params.0.tasklist_ids.unwrap_or_default(),
                tag_ids: params.0.tag_ids.unwrap_or_default(),
                responsible_parties: responsible_parties(params.0.assignees),
            },
        };
        self.engine()
            .dispatch(&mut entity, &mut [])
            .await
            .map_err(map_engine_error)?;

        text_result("Milestone updated successfully".to_string())
    }

    #[tool(name = "delete-milestone", description = "Delete a milestone permanently.")]
    pub async fn delete_milestone(
        &self,
        params: Parameters<DeleteMilestoneParams>,
    ) -> Result<CallToolResult, McpError> {
        let mut entity = milestone::Delete {
            id: params.0.milestone_id,
        };
        self.engine()
            .dispatch(&mut entity, &mut [])
            .await
            .map_err(map_engine_error)?;

        text_result(format!(
            "Milestone {} deleted successfully",
            params.0.milestone_id
        ))
    }
}
