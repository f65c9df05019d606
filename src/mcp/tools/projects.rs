//! MCP tools for project management.

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
use crate::twapi::project;

use super::{json_result, map_engine_error, page_filters, parse_scalar_opt, text_result};

pub(crate) fn router() -> ToolRouter<TeamworkMcp> {
    TeamworkMcp::projects_tool_router()
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub struct RetrieveProjectsParams {
    #[schemars(description = "Filter projects by name")]
    pub search_term: Option<String>,
    #[schemars(description = "Page number, starting at 1")]
    pub page: Option<i64>,
    #[schemars(description = "Number of projects per page")]
    pub page_size: Option<i64>,
    #[schemars(description = "Filter by status, e.g. 'active' or 'archived'")]
    pub status: Option<String>,
    #[schemars(description = "Only projects carrying these tag IDs")]
    pub tag_ids: Option<Vec<i64>>,
    #[schemars(description = "Require every listed tag instead of any")]
    pub match_all_tags: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub struct RetrieveProjectParams {
    #[schemars(description = "Project ID")]
    pub project_id: i64,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub struct CreateProjectParams {
    #[schemars(description = "Project name")]
    pub name: String,
    #[schemars(description = "Project description")]
    pub description: Option<String>,
    #[schemars(description = "Start date in compact YYYYMMDD form")]
    pub start_date: Option<String>,
    #[schemars(description = "End date in compact YYYYMMDD form")]
    pub end_date: Option<String>,
    #[schemars(description = "Owning company ID")]
    pub company_id: Option<i64>,
    #[schemars(description = "Tag IDs to attach to the project")]
    pub tag_ids: Option<Vec<i64>>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub struct UpdateProjectParams {
    #[schemars(description = "Project ID to update")]
    pub project_id: i64,
    #[schemars(description = "Project name")]
    pub name: String,
    #[schemars(description = "Project description")]
    pub description: Option<String>,
    #[schemars(description = "Start date in compact YYYYMMDD form")]
    pub start_date: Option<String>,
    #[schemars(description = "End date in compact YYYYMMDD form")]
    pub end_date: Option<String>,
    #[schemars(description = "Owning company ID")]
    pub company_id: Option<i64>,
    #[schemars(description = "Tag IDs to attach to the project")]
    pub tag_ids: Option<Vec<i64>>,
}

#[tool_router(router = projects_tool_router)]
impl TeamworkMcp {
    #[tool(
        name = "retrieve-projects",
        description = "List projects. Supports name search, status and tag filters, and pagination."
    )]
    pub async fn retrieve_projects(
        &self,
        params: Parameters<RetrieveProjectsParams>,
    ) -> Result<CallToolResult, McpError> {
        let mut entity = project::Multiple {
            filters: project::Filters {
                page: page_filters(params.0.search_term, params.0.page, params.0.page_size),
                tag_ids: params.0.tag_ids.unwrap_or_default(),
                match_all_tags: params.0.match_all_tags,
                status: params.0.status,
            },
            ..Default::default()
        };
        self.engine()
            .dispatch(&mut entity, &mut [])
            .await
            .map_err(map_engine_error)?;

        json_result(&json!({"projects": entity.projects, "meta": entity.meta}))
    }

    #[tool(
        name = "retrieve-project",
        description = "Get a single project by ID with its company, owner and tags."
    )]
    pub async fn retrieve_project(
        &self,
        params: Parameters<RetrieveProjectParams>,
    ) -> Result<CallToolResult, McpError> {
        let mut entity = project::Single::new(params.0.project_id);
        self.engine()
            .dispatch(&mut entity, &mut [])
            .await
            .map_err(map_engine_error)?;

        json_result(&entity.project)
    }

    #[tool(name = "create-project", description = "Create a new project.")]
    pub async fn create_project(
        &self,
        params: Parameters<CreateProjectParams>,
    ) -> Result<CallToolResult, McpError> {
        let mut entity = project::Create {
            project: project::CreateBody {
                name: params.0.name,
                description: params.0.description,
                start_date: parse_scalar_opt("start-date", params.0.start_date.as_deref())?,
                end_date: parse_scalar_opt("end-date", params.0.end_date.as_deref())?,
                company_id: params.0.company_id,
                tag_ids: params.0.tag_ids.unwrap_or_default(),
            },
        };
        let id = project::create(self.engine(), &mut entity)
            .await
            .map_err(map_engine_error)?;
        debug!(id, "project created");

        text_result(format!("Project {id} created successfully"))
    }

    #[tool(
        name = "update-project",
        description = "Update a project. The full field set is written."
    )]
    pub async fn update_project(
        &self,
        params: Parameters<UpdateProjectParams>,
    ) -> Result<CallToolResult, McpError> {
        let mut entity = project::Update {
            id: params.0.project_id,
            project: project::CreateBody {
                name: params.0.name,
                description: params.0.description,
                start_date: parse_scalar_opt("start-date", params.0.start_date.as_deref())?,
                end_date: parse_scalar_opt("end-date", params.0.end_date.as_deref())?,
                company_id: params.0.company_id,
                tag_ids: params.0.tag_ids.unwrap_or_default(),
            },
        };
        self.engine()
            .dispatch(&mut entity, &mut [])
            .await
            .map_err(map_engine_error)?;

        text_result(format!(
            "Project {} updated successfully",
            params.0.project_id
        ))
    }
}
