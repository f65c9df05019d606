//! MCP tools for timelog management.

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
use crate::twapi::timelog;

use super::{json_result, map_engine_error, page_filters, parse_scalar, parse_scalar_opt, text_result};

pub(crate) fn router() -> ToolRouter<TeamworkMcp> {
    TeamworkMcp::timelogs_tool_router()
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub struct RetrieveTimelogsParams {
    #[schemars(description = "Page number, starting at 1")]
    pub page: Option<i64>,
    #[schemars(description = "Number of timelogs per page")]
    pub page_size: Option<i64>,
    #[schemars(description = "Only timelogs on or after this date, YYYY-MM-DD")]
    pub start_date: Option<String>,
    #[schemars(description = "Only timelogs on or before this date, YYYY-MM-DD")]
    pub end_date: Option<String>,
    #[schemars(description = "True for billable entries only, false for non-billable only")]
    pub billable: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub struct RetrieveProjectTimelogsParams {
    #[schemars(description = "Project ID to list timelogs from")]
    pub project_id: i64,
    #[schemars(description = "Page number, starting at 1")]
    pub page: Option<i64>,
    #[schemars(description = "Number of timelogs per page")]
    pub page_size: Option<i64>,
    #[schemars(description = "Only timelogs on or after this date, YYYY-MM-DD")]
    pub start_date: Option<String>,
    #[schemars(description = "Only timelogs on or before this date, YYYY-MM-DD")]
    pub end_date: Option<String>,
    #[schemars(description = "True for billable entries only, false for non-billable only")]
    pub billable: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub struct RetrieveTaskTimelogsParams {
    #[schemars(description = "Task ID to list timelogs from")]
    pub task_id: i64,
    #[schemars(description = "Page number, starting at 1")]
    pub page: Option<i64>,
    #[schemars(description = "Number of timelogs per page")]
    pub page_size: Option<i64>,
    #[schemars(description = "Only timelogs on or after this date, YYYY-MM-DD")]
    pub start_date: Option<String>,
    #[schemars(description = "Only timelogs on or before this date, YYYY-MM-DD")]
    pub end_date: Option<String>,
    #[schemars(description = "True for billable entries only, false for non-billable only")]
    pub billable: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub struct RetrieveTimelogParams {
    #[schemars(description = "Timelog ID")]
    pub timelog_id: i64,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub struct CreateTimelogParams {
    #[schemars(description = "Project to charge the time to; exclusive with task-id")]
    pub project_id: Option<i64>,
    #[schemars(description = "Task to charge the time to; exclusive with project-id")]
    pub task_id: Option<i64>,
    #[schemars(description = "What the time was spent on")]
    pub description: Option<String>,
    #[schemars(description = "Date the time was logged, YYYY-MM-DD")]
    pub date: String,
    #[schemars(description = "Clock time the work started, HH:MM:SS")]
    pub time: Option<String>,
    #[schemars(description = "Hours spent")]
    pub hours: i64,
    #[schemars(description = "Minutes spent on top of the hours")]
    pub minutes: i64,
    #[schemars(description = "Whether the time is billable")]
    pub billable: Option<bool>,
    #[schemars(description = "User the time belongs to; defaults to the token owner")]
    pub user_id: Option<i64>,
    #[schemars(description = "Tag IDs to attach to the timelog")]
    pub tag_ids: Option<Vec<i64>>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub struct UpdateTimelogParams {
    #[schemars(description = "Timelog ID to update")]
    pub timelog_id: i64,
    #[schemars(description = "What the time was spent on")]
    pub description: Option<String>,
    #[schemars(description = "Date the time was logged, YYYY-MM-DD")]
    pub date: String,
    #[schemars(description = "Clock time the work started, HH:MM:SS")]
    pub time: Option<String>,
    #[schemars(description = "Hours spent")]
    pub hours: i64,
    #[schemars(description = "Minutes spent on top of the hours")]
    pub minutes: i64,
    #[schemars(description = "Whether the time is billable")]
    pub billable: Option<bool>,
    #[schemars(description = "User the time belongs to")]
    pub user_id: Option<i64>,
    #[schemars(description = "Tag IDs to attach to the timelog")]
    pub tag_ids: Option<Vec<i64>>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub struct DeleteTimelogParams {
    #[schemars(description = "Timelog ID to delete")]
    pub timelog_id: i64,
}

fn timelog_filters(
    page: Option<i64>,
    page_size: Option<i64>,
    start_date: Option<&str>,
    end_date: Option<&str>,
    billable: Option<bool>,
) -> Result<timelog::Filters, McpError> {
    Ok(timelog::Filters {
        page: page_filters(None, page, page_size),
        start_date: parse_scalar_opt("start-date", start_date)?,
        end_date: parse_scalar_opt("end-date", end_date)?,
        billable,
    })
}

#[tool_router(router = timelogs_tool_router)]
impl TeamworkMcp {
    #[tool(
        name = "retrieve-timelogs",
        description = "List timelogs across all projects. Supports date-range and billable filters, and pagination."
    )]
    pub async fn retrieve_timelogs(
        &self,
        params: Parameters<RetrieveTimelogsParams>,
    ) -> Result<CallToolResult, McpError> {
        let mut entity = timelog::Multiple {
            scope: timelog::Scope::All,
            filters: timelog_filters(
                params.0.page,
                params.0.page_size,
                params.0.start_date.as_deref(),
                params.0.end_date.as_deref(),
                params.0.billable,
            )?,
            ..Default::default()
        };
        self.engine()
            .dispatch(&mut entity, &mut [])
            .await
            .map_err(map_engine_error)?;

        json_result(&json!({"timelogs": entity.timelogs, "meta": entity.meta}))
    }

    #[tool(
        name = "retrieve-project-timelogs",
        description = "List the timelogs of one project."
    )]
    pub async fn retrieve_project_timelogs(
        &self,
        params: Parameters<RetrieveProjectTimelogsParams>,
    ) -> Result<CallToolResult, McpError> {
        let mut entity = timelog::Multiple {
            scope: timelog::Scope::Project(params.0.project_id),
            filters: timelog_filters(
                params.0.page,
                params.0.page_size,
                params.0.start_date.as_deref(),
                params.0.end_date.as_deref(),
                params.0.billable,
            )?,
            ..Default::default()
        };
        self.engine()
            .dispatch(&mut entity, &mut [])
            .await
            .map_err(map_engine_error)?;

        json_result(&json!({"timelogs": entity.timelogs, "meta": entity.meta}))
    }

    #[tool(name = "retrieve-task-timelogs", description = "List the timelogs of one task.")]
    pub async fn retrieve_task_timelogs(
        &self,
        params: Parameters<RetrieveTaskTimelogsParams>,
    ) -> Result<CallToolResult, McpError> {
        let mut entity = timelog::Multiple {
            scope: timelog::Scope::Task(params.0.task_id),
            filters: timelog_filters(
                params.0.page,
                params.0.page_size,
                params.0.start_date.as_deref(),
                params.0.end_date.as_deref(),
                params.0.billable,
            )?,
            ..Default::default()
        };
        self.engine()
            .dispatch(&mut entity, &mut [])
            .await
            .map_err(map_engine_error)?;

        json_result(&json!({"timelogs": entity.timelogs, "meta": entity.meta}))
    }

    #[tool(name = "retrieve-timelog", description = "Get a single timelog by ID.")]
    pub async fn retrieve_timelog(
        &self,
        params: Parameters<RetrieveTimelogParams>,
    ) -> Result<CallToolResult, McpError> {
        let mut entity = timelog::Single::new(params.0.timelog_id);
        self.engine()
            .dispatch(&mut entity, &mut [])
            .await
            .map_err(map_engine_error)?;

        json_result(&entity.timelog)
    }

    #[tool(
        name = "create-timelog",
        description = "Log time against a project or a task. Exactly one of project-id or task-id is required."
    )]
    pub async fn create_timelog(
        &self,
        params: Parameters<CreateTimelogParams>,
    ) -> Result<CallToolResult, McpError> {
        let target = match (params.0.project_id, params.0.task_id) {
            (Some(project_id), None) => timelog::Target::Project(project_id),
            (None, Some(task_id)) => timelog::Target::Task(task_id),
            _ => {
                return Err(McpError::invalid_params(
                    "exactly one of project-id or task-id must be provided",
                    None,
                ));
            }
        };
        let mut entity = timelog::Create {
            target,
            timelog: timelog::CreateBody {
                description: params.0.description,
                date: parse_scalar("date", &params.0.date)?,
                time: parse_scalar_opt("time", params.0.time.as_deref())?,
                hours: params.0.hours,
                minutes: params.0.minutes,
                is_billable: params.0.billable.unwrap_or(false),
                user_id: params.0.user_id,
                tag_ids: params.0.tag_ids.unwrap_or_default(),
            },
        };
        let id = timelog::create(self.engine(), &mut entity)
            .await
            .map_err(map_engine_error)?;
        debug!(id, "timelog created");

        text_result(format!("Timelog {id} created successfully"))
    }

    #[tool(
        name = "update-timelog",
        description = "Update a timelog. The full field set is written."
    )]
    pub async fn update_timelog(
        &self,
        params: Parameters<UpdateTimelogParams>,
    ) -> Result<CallToolResult, McpError> {
        let mut entity = timelog::Update {
            id: params.0.timelog_id,
            timelog: timelog::CreateBody {
                description: params.0.description,
                date: parse_scalar("date", &params.0.date)?,
                time: parse_scalar_opt("time", params.0.time.as_deref())?,
                hours: params.0.hours,
                minutes: params.0.minutes,
                is_billable: params.0.billable.unwrap_or(false),
                user_id: params.0.user_id,
                tag_ids: params.0.tag_ids.unwrap_or_default(),
            },
        };
        self.engine()
            .dispatch(&mut entity, &mut [])
            .await
            .map_err(map_engine_error)?;

        text_result(format!(
            "Timelog {} updated successfully",
            params.0.timelog_id
        ))
    }

    #[tool(name = "delete-timelog", description = "Delete a timelog permanently.")]
    pub async fn delete_timelog(
        &self,
        params: Parameters<DeleteTimelogParams>,
    ) -> Result<CallToolResult, McpError> {
        let mut entity = timelog::Delete {
            id: params.0.timelog_id,
        };
        self.engine()
            .dispatch(&mut entity, &mut [])
            .await
            .map_err(map_engine_error)?;

        text_result(format!(
            "Timelog {} deleted successfully",
            params.0.timelog_id
        ))
    }
}
