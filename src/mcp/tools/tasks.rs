//! MCP tools for task management.

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
use crate::twapi::relationship::UserGroups;
use crate::twapi::task;

use super::{json_result, map_engine_error, page_filters, parse_scalar_opt, text_result};

pub(crate) fn router() -> ToolRouter<TeamworkMcp> {
    TeamworkMcp::tasks_tool_router()
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub struct RetrieveTasksParams {
    #[schemars(description = "Filter tasks by name")]
    pub search_term: Option<String>,
    #[schemars(description = "Page number, starting at 1")]
    pub page: Option<i64>,
    #[schemars(description = "Number of tasks per page")]
    pub page_size: Option<i64>,
    #[schemars(description = "Only tasks carrying these tag IDs")]
    pub tag_ids: Option<Vec<i64>>,
    #[schemars(description = "Require every listed tag instead of any")]
    pub match_all_tags: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub struct RetrieveProjectTasksParams {
    #[schemars(description = "Project ID to list tasks from")]
    pub project_id: i64,
    #[schemars(description = "Filter tasks by name")]
    pub search_term: Option<String>,
    #[schemars(description = "Page number, starting at 1")]
    pub page: Option<i64>,
    #[schemars(description = "Number of tasks per page")]
    pub page_size: Option<i64>,
    #[schemars(description = "Only tasks carrying these tag IDs")]
    pub tag_ids: Option<Vec<i64>>,
    #[schemars(description = "Require every listed tag instead of any")]
    pub match_all_tags: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub struct RetrieveTasklistTasksParams {
    #[schemars(description = "Tasklist ID to list tasks from")]
    pub tasklist_id: i64,
    #[schemars(description = "Filter tasks by name")]
    pub search_term: Option<String>,
    #[schemars(description = "Page number, starting at 1")]
    pub page: Option<i64>,
    #[schemars(description = "Number of tasks per page")]
    pub page_size: Option<i64>,
    #[schemars(description = "Only tasks carrying these tag IDs")]
    pub tag_ids: Option<Vec<i64>>,
    #[schemars(description = "Require every listed tag instead of any")]
    pub match_all_tags: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub struct RetrieveTaskParams {
    #[schemars(description = "Task ID")]
    pub task_id: i64,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub struct CreateTaskParams {
    #[schemars(description = "Tasklist the task belongs to")]
    pub tasklist_id: i64,
    #[schemars(description = "Task name")]
    pub name: String,
    #[schemars(description = "Task description")]
    pub description: Option<String>,
    #[schemars(description = "Priority: 'low', 'medium' or 'high'")]
    pub priority: Option<String>,
    #[schemars(description = "Start date in YYYY-MM-DD form")]
    pub start_date: Option<String>,
    #[schemars(description = "Due date in YYYY-MM-DD form")]
    pub due_date: Option<String>,
    #[schemars(description = "User IDs to assign")]
    pub user_ids: Option<Vec<i64>>,
    #[schemars(description = "Company IDs to assign")]
    pub company_ids: Option<Vec<i64>>,
    #[schemars(description = "Team IDs to assign")]
    pub team_ids: Option<Vec<i64>>,
    #[schemars(description = "Tag IDs to attach to the task")]
    pub tag_ids: Option<Vec<i64>>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub struct UpdateTaskParams {
    #[schemars(description = "Task ID to update")]
    pub task_id: i64,
    #[schemars(description = "Task name")]
    pub name: String,
    #[schemars(description = "Task description")]
    pub description: Option<String>,
    #[schemars(description = "Priority: 'low', 'medium' or 'high'")]
    pub priority: Option<String>,
    #[schemars(description = "Start date in YYYY-MM-DD form")]
    pub start_date: Option<String>,
    #[schemars(description = "Due date in YYYY-MM-DD form")]
    pub due_date: Option<String>,
    #[schemars(description = "User IDs to assign")]
    pub user_ids: Option<Vec<i64>>,
    #[schemars(description = "Company IDs to assign")]
    pub company_ids: Option<Vec<i64>>,
    #[schemars(description = "Team IDs to assign")]
    pub team_ids: Option<Vec<i64>>,
    #[schemars(description = "Tag IDs to attach to the task")]
    pub tag_ids: Option<Vec<i64>>,
}

fn assignees(
    user_ids: Option<Vec<i64>>,
    company_ids: Option<Vec<i64>>,
    team_ids: Option<Vec<i64>>,
) -> UserGroups {
    UserGroups {
        user_ids: user_ids.unwrap_or_default(),
        company_ids: company_ids.unwrap_or_default(),
        team_ids: team_ids.unwrap_or_default(),
    }
}

#[tool_router(router = tasks_tool_router)]
impl TeamworkMcp {
    #[tool(
        name = "retrieve-tasks",
        description = "List tasks across all projects. Supports name search, tag filters and pagination."
    )]
    pub async fn retrieve_tasks(
        &self,
        params: Parameters<RetrieveTasksParams>,
    ) -> Result<CallToolResult, McpError> {
        let mut entity = task::Multiple {
            scope: task::Scope::All,
            filters: task::Filters {
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

        json_result(&json!({"tasks": entity.tasks, "meta": entity.meta}))
    }

    #[tool(name = "retrieve-project-tasks", description = "List the tasks of one project.")]
    pub async fn retrieve_project_tasks(
        &self,
        params: Parameters<RetrieveProjectTasksParams>,
    ) -> Result<CallToolResult, McpError> {
        let mut entity = task::Multiple {
            scope: task::Scope::Project(params.0.project_id),
            filters: task::Filters {
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

        json_result(&json!({"tasks": entity.tasks, "meta": entity.meta}))
    }

    #[tool(
        name = "retrieve-tasklist-tasks",
        description = "List the tasks of one tasklist."
    )]
    pub async fn retrieve_tasklist_tasks(
        &self,
        params: Parameters<RetrieveTasklistTasksParams>,
    ) -> Result<CallToolResult, McpError> {
        let mut entity = task::Multiple {
            scope: task::Scope::Tasklist(params.0.tasklist_id),
            filters: task::Filters {
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

        json_result(&json!({"tasks": entity.tasks, "meta": entity.meta}))
    }

    #[tool(
        name = "retrieve-task",
        description = "Get a single task by ID with its assignees, tags and dates."
    )]
    pub async fn retrieve_task(
        &self,
        params: Parameters<RetrieveTaskParams>,
    ) -> Result<CallToolResult, McpError> {
        let mut entity = task::Single::new(params.0.task_id);
        self.engine()
            .dispatch(&mut entity, &mut [])
            .await
            .map_err(map_engine_error)?;

        json_result(&entity.task)
    }

    #[tool(name = "create-task", description = "Create a task in a tasklist.")]
    pub async fn create_task(
        &self,
        params: Parameters<CreateTaskParams>,
    ) -> Result<CallToolResult, McpError> {
        let mut entity = task::Create {
            tasklist_id: params.0.tasklist_id,
            task: task::CreateBody {
                name: params.0.name,
                description: params.0.description,
                priority: params.0.priority,
                start_date: parse_scalar_opt("start-date", params.0.start_date.as_deref())?,
                due_date: parse_scalar_opt("due-date", params.0.due_date.as_deref())?,
                assignees: assignees(params.0.user_ids, params.0.company_ids, params.0.team_ids),
                tag_ids: params.0.tag_ids.unwrap_or_default(),
            },
        };
        let id = task::create(self.engine(), &mut entity)
            .await
            .map_err(map_engine_error)?;
        debug!(id, "task created");

        text_result(format!("Task {id} created successfully"))
    }

    #[tool(name = "update-task", description = "Update a task. The full field set is written.")]
    pub async fn update_task(
        &self,
        params: Parameters<UpdateTaskParams>,
    ) -> Result<CallToolResult, McpError> {
        let mut entity = task::Update {
            id: params.0.task_id,
            task: task::CreateBody {
                name: params.0.name,
                description: params.0.description,
                priority: params.0.priority,
                start_date: parse_scalar_opt("start-date", params.0.start_date.as_deref())?,
                due_date: parse_scalar_opt("due-date", params.0.due_date.as_deref())?,
                assignees: assignees(params.0.user_ids, params.0.company_ids, params.0.team_ids),
                tag_ids: params.0.tag_ids.unwrap_or_default(),
            },
        };
        self.engine()
            .dispatch(&mut entity, &mut [])
            .await
            .map_err(map_engine_error)?;

        text_result(format!("Task {} updated successfully", params.0.task_id))
    }
}
