//! MCP tools for tag management.

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
use crate::twapi::tag;

use super::{json_result, map_engine_error, page_filters, text_result};

pub(crate) fn router() -> ToolRouter<TeamworkMcp> {
    TeamworkMcp::tags_tool_router()
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub struct RetrieveTagsParams {
    #[schemars(description = "Filter tags by name")]
    pub search_term: Option<String>,
    #[schemars(description = "Page number, starting at 1")]
    pub page: Option<i64>,
    #[schemars(description = "Number of tags per page")]
    pub page_size: Option<i64>,
    #[schemars(description = "Only tags attached to one kind of item, e.g. 'project' or 'task'")]
    pub item_type: Option<String>,
    #[schemars(description = "Only tags scoped to these projects")]
    pub project_ids: Option<Vec<i64>>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub struct RetrieveTagParams {
    #[schemars(description = "Tag ID")]
    pub tag_id: i64,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub struct CreateTagParams {
    #[schemars(description = "Tag name")]
    pub name: String,
    #[schemars(description = "Display color as a hex code, e.g. #ff0000")]
    pub color: Option<String>,
    #[schemars(description = "Project to scope the tag to; omit for a global tag")]
    pub project_id: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub struct UpdateTagParams {
    #[schemars(description = "Tag ID to update")]
    pub tag_id: i64,
    #[schemars(description = "Tag name")]
    pub name: String,
    #[schemars(description = "Display color as a hex code, e.g. #ff0000")]
    pub color: Option<String>,
    #[schemars(description = "Project to scope the tag to; omit for a global tag")]
    pub project_id: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub struct DeleteTagParams {
    #[schemars(description = "Tag ID to delete")]
    pub tag_id: i64,
}

#[tool_router(router = tags_tool_router)]
impl TeamworkMcp {
    #[tool(
        name = "retrieve-tags",
        description = "List tags. Supports name search, item-type and project filters, and pagination."
    )]
    pub async fn retrieve_tags(
        &self,
        params: Parameters<RetrieveTagsParams>,
    ) -> Result<CallToolResult, McpError> {
        let mut entity = tag::Multiple {
            filters: tag::Filters {
                page: page_filters(params.0.search_term, params.0.page, params.0.page_size),
                item_type: params.0.item_type,
                project_ids: params.0.project_ids.unwrap_or_default(),
            },
            ..Default::default()
        };
        self.engine()
            .dispatch(&mut entity, &mut [])
            .await
            .map_err(map_engine_error)?;

        json_result(&json!({"tags": entity.tags, "meta": entity.meta}))
    }

    #[tool(name = "retrieve-tag", description = "Get a single tag by ID.")]
    pub async fn retrieve_tag(
        &self,
        params: Parameters<RetrieveTagParams>,
    ) -> Result<CallToolResult, McpError> {
        let mut entity = tag::Single::new(params.0.tag_id);
        self.engine()
            .dispatch(&mut entity, &mut [])
            .await
            .map_err(map_engine_error)?;

        json_result(&entity.tag)
    }

    #[tool(name = "create-tag", description = "Create a tag.")]
    pub async fn create_tag(
        &self,
        params: Parameters<CreateTagParams>,
    ) -> Result<CallToolResult, McpError> {
        let mut entity = tag::Create {
            tag: tag::CreateBody {
                name: params.0.name,
                color: params.0.color,
                project_id: params.0.project_id,
            },
        };
        let id = tag::create(self.engine(), &mut entity)
            .await
            .map_err(map_engine_error)?;
        debug!(id, "tag created");

        text_result(format!("Tag {id} created successfully"))
    }

    #[tool(name = "update-tag", description = "Update a tag. The full field set is written.")]
    pub async fn update_tag(
        &self,
        params: Parameters<UpdateTagParams>,
    ) -> Result<CallToolResult, McpError> {
        let mut entity = tag::Update {
            id: params.0.tag_id,
            tag: tag::CreateBody {
                name: params.0.name,
                color: params.0.color,
                project_id: params.0.project_id,
            },
        };
        self.engine()
            .dispatch(&mut entity, &mut [])
            .await
            .map_err(map_engine_error)?;

        text_result(format!("Tag {} updated successfully", params.0.tag_id))
    }

    #[tool(name = "delete-tag", description = "Delete a tag permanently.")]
    pub async fn delete_tag(
        &self,
        params: Parameters<DeleteTagParams>,
    ) -> Result<CallToolResult, McpError> {
        let mut entity = tag::Delete {
            id: params.0.tag_id,
        };
        self.engine()
            .dispatch(&mut entity, &mut [])
            .await
            .map_err(map_engine_error)?;

        text_result(format!("Tag {} deleted successfully", params.0.tag_id))
    }
}
