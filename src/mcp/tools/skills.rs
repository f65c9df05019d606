//! MCP tools for skill management.

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
use crate::twapi::skill;

use super::{json_result, map_engine_error, page_filters, text_result};

pub(crate) fn router() -> ToolRouter<TeamworkMcp> {
    TeamworkMcp::skills_tool_router()
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub struct RetrieveSkillsParams {
    #[schemars(description = "Filter skills by name")]
    pub search_term: Option<String>,
    #[schemars(description = "Page number, starting at 1")]
    pub page: Option<i64>,
    #[schemars(description = "Number of skills per page")]
    pub page_size: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub struct RetrieveSkillParams {
    #[schemars(description = "Skill ID")]
    pub skill_id: i64,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub struct CreateSkillParams {
    #[schemars(description = "Skill name")]
    pub name: String,
    #[schemars(description = "User IDs holding the skill")]
    pub user_ids: Option<Vec<i64>>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub struct UpdateSkillParams {
    #[schemars(description = "Skill ID to update")]
    pub skill_id: i64,
    #[schemars(description = "Skill name")]
    pub name: String,
    #[schemars(description = "User IDs holding the skill")]
    pub user_ids: Option<Vec<i64>>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub struct DeleteSkillParams {
    #[schemars(description = "Skill ID to delete")]
    pub skill_id: i64,
}

#[tool_router(router = skills_tool_router)]
impl TeamworkMcp {
    #[tool(
        name = "retrieve-skills",
        description = "List skills. Supports name search and pagination."
    )]
    pub async fn retrieve_skills(
        &self,
        params: Parameters<RetrieveSkillsParams>,
    ) -> Result<CallToolResult, McpError> {
        let mut entity = skill::Multiple {
            filters: page_filters(params.0.search_term, params.0.page, params.0.page_size),
            ..Default::default()
        };
        self.engine()
            .dispatch(&mut entity, &mut [])
            .await
            .map_err(map_engine_error)?;

        json_result(&json!({"skills": entity.skills, "meta": entity.meta}))
    }

    #[tool(name = "retrieve-skill", description = "Get a single skill by ID with its holders.")]
    pub async fn retrieve_skill(
        &self,
        params: Parameters<RetrieveSkillParams>,
    ) -> Result<CallToolResult, McpError> {
        let mut entity = skill::Single::new(params.0.skill_id);
        self.engine()
            .dispatch(&mut entity, &mut [])
            .await
            .map_err(map_engine_error)?;

        json_result(&entity.skill)
    }

    #[tool(name = "create-skill", description = "Create a skill.")]
    pub async fn create_skill(
        &self,
        params: Parameters<CreateSkillParams>,
    ) -> Result<CallToolResult, McpError> {
        let mut entity = skill::Create {
            skill: skill::CreateBody {
                name: params.0.name,
                user_ids: params.0.user_ids.unwrap_or_default(),
            },
        };
        let id = skill::create(self.engine(), &mut entity)
            .await
            .map_err(map_engine_error)?;
        debug!(id, "skill created");

        text_result(format!("Skill {id} created successfully"))
    }

    #[tool(name = "update-skill", description = "Update a skill. The full field set is written.")]
    pub async fn update_skill(
        &self,
        params: Parameters<UpdateSkillParams>,
    ) -> Result<CallToolResult, McpError> {
        let mut entity = skill::Update {
            id: params.0.skill_id,
            skill: skill::CreateBody {
                name: params.0.name,
                user_ids: params.0.user_ids.unwrap_or_default(),
            },
        };
        self.engine()
            .dispatch(&mut entity, &mut [])
            .await
            .map_err(map_engine_error)?;

        text_result(format!("Skill {} updated successfully", params.0.skill_id))
    }

    #[tool(name = "delete-skill", description = "Delete a skill permanently.")]
    pub async fn delete_skill(
        &self,
        params: Parameters<DeleteSkillParams>,
    ) -> Result<CallToolResult, McpError> {
        let mut entity = skill::Delete {
            id: params.0.skill_id,
        };
        self.engine()
            .dispatch(&mut entity, &mut [])
            .await
            .map_err(map_engine_error)?;

        text_result(format!("Skill {} deleted successfully", params.0.skill_id))
    }
}
