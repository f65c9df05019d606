//! MCP tools for people management, including project membership.

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
use crate::twapi::user;

use super::{json_result, map_engine_error, page_filters, text_result};

pub(crate) fn router() -> ToolRouter<TeamworkMcp> {
    TeamworkMcp::people_tool_router()
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub struct RetrievePeopleParams {
    #[schemars(description = "Filter people by name")]
    pub search_term: Option<String>,
    #[schemars(description = "Page number, starting at 1")]
    pub page: Option<i64>,
    #[schemars(description = "Number of people per page")]
    pub page_size: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub struct RetrieveProjectPeopleParams {
    #[schemars(description = "Project ID to list members of")]
    pub project_id: i64,
    #[schemars(description = "Filter people by name")]
    pub search_term: Option<String>,
    #[schemars(description = "Page number, starting at 1")]
    pub page: Option<i64>,
    #[schemars(description = "Number of people per page")]
    pub page_size: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub struct RetrievePersonParams {
    #[schemars(description = "Person ID")]
    pub person_id: i64,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub struct CreatePersonParams {
    #[schemars(description = "First name")]
    pub first_name: String,
    #[schemars(description = "Last name")]
    pub last_name: String,
    #[schemars(description = "Email address; doubles as the login")]
    pub email: String,
    #[schemars(description = "Account type: 'account', 'collaborator' or 'contact'")]
    pub user_type: Option<String>,
    #[schemars(description = "Job title")]
    pub title: Option<String>,
    #[schemars(description = "Company the person belongs to")]
    pub company_id: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub struct UpdatePersonParams {
    #[schemars(description = "Person ID to update")]
    pub person_id: i64,
    #[schemars(description = "First name")]
    pub first_name: String,
    #[schemars(description = "Last name")]
    pub last_name: String,
    #[schemars(description = "Email address; doubles as the login")]
    pub email: String,
    #[schemars(description = "Account type: 'account', 'collaborator' or 'contact'")]
    pub user_type: Option<String>,
    #[schemars(description = "Job title")]
    pub title: Option<String>,
    #[schemars(description = "Company the person belongs to")]
    pub company_id: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub struct DeletePersonParams {
    #[schemars(description = "Person ID to delete")]
    pub person_id: i64,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub struct AddProjectPeopleParams {
    #[schemars(description = "Project to grant membership on")]
    pub project_id: i64,
    #[schemars(description = "User IDs to add to the project")]
    pub user_ids: Vec<i64>,
}

#[tool_router(router = people_tool_router)]
impl TeamworkMcp {
    #[tool(
        name = "retrieve-people",
        description = "List people on the installation. Supports name search and pagination."
    )]
    pub async fn retrieve_people(
        &self,
        params: Parameters<RetrievePeopleParams>,
    ) -> Result<CallToolResult, McpError> {
        let mut entity = user::Multiple {
            project_id: None,
            filters: page_filters(params.0.search_term, params.0.page, params.0.page_size),
            ..Default::default()
        };
        self.engine()
            .dispatch(&mut entity, &mut [])
            .await
            .map_err(map_engine_error)?;

        json_result(&json!({"people": entity.people, "meta": entity.meta}))
    }

    #[tool(name = "retrieve-project-people", description = "List the members of one project.")]
    pub async fn retrieve_project_people(
        &self,
        params: Parameters<RetrieveProjectPeopleParams>,
    ) -> Result<CallToolResult, McpError> {
        let mut entity = user::Multiple {
            project_id: Some(params.0.project_id),
            filters: page_filters(params.0.search_term, params.0.page, params.0.page_size),
            ..Default::default()
        };
        self.engine()
            .dispatch(&mut entity, &mut [])
            .await
            .map_err(map_engine_error)?;

        json_result(&json!({"people": entity.people, "meta": entity.meta}))
    }

    #[tool(
        name = "retrieve-person",
        description = "Get a single person by ID with their company, job roles and skills."
    )]
    pub async fn retrieve_person(
        &self,
        params: Parameters<RetrievePersonParams>,
    ) -> Result<CallToolResult, McpError> {
        let mut entity = user::Single::new(params.0.person_id);
        self.engine()
            .dispatch(&mut entity, &mut [])
            .await
            .map_err(map_engine_error)?;

        json_result(&entity.person)
    }

    #[tool(name = "create-person", description = "Create a person on the installation.")]
    pub async fn create_person(
        &self,
        params: Parameters<CreatePersonParams>,
    ) -> Result<CallToolResult, McpError> {
        let mut entity = user::Create {
            person: user::CreateBody {
                first_name: params.0.first_name,
                last_name: params.0.last_name,
                email: params.0.email,
                user_type: params.0.user_type,
                title: params.0.title,
                company_id: params.0.company_id,
            },
        };
        let id = user::create(self.engine(), &mut entity)
            .await
            .map_err(map_engine_error)?;
        debug!(id, "person created");

        text_result(format!("Person {id} created successfully"))
    }

    #[tool(name = "update-person", description = "Update a person. The full field set is written.")]
    pub async fn update_person(
        &self,
        params: Parameters<UpdatePersonParams>,
    ) -> Result<CallToolResult, McpError> {
        let mut entity = user::Update {
            id: params.0.person_id,
            person: user::CreateBody {
                first_name: params.0.first_name,
                last_name: params.0.last_name,
                email: params.0.email,
                user_type: params.0.user_type,
                title: params.0.title,
                company_id: params.0.company_id,
            },
        };
        self.engine()
            .dispatch(&mut entity, &mut [])
            .await
            .map_err(map_engine_error)?;

        text_result(format!("Person {} updated successfully", params.0.person_id))
    }

    #[tool(name = "delete-person", description = "Delete a person permanently.")]
    pub async fn delete_person(
        &self,
        params: Parameters<DeletePersonParams>,
    ) -> Result<CallToolResult, McpError> {
        let mut entity = user::Delete {
            id: params.0.person_id,
        };
        self.engine()
            .dispatch(&mut entity, &mut [])
            .await
            .map_err(map_engine_error)?;

        text_result(format!("Person {} deleted successfully", params.0.person_id))
    }

    #[tool(
        name = "add-project-people",
        description = "Grant a set of users membership on a project. At least one user ID is required."
    )]
    pub async fn add_project_people(
        &self,
        params: Parameters<AddProjectPeopleParams>,
    ) -> Result<CallToolResult, McpError> {
        let mut entity = user::AddProject {
            project_id: params.0.project_id,
            user_ids: params.0.user_ids,
        };
        self.engine()
            .dispatch(&mut entity, &mut [])
            .await
            .map_err(map_engine_error)?;

        text_result(format!(
            "Users added to project {} successfully",
            params.0.project_id
        ))
    }
}
