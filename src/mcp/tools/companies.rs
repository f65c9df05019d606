//! MCP tools for company management.

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
use crate::twapi::company;

use super::{json_result, map_engine_error, page_filters, text_result};

pub(crate) fn router() -> ToolRouter<TeamworkMcp> {
    TeamworkMcp::companies_tool_router()
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub struct RetrieveCompaniesParams {
    #[schemars(description = "Filter companies by name")]
    pub search_term: Option<String>,
    #[schemars(description = "Page number, starting at 1")]
    pub page: Option<i64>,
    #[schemars(description = "Number of companies per page")]
    pub page_size: Option<i64>,
    #[schemars(description = "Only companies carrying these tag IDs")]
    pub tag_ids: Option<Vec<i64>>,
    #[schemars(description = "Require every listed tag instead of any")]
    pub match_all_tags: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub struct RetrieveCompanyParams {
    #[schemars(description = "Company ID")]
    pub company_id: i64,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub struct CreateCompanyParams {
    #[schemars(description = "Company name")]
    pub name: String,
    #[schemars(description = "First address line")]
    pub address_one: Option<String>,
    #[schemars(description = "City")]
    pub city: Option<String>,
    #[schemars(description = "Two-letter country code")]
    pub country_code: Option<String>,
    #[schemars(description = "Phone number")]
    pub phone: Option<String>,
    #[schemars(description = "Website URL")]
    pub website: Option<String>,
    #[schemars(description = "Industry ID; see retrieve-industries")]
    pub industry_id: Option<i64>,
    #[schemars(description = "Person ID of the account manager")]
    pub manager_id: Option<i64>,
    #[schemars(description = "Tag IDs to attach to the company")]
    pub tag_ids: Option<Vec<i64>>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub struct UpdateCompanyParams {
    #[schemars(description = "Company ID to update")]
    pub company_id: i64,
    #[schemars(description = "Company name")]
    pub name: String,
    #[schemars(description = "First address line")]
    pub address_one: Option<String>,
    #[schemars(description = "City")]
    pub city: Option<String>,
    #[schemars(description = "Two-letter country code")]
    pub country_code: Option<String>,
    #[schemars(description = "Phone number")]
    pub phone: Option<String>,
    #[schemars(description = "Website URL")]
    pub website: Option<String>,
    #[schemars(description = "Industry ID; see retrieve-industries")]
    pub industry_id: Option<i64>,
    #[schemars(description = "Person ID of the account manager")]
    pub manager_id: Option<i64>,
    #[schemars(description = "Tag IDs to attach to the company")]
    pub tag_ids: Option<Vec<i64>>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub struct DeleteCompanyParams {
    #[schemars(description = "Company ID to delete")]
    pub company_id: i64,
}

#[tool_router(router = companies_tool_router)]
impl TeamworkMcp {
    #[tool(
        name = "retrieve-companies",
        description = "List companies. Supports name search, tag filters and pagination."
    )]
    pub async fn retrieve_companies(
        &self,
        params: Parameters<RetrieveCompaniesParams>,
    ) -> Result<CallToolResult, McpError> {
        let mut entity = company::Multiple {
            filters: company::Filters {
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

        json_result(&json!({"companies": entity.companies, "meta": entity.meta}))
    }

    #[tool(
        name = "retrieve-company",
        description = "Get a single company by ID with its industry, manager and tags."
    )]
    pub async fn retrieve_company(
        &self,
        params: Parameters<RetrieveCompanyParams>,
    ) -> Result<CallToolResult, McpError> {
        let mut entity = company::Single::new(params.0.company_id);
        self.engine()
            .dispatch(&mut entity, &mut [])
            .await
            .map_err(map_engine_error)?;

        json_result(&entity.company)
    }

    #[tool(name = "create-company", description = "Create a company.")]
    pub async fn create_company(
        &self,
        params: Parameters<CreateCompanyParams>,
    ) -> Result<CallToolResult, McpError> {
        let mut entity = company::Create {
            company: company::CreateBody {
                name: params.0.name,
                address_one: params.0.address_one,
                city: params.0.city,
                country_code: params.0.country_code,
                phone: params.0.phone,
                website: params.0.website,
                industry_id: params.0.industry_id,
                manager_id: params.0.manager_id,
                tag_ids: params.0.tag_ids.unwrap_or_default(),
            },
        };
        let id = company::create(self.engine(), &mut entity)
            .await
            .map_err(map_engine_error)?;
        debug!(id, "company created");

        text_result(format!("Company {id} created successfully"))
    }

    #[tool(
        name = "update-company",
        description = "Update a company. The full field set is written."
    )]
    pub async fn update_company(
        &self,
        params: Parameters<UpdateCompanyParams>,
    ) -> Result<CallToolResult, McpError> {
        let mut entity = company::Update {
            id: params.0.company_id,
            company: company::CreateBody {
                name: params.0.name,
                address_one: params.0.address_one,
                city: params.0.city,
                country_code: params.0.country_code,
                phone: params.0.phone,
                website: params.0.website,
                industry_id: params.0.industry_id,
                manager_id: params.0.manager_id,
                tag_ids: params.0.tag_ids.unwrap_or_default(),
            },
        };
        self.engine()
            .dispatch(&mut entity, &mut [])
            .await
            .map_err(map_engine_error)?;

        text_result(format!(
            "Company {} updated successfully",
            params.0.company_id
        ))
    }

    #[tool(name = "delete-company", description = "Delete a company permanently.")]
    pub async fn delete_company(
        &self,
        params: Parameters<DeleteCompanyParams>,
    ) -> Result<CallToolResult, McpError> {
        let mut entity = company::Delete {
            id: params.0.company_id,
        };
        self.engine()
            .dispatch(&mut entity, &mut [])
            .await
            .map_err(map_engine_error)?;

        text_result(format!(
            "Company {} deleted successfully",
            params.0.company_id
        ))
    }
}
