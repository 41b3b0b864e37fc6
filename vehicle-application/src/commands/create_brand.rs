use super::check_required;
use crate::{
    command_handler::CommandHandler,
    context::ExecutionContext,
    dto::BrandDto,
    error::AppError,
    validation::{Issues, ValidationContext, ValidationIssue},
};
use async_trait::async_trait;
use serde::Deserialize;
use vehicle_domain::{CatalogService, entities::Brand};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBrandRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub logo_url: String,
}

#[derive(Debug, Clone, Default)]
pub struct CreateBrandHandler {
    service: CatalogService,
}

impl CreateBrandHandler {
    pub const NAME: &'static str = "CreateBrand";

    pub fn new(service: CatalogService) -> Self {
        Self { service }
    }
}

#[async_trait]
impl CommandHandler for CreateBrandHandler {
    type Request = CreateBrandRequest;
    type Response = BrandDto;

    fn validate(&self, request: &CreateBrandRequest, _ctx: &ValidationContext) -> Vec<ValidationIssue> {
        let mut issues = Issues::new();
        check_required(&mut issues, "name", &request.name);
        issues.into_vec()
    }

    async fn execute(
        &self,
        request: CreateBrandRequest,
        ctx: &mut ExecutionContext,
    ) -> Result<BrandDto, AppError> {
        let brand = Brand::builder()
            .name(request.name.trim())
            .country(request.country)
            .logo_url(request.logo_url)
            .build();

        let brand = self.service.create_brand(ctx.unit_of_work()?, brand).await?;
        Ok(BrandDto::from(&brand))
    }
}
