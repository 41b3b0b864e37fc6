use super::{check_required, check_year};
use crate::{
    command_handler::CommandHandler,
    context::ExecutionContext,
    dto::ModelDto,
    error::AppError,
    validation::{Issues, ValidationContext, ValidationIssue},
};
use async_trait::async_trait;
use serde::Deserialize;
use uuid::Uuid;
use vehicle_domain::{CatalogService, entities::Model, value_object::ModelYear};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateModelRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub brand_id: Option<Uuid>,
    #[serde(default)]
    pub start_year: Option<i32>,
    #[serde(default)]
    pub end_year: Option<i32>,
    #[serde(default)]
    pub category: String,
}

#[derive(Debug, Clone, Default)]
pub struct CreateModelHandler {
    service: CatalogService,
}

impl CreateModelHandler {
    pub const NAME: &'static str = "CreateModel";

    pub fn new(service: CatalogService) -> Self {
        Self { service }
    }
}

#[async_trait]
impl CommandHandler for CreateModelHandler {
    type Request = CreateModelRequest;
    type Response = ModelDto;

    fn validate(&self, request: &CreateModelRequest, _ctx: &ValidationContext) -> Vec<ValidationIssue> {
        let mut issues = Issues::new();
        check_required(&mut issues, "name", &request.name);
        issues.ensure(
            request.brand_id.is_some_and(|id| !id.is_nil()),
            "brandId",
            "brand id is required",
        );

        match request.start_year {
            Some(start) => check_year(&mut issues, "startYear", start),
            None => issues.push("startYear", "start year is required"),
        }
        if let Some(end) = request.end_year {
            check_year(&mut issues, "endYear", end);
            if let Some(start) = request.start_year {
                issues.ensure(
                    end >= start,
                    "endYear",
                    "end year cannot be before the start year",
                );
            }
        }

        issues.into_vec()
    }

    async fn execute(
        &self,
        request: CreateModelRequest,
        ctx: &mut ExecutionContext,
    ) -> Result<ModelDto, AppError> {
        let (Some(brand_id), Some(start_year)) = (request.brand_id, request.start_year) else {
            return Err(AppError::internal(anyhow::anyhow!(
                "validated CreateModel request is missing required fields"
            )));
        };

        let model = Model::builder()
            .name(request.name.trim())
            .brand_id(brand_id)
            .start_year(ModelYear::new(start_year)?)
            .maybe_end_year(request.end_year.map(ModelYear::new).transpose()?)
            .category(request.category)
            .build();

        if model.in_production() {
            ctx.decisions().record("model has no end year and is considered in production");
        }

        let model = self.service.create_model(ctx.unit_of_work()?, model).await?;
        Ok(ModelDto::from(&model))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{RequestContext, RequestMetadata};
    use crate::decision_log::DecisionLog;

    #[test]
    fn end_year_before_start_is_rejected() {
        let ctx = RequestContext::new(RequestMetadata::default(), DecisionLog::new());
        let issues = CreateModelHandler::default().validate(
            &CreateModelRequest {
                name: "Corolla".into(),
                brand_id: Some(Uuid::new_v4()),
                start_year: Some(2010),
                end_year: Some(2005),
                category: "sedan".into(),
            },
            &ctx,
        );
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].field, "endYear");
    }
}
