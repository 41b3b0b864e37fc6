use super::{check_vin, check_year};
use crate::{
    command_handler::CommandHandler,
    context::ExecutionContext,
    dto::CarDto,
    error::AppError,
    validation::{Issues, ValidationContext, ValidationIssue},
};
use async_trait::async_trait;
use serde::Deserialize;
use uuid::Uuid;
use vehicle_domain::{
    CarService,
    entities::CarChanges,
    value_object::{ModelYear, Vin},
};

/// 部分更新请求。`id` 由调用方（路径参数）提供，其余字段缺省表示不修改。
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCarRequest {
    #[serde(default)]
    pub id: Option<Uuid>,
    #[serde(default, alias = "modelid")]
    pub model_id: Option<Uuid>,
    #[serde(default, alias = "ownerid")]
    pub owner_id: Option<Uuid>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub vin: Option<String>,
    #[serde(default)]
    pub active: Option<bool>,
}

impl UpdateCarRequest {
    fn has_changes(&self) -> bool {
        self.model_id.is_some()
            || self.owner_id.is_some()
            || self.year.is_some()
            || self.color.is_some()
            || self.vin.is_some()
            || self.active.is_some()
    }
}

#[derive(Debug, Clone, Default)]
pub struct UpdateCarHandler {
    service: CarService,
}

impl UpdateCarHandler {
    pub const NAME: &'static str = "UpdateCar";

    pub fn new(service: CarService) -> Self {
        Self { service }
    }
}

#[async_trait]
impl CommandHandler for UpdateCarHandler {
    type Request = UpdateCarRequest;
    type Response = CarDto;

    fn validate(&self, request: &UpdateCarRequest, _ctx: &ValidationContext) -> Vec<ValidationIssue> {
        let mut issues = Issues::new();

        issues.ensure(
            request.id.is_some_and(|id| !id.is_nil()),
            "id",
            "car id is required in the path",
        );
        if let Some(vin) = &request.vin {
            check_vin(&mut issues, vin);
        }
        if let Some(year) = request.year {
            check_year(&mut issues, "year", year);
        }
        issues.ensure(
            request.has_changes(),
            "requestBody",
            "at least one field must be provided for the update",
        );

        issues.into_vec()
    }

    async fn execute(
        &self,
        request: UpdateCarRequest,
        ctx: &mut ExecutionContext,
    ) -> Result<CarDto, AppError> {
        let Some(id) = request.id else {
            return Err(AppError::internal(anyhow::anyhow!(
                "validated UpdateCar request has no id"
            )));
        };

        let changes = CarChanges {
            model_id: request.model_id,
            owner_id: request.owner_id,
            year: request.year.map(ModelYear::new).transpose()?,
            color: request.color,
            vin: request.vin.map(Vin::new).transpose()?,
            active: request.active,
        };

        if changes.active == Some(false) {
            ctx.decisions().record("car will be marked as inactive");
        }

        let car = self.service.update_car(ctx.unit_of_work()?, id, changes).await?;
        Ok(CarDto::from(&car))
    }
}
