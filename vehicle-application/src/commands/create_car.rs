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
    entities::Car,
    value_object::{ModelYear, Vin},
};

/// 默认年份时写入的决策说明
pub const DEFAULTED_YEAR_NOTE: &str =
    "year was not provided, the current year will be used";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateCarRequest {
    #[serde(default, rename = "modelid", alias = "modelId")]
    pub model_id: Option<Uuid>,
    #[serde(default, rename = "ownerid", alias = "ownerId")]
    pub owner_id: Option<Uuid>,
    /// 缺省或为 0 时取当前年份
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub vin: String,
}

impl CreateCarRequest {
    fn provided_year(&self) -> Option<i32> {
        self.year.filter(|year| *year != 0)
    }
}

/// 登记新车
#[derive(Debug, Clone, Default)]
pub struct CreateCarHandler {
    service: CarService,
}

impl CreateCarHandler {
    pub const NAME: &'static str = "CreateCar";

    pub fn new(service: CarService) -> Self {
        Self { service }
    }
}

#[async_trait]
impl CommandHandler for CreateCarHandler {
    type Request = CreateCarRequest;
    type Response = CarDto;

    fn validate(&self, request: &CreateCarRequest, ctx: &ValidationContext) -> Vec<ValidationIssue> {
        let mut issues = Issues::new();

        issues.ensure(
            request.model_id.is_some_and(|id| !id.is_nil()),
            "modelid",
            "model id is required",
        );
        issues.ensure(
            request.owner_id.is_some_and(|id| !id.is_nil()),
            "ownerid",
            "owner id is required",
        );
        check_vin(&mut issues, &request.vin);

        match request.provided_year() {
            Some(year) => check_year(&mut issues, "year", year),
            None => ctx.decisions().record(DEFAULTED_YEAR_NOTE),
        }

        issues.into_vec()
    }

    async fn execute(
        &self,
        request: CreateCarRequest,
        ctx: &mut ExecutionContext,
    ) -> Result<CarDto, AppError> {
        let year = match request.provided_year() {
            Some(year) => ModelYear::new(year)?,
            None => ModelYear::current(),
        };
        let (Some(model_id), Some(owner_id)) = (request.model_id, request.owner_id) else {
            return Err(AppError::internal(anyhow::anyhow!(
                "validated CreateCar request is missing its references"
            )));
        };

        let car = Car::builder()
            .model_id(model_id)
            .owner_id(owner_id)
            .year(year)
            .color(request.color)
            .vin(Vin::new(request.vin)?)
            .build();

        let car = self.service.create_car(ctx.unit_of_work()?, car).await?;
        tracing::info!(vin = %car.vin(), "car registered");
        Ok(CarDto::from(&car))
    }
}
