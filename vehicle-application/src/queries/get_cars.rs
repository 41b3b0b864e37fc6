use crate::{context::RequestContext, dto::CarDto, error::AppError, query_handler::QueryHandler};
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;
use vehicle_domain::{CarService, persist::UnitOfWorkProvider};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetCarsRequest {
    /// 是否包含已停用的车辆
    #[serde(default)]
    pub include_inactive: bool,
}

pub struct GetCarsHandler {
    provider: Arc<dyn UnitOfWorkProvider>,
    service: CarService,
}

impl GetCarsHandler {
    pub const NAME: &'static str = "GetCars";

    pub fn new(provider: Arc<dyn UnitOfWorkProvider>, service: CarService) -> Self {
        Self { provider, service }
    }
}

#[async_trait]
impl QueryHandler for GetCarsHandler {
    type Request = GetCarsRequest;
    type Response = Vec<CarDto>;

    async fn execute(
        &self,
        request: GetCarsRequest,
        _ctx: &RequestContext,
    ) -> Result<Vec<CarDto>, AppError> {
        let mut store = self.provider.session().await?;
        let cars = self
            .service
            .list_cars(store.as_mut(), request.include_inactive)
            .await?;
        Ok(cars.iter().map(CarDto::from).collect())
    }
}
