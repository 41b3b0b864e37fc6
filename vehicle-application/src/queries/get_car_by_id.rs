use crate::{context::RequestContext, dto::CarDto, error::AppError, query_handler::QueryHandler};
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;
use vehicle_domain::{CarService, persist::UnitOfWorkProvider};

#[derive(Debug, Clone, Deserialize)]
pub struct GetCarByIdRequest {
    pub id: Uuid,
}

pub struct GetCarByIdHandler {
    provider: Arc<dyn UnitOfWorkProvider>,
    service: CarService,
}

impl GetCarByIdHandler {
    pub const NAME: &'static str = "GetCarByID";

    pub fn new(provider: Arc<dyn UnitOfWorkProvider>, service: CarService) -> Self {
        Self { provider, service }
    }
}

#[async_trait]
impl QueryHandler for GetCarByIdHandler {
    type Request = GetCarByIdRequest;
    type Response = CarDto;

    async fn execute(
        &self,
        request: GetCarByIdRequest,
        _ctx: &RequestContext,
    ) -> Result<CarDto, AppError> {
        let mut store = self.provider.session().await?;
        let car = self.service.get_car(store.as_mut(), request.id).await?;
        Ok(CarDto::from(&car))
    }
}
