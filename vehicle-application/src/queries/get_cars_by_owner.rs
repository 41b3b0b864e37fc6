use crate::{context::RequestContext, dto::CarDto, error::AppError, query_handler::QueryHandler};
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;
use vehicle_domain::{CarService, persist::UnitOfWorkProvider};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetCarsByOwnerRequest {
    #[serde(alias = "ownerid")]
    pub owner_id: Uuid,
}

pub struct GetCarsByOwnerHandler {
    provider: Arc<dyn UnitOfWorkProvider>,
    service: CarService,
}

impl GetCarsByOwnerHandler {
    pub const NAME: &'static str = "GetCarsByOwner";

    pub fn new(provider: Arc<dyn UnitOfWorkProvider>, service: CarService) -> Self {
        Self { provider, service }
    }
}

#[async_trait]
impl QueryHandler for GetCarsByOwnerHandler {
    type Request = GetCarsByOwnerRequest;
    type Response = Vec<CarDto>;

    async fn execute(
        &self,
        request: GetCarsByOwnerRequest,
        ctx: &RequestContext,
    ) -> Result<Vec<CarDto>, AppError> {
        let mut store = self.provider.session().await?;
        let cars = self
            .service
            .list_cars_by_owner(store.as_mut(), request.owner_id)
            .await?;
        if cars.is_empty() {
            ctx.decisions().record("owner has no registered cars");
        }
        Ok(cars.iter().map(CarDto::from).collect())
    }
}
