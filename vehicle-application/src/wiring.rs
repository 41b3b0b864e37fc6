//! 启动期装配：把车辆业务的全部命令与查询注册到注册表
//!
use crate::{
    commands::{
        CreateBrandHandler, CreateCarHandler, CreateModelHandler, CreateOwnerHandler,
        UpdateCarHandler,
    },
    queries::{GetCarByIdHandler, GetCarsByOwnerHandler, GetCarsHandler},
    registry::HandlerRegistry,
};
use std::sync::Arc;
use vehicle_domain::{CarService, CatalogService, persist::UnitOfWorkProvider};

pub fn register_vehicle_handlers(
    registry: &HandlerRegistry,
    provider: Arc<dyn UnitOfWorkProvider>,
) {
    let cars = CarService::new();
    let catalog = CatalogService::new();

    registry.register_command(CreateCarHandler::NAME, Arc::new(CreateCarHandler::new(cars)));
    registry.register_command(UpdateCarHandler::NAME, Arc::new(UpdateCarHandler::new(cars)));
    registry.register_command(
        CreateBrandHandler::NAME,
        Arc::new(CreateBrandHandler::new(catalog)),
    );
    registry.register_command(
        CreateModelHandler::NAME,
        Arc::new(CreateModelHandler::new(catalog)),
    );
    registry.register_command(
        CreateOwnerHandler::NAME,
        Arc::new(CreateOwnerHandler::new(catalog)),
    );

    registry.register_query(
        GetCarsHandler::NAME,
        Arc::new(GetCarsHandler::new(provider.clone(), cars)),
    );
    registry.register_query(
        GetCarByIdHandler::NAME,
        Arc::new(GetCarByIdHandler::new(provider.clone(), cars)),
    );
    registry.register_query(
        GetCarsByOwnerHandler::NAME,
        Arc::new(GetCarsByOwnerHandler::new(provider, cars)),
    );

    tracing::info!(
        commands = registry.registered_commands().len(),
        queries = registry.registered_queries().len(),
        "vehicle handlers registered"
    );
}
