#![allow(dead_code)]

use serde_json::{Value, json};
use std::sync::Arc;
use vehicle_application::{
    HandlerRegistry, Mediator, RequestEnvelope, RequestMetadata, register_vehicle_handlers,
};
use vehicle_infra::InMemoryStore;

pub const VIN: &str = "1HGCM82633A004352";
pub const OTHER_VIN: &str = "JH4KA8260MC000000";

pub struct App {
    pub store: InMemoryStore,
    pub mediator: Mediator,
}

/// 注册了全部车辆处理器的调度器
pub fn vehicle_app() -> App {
    let store = InMemoryStore::new();
    let registry = Arc::new(HandlerRegistry::new());
    register_vehicle_handlers(&registry, Arc::new(store.clone()));
    let mediator = Mediator::new(registry, Arc::new(store.clone()));
    App { store, mediator }
}

pub struct Catalog {
    pub model_id: String,
    pub owner_id: String,
}

/// 通过命令登记一个品牌、车型与车主
pub async fn seed_catalog(app: &App) -> Catalog {
    let brand = command(app, "CreateBrand", json!({ "name": "Honda", "country": "Japan" })).await;
    let model = command(
        app,
        "CreateModel",
        json!({ "name": "Accord", "brandId": brand["id"], "startYear": 1976 }),
    )
    .await;
    let owner = command(
        app,
        "CreateOwner",
        json!({ "name": "Ada", "email": "ada@example.com" }),
    )
    .await;

    Catalog {
        model_id: id_of(&model),
        owner_id: id_of(&owner),
    }
}

pub fn car_body(catalog: &Catalog, vin: &str) -> Value {
    json!({
        "modelid": catalog.model_id,
        "ownerid": catalog.owner_id,
        "year": 2020,
        "color": "red",
        "vin": vin,
    })
}

/// 执行一个必须成功的命令，返回其数据
pub async fn command(app: &App, name: &str, body: Value) -> Value {
    let outcome = app
        .mediator
        .send_command(name, RequestEnvelope::from_value(body), RequestMetadata::default())
        .await;
    match outcome.result {
        Ok(data) => data,
        Err(err) => panic!("{name} failed: {err:?}"),
    }
}

pub fn id_of(data: &Value) -> String {
    data["id"]
        .as_str()
        .map(str::to_string)
        .unwrap_or_else(|| panic!("missing id in {data}"))
}
