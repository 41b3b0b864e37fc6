use serde_json::json;
use std::sync::Arc;
use vehicle_application::{
    ApiResponse, HandlerRegistry, Mediator, RequestEnvelope, RequestMetadata,
    register_vehicle_handlers,
};
use vehicle_infra::{config, telemetry};

fn print(title: &str, response: &ApiResponse) -> anyhow::Result<()> {
    println!("== {title}\n{}", serde_json::to_string_pretty(response)?);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = config::load_from_env()?;
    telemetry::init_tracing(&config)?;
    tracing::info!(config = %config.summary(), "starting");

    let provider = vehicle_infra::connect(&config).await?;
    let registry = Arc::new(HandlerRegistry::new());
    register_vehicle_handlers(&registry, provider.clone());

    let mut mediator = Mediator::new(registry, provider);
    if let Some(timeout) = config.request_timeout {
        mediator = mediator.with_default_timeout(timeout);
    }

    let metadata = || {
        RequestMetadata::builder()
            .correlation_id("demo-1")
            .actor_id("u-1")
            .build()
    };

    let brand = mediator
        .send_command(
            "CreateBrand",
            RequestEnvelope::from_value(json!({ "name": "Honda", "country": "Japan" })),
            metadata(),
        )
        .await
        .result?;
    let model = mediator
        .send_command(
            "CreateModel",
            RequestEnvelope::from_value(json!({
                "name": "Accord",
                "brandId": brand["id"],
                "startYear": 1976,
            })),
            metadata(),
        )
        .await
        .result?;
    let owner = mediator
        .send_command(
            "CreateOwner",
            RequestEnvelope::from_value(json!({ "name": "Alice", "email": "alice@example.com" })),
            metadata(),
        )
        .await
        .result?;

    // 未给出年份 -> 使用当前年份并记录决策
    let created = mediator
        .send_command(
            "CreateCar",
            RequestEnvelope::from_body(format!(
                r#"{{"modelid":{},"ownerid":{},"color":"silver","vin":"1HGCM82633A004352"}}"#,
                model["id"], owner["id"]
            )),
            metadata(),
        )
        .await;
    print("CreateCar", &ApiResponse::from(created))?;

    // VIN 长度不对 -> 400
    let invalid = mediator
        .send_command(
            "CreateCar",
            RequestEnvelope::from_value(json!({
                "modelid": model["id"],
                "ownerid": owner["id"],
                "vin": "1HGCM8263",
            })),
            metadata(),
        )
        .await;
    print("CreateCar (short vin)", &ApiResponse::from(invalid))?;

    let cars = mediator
        .send_query(
            "GetCarsByOwner",
            RequestEnvelope::empty().with_field("ownerId", owner["id"].clone()),
            metadata(),
        )
        .await;
    print("GetCarsByOwner", &ApiResponse::from(cars))?;

    // 未注册的命令 -> 404
    let unknown = mediator
        .send_command("DeleteCar", RequestEnvelope::empty(), metadata())
        .await;
    print("DeleteCar", &ApiResponse::from(unknown))?;

    Ok(())
}
