//! 车辆命令与查询的端到端流程（内存存储）
mod common;

use async_trait::async_trait;
use chrono::{Datelike, Utc};
use common::{App, OTHER_VIN, VIN, car_body, command, id_of, seed_catalog, vehicle_app};
use serde_json::{Value, json};
use std::sync::Arc;
use vehicle_application::commands::DEFAULTED_YEAR_NOTE;
use vehicle_application::query_handler::QueryHandler;
use vehicle_application::{
    ActionKind, ApiResponse, AppError, DispatchOutcome, HandlerRegistry, Mediator,
    RequestContext, RequestEnvelope, RequestMetadata,
};
use vehicle_infra::InMemoryStore;

async fn query(app: &App, name: &str, envelope: RequestEnvelope) -> DispatchOutcome {
    app.mediator
        .send_query(name, envelope, RequestMetadata::default())
        .await
}

#[tokio::test]
async fn create_car_defaults_year_and_commits() {
    let app = vehicle_app();
    let catalog = seed_catalog(&app).await;
    let before = app.store.stats();

    let mut body = car_body(&catalog, VIN);
    body.as_object_mut().unwrap().remove("year");
    let outcome = app
        .mediator
        .send_command("CreateCar", RequestEnvelope::from_value(body), RequestMetadata::default())
        .await;

    assert!(outcome.is_success(), "{:?}", outcome.error());
    assert_eq!(outcome.decisions, vec![DEFAULTED_YEAR_NOTE.to_string()]);
    let stats = app.store.stats();
    assert_eq!(stats.committed, before.committed + 1);
    assert_eq!(stats.rolled_back, before.rolled_back);

    let response = ApiResponse::from(outcome);
    assert_eq!(response.status_code, 201);
    assert_eq!(response.message, "Operation completed successfully");
    let data = response.data.unwrap();
    assert_eq!(data["year"], json!(Utc::now().year()));
    assert_eq!(data["vin"], json!(VIN));
    assert_eq!(data["modelId"], json!(catalog.model_id));
    assert_eq!(data["active"], json!(true));
}

#[tokio::test]
async fn short_vin_yields_one_issue_and_no_transaction() {
    let app = vehicle_app();
    let catalog = seed_catalog(&app).await;
    let before = app.store.stats();

    let outcome = app
        .mediator
        .send_command(
            "CreateCar",
            RequestEnvelope::from_value(car_body(&catalog, "1HGCM82633")),
            RequestMetadata::default(),
        )
        .await;

    match outcome.error() {
        Some(AppError::ValidationFailed { issues }) => {
            assert_eq!(issues.len(), 1);
            assert_eq!(issues[0].field, "vin");
        }
        other => panic!("unexpected {other:?}"),
    }
    assert_eq!(app.store.stats(), before);

    let response = ApiResponse::from(outcome);
    assert_eq!(response.status_code, 400);
    assert_eq!(response.message, "Bad Request");
    assert_eq!(response.errors, vec!["vin: vin must be exactly 17 characters".to_string()]);
}

#[tokio::test]
async fn duplicate_vin_is_a_conflict_and_rolls_back() {
    let app = vehicle_app();
    let catalog = seed_catalog(&app).await;
    command(&app, "CreateCar", car_body(&catalog, VIN)).await;
    let before = app.store.stats();

    let outcome = app
        .mediator
        .send_command(
            "CreateCar",
            RequestEnvelope::from_value(car_body(&catalog, VIN)),
            RequestMetadata::default(),
        )
        .await;

    assert!(matches!(
        outcome.error(),
        Some(AppError::BusinessRuleViolation { code, .. }) if code == "DUPLICATE_VIN"
    ));
    let stats = app.store.stats();
    assert_eq!(stats.committed, before.committed);
    assert_eq!(stats.rolled_back, before.rolled_back + 1);
    assert!(
        outcome
            .decisions
            .contains(&"changes were rolled back: business rule DUPLICATE_VIN was violated".to_string())
    );
    let response = ApiResponse::from(outcome);
    assert_eq!(response.status_code, 409);
    assert_eq!(
        response.errors,
        vec!["DUPLICATE_VIN: a vehicle with this VIN already exists".to_string()]
    );
}

#[tokio::test]
async fn unknown_references_are_business_errors() {
    let app = vehicle_app();
    let catalog = seed_catalog(&app).await;

    let mut body = car_body(&catalog, VIN);
    body["modelid"] = json!(uuid::Uuid::new_v4());
    let outcome = app
        .mediator
        .send_command("CreateCar", RequestEnvelope::from_value(body), RequestMetadata::default())
        .await;

    assert!(matches!(
        outcome.error(),
        Some(AppError::BusinessRuleViolation { code, .. }) if code == "MODEL_NOT_FOUND"
    ));
}

#[tokio::test]
async fn update_car_takes_id_from_caller_and_deactivates() {
    let app = vehicle_app();
    let catalog = seed_catalog(&app).await;
    let car = command(&app, "CreateCar", car_body(&catalog, VIN)).await;
    command(&app, "CreateCar", car_body(&catalog, OTHER_VIN)).await;
    let car_id = id_of(&car);

    let outcome = app
        .mediator
        .send_command(
            "UpdateCar",
            RequestEnvelope::from_value(json!({
                "id": uuid::Uuid::new_v4(),
                "active": false,
                "color": "green",
            }))
            .with_field("id", car_id.clone()),
            RequestMetadata::default(),
        )
        .await;

    assert!(outcome.is_success(), "{:?}", outcome.error());
    assert!(
        outcome
            .decisions
            .contains(&"car will be marked as inactive".to_string())
    );
    let data = outcome.result.unwrap();
    assert_eq!(data["id"], json!(car_id));
    assert_eq!(data["color"], json!("green"));

    let active = query(&app, "GetCars", RequestEnvelope::empty()).await;
    assert_eq!(active.result.unwrap().as_array().unwrap().len(), 1);

    let all = query(
        &app,
        "GetCars",
        RequestEnvelope::empty().with_field("includeInactive", true),
    )
    .await;
    assert_eq!(all.result.unwrap().as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn empty_update_is_rejected() {
    let app = vehicle_app();
    let outcome = app
        .mediator
        .send_command(
            "UpdateCar",
            RequestEnvelope::empty().with_field("id", uuid::Uuid::new_v4().to_string()),
            RequestMetadata::default(),
        )
        .await;

    match outcome.error() {
        Some(AppError::ValidationFailed { issues }) => {
            assert_eq!(issues.len(), 1);
            assert_eq!(issues[0].field, "requestBody");
        }
        other => panic!("unexpected {other:?}"),
    }
    assert_eq!(app.store.stats().begun, 0);
}

#[tokio::test]
async fn car_queries() {
    let app = vehicle_app();
    let catalog = seed_catalog(&app).await;
    let car = command(&app, "CreateCar", car_body(&catalog, VIN)).await;

    let found = query(
        &app,
        "GetCarByID",
        RequestEnvelope::empty().with_field("id", id_of(&car)),
    )
    .await;
    assert_eq!(found.result.unwrap()["vin"], json!(VIN));

    let missing = query(
        &app,
        "GetCarByID",
        RequestEnvelope::empty().with_field("id", uuid::Uuid::new_v4().to_string()),
    )
    .await;
    assert!(matches!(missing.error(), Some(AppError::NotFound { .. })));
    assert_eq!(ApiResponse::from(missing).status_code, 404);

    let owned = query(
        &app,
        "GetCarsByOwner",
        RequestEnvelope::empty().with_field("ownerId", catalog.owner_id.clone()),
    )
    .await;
    let response = ApiResponse::from(owned);
    assert_eq!(response.status_code, 200);
    assert_eq!(response.data.unwrap().as_array().unwrap().len(), 1);

    // 查询不开启工作单元
    let stats = app.store.stats();
    assert_eq!(stats.open(), 0);
}

#[tokio::test]
async fn owner_without_cars_is_noted() {
    let app = vehicle_app();
    let catalog = seed_catalog(&app).await;

    let outcome = query(
        &app,
        "GetCarsByOwner",
        RequestEnvelope::empty().with_field("ownerid", catalog.owner_id),
    )
    .await;

    assert_eq!(outcome.result.as_ref().unwrap(), &json!([]));
    assert_eq!(outcome.decisions, vec!["owner has no registered cars".to_string()]);
}

#[tokio::test]
async fn catalog_commands_normalize_and_note() {
    let app = vehicle_app();
    let brand = command(&app, "CreateBrand", json!({ "name": "Toyota" })).await;

    let outcome = app
        .mediator
        .send_command(
            "CreateModel",
            RequestEnvelope::from_value(json!({
                "name": "Corolla",
                "brandId": brand["id"],
                "startYear": 1966,
            })),
            RequestMetadata::default(),
        )
        .await;
    assert_eq!(
        outcome.decisions,
        vec!["model has no end year and is considered in production".to_string()]
    );

    let owner = command(
        &app,
        "CreateOwner",
        json!({ "name": "Grace", "email": "  Grace@Example.COM " }),
    )
    .await;
    assert_eq!(owner["email"], json!("grace@example.com"));

    let duplicate = app
        .mediator
        .send_command(
            "CreateBrand",
            RequestEnvelope::from_value(json!({ "name": "Toyota" })),
            RequestMetadata::default(),
        )
        .await;
    assert!(matches!(
        duplicate.error(),
        Some(AppError::BusinessRuleViolation { code, .. }) if code == "DUPLICATE_BRAND"
    ));
}

#[tokio::test]
async fn queries_are_not_found_when_unregistered() {
    let store = InMemoryStore::new();
    let mediator = Mediator::new(Arc::new(HandlerRegistry::new()), Arc::new(store));

    let outcome = mediator
        .send_query("GetCars", RequestEnvelope::empty(), RequestMetadata::default())
        .await;

    assert!(matches!(
        outcome.error(),
        Some(AppError::HandlerNotFound { kind: ActionKind::Query, name }) if name == "GetCars"
    ));
    assert_eq!(ApiResponse::from(outcome).status_code, 404);
}

struct FixedCars;

#[async_trait]
impl QueryHandler for FixedCars {
    type Request = Value;
    type Response = String;

    async fn execute(&self, _request: Value, _ctx: &RequestContext) -> Result<String, AppError> {
        Ok("fixed".to_string())
    }
}

#[tokio::test]
async fn later_registration_replaces_earlier_one() {
    let app = vehicle_app();
    app.mediator
        .registry()
        .register_query("GetCars", Arc::new(FixedCars));

    let outcome = query(&app, "GetCars", RequestEnvelope::empty()).await;
    assert_eq!(outcome.result.unwrap(), json!("fixed"));
}
