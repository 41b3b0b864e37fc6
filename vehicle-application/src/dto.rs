//! 数据传输对象（DTO）
//!
//! 作为应用层的输出载体，与领域模型解耦，字段采用 camelCase 序列化。
//!
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use vehicle_domain::entities::{Brand, Car, Model, Owner};
use vehicle_domain::entity::Entity;

/// 可作为处理器输出的类型
pub trait Dto: Serialize + Send + Sync + 'static {}

impl<T: Dto> Dto for Vec<T> {}

impl Dto for String {}

impl Dto for serde_json::Value {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarDto {
    pub id: Uuid,
    pub model_id: Uuid,
    pub owner_id: Uuid,
    pub year: i32,
    pub color: String,
    pub vin: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Dto for CarDto {}

impl From<&Car> for CarDto {
    fn from(car: &Car) -> Self {
        Self {
            id: *car.id(),
            model_id: car.model_id(),
            owner_id: car.owner_id(),
            year: car.year().value(),
            color: car.color().to_string(),
            vin: car.vin().to_string(),
            active: car.active(),
            created_at: car.created_at(),
            updated_at: car.updated_at(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandDto {
    pub id: Uuid,
    pub name: String,
    pub country: String,
    pub logo_url: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl Dto for BrandDto {}

impl From<&Brand> for BrandDto {
    fn from(brand: &Brand) -> Self {
        Self {
            id: *brand.id(),
            name: brand.name().to_string(),
            country: brand.country().to_string(),
            logo_url: brand.logo_url().to_string(),
            active: brand.active(),
            created_at: brand.created_at(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelDto {
    pub id: Uuid,
    pub name: String,
    pub brand_id: Uuid,
    pub start_year: i32,
    pub end_year: Option<i32>,
    pub category: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl Dto for ModelDto {}

impl From<&Model> for ModelDto {
    fn from(model: &Model) -> Self {
        Self {
            id: *model.id(),
            name: model.name().to_string(),
            brand_id: model.brand_id(),
            start_year: model.start_year().value(),
            end_year: model.end_year().map(|y| y.value()),
            category: model.category().to_string(),
            active: model.active(),
            created_at: model.created_at(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerDto {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub created_at: DateTime<Utc>,
}

impl Dto for OwnerDto {}

impl From<&Owner> for OwnerDto {
    fn from(owner: &Owner) -> Self {
        Self {
            id: *owner.id(),
            name: owner.name().to_string(),
            email: owner.email().to_string(),
            phone: owner.phone().to_string(),
            address: owner.address().to_string(),
            created_at: owner.created_at(),
        }
    }
}
