//! 实体仓储
//!
//! 所有方法均以 `&mut self` 调用，使同一个事务句柄可以被顺序地复用。
//! 方法名带实体前缀，避免在 `Store` 组合中产生歧义。
//!
use crate::entities::{Brand, Car, Model, Owner};
use crate::error::DomainResult;
use crate::value_object::Vin;
use async_trait::async_trait;
use uuid::Uuid;

#[async_trait]
pub trait CarRepository: Send {
    async fn insert_car(&mut self, car: Car) -> DomainResult<Car>;

    /// 覆盖写入已存在的车辆；车辆不存在时返回 `NotFound`
    async fn update_car(&mut self, car: Car) -> DomainResult<Car>;

    async fn find_car(&mut self, id: Uuid) -> DomainResult<Option<Car>>;

    async fn find_car_by_vin(&mut self, vin: &Vin) -> DomainResult<Option<Car>>;

    async fn list_cars(&mut self) -> DomainResult<Vec<Car>>;

    async fn list_cars_by_owner(&mut self, owner_id: Uuid) -> DomainResult<Vec<Car>>;
}

#[async_trait]
pub trait ModelRepository: Send {
    async fn insert_model(&mut self, model: Model) -> DomainResult<Model>;

    async fn find_model(&mut self, id: Uuid) -> DomainResult<Option<Model>>;

    async fn model_exists(&mut self, id: Uuid) -> DomainResult<bool> {
        Ok(self.find_model(id).await?.is_some())
    }

    async fn list_models_by_brand(&mut self, brand_id: Uuid) -> DomainResult<Vec<Model>>;
}

#[async_trait]
pub trait OwnerRepository: Send {
    async fn insert_owner(&mut self, owner: Owner) -> DomainResult<Owner>;

    async fn find_owner(&mut self, id: Uuid) -> DomainResult<Option<Owner>>;

    async fn owner_exists(&mut self, id: Uuid) -> DomainResult<bool> {
        Ok(self.find_owner(id).await?.is_some())
    }

    async fn find_owner_by_email(&mut self, email: &str) -> DomainResult<Option<Owner>>;

    async fn list_owners(&mut self) -> DomainResult<Vec<Owner>>;
}

#[async_trait]
pub trait BrandRepository: Send {
    async fn insert_brand(&mut self, brand: Brand) -> DomainResult<Brand>;

    async fn find_brand(&mut self, id: Uuid) -> DomainResult<Option<Brand>>;

    async fn brand_exists(&mut self, id: Uuid) -> DomainResult<bool> {
        Ok(self.find_brand(id).await?.is_some())
    }

    async fn find_brand_by_name(&mut self, name: &str) -> DomainResult<Option<Brand>>;

    async fn list_brands(&mut self) -> DomainResult<Vec<Brand>>;
}
