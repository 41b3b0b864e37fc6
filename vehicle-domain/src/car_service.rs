//! 车辆领域服务
//!
//! 封装跨实体的车辆业务规则：VIN 唯一、车型与车主必须存在。
//! 服务本身无状态，所有读写都经由调用方传入的 `Store`（通常是工作单元）完成。
//!
use crate::entities::{Car, CarChanges};
use crate::entity::Entity;
use crate::error::{DomainError, DomainResult};
use crate::persist::Store;
use uuid::Uuid;

/// 业务错误码
pub mod codes {
    pub const DUPLICATE_VIN: &str = "DUPLICATE_VIN";
    pub const MODEL_NOT_FOUND: &str = "MODEL_NOT_FOUND";
    pub const OWNER_NOT_FOUND: &str = "OWNER_NOT_FOUND";
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CarService;

impl CarService {
    pub fn new() -> Self {
        Self
    }

    /// 登记一辆新车
    pub async fn create_car<S>(&self, store: &mut S, car: Car) -> DomainResult<Car>
    where
        S: Store + ?Sized,
    {
        if store.find_car_by_vin(car.vin()).await?.is_some() {
            return Err(DomainError::business_rule(
                codes::DUPLICATE_VIN,
                "a vehicle with this VIN already exists",
            ));
        }

        self.ensure_references(store, Some(car.model_id()), Some(car.owner_id()))
            .await?;

        store.insert_car(car).await
    }

    /// 部分更新一辆已存在的车
    pub async fn update_car<S>(&self, store: &mut S, id: Uuid, changes: CarChanges) -> DomainResult<Car>
    where
        S: Store + ?Sized,
    {
        let Some(mut car) = store.find_car(id).await? else {
            return Err(DomainError::not_found(format!("{} {id} not found", Car::TYPE)));
        };

        self.ensure_references(store, changes.model_id, changes.owner_id)
            .await?;

        if let Some(vin) = &changes.vin
            && let Some(existing) = store.find_car_by_vin(vin).await?
            && existing.id() != car.id()
        {
            return Err(DomainError::business_rule(
                codes::DUPLICATE_VIN,
                "another vehicle with this VIN already exists",
            ));
        }

        car.apply(changes);
        store.update_car(car).await
    }

    pub async fn get_car<S>(&self, store: &mut S, id: Uuid) -> DomainResult<Car>
    where
        S: Store + ?Sized,
    {
        store
            .find_car(id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("{} {id} not found", Car::TYPE)))
    }

    pub async fn list_cars<S>(&self, store: &mut S, include_inactive: bool) -> DomainResult<Vec<Car>>
    where
        S: Store + ?Sized,
    {
        let cars = store.list_cars().await?;
        Ok(cars
            .into_iter()
            .filter(|car| include_inactive || car.active())
            .collect())
    }

    pub async fn list_cars_by_owner<S>(&self, store: &mut S, owner_id: Uuid) -> DomainResult<Vec<Car>>
    where
        S: Store + ?Sized,
    {
        if !store.owner_exists(owner_id).await? {
            return Err(DomainError::not_found(format!("owner {owner_id} not found")));
        }
        store.list_cars_by_owner(owner_id).await
    }

    async fn ensure_references<S>(
        &self,
        store: &mut S,
        model_id: Option<Uuid>,
        owner_id: Option<Uuid>,
    ) -> DomainResult<()>
    where
        S: Store + ?Sized,
    {
        if let Some(model_id) = model_id
            && !store.model_exists(model_id).await?
        {
            return Err(DomainError::business_rule(
                codes::MODEL_NOT_FOUND,
                "the referenced model does not exist",
            ));
        }

        if let Some(owner_id) = owner_id
            && !store.owner_exists(owner_id).await?
        {
            return Err(DomainError::business_rule(
                codes::OWNER_NOT_FOUND,
                "the referenced owner does not exist",
            ));
        }

        Ok(())
    }
}
