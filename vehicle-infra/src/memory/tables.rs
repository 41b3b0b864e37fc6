//! 内存表
//!
//! 按主键保存四类实体，并维护与 Postgres 表一致的唯一约束：
//! `cars_vin_key`、`owners_email_key`、`brands_name_key`。
//! 列表按 `created_at` 升序返回，时间相同时按 ID 排序，保证顺序稳定。
//!
use std::collections::HashMap;
use uuid::Uuid;
use vehicle_domain::entities::{Brand, Car, Model, Owner};
use vehicle_domain::entity::Entity;
use vehicle_domain::error::{DomainError, DomainResult};
use vehicle_domain::value_object::Vin;

#[derive(Debug, Clone, Default)]
pub(crate) struct Tables {
    cars: HashMap<Uuid, Car>,
    models: HashMap<Uuid, Model>,
    owners: HashMap<Uuid, Owner>,
    brands: HashMap<Uuid, Brand>,
}

fn unique(constraint: &str) -> DomainError {
    DomainError::UniqueViolation {
        constraint: constraint.to_string(),
    }
}

fn insert_new<E>(table: &mut HashMap<Uuid, E>, entity: E, pkey: &str) -> DomainResult<E>
where
    E: Entity<Id = Uuid>,
{
    if table.contains_key(entity.id()) {
        return Err(unique(pkey));
    }
    table.insert(*entity.id(), entity.clone());
    Ok(entity)
}

fn ordered<'a, E, I>(rows: I) -> Vec<E>
where
    E: Entity<Id = Uuid> + 'a,
    I: Iterator<Item = &'a E>,
{
    let mut rows: Vec<E> = rows.cloned().collect();
    rows.sort_by_key(|row| (row.created_at(), *row.id()));
    rows
}

impl Tables {
    // --- cars ---

    pub(crate) fn insert_car(&mut self, car: Car) -> DomainResult<Car> {
        if self.cars.values().any(|c| c.vin() == car.vin()) {
            return Err(unique("cars_vin_key"));
        }
        insert_new(&mut self.cars, car, "cars_pkey")
    }

    pub(crate) fn update_car(&mut self, car: Car) -> DomainResult<Car> {
        if !self.cars.contains_key(car.id()) {
            return Err(DomainError::not_found(format!("car {} not found", car.id())));
        }
        if self
            .cars
            .values()
            .any(|c| c.id() != car.id() && c.vin() == car.vin())
        {
            return Err(unique("cars_vin_key"));
        }
        self.cars.insert(*car.id(), car.clone());
        Ok(car)
    }

    pub(crate) fn find_car(&self, id: Uuid) -> Option<Car> {
        self.cars.get(&id).cloned()
    }

    pub(crate) fn find_car_by_vin(&self, vin: &Vin) -> Option<Car> {
        self.cars.values().find(|c| c.vin() == vin).cloned()
    }

    pub(crate) fn list_cars(&self) -> Vec<Car> {
        ordered(self.cars.values())
    }

    pub(crate) fn list_cars_by_owner(&self, owner_id: Uuid) -> Vec<Car> {
        ordered(self.cars.values().filter(|c| c.owner_id() == owner_id))
    }

    // --- models ---

    pub(crate) fn insert_model(&mut self, model: Model) -> DomainResult<Model> {
        insert_new(&mut self.models, model, "models_pkey")
    }

    pub(crate) fn find_model(&self, id: Uuid) -> Option<Model> {
        self.models.get(&id).cloned()
    }

    pub(crate) fn list_models_by_brand(&self, brand_id: Uuid) -> Vec<Model> {
        ordered(self.models.values().filter(|m| m.brand_id() == brand_id))
    }

    // --- owners ---

    pub(crate) fn insert_owner(&mut self, owner: Owner) -> DomainResult<Owner> {
        if self.owners.values().any(|o| o.email() == owner.email()) {
            return Err(unique("owners_email_key"));
        }
        insert_new(&mut self.owners, owner, "owners_pkey")
    }

    pub(crate) fn find_owner(&self, id: Uuid) -> Option<Owner> {
        self.owners.get(&id).cloned()
    }

    pub(crate) fn find_owner_by_email(&self, email: &str) -> Option<Owner> {
        self.owners.values().find(|o| o.email() == email).cloned()
    }

    pub(crate) fn list_owners(&self) -> Vec<Owner> {
        ordered(self.owners.values())
    }

    // --- brands ---

    pub(crate) fn insert_brand(&mut self, brand: Brand) -> DomainResult<Brand> {
        if self.brands.values().any(|b| b.name() == brand.name()) {
            return Err(unique("brands_name_key"));
        }
        insert_new(&mut self.brands, brand, "brands_pkey")
    }

    pub(crate) fn find_brand(&self, id: Uuid) -> Option<Brand> {
        self.brands.get(&id).cloned()
    }

    pub(crate) fn find_brand_by_name(&self, name: &str) -> Option<Brand> {
        self.brands.values().find(|b| b.name() == name).cloned()
    }

    pub(crate) fn list_brands(&self) -> Vec<Brand> {
        ordered(self.brands.values())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use vehicle_domain::value_object::ModelYear;

    fn car(vin: &str) -> Car {
        Car::builder()
            .model_id(Uuid::new_v4())
            .owner_id(Uuid::new_v4())
            .year(ModelYear::new(2020).unwrap())
            .vin(Vin::new(vin).unwrap())
            .build()
    }

    #[test]
    fn vin_is_unique() {
        let mut tables = Tables::default();
        tables.insert_car(car("1HGCM82633A004352")).unwrap();
        let err = tables.insert_car(car("1HGCM82633A004352")).unwrap_err();
        assert!(matches!(
            err,
            DomainError::UniqueViolation { constraint } if constraint == "cars_vin_key"
        ));
    }

    #[test]
    fn update_requires_existing_row() {
        let mut tables = Tables::default();
        let err = tables.update_car(car("1HGCM82633A004352")).unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[test]
    fn lists_are_ordered_by_creation() {
        let mut tables = Tables::default();
        let now = Utc::now();
        let owner = Uuid::new_v4();
        for (i, vin) in ["1HGCM82633A000003", "1HGCM82633A000001", "1HGCM82633A000002"]
            .into_iter()
            .enumerate()
        {
            let offset = [2, 0, 1][i];
            let c = Car::builder()
                .model_id(Uuid::new_v4())
                .owner_id(owner)
                .year(ModelYear::new(2020).unwrap())
                .vin(Vin::new(vin).unwrap())
                .created_at(now + Duration::seconds(offset))
                .build();
            tables.insert_car(c).unwrap();
        }
        let vins: Vec<String> = tables
            .list_cars_by_owner(owner)
            .iter()
            .map(|c| c.vin().to_string())
            .collect();
        assert_eq!(
            vins,
            vec!["1HGCM82633A000001", "1HGCM82633A000002", "1HGCM82633A000003"]
        );
    }
}
