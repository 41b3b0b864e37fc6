//! 行结构与按执行器泛化的 SQL 语句
//!
//! 每条语句都接受任意 `PgExecutor`，事务连接与连接池共用同一套实现。
//!
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgExecutor};
use uuid::Uuid;
use vehicle_domain::entities::{Brand, Car, Model, Owner};
use vehicle_domain::entity::Entity;
use vehicle_domain::error::{DomainError, DomainResult};
use vehicle_domain::value_object::{ModelYear, Vin};

const CAR_COLUMNS: &str =
    "id, model_id, owner_id, year, color, vin, active, created_at, updated_at";
const MODEL_COLUMNS: &str =
    "id, name, brand_id, start_year, end_year, category, active, created_at, updated_at";
const OWNER_COLUMNS: &str = "id, name, email, phone, address, created_at, updated_at";
const BRAND_COLUMNS: &str = "id, name, country, logo_url, active, created_at, updated_at";

#[derive(Debug, FromRow)]
struct CarRow {
    id: Uuid,
    model_id: Uuid,
    owner_id: Uuid,
    year: i32,
    color: String,
    vin: String,
    active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<CarRow> for Car {
    type Error = DomainError;

    fn try_from(row: CarRow) -> Result<Self, Self::Error> {
        Ok(Car::builder()
            .id(row.id)
            .model_id(row.model_id)
            .owner_id(row.owner_id)
            .year(ModelYear::new(row.year)?)
            .color(row.color)
            .vin(Vin::new(row.vin)?)
            .active(row.active)
            .created_at(row.created_at)
            .updated_at(row.updated_at)
            .build())
    }
}

#[derive(Debug, FromRow)]
struct ModelRow {
    id: Uuid,
    name: String,
    brand_id: Uuid,
    start_year: i32,
    end_year: Option<i32>,
    category: String,
    active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ModelRow> for Model {
    type Error = DomainError;

    fn try_from(row: ModelRow) -> Result<Self, Self::Error> {
        Ok(Model::builder()
            .id(row.id)
            .name(row.name)
            .brand_id(row.brand_id)
            .start_year(ModelYear::new(row.start_year)?)
            .maybe_end_year(row.end_year.map(ModelYear::new).transpose()?)
            .category(row.category)
            .active(row.active)
            .created_at(row.created_at)
            .updated_at(row.updated_at)
            .build())
    }
}

#[derive(Debug, FromRow)]
struct OwnerRow {
    id: Uuid,
    name: String,
    email: String,
    phone: String,
    address: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<OwnerRow> for Owner {
    fn from(row: OwnerRow) -> Self {
        Owner::builder()
            .id(row.id)
            .name(row.name)
            .email(row.email)
            .phone(row.phone)
            .address(row.address)
            .created_at(row.created_at)
            .updated_at(row.updated_at)
            .build()
    }
}

#[derive(Debug, FromRow)]
struct BrandRow {
    id: Uuid,
    name: String,
    country: String,
    logo_url: String,
    active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<BrandRow> for Brand {
    fn from(row: BrandRow) -> Self {
        Brand::builder()
            .id(row.id)
            .name(row.name)
            .country(row.country)
            .logo_url(row.logo_url)
            .active(row.active)
            .created_at(row.created_at)
            .updated_at(row.updated_at)
            .build()
    }
}

// --- cars ---

pub(super) async fn insert_car<'e, E>(executor: E, car: &Car) -> DomainResult<()>
where
    E: PgExecutor<'e>,
{
    sqlx::query(&format!(
        "INSERT INTO cars ({CAR_COLUMNS}) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)"
    ))
    .bind(*car.id())
    .bind(car.model_id())
    .bind(car.owner_id())
    .bind(car.year().value())
    .bind(car.color())
    .bind(car.vin().as_str())
    .bind(car.active())
    .bind(car.created_at())
    .bind(car.updated_at())
    .execute(executor)
    .await?;
    Ok(())
}

pub(super) async fn update_car<'e, E>(executor: E, car: &Car) -> DomainResult<()>
where
    E: PgExecutor<'e>,
{
    let result = sqlx::query(
        "UPDATE cars SET model_id = $2, owner_id = $3, year = $4, color = $5, vin = $6, \
         active = $7, updated_at = $8 WHERE id = $1",
    )
    .bind(*car.id())
    .bind(car.model_id())
    .bind(car.owner_id())
    .bind(car.year().value())
    .bind(car.color())
    .bind(car.vin().as_str())
    .bind(car.active())
    .bind(car.updated_at())
    .execute(executor)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DomainError::not_found(format!("car {} not found", car.id())));
    }
    Ok(())
}

pub(super) async fn find_car<'e, E>(executor: E, id: Uuid) -> DomainResult<Option<Car>>
where
    E: PgExecutor<'e>,
{
    sqlx::query_as::<_, CarRow>(&format!("SELECT {CAR_COLUMNS} FROM cars WHERE id = $1"))
        .bind(id)
        .fetch_optional(executor)
        .await?
        .map(Car::try_from)
        .transpose()
}

pub(super) async fn find_car_by_vin<'e, E>(executor: E, vin: &Vin) -> DomainResult<Option<Car>>
where
    E: PgExecutor<'e>,
{
    sqlx::query_as::<_, CarRow>(&format!("SELECT {CAR_COLUMNS} FROM cars WHERE vin = $1"))
        .bind(vin.as_str())
        .fetch_optional(executor)
        .await?
        .map(Car::try_from)
        .transpose()
}

pub(super) async fn list_cars<'e, E>(executor: E, owner_id: Option<Uuid>) -> DomainResult<Vec<Car>>
where
    E: PgExecutor<'e>,
{
    sqlx::query_as::<_, CarRow>(&format!(
        "SELECT {CAR_COLUMNS} FROM cars WHERE ($1::uuid IS NULL OR owner_id = $1) \
         ORDER BY created_at, id"
    ))
    .bind(owner_id)
    .fetch_all(executor)
    .await?
    .into_iter()
    .map(Car::try_from)
    .collect()
}

// --- models ---

pub(super) async fn insert_model<'e, E>(executor: E, model: &Model) -> DomainResult<()>
where
    E: PgExecutor<'e>,
{
    sqlx::query(&format!(
        "INSERT INTO models ({MODEL_COLUMNS}) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)"
    ))
    .bind(*model.id())
    .bind(model.name())
    .bind(model.brand_id())
    .bind(model.start_year().value())
    .bind(model.end_year().map(|y| y.value()))
    .bind(model.category())
    .bind(model.active())
    .bind(model.created_at())
    .bind(model.updated_at())
    .execute(executor)
    .await?;
    Ok(())
}

pub(super) async fn find_model<'e, E>(executor: E, id: Uuid) -> DomainResult<Option<Model>>
where
    E: PgExecutor<'e>,
{
    sqlx::query_as::<_, ModelRow>(&format!("SELECT {MODEL_COLUMNS} FROM models WHERE id = $1"))
        .bind(id)
        .fetch_optional(executor)
        .await?
        .map(Model::try_from)
        .transpose()
}

pub(super) async fn list_models_by_brand<'e, E>(
    executor: E,
    brand_id: Uuid,
) -> DomainResult<Vec<Model>>
where
    E: PgExecutor<'e>,
{
    sqlx::query_as::<_, ModelRow>(&format!(
        "SELECT {MODEL_COLUMNS} FROM models WHERE brand_id = $1 ORDER BY created_at, id"
    ))
    .bind(brand_id)
    .fetch_all(executor)
    .await?
    .into_iter()
    .map(Model::try_from)
    .collect()
}

// --- owners ---

pub(super) async fn insert_owner<'e, E>(executor: E, owner: &Owner) -> DomainResult<()>
where
    E: PgExecutor<'e>,
{
    sqlx::query(&format!(
        "INSERT INTO owners ({OWNER_COLUMNS}) VALUES ($1, $2, $3, $4, $5, $6, $7)"
    ))
    .bind(*owner.id())
    .bind(owner.name())
    .bind(owner.email())
    .bind(owner.phone())
    .bind(owner.address())
    .bind(owner.created_at())
    .bind(owner.updated_at())
    .execute(executor)
    .await?;
    Ok(())
}

pub(super) async fn find_owner<'e, E>(executor: E, id: Uuid) -> DomainResult<Option<Owner>>
where
    E: PgExecutor<'e>,
{
    let row = sqlx::query_as::<_, OwnerRow>(&format!(
        "SELECT {OWNER_COLUMNS} FROM owners WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(executor)
    .await?;
    Ok(row.map(Owner::from))
}

pub(super) async fn find_owner_by_email<'e, E>(
    executor: E,
    email: &str,
) -> DomainResult<Option<Owner>>
where
    E: PgExecutor<'e>,
{
    let row = sqlx::query_as::<_, OwnerRow>(&format!(
        "SELECT {OWNER_COLUMNS} FROM owners WHERE email = $1"
    ))
    .bind(email)
    .fetch_optional(executor)
    .await?;
    Ok(row.map(Owner::from))
}

pub(super) async fn list_owners<'e, E>(executor: E) -> DomainResult<Vec<Owner>>
where
    E: PgExecutor<'e>,
{
    let rows = sqlx::query_as::<_, OwnerRow>(&format!(
        "SELECT {OWNER_COLUMNS} FROM owners ORDER BY created_at, id"
    ))
    .fetch_all(executor)
    .await?;
    Ok(rows.into_iter().map(Owner::from).collect())
}

// --- brands ---

pub(super) async fn insert_brand<'e, E>(executor: E, brand: &Brand) -> DomainResult<()>
where
    E: PgExecutor<'e>,
{
    sqlx::query(&format!(
        "INSERT INTO brands ({BRAND_COLUMNS}) VALUES ($1, $2, $3, $4, $5, $6, $7)"
    ))
    .bind(*brand.id())
    .bind(brand.name())
    .bind(brand.country())
    .bind(brand.logo_url())
    .bind(brand.active())
    .bind(brand.created_at())
    .bind(brand.updated_at())
    .execute(executor)
    .await?;
    Ok(())
}

pub(super) async fn find_brand<'e, E>(executor: E, id: Uuid) -> DomainResult<Option<Brand>>
where
    E: PgExecutor<'e>,
{
    let row = sqlx::query_as::<_, BrandRow>(&format!(
        "SELECT {BRAND_COLUMNS} FROM brands WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(executor)
    .await?;
    Ok(row.map(Brand::from))
}

pub(super) async fn find_brand_by_name<'e, E>(
    executor: E,
    name: &str,
) -> DomainResult<Option<Brand>>
where
    E: PgExecutor<'e>,
{
    let row = sqlx::query_as::<_, BrandRow>(&format!(
        "SELECT {BRAND_COLUMNS} FROM brands WHERE name = $1"
    ))
    .bind(name)
    .fetch_optional(executor)
    .await?;
    Ok(row.map(Brand::from))
}

pub(super) async fn list_brands<'e, E>(executor: E) -> DomainResult<Vec<Brand>>
where
    E: PgExecutor<'e>,
{
    let rows = sqlx::query_as::<_, BrandRow>(&format!(
        "SELECT {BRAND_COLUMNS} FROM brands ORDER BY created_at, id"
    ))
    .fetch_all(executor)
    .await?;
    Ok(rows.into_iter().map(Brand::from).collect())
}
