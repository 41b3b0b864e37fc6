use super::rows;
use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgExecutor, PgPool, Postgres, Transaction};
use uuid::Uuid;
use vehicle_domain::entities::{Brand, Car, Model, Owner};
use vehicle_domain::error::DomainResult;
use vehicle_domain::persist::{
    BrandRepository, CarRepository, ModelRepository, OwnerRepository, Store, UnitOfWork,
    UnitOfWorkProvider,
};
use vehicle_domain::value_object::Vin;

/// 基于连接池的存储提供者
#[derive(Debug, Clone)]
pub struct PgStoreProvider {
    pool: PgPool,
}

impl PgStoreProvider {
    pub async fn connect(database_url: &str, max_connections: u32) -> DomainResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        Ok(Self { pool })
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl UnitOfWorkProvider for PgStoreProvider {
    async fn begin(&self) -> DomainResult<Box<dyn UnitOfWork>> {
        let tx = self.pool.begin().await?;
        Ok(Box::new(PgUnitOfWork { tx }))
    }

    async fn session(&self) -> DomainResult<Box<dyn Store>> {
        Ok(Box::new(PgSession {
            pool: self.pool.clone(),
        }))
    }
}

/// 数据库事务。丢弃时由 sqlx 自动回滚。
pub struct PgUnitOfWork {
    tx: Transaction<'static, Postgres>,
}

impl PgUnitOfWork {
    fn executor(&mut self) -> impl PgExecutor<'_> {
        &mut *self.tx
    }
}

#[async_trait]
impl UnitOfWork for PgUnitOfWork {
    async fn commit(self: Box<Self>) -> DomainResult<()> {
        self.tx.commit().await?;
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> DomainResult<()> {
        self.tx.rollback().await?;
        Ok(())
    }
}

/// 非事务会话，每条语句从连接池取连接执行
#[derive(Debug, Clone)]
pub struct PgSession {
    pool: PgPool,
}

impl PgSession {
    fn executor(&mut self) -> impl PgExecutor<'_> {
        &self.pool
    }
}

macro_rules! impl_pg_repositories {
    ($ty:ty) => {
        #[async_trait]
        impl CarRepository for $ty {
            async fn insert_car(&mut self, car: Car) -> DomainResult<Car> {
                rows::insert_car(self.executor(), &car).await?;
                Ok(car)
            }

            async fn update_car(&mut self, car: Car) -> DomainResult<Car> {
                rows::update_car(self.executor(), &car).await?;
                Ok(car)
            }

            async fn find_car(&mut self, id: Uuid) -> DomainResult<Option<Car>> {
                rows::find_car(self.executor(), id).await
            }

            async fn find_car_by_vin(&mut self, vin: &Vin) -> DomainResult<Option<Car>> {
                rows::find_car_by_vin(self.executor(), vin).await
            }

            async fn list_cars(&mut self) -> DomainResult<Vec<Car>> {
                rows::list_cars(self.executor(), None).await
            }

            async fn list_cars_by_owner(&mut self, owner_id: Uuid) -> DomainResult<Vec<Car>> {
                rows::list_cars(self.executor(), Some(owner_id)).await
            }
        }

        #[async_trait]
        impl ModelRepository for $ty {
            async fn insert_model(&mut self, model: Model) -> DomainResult<Model> {
                rows::insert_model(self.executor(), &model).await?;
                Ok(model)
            }

            async fn find_model(&mut self, id: Uuid) -> DomainResult<Option<Model>> {
                rows::find_model(self.executor(), id).await
            }

            async fn list_models_by_brand(&mut self, brand_id: Uuid) -> DomainResult<Vec<Model>> {
                rows::list_models_by_brand(self.executor(), brand_id).await
            }
        }

        #[async_trait]
        impl OwnerRepository for $ty {
            async fn insert_owner(&mut self, owner: Owner) -> DomainResult<Owner> {
                rows::insert_owner(self.executor(), &owner).await?;
                Ok(owner)
            }

            async fn find_owner(&mut self, id: Uuid) -> DomainResult<Option<Owner>> {
                rows::find_owner(self.executor(), id).await
            }

            async fn find_owner_by_email(&mut self, email: &str) -> DomainResult<Option<Owner>> {
                rows::find_owner_by_email(self.executor(), email).await
            }

            async fn list_owners(&mut self) -> DomainResult<Vec<Owner>> {
                rows::list_owners(self.executor()).await
            }
        }

        #[async_trait]
        impl BrandRepository for $ty {
            async fn insert_brand(&mut self, brand: Brand) -> DomainResult<Brand> {
                rows::insert_brand(self.executor(), &brand).await?;
                Ok(brand)
            }

            async fn find_brand(&mut self, id: Uuid) -> DomainResult<Option<Brand>> {
                rows::find_brand(self.executor(), id).await
            }

            async fn find_brand_by_name(&mut self, name: &str) -> DomainResult<Option<Brand>> {
                rows::find_brand_by_name(self.executor(), name).await
            }

            async fn list_brands(&mut self) -> DomainResult<Vec<Brand>> {
                rows::list_brands(self.executor()).await
            }
        }
    };
}

impl_pg_repositories!(PgUnitOfWork);
impl_pg_repositories!(PgSession);
