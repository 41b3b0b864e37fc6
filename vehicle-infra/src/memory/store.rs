use super::tables::Tables;
use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::sync::{Mutex, OwnedMutexGuard, RwLock};
use uuid::Uuid;
use vehicle_domain::entities::{Brand, Car, Model, Owner};
use vehicle_domain::error::{DomainError, DomainResult};
use vehicle_domain::persist::{
    BrandRepository, CarRepository, ModelRepository, OwnerRepository, Store, UnitOfWork,
    UnitOfWorkProvider,
};
use vehicle_domain::value_object::Vin;

/// 事务计数快照
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransactionStats {
    pub begun: usize,
    pub committed: usize,
    pub rolled_back: usize,
    pub failed_commits: usize,
}

impl TransactionStats {
    /// 尚未结束的工作单元数量
    pub fn open(&self) -> usize {
        self.begun
            .saturating_sub(self.committed + self.rolled_back + self.failed_commits)
    }
}

#[derive(Default)]
struct Shared {
    committed: RwLock<Tables>,
    writer: Arc<Mutex<()>>,
    begun: AtomicUsize,
    commits: AtomicUsize,
    rollbacks: AtomicUsize,
    failed_commits: AtomicUsize,
    fail_next_commit: AtomicBool,
}

/// 内存存储，克隆后共享同一份数据
#[derive(Clone, Default)]
pub struct InMemoryStore {
    shared: Arc<Shared>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stats(&self) -> TransactionStats {
        TransactionStats {
            begun: self.shared.begun.load(Ordering::SeqCst),
            committed: self.shared.commits.load(Ordering::SeqCst),
            rolled_back: self.shared.rollbacks.load(Ordering::SeqCst),
            failed_commits: self.shared.failed_commits.load(Ordering::SeqCst),
        }
    }

    /// 让下一次提交失败（只生效一次），已提交状态保持不变
    pub fn fail_next_commit(&self) {
        self.shared.fail_next_commit.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl UnitOfWorkProvider for InMemoryStore {
    async fn begin(&self) -> DomainResult<Box<dyn UnitOfWork>> {
        let writer = self.shared.writer.clone().lock_owned().await;
        let working = self.shared.committed.read().await.clone();
        self.shared.begun.fetch_add(1, Ordering::SeqCst);

        Ok(Box::new(MemoryUnitOfWork {
            shared: self.shared.clone(),
            working,
            finished: false,
            _writer: writer,
        }))
    }

    async fn session(&self) -> DomainResult<Box<dyn Store>> {
        Ok(Box::new(MemorySession {
            shared: self.shared.clone(),
        }))
    }
}

/// 内存工作单元：持有写锁与已提交状态的副本
pub struct MemoryUnitOfWork {
    shared: Arc<Shared>,
    working: Tables,
    finished: bool,
    _writer: OwnedMutexGuard<()>,
}

impl MemoryUnitOfWork {
    async fn read<R>(&mut self, f: impl FnOnce(&Tables) -> R + Send) -> R {
        f(&self.working)
    }

    async fn write<R>(&mut self, f: impl FnOnce(&mut Tables) -> R + Send) -> R {
        f(&mut self.working)
    }
}

#[async_trait]
impl UnitOfWork for MemoryUnitOfWork {
    async fn commit(self: Box<Self>) -> DomainResult<()> {
        let mut this = self;
        this.finished = true;

        if this.shared.fail_next_commit.swap(false, Ordering::SeqCst) {
            this.shared.failed_commits.fetch_add(1, Ordering::SeqCst);
            return Err(DomainError::transaction("commit rejected by the store"));
        }

        let working = std::mem::take(&mut this.working);
        *this.shared.committed.write().await = working;
        this.shared.commits.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> DomainResult<()> {
        let mut this = self;
        this.finished = true;
        this.shared.rollbacks.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

impl Drop for MemoryUnitOfWork {
    fn drop(&mut self) {
        // 未提交也未回滚即被丢弃，按回滚计数
        if !self.finished {
            self.shared.rollbacks.fetch_add(1, Ordering::SeqCst);
            tracing::debug!("unit of work dropped without completion, treated as rollback");
        }
    }
}

/// 非事务会话：直接读写已提交状态，写操作逐条生效
pub struct MemorySession {
    shared: Arc<Shared>,
}

impl MemorySession {
    async fn read<R>(&mut self, f: impl FnOnce(&Tables) -> R + Send) -> R {
        let tables = self.shared.committed.read().await;
        f(&tables)
    }

    async fn write<R>(&mut self, f: impl FnOnce(&mut Tables) -> R + Send) -> R {
        let _writer = self.shared.writer.lock().await;
        let mut tables = self.shared.committed.write().await;
        f(&mut tables)
    }
}

macro_rules! impl_repositories {
    ($ty:ty) => {
        #[async_trait]
        impl CarRepository for $ty {
            async fn insert_car(&mut self, car: Car) -> DomainResult<Car> {
                self.write(|t| t.insert_car(car)).await
            }

            async fn update_car(&mut self, car: Car) -> DomainResult<Car> {
                self.write(|t| t.update_car(car)).await
            }

            async fn find_car(&mut self, id: Uuid) -> DomainResult<Option<Car>> {
                Ok(self.read(|t| t.find_car(id)).await)
            }

            async fn find_car_by_vin(&mut self, vin: &Vin) -> DomainResult<Option<Car>> {
                Ok(self.read(|t| t.find_car_by_vin(vin)).await)
            }

            async fn list_cars(&mut self) -> DomainResult<Vec<Car>> {
                Ok(self.read(|t| t.list_cars()).await)
            }

            async fn list_cars_by_owner(&mut self, owner_id: Uuid) -> DomainResult<Vec<Car>> {
                Ok(self.read(|t| t.list_cars_by_owner(owner_id)).await)
            }
        }

        #[async_trait]
        impl ModelRepository for $ty {
            async fn insert_model(&mut self, model: Model) -> DomainResult<Model> {
                self.write(|t| t.insert_model(model)).await
            }

            async fn find_model(&mut self, id: Uuid) -> DomainResult<Option<Model>> {
                Ok(self.read(|t| t.find_model(id)).await)
            }

            async fn list_models_by_brand(&mut self, brand_id: Uuid) -> DomainResult<Vec<Model>> {
                Ok(self.read(|t| t.list_models_by_brand(brand_id)).await)
            }
        }

        #[async_trait]
        impl OwnerRepository for $ty {
            async fn insert_owner(&mut self, owner: Owner) -> DomainResult<Owner> {
                self.write(|t| t.insert_owner(owner)).await
            }

            async fn find_owner(&mut self, id: Uuid) -> DomainResult<Option<Owner>> {
                Ok(self.read(|t| t.find_owner(id)).await)
            }

            async fn find_owner_by_email(&mut self, email: &str) -> DomainResult<Option<Owner>> {
                Ok(self.read(|t| t.find_owner_by_email(email)).await)
            }

            async fn list_owners(&mut self) -> DomainResult<Vec<Owner>> {
                Ok(self.read(|t| t.list_owners()).await)
            }
        }

        #[async_trait]
        impl BrandRepository for $ty {
            async fn insert_brand(&mut self, brand: Brand) -> DomainResult<Brand> {
                self.write(|t| t.insert_brand(brand)).await
            }

            async fn find_brand(&mut self, id: Uuid) -> DomainResult<Option<Brand>> {
                Ok(self.read(|t| t.find_brand(id)).await)
            }

            async fn find_brand_by_name(&mut self, name: &str) -> DomainResult<Option<Brand>> {
                Ok(self.read(|t| t.find_brand_by_name(name)).await)
            }

            async fn list_brands(&mut self) -> DomainResult<Vec<Brand>> {
                Ok(self.read(|t| t.list_brands()).await)
            }
        }
    };
}

impl_repositories!(MemoryUnitOfWork);
impl_repositories!(MemorySession);

#[cfg(test)]
mod tests {
    use super::*;
    use vehicle_domain::value_object::ModelYear;

    fn car() -> Car {
        Car::builder()
            .model_id(Uuid::new_v4())
            .owner_id(Uuid::new_v4())
            .year(ModelYear::new(2021).unwrap())
            .vin(Vin::new("1HGCM82633A004352").unwrap())
            .build()
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn uncommitted_work_is_invisible_until_commit() {
        let store = InMemoryStore::new();
        let mut uow = store.begin().await.unwrap();
        uow.insert_car(car()).await.unwrap();

        let mut session = store.session().await.unwrap();
        assert!(session.list_cars().await.unwrap().is_empty());

        uow.commit().await.unwrap();
        assert_eq!(session.list_cars().await.unwrap().len(), 1);
        assert_eq!(store.stats().committed, 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn rollback_discards_work() {
        let store = InMemoryStore::new();
        let mut uow = store.begin().await.unwrap();
        uow.insert_car(car()).await.unwrap();
        uow.rollback().await.unwrap();

        let mut session = store.session().await.unwrap();
        assert!(session.list_cars().await.unwrap().is_empty());
        assert_eq!(
            store.stats(),
            TransactionStats {
                begun: 1,
                committed: 0,
                rolled_back: 1,
                failed_commits: 0,
            }
        );
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn injected_commit_failure_fires_once() {
        let store = InMemoryStore::new();
        store.fail_next_commit();

        let mut uow = store.begin().await.unwrap();
        uow.insert_car(car()).await.unwrap();
        assert!(matches!(
            uow.commit().await,
            Err(DomainError::Transaction { .. })
        ));

        let mut uow = store.begin().await.unwrap();
        uow.insert_car(car()).await.unwrap();
        uow.commit().await.unwrap();

        let stats = store.stats();
        assert_eq!(stats.failed_commits, 1);
        assert_eq!(stats.committed, 1);
        assert_eq!(stats.open(), 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn dropped_unit_of_work_counts_as_rollback() {
        let store = InMemoryStore::new();
        {
            let mut uow = store.begin().await.unwrap();
            uow.insert_car(car()).await.unwrap();
        }
        assert_eq!(store.stats().rolled_back, 1);
        // 写锁已释放，可以开启新的工作单元
        let uow = store.begin().await.unwrap();
        uow.rollback().await.unwrap();
    }
}
