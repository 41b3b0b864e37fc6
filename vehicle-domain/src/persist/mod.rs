//! 持久化协议（persist）
//!
//! 定义各实体的仓储接口，以及命令执行所依赖的工作单元协议：
//! - 仓储（`CarRepository` 等）：按实体划分的读写操作；
//! - `Store`：全部仓储的组合，供领域服务统一使用；
//! - `UnitOfWork` / `UnitOfWorkProvider`：原子性的读写分组（事务）与其创建者。
//!
//! 该模块只描述协议，具体存储后端（内存、Postgres）由基础设施层实现并注入。
//!
mod repository;
mod unit_of_work;

pub use repository::{BrandRepository, CarRepository, ModelRepository, OwnerRepository};
pub use unit_of_work::{Store, UnitOfWork, UnitOfWorkProvider};
