//! 工作单元（Unit of Work）
//!
//! 一个工作单元即一次原子的读写分组：要么整体提交，要么整体回滚。
//! 命令处理器只能通过调度器注入的工作单元访问存储，不能自行开启新的工作单元。
//!
use super::{BrandRepository, CarRepository, ModelRepository, OwnerRepository};
use crate::error::DomainResult;
use async_trait::async_trait;
use std::sync::Arc;

/// 全部仓储的组合
pub trait Store: CarRepository + ModelRepository + OwnerRepository + BrandRepository + Send {}

impl<T> Store for T where T: CarRepository + ModelRepository + OwnerRepository + BrandRepository + Send
{}

/// 处于事务中的存储句柄。
///
/// `commit` / `rollback` 消费自身，保证一个工作单元最多结束一次。
/// 未结束即被丢弃的工作单元视为回滚。
#[async_trait]
pub trait UnitOfWork: Store {
    async fn commit(self: Box<Self>) -> DomainResult<()>;

    async fn rollback(self: Box<Self>) -> DomainResult<()>;
}

/// 工作单元的创建者（通常持有连接池）
#[async_trait]
pub trait UnitOfWorkProvider: Send + Sync {
    /// 开启一个新的工作单元
    async fn begin(&self) -> DomainResult<Box<dyn UnitOfWork>>;

    /// 获取一个非事务的存储句柄（供只读查询使用）
    async fn session(&self) -> DomainResult<Box<dyn Store>>;
}

#[async_trait]
impl<T> UnitOfWorkProvider for Arc<T>
where
    T: UnitOfWorkProvider + ?Sized,
{
    async fn begin(&self) -> DomainResult<Box<dyn UnitOfWork>> {
        (**self).begin().await
    }

    async fn session(&self) -> DomainResult<Box<dyn Store>> {
        (**self).session().await
    }
}
