//! 处理器注册表
//!
//! 命令与查询各自一张名称 → 处理器的映射，基于 `DashMap`，读写可任意交错。
//! 同名重复注册时后者覆盖前者。
//!
use crate::{
    action::ActionKind,
    command_handler::CommandHandler,
    erased::{CommandAdapter, DynCommandHandler, DynQueryHandler, QueryAdapter},
    error::AppError,
    query_handler::QueryHandler,
};
use dashmap::DashMap;
use std::sync::Arc;

#[derive(Default)]
pub struct HandlerRegistry {
    commands: DashMap<String, Arc<dyn DynCommandHandler>>,
    queries: DashMap<String, Arc<dyn DynQueryHandler>>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册命令处理器
    pub fn register_command<H>(&self, name: impl Into<String>, handler: Arc<H>)
    where
        H: CommandHandler,
    {
        let name = name.into();
        let adapter: Arc<dyn DynCommandHandler> = Arc::new(CommandAdapter::new(handler));
        let replaced = self.commands.insert(name.clone(), adapter).is_some();
        tracing::debug!(kind = %ActionKind::Command, action = %name, replaced, "handler registered");
    }

    /// 注册查询处理器
    pub fn register_query<H>(&self, name: impl Into<String>, handler: Arc<H>)
    where
        H: QueryHandler,
    {
        let name = name.into();
        let adapter: Arc<dyn DynQueryHandler> = Arc::new(QueryAdapter::new(handler));
        let replaced = self.queries.insert(name.clone(), adapter).is_some();
        tracing::debug!(kind = %ActionKind::Query, action = %name, replaced, "handler registered");
    }

    pub fn resolve_command(&self, name: &str) -> Result<Arc<dyn DynCommandHandler>, AppError> {
        // 先克隆出 Arc 再释放分片锁，执行期间不持有注册表的锁
        self.commands
            .get(name)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| AppError::HandlerNotFound {
                kind: ActionKind::Command,
                name: name.to_string(),
            })
    }

    pub fn resolve_query(&self, name: &str) -> Result<Arc<dyn DynQueryHandler>, AppError> {
        self.queries
            .get(name)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| AppError::HandlerNotFound {
                kind: ActionKind::Query,
                name: name.to_string(),
            })
    }

    /// 已注册的命令名（排序后）
    pub fn registered_commands(&self) -> Vec<String> {
        let mut names: Vec<String> = self.commands.iter().map(|e| e.key().clone()).collect();
        names.sort_unstable();
        names
    }

    /// 已注册的查询名（排序后）
    pub fn registered_queries(&self) -> Vec<String> {
        let mut names: Vec<String> = self.queries.iter().map(|e| e.key().clone()).collect();
        names.sort_unstable();
        names
    }
}
