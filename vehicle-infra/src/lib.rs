//! 车辆服务基础设施层（vehicle-infra）
//!
//! - `memory`：带事务语义的内存存储（测试与本地运行）；
//! - `postgres`：基于 sqlx 的 Postgres 存储（`postgres` feature）；
//! - `config`：环境变量配置；
//! - `telemetry`：tracing 日志初始化。
//!
pub mod config;
pub mod memory;
#[cfg(feature = "postgres")]
pub mod postgres;
pub mod telemetry;

pub use config::{AppConfig, LogFormat, StoreBackend};
pub use memory::InMemoryStore;

use std::sync::Arc;
use vehicle_domain::persist::UnitOfWorkProvider;

/// 按配置创建工作单元提供者
pub async fn connect(config: &AppConfig) -> anyhow::Result<Arc<dyn UnitOfWorkProvider>> {
    match config.store_backend {
        StoreBackend::Memory => {
            tracing::info!("using in-memory store");
            Ok(Arc::new(InMemoryStore::new()))
        }
        #[cfg(feature = "postgres")]
        StoreBackend::Postgres => {
            use anyhow::Context;

            let provider =
                postgres::PgStoreProvider::connect(&config.database_url, config.db_max_connections)
                    .await
                    .context("failed to connect to postgres")?;
            tracing::info!(
                max_connections = config.db_max_connections,
                "connected to postgres"
            );
            Ok(Arc::new(provider))
        }
        #[cfg(not(feature = "postgres"))]
        StoreBackend::Postgres => {
            anyhow::bail!("postgres backend requested but the `postgres` feature is not enabled")
        }
    }
}
