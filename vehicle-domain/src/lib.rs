//! 车辆服务领域层（vehicle-domain）
//!
//! 提供车辆管理场景的领域模型与协议定义：
//! - 实体（`entities`）：品牌、车型、车主与车辆；
//! - 值对象（`value_object`）：VIN、年份等带校验的概念值；
//! - 持久化协议（`persist`）：各实体仓储以及工作单元（Unit of Work）；
//! - 领域服务（`car_service`、`catalog_service`）：跨实体的业务规则。
//!
//! 本 crate 不依赖任何具体存储实现，仅定义接口与最小必要的错误类型，
//! 由基础设施层（内存存储、Postgres 等）提供实现并注入。
//!
//! 典型用法：
//! 1. 基础设施层实现 `persist::UnitOfWorkProvider`；
//! 2. 应用层在工作单元内调用 `CarService` / `CatalogService`；
//! 3. 由应用层负责提交或回滚。
//!
pub mod car_service;
pub mod catalog_service;
pub mod entities;
pub mod entity;
pub mod error;
pub mod persist;
pub mod value_object;

pub use car_service::CarService;
pub use catalog_service::CatalogService;
