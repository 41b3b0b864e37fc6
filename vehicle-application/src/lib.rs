//! 车辆服务应用层（vehicle-application）
//!
//! 以命令/查询调度器（`Mediator`）为核心：
//! - `registry`：按名称注册的命令与查询处理器；
//! - `mediator`：解析、解码、校验并执行一次请求；
//! - `transaction`：命令执行外围的工作单元（提交 / 回滚）；
//! - `decision_log`：单次请求内的决策记录；
//! - `commands` / `queries`：车辆业务的具体处理器，由 `wiring` 统一注册。
//!
pub mod action;
pub mod command_handler;
pub mod commands;
pub mod context;
pub mod decision_log;
pub mod dto;
pub mod envelope;
pub mod erased;
pub mod error;
pub mod mediator;
pub mod queries;
pub mod query_handler;
pub mod registry;
pub mod response;
pub mod transaction;
pub mod validation;
pub mod wiring;

pub use action::ActionKind;
pub use context::{ExecutionContext, RequestContext, RequestMetadata};
pub use decision_log::DecisionLog;
pub use envelope::RequestEnvelope;
pub use error::AppError;
pub use mediator::{DispatchOutcome, Mediator};
pub use registry::HandlerRegistry;
pub use response::ApiResponse;
pub use wiring::register_vehicle_handlers;
