use crate::{
    context::ExecutionContext, dto::Dto, error::AppError, validation::ValidationContext,
    validation::ValidationIssue,
};
use async_trait::async_trait;
use serde::de::DeserializeOwned;

/// 命令处理器
///
/// - `validate`：同步校验，不访问存储；返回空列表表示通过；
/// - `execute`：在调度器开启的工作单元内执行，通过 `ctx.unit_of_work()` 读写存储。
///   返回错误、发生 panic 或请求被取消时，该工作单元会被回滚。
#[async_trait]
pub trait CommandHandler: Send + Sync + 'static {
    type Request: DeserializeOwned + Send + 'static;
    type Response: Dto;

    fn validate(&self, _request: &Self::Request, _ctx: &ValidationContext) -> Vec<ValidationIssue> {
        Vec::new()
    }

    async fn execute(
        &self,
        request: Self::Request,
        ctx: &mut ExecutionContext,
    ) -> Result<Self::Response, AppError>;
}
