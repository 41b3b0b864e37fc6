//! 处理器的类型擦除
//!
//! 注册表只保存 `Arc<dyn DynCommandHandler>` / `Arc<dyn DynQueryHandler>`。
//! 具体的请求与响应类型只在泛型适配器内部出现：适配器把信封解码为处理器的请求类型，
//! 完成校验后返回一个“已准备好”的调用，执行结果统一序列化为 `serde_json::Value`。
//!
use crate::{
    command_handler::CommandHandler,
    context::{ExecutionContext, RequestContext},
    envelope::RequestEnvelope,
    error::AppError,
    query_handler::QueryHandler,
    validation::ValidationContext,
};
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

/// 已解码并通过校验的命令调用
#[async_trait]
pub trait PreparedCommand: Send {
    async fn execute(self: Box<Self>, ctx: &mut ExecutionContext) -> Result<Value, AppError>;
}

/// 已解码的查询调用
#[async_trait]
pub trait PreparedQuery: Send {
    async fn execute(self: Box<Self>, ctx: &RequestContext) -> Result<Value, AppError>;
}

pub trait DynCommandHandler: Send + Sync {
    /// 解码并校验；存在任何校验问题时返回包含全部问题的 `ValidationFailed`
    fn prepare(
        &self,
        envelope: &RequestEnvelope,
        ctx: &ValidationContext,
    ) -> Result<Box<dyn PreparedCommand>, AppError>;
}

pub trait DynQueryHandler: Send + Sync {
    fn prepare(&self, envelope: &RequestEnvelope) -> Result<Box<dyn PreparedQuery>, AppError>;
}

pub(crate) struct CommandAdapter<H> {
    handler: Arc<H>,
}

impl<H> CommandAdapter<H> {
    pub(crate) fn new(handler: Arc<H>) -> Self {
        Self { handler }
    }
}

impl<H> DynCommandHandler for CommandAdapter<H>
where
    H: CommandHandler,
{
    fn prepare(
        &self,
        envelope: &RequestEnvelope,
        ctx: &ValidationContext,
    ) -> Result<Box<dyn PreparedCommand>, AppError> {
        let request: H::Request = envelope.decode()?;

        let issues = self.handler.validate(&request, ctx);
        if !issues.is_empty() {
            return Err(AppError::ValidationFailed { issues });
        }

        Ok(Box::new(CommandCall {
            handler: self.handler.clone(),
            request,
        }))
    }
}

struct CommandCall<H: CommandHandler> {
    handler: Arc<H>,
    request: H::Request,
}

#[async_trait]
impl<H> PreparedCommand for CommandCall<H>
where
    H: CommandHandler,
{
    async fn execute(self: Box<Self>, ctx: &mut ExecutionContext) -> Result<Value, AppError> {
        let CommandCall { handler, request } = *self;
        let response = handler
            .execute(request, ctx)
            .await
            .map_err(AppError::into_execution_error)?;
        to_value(&response)
    }
}

pub(crate) struct QueryAdapter<H> {
    handler: Arc<H>,
}

impl<H> QueryAdapter<H> {
    pub(crate) fn new(handler: Arc<H>) -> Self {
        Self { handler }
    }
}

impl<H> DynQueryHandler for QueryAdapter<H>
where
    H: QueryHandler,
{
    fn prepare(&self, envelope: &RequestEnvelope) -> Result<Box<dyn PreparedQuery>, AppError> {
        let request: H::Request = envelope.decode()?;
        Ok(Box::new(QueryCall {
            handler: self.handler.clone(),
            request,
        }))
    }
}

struct QueryCall<H: QueryHandler> {
    handler: Arc<H>,
    request: H::Request,
}

#[async_trait]
impl<H> PreparedQuery for QueryCall<H>
where
    H: QueryHandler,
{
    async fn execute(self: Box<Self>, ctx: &RequestContext) -> Result<Value, AppError> {
        let QueryCall { handler, request } = *self;
        let response = handler
            .execute(request, ctx)
            .await
            .map_err(AppError::into_execution_error)?;
        to_value(&response)
    }
}

fn to_value<T: Serialize>(response: &T) -> Result<Value, AppError> {
    serde_json::to_value(response)
        .map_err(|e| AppError::internal(anyhow::Error::new(e).context("failed to encode response")))
}
