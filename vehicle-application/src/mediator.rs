//! 调度器（Mediator）
//!
//! 传输层唯一的入口：按名称找到处理器，解码与校验请求，命令放进工作单元执行，
//! 查询直接执行，最后把结果与决策记录一起交回。
//!
//! ```rust,no_run
//! # async fn demo(mediator: vehicle_application::Mediator) {
//! use vehicle_application::{RequestEnvelope, RequestMetadata};
//!
//! let outcome = mediator
//!     .send_command(
//!         "CreateCar",
//!         RequestEnvelope::from_body(r#"{"vin":"1HGCM82633A004352"}"#),
//!         RequestMetadata::default(),
//!     )
//!     .await;
//! println!("{:?} {:?}", outcome.result, outcome.decisions);
//! # }
//! ```
use crate::{
    action::ActionKind,
    context::{ExecutionContext, RequestContext, RequestMetadata},
    decision_log::DecisionLog,
    envelope::RequestEnvelope,
    error::AppError,
    registry::HandlerRegistry,
    transaction::{self, Completion},
};
use serde_json::Value;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;
use std::time::Duration;
use tracing::Instrument;
use vehicle_domain::persist::UnitOfWorkProvider;

/// 一次调度的结果
#[derive(Debug)]
pub struct DispatchOutcome {
    pub kind: ActionKind,
    pub action: String,
    pub result: Result<Value, AppError>,
    /// 本次请求记录的全部决策，失败时同样返回
    pub decisions: Vec<String>,
}

impl DispatchOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }

    pub fn error(&self) -> Option<&AppError> {
        self.result.as_ref().err()
    }
}

pub struct Mediator {
    registry: Arc<HandlerRegistry>,
    provider: Arc<dyn UnitOfWorkProvider>,
    default_timeout: Option<Duration>,
}

impl Mediator {
    pub fn new(registry: Arc<HandlerRegistry>, provider: Arc<dyn UnitOfWorkProvider>) -> Self {
        Self {
            registry,
            provider,
            default_timeout: None,
        }
    }

    /// 调用方未设置截止时间时采用的默认超时
    pub fn with_default_timeout(mut self, timeout: Duration) -> Self {
        self.default_timeout = Some(timeout);
        self
    }

    pub fn registry(&self) -> &Arc<HandlerRegistry> {
        &self.registry
    }

    pub async fn send_command(
        &self,
        name: &str,
        envelope: RequestEnvelope,
        metadata: RequestMetadata,
    ) -> DispatchOutcome {
        self.dispatch(ActionKind::Command, name, envelope, metadata)
            .await
    }

    pub async fn send_query(
        &self,
        name: &str,
        envelope: RequestEnvelope,
        metadata: RequestMetadata,
    ) -> DispatchOutcome {
        self.dispatch(ActionKind::Query, name, envelope, metadata)
            .await
    }

    pub async fn dispatch(
        &self,
        kind: ActionKind,
        name: &str,
        envelope: RequestEnvelope,
        metadata: RequestMetadata,
    ) -> DispatchOutcome {
        let metadata = match (metadata.deadline(), self.default_timeout) {
            (None, Some(timeout)) => metadata.with_timeout(timeout),
            _ => metadata,
        };

        let span = tracing::info_span!(
            "dispatch",
            %kind,
            action = %name,
            correlation_id = %metadata.correlation_id(),
        );

        async move {
            // 决策记录在校验之前创建，校验阶段的记录同样保留
            let decisions = DecisionLog::new();
            let ctx = RequestContext::new(metadata, decisions.clone());

            let result = match kind {
                ActionKind::Command => self.run_command(name, &envelope, ctx).await,
                ActionKind::Query => self.run_query(name, &envelope, ctx).await,
            };

            match &result {
                Ok(_) => tracing::debug!("dispatch succeeded"),
                Err(AppError::InternalFailure { cause }) => {
                    tracing::error!(error = ?cause, "dispatch failed with an internal error")
                }
                Err(err) => tracing::info!(error = %err, "dispatch rejected"),
            }

            DispatchOutcome {
                kind,
                action: name.to_string(),
                result,
                decisions: decisions.snapshot(),
            }
        }
        .instrument(span)
        .await
    }

    async fn run_command(
        &self,
        name: &str,
        envelope: &RequestEnvelope,
        ctx: RequestContext,
    ) -> Result<Value, AppError> {
        let handler = self.registry.resolve_command(name)?;

        let prepared = match catch_unwind(AssertUnwindSafe(|| handler.prepare(envelope, &ctx))) {
            Ok(prepared) => prepared?,
            Err(payload) => {
                return Err(AppError::internal(anyhow::anyhow!(
                    "validation panicked: {}",
                    transaction::panic_message(payload.as_ref())
                )));
            }
        };

        transaction::run_in_unit_of_work(
            self.provider.as_ref(),
            ExecutionContext::new(ctx),
            prepared,
        )
        .await
    }

    async fn run_query(
        &self,
        name: &str,
        envelope: &RequestEnvelope,
        ctx: RequestContext,
    ) -> Result<Value, AppError> {
        let handler = self.registry.resolve_query(name)?;

        let prepared = match catch_unwind(AssertUnwindSafe(|| handler.prepare(envelope))) {
            Ok(prepared) => prepared?,
            Err(payload) => {
                return Err(AppError::internal(anyhow::anyhow!(
                    "request decoding panicked: {}",
                    transaction::panic_message(payload.as_ref())
                )));
            }
        };

        if ctx.metadata().is_interrupted() {
            return Err(AppError::Cancelled);
        }

        match transaction::guard(ctx.metadata(), prepared.execute(&ctx)).await {
            Completion::Finished(result) => result,
            Completion::Panicked(message) => Err(AppError::internal(anyhow::anyhow!(
                "query handler panicked: {message}"
            ))),
            Completion::Interrupted => Err(AppError::Cancelled),
        }
    }
}
