//! 事务执行包装
//!
//! 为每个命令开启一个工作单元并注入执行上下文：
//! - 执行成功：提交；提交失败视为内部失败；
//! - 返回错误、发生 panic、被取消或超时：回滚且只回滚一次。
//!
//! 回滚本身失败时只记录日志，返回原本的结果。
//!
use crate::{
    context::{ExecutionContext, RequestMetadata},
    decision_log::DecisionLog,
    erased::PreparedCommand,
    error::AppError,
};
use futures_util::FutureExt;
use serde_json::Value;
use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use vehicle_domain::persist::{UnitOfWork, UnitOfWorkProvider};

/// 受保护执行的结局
#[derive(Debug)]
pub(crate) enum Completion<T> {
    Finished(T),
    Panicked(String),
    Interrupted,
}

/// 在取消信号与截止时间的监视下执行 `fut`，并捕获其中的 panic。
///
/// 两者同时就绪时优先取消。
pub(crate) async fn guard<F>(metadata: &RequestMetadata, fut: F) -> Completion<F::Output>
where
    F: Future,
{
    tokio::select! {
        biased;
        _ = metadata.interrupted() => Completion::Interrupted,
        out = AssertUnwindSafe(fut).catch_unwind() => match out {
            Ok(value) => Completion::Finished(value),
            Err(payload) => Completion::Panicked(panic_message(payload.as_ref())),
        },
    }
}

pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

/// 在新的工作单元中执行一个已准备好的命令
pub async fn run_in_unit_of_work(
    provider: &dyn UnitOfWorkProvider,
    mut ctx: ExecutionContext,
    command: Box<dyn PreparedCommand>,
) -> Result<Value, AppError> {
    let metadata = ctx.metadata().clone();
    let decisions = ctx.decisions().clone();

    if metadata.is_interrupted() {
        return Err(AppError::Cancelled);
    }

    // 等待写锁或连接池时同样受取消与截止时间约束
    let begun = tokio::select! {
        biased;
        _ = metadata.interrupted() => {
            tracing::debug!("request interrupted while waiting for a unit of work");
            return Err(AppError::Cancelled);
        }
        begun = provider.begin() => begun,
    };
    let uow = begun.map_err(|e| {
        AppError::internal(anyhow::Error::new(e).context("failed to begin unit of work"))
    })?;
    tracing::debug!("unit of work started");
    ctx.attach(uow);

    let completion = guard(&metadata, command.execute(&mut ctx)).await;

    let Some(uow) = ctx.detach() else {
        return Err(AppError::internal(anyhow::anyhow!(
            "unit of work was released before the command completed"
        )));
    };

    match completion {
        Completion::Finished(Ok(value)) => match uow.commit().await {
            Ok(()) => {
                tracing::debug!("unit of work committed");
                Ok(value)
            }
            Err(e) => {
                decisions.record("changes were not saved: the transaction could not be committed");
                Err(AppError::internal(
                    anyhow::Error::new(e).context("failed to commit unit of work"),
                ))
            }
        },
        Completion::Finished(Err(err)) => {
            rollback(uow, &decisions, &rollback_reason(&err)).await;
            Err(err)
        }
        Completion::Panicked(message) => {
            rollback(uow, &decisions, "the handler failed unexpectedly").await;
            Err(AppError::internal(anyhow::anyhow!(
                "command handler panicked: {message}"
            )))
        }
        Completion::Interrupted => {
            rollback(uow, &decisions, "the request was cancelled").await;
            Err(AppError::Cancelled)
        }
    }
}

async fn rollback(uow: Box<dyn UnitOfWork>, decisions: &DecisionLog, reason: &str) {
    decisions.record(format!("changes were rolled back: {reason}"));
    match uow.rollback().await {
        Ok(()) => tracing::debug!(reason, "unit of work rolled back"),
        Err(e) => tracing::error!(error = %e, reason, "rollback failed"),
    }
}

/// 回滚说明只包含可以公开的信息
fn rollback_reason(err: &AppError) -> String {
    match err {
        AppError::BusinessRuleViolation { code, .. } => format!("business rule {code} was violated"),
        AppError::NotFound { .. } => "a referenced record was not found".to_string(),
        AppError::Cancelled => "the request was cancelled".to_string(),
        _ => "the handler failed unexpectedly".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio_util::sync::CancellationToken;

    #[tokio::test]
    async fn guard_returns_output() {
        let metadata = RequestMetadata::default();
        assert!(matches!(
            guard(&metadata, async { 7 }).await,
            Completion::Finished(7)
        ));
    }

    #[tokio::test]
    async fn guard_catches_panics() {
        let metadata = RequestMetadata::default();
        let completion = guard(&metadata, async {
            panic!("boom");
        })
        .await;
        match completion {
            Completion::<()>::Panicked(message) => assert_eq!(message, "boom"),
            other => panic!("unexpected completion: {other:?}"),
        }
    }

    #[tokio::test]
    async fn guard_prefers_cancellation() {
        let token = CancellationToken::new();
        token.cancel();
        let metadata = RequestMetadata::builder().cancellation(token).build();
        assert!(matches!(
            guard(&metadata, async { 1 }).await,
            Completion::Interrupted
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn guard_observes_deadline() {
        let metadata = RequestMetadata::default().with_timeout(Duration::from_millis(10));
        let completion = guard(&metadata, async {
            tokio::time::sleep(Duration::from_secs(60)).await;
        })
        .await;
        assert!(matches!(completion, Completion::Interrupted));
    }

    #[test]
    fn rollback_reason_never_leaks_internal_causes() {
        let reason = rollback_reason(&AppError::internal(anyhow::anyhow!("password=hunter2")));
        assert!(!reason.contains("hunter2"));
        assert_eq!(
            rollback_reason(&AppError::business_rule("DUPLICATE_VIN", "dup")),
            "business rule DUPLICATE_VIN was violated"
        );
    }
}
