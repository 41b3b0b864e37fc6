//! 请求上下文
//!
//! - `RequestMetadata`：随请求传入的横切信息（关联 ID、执行者、取消信号与截止时间）；
//! - `RequestContext`：校验与查询阶段可见的只读上下文；
//! - `ExecutionContext`：命令执行期的上下文，额外持有调度器注入的工作单元。
//!
//! 上下文由单个请求独占，请求结束即丢弃。
//!
use crate::decision_log::DecisionLog;
use crate::error::AppError;
use bon::Builder;
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;
use vehicle_domain::persist::UnitOfWork;

/// 请求元数据
///
/// ```rust
/// use std::time::Duration;
/// use vehicle_application::context::RequestMetadata;
///
/// let metadata = RequestMetadata::builder()
///     .correlation_id("cor-123")
///     .actor_id("u-1")
///     .build()
///     .with_timeout(Duration::from_secs(5));
///
/// assert_eq!(metadata.correlation_id(), "cor-123");
/// assert!(metadata.deadline().is_some());
/// assert!(!metadata.is_interrupted());
/// ```
#[derive(Debug, Clone, Builder)]
pub struct RequestMetadata {
    /// 关联 ID，未提供时自动生成
    #[builder(into, default = Uuid::new_v4().to_string())]
    correlation_id: String,
    /// 执行者 ID（可选）
    #[builder(into)]
    actor_id: Option<String>,
    /// 取消信号，传输层在客户端断开时触发
    #[builder(default)]
    cancellation: CancellationToken,
    /// 截止时间，到期视同取消
    deadline: Option<Instant>,
}

impl Default for RequestMetadata {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl RequestMetadata {
    pub fn correlation_id(&self) -> &str {
        &self.correlation_id
    }

    pub fn actor_id(&self) -> Option<&str> {
        self.actor_id.as_deref()
    }

    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancellation
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// 以当前时刻为起点设置截止时间
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.deadline = Some(Instant::now() + timeout);
        self
    }

    /// 是否已被取消或已超过截止时间
    pub fn is_interrupted(&self) -> bool {
        self.cancellation.is_cancelled()
            || self
                .deadline
                .is_some_and(|deadline| Instant::now() >= deadline)
    }

    /// 等待取消或截止时间到达；两者皆无时永不完成
    pub(crate) async fn interrupted(&self) {
        match self.deadline {
            Some(deadline) => {
                tokio::select! {
                    _ = self.cancellation.cancelled() => {}
                    _ = tokio::time::sleep_until(deadline) => {}
                }
            }
            None => self.cancellation.cancelled().await,
        }
    }
}

/// 校验与查询阶段的上下文
#[derive(Debug, Clone)]
pub struct RequestContext {
    metadata: RequestMetadata,
    decisions: DecisionLog,
}

impl RequestContext {
    pub fn new(metadata: RequestMetadata, decisions: DecisionLog) -> Self {
        Self {
            metadata,
            decisions,
        }
    }

    pub fn metadata(&self) -> &RequestMetadata {
        &self.metadata
    }

    pub fn decisions(&self) -> &DecisionLog {
        &self.decisions
    }
}

/// 命令执行上下文
///
/// 处理器只能通过 [`ExecutionContext::unit_of_work`] 访问调度器开启的工作单元，
/// 无法自行开启、提交或回滚。
pub struct ExecutionContext {
    request: RequestContext,
    unit_of_work: Option<Box<dyn UnitOfWork>>,
}

impl ExecutionContext {
    pub fn new(request: RequestContext) -> Self {
        Self {
            request,
            unit_of_work: None,
        }
    }

    pub fn metadata(&self) -> &RequestMetadata {
        self.request.metadata()
    }

    pub fn decisions(&self) -> &DecisionLog {
        self.request.decisions()
    }

    /// 当前请求的工作单元
    pub fn unit_of_work(&mut self) -> Result<&mut dyn UnitOfWork, AppError> {
        match self.unit_of_work.as_deref_mut() {
            Some(uow) => Ok(uow),
            None => Err(AppError::internal(anyhow::anyhow!(
                "no unit of work is attached to this request"
            ))),
        }
    }

    pub(crate) fn attach(&mut self, uow: Box<dyn UnitOfWork>) {
        self.unit_of_work = Some(uow);
    }

    pub(crate) fn detach(&mut self) -> Option<Box<dyn UnitOfWork>> {
        self.unit_of_work.take()
    }
}
