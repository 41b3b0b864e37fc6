use crate::{context::RequestContext, dto::Dto, error::AppError};
use async_trait::async_trait;
use serde::de::DeserializeOwned;

/// 查询处理器
///
/// 查询不经过工作单元，也不做校验；处理器自行持有只读的存储访问方式。
#[async_trait]
pub trait QueryHandler: Send + Sync + 'static {
    type Request: DeserializeOwned + Send + 'static;
    type Response: Dto;

    async fn execute(
        &self,
        request: Self::Request,
        ctx: &RequestContext,
    ) -> Result<Self::Response, AppError>;
}
