//! 标准响应信封
//!
//! 把 `DispatchOutcome` 渲染为统一的 `{status_code, message, errors, decisions, data}` 结构，
//! 供传输层直接序列化。内部失败只给出通用描述。
//!
use crate::{action::ActionKind, error::AppError, mediator::DispatchOutcome};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status_code: u16,
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub decisions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

/// 错误对应的 HTTP 状态码
pub fn status_for(err: &AppError) -> u16 {
    match err {
        AppError::HandlerNotFound { .. } => 404,
        AppError::MalformedPayload { .. } | AppError::ValidationFailed { .. } => 400,
        AppError::BusinessRuleViolation { .. } => 409,
        AppError::NotFound { .. } => 404,
        AppError::Cancelled => 504,
        AppError::InternalFailure { .. } => 500,
    }
}

fn message_for(err: &AppError) -> &'static str {
    match err {
        AppError::HandlerNotFound { .. } => "Handler not found",
        AppError::MalformedPayload { .. } => "Malformed request",
        AppError::ValidationFailed { .. } => "Bad Request",
        AppError::BusinessRuleViolation { .. } => "Business rule violation",
        AppError::NotFound { .. } => "Not found",
        AppError::Cancelled => "Request cancelled",
        AppError::InternalFailure { .. } => "Internal error",
    }
}

impl From<DispatchOutcome> for ApiResponse {
    fn from(outcome: DispatchOutcome) -> Self {
        match outcome.result {
            Ok(data) => Self {
                status_code: match outcome.kind {
                    ActionKind::Command => 201,
                    ActionKind::Query => 200,
                },
                message: "Operation completed successfully".to_string(),
                errors: Vec::new(),
                decisions: outcome.decisions,
                data: Some(data),
            },
            Err(err) => Self {
                status_code: status_for(&err),
                message: message_for(&err).to_string(),
                errors: err.public_details(),
                decisions: outcome.decisions,
                data: None,
            },
        }
    }
}
