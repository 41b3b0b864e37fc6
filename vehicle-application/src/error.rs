//! 应用层错误
//!
//! 调度器对外只暴露这一组错误；领域错误在边界处统一转换。
//! `InternalFailure` 的原因仅用于服务端日志，不会出现在 `Display` 或响应中。
//!
use crate::action::ActionKind;
use crate::validation::ValidationIssue;
use vehicle_domain::car_service::codes as car_codes;
use vehicle_domain::catalog_service::codes as catalog_codes;
use vehicle_domain::error::DomainError;

#[non_exhaustive]
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("handler not found: {kind}={name}")]
    HandlerNotFound { kind: ActionKind, name: String },

    #[error("malformed payload: {reason}")]
    MalformedPayload { reason: String },

    #[error("validation failed with {} issue(s)", .issues.len())]
    ValidationFailed { issues: Vec<ValidationIssue> },

    #[error("business rule violated: {code}: {message}")]
    BusinessRuleViolation { code: String, message: String },

    #[error("not found: {message}")]
    NotFound { message: String },

    #[error("request cancelled")]
    Cancelled,

    #[error("internal failure")]
    InternalFailure { cause: anyhow::Error },
}

impl AppError {
    pub fn internal(cause: impl Into<anyhow::Error>) -> Self {
        Self::InternalFailure {
            cause: cause.into(),
        }
    }

    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedPayload {
            reason: reason.into(),
        }
    }

    pub fn business_rule(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::BusinessRuleViolation {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// 内部失败的原因（仅供日志使用）
    pub fn cause(&self) -> Option<&anyhow::Error> {
        match self {
            AppError::InternalFailure { cause } => Some(cause),
            _ => None,
        }
    }

    pub fn is_internal(&self) -> bool {
        matches!(self, AppError::InternalFailure { .. })
    }

    /// 可以安全返回给调用方的描述
    pub fn public_message(&self) -> String {
        self.to_string()
    }

    /// 面向调用方的明细列表：校验失败时为每条问题，其余为单条描述
    pub fn public_details(&self) -> Vec<String> {
        match self {
            AppError::ValidationFailed { issues } => {
                issues.iter().map(ToString::to_string).collect()
            }
            AppError::BusinessRuleViolation { code, message } => {
                vec![format!("{code}: {message}")]
            }
            AppError::NotFound { message } => vec![message.clone()],
            AppError::MalformedPayload { reason } => vec![reason.clone()],
            other => vec![other.public_message()],
        }
    }

    /// 处理器 `execute` 只允许报告业务、未找到、取消与内部失败四类结果，
    /// 其余变体一律视为内部失败。
    pub(crate) fn into_execution_error(self) -> Self {
        match self {
            err @ (AppError::BusinessRuleViolation { .. }
            | AppError::NotFound { .. }
            | AppError::Cancelled
            | AppError::InternalFailure { .. }) => err,
            other => {
                let description = other.to_string();
                AppError::internal(anyhow::anyhow!(
                    "handler reported an unexpected error: {description}"
                ))
            }
        }
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::BusinessRule { code, message } => {
                AppError::BusinessRuleViolation { code, message }
            }
            DomainError::UniqueViolation { constraint } => unique_violation(&constraint),
            DomainError::NotFound { reason } => AppError::NotFound { message: reason },
            other => AppError::internal(other),
        }
    }
}

/// 唯一约束冲突：已知约束对应业务错误码，与存储层检查前的规则保持一致
fn unique_violation(constraint: &str) -> AppError {
    let (code, message) = match constraint {
        "cars_vin_key" => (car_codes::DUPLICATE_VIN, "a vehicle with this VIN already exists"),
        "owners_email_key" => (
            catalog_codes::DUPLICATE_EMAIL,
            "an owner with this email already exists",
        ),
        "brands_name_key" => (catalog_codes::DUPLICATE_BRAND, "this brand already exists"),
        _ => {
            return AppError::business_rule(
                "UNIQUE_VIOLATION",
                format!("unique constraint violated: {constraint}"),
            );
        }
    };
    AppError::business_rule(code, message)
}
