//! 日志初始化
//!
//! 过滤表达式优先取 `RUST_LOG`，否则取配置中的日志级别；输出格式由 `LOG_FORMAT` 决定。
//! 重复调用只有第一次生效。
//!
use crate::config::{AppConfig, LogFormat};
use anyhow::Result;
use tracing_subscriber::EnvFilter;

pub fn init_tracing(config: &AppConfig) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.log_level)?,
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    let installed = match config.log_format {
        LogFormat::Json => builder.json().flatten_event(true).try_init(),
        LogFormat::Text => builder.try_init(),
    };

    if installed.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
    Ok(())
}
