//! 实体（Entity）基础抽象
//!
//! 为品牌、车型、车主与车辆提供统一的标识与创建时间，
//! 存储实现据此建立主键索引与稳定的列表顺序。
//!
use chrono::{DateTime, Utc};
use std::{fmt::Display, hash::Hash};

/// 具备唯一标识的实体抽象
pub trait Entity: Clone + Send + Sync + 'static {
    /// 实体类型名（用于日志与错误信息）
    const TYPE: &'static str;

    /// 实体标识类型，要求可哈希、可显示与可复制
    type Id: Copy + Eq + Hash + Display + Send + Sync;

    /// 获取实体标识
    fn id(&self) -> &Self::Id;

    /// 创建时间（列表按此排序）
    fn created_at(&self) -> DateTime<Utc>;
}
