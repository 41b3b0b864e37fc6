//! 事务性内存存储
//!
//! - 写事务串行执行：同一时刻只有一个工作单元持有写锁；
//! - 工作单元在提交前只修改自己的副本，其它读者看到的始终是已提交状态；
//! - 提交时整体替换已提交状态，回滚时直接丢弃副本；
//! - 记录开启 / 提交 / 回滚次数，并支持注入一次提交失败，便于测试事务语义。
//!
mod store;
mod tables;

pub use store::{InMemoryStore, MemorySession, MemoryUnitOfWork, TransactionStats};
