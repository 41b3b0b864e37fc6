//! Postgres 存储（`postgres` 特性）
//!
//! 期望的表结构与列名：
//! - `brands(id, name UNIQUE, country, logo_url, active, created_at, updated_at)`
//! - `models(id, name, brand_id, start_year, end_year, category, active, created_at, updated_at)`
//! - `owners(id, name, email UNIQUE, phone, address, created_at, updated_at)`
//! - `cars(id, model_id, owner_id, year, color, vin UNIQUE, active, created_at, updated_at)`
//!
//! 表结构的创建与迁移不在本模块范围内。
//!
mod rows;
mod store;

pub use store::{PgSession, PgStoreProvider, PgUnitOfWork};
