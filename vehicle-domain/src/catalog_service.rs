//! 目录领域服务
//!
//! 品牌、车型与车主的登记规则：品牌名与车主邮箱唯一，车型必须隶属已存在的品牌。
//!
use crate::entities::{Brand, Model, Owner};
use crate::error::{DomainError, DomainResult};
use crate::persist::Store;

/// 业务错误码
pub mod codes {
    pub const DUPLICATE_BRAND: &str = "DUPLICATE_BRAND";
    pub const BRAND_NOT_FOUND: &str = "BRAND_NOT_FOUND";
    pub const DUPLICATE_EMAIL: &str = "DUPLICATE_EMAIL";
    pub const INVALID_YEAR_RANGE: &str = "INVALID_YEAR_RANGE";
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CatalogService;

impl CatalogService {
    pub fn new() -> Self {
        Self
    }

    pub async fn create_brand<S>(&self, store: &mut S, brand: Brand) -> DomainResult<Brand>
    where
        S: Store + ?Sized,
    {
        if store.find_brand_by_name(brand.name()).await?.is_some() {
            return Err(DomainError::business_rule(
                codes::DUPLICATE_BRAND,
                format!("brand '{}' already exists", brand.name()),
            ));
        }
        store.insert_brand(brand).await
    }

    pub async fn create_model<S>(&self, store: &mut S, model: Model) -> DomainResult<Model>
    where
        S: Store + ?Sized,
    {
        if !store.brand_exists(model.brand_id()).await? {
            return Err(DomainError::business_rule(
                codes::BRAND_NOT_FOUND,
                "the referenced brand does not exist",
            ));
        }

        // 停产年份不能早于开始生产年份
        if let Some(end) = model.end_year()
            && end < model.start_year()
        {
            return Err(DomainError::business_rule(
                codes::INVALID_YEAR_RANGE,
                format!("end year {end} is before start year {}", model.start_year()),
            ));
        }

        store.insert_model(model).await
    }

    pub async fn create_owner<S>(&self, store: &mut S, owner: Owner) -> DomainResult<Owner>
    where
        S: Store + ?Sized,
    {
        if store.find_owner_by_email(owner.email()).await?.is_some() {
            return Err(DomainError::business_rule(
                codes::DUPLICATE_EMAIL,
                "an owner with this email already exists",
            ));
        }
        store.insert_owner(owner).await
    }
}
