use crate::entity::Entity;
use bon::Builder;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// 汽车品牌
#[derive(Builder, Debug, Clone, PartialEq, Eq)]
pub struct Brand {
    #[builder(default = Uuid::new_v4())]
    id: Uuid,
    #[builder(into)]
    name: String,
    /// 品牌原产国
    #[builder(into, default)]
    country: String,
    #[builder(into, default)]
    logo_url: String,
    #[builder(default = true)]
    active: bool,
    #[builder(default = Utc::now())]
    created_at: DateTime<Utc>,
    #[builder(default = Utc::now())]
    updated_at: DateTime<Utc>,
}

impl Brand {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    pub fn logo_url(&self) -> &str {
        &self.logo_url
    }

    pub fn active(&self) -> bool {
        self.active
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

impl Entity for Brand {
    const TYPE: &'static str = "brand";
    type Id = Uuid;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
