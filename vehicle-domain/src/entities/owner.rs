use crate::entity::Entity;
use bon::Builder;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// 车主
#[derive(Builder, Debug, Clone, PartialEq, Eq)]
pub struct Owner {
    #[builder(default = Uuid::new_v4())]
    id: Uuid,
    #[builder(into)]
    name: String,
    /// 邮箱（全局唯一）
    #[builder(into)]
    email: String,
    #[builder(into, default)]
    phone: String,
    #[builder(into, default)]
    address: String,
    #[builder(default = Utc::now())]
    created_at: DateTime<Utc>,
    #[builder(default = Utc::now())]
    updated_at: DateTime<Utc>,
}

impl Owner {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

impl Entity for Owner {
    const TYPE: &'static str = "owner";
    type Id = Uuid;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
