use crate::entity::Entity;
use crate::value_object::ModelYear;
use bon::Builder;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// 车型（某品牌下的具体型号）
#[derive(Builder, Debug, Clone, PartialEq, Eq)]
pub struct Model {
    #[builder(default = Uuid::new_v4())]
    id: Uuid,
    #[builder(into)]
    name: String,
    brand_id: Uuid,
    /// 开始生产年份
    start_year: ModelYear,
    /// 停产年份，仍在生产时为空
    end_year: Option<ModelYear>,
    /// 车辆类别（SUV、轿车等）
    #[builder(into, default)]
    category: String,
    #[builder(default = true)]
    active: bool,
    #[builder(default = Utc::now())]
    created_at: DateTime<Utc>,
    #[builder(default = Utc::now())]
    updated_at: DateTime<Utc>,
}

impl Model {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn brand_id(&self) -> Uuid {
        self.brand_id
    }

    pub fn start_year(&self) -> ModelYear {
        self.start_year
    }

    pub fn end_year(&self) -> Option<ModelYear> {
        self.end_year
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn active(&self) -> bool {
        self.active
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// 是否仍在生产
    pub fn in_production(&self) -> bool {
        self.end_year.is_none()
    }
}

impl Entity for Model {
    const TYPE: &'static str = "model";
    type Id = Uuid;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
