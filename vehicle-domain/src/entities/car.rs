use crate::entity::Entity;
use crate::value_object::{ModelYear, Vin};
use bon::Builder;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// 一辆具体的车辆
#[derive(Builder, Debug, Clone, PartialEq, Eq)]
pub struct Car {
    #[builder(default = Uuid::new_v4())]
    id: Uuid,
    model_id: Uuid,
    owner_id: Uuid,
    /// 该车辆的生产年份
    year: ModelYear,
    #[builder(into, default)]
    color: String,
    vin: Vin,
    #[builder(default = true)]
    active: bool,
    #[builder(default = Utc::now())]
    created_at: DateTime<Utc>,
    #[builder(default = Utc::now())]
    updated_at: DateTime<Utc>,
}

/// 车辆的部分更新，仅 `Some` 字段生效
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CarChanges {
    pub model_id: Option<Uuid>,
    pub owner_id: Option<Uuid>,
    pub year: Option<ModelYear>,
    pub color: Option<String>,
    pub vin: Option<Vin>,
    pub active: Option<bool>,
}

impl CarChanges {
    pub fn is_empty(&self) -> bool {
        self.model_id.is_none()
            && self.owner_id.is_none()
            && self.year.is_none()
            && self.color.is_none()
            && self.vin.is_none()
            && self.active.is_none()
    }
}

impl Car {
    pub fn model_id(&self) -> Uuid {
        self.model_id
    }

    pub fn owner_id(&self) -> Uuid {
        self.owner_id
    }

    pub fn year(&self) -> ModelYear {
        self.year
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn vin(&self) -> &Vin {
        &self.vin
    }

    pub fn active(&self) -> bool {
        self.active
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// 应用部分更新，并刷新 `updated_at`。
    ///
    /// 返回是否有字段发生了变化。
    pub fn apply(&mut self, changes: CarChanges) -> bool {
        let before = self.clone();

        if let Some(model_id) = changes.model_id {
            self.model_id = model_id;
        }
        if let Some(owner_id) = changes.owner_id {
            self.owner_id = owner_id;
        }
        if let Some(year) = changes.year {
            self.year = year;
        }
        if let Some(color) = changes.color {
            self.color = color;
        }
        if let Some(vin) = changes.vin {
            self.vin = vin;
        }
        if let Some(active) = changes.active {
            self.active = active;
        }

        self.updated_at = Utc::now();
        before.model_id != self.model_id
            || before.owner_id != self.owner_id
            || before.year != self.year
            || before.color != self.color
            || before.vin != self.vin
            || before.active != self.active
    }
}

impl Entity for Car {
    const TYPE: &'static str = "car";
    type Id = Uuid;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
