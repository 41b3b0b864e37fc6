//! 车辆业务命令
//!
//! 每个命令由一个请求类型与一个处理器组成，处理器以 `NAME` 常量注册到调度器。
//!
mod create_brand;
mod create_car;
mod create_model;
mod create_owner;
mod update_car;

pub use create_brand::{CreateBrandHandler, CreateBrandRequest};
pub use create_car::{CreateCarHandler, CreateCarRequest, DEFAULTED_YEAR_NOTE};
pub use create_model::{CreateModelHandler, CreateModelRequest};
pub use create_owner::{CreateOwnerHandler, CreateOwnerRequest};
pub use update_car::{UpdateCarHandler, UpdateCarRequest};

use crate::validation::Issues;
use vehicle_domain::value_object::{ModelYear, Vin};

fn check_vin(issues: &mut Issues, vin: &str) {
    if vin.is_empty() {
        issues.push("vin", "vin is required");
    } else if vin.chars().count() != Vin::LENGTH {
        issues.push("vin", format!("vin must be exactly {} characters", Vin::LENGTH));
    }
}

fn check_year(issues: &mut Issues, field: &str, year: i32) {
    let range = ModelYear::allowed_range();
    issues.ensure(
        range.contains(&year),
        field,
        format!(
            "year must be between {} and {}",
            range.start(),
            range.end()
        ),
    );
}

fn check_required(issues: &mut Issues, field: &str, value: &str) {
    issues.ensure(!value.trim().is_empty(), field, format!("{field} is required"));
}
