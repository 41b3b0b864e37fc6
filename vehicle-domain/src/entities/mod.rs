//! 领域实体
//!
//! 车辆（`Car`）隶属于某个车型（`Model`）与车主（`Owner`），车型隶属于品牌（`Brand`）。

mod brand;
mod car;
mod model;
mod owner;

pub use brand::Brand;
pub use car::{Car, CarChanges};
pub use model::Model;
pub use owner::Owner;
