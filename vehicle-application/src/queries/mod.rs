//! 车辆业务查询
//!
//! 查询不经过工作单元，通过存储提供者的非事务会话读取数据。
//!
mod get_car_by_id;
mod get_cars;
mod get_cars_by_owner;

pub use get_car_by_id::{GetCarByIdHandler, GetCarByIdRequest};
pub use get_cars::{GetCarsHandler, GetCarsRequest};
pub use get_cars_by_owner::{GetCarsByOwnerHandler, GetCarsByOwnerRequest};
