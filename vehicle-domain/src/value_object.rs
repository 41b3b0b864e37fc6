//! 值对象（Value Object）
//!
//! 无标识、以值相等为准的对象，用于封装不可变的概念性值与校验逻辑。
//!
use crate::error::DomainError;
use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;

/// 值对象抽象
pub trait ValueObject {
    /// 业务校验失败时的错误类型
    type Error;

    /// 创建值对象时进行验证
    fn validate(&self) -> Result<(), Self::Error>;
}

/// 车辆识别码（Vehicle Identification Number）
///
/// 长度固定为 17 个字符。
///
/// # 示例
///
/// ```
/// use vehicle_domain::value_object::Vin;
///
/// let vin = Vin::new("1HGCM82633A004352").unwrap();
/// assert_eq!(vin.as_str(), "1HGCM82633A004352");
/// assert!(Vin::new("1HGCM8263").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Vin(String);

impl Vin {
    /// VIN 的固定长度
    pub const LENGTH: usize = 17;

    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let vin = Self(value.into());
        vin.validate()?;
        Ok(vin)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ValueObject for Vin {
    type Error = DomainError;

    fn validate(&self) -> Result<(), Self::Error> {
        let len = self.0.chars().count();
        if len != Self::LENGTH {
            return Err(DomainError::invalid_value(format!(
                "vin must be exactly {} characters, got {len}",
                Self::LENGTH
            )));
        }
        Ok(())
    }
}

impl TryFrom<String> for Vin {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Vin> for String {
    fn from(vin: Vin) -> Self {
        vin.0
    }
}

impl fmt::Display for Vin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 车辆年份
///
/// 合法区间为 `1900..=当前年份 + 1`。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct ModelYear(i32);

impl ModelYear {
    /// 最早可登记的年份
    pub const EARLIEST: i32 = 1900;

    pub fn new(value: i32) -> Result<Self, DomainError> {
        let year = Self(value);
        year.validate()?;
        Ok(year)
    }

    /// 当前年份
    pub fn current() -> Self {
        Self(Utc::now().year())
    }

    /// 当前允许的年份区间
    pub fn allowed_range() -> RangeInclusive<i32> {
        Self::EARLIEST..=Utc::now().year() + 1
    }

    pub const fn value(&self) -> i32 {
        self.0
    }
}

impl ValueObject for ModelYear {
    type Error = DomainError;

    fn validate(&self) -> Result<(), Self::Error> {
        let range = Self::allowed_range();
        if !range.contains(&self.0) {
            return Err(DomainError::invalid_value(format!(
                "year must be between {} and {}, got {}",
                range.start(),
                range.end(),
                self.0
            )));
        }
        Ok(())
    }
}

impl TryFrom<i32> for ModelYear {
    type Error = DomainError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ModelYear> for i32 {
    fn from(year: ModelYear) -> Self {
        year.0
    }
}

impl fmt::Display for ModelYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
