//! 基础类型 — 用餐类别与钟点时间
//!
//! [`TimeOfDay`] 在线上一律以 `"HH:MM"` 字符串传输，与存储端的
//! 文档字段格式一致。[`MealCategory`] 决定各自的时段窗口与用餐时长。

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// 用餐类别 (午餐 / 晚餐)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealCategory {
    Lunch,
    Dinner,
}

impl MealCategory {
    /// 用餐时长 (分钟): 午餐 1h20m, 晚餐 1h45m
    pub fn duration_minutes(&self) -> u32 {
        match self {
            MealCategory::Lunch => 80,
            MealCategory::Dinner => 105,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MealCategory::Lunch => "lunch",
            MealCategory::Dinner => "dinner",
        }
    }
}

impl fmt::Display for MealCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown meal category: {0}")]
pub struct ParseCategoryError(String);

impl FromStr for MealCategory {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lunch" => Ok(MealCategory::Lunch),
            "dinner" => Ok(MealCategory::Dinner),
            other => Err(ParseCategoryError(other.to_string())),
        }
    }
}

/// 钟点时间 (时 + 分)
///
/// 预约开始时段落在 15 分钟栅格上 (见 [`TimeOfDay::is_on_grid`])；
/// 结束时间由时长推出，可以落在栅格之外。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay {
    hour: u8,
    minute: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeParseError {
    #[error("invalid time format: {0}")]
    Format(String),

    #[error("time out of range: {0}")]
    Range(String),
}

impl TimeOfDay {
    pub fn new(hour: u8, minute: u8) -> Result<Self, TimeParseError> {
        if hour > 23 || minute > 59 {
            return Err(TimeParseError::Range(format!("{hour:02}:{minute:02}")));
        }
        Ok(Self { hour, minute })
    }

    /// 由自午夜起的分钟数构造，超过 24h 自动回卷 (不进位到次日)
    pub fn from_minutes(minutes: u32) -> Self {
        let total = minutes % (24 * 60);
        Self {
            hour: (total / 60) as u8,
            minute: (total % 60) as u8,
        }
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }

    /// 自午夜起的分钟数
    pub fn minutes_from_midnight(&self) -> u32 {
        u32::from(self.hour) * 60 + u32::from(self.minute)
    }

    /// 是否落在 15 分钟栅格上
    pub fn is_on_grid(&self) -> bool {
        self.minute % 15 == 0
    }

    /// 加上给定分钟数，跨午夜回卷而不推进日期
    pub fn add_minutes(&self, minutes: u32) -> Self {
        Self::from_minutes(self.minutes_from_midnight() + minutes)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for TimeOfDay {
    type Err = TimeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (hour, minute) = s
            .split_once(':')
            .ok_or_else(|| TimeParseError::Format(s.to_string()))?;
        let hour: u8 = hour
            .parse()
            .map_err(|_| TimeParseError::Format(s.to_string()))?;
        let minute: u8 = minute
            .parse()
            .map_err(|_| TimeParseError::Format(s.to_string()))?;
        Self::new(hour, minute)
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_formats_hh_mm() {
        let t: TimeOfDay = "09:05".parse().unwrap();
        assert_eq!((t.hour(), t.minute()), (9, 5));
        assert_eq!(t.to_string(), "09:05");
    }

    #[test]
    fn rejects_out_of_range_times() {
        assert!("24:00".parse::<TimeOfDay>().is_err());
        assert!("12:60".parse::<TimeOfDay>().is_err());
        assert!("noon".parse::<TimeOfDay>().is_err());
    }

    #[test]
    fn add_minutes_wraps_past_midnight() {
        let t: TimeOfDay = "23:30".parse().unwrap();
        assert_eq!(t.add_minutes(105).to_string(), "01:15");
    }

    #[test]
    fn category_durations() {
        assert_eq!(MealCategory::Lunch.duration_minutes(), 80);
        assert_eq!(MealCategory::Dinner.duration_minutes(), 105);
    }

    #[test]
    fn ordering_follows_clock() {
        let a: TimeOfDay = "12:00".parse().unwrap();
        let b: TimeOfDay = "13:30".parse().unwrap();
        assert!(a < b);
    }
}
