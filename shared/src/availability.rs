//! 空位检查 DTO
//!
//! 请求/响应负载与外部检查服务的 JSON 约定一致 (camelCase 字段)。

use serde::{Deserialize, Serialize};

use crate::types::{MealCategory, TimeOfDay};

/// 空位检查请求负载
///
/// 由一次表单状态派生，检查完即丢弃，没有独立生命周期。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityQuery {
    pub number_of_persons: u32,
    /// 预约日期 (YYYY-MM-DD)
    pub date: String,
    pub category: MealCategory,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
    pub is_debug: bool,
}

/// 空位检查结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityResult {
    pub available: bool,
    /// 空闲桌数
    #[serde(default)]
    pub available_tables: u32,
    /// 本次聚会需要的桌数
    #[serde(default)]
    pub tables_needed: u32,
}
