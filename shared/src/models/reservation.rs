//! Reservation document model
//!
//! Field names serialize in camelCase to match the stored document
//! shape (`numberOfPersons`, `dateString`, ...).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::types::{MealCategory, TimeOfDay};

/// 预约状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    Pending,
    Confirmed,
    Cancelled,
}

/// 确认状态 — 网上预约落库时一律待确认
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Acceptance {
    ToConfirm,
    Confirmed,
}

/// 预约文档 — 落库的完整记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    /// UUID v4
    pub id: String,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub number_of_persons: u32,
    /// 预约日期 (YYYY-MM-DD)
    pub date_string: String,
    pub category: MealCategory,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
    pub acceptance: Acceptance,
    pub status: ReservationStatus,
    pub reservation_type: String,
    pub group: bool,
    /// 备注，落库时带上 "[web reservation]" 标记与回显邮箱
    pub notes: String,
    /// 分配的桌号 (后台确认时填入)
    pub tables: Vec<String>,
    /// Unix 秒
    pub creation_date: i64,
    /// Unix 秒
    pub last_edited_on: i64,
    pub is_mock: bool,
    pub assigned_emoji: String,
    pub source: String,
    pub preferred_language: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cancellation_reason: Option<String>,
}

impl Reservation {
    /// Build the stored document from a validated form.
    ///
    /// `category` and `start_time` come from the caller because the raw
    /// form carries them as optionals until validation has run.
    pub fn from_form(
        form: &ReservationForm,
        category: MealCategory,
        start_time: TimeOfDay,
        end_time: TimeOfDay,
        id: String,
        now_seconds: i64,
    ) -> Self {
        Self {
            id,
            name: form.name.trim().to_string(),
            phone: form.phone.trim().to_string(),
            email: form.email.trim().to_string(),
            number_of_persons: form.number_of_persons,
            date_string: form.date.clone(),
            category,
            start_time,
            end_time,
            acceptance: Acceptance::ToConfirm,
            status: ReservationStatus::Pending,
            reservation_type: "inAdvance".to_string(),
            group: false,
            notes: form.annotated_notes(),
            tables: Vec::new(),
            creation_date: now_seconds,
            last_edited_on: now_seconds,
            is_mock: false,
            assigned_emoji: String::new(),
            source: "web".to_string(),
            preferred_language: form.preferred_language.clone(),
            cancellation_reason: None,
        }
    }
}

/// 网页表单提交的原始数据
///
/// `category` / `startTime` 在表单未选择时可能缺失或为空串，
/// 由校验器负责标记，而不是在反序列化时直接拒绝。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub number_of_persons: u32,
    /// 预约日期 (YYYY-MM-DD)
    #[serde(default)]
    pub date: String,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub category: Option<MealCategory>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub start_time: Option<TimeOfDay>,
    #[serde(default)]
    pub notes: String,
    #[serde(default = "default_language")]
    pub preferred_language: String,
}

impl ReservationForm {
    /// 落库用备注: 原始备注 + 网页预约标记 + 回显邮箱
    pub fn annotated_notes(&self) -> String {
        format!(
            "{}; [web reservation]; Email: {}",
            self.notes,
            self.email.trim()
        )
    }
}

fn default_language() -> String {
    "en".to_string()
}

/// 把缺失值和空串都当作 None，其余按 FromStr 解析
fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    let value = Option::<String>::deserialize(deserializer)?;
    match value.as_deref() {
        None | Some("") => Ok(None),
        Some(s) => s.parse::<T>().map(Some).map_err(serde::de::Error::custom),
    }
}
