//! Reservation Record Model

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use shared::models::{Acceptance, Reservation, ReservationStatus};
use shared::types::{MealCategory, TimeOfDay};

/// 预约库内记录
///
/// 字段与线上文档一致 (camelCase)，UUID 作为记录 key 而不是字段；
/// 读出时由 key 还原文档的 `id`。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationRecord {
    #[serde(default, skip_serializing)]
    pub id: Option<RecordId>,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub number_of_persons: u32,
    pub date_string: String,
    pub category: MealCategory,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
    pub acceptance: Acceptance,
    pub status: ReservationStatus,
    pub reservation_type: String,
    pub group: bool,
    pub notes: String,
    pub tables: Vec<String>,
    pub creation_date: i64,
    pub last_edited_on: i64,
    pub is_mock: bool,
    pub assigned_emoji: String,
    pub source: String,
    pub preferred_language: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cancellation_reason: Option<String>,
}

impl ReservationRecord {
    pub fn from_wire(reservation: &Reservation) -> Self {
        Self {
            id: None,
            name: reservation.name.clone(),
            phone: reservation.phone.clone(),
            email: reservation.email.clone(),
            number_of_persons: reservation.number_of_persons,
            date_string: reservation.date_string.clone(),
            category: reservation.category,
            start_time: reservation.start_time,
            end_time: reservation.end_time,
            acceptance: reservation.acceptance,
            status: reservation.status,
            reservation_type: reservation.reservation_type.clone(),
            group: reservation.group,
            notes: reservation.notes.clone(),
            tables: reservation.tables.clone(),
            creation_date: reservation.creation_date,
            last_edited_on: reservation.last_edited_on,
            is_mock: reservation.is_mock,
            assigned_emoji: reservation.assigned_emoji.clone(),
            source: reservation.source.clone(),
            preferred_language: reservation.preferred_language.clone(),
            cancellation_reason: reservation.cancellation_reason.clone(),
        }
    }

    pub fn into_wire(self) -> Reservation {
        Reservation {
            id: self
                .id
                .map(|id| id.key().to_string())
                .unwrap_or_default(),
            name: self.name,
            phone: self.phone,
            email: self.email,
            number_of_persons: self.number_of_persons,
            date_string: self.date_string,
            category: self.category,
            start_time: self.start_time,
            end_time: self.end_time,
            acceptance: self.acceptance,
            status: self.status,
            reservation_type: self.reservation_type,
            group: self.group,
            notes: self.notes,
            tables: self.tables,
            creation_date: self.creation_date,
            last_edited_on: self.last_edited_on,
            is_mock: self.is_mock,
            assigned_emoji: self.assigned_emoji,
            source: self.source,
            preferred_language: self.preferred_language,
            cancellation_reason: self.cancellation_reason,
        }
    }
}
