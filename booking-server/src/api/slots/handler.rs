//! Slot API Handlers

use axum::{Json, extract::Query};
use serde::{Deserialize, Serialize};

use shared::types::{MealCategory, TimeOfDay};

use crate::timetable;

#[derive(Debug, Deserialize)]
pub struct SlotsQuery {
    pub category: MealCategory,
}

/// 一档可选时段及其结束时间
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotEntry {
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
}

/// GET /api/slots?category=lunch - 给定类别的可选时段
///
/// 升序返回；前端默认选中第一档。
pub async fn list(Query(query): Query<SlotsQuery>) -> Json<Vec<SlotEntry>> {
    let slots = timetable::slots(query.category)
        .into_iter()
        .map(|start_time| SlotEntry {
            start_time,
            end_time: timetable::end_time(start_time, query.category),
        })
        .collect();
    Json(slots)
}
