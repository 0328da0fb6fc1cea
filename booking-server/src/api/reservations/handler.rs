//! Reservation API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use shared::ApiResponse;
use shared::models::{Reservation, ReservationForm, ReservationStatus};

use crate::core::ServerState;
use crate::reservations::{SubmitError, submit_reservation};
use crate::utils::{AppError, AppResult, ok_with_message, time};

/// POST /api/reservations - 提交预约
pub async fn create(
    State(state): State<ServerState>,
    Json(form): Json<ReservationForm>,
) -> AppResult<Json<ApiResponse<Reservation>>> {
    let repo = state.reservation_repository();
    let stored = submit_reservation(
        state.backend.as_ref(),
        &repo,
        &form,
        time::today(),
        state.config.is_debug(),
    )
    .await
    .map_err(|e| match e {
        SubmitError::Validation(result) => AppError::Form(result),
        SubmitError::NoLongerAvailable { tables_needed } => AppError::conflict(format!(
            "No tables available for the selected time ({tables_needed} needed)"
        )),
        SubmitError::AvailabilityCheck(e) => AppError::upstream(e.to_string()),
        SubmitError::Persistence(e) => AppError::database(e.to_string()),
    })?;

    Ok(ok_with_message(stored, "Reservation stored"))
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// 给定日期 (YYYY-MM-DD)；缺省列出今天起的全部预约
    pub date: Option<String>,
}

/// GET /api/reservations[?date=] - 按日期或列出将来的预约
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Reservation>>> {
    let repo = state.reservation_repository();
    let reservations = match &query.date {
        Some(date) => {
            time::parse_date(date)?;
            repo.find_by_date(date).await
        }
        None => {
            let today = time::today().format("%Y-%m-%d").to_string();
            repo.find_upcoming(&today).await
        }
    }
    .map_err(|e| AppError::database(e.to_string()))?;

    Ok(Json(reservations))
}

/// GET /api/reservations/by-email/:email - 客人的历史预约
pub async fn by_email(
    State(state): State<ServerState>,
    Path(email): Path<String>,
) -> AppResult<Json<Vec<Reservation>>> {
    let repo = state.reservation_repository();
    let reservations = repo
        .find_by_email(&email)
        .await
        .map_err(|e| AppError::database(e.to_string()))?;
    Ok(Json(reservations))
}

#[derive(Debug, Deserialize)]
pub struct StatusPayload {
    pub status: ReservationStatus,
}

/// PUT /api/reservations/:id/status - 改预约状态
pub async fn update_status(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<StatusPayload>,
) -> AppResult<Json<Reservation>> {
    let repo = state.reservation_repository();
    let updated = repo
        .update_status(&id, payload.status, time::now_seconds())
        .await
        .map_err(|e| match e {
            crate::db::repository::RepoError::NotFound(msg) => AppError::not_found(msg),
            other => AppError::database(other.to_string()),
        })?;
    Ok(Json(updated))
}

#[derive(Debug, Deserialize)]
pub struct CancelPayload {
    #[serde(default)]
    pub reason: Option<String>,
}

/// POST /api/reservations/:id/cancel - 取消预约
pub async fn cancel(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<CancelPayload>,
) -> AppResult<Json<Reservation>> {
    let reason = payload
        .reason
        .filter(|reason| !reason.trim().is_empty())
        .unwrap_or_else(|| "Cancelled by customer".to_string());

    let repo = state.reservation_repository();
    let cancelled = repo
        .cancel(&id, reason, time::now_seconds())
        .await
        .map_err(|e| match e {
            crate::db::repository::RepoError::NotFound(msg) => AppError::not_found(msg),
            other => AppError::database(other.to_string()),
        })?;
    Ok(Json(cancelled))
}
