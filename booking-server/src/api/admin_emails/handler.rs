//! Admin allowlist API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};

use crate::admin::AllowlistError;
use crate::core::ServerState;
use crate::utils::{AppError, AppResult};

/// 允许名单快照
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AllowlistResponse {
    pub emails: Vec<String>,
    /// 受保护的默认邮箱 (不可移除)
    pub protected: String,
}

fn snapshot(state: &ServerState) -> AppResult<AllowlistResponse> {
    let emails = state
        .allowlist
        .list()
        .map_err(|e| AppError::database(e.to_string()))?;
    Ok(AllowlistResponse {
        emails,
        protected: state.allowlist.protected().to_string(),
    })
}

/// GET /api/admin/emails - 全部授权邮箱
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<AllowlistResponse>> {
    Ok(Json(snapshot(&state)?))
}

#[derive(Debug, Deserialize)]
pub struct AddPayload {
    pub email: String,
}

/// POST /api/admin/emails - 授权一个新邮箱
pub async fn add(
    State(state): State<ServerState>,
    Json(payload): Json<AddPayload>,
) -> AppResult<Json<AllowlistResponse>> {
    state.allowlist.add(&payload.email).map_err(|e| match e {
        AllowlistError::InvalidEmail(email) => {
            AppError::validation(format!("Invalid email format: {email}"))
        }
        AllowlistError::Duplicate(email) => {
            AppError::conflict(format!("{email} is already an admin"))
        }
        other => AppError::database(other.to_string()),
    })?;

    Ok(Json(snapshot(&state)?))
}

/// DELETE /api/admin/emails/:email - 移除授权
///
/// 受保护的默认邮箱拒绝移除。
pub async fn remove(
    State(state): State<ServerState>,
    Path(email): Path<String>,
) -> AppResult<Json<AllowlistResponse>> {
    state.allowlist.remove(&email).map_err(|e| match e {
        AllowlistError::ProtectedEntry => {
            AppError::forbidden("The default admin cannot be removed")
        }
        AllowlistError::NotFound(email) => {
            AppError::not_found(format!("{email} is not an admin"))
        }
        other => AppError::database(other.to_string()),
    })?;

    Ok(Json(snapshot(&state)?))
}
