//! Availability API Handlers

use axum::{Json, extract::State};
use serde::Deserialize;

use crate::availability::{CheckRequest, CheckState};
use crate::core::ServerState;
use crate::utils::{AppResult, time};

/// 未带会话 id 的请求共用一个协调器
const DEFAULT_SESSION: &str = "default";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityPayload {
    /// 表单会话 id — 同一会话的并发检查按序号互相取代
    #[serde(default)]
    pub session: Option<String>,
    #[serde(flatten)]
    pub request: CheckRequest,
}

/// POST /api/availability - 对当前表单状态跑一次空位检查
pub async fn check(
    State(state): State<ServerState>,
    Json(payload): Json<AvailabilityPayload>,
) -> AppResult<Json<CheckState>> {
    time::parse_date(&payload.request.date)?;
    if payload.request.number_of_persons == 0 {
        return Err(crate::utils::AppError::validation(
            "numberOfPersons must be positive",
        ));
    }

    let session = payload.session.as_deref().unwrap_or(DEFAULT_SESSION);
    let coordinator = state.coordinator_for(session);
    let check_state = coordinator.check(payload.request).await;
    Ok(Json(check_state))
}

#[derive(Debug, Deserialize)]
pub struct DismissPayload {
    #[serde(default)]
    pub session: Option<String>,
}

/// POST /api/availability/dismiss - 关闭检查横幅
///
/// 只隐藏提示，不取消进行中的检查。
pub async fn dismiss_banner(
    State(state): State<ServerState>,
    Json(payload): Json<DismissPayload>,
) -> Json<CheckState> {
    let session = payload.session.as_deref().unwrap_or(DEFAULT_SESSION);
    let coordinator = state.coordinator_for(session);
    coordinator.dismiss_banner();
    Json(coordinator.current())
}
