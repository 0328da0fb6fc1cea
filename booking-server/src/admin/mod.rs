//! 管理端 — 授权邮箱允许名单与接口门禁
//!
//! 身份认证由外部提供方完成，这里只校验调用方邮箱是否在允许
//! 名单内。管理路由统一挂 [`require_admin`] 中间件。

pub mod allowlist;

pub use allowlist::{AllowlistError, AllowlistResult, AllowlistStore};

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::core::ServerState;
use crate::utils::AppError;

/// 调用方邮箱请求头
pub const ADMIN_EMAIL_HEADER: &str = "x-admin-email";

/// 管理接口门禁中间件
pub async fn require_admin(
    State(state): State<ServerState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let email = request
        .headers()
        .get(ADMIN_EMAIL_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("")
        .trim();

    if email.is_empty() {
        return Err(AppError::forbidden("Admin email required"));
    }

    let authorized = state
        .allowlist
        .contains(email)
        .map_err(|e| AppError::database(e.to_string()))?;

    if !authorized {
        tracing::warn!(email, "Unauthorized admin access attempt");
        return Err(AppError::forbidden("Not an authorized admin"));
    }

    Ok(next.run(request).await)
}
