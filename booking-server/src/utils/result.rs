//! Result 别名
//!
//! HTTP handler 与应用逻辑统一使用 [`AppResult`]，错误经
//! `AppError::into_response` 变成带错误码的响应。

use crate::AppError;

/// Application-level Result type
pub type AppResult<T> = Result<T, AppError>;
