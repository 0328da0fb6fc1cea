//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`slots`] - 可选时段查询
//! - [`availability`] - 空位检查
//! - [`reservations`] - 预约提交与后台管理
//! - [`admin_emails`] - 管理员允许名单

pub mod admin_emails;
pub mod availability;
pub mod health;
pub mod reservations;
pub mod slots;

// Re-export common types for handlers
pub use crate::utils::{AppError, AppResult};
