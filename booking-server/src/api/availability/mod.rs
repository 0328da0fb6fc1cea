//! 空位检查 API 模块

mod handler;

use axum::{Router, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/availability", post(handler::check))
        .route("/api/availability/dismiss", post(handler::dismiss_banner))
}
