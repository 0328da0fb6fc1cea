//! Reservation API 模块
//!
//! 提交是公共路由；查询与改状态属于后台，挂管理员门禁。

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use crate::admin::require_admin;
use crate::core::ServerState;

pub fn router(state: ServerState) -> Router<ServerState> {
    Router::new().nest("/api/reservations", routes(state))
}

fn routes(state: ServerState) -> Router<ServerState> {
    let public_routes = Router::new().route("/", post(handler::create));

    let admin_routes = Router::new()
        .route("/", get(handler::list))
        .route("/by-email/{email}", get(handler::by_email))
        .route("/{id}/status", put(handler::update_status))
        .route("/{id}/cancel", post(handler::cancel))
        .layer(middleware::from_fn_with_state(state, require_admin));

    public_routes.merge(admin_routes)
}
