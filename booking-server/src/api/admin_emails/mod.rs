//! Admin allowlist API 模块

mod handler;

use axum::{Router, middleware, routing::get};

use crate::admin::require_admin;
use crate::core::ServerState;

pub fn router(state: ServerState) -> Router<ServerState> {
    Router::new().nest("/api/admin/emails", routes(state))
}

fn routes(state: ServerState) -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::add))
        .route("/{email}", axum::routing::delete(handler::remove))
        .layer(middleware::from_fn_with_state(state, require_admin))
}
