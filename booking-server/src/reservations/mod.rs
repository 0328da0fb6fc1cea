//! 预约域 — 提交编排

pub mod submit;

pub use submit::{SubmitError, submit_reservation};
