//! 空位检查 — 后端接口与表单会话协调器
//!
//! # 结构
//!
//! - [`backend`] - 检查后端: 远端 HTTP 服务或内嵌库存计算
//! - [`coordinator`] - 每个表单会话一个协调器，负责检查状态机
//!   与提交控件状态，并丢弃过期响应

pub mod backend;
pub mod coordinator;

pub use backend::{AvailabilityBackend, BackendError, HttpAvailabilityBackend, InventoryBackend};
pub use coordinator::{
    AvailabilityCoordinator, Banner, CheckOutcome, CheckRequest, CheckState, FormControls,
    SubmitLabel,
};

use std::sync::Arc;

use dashmap::DashMap;

/// 表单会话注册表
///
/// 每个会话持有独立的协调器，序号互不影响；同一会话的并发检查
/// 按序号互相取代。
pub struct SessionRegistry {
    sessions: DashMap<String, Arc<AvailabilityCoordinator>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self {
            sessions: DashMap::new(),
        }
    }

    /// 取会话的协调器，没有则新建
    pub fn get_or_create(
        &self,
        session: &str,
        backend: Arc<dyn AvailabilityBackend>,
        is_debug: bool,
    ) -> Arc<AvailabilityCoordinator> {
        self.sessions
            .entry(session.to_string())
            .or_insert_with(|| Arc::new(AvailabilityCoordinator::new(backend, is_debug)))
            .clone()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
