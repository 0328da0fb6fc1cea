//! Availability backends
//!
//! 协调器通过 [`AvailabilityBackend`] 访问检查服务。具体实现在启动
//! 时注入 (远端 HTTP 服务或内嵌库存计算)，组件自身不感知环境。

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use shared::availability::{AvailabilityQuery, AvailabilityResult};
use shared::models::ReservationStatus;
use shared::types::TimeOfDay;

use crate::db::repository::ReservationRepository;

/// 检查后端错误
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("availability endpoint error: {0}")]
    Transport(String),

    #[error("availability response malformed: {0}")]
    Decode(String),

    #[error("reservation store error: {0}")]
    Store(String),
}

/// 空位检查后端接口
#[async_trait]
pub trait AvailabilityBackend: Send + Sync {
    async fn check(&self, query: &AvailabilityQuery) -> Result<AvailabilityResult, BackendError>;
}

// ── Remote HTTP backend ─────────────────────────────────────────────

/// 远端检查服务
///
/// `POST <endpoint>`，负载与响应都是 camelCase JSON
/// (`numberOfPersons`, `availableTables`, ...)。
pub struct HttpAvailabilityBackend {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpAvailabilityBackend {
    pub fn new(endpoint: String, timeout_ms: u64) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .build()?;
        Ok(Self { client, endpoint })
    }
}

#[async_trait]
impl AvailabilityBackend for HttpAvailabilityBackend {
    async fn check(&self, query: &AvailabilityQuery) -> Result<AvailabilityResult, BackendError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(query)
            .send()
            .await
            .map_err(|e| BackendError::Transport(e.to_string()))?;

        let response = response
            .error_for_status()
            .map_err(|e| BackendError::Transport(e.to_string()))?;

        response
            .json::<AvailabilityResult>()
            .await
            .map_err(|e| BackendError::Decode(e.to_string()))
    }
}

// ── Embedded inventory backend ──────────────────────────────────────

/// 内嵌库存后端
///
/// 没有外部检查服务时直接用预约表计算：需要的桌数按每桌座位数
/// 向上取整，已占桌数为同日同类别、时间重叠且未取消的预约之和。
pub struct InventoryBackend {
    repo: ReservationRepository,
    table_count: u32,
    seats_per_table: u32,
}

impl InventoryBackend {
    pub fn new(repo: ReservationRepository, table_count: u32, seats_per_table: u32) -> Self {
        Self {
            repo,
            table_count,
            seats_per_table: seats_per_table.max(1),
        }
    }

    /// 聚会需要的桌数 (至少一桌)
    pub fn tables_needed(&self, persons: u32) -> u32 {
        persons.div_ceil(self.seats_per_table).max(1)
    }
}

/// 两个钟点区间是否重叠。结束早于开始说明跨了午夜，加一天再比。
fn overlaps(a_start: TimeOfDay, a_end: TimeOfDay, b_start: TimeOfDay, b_end: TimeOfDay) -> bool {
    const DAY: u32 = 24 * 60;
    let unwrap_interval = |start: TimeOfDay, end: TimeOfDay| {
        let s = start.minutes_from_midnight();
        let mut e = end.minutes_from_midnight();
        if e <= s {
            e += DAY;
        }
        (s, e)
    };
    let (a_start, a_end) = unwrap_interval(a_start, a_end);
    let (b_start, b_end) = unwrap_interval(b_start, b_end);
    a_start < b_end && b_start < a_end
}

#[async_trait]
impl AvailabilityBackend for InventoryBackend {
    async fn check(&self, query: &AvailabilityQuery) -> Result<AvailabilityResult, BackendError> {
        let needed = self.tables_needed(query.number_of_persons);

        let same_day = self
            .repo
            .find_by_date(&query.date)
            .await
            .map_err(|e| BackendError::Store(e.to_string()))?;

        let occupied: u32 = same_day
            .iter()
            .filter(|r| r.status != ReservationStatus::Cancelled)
            .filter(|r| r.category == query.category)
            .filter(|r| overlaps(r.start_time, r.end_time, query.start_time, query.end_time))
            .map(|r| self.tables_needed(r.number_of_persons))
            .sum();

        let free = self.table_count.saturating_sub(occupied);

        Ok(AvailabilityResult {
            available: free >= needed,
            available_tables: free,
            tables_needed: needed,
        })
    }
}
