//! 空位检查协调器
//!
//! 每个表单会话一个协调器。一次检查的状态机：
//!
//! ```text
//! Idle → Checking → Available | Unavailable | Failed
//! ```
//!
//! 进入 Checking 即禁用提交按钮并亮出检查横幅；结果决定按钮的
//! 最终状态。字段一变就会再发一次检查，所以每次调用领取一个
//! 递增序号，响应落地时若已有更新的检查发出则整个丢弃 —— 控件
//! 状态永远反映最近发出的那次检查，不会被乱序的旧响应覆盖。

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use shared::availability::AvailabilityQuery;
use shared::types::{MealCategory, TimeOfDay};

use super::backend::AvailabilityBackend;
use crate::timetable::{self, AlternativeSlots};

/// 提交按钮文案
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SubmitLabel {
    Submit,
    Checking,
    NoTablesAvailable,
}

/// 横幅状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Banner {
    Hidden,
    Checking,
    /// 检查失败的一次性提示
    CheckFailed,
}

/// 表单控件快照 — 前端按此渲染提交按钮与横幅
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormControls {
    pub submit_enabled: bool,
    pub submit_label: SubmitLabel,
    pub banner: Banner,
}

impl FormControls {
    /// 初始/安全状态: 按钮可用、默认文案、无横幅
    fn idle() -> Self {
        Self {
            submit_enabled: true,
            submit_label: SubmitLabel::Submit,
            banner: Banner::Hidden,
        }
    }
}

/// 一次检查的结果
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", rename_all_fields = "camelCase", tag = "phase")]
pub enum CheckOutcome {
    Idle,
    Checking,
    Available {
        available_tables: u32,
        number_of_persons: u32,
    },
    Unavailable {
        tables_needed: u32,
        alternatives: AlternativeSlots,
        /// 前后都没有可推荐时段时为 true，前端据此换一条文案
        no_alternatives: bool,
    },
    Failed,
}

/// 协调器对外可见的完整状态
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckState {
    /// 产生此状态的检查序号 (0 = 尚未检查)
    pub seq: u64,
    pub outcome: CheckOutcome,
    pub controls: FormControls,
}

impl CheckState {
    fn idle() -> Self {
        Self {
            seq: 0,
            outcome: CheckOutcome::Idle,
            controls: FormControls::idle(),
        }
    }
}

/// 一次检查的输入 — 表单当前的四个字段
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckRequest {
    pub number_of_persons: u32,
    /// 预约日期 (YYYY-MM-DD)
    pub date: String,
    pub category: MealCategory,
    pub start_time: TimeOfDay,
}

/// 空位检查协调器
pub struct AvailabilityCoordinator {
    backend: Arc<dyn AvailabilityBackend>,
    is_debug: bool,
    /// 最近发出的检查序号
    issued: AtomicU64,
    state: watch::Sender<CheckState>,
}

impl AvailabilityCoordinator {
    pub fn new(backend: Arc<dyn AvailabilityBackend>, is_debug: bool) -> Self {
        Self {
            backend,
            is_debug,
            issued: AtomicU64::new(0),
            state: watch::Sender::new(CheckState::idle()),
        }
    }

    /// 当前状态快照
    pub fn current(&self) -> CheckState {
        self.state.borrow().clone()
    }

    /// 订阅状态变化
    pub fn subscribe(&self) -> watch::Receiver<CheckState> {
        self.state.subscribe()
    }

    /// 发起一次空位检查，返回落定后的状态
    ///
    /// 响应落地前若有更新的检查发出，本次结果被丢弃，返回当下
    /// 的最新状态。
    pub async fn check(&self, request: CheckRequest) -> CheckState {
        let seq = self.issued.fetch_add(1, Ordering::SeqCst) + 1;

        self.apply(
            seq,
            CheckOutcome::Checking,
            FormControls {
                submit_enabled: false,
                submit_label: SubmitLabel::Checking,
                banner: Banner::Checking,
            },
        );

        let end_time = timetable::end_time(request.start_time, request.category);
        let query = AvailabilityQuery {
            number_of_persons: request.number_of_persons,
            date: request.date.clone(),
            category: request.category,
            start_time: request.start_time,
            end_time,
            is_debug: self.is_debug,
        };

        let response = self.backend.check(&query).await;

        // 过期检查: 等待期间有更新的请求发出 → 丢弃本次响应
        if self.issued.load(Ordering::SeqCst) != seq {
            tracing::debug!(seq, "Dropping superseded availability response");
            return self.current();
        }

        let (outcome, controls) = match response {
            Ok(result) if result.available => (
                CheckOutcome::Available {
                    available_tables: result.available_tables,
                    number_of_persons: request.number_of_persons,
                },
                FormControls {
                    submit_enabled: true,
                    submit_label: SubmitLabel::Submit,
                    banner: Banner::Hidden,
                },
            ),
            Ok(result) => {
                let alternatives = timetable::alternatives(request.category, request.start_time);
                (
                    CheckOutcome::Unavailable {
                        tables_needed: result.tables_needed,
                        alternatives,
                        no_alternatives: alternatives.is_empty(),
                    },
                    FormControls {
                        submit_enabled: false,
                        submit_label: SubmitLabel::NoTablesAvailable,
                        banner: Banner::Hidden,
                    },
                )
            }
            Err(e) => {
                tracing::warn!(seq, error = %e, "Availability check failed");
                (CheckOutcome::Failed, {
                    let mut controls = FormControls::idle();
                    controls.banner = Banner::CheckFailed;
                    controls
                })
            }
        };

        self.apply(seq, outcome, controls)
    }

    /// 手动关闭横幅 — 只隐藏提示，不取消进行中的检查
    pub fn dismiss_banner(&self) {
        self.state.send_modify(|state| {
            state.controls.banner = Banner::Hidden;
        });
    }

    /// 只有不比当前状态旧的序号才允许落地
    fn apply(&self, seq: u64, outcome: CheckOutcome, controls: FormControls) -> CheckState {
        self.state.send_if_modified(|state| {
            if seq >= state.seq {
                *state = CheckState {
                    seq,
                    outcome,
                    controls,
                };
                true
            } else {
                false
            }
        });
        self.current()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Mutex;
    use std::sync::atomic::AtomicU32;

    use async_trait::async_trait;
    use tokio::sync::Notify;

    use shared::availability::AvailabilityResult;

    use crate::availability::backend::BackendError;

    fn request(start: &str) -> CheckRequest {
        CheckRequest {
            number_of_persons: 4,
            date: "2026-09-04".to_string(),
            category: MealCategory::Dinner,
            start_time: start.parse().unwrap(),
        }
    }

    fn available(tables: u32) -> AvailabilityResult {
        AvailabilityResult {
            available: true,
            available_tables: tables,
            tables_needed: 1,
        }
    }

    fn unavailable(needed: u32) -> AvailabilityResult {
        AvailabilityResult {
            available: false,
            available_tables: 0,
            tables_needed: needed,
        }
    }

    /// 固定应答的后端
    struct FixedBackend(Result<AvailabilityResult, ()>);

    #[async_trait]
    impl AvailabilityBackend for FixedBackend {
        async fn check(
            &self,
            _query: &AvailabilityQuery,
        ) -> Result<AvailabilityResult, BackendError> {
            self.0
                .clone()
                .map_err(|_| BackendError::Transport("connection refused".to_string()))
        }
    }

    /// 第一次调用挂起、第二次调用立即应答并放行第一次的后端，
    /// 用于构造确定性的乱序响应
    struct SupersededBackend {
        calls: AtomicU32,
        release_first: Notify,
        first: Mutex<Option<Result<AvailabilityResult, ()>>>,
        second: Mutex<Option<Result<AvailabilityResult, ()>>>,
    }

    impl SupersededBackend {
        fn new(
            first: Result<AvailabilityResult, ()>,
            second: Result<AvailabilityResult, ()>,
        ) -> Self {
            Self {
                calls: AtomicU32::new(0),
                release_first: Notify::new(),
                first: Mutex::new(Some(first)),
                second: Mutex::new(Some(second)),
            }
        }
    }

    #[async_trait]
    impl AvailabilityBackend for SupersededBackend {
        async fn check(
            &self,
            _query: &AvailabilityQuery,
        ) -> Result<AvailabilityResult, BackendError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            let result = if call == 0 {
                self.release_first.notified().await;
                self.first.lock().unwrap().take()
            } else {
                self.release_first.notify_one();
                self.second.lock().unwrap().take()
            };
            result
                .expect("backend called more often than scripted")
                .map_err(|_| BackendError::Transport("connection refused".to_string()))
        }
    }

    #[tokio::test]
    async fn available_result_enables_submit() {
        let coordinator =
            AvailabilityCoordinator::new(Arc::new(FixedBackend(Ok(available(5)))), true);

        let state = coordinator.check(request("19:00")).await;

        assert_eq!(state.seq, 1);
        assert_eq!(
            state.outcome,
            CheckOutcome::Available {
                available_tables: 5,
                number_of_persons: 4
            }
        );
        assert!(state.controls.submit_enabled);
        assert_eq!(state.controls.submit_label, SubmitLabel::Submit);
        assert_eq!(state.controls.banner, Banner::Hidden);
    }

    #[tokio::test]
    async fn unavailable_result_disables_submit_and_suggests_neighbors() {
        let coordinator =
            AvailabilityCoordinator::new(Arc::new(FixedBackend(Ok(unavailable(2)))), true);

        let state = coordinator.check(request("18:30")).await;

        let CheckOutcome::Unavailable {
            tables_needed,
            alternatives,
            no_alternatives,
        } = state.outcome
        else {
            panic!("expected unavailable outcome, got {:?}", state.outcome);
        };
        assert_eq!(tables_needed, 2);
        assert!(!no_alternatives);
        assert_eq!(alternatives.earlier, Some("18:15".parse().unwrap()));
        assert_eq!(alternatives.later, Some("18:45".parse().unwrap()));
        assert!(!state.controls.submit_enabled);
        assert_eq!(state.controls.submit_label, SubmitLabel::NoTablesAvailable);
    }

    #[tokio::test]
    async fn transport_failure_restores_safe_controls() {
        let coordinator = AvailabilityCoordinator::new(Arc::new(FixedBackend(Err(()))), true);

        let state = coordinator.check(request("19:00")).await;

        assert_eq!(state.outcome, CheckOutcome::Failed);
        assert!(state.controls.submit_enabled);
        assert_eq!(state.controls.submit_label, SubmitLabel::Submit);
        assert_eq!(state.controls.banner, Banner::CheckFailed);
    }

    #[tokio::test]
    async fn superseded_response_never_overwrites_newer_check() {
        // 第一次检查说有空位，但响应迟到；第二次检查说满座。
        // 最终状态必须是第二次的。
        let backend = Arc::new(SupersededBackend::new(Ok(available(5)), Ok(unavailable(3))));
        let coordinator = Arc::new(AvailabilityCoordinator::new(backend.clone(), true));

        let stale = {
            let coordinator = coordinator.clone();
            tokio::spawn(async move { coordinator.check(request("19:00")).await })
        };
        // 等第一次检查真正挂到后端上，保证它先领到序号
        while backend.calls.load(Ordering::SeqCst) == 0 {
            tokio::task::yield_now().await;
        }

        let fresh = coordinator.check(request("19:15")).await;
        assert_eq!(fresh.seq, 2);
        assert!(!fresh.controls.submit_enabled);

        // 迟到的响应返回的也是当下的最新状态
        let stale = stale.await.unwrap();
        assert_eq!(stale.seq, 2);

        let current = coordinator.current();
        assert_eq!(current.seq, 2);
        assert!(matches!(current.outcome, CheckOutcome::Unavailable { .. }));
        assert!(!current.controls.submit_enabled);
        assert_eq!(current.controls.submit_label, SubmitLabel::NoTablesAvailable);
    }

    #[tokio::test]
    async fn dismissing_the_banner_does_not_cancel_the_check() {
        // 复用 SupersededBackend 的挂起机制: 先让检查悬在后端上
        let backend = Arc::new(SupersededBackend::new(Ok(available(2)), Ok(available(2))));
        let coordinator = Arc::new(AvailabilityCoordinator::new(backend.clone(), true));

        let pending = {
            let coordinator = coordinator.clone();
            tokio::spawn(async move { coordinator.check(request("21:00")).await })
        };
        while backend.calls.load(Ordering::SeqCst) == 0 {
            tokio::task::yield_now().await;
        }

        assert_eq!(coordinator.current().controls.banner, Banner::Checking);
        coordinator.dismiss_banner();
        assert_eq!(coordinator.current().controls.banner, Banner::Hidden);
        assert!(!coordinator.current().controls.submit_enabled);

        // 放行后检查照常落定
        backend.release_first.notify_one();
        let state = pending.await.unwrap();
        assert!(matches!(state.outcome, CheckOutcome::Available { .. }));
        assert!(state.controls.submit_enabled);
    }
}
