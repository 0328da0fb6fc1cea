//! Reservation submission flow
//!
//! 显式顺序编排: 校验 → 提交前复查空位 → 组文档 → 落库。
//! 每一步单独可测，失败种类互相区分；落库失败时表单状态还在
//! 调用方手里，可以直接重试。

use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

use shared::availability::AvailabilityQuery;
use shared::models::{Reservation, ReservationForm};
use shared::validation::ValidationResult;

use crate::availability::{AvailabilityBackend, BackendError};
use crate::db::repository::{RepoError, ReservationRepository};
use crate::timetable;
use crate::utils::time;
use crate::utils::validation::validate_reservation_form;

/// 提交失败的种类
#[derive(Debug, Error)]
pub enum SubmitError {
    /// 字段校验失败 — 调用方渲染每个字段的错误
    #[error("validation failed")]
    Validation(ValidationResult),

    /// 首次检查到提交之间座位被抢
    #[error("the selected time is no longer available")]
    NoLongerAvailable { tables_needed: u32 },

    /// 空位复查传输失败
    #[error("availability check failed: {0}")]
    AvailabilityCheck(#[from] BackendError),

    /// 落库失败
    #[error("failed to store reservation: {0}")]
    Persistence(#[from] RepoError),
}

/// 提交一份预约表单
///
/// 成功返回落库后的文档 (带 UUID 与时间戳)。
pub async fn submit_reservation(
    backend: &dyn AvailabilityBackend,
    repo: &ReservationRepository,
    form: &ReservationForm,
    today: NaiveDate,
    is_debug: bool,
) -> Result<Reservation, SubmitError> {
    // 1. Field validation — collects every error
    let validation = validate_reservation_form(form, today);
    let (category, start_time) = match (form.category, form.start_time) {
        (Some(category), Some(start_time)) if validation.valid => (category, start_time),
        _ => return Err(SubmitError::Validation(validation)),
    };

    // 2. Final availability re-check
    let end_time = timetable::end_time(start_time, category);
    let query = AvailabilityQuery {
        number_of_persons: form.number_of_persons,
        date: form.date.clone(),
        category,
        start_time,
        end_time,
        is_debug,
    };
    let result = backend.check(&query).await?;
    if !result.available {
        return Err(SubmitError::NoLongerAvailable {
            tables_needed: result.tables_needed,
        });
    }

    // 3. Build the document
    let reservation = Reservation::from_form(
        form,
        category,
        start_time,
        end_time,
        Uuid::new_v4().to_string(),
        time::now_seconds(),
    );

    // 4. Persist
    let stored = repo.create(reservation).await?;
    tracing::info!(
        id = %stored.id,
        date = %stored.date_string,
        start = %stored.start_time,
        persons = stored.number_of_persons,
        "Reservation stored"
    );
    Ok(stored)
}
