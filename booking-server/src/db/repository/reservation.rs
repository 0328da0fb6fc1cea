//! Reservation Repository
//!
//! 预约文档表。表名由环境决定 (debug → `reservations`，release →
//! `reservations_release`)，在构造时注入，仓库自身不感知环境。

use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

use shared::models::{Reservation, ReservationStatus};

use super::{RepoError, RepoResult};
use crate::db::models::ReservationRecord;

#[derive(Clone)]
pub struct ReservationRepository {
    db: Surreal<Db>,
    table: &'static str,
}

impl ReservationRepository {
    pub fn new(db: Surreal<Db>, table: &'static str) -> Self {
        Self { db, table }
    }

    /// Persist a new reservation document keyed by its UUID
    pub async fn create(&self, reservation: Reservation) -> RepoResult<Reservation> {
        let record_id = RecordId::from_table_key(self.table, &reservation.id);
        let record = ReservationRecord::from_wire(&reservation);

        let created: Option<ReservationRecord> =
            self.db.create(record_id).content(record).await?;
        created
            .map(ReservationRecord::into_wire)
            .ok_or_else(|| RepoError::Database("Failed to create reservation".to_string()))
    }

    /// Find a reservation by its UUID
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Reservation>> {
        let record_id = RecordId::from_table_key(self.table, id);
        let record: Option<ReservationRecord> = self.db.select(record_id).await?;
        Ok(record.map(ReservationRecord::into_wire))
    }

    /// All reservations on a given date, ordered by start time
    pub async fn find_by_date(&self, date: &str) -> RepoResult<Vec<Reservation>> {
        let records: Vec<ReservationRecord> = self
            .db
            .query(
                "SELECT * FROM type::table($table) \
                 WHERE dateString = $date ORDER BY startTime",
            )
            .bind(("table", self.table))
            .bind(("date", date.to_string()))
            .await?
            .take(0)?;
        Ok(records.into_iter().map(ReservationRecord::into_wire).collect())
    }

    /// Upcoming reservations (date >= today), soonest first
    pub async fn find_upcoming(&self, today: &str) -> RepoResult<Vec<Reservation>> {
        let records: Vec<ReservationRecord> = self
            .db
            .query(
                "SELECT * FROM type::table($table) \
                 WHERE dateString >= $today ORDER BY dateString, startTime",
            )
            .bind(("table", self.table))
            .bind(("today", today.to_string()))
            .await?
            .take(0)?;
        Ok(records.into_iter().map(ReservationRecord::into_wire).collect())
    }

    /// A customer's reservations, newest first
    pub async fn find_by_email(&self, email: &str) -> RepoResult<Vec<Reservation>> {
        let records: Vec<ReservationRecord> = self
            .db
            .query(
                "SELECT * FROM type::table($table) \
                 WHERE email = $email ORDER BY creationDate DESC",
            )
            .bind(("table", self.table))
            .bind(("email", email.to_string()))
            .await?
            .take(0)?;
        Ok(records.into_iter().map(ReservationRecord::into_wire).collect())
    }

    /// Update the reservation status, touching `lastEditedOn`
    pub async fn update_status(
        &self,
        id: &str,
        status: ReservationStatus,
        now_seconds: i64,
    ) -> RepoResult<Reservation> {
        let record_id = RecordId::from_table_key(self.table, id);
        self.db
            .query("UPDATE $thing SET status = $status, lastEditedOn = $now")
            .bind(("thing", record_id))
            .bind(("status", status))
            .bind(("now", now_seconds))
            .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Reservation {id} not found")))
    }

    /// Cancel a reservation, recording the reason
    pub async fn cancel(
        &self,
        id: &str,
        reason: String,
        now_seconds: i64,
    ) -> RepoResult<Reservation> {
        let record_id = RecordId::from_table_key(self.table, id);
        self.db
            .query(
                "UPDATE $thing SET status = $status, \
                 cancellationReason = $reason, lastEditedOn = $now",
            )
            .bind(("thing", record_id))
            .bind(("status", ReservationStatus::Cancelled))
            .bind(("reason", reason))
            .bind(("now", now_seconds))
            .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Reservation {id} not found")))
    }
}
