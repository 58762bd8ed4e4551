//! Repository for the `attendance` and `attendance_summaries` tables.

use bizdesk_core::types::DbId;
use chrono::NaiveDate;
use sqlx::PgPool;

use crate::models::attendance::{
    Attendance, AttendanceSummary, CheckOutUpdate, NewCheckIn, SummaryInput,
};

const COLUMNS: &str = "\
    id, email, username, date, check_in, check_out, status, duration, \
    device_in, device_out, location_in, location_out, created_at";

const SUMMARY_COLUMNS: &str = "\
    id, name, email, month, year, present, absent, total_days, created_at, updated_at";

/// Provides data access for attendance records and monthly summaries.
pub struct AttendanceRepo;

impl AttendanceRepo {
    pub async fn find_for_day(
        pool: &PgPool,
        email: &str,
        date: NaiveDate,
    ) -> Result<Option<Attendance>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM attendance WHERE email = $1 AND date = $2");
        sqlx::query_as::<_, Attendance>(&query)
            .bind(email)
            .bind(date)
            .fetch_optional(pool)
            .await
    }

    /// Insert a check-in. A second check-in for the same day violates
    /// `uq_attendance_email_date`.
    pub async fn check_in(pool: &PgPool, input: &NewCheckIn<'_>) -> Result<Attendance, sqlx::Error> {
        let query = format!(
            "INSERT INTO attendance (email, username, date, check_in, status, device_in, location_in)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Attendance>(&query)
            .bind(input.email)
            .bind(input.username)
            .bind(input.date)
            .bind(input.check_in)
            .bind(input.status)
            .bind(input.device)
            .bind(input.location)
            .fetch_one(pool)
            .await
    }

    pub async fn check_out(
        pool: &PgPool,
        id: DbId,
        input: &CheckOutUpdate<'_>,
    ) -> Result<Option<Attendance>, sqlx::Error> {
        let query = format!(
            "UPDATE attendance SET
                check_out = $2, status = $3, duration = $4,
                device_out = $5, location_out = $6
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Attendance>(&query)
            .bind(id)
            .bind(input.check_out)
            .bind(input.status)
            .bind(input.duration)
            .bind(input.device_out)
            .bind(input.location_out)
            .fetch_optional(pool)
            .await
    }

    /// All records, newest day first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Attendance>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM attendance ORDER BY date DESC, id DESC");
        sqlx::query_as::<_, Attendance>(&query).fetch_all(pool).await
    }

    pub async fn list_by_email(pool: &PgPool, email: &str) -> Result<Vec<Attendance>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM attendance WHERE email = $1 ORDER BY date DESC, id DESC"
        );
        sqlx::query_as::<_, Attendance>(&query)
            .bind(email)
            .fetch_all(pool)
            .await
    }

    // -----------------------------------------------------------------------
    // Monthly summaries
    // -----------------------------------------------------------------------

    /// Upsert summaries keyed by `(email, month, year)` in one transaction.
    ///
    /// Entries missing email, month or year are skipped. Omitted counters
    /// keep their stored value. Returns the saved rows.
    pub async fn upsert_summaries(
        pool: &PgPool,
        entries: &[SummaryInput],
    ) -> Result<Vec<AttendanceSummary>, sqlx::Error> {
        let query = format!(
            "INSERT INTO attendance_summaries (name, email, month, year, present, absent, total_days)
             VALUES ($1, $2, $3, $4, COALESCE($5, 0), COALESCE($6, 0), COALESCE($7, 0))
             ON CONFLICT ON CONSTRAINT uq_attendance_summaries_email_period DO UPDATE SET
                name = COALESCE(EXCLUDED.name, attendance_summaries.name),
                present = COALESCE($5, attendance_summaries.present),
                absent = COALESCE($6, attendance_summaries.absent),
                total_days = COALESCE($7, attendance_summaries.total_days)
             RETURNING {SUMMARY_COLUMNS}"
        );

        let mut tx = pool.begin().await?;
        let mut saved = Vec::with_capacity(entries.len());

        for entry in entries {
            let (Some(email), Some(month), Some(year)) =
                (entry.email.as_deref().filter(|e| !e.is_empty()), entry.month, entry.year)
            else {
                continue;
            };
            let row = sqlx::query_as::<_, AttendanceSummary>(&query)
                .bind(&entry.name)
                .bind(email)
                .bind(month)
                .bind(year)
                .bind(entry.present)
                .bind(entry.absent)
                .bind(entry.total_days)
                .fetch_one(&mut *tx)
                .await?;
            saved.push(row);
        }

        tx.commit().await?;
        Ok(saved)
    }

    pub async fn list_summaries(
        pool: &PgPool,
        month: i32,
        year: i32,
    ) -> Result<Vec<AttendanceSummary>, sqlx::Error> {
        let query = format!(
            "SELECT {SUMMARY_COLUMNS} FROM attendance_summaries
             WHERE month = $1 AND year = $2
             ORDER BY name, email"
        );
        sqlx::query_as::<_, AttendanceSummary>(&query)
            .bind(month)
            .bind(year)
            .fetch_all(pool)
            .await
    }
}
