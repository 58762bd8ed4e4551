//! Repository for the `holidays` table.

use bizdesk_core::calendar::MonthPeriod;
use bizdesk_core::types::DbId;
use chrono::NaiveDate;
use sqlx::PgPool;

use crate::models::holiday::Holiday;

const COLUMNS: &str = "id, date, description, created_at";

/// Provides data access for the holiday calendar.
pub struct HolidayRepo;

impl HolidayRepo {
    /// Holidays falling inside `period`, in date order.
    pub async fn list_month(pool: &PgPool, period: MonthPeriod) -> Result<Vec<Holiday>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM holidays WHERE date >= $1 AND date < $2 ORDER BY date"
        );
        sqlx::query_as::<_, Holiday>(&query)
            .bind(period.first_day())
            .bind(period.next_first_day())
            .fetch_all(pool)
            .await
    }

    /// Replace every holiday of `period` with `dates` in one transaction.
    ///
    /// Callers must ensure all dates fall inside `period`.
    pub async fn replace_month(
        pool: &PgPool,
        period: MonthPeriod,
        dates: &[NaiveDate],
    ) -> Result<Vec<Holiday>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("DELETE FROM holidays WHERE date >= $1 AND date < $2")
            .bind(period.first_day())
            .bind(period.next_first_day())
            .execute(&mut *tx)
            .await?;

        let insert = format!(
            "INSERT INTO holidays (date, description) VALUES ($1, '')
             ON CONFLICT ON CONSTRAINT uq_holidays_date DO NOTHING
             RETURNING {COLUMNS}"
        );
        let mut saved = Vec::with_capacity(dates.len());
        for date in dates {
            if let Some(row) = sqlx::query_as::<_, Holiday>(&insert)
                .bind(date)
                .fetch_optional(&mut *tx)
                .await?
            {
                saved.push(row);
            }
        }

        tx.commit().await?;
        saved.sort_by_key(|h| h.date);
        Ok(saved)
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM holidays WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
