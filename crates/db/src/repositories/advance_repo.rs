//! Repository for the `advances` table.

use bizdesk_core::types::DbId;
use sqlx::PgPool;

use crate::models::advance::{Advance, CreateAdvance, UpdateAdvance, DEFAULT_ADVANCE_STATUS};

const COLUMNS: &str = "\
    id, email, name, department, amount, reason, date, time, deduct_month, \
    status, created_at, updated_at";

/// Provides CRUD operations for salary advances.
pub struct AdvanceRepo;

impl AdvanceRepo {
    /// Insert an advance. Callers validate that email, name and amount are present.
    pub async fn create(pool: &PgPool, input: &CreateAdvance) -> Result<Advance, sqlx::Error> {
        let query = format!(
            "INSERT INTO advances
                (email, name, department, amount, reason, date, time, deduct_month, status)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, COALESCE($9, $10))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Advance>(&query)
            .bind(&input.email)
            .bind(&input.name)
            .bind(&input.department)
            .bind(input.amount)
            .bind(&input.reason)
            .bind(input.date)
            .bind(&input.time)
            .bind(&input.deduct_month)
            .bind(&input.status)
            .bind(DEFAULT_ADVANCE_STATUS)
            .fetch_one(pool)
            .await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<Advance>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM advances ORDER BY id DESC");
        sqlx::query_as::<_, Advance>(&query).fetch_all(pool).await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Advance>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM advances WHERE id = $1");
        sqlx::query_as::<_, Advance>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Partially update an advance.
    ///
    /// Uses `COALESCE` so only provided fields are changed.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateAdvance,
    ) -> Result<Option<Advance>, sqlx::Error> {
        let query = format!(
            "UPDATE advances SET
                email = COALESCE($2, email),
                name = COALESCE($3, name),
                department = COALESCE($4, department),
                amount = COALESCE($5, amount),
                reason = COALESCE($6, reason),
                date = COALESCE($7, date),
                time = COALESCE($8, time),
                deduct_month = COALESCE($9, deduct_month),
                status = COALESCE($10, status)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Advance>(&query)
            .bind(id)
            .bind(&input.email)
            .bind(&input.name)
            .bind(&input.department)
            .bind(input.amount)
            .bind(&input.reason)
            .bind(input.date)
            .bind(&input.time)
            .bind(&input.deduct_month)
            .bind(&input.status)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM advances WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
