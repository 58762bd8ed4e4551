//! Repository for the `visit_reports` table.

use bizdesk_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::visit_report::{CreateVisitReport, UpdateVisitReport, VisitReport};

const COLUMNS: &str = "\
    id, company_name, company_address, pin_code, industry_segment, customer_name, \
    customer_mobile, customer_email, department, notes, attachment, created_by, \
    created_at, updated_at";

/// Provides CRUD and search operations for visit reports.
pub struct VisitReportRepo;

impl VisitReportRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateVisitReport,
    ) -> Result<VisitReport, sqlx::Error> {
        let query = format!(
            "INSERT INTO visit_reports
                (company_name, company_address, pin_code, industry_segment, customer_name,
                 customer_mobile, customer_email, department, notes, attachment, created_by)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, VisitReport>(&query)
            .bind(&input.company_name)
            .bind(&input.company_address)
            .bind(&input.pin_code)
            .bind(&input.industry_segment)
            .bind(&input.customer_name)
            .bind(&input.customer_mobile)
            .bind(&input.customer_email)
            .bind(&input.department)
            .bind(&input.notes)
            .bind(&input.attachment)
            .bind(&input.created_by)
            .fetch_one(pool)
            .await
    }

    /// List all reports, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<VisitReport>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM visit_reports ORDER BY id DESC");
        sqlx::query_as::<_, VisitReport>(&query).fetch_all(pool).await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<VisitReport>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM visit_reports WHERE id = $1");
        sqlx::query_as::<_, VisitReport>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list_by_creator(
        pool: &PgPool,
        username: &str,
    ) -> Result<Vec<VisitReport>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM visit_reports WHERE created_by = $1 ORDER BY id DESC");
        sqlx::query_as::<_, VisitReport>(&query)
            .bind(username)
            .fetch_all(pool)
            .await
    }

    /// Reports created in the half-open interval `[from, until)`.
    pub async fn list_created_between(
        pool: &PgPool,
        from: Timestamp,
        until: Timestamp,
    ) -> Result<Vec<VisitReport>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM visit_reports
             WHERE created_at >= $1 AND created_at < $2
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, VisitReport>(&query)
            .bind(from)
            .bind(until)
            .fetch_all(pool)
            .await
    }

    /// Reports whose company, customer or creator contains `term`, ignoring case.
    pub async fn search_by_name(
        pool: &PgPool,
        term: &str,
    ) -> Result<Vec<VisitReport>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM visit_reports
             WHERE company_name ILIKE '%' || $1 || '%'
                OR customer_name ILIKE '%' || $1 || '%'
                OR created_by ILIKE '%' || $1 || '%'
             ORDER BY id DESC"
        );
        sqlx::query_as::<_, VisitReport>(&query)
            .bind(term)
            .fetch_all(pool)
            .await
    }

    /// Partially update a report.
    ///
    /// Uses `COALESCE` so only provided fields are changed.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateVisitReport,
    ) -> Result<Option<VisitReport>, sqlx::Error> {
        let query = format!(
            "UPDATE visit_reports SET
                company_name = COALESCE($2, company_name),
                company_address = COALESCE($3, company_address),
                pin_code = COALESCE($4, pin_code),
                industry_segment = COALESCE($5, industry_segment),
                customer_name = COALESCE($6, customer_name),
                customer_mobile = COALESCE($7, customer_mobile),
                customer_email = COALESCE($8, customer_email),
                department = COALESCE($9, department),
                notes = COALESCE($10, notes),
                attachment = COALESCE($11, attachment),
                created_by = COALESCE($12, created_by)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, VisitReport>(&query)
            .bind(id)
            .bind(&input.company_name)
            .bind(&input.company_address)
            .bind(&input.pin_code)
            .bind(&input.industry_segment)
            .bind(&input.customer_name)
            .bind(&input.customer_mobile)
            .bind(&input.customer_email)
            .bind(&input.department)
            .bind(&input.notes)
            .bind(&input.attachment)
            .bind(&input.created_by)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM visit_reports WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
