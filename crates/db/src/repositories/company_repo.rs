//! Repository for the `companies` table.

use bizdesk_core::types::DbId;
use sqlx::PgPool;

use crate::models::company::{Company, CompanyInput};

const COLUMNS: &str = "\
    id, company_name, company_address, pin_code, industry_segment, \
    customer_name, customer_mobile, customer_email, department, \
    personal_mobile, personal_email, created_at, updated_at";

/// Provides CRUD operations for customer companies.
pub struct CompanyRepo;

impl CompanyRepo {
    pub async fn create(pool: &PgPool, input: &CompanyInput) -> Result<Company, sqlx::Error> {
        let query = format!(
            "INSERT INTO companies
                (company_name, company_address, pin_code, industry_segment, customer_name,
                 customer_mobile, customer_email, department, personal_mobile, personal_email)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Company>(&query)
            .bind(&input.company_name)
            .bind(&input.company_address)
            .bind(&input.pin_code)
            .bind(&input.industry_segment)
            .bind(&input.customer_name)
            .bind(&input.customer_mobile)
            .bind(&input.customer_email)
            .bind(&input.department)
            .bind(&input.personal_mobile)
            .bind(&input.personal_email)
            .fetch_one(pool)
            .await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<Company>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM companies ORDER BY id DESC");
        sqlx::query_as::<_, Company>(&query).fetch_all(pool).await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Company>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM companies WHERE id = $1");
        sqlx::query_as::<_, Company>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// First company whose customer mobile matches exactly.
    pub async fn find_by_mobile(pool: &PgPool, mobile: &str) -> Result<Option<Company>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM companies WHERE customer_mobile = $1 ORDER BY id LIMIT 1");
        sqlx::query_as::<_, Company>(&query)
            .bind(mobile)
            .fetch_optional(pool)
            .await
    }

    /// First company whose name contains `name`, ignoring case.
    pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<Company>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM companies
             WHERE company_name ILIKE '%' || $1 || '%'
             ORDER BY id LIMIT 1"
        );
        sqlx::query_as::<_, Company>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// Overwrite every field of a company.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &CompanyInput,
    ) -> Result<Option<Company>, sqlx::Error> {
        let query = format!(
            "UPDATE companies SET
                company_name = $2, company_address = $3, pin_code = $4,
                industry_segment = $5, customer_name = $6, customer_mobile = $7,
                customer_email = $8, department = $9, personal_mobile = $10,
                personal_email = $11
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Company>(&query)
            .bind(id)
            .bind(&input.company_name)
            .bind(&input.company_address)
            .bind(&input.pin_code)
            .bind(&input.industry_segment)
            .bind(&input.customer_name)
            .bind(&input.customer_mobile)
            .bind(&input.customer_email)
            .bind(&input.department)
            .bind(&input.personal_mobile)
            .bind(&input.personal_email)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM companies WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
