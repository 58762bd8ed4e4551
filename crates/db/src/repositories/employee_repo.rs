//! Repository for the `employees` table.

use bizdesk_core::types::DbId;
use sqlx::PgPool;

use crate::models::employee::{CreateEmployee, Employee, UpdateEmployee};

const COLUMNS: &str = "\
    id, name, dob, gender, email, address, department, designation, doj, \
    emp_type, user_type, mobile, alt_contact, pan, aadhar, password_hash, \
    photo, pan_attachment, aadhar_attachment, esi_pf_status, created_by, \
    created_at, updated_at";

/// Provides CRUD operations for employees.
pub struct EmployeeRepo;

impl EmployeeRepo {
    pub async fn create(pool: &PgPool, input: &CreateEmployee) -> Result<Employee, sqlx::Error> {
        let query = format!(
            "INSERT INTO employees
                (name, dob, gender, email, address, department, designation, doj,
                 emp_type, user_type, mobile, alt_contact, pan, aadhar, password_hash,
                 photo, pan_attachment, aadhar_attachment, esi_pf_status, created_by)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10,
                     $11, $12, $13, $14, $15, $16, $17, $18, $19, $20)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Employee>(&query)
            .bind(&input.name)
            .bind(input.dob)
            .bind(&input.gender)
            .bind(&input.email)
            .bind(&input.address)
            .bind(&input.department)
            .bind(&input.designation)
            .bind(input.doj)
            .bind(&input.emp_type)
            .bind(&input.user_type)
            .bind(&input.mobile)
            .bind(&input.alt_contact)
            .bind(&input.pan)
            .bind(&input.aadhar)
            .bind(&input.password_hash)
            .bind(&input.photo)
            .bind(&input.pan_attachment)
            .bind(&input.aadhar_attachment)
            .bind(&input.esi_pf_status)
            .bind(&input.created_by)
            .fetch_one(pool)
            .await
    }

    /// List all employees, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Employee>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM employees ORDER BY id DESC");
        sqlx::query_as::<_, Employee>(&query).fetch_all(pool).await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Employee>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM employees WHERE id = $1");
        sqlx::query_as::<_, Employee>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Employee>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM employees WHERE email = $1");
        sqlx::query_as::<_, Employee>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Employees whose ESI/PF status matches, ignoring case.
    pub async fn list_by_esi_pf_status(
        pool: &PgPool,
        status: &str,
    ) -> Result<Vec<Employee>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM employees WHERE lower(esi_pf_status) = lower($1) ORDER BY name"
        );
        sqlx::query_as::<_, Employee>(&query)
            .bind(status)
            .fetch_all(pool)
            .await
    }

    /// Partially update an employee.
    ///
    /// Uses `COALESCE` so only provided fields are changed.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateEmployee,
    ) -> Result<Option<Employee>, sqlx::Error> {
        let query = format!(
            "UPDATE employees SET
                name = COALESCE($2, name),
                dob = COALESCE($3, dob),
                gender = COALESCE($4, gender),
                email = COALESCE($5, email),
                address = COALESCE($6, address),
                department = COALESCE($7, department),
                designation = COALESCE($8, designation),
                doj = COALESCE($9, doj),
                emp_type = COALESCE($10, emp_type),
                user_type = COALESCE($11, user_type),
                mobile = COALESCE($12, mobile),
                alt_contact = COALESCE($13, alt_contact),
                pan = COALESCE($14, pan),
                aadhar = COALESCE($15, aadhar),
                password_hash = COALESCE($16, password_hash),
                photo = COALESCE($17, photo),
                pan_attachment = COALESCE($18, pan_attachment),
                aadhar_attachment = COALESCE($19, aadhar_attachment),
                esi_pf_status = COALESCE($20, esi_pf_status)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Employee>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.dob)
            .bind(&input.gender)
            .bind(&input.email)
            .bind(&input.address)
            .bind(&input.department)
            .bind(&input.designation)
            .bind(input.doj)
            .bind(&input.emp_type)
            .bind(&input.user_type)
            .bind(&input.mobile)
            .bind(&input.alt_contact)
            .bind(&input.pan)
            .bind(&input.aadhar)
            .bind(&input.password_hash)
            .bind(&input.photo)
            .bind(&input.pan_attachment)
            .bind(&input.aadhar_attachment)
            .bind(&input.esi_pf_status)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM employees WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
