//! Repository for the `tasks` table.

use bizdesk_core::types::DbId;
use sqlx::PgPool;

use crate::models::task::{Task, TaskFilter, TaskInput, DEFAULT_TASK_STATUS};

const COLUMNS: &str = "\
    id, title, description, priority, due_date, assigned_to, assigned_by, \
    assigned_by_email, quotation_id, quotation_number, company_name, item_id, \
    item_name, supplier_part_no, hsn_sac, cut_width, length, quantity, unit, \
    mrp, material_type, thickness, status, status_check, note, invoice_number, \
    invoice_date, invoice_amount, invoice_remarks, invoice_created_at, \
    production_start_date, production_end_date, production_status, \
    quality_check, created_at, updated_at";

/// Provides CRUD operations for tasks.
pub struct TaskRepo;

impl TaskRepo {
    pub async fn create(pool: &PgPool, input: &TaskInput) -> Result<Task, sqlx::Error> {
        let query = format!(
            "INSERT INTO tasks (
                title, description, priority, due_date, assigned_to,
                assigned_by, assigned_by_email, quotation_id, quotation_number,
                company_name, item_id, item_name, supplier_part_no, hsn_sac,
                cut_width, length, quantity, unit, mrp, material_type,
                thickness, status, status_check, note, invoice_number,
                invoice_date, invoice_amount, invoice_remarks,
                invoice_created_at, production_start_date, production_end_date,
                production_status, quality_check)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13,
                     $14, $15, $16, $17, COALESCE($18, 'pcs'), $19, $20, $21,
                     COALESCE($22, '{DEFAULT_TASK_STATUS}'), $23, $24, $25,
                     $26, $27, $28, $29, $30, $31, $32, $33)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.priority)
            .bind(&input.due_date)
            .bind(&input.assigned_to)
            .bind(&input.assigned_by)
            .bind(&input.assigned_by_email)
            .bind(input.quotation_id)
            .bind(&input.quotation_number)
            .bind(&input.company_name)
            .bind(input.item_id)
            .bind(&input.item_name)
            .bind(&input.supplier_part_no)
            .bind(&input.hsn_sac)
            .bind(&input.cut_width)
            .bind(&input.length)
            .bind(&input.quantity)
            .bind(&input.unit)
            .bind(&input.mrp)
            .bind(&input.material_type)
            .bind(&input.thickness)
            .bind(&input.status)
            .bind(&input.status_check)
            .bind(&input.note)
            .bind(&input.invoice_number)
            .bind(input.invoice_date)
            .bind(input.invoice_amount)
            .bind(&input.invoice_remarks)
            .bind(input.invoice_created_at)
            .bind(input.production_start_date)
            .bind(input.production_end_date)
            .bind(&input.production_status)
            .bind(&input.quality_check)
            .fetch_one(pool)
            .await
    }

    /// Tasks matching the optional filters, newest first.
    pub async fn list(pool: &PgPool, filter: &TaskFilter) -> Result<Vec<Task>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM tasks
             WHERE ($1::TEXT IS NULL OR assigned_to = $1)
               AND ($2::TEXT IS NULL OR status = $2)
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(&filter.assigned_to)
            .bind(&filter.status)
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Task>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tasks WHERE id = $1");
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Partially update a task.
    ///
    /// Uses `COALESCE` so only provided fields are changed.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &TaskInput,
    ) -> Result<Option<Task>, sqlx::Error> {
        let query = format!(
            "UPDATE tasks SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                priority = COALESCE($4, priority),
                due_date = COALESCE($5, due_date),
                assigned_to = COALESCE($6, assigned_to),
                assigned_by = COALESCE($7, assigned_by),
                assigned_by_email = COALESCE($8, assigned_by_email),
                quotation_id = COALESCE($9, quotation_id),
                quotation_number = COALESCE($10, quotation_number),
                company_name = COALESCE($11, company_name),
                item_id = COALESCE($12, item_id),
                item_name = COALESCE($13, item_name),
                supplier_part_no = COALESCE($14, supplier_part_no),
                hsn_sac = COALESCE($15, hsn_sac),
                cut_width = COALESCE($16, cut_width),
                length = COALESCE($17, length),
                quantity = COALESCE($18, quantity),
                unit = COALESCE($19, unit),
                mrp = COALESCE($20, mrp),
                material_type = COALESCE($21, material_type),
                thickness = COALESCE($22, thickness),
                status = COALESCE($23, status),
                status_check = COALESCE($24, status_check),
                note = COALESCE($25, note),
                invoice_number = COALESCE($26, invoice_number),
                invoice_date = COALESCE($27, invoice_date),
                invoice_amount = COALESCE($28, invoice_amount),
                invoice_remarks = COALESCE($29, invoice_remarks),
                invoice_created_at = COALESCE($30, invoice_created_at),
                production_start_date = COALESCE($31, production_start_date),
                production_end_date = COALESCE($32, production_end_date),
                production_status = COALESCE($33, production_status),
                quality_check = COALESCE($34, quality_check)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.priority)
            .bind(&input.due_date)
            .bind(&input.assigned_to)
            .bind(&input.assigned_by)
            .bind(&input.assigned_by_email)
            .bind(input.quotation_id)
            .bind(&input.quotation_number)
            .bind(&input.company_name)
            .bind(input.item_id)
            .bind(&input.item_name)
            .bind(&input.supplier_part_no)
            .bind(&input.hsn_sac)
            .bind(&input.cut_width)
            .bind(&input.length)
            .bind(&input.quantity)
            .bind(&input.unit)
            .bind(&input.mrp)
            .bind(&input.material_type)
            .bind(&input.thickness)
            .bind(&input.status)
            .bind(&input.status_check)
            .bind(&input.note)
            .bind(&input.invoice_number)
            .bind(input.invoice_date)
            .bind(input.invoice_amount)
            .bind(&input.invoice_remarks)
            .bind(input.invoice_created_at)
            .bind(input.production_start_date)
            .bind(input.production_end_date)
            .bind(&input.production_status)
            .bind(&input.quality_check)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
