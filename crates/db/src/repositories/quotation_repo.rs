//! Repository for the `quotations` and `quotation_items` tables.
//!
//! Multi-row mutations (create with items, update with items, delete,
//! re-quote) run in one transaction; dropping the transaction on an error
//! rolls everything back.

use bizdesk_core::quotation::{
    generate_quote_number, next_requote_number, ItemStatus, QuotationStatus, REVIEW_PENDING,
};
use bizdesk_core::types::{DbId, Timestamp};
use chrono::{Datelike, Local, NaiveDate};
use sqlx::{PgConnection, PgPool};

use crate::models::quotation::{
    CreateQuotation, MonthlyTotal, Quotation, QuotationItem, QuotationItemInput,
    QuotationWithItems, RequoteRequest, StatusCount, UpdateQuotation,
};

const COLUMNS: &str = "\
    id, quote_number, date, time, company_id, company_name, company_address, \
    company_gstin, contact_person, contact_mobile, contact_email, issuer_details, \
    subtotal, total_discount, total_tax, grand_total, status, review_status, \
    created_by, updated_by, notes, requote_note, original_quote_id, requote_date, \
    created_at, updated_at";

const ITEM_COLUMNS: &str = "\
    id, quotation_id, item_name, hsn_sac, supplier_part_no, description, \
    cut_width, length, batch_no, mrp, quantity, unit, discount, discount_type, \
    tax_rate, item_status, review_status, updated_by, price_per_unit, \
    amount_before_discount, discount_amount, amount_after_discount, tax_amount, \
    item_total, created_at, updated_at";

/// Columns copied verbatim when a quotation's items are duplicated.
const ITEM_COPY_COLUMNS: &str = "\
    item_name, hsn_sac, supplier_part_no, description, cut_width, length, \
    batch_no, mrp, quantity, unit, discount, discount_type, tax_rate, \
    price_per_unit, amount_before_discount, discount_amount, \
    amount_after_discount, tax_amount, item_total";

/// Maximum rows returned by [`QuotationRepo::search`].
const SEARCH_LIMIT: i64 = 50;

/// How a new quotation gets its number.
#[derive(Debug, Clone)]
pub enum QuoteNumbering {
    /// Use the caller's number as-is.
    Given(String),
    /// Generate `Q-YYYYMMDD-NNNNNN` for the quotation date.
    Generated,
    /// Next free `-R{n}` revision of the given quote number.
    RequoteOf(String),
}

/// Provides data access for quotations and their line items.
pub struct QuotationRepo;

impl QuotationRepo {
    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Quotation>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM quotations WHERE id = $1");
        sqlx::query_as::<_, Quotation>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// A quotation with its items, or `None`.
    pub async fn find_with_items(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<QuotationWithItems>, sqlx::Error> {
        let Some(quotation) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };
        let items = Self::list_items(pool, id).await?;
        Ok(Some(QuotationWithItems { quotation, items }))
    }

    pub async fn list_items(
        pool: &PgPool,
        quotation_id: DbId,
    ) -> Result<Vec<QuotationItem>, sqlx::Error> {
        let query =
            format!("SELECT {ITEM_COLUMNS} FROM quotation_items WHERE quotation_id = $1 ORDER BY id");
        sqlx::query_as::<_, QuotationItem>(&query)
            .bind(quotation_id)
            .fetch_all(pool)
            .await
    }

    /// Attach items to a page of quotations with a single query.
    pub async fn attach_items(
        pool: &PgPool,
        quotations: Vec<Quotation>,
    ) -> Result<Vec<QuotationWithItems>, sqlx::Error> {
        let ids: Vec<DbId> = quotations.iter().map(|q| q.id).collect();
        let query = format!(
            "SELECT {ITEM_COLUMNS} FROM quotation_items
             WHERE quotation_id = ANY($1)
             ORDER BY quotation_id, id"
        );
        let mut items = sqlx::query_as::<_, QuotationItem>(&query)
            .bind(&ids)
            .fetch_all(pool)
            .await?;

        Ok(quotations
            .into_iter()
            .map(|quotation| {
                let (own, rest): (Vec<_>, Vec<_>) =
                    items.drain(..).partition(|item| item.quotation_id == quotation.id);
                items = rest;
                QuotationWithItems { quotation, items: own }
            })
            .collect())
    }

    /// One page of quotations, newest first, optionally filtered by status.
    pub async fn list(
        pool: &PgPool,
        status: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Quotation>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM quotations
             WHERE ($1::TEXT IS NULL OR lower(status) = lower($1))
             ORDER BY created_at DESC, id DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Quotation>(&query)
            .bind(status)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    pub async fn count(pool: &PgPool, status: Option<&str>) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM quotations WHERE ($1::TEXT IS NULL OR lower(status) = lower($1))",
        )
        .bind(status)
        .fetch_one(pool)
        .await
    }

    /// The most recently created quotations.
    pub async fn recent(pool: &PgPool, limit: i64) -> Result<Vec<Quotation>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM quotations ORDER BY created_at DESC, id DESC LIMIT $1");
        sqlx::query_as::<_, Quotation>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Case-insensitive search over header fields and item fields.
    pub async fn search(pool: &PgPool, term: &str) -> Result<Vec<Quotation>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM quotations q
             WHERE q.company_name ILIKE '%' || $1 || '%'
                OR q.quote_number ILIKE '%' || $1 || '%'
                OR q.contact_person ILIKE '%' || $1 || '%'
                OR q.notes ILIKE '%' || $1 || '%'
                OR q.requote_note ILIKE '%' || $1 || '%'
                OR EXISTS (
                    SELECT 1 FROM quotation_items i
                    WHERE i.quotation_id = q.id
                      AND (i.item_name ILIKE '%' || $1 || '%'
                           OR i.description ILIKE '%' || $1 || '%'
                           OR i.supplier_part_no ILIKE '%' || $1 || '%')
                )
             ORDER BY q.created_at DESC, q.id DESC
             LIMIT $2"
        );
        sqlx::query_as::<_, Quotation>(&query)
            .bind(term)
            .bind(SEARCH_LIMIT)
            .fetch_all(pool)
            .await
    }

    /// Direct re-quotes of a quotation, newest first.
    pub async fn list_requotes(pool: &PgPool, id: DbId) -> Result<Vec<Quotation>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM quotations
             WHERE original_quote_id = $1
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Quotation>(&query)
            .bind(id)
            .fetch_all(pool)
            .await
    }

    // -----------------------------------------------------------------------
    // Writes
    // -----------------------------------------------------------------------

    /// Insert a quotation and its items in one transaction.
    ///
    /// Callers validate `company_name` and item names beforehand.
    pub async fn create(
        pool: &PgPool,
        input: &CreateQuotation,
        numbering: QuoteNumbering,
    ) -> Result<QuotationWithItems, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let date = input.date.unwrap_or_else(|| Local::now().date_naive());
        let quote_number = match numbering {
            QuoteNumbering::Given(number) => number,
            QuoteNumbering::Generated => generate_quote_number(date),
            QuoteNumbering::RequoteOf(source) => Self::next_free_requote_number(&mut *tx, &source).await?,
        };
        let requote_date: Option<Timestamp> = input.original_quote_id.map(|_| chrono::Utc::now());

        let query = format!(
            "INSERT INTO quotations
                (quote_number, date, time, company_id, company_name, company_address,
                 company_gstin, contact_person, contact_mobile, contact_email, issuer_details,
                 subtotal, total_discount, total_tax, grand_total, notes, requote_note,
                 original_quote_id, requote_date, status, review_status, created_by, updated_by)
             VALUES ($1, $2, COALESCE($3, LOCALTIME(0)), $4, $5, $6, $7, $8, $9, $10,
                     COALESCE($11, '{{}}'::jsonb),
                     COALESCE($12, 0), COALESCE($13, 0), COALESCE($14, 0), COALESCE($15, 0),
                     COALESCE($16, ''), COALESCE($17, ''), $18, $19,
                     COALESCE($20, $22), COALESCE($21, $23), $24, $25)
             RETURNING {COLUMNS}"
        );
        let quotation = sqlx::query_as::<_, Quotation>(&query)
            .bind(&quote_number)
            .bind(date)
            .bind(input.time)
            .bind(input.company_id)
            .bind(&input.company_name)
            .bind(&input.company_address)
            .bind(&input.company_gstin)
            .bind(&input.contact_person)
            .bind(&input.contact_mobile)
            .bind(&input.contact_email)
            .bind(&input.issuer_details)
            .bind(input.subtotal)
            .bind(input.total_discount)
            .bind(input.total_tax)
            .bind(input.grand_total)
            .bind(&input.notes)
            .bind(&input.requote_note)
            .bind(input.original_quote_id)
            .bind(requote_date)
            .bind(&input.status)
            .bind(&input.review_status)
            .bind(QuotationStatus::Draft.as_str())
            .bind(REVIEW_PENDING)
            .bind(&input.created_by)
            .bind(&input.updated_by)
            .fetch_one(&mut *tx)
            .await?;

        let mut items = Vec::with_capacity(input.items.len());
        for item in &input.items {
            let row = Self::insert_item(&mut *tx, quotation.id, item, input.updated_by.as_deref())
                .await?;
            items.push(row);
        }

        tx.commit().await?;
        Ok(QuotationWithItems { quotation, items })
    }

    /// Patch a quotation header and merge its items in one transaction.
    ///
    /// Returns `None` when the quotation does not exist. Callers check the
    /// completed lock and validate `status` first.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateQuotation,
    ) -> Result<Option<QuotationWithItems>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE quotations SET
                company_name = COALESCE($2, company_name),
                company_address = COALESCE($3, company_address),
                company_gstin = COALESCE($4, company_gstin),
                contact_person = COALESCE($5, contact_person),
                contact_mobile = COALESCE($6, contact_mobile),
                contact_email = COALESCE($7, contact_email),
                subtotal = COALESCE($8, subtotal),
                total_discount = COALESCE($9, total_discount),
                total_tax = COALESCE($10, total_tax),
                grand_total = COALESCE($11, grand_total),
                notes = COALESCE($12, notes),
                status = COALESCE($13, status),
                review_status = COALESCE($14, review_status),
                updated_by = COALESCE($15, updated_by),
                requote_note = COALESCE($16, requote_note)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let Some(mut quotation) = sqlx::query_as::<_, Quotation>(&query)
            .bind(id)
            .bind(&input.company_name)
            .bind(&input.company_address)
            .bind(&input.company_gstin)
            .bind(&input.contact_person)
            .bind(&input.contact_mobile)
            .bind(&input.contact_email)
            .bind(input.subtotal)
            .bind(input.total_discount)
            .bind(input.total_tax)
            .bind(input.grand_total)
            .bind(&input.notes)
            .bind(&input.status)
            .bind(&input.review_status)
            .bind(&input.updated_by)
            .bind(&input.requote_note)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        let entering_requote = input.status.as_deref() == Some(QuotationStatus::Requote.as_str());
        if let (true, Some(quote_number)) = (entering_requote, input.quote_number.as_deref()) {
            let query = format!(
                "UPDATE quotations SET
                    quote_number = $2,
                    original_quote_id = COALESCE($3, original_quote_id),
                    requote_date = COALESCE($4, now())
                 WHERE id = $1
                 RETURNING {COLUMNS}"
            );
            quotation = sqlx::query_as::<_, Quotation>(&query)
                .bind(id)
                .bind(quote_number)
                .bind(input.original_quote_id)
                .bind(input.requote_date)
                .fetch_one(&mut *tx)
                .await?;
        }

        if let Some(items) = &input.items {
            let fallback_updated_by = input.updated_by.as_deref().or(quotation.updated_by.as_deref());
            for item in items {
                match item.id {
                    Some(item_id) => {
                        Self::patch_item(&mut *tx, id, item_id, item).await?;
                    }
                    None => {
                        Self::insert_item(&mut *tx, id, item, fallback_updated_by).await?;
                    }
                }
            }
        }

        let query =
            format!("SELECT {ITEM_COLUMNS} FROM quotation_items WHERE quotation_id = $1 ORDER BY id");
        let items = sqlx::query_as::<_, QuotationItem>(&query)
            .bind(id)
            .fetch_all(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(QuotationWithItems { quotation, items }))
    }

    /// Delete a quotation and its items in one transaction.
    ///
    /// Returns `true` if the quotation existed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("DELETE FROM quotation_items WHERE quotation_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        let result = sqlx::query("DELETE FROM quotations WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }

    /// Set a quotation's status.
    ///
    /// Entering `requote` renumbers the quotation to its next free `-R{n}`,
    /// stores the note and stamps `requote_date`.
    pub async fn set_status(
        pool: &PgPool,
        id: DbId,
        status: QuotationStatus,
        requote_note: Option<&str>,
        updated_by: Option<&str>,
    ) -> Result<Option<Quotation>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let current = sqlx::query_scalar::<_, String>(
            "SELECT quote_number FROM quotations WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;
        let Some(current_number) = current else {
            return Ok(None);
        };

        let quotation = if status == QuotationStatus::Requote {
            let quote_number = Self::next_free_requote_number(&mut *tx, &current_number).await?;
            let query = format!(
                "UPDATE quotations SET
                    status = $2, quote_number = $3, requote_note = COALESCE($4, ''),
                    requote_date = now(), updated_by = COALESCE($5, updated_by)
                 WHERE id = $1
                 RETURNING {COLUMNS}"
            );
            sqlx::query_as::<_, Quotation>(&query)
                .bind(id)
                .bind(status.as_str())
                .bind(&quote_number)
                .bind(requote_note)
                .bind(updated_by)
                .fetch_one(&mut *tx)
                .await?
        } else {
            let query = format!(
                "UPDATE quotations SET status = $2, updated_by = COALESCE($3, updated_by)
                 WHERE id = $1
                 RETURNING {COLUMNS}"
            );
            sqlx::query_as::<_, Quotation>(&query)
                .bind(id)
                .bind(status.as_str())
                .bind(updated_by)
                .fetch_one(&mut *tx)
                .await?
        };

        tx.commit().await?;
        Ok(Some(quotation))
    }

    /// Set one item's status. Returns `None` if the item does not belong to
    /// the quotation.
    pub async fn set_item_status(
        pool: &PgPool,
        quotation_id: DbId,
        item_id: DbId,
        status: ItemStatus,
        updated_by: Option<&str>,
    ) -> Result<Option<QuotationItem>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE quotation_items SET item_status = $3, updated_by = COALESCE($4, updated_by)
             WHERE id = $2 AND quotation_id = $1
             RETURNING {ITEM_COLUMNS}"
        );
        let item = sqlx::query_as::<_, QuotationItem>(&query)
            .bind(quotation_id)
            .bind(item_id)
            .bind(status.as_str())
            .bind(updated_by)
            .fetch_optional(&mut *tx)
            .await?;
        if item.is_some() {
            Self::touch(&mut *tx, quotation_id).await?;
        }

        tx.commit().await?;
        Ok(item)
    }

    /// Apply one status to several items of a quotation. Ids belonging to
    /// other quotations are ignored. Returns the number of items updated.
    pub async fn set_items_status(
        pool: &PgPool,
        quotation_id: DbId,
        item_ids: &[DbId],
        status: ItemStatus,
        updated_by: Option<&str>,
    ) -> Result<u64, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let result = sqlx::query(
            "UPDATE quotation_items SET item_status = $3, updated_by = $4
             WHERE quotation_id = $1 AND id = ANY($2)",
        )
        .bind(quotation_id)
        .bind(item_ids)
        .bind(status.as_str())
        .bind(updated_by)
        .execute(&mut *tx)
        .await?;
        Self::touch(&mut *tx, quotation_id).await?;

        tx.commit().await?;
        Ok(result.rows_affected())
    }

    /// Copy a quotation and its items into a new draft re-quote.
    ///
    /// The copy takes the next free `-R{n}` number of the source, its items
    /// reset to `pending`, and the source is optionally marked `requote`.
    pub async fn create_requote(
        pool: &PgPool,
        source: &Quotation,
        request: &RequoteRequest,
    ) -> Result<QuotationWithItems, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let quote_number = Self::next_free_requote_number(&mut *tx, &source.quote_number).await?;
        let query = format!(
            "INSERT INTO quotations
                (quote_number, date, time, company_id, company_name, company_address,
                 company_gstin, contact_person, contact_mobile, contact_email, issuer_details,
                 subtotal, total_discount, total_tax, grand_total, notes, requote_note,
                 original_quote_id, requote_date, status, review_status, created_by, updated_by)
             SELECT $2, CURRENT_DATE, LOCALTIME(0), company_id, company_name, company_address,
                    company_gstin, contact_person, contact_mobile, contact_email, issuer_details,
                    subtotal, total_discount, total_tax, grand_total, COALESCE($3, notes),
                    COALESCE($4, ''), id, now(), $5, $6, COALESCE($7, created_by), $8
             FROM quotations WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let quotation = sqlx::query_as::<_, Quotation>(&query)
            .bind(source.id)
            .bind(&quote_number)
            .bind(&request.notes)
            .bind(&request.requote_note)
            .bind(QuotationStatus::Draft.as_str())
            .bind(REVIEW_PENDING)
            .bind(&request.created_by)
            .bind(&request.updated_by)
            .fetch_one(&mut *tx)
            .await?;

        let query = format!(
            "INSERT INTO quotation_items
                (quotation_id, {ITEM_COPY_COLUMNS}, item_status, review_status, updated_by)
             SELECT $2, {ITEM_COPY_COLUMNS}, $3, $4, $5
             FROM quotation_items WHERE quotation_id = $1
             ORDER BY id
             RETURNING {ITEM_COLUMNS}"
        );
        let mut items = sqlx::query_as::<_, QuotationItem>(&query)
            .bind(source.id)
            .bind(quotation.id)
            .bind(ItemStatus::Pending.as_str())
            .bind(REVIEW_PENDING)
            .bind(&request.updated_by)
            .fetch_all(&mut *tx)
            .await?;
        items.sort_by_key(|item| item.id);

        if request.update_original_status {
            sqlx::query("UPDATE quotations SET status = $2 WHERE id = $1")
                .bind(source.id)
                .bind(QuotationStatus::Requote.as_str())
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(QuotationWithItems { quotation, items })
    }

    // -----------------------------------------------------------------------
    // Statistics
    // -----------------------------------------------------------------------

    /// Quotation counts grouped by lower-cased status.
    pub async fn status_counts(pool: &PgPool) -> Result<Vec<StatusCount>, sqlx::Error> {
        sqlx::query_as::<_, StatusCount>(
            "SELECT lower(status) AS status, COUNT(*) AS count FROM quotations GROUP BY 1",
        )
        .fetch_all(pool)
        .await
    }

    /// Item counts grouped by status, optionally for one quotation.
    pub async fn item_status_counts(
        pool: &PgPool,
        quotation_id: Option<DbId>,
    ) -> Result<Vec<StatusCount>, sqlx::Error> {
        sqlx::query_as::<_, StatusCount>(
            "SELECT lower(item_status) AS status, COUNT(*) AS count FROM quotation_items
             WHERE ($1::BIGINT IS NULL OR quotation_id = $1)
             GROUP BY 1",
        )
        .bind(quotation_id)
        .fetch_all(pool)
        .await
    }

    pub async fn count_items(pool: &PgPool, quotation_id: Option<DbId>) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM quotation_items WHERE ($1::BIGINT IS NULL OR quotation_id = $1)",
        )
        .bind(quotation_id)
        .fetch_one(pool)
        .await
    }

    /// Grand-total sums per creation month of `year`.
    pub async fn monthly_totals(pool: &PgPool, year: i32) -> Result<Vec<MonthlyTotal>, sqlx::Error> {
        sqlx::query_as::<_, MonthlyTotal>(
            "SELECT EXTRACT(MONTH FROM created_at)::INT AS month,
                    COALESCE(SUM(grand_total), 0) AS total
             FROM quotations
             WHERE EXTRACT(YEAR FROM created_at)::INT = $1
             GROUP BY 1
             ORDER BY 1",
        )
        .bind(year)
        .fetch_all(pool)
        .await
    }

    /// The current local year and month, as used by the statistics view.
    pub fn current_period() -> (i32, u32) {
        let today: NaiveDate = Local::now().date_naive();
        (today.year(), today.month())
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    /// Smallest `-R{n}` successor of `source` that is not taken yet.
    async fn next_free_requote_number(
        conn: &mut PgConnection,
        source: &str,
    ) -> Result<String, sqlx::Error> {
        let mut candidate = next_requote_number(source);
        loop {
            let taken = sqlx::query_scalar::<_, bool>(
                "SELECT EXISTS (SELECT 1 FROM quotations WHERE quote_number = $1)",
            )
            .bind(&candidate)
            .fetch_one(&mut *conn)
            .await?;
            if !taken {
                return Ok(candidate);
            }
            tracing::debug!(quote_number = %candidate, "Re-quote number taken, trying next");
            candidate = next_requote_number(&candidate);
        }
    }

    async fn touch(conn: &mut PgConnection, quotation_id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE quotations SET updated_at = now() WHERE id = $1")
            .bind(quotation_id)
            .execute(conn)
            .await?;
        Ok(())
    }

    async fn insert_item(
        conn: &mut PgConnection,
        quotation_id: DbId,
        item: &QuotationItemInput,
        fallback_updated_by: Option<&str>,
    ) -> Result<QuotationItem, sqlx::Error> {
        let query = format!(
            "INSERT INTO quotation_items
                (quotation_id, item_name, hsn_sac, supplier_part_no, description, cut_width,
                 length, batch_no, mrp, quantity, unit, discount, discount_type, tax_rate,
                 item_status, review_status, updated_by, price_per_unit, amount_before_discount,
                 discount_amount, amount_after_discount, tax_amount, item_total)
             VALUES ($1, $2, $3, $4, $5, COALESCE($6, 0), COALESCE($7, 0), $8,
                     COALESCE($9, 0), COALESCE($10, 1), COALESCE($11, 'pcs'),
                     COALESCE($12, 0), COALESCE($13, 'amount'), COALESCE($14, 18),
                     COALESCE($15, $24), COALESCE($16, $25), $17,
                     COALESCE($18, 0), COALESCE($19, 0), COALESCE($20, 0),
                     COALESCE($21, 0), COALESCE($22, 0), COALESCE($23, 0))
             RETURNING {ITEM_COLUMNS}"
        );
        sqlx::query_as::<_, QuotationItem>(&query)
            .bind(quotation_id)
            .bind(&item.item_name)
            .bind(&item.hsn_sac)
            .bind(&item.supplier_part_no)
            .bind(&item.description)
            .bind(item.cut_width)
            .bind(item.length)
            .bind(&item.batch_no)
            .bind(item.mrp)
            .bind(item.quantity)
            .bind(&item.unit)
            .bind(item.discount)
            .bind(&item.discount_type)
            .bind(item.tax_rate)
            .bind(&item.item_status)
            .bind(&item.review_status)
            .bind(item.updated_by.as_deref().or(fallback_updated_by))
            .bind(item.price_per_unit)
            .bind(item.amount_before_discount)
            .bind(item.discount_amount)
            .bind(item.amount_after_discount)
            .bind(item.tax_amount)
            .bind(item.item_total)
            .bind(ItemStatus::Pending.as_str())
            .bind(REVIEW_PENDING)
            .fetch_one(conn)
            .await
    }

    /// Patch an item of `quotation_id`; items of other quotations are left alone.
    async fn patch_item(
        conn: &mut PgConnection,
        quotation_id: DbId,
        item_id: DbId,
        item: &QuotationItemInput,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE quotation_items SET
                item_name = COALESCE($3, item_name),
                hsn_sac = COALESCE($4, hsn_sac),
                supplier_part_no = COALESCE($5, supplier_part_no),
                description = COALESCE($6, description),
                cut_width = COALESCE($7, cut_width),
                length = COALESCE($8, length),
                batch_no = COALESCE($9, batch_no),
                mrp = COALESCE($10, mrp),
                quantity = COALESCE($11, quantity),
                unit = COALESCE($12, unit),
                discount = COALESCE($13, discount),
                discount_type = COALESCE($14, discount_type),
                tax_rate = COALESCE($15, tax_rate),
                item_status = COALESCE($16, item_status),
                review_status = COALESCE($17, review_status),
                updated_by = COALESCE($18, updated_by),
                price_per_unit = COALESCE($19, price_per_unit),
                amount_before_discount = COALESCE($20, amount_before_discount),
                discount_amount = COALESCE($21, discount_amount),
                amount_after_discount = COALESCE($22, amount_after_discount),
                tax_amount = COALESCE($23, tax_amount),
                item_total = COALESCE($24, item_total)
             WHERE id = $2 AND quotation_id = $1",
        )
        .bind(quotation_id)
        .bind(item_id)
        .bind(&item.item_name)
        .bind(&item.hsn_sac)
        .bind(&item.supplier_part_no)
        .bind(&item.description)
        .bind(item.cut_width)
        .bind(item.length)
        .bind(&item.batch_no)
        .bind(item.mrp)
        .bind(item.quantity)
        .bind(&item.unit)
        .bind(item.discount)
        .bind(&item.discount_type)
        .bind(item.tax_rate)
        .bind(&item.item_status)
        .bind(&item.review_status)
        .bind(&item.updated_by)
        .bind(item.price_per_unit)
        .bind(item.amount_before_discount)
        .bind(item.discount_amount)
        .bind(item.amount_after_discount)
        .bind(item.tax_amount)
        .bind(item.item_total)
        .execute(conn)
        .await?;
        Ok(())
    }
}
