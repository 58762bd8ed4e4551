//! Repositories for the inventory tables: `stock`, `stock_sold`, `grn` and
//! `mrp_products`.

use bizdesk_core::price_list::PriceListRow;
use bizdesk_core::types::DbId;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::models::stock::{
    BulkUpdateReport, CreateStockSold, Grn, GrnHeader, GrnItem, MrpProduct, Stock,
    StockPriceUpdate, StockRecord, StockSold, UpdateMrpProduct,
};

const STOCK_COLUMNS: &str = "\
    id, item_name, brand, brand_code, brand_description, hsn, batch_code, \
    mrp, buy_price, width, length, unit, gst, created_at, updated_at";

const STOCK_SOLD_COLUMNS: &str = "\
    id, item_name, sold_qty, date, customer_name, remarks, created_at";

const GRN_COLUMNS: &str = "\
    id, invoice_number, invoice_date, customer_name, customer_part_no, \
    customer_description, item_name, brand, length, width, buy_price, \
    batch_code, created_at";

const MRP_COLUMNS: &str = "\
    id, item_name, brand, brand_code, brand_description, mrp, created_at, updated_at";

// ---------------------------------------------------------------------------
// Stock on hand
// ---------------------------------------------------------------------------

/// Provides data access for stock on hand.
pub struct StockRepo;

impl StockRepo {
    /// Insert all records in one statement inside a transaction.
    ///
    /// Returns the number of rows inserted.
    pub async fn bulk_insert(pool: &PgPool, records: &[StockRecord]) -> Result<u64, sqlx::Error> {
        if records.is_empty() {
            return Ok(0);
        }

        let mut tx = pool.begin().await?;
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(
            "INSERT INTO stock (item_name, brand, brand_code, brand_description, hsn, \
             batch_code, mrp, buy_price, width, length, unit, gst) ",
        );
        builder.push_values(records, |mut row, record| {
            row.push_bind(record.item_name.as_deref())
                .push_bind(record.brand.as_deref())
                .push_bind(record.brand_code.as_deref())
                .push_bind(record.brand_description.as_deref())
                .push_bind(record.hsn.as_deref())
                .push_bind(record.batch_code.as_deref())
                .push_bind(record.mrp)
                .push_bind(record.buy_price)
                .push_bind(record.width.as_deref())
                .push_bind(record.length.as_deref())
                .push_bind(record.unit.as_deref())
                .push_bind(record.gst);
        });
        let inserted = builder.build().execute(&mut *tx).await?.rows_affected();

        tx.commit().await?;
        Ok(inserted)
    }

    /// List all stock, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Stock>, sqlx::Error> {
        let query = format!("SELECT {STOCK_COLUMNS} FROM stock ORDER BY id DESC");
        sqlx::query_as::<_, Stock>(&query).fetch_all(pool).await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Stock>, sqlx::Error> {
        let query = format!("SELECT {STOCK_COLUMNS} FROM stock WHERE id = $1");
        sqlx::query_as::<_, Stock>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM stock WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Apply price updates keyed by brand code in one transaction.
    ///
    /// Every stock row carrying the brand code is updated. Each input
    /// record is reported as either updated or not found.
    pub async fn bulk_update_prices(
        pool: &PgPool,
        records: &[StockPriceUpdate],
    ) -> Result<BulkUpdateReport, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let mut report = BulkUpdateReport::default();

        for record in records {
            let Some(brand_code) = record.brand_code.as_deref() else {
                report.not_found.push(String::new());
                continue;
            };

            let result = sqlx::query(
                "UPDATE stock SET
                    mrp = COALESCE($2, mrp),
                    buy_price = COALESCE($3, buy_price),
                    gst = COALESCE($4, gst),
                    brand_description = COALESCE($5, brand_description),
                    item_name = COALESCE($6, item_name)
                 WHERE brand_code = $1",
            )
            .bind(brand_code)
            .bind(record.mrp)
            .bind(record.buy_price)
            .bind(record.gst)
            .bind(record.brand_description.as_deref())
            .bind(record.item_name.as_deref())
            .execute(&mut *tx)
            .await?;

            if result.rows_affected() > 0 {
                report.rows_updated += result.rows_affected();
                report.updated.push(brand_code.to_string());
            } else {
                report.not_found.push(brand_code.to_string());
            }
        }

        tx.commit().await?;
        Ok(report)
    }
}

// ---------------------------------------------------------------------------
// Stock sold
// ---------------------------------------------------------------------------

/// Provides data access for the sales ledger.
pub struct StockSoldRepo;

impl StockSoldRepo {
    pub async fn create(pool: &PgPool, input: &CreateStockSold) -> Result<StockSold, sqlx::Error> {
        let query = format!(
            "INSERT INTO stock_sold (item_name, sold_qty, date, customer_name, remarks)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {STOCK_SOLD_COLUMNS}"
        );
        sqlx::query_as::<_, StockSold>(&query)
            .bind(&input.item_name)
            .bind(input.sold_qty)
            .bind(input.date)
            .bind(&input.customer_name)
            .bind(&input.remarks)
            .fetch_one(pool)
            .await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<StockSold>, sqlx::Error> {
        let query = format!("SELECT {STOCK_SOLD_COLUMNS} FROM stock_sold ORDER BY id DESC");
        sqlx::query_as::<_, StockSold>(&query).fetch_all(pool).await
    }
}

// ---------------------------------------------------------------------------
// Goods received notes
// ---------------------------------------------------------------------------

/// Provides data access for goods received notes.
pub struct GrnRepo;

impl GrnRepo {
    /// Insert one GRN line.
    pub async fn create(
        pool: &PgPool,
        header: &GrnHeader,
        item: &GrnItem,
    ) -> Result<Grn, sqlx::Error> {
        let mut rows = Self::create_many(pool, header, std::slice::from_ref(item)).await?;
        rows.pop().ok_or(sqlx::Error::RowNotFound)
    }

    /// Insert several lines sharing one invoice header, in one transaction.
    pub async fn create_many(
        pool: &PgPool,
        header: &GrnHeader,
        items: &[GrnItem],
    ) -> Result<Vec<Grn>, sqlx::Error> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let mut tx = pool.begin().await?;
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(
            "INSERT INTO grn (invoice_number, invoice_date, customer_name, customer_part_no, \
             customer_description, item_name, brand, length, width, buy_price, batch_code) ",
        );
        builder.push_values(items, |mut row, item| {
            row.push_bind(header.invoice_number.as_deref())
                .push_bind(header.invoice_date)
                .push_bind(header.customer_name.as_deref())
                .push_bind(header.customer_part_no.as_deref())
                .push_bind(header.customer_description.as_deref())
                .push_bind(item.item_name.as_deref())
                .push_bind(item.brand.as_deref())
                .push_bind(item.length.as_deref())
                .push_bind(item.width.as_deref())
                .push_bind(item.buy_price)
                .push_bind(item.batch_code.as_deref());
        });
        builder.push(format!(" RETURNING {GRN_COLUMNS}"));
        let rows = builder.build_query_as::<Grn>().fetch_all(&mut *tx).await?;

        tx.commit().await?;
        Ok(rows)
    }

    /// List all GRN lines, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Grn>, sqlx::Error> {
        let query = format!("SELECT {GRN_COLUMNS} FROM grn ORDER BY id DESC");
        sqlx::query_as::<_, Grn>(&query).fetch_all(pool).await
    }
}

// ---------------------------------------------------------------------------
// MRP price list
// ---------------------------------------------------------------------------

/// Provides data access for the imported MRP price list.
pub struct MrpRepo;

impl MrpRepo {
    /// Insert parsed price-list rows in one transaction.
    pub async fn import(pool: &PgPool, rows: &[PriceListRow]) -> Result<Vec<MrpProduct>, sqlx::Error> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let mut tx = pool.begin().await?;
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(
            "INSERT INTO mrp_products (item_name, brand, brand_code, brand_description, mrp) ",
        );
        builder.push_values(rows, |mut row, entry| {
            row.push_bind(entry.item_name.as_deref())
                .push_bind(entry.brand.as_str())
                .push_bind(entry.brand_code.as_deref())
                .push_bind(entry.brand_description.as_deref())
                .push_bind(entry.mrp);
        });
        builder.push(format!(" RETURNING {MRP_COLUMNS}"));
        let inserted = builder
            .build_query_as::<MrpProduct>()
            .fetch_all(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(inserted)
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<MrpProduct>, sqlx::Error> {
        let query = format!("SELECT {MRP_COLUMNS} FROM mrp_products ORDER BY id");
        sqlx::query_as::<_, MrpProduct>(&query).fetch_all(pool).await
    }

    /// Partially update a price-list row.
    ///
    /// Uses `COALESCE` so only provided fields are changed.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateMrpProduct,
    ) -> Result<Option<MrpProduct>, sqlx::Error> {
        let query = format!(
            "UPDATE mrp_products SET
                item_name = COALESCE($2, item_name),
                brand = COALESCE($3, brand),
                brand_code = COALESCE($4, brand_code),
                brand_description = COALESCE($5, brand_description),
                mrp = COALESCE($6, mrp)
             WHERE id = $1
             RETURNING {MRP_COLUMNS}"
        );
        sqlx::query_as::<_, MrpProduct>(&query)
            .bind(id)
            .bind(&input.item_name)
            .bind(&input.brand)
            .bind(&input.brand_code)
            .bind(&input.brand_description)
            .bind(input.mrp)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM mrp_products WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Stock brands (trimmed, lower-cased) with no price-list entry.
    pub async fn unmatched_brands(pool: &PgPool) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>(
            "SELECT DISTINCT lower(trim(s.brand)) AS brand FROM stock s
             WHERE s.brand IS NOT NULL AND trim(s.brand) <> ''
               AND NOT EXISTS (
                   SELECT 1 FROM mrp_products p
                   WHERE lower(trim(p.brand)) = lower(trim(s.brand))
               )
             ORDER BY brand",
        )
        .fetch_all(pool)
        .await
    }
}
