//! Generic repository for the payroll sheets in [`crate::models::salary`].

use bizdesk_core::calendar::MonthPeriod;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::models::salary::SalarySheet;

/// Data access for any [`SalarySheet`].
pub struct SalaryRepo;

impl SalaryRepo {
    /// Replace every record of `period` with `records` in one transaction.
    ///
    /// Returns the number of rows written.
    pub async fn replace_month<S: SalarySheet>(
        pool: &PgPool,
        period: MonthPeriod,
        records: &[S::Input],
    ) -> Result<u64, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let delete = format!("DELETE FROM {} WHERE month = $1 AND year = $2", S::TABLE);
        sqlx::query(&delete)
            .bind(period.month)
            .bind(period.year)
            .execute(&mut *tx)
            .await?;

        let mut inserted = 0;
        if !records.is_empty() {
            let mut builder: QueryBuilder<Postgres> =
                QueryBuilder::new(format!("INSERT INTO {} ({}) ", S::TABLE, S::INSERT_COLUMNS));
            builder.push_values(records, |mut row, input| {
                S::push_values(&mut row, period, input);
            });
            inserted = builder.build().execute(&mut *tx).await?.rows_affected();
        }

        tx.commit().await?;
        Ok(inserted)
    }

    /// Records of one month, ordered by employee name.
    pub async fn list_month<S: SalarySheet>(
        pool: &PgPool,
        period: MonthPeriod,
    ) -> Result<Vec<S>, sqlx::Error> {
        let query = format!(
            "SELECT {} FROM {} WHERE month = $1 AND year = $2 ORDER BY name, id",
            S::COLUMNS,
            S::TABLE
        );
        sqlx::query_as::<_, S>(&query)
            .bind(period.month)
            .bind(period.year)
            .fetch_all(pool)
            .await
    }

    /// Every record, newest period first.
    pub async fn list_all<S: SalarySheet>(pool: &PgPool) -> Result<Vec<S>, sqlx::Error> {
        let query = format!(
            "SELECT {} FROM {} ORDER BY year DESC, month DESC, id DESC",
            S::COLUMNS,
            S::TABLE
        );
        sqlx::query_as::<_, S>(&query).fetch_all(pool).await
    }
}
