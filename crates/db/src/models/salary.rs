//! Monthly payroll sheets.
//!
//! Three variants share one lifecycle (replace a month, fetch a month,
//! list everything) but carry different columns. Each row type implements
//! [`SalarySheet`], which tells the repository how to read and write it.

use bizdesk_core::calendar::MonthPeriod;
use bizdesk_core::types::{DbId, Timestamp};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use sqlx::postgres::PgRow;
use sqlx::query_builder::Separated;
use sqlx::{FromRow, Postgres};

use crate::models::de::{f64_or_zero, optional_f64};

/// A payroll sheet stored in its own table.
pub trait SalarySheet: for<'r> FromRow<'r, PgRow> + Serialize + Send + Unpin + 'static {
    /// Record payload accepted by the save endpoint.
    type Input: DeserializeOwned + Send + Sync + 'static;

    /// Physical table name.
    const TABLE: &'static str;
    /// Column list for `SELECT` queries.
    const COLUMNS: &'static str;
    /// Columns written by [`SalarySheet::push_values`], in bind order.
    const INSERT_COLUMNS: &'static str;
    /// Human-readable sheet name for log and response messages.
    const LABEL: &'static str;

    /// Bind one record as a `VALUES` tuple.
    fn push_values<'qb, 'args: 'qb>(
        row: &mut Separated<'qb, 'args, Postgres, &'static str>,
        period: MonthPeriod,
        input: &'args Self::Input,
    );
}

/// Body of `POST /salary/{variant}/save`.
#[derive(Debug, Clone, Deserialize)]
#[serde(bound = "I: DeserializeOwned")]
pub struct SaveSalarySheet<I> {
    pub month: Option<i32>,
    pub year: Option<i32>,
    #[serde(default)]
    pub records: Vec<I>,
}

fn thirty() -> f64 {
    30.0
}

// ---------------------------------------------------------------------------
// ESI / PF
// ---------------------------------------------------------------------------

/// A row from `salary_esi_pf`: salary with statutory deductions.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct EsiPfSalary {
    pub id: DbId,
    pub email: Option<String>,
    pub name: Option<String>,
    pub month: i32,
    pub year: i32,
    pub leave: f64,
    pub grace: f64,
    pub working_days: f64,
    pub present_days: f64,
    pub salary_input: f64,
    pub monthly_salary: f64,
    pub basic: f64,
    pub hra: f64,
    pub conv: f64,
    pub total: f64,
    pub basic_conv: f64,
    pub restricted_basic: f64,
    pub pf: f64,
    pub esi: f64,
    pub loan: f64,
    pub tds: f64,
    pub ptax: f64,
    pub total_ded: f64,
    pub net_salary: f64,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EsiPfSalaryInput {
    pub email: Option<String>,
    pub name: Option<String>,
    #[serde(default, deserialize_with = "f64_or_zero")]
    pub leave: f64,
    #[serde(default, deserialize_with = "f64_or_zero")]
    pub grace: f64,
    #[serde(default = "thirty", alias = "workingDays", deserialize_with = "f64_or_zero")]
    pub working_days: f64,
    #[serde(default, alias = "presentDays", deserialize_with = "f64_or_zero")]
    pub present_days: f64,
    #[serde(default, alias = "salaryInput", deserialize_with = "f64_or_zero")]
    pub salary_input: f64,
    #[serde(default, alias = "monthlySalary", deserialize_with = "f64_or_zero")]
    pub monthly_salary: f64,
    #[serde(default, deserialize_with = "f64_or_zero")]
    pub basic: f64,
    #[serde(default, deserialize_with = "f64_or_zero")]
    pub hra: f64,
    #[serde(default, deserialize_with = "f64_or_zero")]
    pub conv: f64,
    #[serde(default, deserialize_with = "f64_or_zero")]
    pub total: f64,
    #[serde(default, alias = "basicConv", deserialize_with = "f64_or_zero")]
    pub basic_conv: f64,
    #[serde(default, alias = "restrictedBasic", deserialize_with = "f64_or_zero")]
    pub restricted_basic: f64,
    #[serde(default, deserialize_with = "f64_or_zero")]
    pub pf: f64,
    #[serde(default, deserialize_with = "f64_or_zero")]
    pub esi: f64,
    #[serde(default, deserialize_with = "f64_or_zero")]
    pub loan: f64,
    #[serde(default, deserialize_with = "f64_or_zero")]
    pub tds: f64,
    #[serde(default, deserialize_with = "f64_or_zero")]
    pub ptax: f64,
    #[serde(default, alias = "totalDed", deserialize_with = "f64_or_zero")]
    pub total_ded: f64,
    #[serde(default, alias = "netSalary", deserialize_with = "f64_or_zero")]
    pub net_salary: f64,
}

impl SalarySheet for EsiPfSalary {
    type Input = EsiPfSalaryInput;

    const TABLE: &'static str = "salary_esi_pf";
    const COLUMNS: &'static str = "\
        id, email, name, month, year, leave, grace, working_days, present_days, \
        salary_input, monthly_salary, basic, hra, conv, total, basic_conv, \
        restricted_basic, pf, esi, loan, tds, ptax, total_ded, net_salary, created_at";
    const INSERT_COLUMNS: &'static str = "\
        email, name, month, year, leave, grace, working_days, present_days, \
        salary_input, monthly_salary, basic, hra, conv, total, basic_conv, \
        restricted_basic, pf, esi, loan, tds, ptax, total_ded, net_salary";
    const LABEL: &'static str = "ESI/PF";

    fn push_values<'qb, 'args: 'qb>(
        row: &mut Separated<'qb, 'args, Postgres, &'static str>,
        period: MonthPeriod,
        input: &'args Self::Input,
    ) {
        row.push_bind(input.email.as_deref())
            .push_bind(input.name.as_deref())
            .push_bind(period.month)
            .push_bind(period.year)
            .push_bind(input.leave)
            .push_bind(input.grace)
            .push_bind(input.working_days)
            .push_bind(input.present_days)
            .push_bind(input.salary_input)
            .push_bind(input.monthly_salary)
            .push_bind(input.basic)
            .push_bind(input.hra)
            .push_bind(input.conv)
            .push_bind(input.total)
            .push_bind(input.basic_conv)
            .push_bind(input.restricted_basic)
            .push_bind(input.pf)
            .push_bind(input.esi)
            .push_bind(input.loan)
            .push_bind(input.tds)
            .push_bind(input.ptax)
            .push_bind(input.total_ded)
            .push_bind(input.net_salary);
    }
}

// ---------------------------------------------------------------------------
// Without ESI / PF, and casual staff
// ---------------------------------------------------------------------------

/// A row from `salary_no_esi_pf`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct NoEsiPfSalary {
    pub id: DbId,
    pub email: Option<String>,
    pub name: Option<String>,
    pub month: i32,
    pub year: i32,
    pub salary: f64,
    pub leave: f64,
    pub grace: f64,
    pub working_days: f64,
    pub present_days: f64,
    pub salary_payable: f64,
    pub loan: f64,
    pub net_salary: f64,
    pub created_at: Timestamp,
}

/// Record shape shared by the no-ESI/PF and casual sheets.
#[derive(Debug, Clone, Deserialize)]
pub struct BasicSalaryInput {
    pub email: Option<String>,
    pub name: Option<String>,
    /// Gross salary; the spreadsheet calls it `salaryInput`.
    #[serde(default, alias = "salaryInput", deserialize_with = "f64_or_zero")]
    pub salary: f64,
    #[serde(default, deserialize_with = "f64_or_zero")]
    pub leave: f64,
    #[serde(default, deserialize_with = "f64_or_zero")]
    pub grace: f64,
    #[serde(default, alias = "workingDays", deserialize_with = "optional_f64")]
    pub working_days: Option<f64>,
    #[serde(default, alias = "presentDays", deserialize_with = "f64_or_zero")]
    pub present_days: f64,
    #[serde(default, alias = "salaryPayable", deserialize_with = "f64_or_zero")]
    pub salary_payable: f64,
    #[serde(default, deserialize_with = "f64_or_zero")]
    pub loan: f64,
    #[serde(default, alias = "netSalary", deserialize_with = "f64_or_zero")]
    pub net_salary: f64,
}

const BASIC_INSERT_COLUMNS: &str = "\
    email, name, month, year, salary, leave, grace, working_days, present_days, \
    salary_payable, loan, net_salary";

const BASIC_COLUMNS: &str = "\
    id, email, name, month, year, salary, leave, grace, working_days, present_days, \
    salary_payable, loan, net_salary, created_at";

fn push_basic_values<'qb, 'args: 'qb>(
    row: &mut Separated<'qb, 'args, Postgres, &'static str>,
    period: MonthPeriod,
    input: &'args BasicSalaryInput,
    default_working_days: f64,
) {
    row.push_bind(input.email.as_deref())
        .push_bind(input.name.as_deref())
        .push_bind(period.month)
        .push_bind(period.year)
        .push_bind(input.salary)
        .push_bind(input.leave)
        .push_bind(input.grace)
        .push_bind(input.working_days.unwrap_or(default_working_days))
        .push_bind(input.present_days)
        .push_bind(input.salary_payable)
        .push_bind(input.loan)
        .push_bind(input.net_salary);
}

impl SalarySheet for NoEsiPfSalary {
    type Input = BasicSalaryInput;

    const TABLE: &'static str = "salary_no_esi_pf";
    const COLUMNS: &'static str = BASIC_COLUMNS;
    const INSERT_COLUMNS: &'static str = BASIC_INSERT_COLUMNS;
    const LABEL: &'static str = "Non ESI/PF";

    fn push_values<'qb, 'args: 'qb>(
        row: &mut Separated<'qb, 'args, Postgres, &'static str>,
        period: MonthPeriod,
        input: &'args Self::Input,
    ) {
        push_basic_values(row, period, input, 0.0);
    }
}

/// A row from `salary_casual`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CasualSalary {
    pub id: DbId,
    pub email: Option<String>,
    pub name: Option<String>,
    pub month: i32,
    pub year: i32,
    pub salary: f64,
    pub leave: f64,
    pub grace: f64,
    pub working_days: f64,
    pub present_days: f64,
    pub salary_payable: f64,
    pub loan: f64,
    pub net_salary: f64,
    pub created_at: Timestamp,
}

impl SalarySheet for CasualSalary {
    type Input = BasicSalaryInput;

    const TABLE: &'static str = "salary_casual";
    const COLUMNS: &'static str = BASIC_COLUMNS;
    const INSERT_COLUMNS: &'static str = BASIC_INSERT_COLUMNS;
    const LABEL: &'static str = "Casual";

    fn push_values<'qb, 'args: 'qb>(
        row: &mut Separated<'qb, 'args, Postgres, &'static str>,
        period: MonthPeriod,
        input: &'args Self::Input,
    ) {
        push_basic_values(row, period, input, thirty());
    }
}
