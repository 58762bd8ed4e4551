use bizdesk_core::calendar::MonthPeriod;
use bizdesk_core::price_list::PriceListRow;
use bizdesk_db::models::access::PermissionUpdate;
use bizdesk_db::models::salary::{BasicSalaryInput, CasualSalary, NoEsiPfSalary};
use bizdesk_db::models::stock::{StockPriceUpdate, StockRecord};
use bizdesk_db::repositories::{AccessRepo, MrpRepo, SalaryRepo, StockRepo};
use serde_json::json;
use sqlx::PgPool;

fn stock_record(brand: &str, brand_code: &str, mrp: f64) -> StockRecord {
    StockRecord {
        item_name: Some(format!("{brand} belt")),
        brand: Some(brand.to_string()),
        brand_code: Some(brand_code.to_string()),
        mrp: Some(mrp),
        ..Default::default()
    }
}

fn salary_input(name: &str, net: f64) -> BasicSalaryInput {
    serde_json::from_value(json!({
        "email": format!("{}@example.com", name.to_lowercase()),
        "name": name,
        "salaryInput": net,
        "netSalary": net,
    }))
    .unwrap()
}

// ---------------------------------------------------------------------------
// Stock
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_bulk_update_reports_every_record(pool: PgPool) {
    let records = vec![
        stock_record("Fenner", "FN-10", 100.0),
        stock_record("Fenner", "FN-10", 100.0),
        stock_record("Rolon", "RL-20", 50.0),
    ];
    assert_eq!(StockRepo::bulk_insert(&pool, &records).await.unwrap(), 3);

    let updates = vec![
        StockPriceUpdate {
            brand_code: Some("FN-10".into()),
            mrp: Some(120.0),
            ..Default::default()
        },
        StockPriceUpdate {
            brand_code: Some("XX-404".into()),
            mrp: Some(1.0),
            ..Default::default()
        },
        StockPriceUpdate {
            mrp: Some(2.0),
            ..Default::default()
        },
    ];
    let report = StockRepo::bulk_update_prices(&pool, &updates).await.unwrap();

    assert_eq!(report.updated, vec!["FN-10".to_string()]);
    assert_eq!(report.not_found, vec!["XX-404".to_string(), String::new()]);
    assert_eq!(report.rows_updated, 2);

    let stock = StockRepo::list(&pool).await.unwrap();
    let rolon = stock.iter().find(|s| s.brand_code.as_deref() == Some("RL-20")).unwrap();
    assert_eq!(rolon.mrp, Some(50.0));
    assert!(stock
        .iter()
        .filter(|s| s.brand_code.as_deref() == Some("FN-10"))
        .all(|s| s.mrp == Some(120.0)));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unmatched_brands_ignore_case_and_whitespace(pool: PgPool) {
    let records = vec![
        stock_record(" Fenner ", "FN-10", 100.0),
        stock_record("ROLON", "RL-20", 50.0),
    ];
    StockRepo::bulk_insert(&pool, &records).await.unwrap();

    let rows = vec![PriceListRow {
        brand: "fenner".into(),
        mrp: 99.5,
        item_name: None,
        brand_code: None,
        brand_description: None,
    }];
    let imported = MrpRepo::import(&pool, &rows).await.unwrap();
    assert_eq!(imported.len(), 1);

    let unmatched = MrpRepo::unmatched_brands(&pool).await.unwrap();
    assert_eq!(unmatched, vec!["rolon".to_string()]);
}

// ---------------------------------------------------------------------------
// Payroll
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_replace_month_only_touches_that_month(pool: PgPool) {
    let march = MonthPeriod::new(Some(3), Some(2025)).unwrap();
    let april = MonthPeriod::new(Some(4), Some(2025)).unwrap();

    SalaryRepo::replace_month::<NoEsiPfSalary>(&pool, march, &[salary_input("Zoe", 900.0)])
        .await
        .unwrap();
    SalaryRepo::replace_month::<NoEsiPfSalary>(&pool, april, &[salary_input("Ana", 800.0)])
        .await
        .unwrap();

    let inserted = SalaryRepo::replace_month::<NoEsiPfSalary>(
        &pool,
        march,
        &[salary_input("Zoe", 950.0), salary_input("Bob", 700.0)],
    )
    .await
    .unwrap();
    assert_eq!(inserted, 2);

    let rows = SalaryRepo::list_month::<NoEsiPfSalary>(&pool, march).await.unwrap();
    let names: Vec<_> = rows.iter().filter_map(|r| r.name.as_deref()).collect();
    assert_eq!(names, vec!["Bob", "Zoe"]);
    assert_eq!(rows[1].net_salary, 950.0);
    assert_eq!(rows[1].working_days, 0.0);

    let april_rows = SalaryRepo::list_month::<NoEsiPfSalary>(&pool, april).await.unwrap();
    assert_eq!(april_rows.len(), 1);

    // Sheets are independent tables.
    let casual = SalaryRepo::list_month::<CasualSalary>(&pool, march).await.unwrap();
    assert!(casual.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_replace_month_with_no_records_clears_it(pool: PgPool) {
    let march = MonthPeriod::new(Some(3), Some(2025)).unwrap();
    SalaryRepo::replace_month::<CasualSalary>(&pool, march, &[salary_input("Zoe", 300.0)])
        .await
        .unwrap();

    let inserted = SalaryRepo::replace_month::<CasualSalary>(&pool, march, &[])
        .await
        .unwrap();

    assert_eq!(inserted, 0);
    assert!(SalaryRepo::list_month::<CasualSalary>(&pool, march)
        .await
        .unwrap()
        .is_empty());
}

// ---------------------------------------------------------------------------
// Access
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_upsert_permissions_creates_modules_and_overwrites(pool: PgPool) {
    let sales = AccessRepo::create_user_type(&pool, "Sales").await.unwrap();
    AccessRepo::create_module(&pool, "Quotations").await.unwrap();

    let updates: Vec<PermissionUpdate> = serde_json::from_value(json!([
        { "user_type_id": sales.id, "module_name": "quotations", "can_view": true },
        { "user_type_id": sales.id, "module_name": "Stock", "has_access": 1 },
        { "user_type_id": sales.id, "module_name": "  " },
    ]))
    .unwrap();
    let applied = AccessRepo::upsert_permissions(&pool, &updates).await.unwrap();
    assert_eq!(applied, 2);

    let modules = AccessRepo::all_module_names(&pool).await.unwrap();
    assert_eq!(modules, vec!["Quotations".to_string(), "Stock".to_string()]);

    let revoke: Vec<PermissionUpdate> = serde_json::from_value(json!([
        { "usertype_id": sales.id, "module_name": "STOCK", "has_access": 0 },
    ]))
    .unwrap();
    AccessRepo::upsert_permissions(&pool, &revoke).await.unwrap();

    let granted = AccessRepo::granted_module_names(&pool, sales.id).await.unwrap();
    assert_eq!(granted, vec!["Quotations".to_string()]);

    let entries = AccessRepo::permissions_for_user_type(&pool, sales.id).await.unwrap();
    assert_eq!(entries.len(), 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_user_type_cascades(pool: PgPool) {
    let sales = AccessRepo::create_user_type(&pool, "Sales").await.unwrap();
    let updates: Vec<PermissionUpdate> = serde_json::from_value(json!([
        { "user_type_id": sales.id, "module_name": "Stock", "can_view": true },
    ]))
    .unwrap();
    AccessRepo::upsert_permissions(&pool, &updates).await.unwrap();
    AccessRepo::replace_access_controls(&pool, &[sales.id], true)
        .await
        .unwrap();

    assert!(AccessRepo::delete_user_type(&pool, sales.id).await.unwrap());

    assert!(AccessRepo::list_access_controls(&pool).await.unwrap().is_empty());
    assert!(AccessRepo::list_permissions(&pool).await.unwrap().is_empty());
}
