//! HTTP-level tests for companies, visit reports and tasks.

mod common;

use axum::http::{Method, StatusCode};
use common::{body_json, delete, get, multipart, post_json, put_json};
use serde_json::json;
use sqlx::PgPool;

fn company(name: &str, mobile: &str) -> serde_json::Value {
    json!({
        "company_name": name,
        "company_address": "Plot 4, MIDC",
        "pin_code": "411019",
        "industry_segment": "Textiles",
        "customer_name": "Mr. Rao",
        "customer_mobile": mobile,
        "customer_email": "rao@example.com",
        "department": "Purchase",
        "personal_mobile": "9000000000",
        "personal_email": "rao.home@example.com",
    })
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn company_crud_and_lookups(pool: PgPool) {
    let response = post_json(
        common::build_test_app(pool.clone()),
        "/api/v1/companies",
        json!({"company_name": "Half Filled"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = post_json(
        common::build_test_app(pool.clone()),
        "/api/v1/companies",
        company("Sunrise Mills", "9811111111"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let json = body_json(
        get(common::build_test_app(pool.clone()), "/api/v1/companies/by-mobile/9811111111").await,
    )
    .await;
    assert_eq!(json["data"]["company_name"], "Sunrise Mills");

    let json = body_json(
        get(common::build_test_app(pool.clone()), "/api/v1/companies/by-name/sunrise").await,
    )
    .await;
    assert_eq!(json["data"]["id"], id);

    let response = get(common::build_test_app(pool.clone()), "/api/v1/companies/by-mobile/000").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = put_json(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/companies/{id}"),
        company("Sunrise Textile Mills", "9811111111"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["company_name"], "Sunrise Textile Mills");

    let response = delete(common::build_test_app(pool.clone()), &format!("/api/v1/companies/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let response = get(common::build_test_app(pool), &format!("/api/v1/companies/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn visit_reports_store_attachment_and_search(pool: PgPool) {
    let config = common::test_config();
    let upload_dir = config.upload_dir.clone();

    let response = multipart(
        common::build_test_app_with_config(pool.clone(), config.clone()),
        Method::POST,
        "/api/v1/visit-reports",
        &[("company_name", "Sunrise Mills"), ("customer_mobile", "9811111111"), ("notes", "demo")],
        &[("attachment", "site plan.pdf", b"%PDF-1.4")],
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["created_by"], "Admin");
    let attachment = json["data"]["attachment"].as_str().unwrap().to_string();
    assert!(attachment.starts_with("visit_reports/"));
    assert!(attachment.ends_with("_site_plan.pdf"));
    assert!(upload_dir.join(&attachment).exists());

    let response = multipart(
        common::build_test_app(pool.clone()),
        Method::POST,
        "/api/v1/visit-reports",
        &[("company_name", "Missing Mobile")],
        &[],
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    multipart(
        common::build_test_app(pool.clone()),
        Method::POST,
        "/api/v1/visit-reports",
        &[("company_name", "Delta Dyes"), ("customer_mobile", "9822222222"), ("created_by", "meera")],
        &[],
    )
    .await;

    let json = body_json(get(common::build_test_app(pool.clone()), "/api/v1/visit-reports/by-user/meera").await).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);

    let json = body_json(
        get(common::build_test_app(pool.clone()), "/api/v1/visit-reports/search-name?term=SUNRISE").await,
    )
    .await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);

    let json = body_json(
        get(common::build_test_app(pool.clone()), "/api/v1/visit-reports/search-name?term=%20").await,
    )
    .await;
    assert!(json["data"].as_array().unwrap().is_empty());

    let today = chrono::Utc::now().date_naive();
    let json = body_json(
        get(
            common::build_test_app(pool.clone()),
            &format!("/api/v1/visit-reports/search?start_date={today}&end_date={today}"),
        )
        .await,
    )
    .await;
    assert_eq!(json["data"].as_array().unwrap().len(), 2);

    let response = get(common::build_test_app(pool), "/api/v1/visit-reports/search?start_date=2025-01-01").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn tasks_crud_and_filter(pool: PgPool) {
    let response = post_json(
        common::build_test_app(pool.clone()),
        "/api/v1/tasks",
        json!({"title": "Cut belts", "assigned_to": "ravi", "quotation_number": "Q-1", "quantity": 4}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "Pending");
    let id = json["data"]["id"].as_i64().unwrap();

    post_json(
        common::build_test_app(pool.clone()),
        "/api/v1/tasks",
        json!({"title": "Pack order", "assigned_to": "meera"}),
    )
    .await;

    let response = put_json(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/tasks/{id}"),
        json!({"status": "Done", "note": "shipped"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "Done");
    assert_eq!(json["data"]["title"], "Cut belts");

    let json = body_json(get(common::build_test_app(pool.clone()), "/api/v1/tasks?assigned_to=ravi").await).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
    let json = body_json(get(common::build_test_app(pool.clone()), "/api/v1/tasks?status=Pending").await).await;
    assert_eq!(json["data"][0]["title"], "Pack order");

    let response = delete(common::build_test_app(pool.clone()), &format!("/api/v1/tasks/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let response = get(common::build_test_app(pool), &format!("/api/v1/tasks/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
