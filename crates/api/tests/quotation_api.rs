//! HTTP-level tests for the quotation workflow: numbering, the completed
//! lock, item statuses, re-quotes and statistics.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete, get, patch_json, post_json, put_json};
use serde_json::json;
use sqlx::PgPool;

async fn create_quotation(pool: &PgPool, body: serde_json::Value) -> serde_json::Value {
    let response = post_json(common::build_test_app(pool.clone()), "/api/v1/quotations", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"].clone()
}

fn sample_quotation() -> serde_json::Value {
    json!({
        "company_name": "Acme Belts",
        "contact_person": "Ravi",
        "grand_total": 1180.0,
        "items": [
            {"item_name": "V-Belt A42", "mrp": 500, "quantity": 2},
            {"item_name": "Pulley", "description": "cast iron", "mrp": 180}
        ]
    })
}

async fn set_status(pool: &PgPool, id: i64, status: &str) -> axum::http::Response<axum::body::Body> {
    patch_json(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/quotations/{id}/status"),
        json!({"status": status, "requote_note": "price revision", "updated_by": "ops"}),
    )
    .await
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_applies_defaults_and_generates_number(pool: PgPool) {
    let quotation = create_quotation(&pool, sample_quotation()).await;

    let number = quotation["quote_number"].as_str().unwrap();
    assert!(number.starts_with("Q-"), "unexpected number {number}");
    assert_eq!(number.len(), "Q-20250101-000000".len());
    assert_eq!(quotation["status"], "draft");
    assert_eq!(quotation["review_status"], "pending");

    let items = quotation["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["unit"], "pcs");
    assert_eq!(items[0]["tax_rate"], 18.0);
    assert_eq!(items[0]["discount_type"], "amount");
    assert_eq!(items[0]["item_status"], "pending");
    assert_eq!(items[1]["quantity"], 1.0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_requires_company_and_item_names(pool: PgPool) {
    let response = post_json(
        common::build_test_app(pool.clone()),
        "/api/v1/quotations",
        json!({"items": []}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = post_json(
        common::build_test_app(pool.clone()),
        "/api/v1/quotations",
        json!({"company_name": "Acme", "items": [{"mrp": 10}]}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = post_json(
        common::build_test_app(pool),
        "/api/v1/quotations",
        json!({"company_name": "Acme", "status": "bogus"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn item_statuses_outside_the_allowed_set_are_rejected(pool: PgPool) {
    let response = post_json(
        common::build_test_app(pool.clone()),
        "/api/v1/quotations",
        json!({"company_name": "Acme", "items": [{"item_name": "Belt", "item_status": "bogus"}]}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");

    let quotation = create_quotation(
        &pool,
        json!({"company_name": "Acme", "items": [{"item_name": "Belt", "item_status": "approved"}]}),
    )
    .await;
    let id = quotation["id"].as_i64().unwrap();
    let item_id = quotation["items"][0]["id"].as_i64().unwrap();
    assert_eq!(quotation["items"][0]["item_status"], "approved");

    let response = put_json(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/quotations/{id}"),
        json!({"items": [{"item_name": "Pulley", "item_status": "shipped-to-mars"}]}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = put_json(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/quotations/{id}"),
        json!({"items": [{"id": item_id, "item_status": "lost"}]}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(get(common::build_test_app(pool), &format!("/api/v1/quotations/{id}")).await).await;
    let items = json["data"]["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["item_status"], "approved");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn status_filter_ignores_case(pool: PgPool) {
    let quotation = create_quotation(&pool, json!({"company_name": "Legacy Co"})).await;
    create_quotation(&pool, json!({"company_name": "Draft Co"})).await;
    sqlx::query("UPDATE quotations SET status = 'Sent' WHERE id = $1")
        .bind(quotation["id"].as_i64().unwrap())
        .execute(&pool)
        .await
        .unwrap();

    for uri in ["/api/v1/quotations?status=sent", "/api/v1/quotations?status=SENT"] {
        let json = body_json(get(common::build_test_app(pool.clone()), uri).await).await;
        assert_eq!(json["pagination"]["total"], 1, "{uri}");
        assert_eq!(json["data"][0]["company_name"], "Legacy Co", "{uri}");
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn given_quote_number_is_kept_and_duplicates_conflict(pool: PgPool) {
    let quotation = create_quotation(
        &pool,
        json!({"company_name": "Acme", "quote_number": "Q-TEST-1"}),
    )
    .await;
    assert_eq!(quotation["quote_number"], "Q-TEST-1");

    let response = post_json(
        common::build_test_app(pool),
        "/api/v1/quotations",
        json!({"company_name": "Other", "quote_number": "Q-TEST-1"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_with_original_derives_requote_number(pool: PgPool) {
    let original = create_quotation(
        &pool,
        json!({"company_name": "Acme", "quote_number": "Q-20250101-000123"}),
    )
    .await;
    let original_id = original["id"].as_i64().unwrap();

    let revision = create_quotation(
        &pool,
        json!({"company_name": "Acme", "original_quote_id": original_id}),
    )
    .await;
    assert_eq!(revision["quote_number"], "Q-20250101-000123-R1");
    assert_eq!(revision["original_quote_id"], original_id);
    assert!(revision["requote_date"].is_string());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_is_paginated_and_filtered(pool: PgPool) {
    for n in 0..3 {
        create_quotation(&pool, json!({"company_name": format!("Co {n}")})).await;
    }
    create_quotation(&pool, json!({"company_name": "Sent Co", "status": "sent"})).await;

    let response = get(
        common::build_test_app(pool.clone()),
        "/api/v1/quotations?page=1&per_page=2",
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 2);
    assert_eq!(json["pagination"]["total"], 4);
    assert_eq!(json["pagination"]["pages"], 2);
    assert_eq!(json["data"][0]["company_name"], "Sent Co");

    let json = body_json(
        get(common::build_test_app(pool), "/api/v1/quotations?status=sent").await,
    )
    .await;
    assert_eq!(json["pagination"]["total"], 1);
    assert_eq!(json["data"][0]["status"], "sent");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_patches_header_and_merges_items(pool: PgPool) {
    let quotation = create_quotation(&pool, sample_quotation()).await;
    let id = quotation["id"].as_i64().unwrap();
    let first_item = quotation["items"][0]["id"].as_i64().unwrap();

    let response = put_json(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/quotations/{id}"),
        json!({
            "notes": "urgent",
            "items": [
                {"id": first_item, "quantity": 5},
                {"item_name": "Idler"}
            ]
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["notes"], "urgent");
    assert_eq!(json["data"]["company_name"], "Acme Belts");

    let items = json["data"]["items"].as_array().unwrap();
    assert_eq!(items.len(), 3);
    let patched = items.iter().find(|i| i["id"] == first_item).unwrap();
    assert_eq!(patched["quantity"], 5.0);
    assert_eq!(patched["item_name"], "V-Belt A42");
    assert!(items.iter().any(|i| i["item_name"] == "Idler"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn completed_quotation_is_locked(pool: PgPool) {
    let quotation = create_quotation(&pool, sample_quotation()).await;
    let id = quotation["id"].as_i64().unwrap();
    let item_id = quotation["items"][0]["id"].as_i64().unwrap();

    assert_eq!(set_status(&pool, id, "completed").await.status(), StatusCode::OK);

    let response = put_json(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/quotations/{id}"),
        json!({"notes": "late change"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = delete(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/quotations/{id}"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    assert_eq!(set_status(&pool, id, "draft").await.status(), StatusCode::CONFLICT);
    assert_eq!(set_status(&pool, id, "completed").await.status(), StatusCode::OK);

    let response = patch_json(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/quotations/{id}/items/{item_id}/status"),
        json!({"status": "approved"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = patch_json(
        common::build_test_app(pool),
        &format!("/api/v1/quotations/{id}/items/bulk-status"),
        json!({"item_ids": [item_id], "status": "approved"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn status_change_validates_and_requote_renumbers(pool: PgPool) {
    let quotation = create_quotation(
        &pool,
        json!({"company_name": "Acme", "quote_number": "Q-20250101-000777"}),
    )
    .await;
    let id = quotation["id"].as_i64().unwrap();

    assert_eq!(set_status(&pool, id, "archived").await.status(), StatusCode::BAD_REQUEST);

    let response = set_status(&pool, id, "requote").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "requote");
    assert_eq!(json["data"]["quote_number"], "Q-20250101-000777-R1");
    assert_eq!(json["data"]["requote_note"], "price revision");
    assert!(json["data"]["requote_date"].is_string());

    let json = body_json(set_status(&pool, id, "requote").await).await;
    assert_eq!(json["data"]["quote_number"], "Q-20250101-000777-R2");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn item_status_updates(pool: PgPool) {
    let quotation = create_quotation(&pool, sample_quotation()).await;
    let id = quotation["id"].as_i64().unwrap();
    let first = quotation["items"][0]["id"].as_i64().unwrap();
    let second = quotation["items"][1]["id"].as_i64().unwrap();

    let response = patch_json(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/quotations/{id}/items/{first}/status"),
        json!({"status": "dispatched", "updated_by": "store"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["item_status"], "dispatched");
    assert_eq!(json["data"]["updated_by"], "store");

    let response = patch_json(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/quotations/{id}/items/{first}/status"),
        json!({"status": "lost"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = patch_json(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/quotations/{id}/items/999999/status"),
        json!({"status": "approved"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = patch_json(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/quotations/{id}/items/bulk-status"),
        json!({"item_ids": [], "status": "approved"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = patch_json(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/quotations/{id}/items/bulk-status"),
        json!({"item_ids": [first, second, 999999], "status": "delivered"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["updated_count"], 2);

    let json = body_json(
        get(
            common::build_test_app(pool),
            &format!("/api/v1/quotations/{id}/item-statistics"),
        )
        .await,
    )
    .await;
    assert_eq!(json["data"]["total_items"], 2);
    assert_eq!(json["data"]["status_counts"]["delivered"], 2);
    assert_eq!(json["data"]["status_counts"]["pending"], 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn requote_copies_items_and_marks_source(pool: PgPool) {
    let quotation = create_quotation(&pool, sample_quotation()).await;
    let id = quotation["id"].as_i64().unwrap();
    let first = quotation["items"][0]["id"].as_i64().unwrap();
    let number = quotation["quote_number"].as_str().unwrap().to_string();

    patch_json(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/quotations/{id}/items/{first}/status"),
        json!({"status": "approved"}),
    )
    .await;

    let response = post_json(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/quotations/{id}/requote"),
        json!({"requote_note": "new prices", "update_original_status": true}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let requote = body_json(response).await["data"].clone();
    assert_eq!(requote["quote_number"], format!("{number}-R1"));
    assert_eq!(requote["status"], "draft");
    assert_eq!(requote["original_quote_id"], id);
    assert_eq!(requote["company_name"], "Acme Belts");
    let items = requote["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert!(items.iter().all(|i| i["item_status"] == "pending"));

    let source = body_json(
        get(common::build_test_app(pool.clone()), &format!("/api/v1/quotations/{id}")).await,
    )
    .await;
    assert_eq!(source["data"]["status"], "requote");

    let second = body_json(
        post_json(
            common::build_test_app(pool.clone()),
            &format!("/api/v1/quotations/{id}/requote"),
            json!({}),
        )
        .await,
    )
    .await;
    assert_eq!(second["data"]["quote_number"], format!("{number}-R2"));

    let list = body_json(
        get(
            common::build_test_app(pool),
            &format!("/api/v1/quotations/{id}/requotes"),
        )
        .await,
    )
    .await;
    let requotes = list["data"].as_array().unwrap();
    assert_eq!(requotes.len(), 2);
    assert_eq!(requotes[0]["quote_number"], format!("{number}-R2"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn requote_of_completed_cannot_mark_source(pool: PgPool) {
    let quotation = create_quotation(&pool, sample_quotation()).await;
    let id = quotation["id"].as_i64().unwrap();
    set_status(&pool, id, "completed").await;

    let response = post_json(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/quotations/{id}/requote"),
        json!({"update_original_status": true}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = post_json(
        common::build_test_app(pool),
        &format!("/api/v1/quotations/{id}/requote"),
        json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_removes_items(pool: PgPool) {
    let quotation = create_quotation(&pool, sample_quotation()).await;
    let id = quotation["id"].as_i64().unwrap();

    let response = delete(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/quotations/{id}"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let remaining: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM quotation_items WHERE quotation_id = $1")
            .bind(id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(remaining, 0);

    let response = get(
        common::build_test_app(pool),
        &format!("/api/v1/quotations/{id}"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn search_recent_and_statistics(pool: PgPool) {
    create_quotation(&pool, sample_quotation()).await;
    create_quotation(
        &pool,
        json!({"company_name": "Zenith Motors", "grand_total": 820.0, "status": "sent",
               "items": [{"item_name": "Timing belt", "supplier_part_no": "TB-900"}]}),
    )
    .await;

    let response = get(common::build_test_app(pool.clone()), "/api/v1/quotations/search").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(
        get(common::build_test_app(pool.clone()), "/api/v1/quotations/search?q=tb-9").await,
    )
    .await;
    let found = json["data"].as_array().unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0]["company_name"], "Zenith Motors");

    let json = body_json(
        get(common::build_test_app(pool.clone()), "/api/v1/quotations/search?q=acme").await,
    )
    .await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);

    let json = body_json(
        get(common::build_test_app(pool.clone()), "/api/v1/quotations/recent?limit=1").await,
    )
    .await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
    assert_eq!(json["data"][0]["company_name"], "Zenith Motors");

    let json = body_json(
        get(common::build_test_app(pool), "/api/v1/quotations/statistics").await,
    )
    .await;
    let stats = &json["data"];
    assert_eq!(stats["total"], 2);
    assert_eq!(stats["status_counts"]["draft"], 1);
    assert_eq!(stats["status_counts"]["sent"], 1);
    assert_eq!(stats["status_counts"]["paid"], 0);
    assert_eq!(stats["current_month_revenue"], 2000.0);
    assert_eq!(stats["item_statistics"]["total_items"], 3);
    assert_eq!(stats["item_statistics"]["avg_items_per_quotation"], 1.5);
    assert_eq!(stats["item_statistics"]["status_counts"]["pending"], 3);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn export_returns_full_document(pool: PgPool) {
    let quotation = create_quotation(
        &pool,
        json!({"company_name": "Acme", "issuer_details": {"name": "Bizdesk Traders"},
               "items": [{"item_name": "Belt"}]}),
    )
    .await;
    let id = quotation["id"].as_i64().unwrap();

    let json = body_json(
        get(
            common::build_test_app(pool),
            &format!("/api/v1/quotations/{id}/export"),
        )
        .await,
    )
    .await;
    assert_eq!(json["data"]["issuer_details"]["name"], "Bizdesk Traders");
    assert_eq!(json["data"]["items"][0]["item_name"], "Belt");
}
