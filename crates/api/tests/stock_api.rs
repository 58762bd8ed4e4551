//! HTTP-level tests for stock, sales, goods received notes and the MRP
//! price list.

mod common;

use axum::http::{Method, StatusCode};
use common::{body_json, delete, get, multipart, post_json, put_json};
use serde_json::json;
use sqlx::PgPool;

async fn seed_stock(pool: &PgPool) {
    let response = post_json(
        common::build_test_app(pool.clone()),
        "/api/v1/stock/bulk-save",
        json!({"records": [
            {"Item Name": " V-Belt A42 ", "Brand": "Fenner", "Brand Code": "FN-A42", "MRP": "450", "GST": 18},
            {"Item Name": "V-Belt A42", "Brand": "Fenner", "Brand Code": "FN-A42", "Batch Code": "B2", "MRP": 450},
            {"item_name": "Pulley", "brand": " Rolon ", "brand_code": "RL-P1", "buy_price": 120.5}
        ]}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await["data"]["inserted"], 3);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn bulk_save_trims_and_lists(pool: PgPool) {
    seed_stock(&pool).await;

    let json = body_json(get(common::build_test_app(pool.clone()), "/api/v1/stock").await).await;
    let rows = json["data"].as_array().unwrap();
    assert_eq!(rows.len(), 3);
    assert!(rows.iter().any(|r| r["item_name"] == "V-Belt A42" && r["gst"] == 18.0));

    let id = rows[0]["id"].as_i64().unwrap();
    let response = delete(common::build_test_app(pool.clone()), &format!("/api/v1/stock/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let response = get(common::build_test_app(pool.clone()), &format!("/api/v1/stock/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = post_json(
        common::build_test_app(pool),
        "/api/v1/stock/bulk-save",
        json!({"records": []}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn bulk_update_partitions_every_record(pool: PgPool) {
    seed_stock(&pool).await;

    let response = put_json(
        common::build_test_app(pool.clone()),
        "/api/v1/stock/bulk-update",
        json!({"records": [
            {"brand_code": "FN-A42", "mrp": 480},
            {"Brand Code": "XX-404", "MRP": 10},
            {"mrp": 99}
        ]}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let report = body_json(response).await["data"].clone();
    assert_eq!(report["updated"], json!(["FN-A42"]));
    assert_eq!(report["not_found"], json!(["XX-404", ""]));
    assert_eq!(report["rows_updated"], 2);

    let json = body_json(get(common::build_test_app(pool.clone()), "/api/v1/stock").await).await;
    let repriced: Vec<_> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|r| r["brand_code"] == "FN-A42")
        .collect();
    assert_eq!(repriced.len(), 2);
    assert!(repriced.iter().all(|r| r["mrp"] == 480.0));

    let response = put_json(
        common::build_test_app(pool),
        "/api/v1/stock/bulk-update",
        json!({"records": []}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn stock_sold_and_grn(pool: PgPool) {
    let response = post_json(
        common::build_test_app(pool.clone()),
        "/api/v1/stock-sold",
        json!({"item_name": "Pulley", "sold_qty": "3", "date": "2025-02-10", "customer_name": "Acme"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(get(common::build_test_app(pool.clone()), "/api/v1/stock-sold").await).await;
    assert_eq!(json["data"][0]["sold_qty"], 3.0);

    let response = post_json(
        common::build_test_app(pool.clone()),
        "/api/v1/grn",
        json!({"invoice_number": "INV-1", "invoice_date": "2025-02-01", "item_name": "Belt", "buy_price": 99}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await["data"]["invoice_number"], "INV-1");

    let response = post_json(
        common::build_test_app(pool.clone()),
        "/api/v1/grn/batch",
        json!({"invoice_number": "INV-2", "items": []}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = post_json(
        common::build_test_app(pool.clone()),
        "/api/v1/grn/batch",
        json!({"invoice_number": "INV-2", "customer_name": "Acme",
               "items": [{"item_name": "Belt", "length": 1200}, {"item_name": "Pulley"}]}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let rows = body_json(response).await["data"].clone();
    assert_eq!(rows.as_array().unwrap().len(), 2);
    assert!(rows.as_array().unwrap().iter().all(|r| r["invoice_number"] == "INV-2"));
    assert_eq!(rows[0]["length"], "1200");

    let json = body_json(get(common::build_test_app(pool), "/api/v1/grn").await).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 3);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn mrp_import_update_and_unmatched(pool: PgPool) {
    seed_stock(&pool).await;

    let csv = b"Brand,Item Name,MRP\nFenner,V-Belt,450\nnan,Ghost,10\nGates,Timing,abc\nGates,Timing,300\n";
    let response = multipart(
        common::build_test_app(pool.clone()),
        Method::POST,
        "/api/v1/mrp/import",
        &[],
        &[("file", "prices.csv", csv)],
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["total"], 2);

    let json = body_json(get(common::build_test_app(pool.clone()), "/api/v1/mrp").await).await;
    assert_eq!(json["total"], 2);
    let gates = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .find(|r| r["brand"] == "Gates")
        .unwrap()
        .clone();
    let id = gates["id"].as_i64().unwrap();

    let response = put_json(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/mrp/{id}"),
        json!({"mrp": "320"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["mrp"], 320.0);

    let json = body_json(get(common::build_test_app(pool.clone()), "/api/v1/mrp/unmatched").await).await;
    assert_eq!(json["data"], json!(["rolon"]));

    let response = delete(common::build_test_app(pool.clone()), &format!("/api/v1/mrp/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let response = delete(common::build_test_app(pool.clone()), &format!("/api/v1/mrp/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = multipart(
        common::build_test_app(pool),
        Method::POST,
        "/api/v1/mrp/import",
        &[("note", "no file")],
        &[],
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
