//! Server API tests

use super::*;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use chrono::{Duration, Utc};
use fintrack_core::ai::AdviceClient;
use fintrack_core::db::Database;
use fintrack_core::MockBackend;
use http_body_util::BodyExt;
use tower::ServiceExt;

fn setup_test_app() -> Router {
    let db = Database::in_memory().unwrap();
    create_router_with_advice(db, ServerConfig::default(), None)
}

fn setup_test_app_with_advice(advice: AdviceClient) -> Router {
    let db = Database::in_memory().unwrap();
    create_router_with_advice(db, ServerConfig::default(), Some(advice))
}

async fn get_body_json(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body();
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn send_json(
    app: &Router,
    method: &str,
    uri: &str,
    body: serde_json::Value,
) -> axum::response::Response {
    app.clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
}

async fn send_get(app: &Router, uri: &str) -> axum::response::Response {
    app.clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

// ========== Root / Health ==========

#[tokio::test]
async fn test_root() {
    let app = setup_test_app();

    let response = send_get(&app, "/").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert!(json["message"].as_str().unwrap().contains("Fintrack"));
    assert!(json["version"].is_string());
}

#[tokio::test]
async fn test_health() {
    let app = setup_test_app();

    let response = send_get(&app, "/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["status"], "healthy");
    assert!(json["timestamp"].is_string());
}

// ========== Transaction API ==========

#[tokio::test]
async fn test_create_and_list_transactions() {
    let app = setup_test_app();

    let response = send_json(
        &app,
        "POST",
        "/api/transactions",
        serde_json::json!({
            "kind": "income",
            "category": "salary",
            "amount": 1000.0,
            "occurred_on": "2024-01-05"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    assert!(json["id"].as_i64().unwrap() > 0);

    let response = send_json(
        &app,
        "POST",
        "/api/transactions",
        serde_json::json!({
            "kind": "expense",
            "category": "food",
            "amount": 42.5,
            "description": "groceries",
            "occurred_on": "2024-01-10"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = send_get(&app, "/api/transactions").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    let transactions = json.as_array().unwrap();
    assert_eq!(transactions.len(), 2);

    // Most recent occurred_on first
    assert_eq!(transactions[0]["category"], "food");
    assert_eq!(transactions[0]["description"], "groceries");
    assert_eq!(transactions[1]["category"], "salary");
}

#[tokio::test]
async fn test_create_transaction_rejects_negative_amount() {
    let app = setup_test_app();

    let response = send_json(
        &app,
        "POST",
        "/api/transactions",
        serde_json::json!({
            "kind": "expense",
            "category": "food",
            "amount": -5.0,
            "occurred_on": "2024-01-10"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = get_body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("non-negative"));
}

#[tokio::test]
async fn test_create_transaction_rejects_unknown_kind() {
    let app = setup_test_app();

    let response = send_json(
        &app,
        "POST",
        "/api/transactions",
        serde_json::json!({
            "kind": "transfer",
            "category": "misc",
            "amount": 5.0,
            "occurred_on": "2024-01-10"
        }),
    )
    .await;
    // Rejected during typed deserialization, before any store mutation
    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn test_delete_transaction() {
    let app = setup_test_app();

    let response = send_json(
        &app,
        "POST",
        "/api/transactions",
        serde_json::json!({
            "kind": "expense",
            "category": "food",
            "amount": 10.0,
            "occurred_on": "2024-01-10"
        }),
    )
    .await;
    let id = get_body_json(response).await["id"].as_i64().unwrap();

    let response = send_json(
        &app,
        "DELETE",
        &format!("/api/transactions/{}", id),
        serde_json::json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = send_get(&app, "/api/transactions").await;
    let json = get_body_json(response).await;
    assert!(json.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_delete_missing_transaction_is_404() {
    let app = setup_test_app();

    let response = send_json(
        &app,
        "DELETE",
        "/api/transactions/4242",
        serde_json::json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = get_body_json(response).await;
    assert_eq!(json["error"], "Transaction not found");
}

#[tokio::test]
async fn test_owner_scoping_via_query_param() {
    let app = setup_test_app();

    send_json(
        &app,
        "POST",
        "/api/transactions?owner=alice",
        serde_json::json!({
            "kind": "expense",
            "category": "food",
            "amount": 10.0,
            "occurred_on": "2024-01-10"
        }),
    )
    .await;

    let response = send_get(&app, "/api/transactions?owner=alice").await;
    assert_eq!(get_body_json(response).await.as_array().unwrap().len(), 1);

    // The default owner sees nothing of alice's ledger
    let response = send_get(&app, "/api/transactions").await;
    assert!(get_body_json(response).await.as_array().unwrap().is_empty());
}

// ========== Summary API ==========

#[tokio::test]
async fn test_summary_worked_scenario() {
    let app = setup_test_app();

    for (kind, category, amount, day) in [
        ("income", "salary", 1000.0, "2024-01-05"),
        ("expense", "food", 200.0, "2024-01-10"),
        ("expense", "food", 50.0, "2024-01-20"),
    ] {
        send_json(
            &app,
            "POST",
            "/api/transactions",
            serde_json::json!({
                "kind": kind,
                "category": category,
                "amount": amount,
                "occurred_on": day
            }),
        )
        .await;
    }

    let response = send_get(&app, "/api/summary").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["total_income"], 1000.0);
    assert_eq!(json["total_expenses"], 250.0);
    assert_eq!(json["net_balance"], 750.0);
    assert_eq!(json["savings_rate"], 75.0);
    assert_eq!(json["expenses_by_category"]["food"], 250.0);
}

#[tokio::test]
async fn test_summary_empty_ledger() {
    let app = setup_test_app();

    let response = send_get(&app, "/api/summary").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["total_income"], 0.0);
    assert_eq!(json["total_expenses"], 0.0);
    assert_eq!(json["net_balance"], 0.0);
    assert_eq!(json["savings_rate"], 0.0);
    assert!(json["expenses_by_category"].as_object().unwrap().is_empty());
}

// ========== Budget Goal API ==========

#[tokio::test]
async fn test_budget_goal_upsert_and_filter() {
    let app = setup_test_app();

    let response = send_json(
        &app,
        "POST",
        "/api/budget-goals",
        serde_json::json!({
            "category": "food",
            "amount": 300.0,
            "month": 1,
            "year": 2024
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    // Same key again with a new amount replaces, never duplicates
    send_json(
        &app,
        "POST",
        "/api/budget-goals",
        serde_json::json!({
            "category": "food",
            "amount": 450.0,
            "month": 1,
            "year": 2024
        }),
    )
    .await;

    send_json(
        &app,
        "POST",
        "/api/budget-goals",
        serde_json::json!({
            "category": "rent",
            "amount": 900.0,
            "month": 2,
            "year": 2024
        }),
    )
    .await;

    let response = send_get(&app, "/api/budget-goals?month=1&year=2024").await;
    let json = get_body_json(response).await;
    let goals = json.as_array().unwrap();
    assert_eq!(goals.len(), 1);
    assert_eq!(goals[0]["amount"], 450.0);

    // Month alone does not filter; both parts of the period are required
    let response = send_get(&app, "/api/budget-goals?month=1").await;
    assert_eq!(get_body_json(response).await.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_budget_goal_rejects_out_of_range_month() {
    let app = setup_test_app();

    let response = send_json(
        &app,
        "POST",
        "/api/budget-goals",
        serde_json::json!({
            "category": "food",
            "amount": 300.0,
            "month": 13,
            "year": 2024
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ========== Analytics API ==========

#[tokio::test]
async fn test_spending_trends_shape() {
    let app = setup_test_app();

    // Anchor relative to the real clock so the rows land inside the windows
    let yesterday = (Utc::now().date_naive() - Duration::days(1)).to_string();
    send_json(
        &app,
        "POST",
        "/api/transactions",
        serde_json::json!({
            "kind": "expense",
            "category": "food",
            "amount": 25.0,
            "occurred_on": yesterday
        }),
    )
    .await;

    let response = send_get(&app, "/api/analytics/spending-trends").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["monthly_trends"].as_array().unwrap().len(), 1);

    let category_trends = json["category_trends"].as_array().unwrap();
    assert_eq!(category_trends.len(), 1);
    assert_eq!(category_trends[0]["category"], "food");
    assert_eq!(category_trends[0]["total_amount"], 25.0);
    assert_eq!(category_trends[0]["transaction_count"], 1);

    assert_eq!(json["daily_patterns"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_budget_performance_scenarios() {
    let app = setup_test_app();

    send_json(
        &app,
        "POST",
        "/api/budget-goals",
        serde_json::json!({
            "category": "food",
            "amount": 300.0,
            "month": 1,
            "year": 2024
        }),
    )
    .await;
    send_json(
        &app,
        "POST",
        "/api/transactions",
        serde_json::json!({
            "kind": "expense",
            "category": "food",
            "amount": 250.0,
            "occurred_on": "2024-01-12"
        }),
    )
    .await;

    let response = send_get(&app, "/api/analytics/budget-performance?month=1&year=2024").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    let rows = json["budget_performance"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["budget"], 300.0);
    assert_eq!(rows[0]["actual"], 250.0);
    assert_eq!(rows[0]["difference"], 50.0);
    assert_eq!(rows[0]["status"], "within_budget");
    assert_eq!(json["overall_status"], "within_budget");

    // Push the category over its cap
    send_json(
        &app,
        "POST",
        "/api/transactions",
        serde_json::json!({
            "kind": "expense",
            "category": "food",
            "amount": 100.0,
            "occurred_on": "2024-01-20"
        }),
    )
    .await;

    let response = send_get(&app, "/api/analytics/budget-performance?month=1&year=2024").await;
    let json = get_body_json(response).await;
    let rows = json["budget_performance"].as_array().unwrap();
    assert_eq!(rows[0]["difference"], -50.0);
    assert_eq!(rows[0]["status"], "over_budget");
    assert_eq!(json["overall_status"], "over_budget");
}

#[tokio::test]
async fn test_budget_performance_rejects_bad_month() {
    let app = setup_test_app();

    let response = send_get(&app, "/api/analytics/budget-performance?month=13&year=2024").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ========== Advice API ==========

#[tokio::test]
async fn test_advice_with_mock_backend() {
    let app = setup_test_app_with_advice(AdviceClient::mock());

    let response = send_json(
        &app,
        "POST",
        "/api/advice",
        serde_json::json!({
            "transactions": [
                {"kind": "expense", "category": "food", "amount": 42.0}
            ],
            "budget_goals": {"food": 300.0},
            "user_context": "saving for a trip"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    let advice = json["advice"].as_str().unwrap();
    assert!(advice.contains("1 transactions"));
}

#[tokio::test]
async fn test_advice_unconfigured_is_503() {
    let app = setup_test_app();

    let response = send_json(
        &app,
        "POST",
        "/api/advice",
        serde_json::json!({"transactions": []}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_advice_failure_is_opaque_502() {
    let app = setup_test_app_with_advice(AdviceClient::Mock(MockBackend::unhealthy()));

    let response = send_json(
        &app,
        "POST",
        "/api/advice",
        serde_json::json!({"transactions": []}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    let json = get_body_json(response).await;
    assert_eq!(json["error"], "advice generation failed");
}
