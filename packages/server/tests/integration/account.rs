use serde_json::json;

use crate::common::{TestApp, routes};

#[tokio::test]
async fn create_account_returns_created() {
    let app = TestApp::spawn().await;

    let res = app.post(routes::ACCOUNTS, &json!({ "name": "123" })).await;
    assert_eq!(res.status, 201);
    assert_eq!(res.body["name"], "123");
    assert_eq!(res.body["solutions"], json!([]));
}

#[tokio::test]
async fn duplicate_account_conflicts() {
    let app = TestApp::spawn().await;

    app.post(routes::ACCOUNTS, &json!({ "name": "123" })).await;
    let res = app.post(routes::ACCOUNTS, &json!({ "name": "123" })).await;
    assert_eq!(res.status, 409);
    assert_eq!(res.code(), "DUPLICATE_NAME");
}

#[tokio::test]
async fn blank_account_name_rejected() {
    let app = TestApp::spawn().await;

    let res = app.post(routes::ACCOUNTS, &json!({ "name": "" })).await;
    assert_eq!(res.status, 400);
    assert_eq!(res.code(), "INVALID_REQUEST");
}

#[tokio::test]
async fn get_missing_account_is_not_found() {
    let app = TestApp::spawn().await;

    let res = app.get(&routes::account("ghost")).await;
    assert_eq!(res.status, 404);
    assert_eq!(res.code(), "NOT_FOUND");
}

#[tokio::test]
async fn get_account_includes_solutions() {
    let app = TestApp::spawn().await;
    app.seed_solution("123", "s1").await;

    let res = app.get(&routes::account("123")).await;
    assert_eq!(res.status, 200);
    assert_eq!(res.body["solutions"][0]["name"], "s1");
}

#[tokio::test]
async fn delete_account_removes_document() {
    let app = TestApp::spawn().await;
    app.seed_solution("123", "s1").await;

    let res = app.delete(&routes::account("123")).await;
    assert_eq!(res.status, 200);
    assert_eq!(res.body["warnings"], json!([]));

    let res = app.get(&routes::account("123")).await;
    assert_eq!(res.status, 404);
}
