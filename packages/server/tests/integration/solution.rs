use serde_json::json;

use crate::common::{TestApp, routes};

/// Full lifecycle walk: create, start, refuse delete, stop, delete.
#[tokio::test]
async fn lifecycle_scenario() {
    let app = TestApp::spawn().await;

    let res = app.post(routes::ACCOUNTS, &json!({ "name": "123" })).await;
    assert_eq!(res.status, 201);

    let res = app
        .post(
            &routes::solutions("123"),
            &json!({ "name": "s1", "url": "/s1" }),
        )
        .await;
    assert_eq!(res.status, 201);
    assert_eq!(res.body["state"], "STOPPED");
    assert_eq!(res.body["binaries"]["status"], "UNAVAILABLE");
    assert_eq!(res.body["binaries"]["files"], json!([]));

    let res = app
        .put(&routes::state("123", "s1"), &json!({ "state": "STARTED" }))
        .await;
    assert_eq!(res.status, 200);
    assert_eq!(res.body["state"], "STARTED");

    let res = app.delete(&routes::solution("123", "s1")).await;
    assert_eq!(res.status, 409);
    assert_eq!(res.code(), "MUST_BE_STOPPED");

    let res = app
        .put(&routes::state("123", "s1"), &json!({ "state": "STOPPED" }))
        .await;
    assert_eq!(res.status, 200);

    let res = app.delete(&routes::solution("123", "s1")).await;
    assert_eq!(res.status, 200);
    assert_eq!(res.body["warnings"], json!([]));

    let res = app.get(&routes::solution("123", "s1")).await;
    assert_eq!(res.status, 404);
}

#[tokio::test]
async fn duplicate_solution_name_within_account_conflicts() {
    let app = TestApp::spawn().await;
    app.seed_solution("123", "s1").await;

    let res = app
        .post(
            &routes::solutions("123"),
            &json!({ "name": "s1", "url": "/other" }),
        )
        .await;
    assert_eq!(res.status, 409);
    assert_eq!(res.code(), "DUPLICATE_NAME");
}

#[tokio::test]
async fn same_solution_name_under_different_accounts_is_fine() {
    let app = TestApp::spawn().await;
    app.seed_solution("a", "s1").await;
    app.seed_solution("b", "s1").await;

    assert_eq!(app.get(&routes::solution("a", "s1")).await.status, 200);
    assert_eq!(app.get(&routes::solution("b", "s1")).await.status, 200);
}

#[tokio::test]
async fn whitespace_url_rejected() {
    let app = TestApp::spawn().await;
    app.post(routes::ACCOUNTS, &json!({ "name": "123" })).await;

    let res = app
        .post(
            &routes::solutions("123"),
            &json!({ "name": "s1", "url": "/bad url" }),
        )
        .await;
    assert_eq!(res.status, 400);
    assert_eq!(res.code(), "INVALID_URL");
}

#[tokio::test]
async fn list_solutions_keeps_insertion_order() {
    let app = TestApp::spawn().await;
    app.post(routes::ACCOUNTS, &json!({ "name": "123" })).await;
    for name in ["c", "a", "b"] {
        app.post(
            &routes::solutions("123"),
            &json!({ "name": name, "url": format!("/{name}") }),
        )
        .await;
    }

    let res = app.get(&routes::solutions("123")).await;
    assert_eq!(res.status, 200);
    assert_eq!(res.body["total"], 3);
    let names: Vec<_> = res.body["solutions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["c", "a", "b"]);
}

#[tokio::test]
async fn update_merges_whitelisted_fields() {
    let app = TestApp::spawn().await;
    app.seed_solution("123", "s1").await;

    let res = app
        .patch(
            &routes::solution("123", "s1"),
            &json!({ "runtimeName": "node", "runtimeVersion": "22" }),
        )
        .await;
    assert_eq!(res.status, 200);
    assert_eq!(res.body["runtimeName"], "node");
    assert_eq!(res.body["runtimeVersion"], "22");
    assert_eq!(res.body["url"], "/s1");
}

#[tokio::test]
async fn update_requires_stopped() {
    let app = TestApp::spawn().await;
    app.seed_solution("123", "s1").await;
    app.put(&routes::state("123", "s1"), &json!({ "state": "STARTED" }))
        .await;

    let res = app
        .patch(&routes::solution("123", "s1"), &json!({ "url": "/moved" }))
        .await;
    assert_eq!(res.status, 409);
    assert_eq!(res.code(), "MUST_BE_STOPPED");
}

#[tokio::test]
async fn empty_patch_rejected() {
    let app = TestApp::spawn().await;
    app.seed_solution("123", "s1").await;

    let res = app.patch(&routes::solution("123", "s1"), &json!({})).await;
    assert_eq!(res.status, 400);
    assert_eq!(res.code(), "INVALID_REQUEST");
}

#[tokio::test]
async fn unknown_patch_field_rejected() {
    let app = TestApp::spawn().await;
    app.seed_solution("123", "s1").await;

    let res = app
        .patch(
            &routes::solution("123", "s1"),
            &json!({ "state": "STARTED" }),
        )
        .await;
    assert_eq!(res.status, 400);
    assert_eq!(res.code(), "INVALID_REQUEST");
}

#[tokio::test]
async fn rename_onto_sibling_conflicts() {
    let app = TestApp::spawn().await;
    app.seed_solution("123", "s1").await;
    app.post(
        &routes::solutions("123"),
        &json!({ "name": "s2", "url": "/s2" }),
    )
    .await;

    let res = app
        .patch(&routes::solution("123", "s1"), &json!({ "name": "s2" }))
        .await;
    assert_eq!(res.status, 409);
    assert_eq!(res.code(), "DUPLICATE_NAME");
}

#[tokio::test]
async fn rename_then_old_name_is_gone() {
    let app = TestApp::spawn().await;
    app.seed_solution("123", "s1").await;

    let res = app
        .patch(&routes::solution("123", "s1"), &json!({ "name": "s2" }))
        .await;
    assert_eq!(res.status, 200);

    assert_eq!(app.get(&routes::solution("123", "s1")).await.status, 404);
    assert_eq!(app.get(&routes::solution("123", "s2")).await.status, 200);
}

#[tokio::test]
async fn transition_to_current_state_conflicts() {
    let app = TestApp::spawn().await;
    app.seed_solution("123", "s1").await;

    let res = app
        .put(&routes::state("123", "s1"), &json!({ "state": "STOPPED" }))
        .await;
    assert_eq!(res.status, 409);
    assert_eq!(res.code(), "ALREADY_IN_STATE");
}

#[tokio::test]
async fn invalid_target_state_rejected() {
    let app = TestApp::spawn().await;
    app.seed_solution("123", "s1").await;

    let res = app
        .put(&routes::state("123", "s1"), &json!({ "state": "PROCESSING" }))
        .await;
    assert_eq!(res.status, 400);
    assert_eq!(res.code(), "INVALID_REQUEST");
}

#[tokio::test]
async fn state_view_verbose_exposes_placeholder_collections() {
    let app = TestApp::spawn().await;
    app.seed_solution("123", "s1").await;

    let res = app.get(&routes::state("123", "s1")).await;
    assert_eq!(res.status, 200);
    assert_eq!(res.body["state"], "STOPPED");
    assert!(res.body.get("urls").is_none());

    let path = format!("{}?verbose=true", routes::state("123", "s1"));
    let res = app.get(&path).await;
    assert_eq!(res.status, 200);
    assert_eq!(res.body["urls"], json!([]));
    assert_eq!(res.body["processes"], json!([]));
}
