use serde_json::{Value, json};

use crate::common::{TestApp, routes};

fn file_paths(body: &Value) -> Vec<&str> {
    body["files"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["path"].as_str().unwrap())
        .collect()
}

fn token_for<'a>(body: &'a Value, path: &str) -> &'a str {
    body["files"]
        .as_array()
        .unwrap()
        .iter()
        .find(|f| f["path"] == path)
        .and_then(|f| f["pathGuid"].as_str())
        .expect("file has no upload token")
}

#[tokio::test]
async fn register_then_replace_scenario() {
    let app = TestApp::spawn().await;
    app.seed_solution("123", "s1").await;

    let res = app
        .post(
            &routes::binaries("123", "s1"),
            &json!({ "files": [{ "path": "p1.zip" }, { "path": "p2.zip" }] }),
        )
        .await;
    assert_eq!(res.status, 201);
    assert_eq!(res.body["status"], "UPLOADING");
    assert_eq!(file_paths(&res.body), ["p1.zip", "p2.zip"]);
    for file in res.body["files"].as_array().unwrap() {
        assert_eq!(file["status"], "UNAVAILABLE");
        assert_eq!(file["pathGuid"].as_str().unwrap().len(), 36);
    }

    // A second create-mode registration must not clobber the first.
    let res = app
        .post(
            &routes::binaries("123", "s1"),
            &json!({ "files": [{ "path": "p9.zip" }] }),
        )
        .await;
    assert_eq!(res.status, 409);
    assert_eq!(res.code(), "ALREADY_REGISTERED");

    let res = app
        .put(
            &routes::binaries("123", "s1"),
            &json!({ "files": [{ "path": "p3.zip" }] }),
        )
        .await;
    assert_eq!(res.status, 200);
    assert_eq!(file_paths(&res.body), ["p3.zip"]);
}

#[tokio::test]
async fn upload_marks_file_available() {
    let app = TestApp::spawn().await;
    app.seed_solution("123", "s1").await;

    let res = app
        .post(
            &routes::binaries("123", "s1"),
            &json!({ "files": [{ "path": "app.zip" }], "totalSize": 7 }),
        )
        .await;
    assert_eq!(res.status, 201);
    let token = token_for(&res.body, "app.zip").to_string();

    let res = app
        .put_bytes(
            &routes::binary_upload("123", "s1", &token),
            b"xxxxxxx".to_vec(),
        )
        .await;
    assert_eq!(res.status, 200);
    assert_eq!(res.body["status"], "AVAILABLE");
    assert_eq!(res.body["size"], 7);
    assert_eq!(res.body["pathGuid"], Value::Null);
    assert_eq!(res.body["hash"].as_str().unwrap().len(), 64);

    // The only file is in, so the registry as a whole is served.
    let res = app.get(&routes::binaries("123", "s1")).await;
    assert_eq!(res.status, 200);
    assert_eq!(res.body["status"], "DEPLOYED");
}

#[tokio::test]
async fn upload_with_unknown_token_is_not_found() {
    let app = TestApp::spawn().await;
    app.seed_solution("123", "s1").await;
    app.post(
        &routes::binaries("123", "s1"),
        &json!({ "files": [{ "path": "app.zip" }] }),
    )
    .await;

    let res = app
        .put_bytes(
            &routes::binary_upload("123", "s1", "00000000-0000-0000-0000-000000000000"),
            b"data".to_vec(),
        )
        .await;
    assert_eq!(res.status, 404);
    assert_eq!(res.code(), "TOKEN_NOT_FOUND");
}

#[tokio::test]
async fn stale_token_is_rejected_after_replace() {
    let app = TestApp::spawn().await;
    app.seed_solution("123", "s1").await;

    let res = app
        .post(
            &routes::binaries("123", "s1"),
            &json!({ "files": [{ "path": "old.zip" }] }),
        )
        .await;
    let stale = token_for(&res.body, "old.zip").to_string();

    app.put(
        &routes::binaries("123", "s1"),
        &json!({ "files": [{ "path": "new.zip" }] }),
    )
    .await;

    let res = app
        .put_bytes(
            &routes::binary_upload("123", "s1", &stale),
            b"data".to_vec(),
        )
        .await;
    assert_eq!(res.status, 404);
    assert_eq!(res.code(), "TOKEN_NOT_FOUND");
}

#[tokio::test]
async fn empty_registration_is_rejected() {
    let app = TestApp::spawn().await;
    app.seed_solution("123", "s1").await;

    let res = app
        .post(&routes::binaries("123", "s1"), &json!({ "files": [] }))
        .await;
    assert_eq!(res.status, 400);
    assert_eq!(res.code(), "NO_FILES_SUPPLIED");
}

#[tokio::test]
async fn blank_path_is_rejected() {
    let app = TestApp::spawn().await;
    app.seed_solution("123", "s1").await;

    let res = app
        .post(
            &routes::binaries("123", "s1"),
            &json!({ "files": [{ "path": "ok.zip" }, { "path": "  " }] }),
        )
        .await;
    assert_eq!(res.status, 400);
    assert_eq!(res.code(), "MISSING_PATH");

    let res = app
        .post(&routes::binaries("123", "s1"), &json!({ "files": [{}] }))
        .await;
    assert_eq!(res.status, 400);
    assert_eq!(res.code(), "MISSING_PATH");
}

#[tokio::test]
async fn duplicate_paths_in_one_registration_rejected() {
    let app = TestApp::spawn().await;
    app.seed_solution("123", "s1").await;

    let res = app
        .post(
            &routes::binaries("123", "s1"),
            &json!({ "files": [{ "path": "p1.zip" }, { "path": "p1.zip" }] }),
        )
        .await;
    assert_eq!(res.status, 400);
    assert_eq!(res.code(), "INVALID_REQUEST");

    let res = app.get(&routes::binaries("123", "s1")).await;
    assert_eq!(res.body["files"], json!([]));
}

#[tokio::test]
async fn oversized_upload_rejected_with_structured_error() {
    let app = TestApp::spawn().await;
    app.seed_solution("123", "s1").await;

    let res = app
        .post(
            &routes::binaries("123", "s1"),
            &json!({ "files": [{ "path": "big.zip" }] }),
        )
        .await;
    let token = token_for(&res.body, "big.zip").to_string();

    // One byte past the 10 MB blob limit the harness configures.
    let res = app
        .put_bytes(
            &routes::binary_upload("123", "s1", &token),
            vec![0u8; 10 * 1024 * 1024 + 1],
        )
        .await;
    assert_eq!(res.status, 400);
    assert_eq!(res.code(), "INVALID_REQUEST");

    // The file is still awaiting its content.
    let res = app.get(&routes::binaries("123", "s1")).await;
    assert_eq!(res.body["files"][0]["status"], "UNAVAILABLE");
}

#[tokio::test]
async fn get_binaries_on_fresh_solution_is_empty() {
    let app = TestApp::spawn().await;
    app.seed_solution("123", "s1").await;

    let res = app.get(&routes::binaries("123", "s1")).await;
    assert_eq!(res.status, 200);
    assert_eq!(res.body["status"], "UNAVAILABLE");
    assert_eq!(res.body["totalSize"], 0);
    assert_eq!(res.body["files"], json!([]));
}

#[tokio::test]
async fn replace_keeps_paths_but_rotates_tokens() {
    let app = TestApp::spawn().await;
    app.seed_solution("123", "s1").await;

    let res = app
        .post(
            &routes::binaries("123", "s1"),
            &json!({ "files": [{ "path": "app.zip" }] }),
        )
        .await;
    let first = token_for(&res.body, "app.zip").to_string();

    let res = app
        .put(
            &routes::binaries("123", "s1"),
            &json!({ "files": [{ "path": "app.zip" }] }),
        )
        .await;
    assert_eq!(res.status, 200);
    let second = token_for(&res.body, "app.zip");
    assert_ne!(first, second);
}

#[tokio::test]
async fn binaries_of_missing_solution_are_not_found() {
    let app = TestApp::spawn().await;
    app.post(routes::ACCOUNTS, &json!({ "name": "123" })).await;

    let res = app.get(&routes::binaries("123", "ghost")).await;
    assert_eq!(res.status, 404);
    assert_eq!(res.code(), "NOT_FOUND");
}
