use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use common::storage::FilesystemBlobStore;
use reqwest::Client;
use serde_json::Value;

use server::config::{AppConfig, CoordinatorConfig, CorsConfig, ServerConfig, StorageConfig};
use server::directory::AccountDirectory;
use server::state::AppState;
use server::store::FilesystemAccountStore;

pub mod routes {
    pub const ACCOUNTS: &str = "/api/v1/accounts";

    pub fn account(name: &str) -> String {
        format!("/api/v1/accounts/{name}")
    }

    pub fn solutions(account: &str) -> String {
        format!("/api/v1/accounts/{account}/solutions")
    }

    pub fn solution(account: &str, name: &str) -> String {
        format!("/api/v1/accounts/{account}/solutions/{name}")
    }

    pub fn state(account: &str, name: &str) -> String {
        format!("/api/v1/accounts/{account}/solutions/{name}/state")
    }

    pub fn binaries(account: &str, name: &str) -> String {
        format!("/api/v1/accounts/{account}/solutions/{name}/binaries")
    }

    pub fn binary_upload(account: &str, name: &str, token: &str) -> String {
        format!("/api/v1/accounts/{account}/solutions/{name}/binaries/{token}")
    }
}

/// A running test server over temp-dir-backed stores.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
    _data_dir: tempfile::TempDir,
}

/// Parsed HTTP response for test assertions.
pub struct TestResponse {
    pub status: u16,
    /// Parsed JSON body, or `Null` if the response is not valid JSON.
    pub body: Value,
}

impl TestResponse {
    async fn from_response(res: reqwest::Response) -> Self {
        let status = res.status().as_u16();
        let text = res.text().await.expect("Failed to read response body");
        let body = serde_json::from_str(&text).unwrap_or(Value::Null);
        Self { status, body }
    }

    pub fn code(&self) -> &str {
        self.body["code"].as_str().unwrap_or("")
    }
}

impl TestApp {
    pub async fn spawn() -> Self {
        let data_dir = tempfile::tempdir().expect("Failed to create temp dir");

        let config = AppConfig {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                cors: CorsConfig {
                    allow_origins: vec![],
                    max_age: 3600,
                },
            },
            storage: StorageConfig {
                data_dir: data_dir.path().join("accounts"),
                blob_dir: data_dir.path().join("blobs"),
                max_blob_size: 10 * 1024 * 1024,
            },
            coordinator: CoordinatorConfig {
                lock_timeout_ms: 1000,
            },
        };

        let accounts = FilesystemAccountStore::new(config.storage.data_dir.clone())
            .await
            .expect("Failed to create account store");
        let blobs = FilesystemBlobStore::new(
            config.storage.blob_dir.clone(),
            config.storage.max_blob_size,
        )
        .await
        .expect("Failed to create blob store");
        let directory = AccountDirectory::new(
            Arc::new(accounts),
            Arc::new(blobs),
            Duration::from_millis(config.coordinator.lock_timeout_ms),
        );

        let state = AppState {
            directory: Arc::new(directory),
            config,
        };
        let app = server::build_router(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            addr,
            client: Client::new(),
            _data_dir: data_dir,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub async fn post(&self, path: &str, body: &Value) -> TestResponse {
        let res = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .expect("Failed to send POST request");
        TestResponse::from_response(res).await
    }

    pub async fn get(&self, path: &str) -> TestResponse {
        let res = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("Failed to send GET request");
        TestResponse::from_response(res).await
    }

    pub async fn patch(&self, path: &str, body: &Value) -> TestResponse {
        let res = self
            .client
            .patch(self.url(path))
            .json(body)
            .send()
            .await
            .expect("Failed to send PATCH request");
        TestResponse::from_response(res).await
    }

    pub async fn put(&self, path: &str, body: &Value) -> TestResponse {
        let res = self
            .client
            .put(self.url(path))
            .json(body)
            .send()
            .await
            .expect("Failed to send PUT request");
        TestResponse::from_response(res).await
    }

    pub async fn put_bytes(&self, path: &str, body: Vec<u8>) -> TestResponse {
        let res = self
            .client
            .put(self.url(path))
            .header("Content-Type", "application/octet-stream")
            .body(body)
            .send()
            .await
            .expect("Failed to send PUT request");
        TestResponse::from_response(res).await
    }

    pub async fn delete(&self, path: &str) -> TestResponse {
        let res = self
            .client
            .delete(self.url(path))
            .send()
            .await
            .expect("Failed to send DELETE request");
        TestResponse::from_response(res).await
    }

    /// Create an account and a stopped solution inside it.
    pub async fn seed_solution(&self, account: &str, name: &str) {
        let res = self
            .post(routes::ACCOUNTS, &serde_json::json!({ "name": account }))
            .await;
        assert_eq!(res.status, 201, "seed account failed: {:?}", res.body);

        let res = self
            .post(
                &routes::solutions(account),
                &serde_json::json!({ "name": name, "url": format!("/{name}") }),
            )
            .await;
        assert_eq!(res.status, 201, "seed solution failed: {:?}", res.body);
    }
}
