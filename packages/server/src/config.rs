use std::path::PathBuf;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct CorsConfig {
    pub allow_origins: Vec<String>,
    pub max_age: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors: CorsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// Directory holding one JSON document per account.
    pub data_dir: PathBuf,
    /// Directory holding uploaded binary content blobs.
    pub blob_dir: PathBuf,
    /// Upper bound on a single uploaded blob, in bytes.
    pub max_blob_size: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CoordinatorConfig {
    /// How long a mutation may wait on an account's lock before failing
    /// with BUSY.
    pub lock_timeout_ms: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub coordinator: CoordinatorConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let s = Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("server.cors.allow_origins", Vec::<String>::new())?
            .set_default("server.cors.max_age", 3600)?
            .set_default("storage.data_dir", "./data/accounts")?
            .set_default("storage.blob_dir", "./data/blobs")?
            .set_default("storage.max_blob_size", 128 * 1024 * 1024i64)?
            .set_default("coordinator.lock_timeout_ms", 5000)?
            // Load from config/config.toml
            .add_source(File::with_name("config/config").required(false))
            // Override from environment (e.g., BERTH__SERVER__PORT)
            .add_source(Environment::with_prefix("BERTH").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
