use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use common::storage::FilesystemBlobStore;
use tracing::{Level, info};

use server::config::AppConfig;
use server::directory::AccountDirectory;
use server::state::AppState;
use server::store::FilesystemAccountStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let config = AppConfig::load()?;

    let accounts = FilesystemAccountStore::new(config.storage.data_dir.clone()).await?;
    let blobs = FilesystemBlobStore::new(
        config.storage.blob_dir.clone(),
        config.storage.max_blob_size,
    )
    .await?;
    let directory = AccountDirectory::new(
        Arc::new(accounts),
        Arc::new(blobs),
        Duration::from_millis(config.coordinator.lock_timeout_ms),
    );

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    let state = AppState {
        directory: Arc::new(directory),
        config,
    };
    let app = server::build_router(state);

    info!("Server running at http://{addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
