use std::sync::Arc;

use crate::config::AppConfig;
use crate::directory::AccountDirectory;

#[derive(Clone)]
pub struct AppState {
    pub directory: Arc<AccountDirectory>,
    pub config: AppConfig,
}
