use crate::config::Config;
use crate::store::MediaFileStore;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: MediaFileStore,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            store: MediaFileStore::new(config.db_path()),
            config: Arc::new(config),
        }
    }
}
