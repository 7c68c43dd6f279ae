use std::sync::Arc;

use crate::auth::AuthManager;
use crate::config::Config;
use crate::services::Repository;

// Application state shared between handlers
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<dyn Repository>,
    pub auth: Arc<AuthManager>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(repo: Arc<dyn Repository>, auth: AuthManager, config: Config) -> Self {
        Self {
            repo,
            auth: Arc::new(auth),
            config: Arc::new(config),
        }
    }

    pub fn templates(&self) -> &str {
        &self.config.templates.dir
    }
}
