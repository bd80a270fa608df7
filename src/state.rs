use std::sync::Arc;

use crate::config;
use crate::database::manager::DatabaseManager;
use crate::services::{BlogClient, HttpMailer, Mailer};

/// Shared handler dependencies, built once in main and cloned per request.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseManager>,
    pub mailer: Arc<dyn Mailer>,
    pub blog: Arc<BlogClient>,
}

impl AppState {
    pub fn new() -> Self {
        let cfg = config::config();
        Self {
            db: Arc::new(DatabaseManager::new()),
            mailer: Arc::new(HttpMailer::new(cfg.mail.clone())),
            blog: Arc::new(BlogClient::new(&cfg.site)),
        }
    }

    /// Override the delivery seam, used by tests to observe the side-channel.
    pub fn with_mailer(mut self, mailer: Arc<dyn Mailer>) -> Self {
        self.mailer = mailer;
        self
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
