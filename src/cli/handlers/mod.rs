mod auth;
mod categories;
mod create;
mod delete;
mod init;
mod list;
mod onboarding;
mod search;
mod show;
mod stats;
mod utils;

pub use auth::handle_auth;
pub use categories::handle_categories;
pub use create::{CreateParams, handle_create};
pub use delete::handle_delete;
pub use init::handle_init;
pub use list::handle_list;
pub use onboarding::handle_onboarding;
pub use search::handle_search;
pub use show::handle_show;
pub use stats::handle_stats;

use crate::api::ApiClient;
use crate::config::SmileConfig;
use crate::service::MomentService;
use crate::session::{Session, SessionStore};
use crate::storage::{FileKvStore, KeyValueStore, open_backend};
use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::Arc;

/// Common context passed to all command handlers
pub struct CommandContext {
    pub config: SmileConfig,
    pub root: PathBuf,
    pub sessions: SessionStore,
    pub service: MomentService,
}

impl CommandContext {
    /// `base_url` from the command line or environment wins over the config file.
    pub fn new(mut config: SmileConfig, root: PathBuf, base_url: Option<String>) -> Result<Self> {
        if let Some(url) = base_url.filter(|u| !u.trim().is_empty()) {
            config.rest.base_url = Some(url);
        }
        let kv: Arc<dyn KeyValueStore> = Arc::new(FileKvStore::new(config.data_path(&root)));
        let backend = open_backend(&config, kv.clone())
            .with_context(|| format!("Failed to open the {} backend", config.smile.backend))?;
        Ok(Self {
            sessions: SessionStore::new(kv),
            service: MomentService::new(backend),
            config,
            root,
        })
    }

    pub async fn session(&self) -> Result<Session> {
        Ok(self.sessions.session().await?)
    }

    pub fn api(&self) -> Result<ApiClient> {
        let base_url = self.config.rest.base_url.as_deref().unwrap_or_default();
        Ok(ApiClient::new(base_url)?)
    }
}
