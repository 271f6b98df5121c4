use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use chrono::Duration;
use tracing::info;

use crate::config::AppConfig;
use crate::database::client::Database;
use crate::interfaces::file_storage::FileStorageInterface;
use crate::interfaces::tag_suggester::TagSuggesterInterface;
use crate::utils::ai::default_tag_suggester::DefaultTagSuggester;
use crate::utils::ai::gemini_tag_suggester::GeminiTagSuggester;
use crate::utils::file::local_file_storage::LocalFileStorage;
use crate::utils::jwt::JWT;

pub const JWT_KEY: &str = "access_token";

pub struct CtxState {
    pub db: Database,
    pub jwt: JWT,
    pub upload_dir: String,
    pub upload_max_size_mb: u64,
    pub frontend_url: Option<String>,
    pub file_storage: Arc<dyn FileStorageInterface + Send + Sync>,
    pub tag_suggester: Arc<dyn TagSuggesterInterface + Send + Sync>,
}

impl Debug for CtxState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CtxState")
            .field("upload_dir", &self.upload_dir)
            .field("upload_max_size_mb", &self.upload_max_size_mb)
            .field("frontend_url", &self.frontend_url)
            .finish_non_exhaustive()
    }
}

pub fn create_ctx_state(db: Database, config: &AppConfig) -> Arc<CtxState> {
    let tag_suggester: Arc<dyn TagSuggesterInterface + Send + Sync> =
        match config.google_api_key.as_ref() {
            Some(api_key) => {
                info!("->> tag suggestions by {}", config.gemini_model);
                Arc::new(GeminiTagSuggester::new(api_key, &config.gemini_model))
            }
            None => {
                info!("->> GOOGLE_API_KEY not set, using default tag suggestions");
                Arc::new(DefaultTagSuggester::new())
            }
        };

    let ctx_state = CtxState {
        db,
        jwt: JWT::new(
            config.jwt_secret.clone(),
            Duration::minutes(config.jwt_expire_minutes),
        ),
        upload_dir: config.upload_dir.clone(),
        upload_max_size_mb: config.upload_file_size_max_mb,
        frontend_url: config.frontend_url.clone(),
        file_storage: Arc::new(LocalFileStorage::new(config.upload_dir.clone())),
        tag_suggester,
    };
    Arc::new(ctx_state)
}
