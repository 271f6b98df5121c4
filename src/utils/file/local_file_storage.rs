use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use crate::interfaces::file_storage::FileStorageInterface;

pub const UPLOADS_URL_PREFIX: &str = "/uploads";

/// Stores files flat in `uploads_dir`, served back under [`UPLOADS_URL_PREFIX`].
pub struct LocalFileStorage {
    uploads_dir: String,
}

impl LocalFileStorage {
    pub fn new(uploads_dir: String) -> Self {
        LocalFileStorage { uploads_dir }
    }

    fn full_path(&self, file_name: &str) -> PathBuf {
        Path::new(&self.uploads_dir).join(file_name)
    }
}

pub async fn ensure_dir_exists(dir_path: &Path) -> std::io::Result<()> {
    if !fs::try_exists(dir_path).await? {
        fs::create_dir_all(dir_path).await?;
    }
    Ok(())
}

#[async_trait]
impl FileStorageInterface for LocalFileStorage {
    async fn save(&self, file_name: &str, bytes: Vec<u8>) -> Result<String, String> {
        ensure_dir_exists(Path::new(&self.uploads_dir))
            .await
            .map_err(|e| e.to_string())?;
        fs::write(self.full_path(file_name), bytes)
            .await
            .map_err(|e| e.to_string())?;
        Ok(format!("{UPLOADS_URL_PREFIX}/{file_name}"))
    }

    async fn read(&self, file_name: &str) -> Result<Vec<u8>, String> {
        fs::read(self.full_path(file_name))
            .await
            .map_err(|e| e.to_string())
    }

    async fn remove(&self, file_name: &str) -> Result<(), String> {
        fs::remove_file(self.full_path(file_name))
            .await
            .map_err(|e| e.to_string())
    }
}
