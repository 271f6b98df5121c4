use async_trait::async_trait;

/// Photo file backend, addressed by the stored file name.
#[async_trait]
pub trait FileStorageInterface {
    /// Stores the bytes and returns the public url of the file.
    async fn save(&self, file_name: &str, bytes: Vec<u8>) -> Result<String, String>;
    async fn read(&self, file_name: &str) -> Result<Vec<u8>, String>;
    async fn remove(&self, file_name: &str) -> Result<(), String>;
}
