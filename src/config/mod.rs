#[cfg(feature = "cli")]
pub mod cli;
pub mod settings;
pub mod toml_config;

use crate::core::Storage;
use crate::utils::error::Result;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }
}

impl Storage for LocalStorage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let full_path = Path::new(&self.base_path).join(path);
        let data = fs::read(full_path)?;
        Ok(data)
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = Path::new(&self.base_path).join(path);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(full_path, data)?;
        Ok(())
    }

    fn location(&self, path: &str) -> String {
        Path::new(&self.base_path).join(path).display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn writes_create_missing_directories() {
        let dir = TempDir::new().unwrap();
        let base = dir.path().join("nested").display().to_string();
        let storage = LocalStorage::new(base);

        storage.write_file("out.csv", b"control,status\n").await.unwrap();
        let data = storage.read_file("out.csv").await.unwrap();

        assert_eq!(data, b"control,status\n");
        assert!(storage.location("out.csv").ends_with("out.csv"));
    }
}
