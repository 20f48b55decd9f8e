#[cfg(test)]
#[path = "storage_test.rs"]
mod tests;

use std::collections::BTreeMap;
use std::path;

use anyhow::Result;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::configuration::Config;
use crate::configuration::ConfigKey;

/// Key the session marker is stored under.
pub const AUTH_TOKEN_KEY: &str = "authToken";
/// Placeholder stored on login. It only gates the UI, it is not a credential.
pub const AUTH_TOKEN_VALUE: &str = "authenticated";

/// Small key/value file standing in for browser local storage.
pub struct Storage {
    pub file_path: path::PathBuf,
}

impl Default for Storage {
    fn default() -> Storage {
        return Storage::new(path::PathBuf::from(Config::get(ConfigKey::StorageFile)));
    }
}

impl Storage {
    pub fn new(file_path: path::PathBuf) -> Storage {
        return Storage { file_path };
    }

    fn tmp_path(&self) -> path::PathBuf {
        return self.file_path.with_extension("yaml.tmp");
    }

    async fn read(&self) -> Result<BTreeMap<String, String>> {
        if !self.file_path.exists() {
            return Ok(BTreeMap::new());
        }

        let payload = fs::read_to_string(&self.file_path).await?;
        if payload.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        let entries: BTreeMap<String, String> = serde_yaml::from_str(&payload)?;
        return Ok(entries);
    }

    async fn write(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.file_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).await?;
            }
        }

        // Written aside then renamed so a crash never leaves a truncated file.
        let payload = serde_yaml::to_string(entries)?;
        let tmp_path = self.tmp_path();
        let mut file = fs::File::create(&tmp_path).await?;
        file.write_all(payload.as_bytes()).await?;
        file.sync_all().await?;
        fs::rename(&tmp_path, &self.file_path).await?;

        return Ok(());
    }

    pub async fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self.read().await?;
        return Ok(entries.get(key).cloned());
    }

    pub async fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.read().await?;
        entries.insert(key.to_string(), value.to_string());
        self.write(&entries).await?;

        return Ok(());
    }

    pub async fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self.read().await?;
        if entries.remove(key).is_none() {
            return Ok(());
        }

        if entries.is_empty() {
            fs::remove_file(&self.file_path).await?;
            return Ok(());
        }

        self.write(&entries).await?;
        return Ok(());
    }

    pub async fn is_authenticated(&self) -> Result<bool> {
        return Ok(self.get(AUTH_TOKEN_KEY).await?.is_some());
    }

    pub async fn store_session_marker(&self) -> Result<()> {
        return self.set(AUTH_TOKEN_KEY, AUTH_TOKEN_VALUE).await;
    }

    pub async fn clear_session_marker(&self) -> Result<()> {
        return self.remove(AUTH_TOKEN_KEY).await;
    }
}
