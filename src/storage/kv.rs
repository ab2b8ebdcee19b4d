//! String key-value persistence, the device-local storage every backend
//! and the session layer sit on.

use crate::error::{Result, SmileError};
use async_trait::async_trait;
use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::NamedTempFile;

pub const MOMENTS_KEY: &str = "@mademesmile:moments";
pub const CATEGORIES_KEY: &str = "@mademesmile:categories";
pub const TOKEN_KEY: &str = "@mademesmile_token";
pub const USER_KEY: &str = "@mademesmile_user";
pub const ONBOARDING_KEY: &str = "@mademesmile_onboarding_completed";

#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;
    async fn set(&self, key: &str, value: &str) -> Result<()>;
    async fn remove(&self, key: &str) -> Result<()>;

    async fn remove_many(&self, keys: &[&str]) -> Result<()> {
        for key in keys {
            self.remove(key).await?;
        }
        Ok(())
    }
}

/// One file per key inside a directory. Writes replace the whole file atomically.
pub struct FileKvStore {
    dir: PathBuf,
}

impl FileKvStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", encode_key(key)))
    }
}

/// Form-urlencode the key so distinct keys map to distinct, portable file names.
fn encode_key(key: &str) -> String {
    url::form_urlencoded::byte_serialize(key.as_bytes()).collect()
}

fn atomic_write(target_path: &Path, content: &str) -> Result<()> {
    let target_dir = target_path
        .parent()
        .ok_or_else(|| SmileError::Storage("Target path has no parent directory".to_string()))?;
    std::fs::create_dir_all(target_dir)?;

    let mut temp_file = NamedTempFile::new_in(target_dir)
        .map_err(|e| SmileError::Storage(format!("Failed to create temp file: {}", e)))?;
    temp_file
        .write_all(content.as_bytes())
        .map_err(|e| SmileError::Storage(format!("Failed to write to temp file: {}", e)))?;
    temp_file
        .as_file()
        .sync_all()
        .map_err(|e| SmileError::Storage(format!("Failed to sync temp file: {}", e)))?;
    temp_file
        .persist(target_path)
        .map_err(|e| SmileError::Storage(format!("Failed to persist file: {}", e)))?;
    Ok(())
}

fn join_error(err: tokio::task::JoinError) -> SmileError {
    SmileError::Storage(format!("Storage task failed: {}", err))
}

#[async_trait]
impl KeyValueStore for FileKvStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        match tokio::fs::read_to_string(self.path_for(key)).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        tracing::trace!(key, bytes = value.len(), "Writing key");
        let path = self.path_for(key);
        let value = value.to_string();
        tokio::task::spawn_blocking(move || atomic_write(&path, &value))
            .await
            .map_err(join_error)?
    }

    async fn remove(&self, key: &str) -> Result<()> {
        match tokio::fs::remove_file(self.path_for(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Volatile store used by tests and throwaway sessions.
#[derive(Default)]
pub struct MemoryKvStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.entries
            .lock()
            .map_err(|_| SmileError::Storage("memory store poisoned".to_string()))
    }
}

#[async_trait]
impl KeyValueStore for MemoryKvStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries()?.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.entries()?.remove(key);
        Ok(())
    }
}
