use crate::error::{Result, SmileError};
use crate::model::DEFAULT_CATEGORY;
use crate::storage::BackendKind;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = ".smile.yml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SmileConfig {
    #[serde(default)]
    pub smile: SmileSettings,

    #[serde(default)]
    pub rest: RestSettings,

    #[serde(default)]
    pub document: DocumentConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmileSettings {
    /// Directory holding the key-value files, relative to the config file.
    #[serde(default = "default_path")]
    pub path: String,

    #[serde(default)]
    pub backend: BackendKind,

    #[serde(default = "default_category")]
    pub default_category: String,
}

fn default_path() -> String {
    ".mademesmile".to_string()
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

impl Default for SmileSettings {
    fn default() -> Self {
        Self {
            path: default_path(),
            backend: BackendKind::default(),
            default_category: default_category(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RestSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentConfig {
    #[serde(default = "default_document_url")]
    pub base_url: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,

    #[serde(default = "default_database")]
    pub database: String,
}

fn default_document_url() -> String {
    "https://firestore.googleapis.com/v1".to_string()
}

fn default_database() -> String {
    "(default)".to_string()
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            base_url: default_document_url(),
            project_id: None,
            database: default_database(),
        }
    }
}

impl SmileConfig {
    pub fn load(start_path: &Path) -> Result<(Self, PathBuf)> {
        let config_path = Self::find_config_file(start_path)?;
        let content = std::fs::read_to_string(&config_path)?;
        let config: SmileConfig = serde_yaml::from_str(&content)?;
        let project_root = config_path
            .parent()
            .ok_or_else(|| SmileError::Config("Config file has no parent directory".to_string()))?
            .to_path_buf();
        Ok((config, project_root))
    }

    pub fn find_config_file(start_path: &Path) -> Result<PathBuf> {
        let mut current = start_path.to_path_buf();
        loop {
            let config_path = current.join(CONFIG_FILE_NAME);
            if config_path.exists() {
                return Ok(config_path);
            }
            if !current.pop() {
                return Err(SmileError::NotInitialized);
            }
        }
    }

    pub fn data_path(&self, project_root: &Path) -> PathBuf {
        project_root.join(&self.smile.path)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
