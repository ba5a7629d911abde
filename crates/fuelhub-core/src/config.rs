//! Hub configuration
//!
//! Stored in `~/.config/fuelhub/config.yaml`

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{CoreError, Result};

/// Hub configuration file
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HubConfig {
    /// Root directory holding every owner's resources
    #[serde(default = "default_resource_dir")]
    pub resource_dir: PathBuf,

    /// SQLite database holding resource records
    #[serde(default = "default_catalog_path")]
    pub catalog_path: PathBuf,

    /// Identity used for commits without an explicit committer
    #[serde(default)]
    pub committer: CommitterIdentity,
}

/// Author/committer written into repository commits
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitterIdentity {
    pub name: String,
    pub email: String,
}

impl Default for CommitterIdentity {
    fn default() -> Self {
        Self {
            name: "fuelhub".to_string(),
            email: "fuelhub@localhost".to_string(),
        }
    }
}

fn data_root() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("fuelhub")
}

fn default_resource_dir() -> PathBuf {
    data_root().join("resources")
}

fn default_catalog_path() -> PathBuf {
    data_root().join("catalog.db")
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            resource_dir: default_resource_dir(),
            catalog_path: default_catalog_path(),
            committer: CommitterIdentity::default(),
        }
    }
}

impl HubConfig {
    /// Load configuration from default location
    pub fn load() -> Result<Self> {
        let path = Self::default_path()?;
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get default configuration path
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or_else(|| CoreError::Config {
            message: "Could not determine config directory".to_string(),
        })?;
        Ok(config_dir.join("fuelhub").join("config.yaml"))
    }

    fn validate(&self) -> Result<()> {
        if self.resource_dir.as_os_str().is_empty() {
            return Err(CoreError::Config {
                message: "resourceDir must not be empty".to_string(),
            });
        }
        if self.committer.name.trim().is_empty() {
            return Err(CoreError::Config {
                message: "committer.name must not be empty".to_string(),
            });
        }
        Ok(())
    }
}
