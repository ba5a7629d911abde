//! Resource capability and the record type that implements it

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::CoreError;

/// Capability surface of a file-based resource (model, world, ...)
///
/// The engine never owns resource records; it only reads the name, owner,
/// UUID and location, and rewrites owner/location when a resource is moved.
pub trait Resource {
    fn name(&self) -> &str;

    fn owner(&self) -> &str;

    fn set_owner(&mut self, owner: &str);

    /// Absolute path to the root of the resource repository
    fn location(&self) -> &Path;

    fn set_location(&mut self, location: PathBuf);

    /// Stable identifier, also used as the genesis tag name
    fn uuid(&self) -> &str;
}

/// Type of hosted resource. Selects the per-owner folder on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Model,
    World,
}

impl ResourceKind {
    /// Folder name under `<ResourceDir>/<owner>/`
    #[must_use]
    pub fn folder(&self) -> &'static str {
        match self {
            Self::Model => "models",
            Self::World => "worlds",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Model => write!(f, "model"),
            Self::World => write!(f, "world"),
        }
    }
}

impl FromStr for ResourceKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "model" | "models" => Ok(Self::Model),
            "world" | "worlds" => Ok(Self::World),
            other => Err(CoreError::invalid_value(
                "kind",
                format!("unknown resource kind '{}' (expected model or world)", other),
            )),
        }
    }
}

/// Resource metadata row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceRecord {
    pub uuid: String,
    pub name: String,
    pub owner: String,
    pub kind: ResourceKind,
    pub location: PathBuf,

    /// Size in bytes of the tip snapshot
    #[serde(default)]
    pub filesize: u64,

    pub created_at: DateTime<Utc>,

    /// Set when the record is soft-deleted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl ResourceRecord {
    pub fn new(
        uuid: impl Into<String>,
        name: impl Into<String>,
        owner: impl Into<String>,
        kind: ResourceKind,
        location: impl Into<PathBuf>,
    ) -> Self {
        Self {
            uuid: uuid.into(),
            name: name.into(),
            owner: owner.into(),
            kind,
            location: location.into(),
            filesize: 0,
            created_at: Utc::now(),
            deleted_at: None,
        }
    }

    #[must_use]
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

impl Resource for ResourceRecord {
    fn name(&self) -> &str {
        &self.name
    }

    fn owner(&self) -> &str {
        &self.owner
    }

    fn set_owner(&mut self, owner: &str) {
        self.owner = owner.to_string();
    }

    fn location(&self) -> &Path {
        &self.location
    }

    fn set_location(&mut self, location: PathBuf) {
        self.location = location;
    }

    fn uuid(&self) -> &str {
        &self.uuid
    }
}
