//! On-disk layout of resource repositories and snapshot caches
//!
//! ```text
//! <ResourceDir>/<owner>/<kind>/<uuid>/...          repository working tree
//! <ResourceDir>/<owner>/<kind>/.zips/<uuid>v<N>.zip  snapshot of version N
//! ```

use std::path::{Path, PathBuf};

use crate::error::{CoreError, Result};
use crate::resource::ResourceKind;

/// Name of the per-owner, per-kind snapshot cache folder
pub const ZIPS_FOLDER: &str = ".zips";

/// Resolves resource and snapshot paths under a resource root directory
#[derive(Debug, Clone)]
pub struct Layout {
    resource_dir: PathBuf,
}

impl Layout {
    pub fn new(resource_dir: impl Into<PathBuf>) -> Self {
        Self {
            resource_dir: resource_dir.into(),
        }
    }

    pub fn resource_dir(&self) -> &Path {
        &self.resource_dir
    }

    /// `<ResourceDir>/<owner>/<kind>`
    pub fn kind_dir(&self, owner: &str, kind: ResourceKind) -> Result<PathBuf> {
        validate_segment("owner", owner)?;
        Ok(self.resource_dir.join(owner).join(kind.folder()))
    }

    /// Repository root for a new resource
    pub fn resource_location(
        &self,
        owner: &str,
        kind: ResourceKind,
        uuid: &str,
    ) -> Result<PathBuf> {
        validate_segment("uuid", uuid)?;
        Ok(self.kind_dir(owner, kind)?.join(uuid))
    }

    pub fn zips_dir(&self, owner: &str, kind: ResourceKind) -> Result<PathBuf> {
        Ok(self.kind_dir(owner, kind)?.join(ZIPS_FOLDER))
    }

    /// Snapshot path for a resolved version number.
    ///
    /// Every snapshot carries its version suffix, the tip included, so a
    /// file name always denotes one immutable version.
    pub fn zip_path(
        &self,
        owner: &str,
        kind: ResourceKind,
        uuid: &str,
        version: u32,
    ) -> Result<PathBuf> {
        Ok(self
            .zips_dir(owner, kind)?
            .join(zip_file_name(uuid, version)))
    }
}

/// `<uuid-with-spaces-as-underscores>v<version>.zip`
#[must_use]
pub fn zip_file_name(uuid: &str, version: u32) -> String {
    format!("{}v{}.zip", uuid.replace(' ', "_"), version)
}

fn validate_segment(field: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(CoreError::invalid_value(field, "must not be empty"));
    }
    if value == "." || value == ".." || value.contains('/') || value.contains('\\') {
        return Err(CoreError::invalid_value(
            field,
            format!("'{}' is not a valid path segment", value),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_location() {
        let layout = Layout::new("/srv/fuel");
        let loc = layout
            .resource_location("alice", ResourceKind::Model, "abc-123")
            .unwrap();
        assert_eq!(loc, PathBuf::from("/srv/fuel/alice/models/abc-123"));
    }

    #[test]
    fn test_zip_path_always_suffixed() {
        let layout = Layout::new("/srv/fuel");
        let path = layout
            .zip_path("alice", ResourceKind::World, "my uuid", 1)
            .unwrap();
        assert_eq!(path, PathBuf::from("/srv/fuel/alice/worlds/.zips/my_uuidv1.zip"));
    }

    #[test]
    fn test_rejects_path_traversal_owner() {
        let layout = Layout::new("/srv/fuel");
        assert!(layout.kind_dir("..", ResourceKind::Model).is_err());
        assert!(layout.kind_dir("a/b", ResourceKind::Model).is_err());
        assert!(layout.kind_dir("", ResourceKind::Model).is_err());
    }
}
