//! Resource lifecycle: create, clone, replace content, remove, move
//!
//! A catalog row is written only once the repository, its genesis tag and
//! the first tip snapshot exist. Failures before that point remove the new
//! resource directory on a best-effort basis.

use std::path::{Path, PathBuf};

use fuelhub_core::{Resource, ResourceKind, ResourceRecord};
use fuelhub_repo::RepositoryStore;
use fuelhub_repo::fs::copy_tree;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::catalog::ResourceCatalog;
use crate::error::{EngineError, Result};
use crate::hub::Hub;
use crate::snapshot::Snapshot;

const THUMBNAILS_FOLDER: &str = "thumbnails";

impl Hub {
    /// Create a resource from the files in `source`
    #[instrument(skip(self, catalog), fields(uuid))]
    pub fn create_resource(
        &self,
        catalog: &mut ResourceCatalog,
        name: &str,
        owner: &str,
        kind: ResourceKind,
        source: &Path,
    ) -> Result<ResourceRecord> {
        if name.trim().is_empty() {
            return Err(EngineError::invalid_value("name", "must not be empty"));
        }
        if !source.is_dir() {
            return Err(EngineError::not_found(format!(
                "source folder '{}'",
                source.display()
            )));
        }

        let uuid = Uuid::new_v4().to_string();
        tracing::Span::current().record("uuid", uuid.as_str());
        let location = self.layout.resource_location(owner, kind, &uuid)?;
        let record = ResourceRecord::new(&uuid, name, owner, kind, &location);

        std::fs::create_dir_all(&location)?;
        let result = (|| -> Result<ResourceRecord> {
            copy_tree(source, &location)?;
            let repo = self.open_at(&location);
            repo.init_repo()?;
            repo.tag(&uuid)?;
            self.register(catalog, repo.as_ref(), record)
        })();

        if result.is_err() {
            discard(&location);
        }
        let record = result?;
        info!(location = %record.location.display(), "created resource");
        Ok(record)
    }

    /// Clone `source` (with its full history) into `new_owner`'s storage.
    ///
    /// The clone gets its own genesis tag, so its version numbering
    /// restarts at 1.
    #[instrument(skip(self, catalog, source), fields(source_uuid = %source.uuid, uuid))]
    pub fn clone_resource(
        &self,
        catalog: &mut ResourceCatalog,
        source: &ResourceRecord,
        new_owner: &str,
        new_name: &str,
    ) -> Result<ResourceRecord> {
        if new_name.trim().is_empty() {
            return Err(EngineError::invalid_value("name", "must not be empty"));
        }

        let uuid = Uuid::new_v4().to_string();
        tracing::Span::current().record("uuid", uuid.as_str());
        let location = self.layout.resource_location(new_owner, source.kind, &uuid)?;
        if let Some(parent) = location.parent() {
            std::fs::create_dir_all(parent)?;
        }

        self.repository(source).clone_to(&location)?;

        let record = ResourceRecord::new(&uuid, new_name, new_owner, source.kind, &location);
        let result = (|| -> Result<ResourceRecord> {
            let repo = self.open_at(&location);
            repo.tag(&uuid)?;
            self.register(catalog, repo.as_ref(), record)
        })();

        if result.is_err() {
            discard(&location);
        }
        let record = result?;
        info!(location = %record.location.display(), "cloned resource");
        Ok(record)
    }

    /// Write the tip snapshot, then insert the record with its size
    fn register(
        &self,
        catalog: &mut ResourceCatalog,
        repo: &dyn RepositoryStore,
        mut record: ResourceRecord,
    ) -> Result<ResourceRecord> {
        let snapshot = self.write_tip(repo, &record, record.kind)?;
        record.filesize = snapshot.size;
        if let Err(e) = catalog.insert(&record) {
            discard_snapshot(&snapshot.path);
            return Err(e);
        }
        Ok(record)
    }

    /// Replace every file of a resource with the contents of `folder` as
    /// one new version. The stored filesize changes only if both the commit
    /// and the new tip snapshot succeed.
    #[instrument(skip(self, catalog, res, folder), fields(uuid = %res.uuid()))]
    pub fn replace_content<R: Resource + ?Sized>(
        &self,
        catalog: &mut ResourceCatalog,
        res: &R,
        kind: ResourceKind,
        folder: &Path,
        committer: Option<&str>,
    ) -> Result<Snapshot> {
        let repo = self.repository(res);
        repo.replace_files(folder, committer)?;
        let snapshot = self.write_tip(repo.as_ref(), res, kind)?;

        if !catalog.update_filesize(res.uuid(), snapshot.size)? {
            warn!("no live catalog record to update");
        }
        info!(version = snapshot.version, size = snapshot.size, "replaced content");
        Ok(snapshot)
    }

    /// Soft delete. Repository files stay on disk.
    #[instrument(skip(self, catalog, res), fields(uuid = %res.uuid()))]
    pub fn remove<R: Resource + ?Sized>(
        &self,
        catalog: &mut ResourceCatalog,
        res: &R,
    ) -> Result<()> {
        if !catalog.soft_delete(res.uuid())? {
            return Err(EngineError::not_found(format!("resource '{}'", res.uuid())));
        }
        info!("removed resource");
        Ok(())
    }

    /// Move a resource into another owner's storage area.
    ///
    /// If the catalog cannot be updated the directory is moved back and
    /// `res` is left untouched.
    #[instrument(skip(self, catalog, res), fields(uuid = %res.uuid))]
    pub fn move_resource(
        &self,
        catalog: &mut ResourceCatalog,
        res: &mut ResourceRecord,
        dest_owner: &str,
    ) -> Result<()> {
        if res.owner == dest_owner {
            return Err(EngineError::invalid_value(
                "owner",
                "source and destination owners are the same",
            ));
        }

        let destination = self
            .layout
            .resource_location(dest_owner, res.kind, &res.uuid)?;
        if destination.exists() {
            return Err(EngineError::invalid_value(
                "owner",
                format!("'{}' already exists", destination.display()),
            ));
        }
        if let Some(parent) = destination.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::rename(&res.location, &destination)?;

        match catalog.update_location(&res.uuid, dest_owner, &destination) {
            Ok(true) => {}
            Ok(false) => warn!("no live catalog record to update"),
            Err(e) => {
                if let Err(undo) = std::fs::rename(&destination, &res.location) {
                    warn!(
                        path = %destination.display(),
                        error = %undo,
                        "failed to move resource back"
                    );
                }
                return Err(e);
            }
        }

        res.set_owner(dest_owner);
        res.set_location(destination);
        info!(location = %res.location.display(), "moved resource");
        Ok(())
    }

    /// Paths of files under the resource's `thumbnails/` folder, relative
    /// to the resource root
    pub fn thumbnails<R: Resource + ?Sized>(&self, res: &R) -> Result<Vec<String>> {
        let root = res.location();
        let pattern = format!(
            "{}/{}/*",
            glob::Pattern::escape(&root.to_string_lossy()),
            THUMBNAILS_FOLDER
        );

        let mut thumbnails = Vec::new();
        let paths = glob::glob(&pattern)
            .map_err(|e| EngineError::invalid_value("location", e.to_string()))?;
        for path in paths {
            let path: PathBuf = path.map_err(|e| EngineError::Io(e.into_error()))?;
            if !path.is_file() {
                continue;
            }
            if let Ok(relative) = path.strip_prefix(root) {
                thumbnails.push(relative.to_string_lossy().replace('\\', "/"));
            }
        }

        if thumbnails.is_empty() {
            return Err(EngineError::not_found(format!(
                "thumbnails for '{}'",
                res.uuid()
            )));
        }
        thumbnails.sort();
        Ok(thumbnails)
    }
}

fn discard(location: &Path) {
    if let Err(e) = std::fs::remove_dir_all(location) {
        warn!(path = %location.display(), error = %e, "failed to remove partial resource");
    }
}

fn discard_snapshot(path: &Path) {
    if let Err(e) = std::fs::remove_file(path) {
        warn!(path = %path.display(), error = %e, "failed to remove orphaned snapshot");
    }
}
