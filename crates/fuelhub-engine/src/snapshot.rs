//! Zip snapshot cache
//!
//! Snapshots live in `<ResourceDir>/<owner>/<kind>/.zips` and are named
//! `<uuid>v<N>.zip` for every version, tip included. A version's content
//! never changes once committed, so an existing file is always reused.
//! Only content replacement forces the tip snapshot to be rewritten.

use std::fs::File;
use std::path::PathBuf;

use fuelhub_core::{Resource, ResourceKind};
use fuelhub_repo::RepositoryStore;
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::error::Result;
use crate::hub::Hub;
use crate::resolver::{ResolvedVersion, resolve_in};

/// A zip archive of a resource at one version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub path: PathBuf,
    pub version: u32,
    /// Archive size in bytes
    pub size: u64,
}

impl Snapshot {
    /// Hex-encoded SHA-256 of the archive
    pub fn sha256(&self) -> Result<String> {
        let mut file = File::open(&self.path)?;
        let mut hasher = Sha256::new();
        std::io::copy(&mut file, &mut hasher)?;
        Ok(hex::encode(hasher.finalize()))
    }
}

impl Hub {
    /// Snapshot of a resource at a client version, produced on first request
    pub fn get_zip<R: Resource + ?Sized>(
        &self,
        res: &R,
        kind: ResourceKind,
        version: &str,
    ) -> Result<Snapshot> {
        let repo = self.repository(res);
        let resolved = resolve_in(repo.as_ref(), res.uuid(), version)?;
        self.snapshot_at(repo.as_ref(), res, kind, &resolved, false)
    }

    /// Regenerate the tip snapshot unconditionally
    pub fn zip_tip<R: Resource + ?Sized>(&self, res: &R, kind: ResourceKind) -> Result<Snapshot> {
        let repo = self.repository(res);
        self.write_tip(repo.as_ref(), res, kind)
    }

    pub(crate) fn write_tip<R: Resource + ?Sized>(
        &self,
        repo: &dyn RepositoryStore,
        res: &R,
        kind: ResourceKind,
    ) -> Result<Snapshot> {
        let resolved = resolve_in(repo, res.uuid(), "")?;
        self.snapshot_at(repo, res, kind, &resolved, true)
    }

    fn snapshot_at<R: Resource + ?Sized>(
        &self,
        repo: &dyn RepositoryStore,
        res: &R,
        kind: ResourceKind,
        resolved: &ResolvedVersion,
        force: bool,
    ) -> Result<Snapshot> {
        std::fs::create_dir_all(self.layout.zips_dir(res.owner(), kind)?)?;
        let path = self
            .layout
            .zip_path(res.owner(), kind, res.uuid(), resolved.version)?;

        if !force && path.is_file() {
            debug!(path = %path.display(), version = resolved.version, "snapshot cache hit");
        } else {
            repo.zip(&resolved.revision, Some(&path))?;
            debug!(path = %path.display(), version = resolved.version, "snapshot written");
        }

        let size = std::fs::metadata(&path)?.len();
        Ok(Snapshot {
            path,
            version: resolved.version,
            size,
        })
    }
}
