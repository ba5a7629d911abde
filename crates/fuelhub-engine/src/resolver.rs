//! Version resolution
//!
//! Client version numbers are never stored. They are recomputed from the
//! trunk history: the genesis tag (named after the resource UUID) marks
//! version 1, and every later trunk commit adds one.

use fuelhub_core::{Resource, Revision, VersionSpec};
use fuelhub_repo::RepositoryStore;
use tracing::debug;

use crate::error::{EngineError, Result};
use crate::hub::Hub;

/// A client version mapped onto repository history
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedVersion {
    pub revision: Revision,
    pub version: u32,
}

/// `count(tip) - count(genesis) + 1`
pub(crate) fn latest_in(repo: &dyn RepositoryStore, uuid: &str) -> Result<u32> {
    let total = repo.revision_count(&Revision::Tip).map_err(|e| {
        EngineError::unexpected(format!("counting trunk revisions failed: {}", e))
    })?;
    let genesis = repo.revision_count(&Revision::tag(uuid)).map_err(|e| {
        EngineError::unexpected(format!("counting revisions from tag '{}' failed: {}", uuid, e))
    })?;

    let latest = i64::from(total) - i64::from(genesis) + 1;
    u32::try_from(latest)
        .ok()
        .filter(|v| *v >= 1)
        .ok_or_else(|| {
            EngineError::unexpected(format!(
                "genesis tag '{}' is not on trunk ({} trunk revisions, {} from tag)",
                uuid, total, genesis
            ))
        })
}

pub(crate) fn resolve_in(
    repo: &dyn RepositoryStore,
    uuid: &str,
    version: &str,
) -> Result<ResolvedVersion> {
    let latest = latest_in(repo, uuid)?;

    let resolved = match VersionSpec::parse(version)? {
        VersionSpec::Tip => ResolvedVersion {
            revision: Revision::Tip,
            version: latest,
        },
        VersionSpec::Number(requested) => {
            let offset = latest
                .checked_sub(requested)
                .ok_or(EngineError::VersionNotFound { requested, latest })?;
            ResolvedVersion {
                revision: Revision::Behind(offset),
                version: requested,
            }
        }
    };

    debug!(uuid, version, latest, revision = %resolved.revision, "resolved version");
    Ok(resolved)
}

impl Hub {
    /// Most recent version number of a resource
    pub fn latest_version<R: Resource + ?Sized>(&self, res: &R) -> Result<u32> {
        latest_in(self.repository(res).as_ref(), res.uuid())
    }

    /// Map a client version string (`""`, `"tip"` or a positive number) to
    /// a revision and its version number
    pub fn resolve_version<R: Resource + ?Sized>(
        &self,
        res: &R,
        version: &str,
    ) -> Result<ResolvedVersion> {
        resolve_in(self.repository(res).as_ref(), res.uuid(), version)
    }

    /// Contents of one file at a version, with the resolved version number
    pub fn get_file<R: Resource + ?Sized>(
        &self,
        res: &R,
        path: &str,
        version: &str,
    ) -> Result<(Vec<u8>, u32)> {
        let repo = self.repository(res);
        let resolved = resolve_in(repo.as_ref(), res.uuid(), version)?;

        match repo.get_file(&resolved.revision, path) {
            Ok(content) => Ok((content, resolved.version)),
            Err(e) if e.is_not_found() => Err(EngineError::not_found(format!(
                "file '{}' at version {}",
                path, resolved.version
            ))),
            Err(e) => Err(e.into()),
        }
    }
}
