//! Repository store capability
//!
//! Every backend exposes the same synchronous interface. A store handle is
//! bound to one on-disk location; several handles may point at the same
//! repository. Writers must be serialized per repository by the caller.

use std::path::{Path, PathBuf};

use fuelhub_core::Revision;

use crate::error::Result;

/// One node visited by [`RepositoryStore::walk`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkEntry {
    /// `/`-prefixed path from the repository root
    pub path: String,
    /// `/`-prefixed path of the containing folder (`/` for top-level nodes)
    pub parent: String,
    pub is_dir: bool,
}

/// Versioned repository rooted at a resource location
pub trait RepositoryStore: Send + Sync {
    /// Repository root
    fn location(&self) -> &Path;

    /// Create the repository and commit every file already on disk.
    ///
    /// The location must exist.
    fn init_repo(&self) -> Result<()>;

    /// Create an annotated tag pointing at the current trunk tip
    fn tag(&self, name: &str) -> Result<()>;

    /// Check whether a tag exists
    fn has_tag(&self, name: &str) -> Result<bool>;

    /// Number of commits reachable from `rev`
    fn revision_count(&self, rev: &Revision) -> Result<u32>;

    /// Visit every file (and folder, when `include_folders` is set) at `rev`.
    ///
    /// Folders are visited exactly once and always before any of their
    /// descendants. VCS-internal entries are skipped.
    fn walk(
        &self,
        rev: &Revision,
        include_folders: bool,
        visit: &mut dyn FnMut(&WalkEntry) -> Result<()>,
    ) -> Result<()>;

    /// Write the tree at `rev` as a zip archive.
    ///
    /// Without an output path a file in the system temp directory is used.
    /// Returns the path written.
    fn zip(&self, rev: &Revision, output: Option<&Path>) -> Result<PathBuf>;

    /// Make the trunk tree equal to the contents of `source` as exactly one
    /// new commit, authored by `committer` or the default identity.
    fn replace_files(&self, source: &Path, committer: Option<&str>) -> Result<()>;

    /// Raw bytes of one file at `rev`
    fn get_file(&self, rev: &Revision, path: &str) -> Result<Vec<u8>>;

    /// Local clone of the full history into `target`
    fn clone_to(&self, target: &Path) -> Result<()>;

    /// Collect the walk into a vector
    fn entries(&self, rev: &Revision, include_folders: bool) -> Result<Vec<WalkEntry>> {
        let mut entries = Vec::new();
        self.walk(rev, include_folders, &mut |entry| {
            entries.push(entry.clone());
            Ok(())
        })?;
        Ok(entries)
    }
}

/// Opens repository store handles for resource locations
pub trait RepositoryFactory: Send + Sync {
    fn open(&self, location: &Path) -> Box<dyn RepositoryStore>;
}
