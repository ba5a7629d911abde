//! The engine entry point

use std::path::{Path, PathBuf};
use std::sync::Arc;

use fuelhub_core::{Layout, Resource};
use fuelhub_repo::{RepositoryFactory, RepositoryStore};

/// Versioning and snapshot engine over one resource root directory.
///
/// The repository backend is injected, so tests can swap in
/// [`fuelhub_repo::MemoryBackend`]. Resolver, snapshot, tree and lifecycle
/// operations are implemented as methods in their own modules.
#[derive(Clone)]
pub struct Hub {
    pub(crate) layout: Layout,
    pub(crate) backend: Arc<dyn RepositoryFactory>,
}

impl Hub {
    pub fn new(resource_dir: impl Into<PathBuf>, backend: Arc<dyn RepositoryFactory>) -> Self {
        Self {
            layout: Layout::new(resource_dir),
            backend,
        }
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Repository handle bound to a resource's location
    pub fn repository<R: Resource + ?Sized>(&self, res: &R) -> Box<dyn RepositoryStore> {
        self.backend.open(res.location())
    }

    pub(crate) fn open_at(&self, location: &Path) -> Box<dyn RepositoryStore> {
        self.backend.open(location)
    }
}

impl std::fmt::Debug for Hub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Hub").field("layout", &self.layout).finish_non_exhaustive()
    }
}
