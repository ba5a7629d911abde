//! Shared fixture for engine unit tests

use std::path::{Path, PathBuf};
use std::sync::Arc;

use fuelhub_core::{ResourceKind, ResourceRecord, Revision};
use fuelhub_repo::{
    MemoryBackend, RepoError, RepositoryFactory, RepositoryStore, Result as RepoResult, WalkEntry,
};
use tempfile::TempDir;

use crate::catalog::ResourceCatalog;
use crate::hub::Hub;
use crate::snapshot::Snapshot;

pub struct Fixture {
    pub temp: TempDir,
    pub backend: MemoryBackend,
    pub hub: Hub,
    pub catalog: ResourceCatalog,
    folders: usize,
}

impl Fixture {
    pub fn new() -> Self {
        let backend = MemoryBackend::new();
        Self::with_factory(backend.clone(), Arc::new(backend))
    }

    /// Fixture whose repositories fail `fault` for locations containing `marker`
    pub fn with_fault(fault: Fault, marker: &str) -> Self {
        let backend = MemoryBackend::new();
        let faulty = FaultyBackend {
            inner: backend.clone(),
            fault,
            marker: marker.to_string(),
        };
        Self::with_factory(backend, Arc::new(faulty))
    }

    fn with_factory(backend: MemoryBackend, factory: Arc<dyn RepositoryFactory>) -> Self {
        let temp = TempDir::new().unwrap();
        let hub = Hub::new(temp.path().join("resources"), factory);
        Self {
            temp,
            backend,
            hub,
            catalog: ResourceCatalog::open_memory().unwrap(),
            folders: 0,
        }
    }

    pub fn folder(&self, name: &str, files: &[(&str, &str)]) -> PathBuf {
        let dir = self.temp.path().join("sources").join(name);
        std::fs::create_dir_all(&dir).unwrap();
        for (rel, content) in files {
            let path = dir.join(rel);
            std::fs::create_dir_all(path.parent().unwrap()).unwrap();
            std::fs::write(path, content).unwrap();
        }
        dir
    }

    fn next_folder(&mut self, files: &[(&str, &str)]) -> PathBuf {
        self.folders += 1;
        self.folder(&format!("content-{}", self.folders), files)
    }

    /// Create a model owned by `alice`
    pub fn create(&mut self, files: &[(&str, &str)]) -> ResourceRecord {
        let source = self.next_folder(files);
        self.hub
            .create_resource(&mut self.catalog, "box", "alice", ResourceKind::Model, &source)
            .unwrap()
    }

    pub fn replace(&mut self, res: &ResourceRecord, files: &[(&str, &str)]) -> Snapshot {
        let source = self.next_folder(files);
        self.hub
            .replace_content(&mut self.catalog, res, ResourceKind::Model, &source, None)
            .unwrap()
    }

    /// Entries left in `<ResourceDir>/<owner>/models`
    pub fn entries_of(&self, owner: &str) -> Vec<String> {
        let dir = self.temp.path().join("resources").join(owner).join("models");
        match std::fs::read_dir(dir) {
            Ok(entries) => entries
                .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
                .collect(),
            Err(_) => Vec::new(),
        }
    }
}

/// Repository operation made to fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    Init,
    Tag,
}

struct FaultyBackend {
    inner: MemoryBackend,
    fault: Fault,
    marker: String,
}

impl RepositoryFactory for FaultyBackend {
    fn open(&self, location: &Path) -> Box<dyn RepositoryStore> {
        let armed = location.to_string_lossy().contains(&self.marker);
        Box::new(FaultyRepository {
            inner: self.inner.open(location),
            fault: armed.then_some(self.fault),
        })
    }
}

struct FaultyRepository {
    inner: Box<dyn RepositoryStore>,
    fault: Option<Fault>,
}

impl FaultyRepository {
    fn check(&self, op: Fault) -> RepoResult<()> {
        if self.fault == Some(op) {
            return Err(RepoError::Io(std::io::Error::other(format!(
                "{:?} failed",
                op
            ))));
        }
        Ok(())
    }
}

impl RepositoryStore for FaultyRepository {
    fn location(&self) -> &Path {
        self.inner.location()
    }

    fn init_repo(&self) -> RepoResult<()> {
        self.check(Fault::Init)?;
        self.inner.init_repo()
    }

    fn tag(&self, name: &str) -> RepoResult<()> {
        self.check(Fault::Tag)?;
        self.inner.tag(name)
    }

    fn has_tag(&self, name: &str) -> RepoResult<bool> {
        self.inner.has_tag(name)
    }

    fn revision_count(&self, rev: &Revision) -> RepoResult<u32> {
        self.inner.revision_count(rev)
    }

    fn walk(
        &self,
        rev: &Revision,
        include_folders: bool,
        visit: &mut dyn FnMut(&WalkEntry) -> RepoResult<()>,
    ) -> RepoResult<()> {
        self.inner.walk(rev, include_folders, visit)
    }

    fn zip(&self, rev: &Revision, output: Option<&Path>) -> RepoResult<PathBuf> {
        self.inner.zip(rev, output)
    }

    fn replace_files(&self, source: &Path, committer: Option<&str>) -> RepoResult<()> {
        self.inner.replace_files(source, committer)
    }

    fn get_file(&self, rev: &Revision, path: &str) -> RepoResult<Vec<u8>> {
        self.inner.get_file(rev, path)
    }

    fn clone_to(&self, target: &Path) -> RepoResult<()> {
        self.inner.clone_to(target)
    }
}
