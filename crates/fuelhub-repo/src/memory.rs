//! In-memory repository backend for testing
//!
//! History lives in process memory, keyed by repository location, so engine
//! code can be exercised without libgit2. Initial content and replacement
//! content are still read from real folders on disk.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use fuelhub_core::Revision;

use crate::archive::write_zip;
use crate::error::{RepoError, Result};
use crate::fs::{list_files, prune_empty_dirs};
use crate::store::{RepositoryFactory, RepositoryStore, WalkEntry};
use crate::walk::walk_paths;

#[derive(Debug, Clone)]
struct Snapshot {
    files: BTreeMap<String, Vec<u8>>,
    author: String,
}

#[derive(Debug, Clone, Default)]
struct RepoState {
    commits: Vec<Snapshot>,
    /// tag name -> commit index
    tags: HashMap<String, usize>,
}

impl RepoState {
    fn resolve(&self, rev: &Revision) -> Result<usize> {
        let not_found = || RepoError::RevisionNotFound {
            rev: rev.to_string(),
        };
        let tip = self.commits.len().checked_sub(1).ok_or_else(not_found)?;
        match rev {
            Revision::Tip => Ok(tip),
            Revision::Behind(n) => tip.checked_sub(*n as usize).ok_or_else(not_found),
            Revision::Tag(name) => self.tags.get(name).copied().ok_or_else(not_found),
        }
    }
}

type Store = Arc<RwLock<HashMap<PathBuf, RepoState>>>;

/// Counts of operations performed for testing assertions
#[derive(Debug, Default, Clone)]
pub struct OperationCounts {
    pub inits: usize,
    pub tags: usize,
    pub counts: usize,
    pub walks: usize,
    pub zips: usize,
    pub replaces: usize,
    pub file_reads: usize,
    pub clones: usize,
}

/// Factory for in-memory repositories sharing one store
#[derive(Clone, Default)]
pub struct MemoryBackend {
    store: Store,
    operations: Arc<RwLock<OperationCounts>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get operation counts for assertions
    pub fn operation_counts(&self) -> OperationCounts {
        read(&self.operations).clone()
    }

    /// Reset operation counts
    pub fn reset_counts(&self) {
        *write(&self.operations) = OperationCounts::default();
    }

    /// Number of initialized repositories
    pub fn repository_count(&self) -> usize {
        read(&self.store).len()
    }

    /// Commit author names of the repository at `location`, oldest first
    pub fn authors(&self, location: &Path) -> Vec<String> {
        read(&self.store)
            .get(location)
            .map(|s| s.commits.iter().map(|c| c.author.clone()).collect())
            .unwrap_or_default()
    }
}

impl RepositoryFactory for MemoryBackend {
    fn open(&self, location: &Path) -> Box<dyn RepositoryStore> {
        Box::new(MemoryRepository {
            path: location.to_path_buf(),
            store: Arc::clone(&self.store),
            operations: Arc::clone(&self.operations),
        })
    }
}

/// Handle onto one repository held by a [`MemoryBackend`]
pub struct MemoryRepository {
    path: PathBuf,
    store: Store,
    operations: Arc<RwLock<OperationCounts>>,
}

fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(|e| e.into_inner())
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(|e| e.into_inner())
}

fn read_folder(root: &Path) -> Result<BTreeMap<String, Vec<u8>>> {
    let mut files = BTreeMap::new();
    for file in list_files(root)? {
        let content = std::fs::read(root.join(&file))?;
        files.insert(file, content);
    }
    Ok(files)
}

impl MemoryRepository {
    fn record(&self, f: impl FnOnce(&mut OperationCounts)) {
        f(&mut write(&self.operations));
    }

    fn missing(&self) -> RepoError {
        RepoError::RepositoryMissing {
            path: self.path.display().to_string(),
        }
    }

    fn with_state<T>(&self, f: impl FnOnce(&RepoState) -> Result<T>) -> Result<T> {
        let store = read(&self.store);
        let state = store.get(&self.path).ok_or_else(|| self.missing())?;
        f(state)
    }

    fn snapshot(&self, rev: &Revision) -> Result<BTreeMap<String, Vec<u8>>> {
        self.with_state(|state| {
            let index = state.resolve(rev)?;
            Ok(state.commits[index].files.clone())
        })
    }
}

impl RepositoryStore for MemoryRepository {
    fn location(&self) -> &Path {
        &self.path
    }

    fn init_repo(&self) -> Result<()> {
        self.record(|ops| ops.inits += 1);
        if !self.path.is_dir() {
            return Err(self.missing());
        }
        let files = read_folder(&self.path)?;

        let mut store = write(&self.store);
        if store.contains_key(&self.path) {
            return Err(RepoError::AlreadyExists {
                path: self.path.display().to_string(),
            });
        }
        store.insert(
            self.path.clone(),
            RepoState {
                commits: vec![Snapshot {
                    files,
                    author: "fuelhub".to_string(),
                }],
                tags: HashMap::new(),
            },
        );
        Ok(())
    }

    fn tag(&self, name: &str) -> Result<()> {
        self.record(|ops| ops.tags += 1);
        let mut store = write(&self.store);
        let state = store.get_mut(&self.path).ok_or_else(|| self.missing())?;
        if state.tags.contains_key(name) {
            return Err(RepoError::TagExists {
                name: name.to_string(),
            });
        }
        let tip = state.resolve(&Revision::Tip)?;
        state.tags.insert(name.to_string(), tip);
        Ok(())
    }

    fn has_tag(&self, name: &str) -> Result<bool> {
        self.with_state(|state| Ok(state.tags.contains_key(name)))
    }

    fn revision_count(&self, rev: &Revision) -> Result<u32> {
        self.record(|ops| ops.counts += 1);
        self.with_state(|state| Ok(state.resolve(rev)? as u32 + 1))
    }

    fn walk(
        &self,
        rev: &Revision,
        include_folders: bool,
        visit: &mut dyn FnMut(&WalkEntry) -> Result<()>,
    ) -> Result<()> {
        self.record(|ops| ops.walks += 1);
        let files = self.snapshot(rev)?;
        walk_paths(files.keys().map(String::as_str), include_folders, visit)
    }

    fn zip(&self, rev: &Revision, output: Option<&Path>) -> Result<PathBuf> {
        self.record(|ops| ops.zips += 1);
        let files = self.snapshot(rev)?;
        let names: Vec<String> = files.keys().cloned().collect();
        write_zip(output, &names, |name| {
            files
                .get(name)
                .cloned()
                .ok_or_else(|| RepoError::FileNotFound {
                    path: name.to_string(),
                    rev: rev.to_string(),
                })
        })
    }

    fn replace_files(&self, source: &Path, committer: Option<&str>) -> Result<()> {
        self.record(|ops| ops.replaces += 1);
        let files = read_folder(source)?;
        let author = committer
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or("fuelhub")
            .to_string();

        let mut store = write(&self.store);
        let state = store.get_mut(&self.path).ok_or_else(|| self.missing())?;
        let tip = state.resolve(&Revision::Tip)?;

        // Checkout follows the new tip
        for old in state.commits[tip].files.keys() {
            let path = self.path.join(old);
            if path.exists() {
                std::fs::remove_file(&path)?;
            }
        }
        prune_empty_dirs(&self.path)?;
        for (file, content) in &files {
            let path = self.path.join(file);
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, content)?;
        }

        state.commits.push(Snapshot { files, author });
        Ok(())
    }

    fn get_file(&self, rev: &Revision, path: &str) -> Result<Vec<u8>> {
        self.record(|ops| ops.file_reads += 1);
        let files = self.snapshot(rev)?;
        files
            .get(path.trim_start_matches('/'))
            .cloned()
            .ok_or_else(|| RepoError::FileNotFound {
                path: path.to_string(),
                rev: rev.to_string(),
            })
    }

    fn clone_to(&self, target: &Path) -> Result<()> {
        self.record(|ops| ops.clones += 1);
        if target.exists() && std::fs::read_dir(target)?.next().is_some() {
            return Err(RepoError::AlreadyExists {
                path: target.display().to_string(),
            });
        }

        let state = self.with_state(|state| Ok(state.clone()))?;
        let tip = state.resolve(&Revision::Tip)?;

        // Materialize the checkout like a real clone would
        std::fs::create_dir_all(target)?;
        for (file, content) in &state.commits[tip].files {
            let path = target.join(file);
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, content)?;
        }

        write(&self.store).insert(target.to_path_buf(), state);
        Ok(())
    }
}
