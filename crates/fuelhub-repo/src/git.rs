//! Git backend built on libgit2
//!
//! Each resource repository has a single linear trunk (`master`). The
//! backend opens the underlying repository per operation, so a handle is
//! cheap to create and safe to share between threads.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use fuelhub_core::{CommitterIdentity, Revision};
use git2::build::RepoBuilder;
use git2::{
    Commit, ErrorCode, IndexAddOption, ObjectType, Oid, Repository, RepositoryInitOptions,
    Signature, TreeWalkMode, TreeWalkResult,
};
use tracing::{debug, info};

use crate::archive::write_zip;
use crate::error::{RepoError, Result};
use crate::fs::{copy_files, list_files, prune_empty_dirs};
use crate::store::{RepositoryFactory, RepositoryStore, WalkEntry};
use crate::walk::{is_internal, walk_paths};

/// Name of the trunk branch
pub const TRUNK: &str = "master";

const INIT_MESSAGE: &str = "Created repository";
const REPLACE_MESSAGE: &str = "ReplaceFiles - new version";
const TAG_MESSAGE: &str = "fuelhub version tag";

/// Opens [`GitRepository`] handles
#[derive(Debug, Clone, Default)]
pub struct GitBackend {
    identity: CommitterIdentity,
}

impl GitBackend {
    pub fn new(identity: CommitterIdentity) -> Self {
        Self { identity }
    }
}

impl RepositoryFactory for GitBackend {
    fn open(&self, location: &Path) -> Box<dyn RepositoryStore> {
        Box::new(GitRepository::new(location, self.identity.clone()))
    }
}

/// A resource repository on local disk
#[derive(Debug, Clone)]
pub struct GitRepository {
    path: PathBuf,
    identity: CommitterIdentity,
}

impl GitRepository {
    pub fn new(path: impl Into<PathBuf>, identity: CommitterIdentity) -> Self {
        Self {
            path: path.into(),
            identity,
        }
    }

    fn ensure_folder(&self) -> Result<()> {
        if self.path.is_dir() {
            Ok(())
        } else {
            Err(RepoError::RepositoryMissing {
                path: self.path.display().to_string(),
            })
        }
    }

    fn open_repo(&self) -> Result<Repository> {
        self.ensure_folder()?;
        Repository::open(&self.path).map_err(|e| match e.code() {
            ErrorCode::NotFound => RepoError::RepositoryMissing {
                path: self.path.display().to_string(),
            },
            _ => RepoError::Git(e),
        })
    }

    fn signature(&self, committer: Option<&str>) -> Result<Signature<'static>> {
        let name = committer
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or(&self.identity.name);
        Ok(Signature::now(name, &self.identity.email)?)
    }

    fn resolve_commit<'r>(&self, repo: &'r Repository, rev: &Revision) -> Result<Commit<'r>> {
        let spec = match rev {
            Revision::Tip => TRUNK.to_string(),
            Revision::Behind(n) => format!("{}~{}", TRUNK, n),
            Revision::Tag(name) => format!("refs/tags/{}", name),
        };
        let object = repo.revparse_single(&spec).map_err(|e| match e.code() {
            ErrorCode::NotFound | ErrorCode::InvalidSpec | ErrorCode::Ambiguous => {
                RepoError::RevisionNotFound {
                    rev: rev.to_string(),
                }
            }
            _ => RepoError::Git(e),
        })?;
        Ok(object.peel_to_commit()?)
    }

    fn has_tag_in(repo: &Repository, name: &str) -> Result<bool> {
        match repo.find_reference(&format!("refs/tags/{}", name)) {
            Ok(_) => Ok(true),
            Err(e) if e.code() == ErrorCode::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

/// Blob paths and ids of a commit's tree, sorted by path
fn tree_files(commit: &Commit<'_>) -> Result<Vec<(String, Oid)>> {
    let tree = commit.tree()?;
    let mut files = Vec::new();
    tree.walk(TreeWalkMode::PreOrder, |root, entry| {
        if entry.kind() == Some(ObjectType::Blob) {
            if let Some(name) = entry.name() {
                files.push((format!("{}{}", root, name), entry.id()));
            }
        }
        TreeWalkResult::Ok
    })?;
    files.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(files)
}

impl RepositoryStore for GitRepository {
    fn location(&self) -> &Path {
        &self.path
    }

    fn init_repo(&self) -> Result<()> {
        self.ensure_folder()?;
        if Repository::open(&self.path).is_ok() {
            return Err(RepoError::AlreadyExists {
                path: self.path.display().to_string(),
            });
        }

        let mut opts = RepositoryInitOptions::new();
        opts.initial_head(TRUNK).mkpath(false).no_reinit(true);
        let repo = Repository::init_opts(&self.path, &opts)?;

        let mut index = repo.index()?;
        index.add_all(["*"].iter(), IndexAddOption::DEFAULT, None)?;
        index.write()?;
        let tree = repo.find_tree(index.write_tree()?)?;

        let signature = self.signature(None)?;
        repo.commit(Some("HEAD"), &signature, &signature, INIT_MESSAGE, &tree, &[])?;

        info!(path = %self.path.display(), files = index.len(), "initialized repository");
        Ok(())
    }

    fn tag(&self, name: &str) -> Result<()> {
        let repo = self.open_repo()?;
        if Self::has_tag_in(&repo, name)? {
            return Err(RepoError::TagExists {
                name: name.to_string(),
            });
        }

        let head = self.resolve_commit(&repo, &Revision::Tip)?;
        let signature = self.signature(None)?;
        repo.tag(name, head.as_object(), &signature, TAG_MESSAGE, false)?;

        debug!(path = %self.path.display(), tag = name, commit = %head.id(), "tagged trunk tip");
        Ok(())
    }

    fn has_tag(&self, name: &str) -> Result<bool> {
        let repo = self.open_repo()?;
        Self::has_tag_in(&repo, name)
    }

    fn revision_count(&self, rev: &Revision) -> Result<u32> {
        let repo = self.open_repo()?;
        let commit = self.resolve_commit(&repo, rev)?;

        let mut walk = repo.revwalk()?;
        walk.push(commit.id())?;
        let mut count = 0u32;
        for oid in walk {
            oid?;
            count += 1;
        }
        Ok(count)
    }

    fn walk(
        &self,
        rev: &Revision,
        include_folders: bool,
        visit: &mut dyn FnMut(&WalkEntry) -> Result<()>,
    ) -> Result<()> {
        let repo = self.open_repo()?;
        let commit = self.resolve_commit(&repo, rev)?;
        let files = tree_files(&commit)?;
        walk_paths(files.iter().map(|(p, _)| p.as_str()), include_folders, visit)
    }

    fn zip(&self, rev: &Revision, output: Option<&Path>) -> Result<PathBuf> {
        let repo = self.open_repo()?;
        let commit = self.resolve_commit(&repo, rev)?;
        let files = tree_files(&commit)?;

        let names: Vec<String> = files.iter().map(|(p, _)| p.clone()).collect();
        let blobs: HashMap<String, Oid> = files.into_iter().collect();

        let path = write_zip(output, &names, |name| {
            let oid = blobs.get(name).ok_or_else(|| RepoError::FileNotFound {
                path: name.to_string(),
                rev: rev.to_string(),
            })?;
            Ok(repo.find_blob(*oid)?.content().to_vec())
        })?;

        debug!(path = %path.display(), rev = %rev, "wrote zip snapshot");
        Ok(path)
    }

    fn replace_files(&self, source: &Path, committer: Option<&str>) -> Result<()> {
        let repo = self.open_repo()?;
        // Nothing in the worktree changes until the source has been listed
        let incoming = list_files(source)?;
        let parent = self.resolve_commit(&repo, &Revision::Tip)?;
        let mut index = repo.index()?;

        // Drop every tracked file except VCS bookkeeping
        let tracked: Vec<String> = index
            .iter()
            .map(|e| String::from_utf8_lossy(&e.path).into_owned())
            .filter(|p| !is_internal(p))
            .collect();
        for path in &tracked {
            let full = self.path.join(path);
            if full.exists() {
                std::fs::remove_file(&full)?;
            }
            index.remove_path(Path::new(path))?;
        }
        prune_empty_dirs(&self.path)?;

        copy_files(source, &self.path, &incoming)?;
        for file in &incoming {
            index.add_path(Path::new(file))?;
        }
        index.write()?;
        let tree = repo.find_tree(index.write_tree()?)?;

        let signature = self.signature(committer)?;
        let commit = repo.commit(
            Some("HEAD"),
            &signature,
            &signature,
            REPLACE_MESSAGE,
            &tree,
            &[&parent],
        )?;

        info!(
            path = %self.path.display(),
            removed = tracked.len(),
            added = incoming.len(),
            commit = %commit,
            "replaced repository files"
        );
        Ok(())
    }

    fn get_file(&self, rev: &Revision, path: &str) -> Result<Vec<u8>> {
        let repo = self.open_repo()?;
        let commit = self.resolve_commit(&repo, rev)?;
        let tree = commit.tree()?;

        let not_found = || RepoError::FileNotFound {
            path: path.to_string(),
            rev: rev.to_string(),
        };
        let relative = path.trim_start_matches('/');
        if relative.is_empty() || is_internal(relative) {
            return Err(not_found());
        }

        let entry = tree.get_path(Path::new(relative)).map_err(|e| match e.code() {
            ErrorCode::NotFound => not_found(),
            _ => RepoError::Git(e),
        })?;
        let object = entry.to_object(&repo)?;
        let blob = object.as_blob().ok_or_else(not_found)?;
        Ok(blob.content().to_vec())
    }

    fn clone_to(&self, target: &Path) -> Result<()> {
        self.ensure_folder()?;
        if target.exists() && std::fs::read_dir(target)?.next().is_some() {
            return Err(RepoError::AlreadyExists {
                path: target.display().to_string(),
            });
        }
        let source = self.path.to_str().ok_or_else(|| RepoError::RepositoryMissing {
            path: self.path.display().to_string(),
        })?;

        RepoBuilder::new().clone(source, target)?;

        info!(source = %self.path.display(), target = %target.display(), "cloned repository");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::{list_entries, read_entry};
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    fn init_with(temp: &TempDir, files: &[(&str, &str)]) -> GitRepository {
        let root = temp.path().join("repo");
        std::fs::create_dir_all(&root).unwrap();
        for (rel, content) in files {
            write(&root, rel, content);
        }
        let repo = GitRepository::new(&root, CommitterIdentity::default());
        repo.init_repo().unwrap();
        repo
    }

    fn source_with(temp: &TempDir, name: &str, files: &[(&str, &str)]) -> PathBuf {
        let dir = temp.path().join(name);
        std::fs::create_dir_all(&dir).unwrap();
        for (rel, content) in files {
            write(&dir, rel, content);
        }
        dir
    }

    #[test]
    fn test_init_commits_existing_files() {
        let temp = TempDir::new().unwrap();
        let repo = init_with(&temp, &[("a.txt", "A"), ("meshes/box.dae", "mesh")]);

        assert_eq!(repo.revision_count(&Revision::Tip).unwrap(), 1);
        assert_eq!(repo.get_file(&Revision::Tip, "/a.txt").unwrap(), b"A");
        assert_eq!(repo.get_file(&Revision::Tip, "meshes/box.dae").unwrap(), b"mesh");
    }

    #[test]
    fn test_init_missing_folder_fails() {
        let temp = TempDir::new().unwrap();
        let repo = GitRepository::new(temp.path().join("absent"), CommitterIdentity::default());
        assert!(matches!(
            repo.init_repo(),
            Err(RepoError::RepositoryMissing { .. })
        ));
    }

    #[test]
    fn test_init_twice_fails() {
        let temp = TempDir::new().unwrap();
        let repo = init_with(&temp, &[("a.txt", "A")]);
        assert!(matches!(repo.init_repo(), Err(RepoError::AlreadyExists { .. })));
    }

    #[test]
    fn test_tag_and_count() {
        let temp = TempDir::new().unwrap();
        let repo = init_with(&temp, &[("a.txt", "A")]);

        assert!(!repo.has_tag("genesis").unwrap());
        repo.tag("genesis").unwrap();
        assert!(repo.has_tag("genesis").unwrap());
        assert!(matches!(repo.tag("genesis"), Err(RepoError::TagExists { .. })));

        let src = source_with(&temp, "v2", &[("b.txt", "B")]);
        repo.replace_files(&src, Some("alice")).unwrap();

        assert_eq!(repo.revision_count(&Revision::Tip).unwrap(), 2);
        assert_eq!(repo.revision_count(&Revision::tag("genesis")).unwrap(), 1);
        assert_eq!(repo.revision_count(&Revision::Behind(1)).unwrap(), 1);
    }

    #[test]
    fn test_unknown_revision() {
        let temp = TempDir::new().unwrap();
        let repo = init_with(&temp, &[("a.txt", "A")]);

        assert!(matches!(
            repo.revision_count(&Revision::tag("missing")),
            Err(RepoError::RevisionNotFound { .. })
        ));
        assert!(matches!(
            repo.revision_count(&Revision::Behind(5)),
            Err(RepoError::RevisionNotFound { .. })
        ));
    }

    #[test]
    fn test_replace_files_swaps_whole_tree() {
        let temp = TempDir::new().unwrap();
        let repo = init_with(&temp, &[("a.txt", "A1"), ("old/gone.txt", "x")]);

        let src = source_with(&temp, "v2", &[("a.txt", "A2"), ("new/b.txt", "B")]);
        repo.replace_files(&src, None).unwrap();

        let paths: Vec<String> = repo
            .entries(&Revision::Tip, false)
            .unwrap()
            .into_iter()
            .map(|e| e.path)
            .collect();
        assert_eq!(paths, vec!["/a.txt", "/new/b.txt"]);
        assert!(!repo.location().join("old").exists());

        assert_eq!(repo.get_file(&Revision::Tip, "a.txt").unwrap(), b"A2");
        assert_eq!(repo.get_file(&Revision::Behind(1), "a.txt").unwrap(), b"A1");
        assert!(repo
            .get_file(&Revision::Tip, "old/gone.txt")
            .unwrap_err()
            .is_not_found());
    }

    #[test]
    fn test_replace_identical_content_still_commits() {
        let temp = TempDir::new().unwrap();
        let repo = init_with(&temp, &[("a.txt", "A")]);
        let src = source_with(&temp, "same", &[("a.txt", "A")]);

        repo.replace_files(&src, None).unwrap();
        assert_eq!(repo.revision_count(&Revision::Tip).unwrap(), 2);
    }

    #[test]
    fn test_replace_from_missing_source_leaves_worktree() {
        let temp = TempDir::new().unwrap();
        let repo = init_with(&temp, &[("a.txt", "A"), ("thumbnails/1.png", "p")]);

        assert!(repo
            .replace_files(&temp.path().join("absent"), None)
            .is_err());
        assert_eq!(repo.revision_count(&Revision::Tip).unwrap(), 1);
        assert_eq!(repo.get_file(&Revision::Tip, "a.txt").unwrap(), b"A");
        assert_eq!(std::fs::read_to_string(repo.location().join("a.txt")).unwrap(), "A");
        assert!(repo.location().join("thumbnails/1.png").is_file());
    }

    #[test]
    fn test_walk_with_folders() {
        let temp = TempDir::new().unwrap();
        let repo = init_with(
            &temp,
            &[("model.sdf", "m"), ("meshes/a.dae", "a"), ("meshes/tex/w.png", "w")],
        );

        let entries = repo.entries(&Revision::Tip, true).unwrap();
        let visited: Vec<(&str, bool)> = entries
            .iter()
            .map(|e| (e.path.as_str(), e.is_dir))
            .collect();
        assert_eq!(
            visited,
            vec![
                ("/meshes", true),
                ("/meshes/a.dae", false),
                ("/meshes/tex", true),
                ("/meshes/tex/w.png", false),
                ("/model.sdf", false),
            ]
        );
    }

    #[test]
    fn test_zip_at_older_revision() {
        let temp = TempDir::new().unwrap();
        let repo = init_with(&temp, &[("a.txt", "A")]);
        let src = source_with(&temp, "v2", &[("a.txt", "A"), ("b.txt", "B")]);
        repo.replace_files(&src, None).unwrap();

        let v1 = repo
            .zip(&Revision::Behind(1), Some(&temp.path().join("v1.zip")))
            .unwrap();
        let v2 = repo
            .zip(&Revision::Tip, Some(&temp.path().join("v2.zip")))
            .unwrap();

        assert_eq!(list_entries(&v1).unwrap(), vec!["a.txt"]);
        let mut v2_entries = list_entries(&v2).unwrap();
        v2_entries.sort();
        assert_eq!(v2_entries, vec!["a.txt", "b.txt"]);
        assert_eq!(read_entry(&v2, "b.txt").unwrap(), b"B");
    }

    #[test]
    fn test_clone_carries_history() {
        let temp = TempDir::new().unwrap();
        let repo = init_with(&temp, &[("a.txt", "A")]);
        repo.tag("source-uuid").unwrap();
        let src = source_with(&temp, "v2", &[("a.txt", "A2")]);
        repo.replace_files(&src, None).unwrap();

        let target = temp.path().join("clone");
        repo.clone_to(&target).unwrap();

        let clone = GitRepository::new(&target, CommitterIdentity::default());
        assert_eq!(clone.revision_count(&Revision::Tip).unwrap(), 2);
        assert_eq!(clone.get_file(&Revision::Tip, "a.txt").unwrap(), b"A2");
        assert!(target.join("a.txt").exists());

        clone.tag("clone-uuid").unwrap();
        assert_eq!(clone.revision_count(&Revision::tag("clone-uuid")).unwrap(), 2);
    }

    #[test]
    fn test_clone_into_non_empty_target_fails() {
        let temp = TempDir::new().unwrap();
        let repo = init_with(&temp, &[("a.txt", "A")]);
        let target = source_with(&temp, "occupied", &[("x", "x")]);
        assert!(matches!(
            repo.clone_to(&target),
            Err(RepoError::AlreadyExists { .. })
        ));
    }

    #[test]
    fn test_commit_author_falls_back_to_identity() {
        let temp = TempDir::new().unwrap();
        let repo = init_with(&temp, &[("a.txt", "A")]);
        let src = source_with(&temp, "v2", &[("a.txt", "B")]);
        repo.replace_files(&src, Some("  ")).unwrap();

        let git = Repository::open(repo.location()).unwrap();
        let head = git.head().unwrap().peel_to_commit().unwrap();
        assert_eq!(head.author().name(), Some("fuelhub"));
    }
}
