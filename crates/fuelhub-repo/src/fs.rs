//! Filesystem helpers shared by the backends

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{RepoError, Result};
use crate::walk::is_internal;

/// Regular files under `root`, as sorted `/`-separated relative paths.
/// VCS bookkeeping entries are excluded.
pub fn list_files(root: &Path) -> Result<Vec<String>> {
    if !root.is_dir() {
        return Err(RepoError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("folder does not exist: {}", root.display()),
        )));
    }

    let mut files = Vec::new();
    let walker = WalkDir::new(root)
        .min_depth(1)
        .into_iter()
        .filter_entry(|e| !is_internal(&relative_path(root, e.path())));

    for entry in walker {
        let entry = entry?;
        if entry.file_type().is_file() {
            files.push(relative_path(root, entry.path()));
        }
    }

    files.sort();
    Ok(files)
}

/// Copy every file listed by [`list_files`] from `src` into `dest`
pub fn copy_tree(src: &Path, dest: &Path) -> Result<Vec<String>> {
    let files = list_files(src)?;
    copy_files(src, dest, &files)?;
    Ok(files)
}

/// Copy `files` (relative paths from a previous [`list_files`]) from `src`
/// into `dest`, creating folders as needed
pub fn copy_files(src: &Path, dest: &Path, files: &[String]) -> Result<()> {
    std::fs::create_dir_all(dest)?;

    for file in files {
        let from = src.join(file);
        let to = dest.join(file);
        if let Some(parent) = to.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::copy(&from, &to)?;
    }

    Ok(())
}

/// Remove directories under `root` left empty after file deletions.
/// VCS bookkeeping folders are never touched.
pub fn prune_empty_dirs(root: &Path) -> Result<()> {
    let mut dirs: Vec<PathBuf> = WalkDir::new(root)
        .min_depth(1)
        .into_iter()
        .filter_entry(|e| !is_internal(&relative_path(root, e.path())))
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_dir())
        .map(|e| e.into_path())
        .collect();

    // Deepest first so parents empty out after their children
    dirs.sort_by_key(|d| std::cmp::Reverse(d.components().count()));
    for dir in dirs {
        let is_empty = std::fs::read_dir(&dir)?.next().is_none();
        if is_empty {
            std::fs::remove_dir(&dir)?;
        }
    }
    Ok(())
}

fn relative_path(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/")
}
