//! Ancestor-first walk ordering
//!
//! Backends list the files present at a revision; this module turns that
//! list into the visit sequence promised by [`RepositoryStore::walk`]:
//! every ancestor folder root-to-leaf, each exactly once, then the file.
//!
//! [`RepositoryStore::walk`]: crate::store::RepositoryStore::walk

use std::collections::HashSet;

use crate::error::Result;
use crate::store::WalkEntry;

/// Path of the repository root as seen by walk callbacks
pub const ROOT: &str = "/";

/// Whether a repository-relative path belongs to VCS bookkeeping
/// (`.git`, `.gitignore`, `.hg`, ...)
#[must_use]
pub fn is_internal(path: &str) -> bool {
    let first = path
        .trim_start_matches('/')
        .split('/')
        .next()
        .unwrap_or_default();
    first.starts_with(".git") || first.starts_with(".hg")
}

/// Visit `files` (repository-relative, `/`-separated) in ancestor-first order
pub fn walk_paths<'a, I>(
    files: I,
    include_folders: bool,
    visit: &mut dyn FnMut(&WalkEntry) -> Result<()>,
) -> Result<()>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut visited_folders: HashSet<String> = HashSet::new();

    for file in files {
        if is_internal(file) {
            continue;
        }
        let components: Vec<&str> = file.split('/').filter(|c| !c.is_empty()).collect();
        let Some((_, folders)) = components.split_last() else {
            continue;
        };

        if include_folders {
            let mut folder = String::new();
            for component in folders {
                let parent = absolute(&folder);
                if !folder.is_empty() {
                    folder.push('/');
                }
                folder.push_str(component);
                if visited_folders.insert(folder.clone()) {
                    visit(&WalkEntry {
                        path: absolute(&folder),
                        parent,
                        is_dir: true,
                    })?;
                }
            }
        }

        visit(&WalkEntry {
            path: absolute(&components.join("/")),
            parent: absolute(&folders.join("/")),
            is_dir: false,
        })?;
    }

    Ok(())
}

fn absolute(relative: &str) -> String {
    format!("{}{}", ROOT, relative)
}
