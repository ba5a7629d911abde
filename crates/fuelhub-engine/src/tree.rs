//! File tree assembly

use std::collections::HashMap;

use fuelhub_core::{FileNode, FileTree, Resource};
use fuelhub_repo::WalkEntry;
use fuelhub_repo::walk::ROOT;

use crate::error::{EngineError, Result};
use crate::hub::Hub;
use crate::resolver::resolve_in;

struct Slot {
    node: FileNode,
    children: Vec<usize>,
}

/// Build the node hierarchy from an ancestor-first walk.
///
/// First pass records every node in an arena and links it to its parent
/// folder; second pass materializes the nested nodes.
pub(crate) fn assemble(entries: &[WalkEntry]) -> Result<Vec<FileNode>> {
    let mut slots: Vec<Slot> = Vec::with_capacity(entries.len());
    let mut folders: HashMap<&str, usize> = HashMap::new();
    let mut roots = Vec::new();

    for entry in entries {
        if entry.path == ROOT {
            continue;
        }
        let name = entry.path.rsplit('/').next().unwrap_or_default();
        let index = slots.len();
        slots.push(Slot {
            node: FileNode::new(name, entry.path.clone()),
            children: Vec::new(),
        });

        if entry.parent == ROOT {
            roots.push(index);
        } else {
            let parent = folders.get(entry.parent.as_str()).ok_or_else(|| {
                EngineError::unexpected(format!(
                    "'{}' visited before its folder '{}'",
                    entry.path, entry.parent
                ))
            })?;
            slots[*parent].children.push(index);
        }

        if entry.is_dir {
            folders.insert(entry.path.as_str(), index);
        }
    }

    fn build(slots: &[Slot], index: usize) -> FileNode {
        let slot = &slots[index];
        let mut node = slot.node.clone();
        node.children = slot.children.iter().map(|&c| build(slots, c)).collect();
        node
    }

    Ok(roots.into_iter().map(|i| build(&slots, i)).collect())
}

impl Hub {
    /// Hierarchical file listing of a resource at a version
    pub fn file_tree<R: Resource + ?Sized>(&self, res: &R, version: &str) -> Result<FileTree> {
        let repo = self.repository(res);
        let resolved = resolve_in(repo.as_ref(), res.uuid(), version)?;
        let entries = repo.entries(&resolved.revision, true)?;

        Ok(FileTree {
            name: res.name().to_string(),
            owner: res.owner().to_string(),
            version: resolved.version,
            file_tree: assemble(&entries)?,
        })
    }
}
