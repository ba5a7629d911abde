//! File tree returned to clients. Rebuilt per request, never persisted.

use serde::{Deserialize, Serialize};

/// Hierarchical listing of a resource at a resolved version
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileTree {
    pub name: String,
    pub owner: String,
    pub version: u32,
    #[serde(default)]
    pub file_tree: Vec<FileNode>,
}

/// A file or folder. Folders carry their children; files never do.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileNode {
    pub name: String,
    /// `/`-prefixed path from the resource root
    pub path: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<FileNode>,
}

impl FileNode {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            children: Vec::new(),
        }
    }
}

impl FileTree {
    /// All node paths in depth-first order
    #[must_use]
    pub fn paths(&self) -> Vec<&str> {
        fn collect<'a>(nodes: &'a [FileNode], out: &mut Vec<&'a str>) {
            for node in nodes {
                out.push(&node.path);
                collect(&node.children, out);
            }
        }
        let mut out = Vec::new();
        collect(&self.file_tree, &mut out);
        out
    }

    /// Find a node by its path
    #[must_use]
    pub fn find(&self, path: &str) -> Option<&FileNode> {
        fn search<'a>(nodes: &'a [FileNode], path: &str) -> Option<&'a FileNode> {
            nodes.iter().find_map(|n| {
                if n.path == path {
                    Some(n)
                } else {
                    search(&n.children, path)
                }
            })
        }
        search(&self.file_tree, path)
    }
}
