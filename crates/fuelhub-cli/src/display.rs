//! Display formatting for CLI output

use fuelhub_core::{FileNode, FileTree};

/// Render a file tree with box-drawing connectors, folders marked with a
/// trailing `/`
pub fn render_tree(tree: &FileTree) -> String {
    let mut out = format!("{} ({}) v{}\n", tree.name, tree.owner, tree.version);
    render_nodes(&tree.file_tree, "", &mut out);
    out
}

fn render_nodes(nodes: &[FileNode], prefix: &str, out: &mut String) {
    for (i, node) in nodes.iter().enumerate() {
        let last = i + 1 == nodes.len();
        let connector = if last { "└── " } else { "├── " };
        let is_folder = !node.children.is_empty();

        out.push_str(prefix);
        out.push_str(connector);
        out.push_str(&node.name);
        if is_folder {
            out.push('/');
        }
        out.push('\n');

        if is_folder {
            let child_prefix = format!("{}{}", prefix, if last { "    " } else { "│   " });
            render_nodes(&node.children, &child_prefix, out);
        }
    }
}
