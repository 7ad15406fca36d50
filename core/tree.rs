use crate::config::root_display_name;
use crate::gather::relative_slash_path;
use std::collections::BTreeMap;
use std::fmt::Write;
use std::path::{Path, PathBuf};

const INDENT: &str = "  ";

/// Trie of path components. Children are kept in a `BTreeMap`, so iteration
/// is plain byte order of the names with files and directories interleaved.
#[derive(Debug, Default)]
pub struct TreeNode {
    children: BTreeMap<String, TreeNode>,
    is_dir: bool,
}

impl TreeNode {
    pub fn from_paths(root_dir: &Path, paths: &[PathBuf]) -> Self {
        let mut root = TreeNode {
            children: BTreeMap::new(),
            is_dir: true,
        };
        for path in paths {
            let relative = relative_slash_path(root_dir, path);
            if relative.is_empty() {
                continue;
            }
            root.insert(relative.split('/'));
        }
        root
    }

    fn insert<'a>(&mut self, components: impl Iterator<Item = &'a str>) {
        let mut current = self;
        let mut components = components.peekable();
        while let Some(component) = components.next() {
            current = current.children.entry(component.to_string()).or_default();
            if components.peek().is_some() {
                current.is_dir = true;
            }
        }
    }

    fn write_children(&self, out: &mut String, prefix: &str) {
        for (name, child) in &self.children {
            let suffix = if child.is_dir { "/" } else { "" };
            let _ = writeln!(out, "{prefix}- `{name}{suffix}`");
            if !child.children.is_empty() {
                child.write_children(out, &format!("{prefix}{INDENT}"));
            }
        }
    }
}

/// Markdown heading plus an indented bullet listing of `paths` under `root_dir`.
pub fn render_tree(root_dir: &Path, paths: &[PathBuf]) -> String {
    let tree = TreeNode::from_paths(root_dir, paths);
    let dir_name = root_display_name(root_dir);

    let mut out = String::new();
    let _ = write!(out, "# Structure of `{dir_name}`\n\n");
    let _ = writeln!(out, "- `{dir_name}/`");
    tree.write_children(&mut out, INDENT);
    out
}
