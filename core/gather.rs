use crate::error::Result;
use crate::ignore_rules::{IgnoreRules, ROOT_GITIGNORE};
use log;
use std::path::{Component, Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Walks `root_dir` and returns every regular file (and unfollowed symlink)
/// that survives the ignore rules and hidden-file policy, sorted by absolute
/// path. FIFOs, sockets and device nodes are never collected.
///
/// Ignored or hidden directories are pruned rather than filtered, so nothing
/// beneath them is visited. Any traversal error aborts the whole collection.
pub fn collect_files(
    root_dir: &Path,
    rules: &IgnoreRules,
    include_hidden: bool,
) -> Result<Vec<PathBuf>> {
    log::info!("Walking directory: {}", root_dir.display());
    let walker = WalkDir::new(root_dir)
        .follow_links(false)
        .into_iter()
        .filter_entry(|entry| should_visit(root_dir, entry, rules, include_hidden));

    let mut files = Vec::new();
    for entry_result in walker {
        let entry = entry_result?;
        if entry.depth() == 0 || entry.file_type().is_dir() {
            continue;
        }
        if !is_collectable(entry.file_type()) {
            log::debug!("Skipping special file: {}", entry.path().display());
            continue;
        }
        log::trace!("Collected: {}", entry.path().display());
        files.push(entry.into_path());
    }

    sort_path_list(&mut files);
    log::info!("Directory walk complete. Collected {} files.", files.len());
    Ok(files)
}

fn should_visit(root_dir: &Path, entry: &DirEntry, rules: &IgnoreRules, include_hidden: bool) -> bool {
    if entry.depth() == 0 {
        return true;
    }
    let relative_path = relative_slash_path(root_dir, entry.path());
    let is_dir = entry.file_type().is_dir();

    if rules.is_ignored(&relative_path, is_dir) {
        log::trace!("Ignored by rules: {}", relative_path);
        return false;
    }

    if !include_hidden && is_hidden_name(&entry.file_name().to_string_lossy()) {
        log::trace!("Skipping hidden entry: {}", relative_path);
        return false;
    }
    true
}

fn is_collectable(file_type: std::fs::FileType) -> bool {
    file_type.is_file() || file_type.is_symlink()
}

/// Dot-prefixed names are hidden, except `.gitignore` which is always kept.
pub fn is_hidden_name(name: &str) -> bool {
    name.starts_with('.') && name != ROOT_GITIGNORE
}

/// Byte-wise ascending order of the full path string, duplicates removed.
pub fn sort_path_list(paths: &mut Vec<PathBuf>) {
    paths.sort_by(|a, b| a.as_os_str().cmp(b.as_os_str()));
    paths.dedup();
}

/// `path` relative to `root_dir`, joined with `/` whatever the host separator.
/// Falls back to the full path when the two share no common base.
pub fn relative_slash_path(root_dir: &Path, path: &Path) -> String {
    let relative = pathdiff::diff_paths(path, root_dir).unwrap_or_else(|| path.to_path_buf());
    let parts: Vec<String> = relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
            Component::ParentDir => Some("..".to_string()),
            _ => None,
        })
        .collect();
    parts.join("/")
}
