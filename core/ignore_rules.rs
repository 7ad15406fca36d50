use crate::error::{AppError, Result};
use ignore::gitignore::{Gitignore, GitignoreBuilder};
use log;
use std::fs;
use std::path::Path;

pub const ROOT_GITIGNORE: &str = ".gitignore";

/// Gitignore-style path matcher compiled from the root `.gitignore` and an
/// optional extra ignore file. Both sources apply together.
#[derive(Debug, Clone)]
pub struct IgnoreRules {
    matcher: Gitignore,
    pattern_count: usize,
}

impl IgnoreRules {
    pub fn load(root_dir: &Path, custom_ignore_file: Option<&Path>) -> Result<Self> {
        let mut patterns = Vec::new();

        let gitignore_path = root_dir.join(ROOT_GITIGNORE);
        if gitignore_path.is_file() {
            let lines = read_pattern_lines(&gitignore_path)?;
            log::debug!(
                "Loaded {} ignore patterns from {}",
                lines.len(),
                gitignore_path.display()
            );
            patterns.extend(lines);
        }

        if let Some(custom) = custom_ignore_file {
            if custom.is_file() {
                let lines = read_pattern_lines(custom)?;
                log::debug!(
                    "Loaded {} ignore patterns from {}",
                    lines.len(),
                    custom.display()
                );
                patterns.extend(lines);
            } else {
                log::warn!(
                    "Ignore file '{}' does not exist or is not a file, skipping.",
                    custom.display()
                );
            }
        }

        Self::from_lines(root_dir, &patterns)
    }

    pub fn from_lines<S: AsRef<str>>(root_dir: &Path, lines: &[S]) -> Result<Self> {
        let mut builder = GitignoreBuilder::new(root_dir);
        for line in lines {
            builder.add_line(None, line.as_ref())?;
        }
        let matcher = builder.build()?;
        log::trace!("Compiled {} ignore patterns.", lines.len());
        Ok(Self {
            matcher,
            pattern_count: lines.len(),
        })
    }

    pub fn empty() -> Self {
        Self {
            matcher: Gitignore::empty(),
            pattern_count: 0,
        }
    }

    /// `relative_path` is slash-separated and relative to the root directory.
    /// A path is ignored when it, or any of its parent directories, matches.
    pub fn is_ignored(&self, relative_path: &str, is_dir: bool) -> bool {
        if relative_path.is_empty() {
            return false;
        }
        self.matcher
            .matched_path_or_any_parents(relative_path, is_dir)
            .is_ignore()
    }

    pub fn pattern_count(&self) -> usize {
        self.pattern_count
    }
}

/// One pattern per trimmed line; blank lines and `#` comments are dropped.
pub fn read_pattern_lines(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path).map_err(|e| AppError::IgnoreSource {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(parse_pattern_lines(&content))
}

pub fn parse_pattern_lines(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(String::from)
        .collect()
}
