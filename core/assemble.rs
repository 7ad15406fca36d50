use crate::classify::FileKind;
use crate::dispatch::ResultIndex;
use crate::error::{AppError, Result};
use crate::tree::render_tree;
use log;
use std::path::{Path, PathBuf};

const PART_SEPARATOR: &str = "\n\n";

/// Files left out of the document, by root-relative path.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SkipReport {
    pub binary: Vec<String>,
    pub unreadable: Vec<(String, String)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Assembled {
    pub document: String,
    pub bundled: usize,
    pub skipped: SkipReport,
}

/// Joins the tree and one fenced block per text file, in `paths` order.
///
/// Unreadable and binary files are reported through the log and the
/// [`SkipReport`] and contribute nothing to the document. A path with no
/// entry in `results` means the pipeline is broken and is an error.
pub fn assemble(root_dir: &Path, paths: &[PathBuf], results: &ResultIndex) -> Result<Assembled> {
    log::info!("Assembling markdown document...");
    let mut parts = Vec::with_capacity(paths.len() + 1);
    parts.push(render_tree(root_dir, paths));

    let mut skipped = SkipReport::default();
    let mut bundled = 0;

    for path in paths {
        let record = results.get(path).ok_or_else(|| {
            AppError::Internal(format!("result not found for path {}", path.display()))
        })?;
        let relative_path = record.relative_path(root_dir);

        match &record.kind {
            FileKind::Unreadable(err) => {
                log::warn!("Could not process file {}: {}", path.display(), err);
                skipped.unreadable.push((relative_path, err.to_string()));
            }
            FileKind::Binary => {
                log::info!("Skipping binary file: {}", path.display());
                skipped.binary.push(relative_path);
            }
            FileKind::Text { content, language } => {
                parts.push(render_file_block(&relative_path, language, content));
                bundled += 1;
            }
        }
    }

    log::debug!(
        "Assembled {} file blocks ({} binary, {} unreadable skipped).",
        bundled,
        skipped.binary.len(),
        skipped.unreadable.len()
    );
    Ok(Assembled {
        document: parts.join(PART_SEPARATOR),
        bundled,
        skipped,
    })
}

/// Backticked path, then the content (whitespace-trimmed) in a fenced block.
pub fn render_file_block(relative_path: &str, language: &str, content: &[u8]) -> String {
    let text = String::from_utf8_lossy(content);
    format!("`{relative_path}`\n```{language}\n{}\n```", text.trim())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::FileRecord;
    use pretty_assertions::assert_eq;

    const ROOT: &str = "/home/user/project";

    fn text(path: &Path, content: &str, language: &str) -> FileRecord {
        FileRecord {
            path: path.to_path_buf(),
            kind: FileKind::Text {
                content: content.as_bytes().to_vec(),
                language: language.to_string(),
            },
        }
    }

    fn index(records: Vec<FileRecord>) -> ResultIndex {
        records.into_iter().map(|r| (r.path.clone(), r)).collect()
    }

    #[test]
    fn file_block_trims_content() {
        assert_eq!(
            render_file_block("src/main.rs", "rust", b"\n\n  fn main() {}\n\n"),
            "`src/main.rs`\n```rust\nfn main() {}\n```"
        );
        assert_eq!(render_file_block("README", "", b""), "`README`\n```\n\n```");
    }

    #[test]
    fn assembles_tree_then_blocks_in_path_order() {
        let root = Path::new(ROOT);
        let a = root.join("a.go");
        let b = root.join("sub/b.py");
        let results = index(vec![text(&b, "print(1)\n", "python"), text(&a, "package a", "go")]);

        let assembled = assemble(root, &[a, b], &results).unwrap();
        let expected = "# Structure of `project`\n\n- `project/`\n  - `a.go`\n  - `sub/`\n    - `b.py`\n\
\n\n`a.go`\n```go\npackage a\n```\
\n\n`sub/b.py`\n```python\nprint(1)\n```";
        assert_eq!(assembled.document, expected);
        assert_eq!(assembled.bundled, 2);
        assert_eq!(assembled.skipped, SkipReport::default());
    }

    #[test]
    fn binary_and_unreadable_files_are_skipped() {
        let root = Path::new(ROOT);
        let bin = root.join("logo.png");
        let gone = root.join("gone.txt");
        let ok = root.join("ok.txt");
        let results = index(vec![
            FileRecord {
                path: bin.clone(),
                kind: FileKind::Binary,
            },
            FileRecord {
                path: gone.clone(),
                kind: FileKind::Unreadable(AppError::FileRead {
                    path: gone.clone(),
                    source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
                }),
            },
            text(&ok, "fine", "txt"),
        ]);

        let assembled = assemble(root, &[gone, bin, ok], &results).unwrap();
        assert!(assembled.document.ends_with("`ok.txt`\n```txt\nfine\n```"));
        assert!(!assembled.document.contains("`logo.png`\n```"));
        assert!(!assembled.document.contains("`gone.txt`\n```"));
        // Skipped files still appear in the tree.
        assert!(assembled.document.contains("  - `logo.png`\n"));
        assert_eq!(assembled.bundled, 1);
        assert_eq!(assembled.skipped.binary, vec!["logo.png"]);
        assert_eq!(assembled.skipped.unreadable.len(), 1);
        assert_eq!(assembled.skipped.unreadable[0].0, "gone.txt");
    }

    #[test]
    fn empty_input_is_tree_only() {
        let assembled = assemble(Path::new(ROOT), &[], &ResultIndex::new()).unwrap();
        assert_eq!(assembled.document, "# Structure of `project`\n\n- `project/`\n");
        assert_eq!(assembled.bundled, 0);
    }

    #[test]
    fn missing_result_is_internal_error() {
        let root = Path::new(ROOT);
        let err = assemble(root, &[root.join("lost.rs")], &ResultIndex::new()).unwrap_err();
        assert!(matches!(err, AppError::Internal(_)));
    }
}
