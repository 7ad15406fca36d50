use crate::error::AppError;
use crate::gather::relative_slash_path;
use crate::languages::detect_language;
use log;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// What reading one collected path produced.
#[derive(Debug)]
pub enum FileKind {
    Text { content: Vec<u8>, language: String },
    Binary,
    Unreadable(AppError),
}

/// Immutable result of reading and classifying one file.
#[derive(Debug)]
pub struct FileRecord {
    pub path: PathBuf,
    pub kind: FileKind,
}

impl FileRecord {
    pub fn is_binary(&self) -> bool {
        matches!(self.kind, FileKind::Binary)
    }

    pub fn read_error(&self) -> Option<&AppError> {
        match &self.kind {
            FileKind::Unreadable(err) => Some(err),
            _ => None,
        }
    }

    pub fn content(&self) -> Option<&[u8]> {
        match &self.kind {
            FileKind::Text { content, .. } => Some(content.as_slice()),
            _ => None,
        }
    }

    pub fn language(&self) -> Option<&str> {
        match &self.kind {
            FileKind::Text { language, .. } => Some(language.as_str()),
            _ => None,
        }
    }

    pub fn relative_path(&self, root_dir: &Path) -> String {
        relative_slash_path(root_dir, &self.path)
    }
}

/// Reads `path` whole and classifies it. Never fails: I/O errors and targets
/// that are not regular files end up in [`FileKind::Unreadable`].
pub fn process_file(path: &Path) -> FileRecord {
    let kind = match read_regular_file(path) {
        Err(e) => {
            log::debug!("Failed to read {}: {}", path.display(), e);
            FileKind::Unreadable(AppError::FileRead {
                path: path.to_path_buf(),
                source: e,
            })
        }
        Ok(bytes) if is_binary(&bytes) => {
            log::trace!("Binary content detected: {}", path.display());
            FileKind::Binary
        }
        Ok(bytes) => FileKind::Text {
            content: bytes,
            language: detect_language(path),
        },
    };
    FileRecord {
        path: path.to_path_buf(),
        kind,
    }
}

// Symlinks are resolved here; anything but a regular file is refused before
// opening so a FIFO target cannot block the worker.
fn read_regular_file(path: &Path) -> io::Result<Vec<u8>> {
    let metadata = fs::metadata(path)?;
    if !metadata.is_file() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "not a regular file",
        ));
    }
    fs::read(path)
}

/// Any NUL byte marks the content as binary.
pub fn is_binary(data: &[u8]) -> bool {
    data.contains(&0)
}
