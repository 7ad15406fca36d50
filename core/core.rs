pub mod assemble;
pub mod bundle;
pub mod classify;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod gather;
pub mod ignore_rules;
pub mod languages;
pub mod tree;

pub use assemble::{Assembled, SkipReport, assemble, render_file_block};
pub use bundle::{BundleSummary, Bundler, Progress};
pub use classify::{FileKind, FileRecord, is_binary, process_file};
pub use config::Config;
pub use dispatch::{ResultIndex, dispatch};
pub use error::{AppError, Result};
pub use gather::{collect_files, relative_slash_path};
pub use ignore_rules::IgnoreRules;
pub use languages::detect_language;
pub use tree::{TreeNode, render_tree};
