use crate::assemble::{Assembled, SkipReport, assemble};
use crate::config::Config;
use crate::dispatch::dispatch;
use crate::error::{AppError, Result};
use crate::gather::collect_files;
use crate::ignore_rules::IgnoreRules;
use log;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq)]
pub struct BundleSummary {
    pub output_path: PathBuf,
    pub files_found: usize,
    pub files_bundled: usize,
    pub skipped: SkipReport,
    pub bytes_written: usize,
}

/// Pipeline stage notifications, emitted in this order by
/// [`Bundler::bundle_with_progress`].
#[derive(Debug, Clone, PartialEq)]
pub enum Progress {
    Collecting,
    Found(usize),
    Processing { workers: usize },
    Assembling,
}

/// Runs collect, dispatch and assemble for one [`Config`].
#[derive(Debug)]
pub struct Bundler {
    config: Config,
    rules: IgnoreRules,
}

impl Bundler {
    pub fn new(config: Config) -> Result<Self> {
        let rules = IgnoreRules::load(&config.root_dir, config.ignore_file_path.as_deref())?;
        log::debug!("Ignore rules loaded ({} patterns).", rules.pattern_count());
        Ok(Self { config, rules })
    }

    /// Builds the document without writing it.
    pub fn render(&self) -> Result<Assembled> {
        self.render_with_progress(&mut |_| {})
    }

    pub fn render_with_progress(&self, on_progress: &mut dyn FnMut(Progress)) -> Result<Assembled> {
        let root_dir = &self.config.root_dir;
        on_progress(Progress::Collecting);
        let mut paths = collect_files(root_dir, &self.rules, self.config.include_hidden)?;

        if let Some(output) = absolute_output_path(&self.config.output_path) {
            let before = paths.len();
            paths.retain(|p| p != &output);
            if paths.len() != before {
                log::debug!("Excluding output file from bundle: {}", output.display());
            }
        }
        log::info!("Found {} files to bundle.", paths.len());
        on_progress(Progress::Found(paths.len()));

        let workers = self.config.effective_workers();
        on_progress(Progress::Processing { workers });
        let results = dispatch(&paths, workers)?;

        on_progress(Progress::Assembling);
        assemble(root_dir, &paths, &results)
    }

    /// Builds the document and writes it to the configured output path.
    pub fn bundle(&self) -> Result<BundleSummary> {
        self.bundle_with_progress(&mut |_| {})
    }

    pub fn bundle_with_progress(
        &self,
        on_progress: &mut dyn FnMut(Progress),
    ) -> Result<BundleSummary> {
        let assembled = self.render_with_progress(on_progress)?;
        let output_path = &self.config.output_path;
        write_document(output_path, &assembled.document)?;
        log::info!("Bundled project to {}", output_path.display());

        Ok(BundleSummary {
            output_path: output_path.clone(),
            files_found: assembled.bundled
                + assembled.skipped.binary.len()
                + assembled.skipped.unreadable.len(),
            files_bundled: assembled.bundled,
            bytes_written: assembled.document.len(),
            skipped: assembled.skipped,
        })
    }
}

// Canonical form when the file already exists, so it compares equal to the
// canonical paths produced by the walk.
fn absolute_output_path(output_path: &Path) -> Option<PathBuf> {
    output_path
        .canonicalize()
        .ok()
        .or_else(|| std::path::absolute(output_path).ok())
}

fn write_document(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| AppError::DirCreation {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }
    fs::write(path, content).map_err(|e| AppError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}
