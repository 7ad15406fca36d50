use crate::classify::{FileRecord, process_file};
use crate::error::{AppError, Result};
use log;
use rayon::prelude::*;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::mpsc;

/// One record per collected path, keyed by absolute path.
pub type ResultIndex = HashMap<PathBuf, FileRecord>;

/// Reads and classifies every path on a pool of exactly `workers` threads
/// (zero is treated as one). Completion order is arbitrary; callers reimpose
/// order from the path list.
pub fn dispatch(paths: &[PathBuf], workers: usize) -> Result<ResultIndex> {
    let workers = workers.max(1);
    log::info!(
        "Processing {} files with {} workers...",
        paths.len(),
        workers
    );

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .thread_name(|i| format!("dirmd-worker-{i}"))
        .build()?;

    let (tx_record, rx_record) = mpsc::channel::<FileRecord>();
    pool.install(|| {
        paths.par_iter().for_each_with(tx_record, |tx, path| {
            if tx.send(process_file(path)).is_err() {
                log::error!("Receiver dropped for file records: {}", path.display());
            }
        });
    });

    let index: ResultIndex = rx_record
        .into_iter()
        .map(|record| (record.path.clone(), record))
        .collect();

    if index.len() != paths.len() {
        return Err(AppError::Internal(format!(
            "expected {} file records, collected {}",
            paths.len(),
            index.len()
        )));
    }
    log::debug!("File processing complete.");
    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::FileKind;
    use std::fs;
    use tempfile::tempdir;

    fn fixture(count: usize) -> (tempfile::TempDir, Vec<PathBuf>) {
        let dir = tempdir().unwrap();
        let mut paths = Vec::new();
        for i in 0..count {
            let path = dir.path().join(format!("file_{i:03}.txt"));
            fs::write(&path, format!("content {i}")).unwrap();
            paths.push(path);
        }
        (dir, paths)
    }

    #[test]
    fn one_record_per_path() {
        let (_dir, paths) = fixture(40);
        let index = dispatch(&paths, 4).unwrap();
        assert_eq!(index.len(), paths.len());
        for (i, path) in paths.iter().enumerate() {
            let record = &index[path];
            assert_eq!(record.content(), Some(format!("content {i}").as_bytes()));
        }
    }

    #[test]
    fn zero_workers_runs_single_worker() {
        let (_dir, paths) = fixture(5);
        let index = dispatch(&paths, 0).unwrap();
        assert_eq!(index.len(), 5);
    }

    #[test]
    fn empty_path_list_gives_empty_index() {
        let index = dispatch(&[], 3).unwrap();
        assert!(index.is_empty());
    }

    #[test]
    fn read_failures_stay_in_the_index() {
        let (dir, mut paths) = fixture(2);
        paths.push(dir.path().join("vanished.txt"));
        let index = dispatch(&paths, 2).unwrap();
        assert_eq!(index.len(), 3);
        assert!(matches!(
            index[&dir.path().join("vanished.txt")].kind,
            FileKind::Unreadable(_)
        ));
    }
}
