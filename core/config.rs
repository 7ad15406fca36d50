use crate::error::{AppError, Result};
use log;
use serde::{Deserialize, Deserializer};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_OUTPUT_FILENAME: &str = "bundle.md";
pub const DEFAULT_CONFIG_FILENAME: &str = ".dirmd.toml";

/// Effective settings for one bundling run.
///
/// Values come from [`Config::default`], then an optional TOML file, then CLI
/// overrides. `root_dir` is only ever set from the command line.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(skip)]
    pub root_dir: PathBuf,
    #[serde(default = "default_output_path", rename = "output")]
    pub output_path: PathBuf,
    #[serde(default, rename = "ignore_file")]
    pub ignore_file_path: Option<PathBuf>,
    #[serde(default = "default_workers", deserialize_with = "deserialize_workers")]
    pub workers: usize,
    #[serde(default)]
    pub include_hidden: bool,
}

fn default_output_path() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_FILENAME)
}
fn default_workers() -> usize {
    rayon::current_num_threads().max(1)
}

// Same fallback as `--workers`: zero or negative means a single worker.
fn deserialize_workers<'de, D>(deserializer: D) -> Result<usize, D::Error>
where
    D: Deserializer<'de>,
{
    i64::deserialize(deserializer).map(normalize_workers)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root_dir: PathBuf::new(),
            output_path: default_output_path(),
            ignore_file_path: None,
            workers: default_workers(),
            include_hidden: false,
        }
    }
}

impl Config {
    /// Resolves the directory argument to an absolute path that is known to
    /// exist and be a directory.
    pub fn determine_root_dir(cli_root: &Path) -> Result<PathBuf> {
        let expanded = expand_path(cli_root);
        let root = expanded.canonicalize().map_err(|e| {
            AppError::InvalidArgument(format!(
                "cannot access directory '{}': {}",
                expanded.display(),
                e
            ))
        })?;
        if !root.is_dir() {
            return Err(AppError::InvalidArgument(format!(
                "path is not a directory: {}",
                root.display()
            )));
        }
        Ok(root)
    }

    pub fn resolve_config_path(
        root_dir: &Path,
        cli_config_file: Option<&Path>,
        cli_disable_config: bool,
    ) -> Result<Option<PathBuf>> {
        if cli_disable_config {
            log::debug!("Config file loading disabled via CLI flag.");
            return Ok(None);
        }

        match cli_config_file {
            Some(path) => {
                let path = expand_path(path);
                if !path.is_file() {
                    return Err(AppError::Config(format!(
                        "Specified config file not found at path: {}",
                        path.display()
                    )));
                }
                log::debug!("Using specified config file path: {}", path.display());
                Ok(Some(path))
            }
            None => {
                let default_path = root_dir.join(DEFAULT_CONFIG_FILENAME);
                if default_path.is_file() {
                    log::debug!("Using default config file path: {}", default_path.display());
                    Ok(Some(default_path))
                } else {
                    log::debug!(
                        "No config file specified and default not found at: {}",
                        default_path.display()
                    );
                    Ok(None)
                }
            }
        }
    }

    pub fn load_from_path(config_path: &Path) -> Result<Self> {
        log::info!("Loading configuration from: {}", config_path.display());
        let toml_content = fs::read_to_string(config_path).map_err(|e| AppError::FileRead {
            path: config_path.to_path_buf(),
            source: e,
        })?;
        Self::from_toml_str(&toml_content).map_err(|e| match e {
            AppError::TomlParse(msg) => AppError::TomlParse(format!(
                "Error parsing config file '{}': {}",
                config_path.display(),
                msg
            )),
            other => other,
        })
    }

    pub fn from_toml_str(toml_content: &str) -> Result<Self> {
        let mut config = toml::from_str::<Config>(toml_content)
            .map_err(|e| AppError::TomlParse(e.to_string()))?;
        config.output_path = expand_path(&config.output_path);
        config.ignore_file_path = config.ignore_file_path.as_deref().map(expand_path);
        Ok(config)
    }

    /// Sets the worker count, treating zero or negative requests as a single
    /// worker.
    pub fn set_workers(&mut self, requested: i64) {
        self.workers = normalize_workers(requested);
    }

    pub fn effective_workers(&self) -> usize {
        self.workers.max(1)
    }
}

pub fn normalize_workers(requested: i64) -> usize {
    if requested <= 0 {
        log::debug!("Worker count {} is not positive, using 1.", requested);
        1
    } else {
        usize::try_from(requested).unwrap_or(usize::MAX)
    }
}

/// Base name of the root directory as shown in the tree heading.
pub fn root_display_name(root_dir: &Path) -> String {
    root_dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| root_dir.to_string_lossy().into_owned())
}

pub fn expand_path(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    PathBuf::from(shellexpand::tilde(raw.as_ref()).as_ref())
}
