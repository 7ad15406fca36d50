use clap::{Args, Parser};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "dirmd",
    author,
    version,
    about = "Bundles all files from a directory into a single markdown file.",
    long_about = "dirmd traverses a directory, reads every file that is not ignored, \nand bundles them into one markdown document: a directory tree followed by \neach file's contents in a fenced, language-tagged block.",
    help_template = "{about-section}\nUsage: {usage}\n\n{all-args}{after-help}",
    after_help = "EXAMPLES:\n  dirmd .\n  dirmd ./service -o service.md -i .bundleignore\n  dirmd ~/src/app --include-hidden -w 4"
)]
pub struct Cli {
    #[arg(value_name = "DIRECTORY", help = "Directory to bundle.")]
    pub directory: PathBuf,

    #[clap(flatten)]
    pub bundle: BundleOpts,

    #[clap(flatten)]
    pub config_file: ConfigFileOpts,

    #[arg(short, long, action = clap::ArgAction::Count, global = true, help = "Increase message verbosity (-v, -vv).")]
    pub verbose: u8,

    #[arg(
        short,
        long,
        global = true,
        help = "Silence informational messages and warnings."
    )]
    pub quiet: bool,
}

#[derive(Args, Debug, Clone, Default)]
pub struct BundleOpts {
    #[arg(
        short = 'o',
        long,
        value_name = "FILE",
        help = "Path for the output markdown file [default: bundle.md].",
        help_heading = "Bundling"
    )]
    pub output: Option<PathBuf>,

    #[arg(
        short = 'i',
        long,
        value_name = "FILE",
        help = "Path to a custom .gitignore-style file to use for ignoring files.",
        help_heading = "Bundling"
    )]
    pub ignore_file: Option<PathBuf>,

    #[arg(
        short = 'w',
        long,
        value_name = "N",
        allow_negative_numbers = true,
        help = "Number of concurrent workers for processing files [default: CPU count].",
        help_heading = "Bundling"
    )]
    pub workers: Option<i64>,

    #[arg(
        long,
        help = "Include hidden files and directories (those starting with a dot).",
        help_heading = "Bundling"
    )]
    pub include_hidden: bool,
}

#[derive(Args, Debug, Clone, Default)]
pub struct ConfigFileOpts {
    #[arg(
        long,
        value_name = "CONFIG_FILE",
        help = "Path of a TOML config file (default: <DIRECTORY>/.dirmd.toml if present).",
        conflicts_with = "no_config",
        help_heading = "Configuration"
    )]
    pub config: Option<PathBuf>,

    #[arg(
        long,
        help = "Disable loading any TOML config file.",
        conflicts_with = "config",
        help_heading = "Configuration"
    )]
    pub no_config: bool,
}
