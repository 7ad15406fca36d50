use byte_unit::{Byte, UnitType};
use colored::*;
use dirmd_core::{BundleSummary, Progress};

pub fn print_progress(stage: &Progress, quiet: bool) {
    if quiet {
        return;
    }
    match stage {
        Progress::Collecting => println!("- Collecting files..."),
        Progress::Found(count) => println!("- Found {} files to bundle.", count),
        Progress::Processing { workers } => {
            println!("- Processing files with {} workers...", workers)
        }
        Progress::Assembling => println!("- Assembling markdown file..."),
    }
}

pub fn print_summary(summary: &BundleSummary, quiet: bool) {
    if quiet {
        return;
    }

    for path in &summary.skipped.binary {
        println!("{} Skipping binary file: {}", "-".dimmed(), path);
    }
    for (path, reason) in &summary.skipped.unreadable {
        println!("{} Could not process file {}: {}", "Warning:".yellow(), path, reason);
    }

    if summary.files_found == 0 {
        println!("{}", "No files to bundle; wrote directory heading only.".yellow());
    }
    println!(
        "{} Bundled {} of {} files to {} ({})",
        "Done:".green().bold(),
        summary.files_bundled,
        summary.files_found,
        summary.output_path.display().to_string().blue(),
        human_size(summary.bytes_written)
    );
}

fn human_size(bytes: usize) -> String {
    let adjusted = Byte::from_u64(bytes as u64).get_appropriate_unit(UnitType::Binary);
    format!("{adjusted:.1}")
}
