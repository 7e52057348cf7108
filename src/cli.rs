//! Command-line interface module for sprite-curator.
//!
//! This module handles argument parsing and runs one curation pass over the
//! directory named on the command line.

use crate::config::CurationRules;
use crate::curator::{CurateResult, CurationReport, Curator};
use crate::output::OutputFormatter;
use clap::Parser;
use std::path::{Path, PathBuf};

/// Trim a sprite folder to its per-rarity quotas and renumber what is left.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Directory holding the `<n>_BBTap_<Rarity>.png` files
    pub directory: PathBuf,
}

/// Runs one curation pass over `dir_path` with the built-in rules.
///
/// Progress lines are printed while files are deleted and renamed, followed by
/// a summary table.
///
/// # Examples
///
/// ```no_run
/// use sprite_curator::cli::run_cli;
/// use std::path::Path;
///
/// match run_cli(Path::new("/path/to/sprites")) {
///     Ok(report) => println!("{} sprites left", report.total_retained()),
///     Err(e) => eprintln!("Error: {}", e),
/// }
/// ```
pub fn run_cli(dir_path: &Path) -> CurateResult<CurationReport> {
    let curator = Curator::new(dir_path);
    OutputFormatter::info(&format!(
        "Curating sprites in: {}",
        curator.directory().display()
    ));

    let rules = CurationRules::builtin()?;
    let report = curator.run(&rules)?;

    OutputFormatter::summary_table(&report);
    OutputFormatter::success("File management completed.");

    Ok(report)
}
