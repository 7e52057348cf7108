//! Output formatting and styling module.
//!
//! Every line the tool prints goes through [`OutputFormatter`], so action lines,
//! errors and the closing summary share one style.

use crate::curator::CurationReport;
use crate::plan::DeletionReason;
use colored::*;

/// Manages all CLI output with consistent styling and formatting.
pub struct OutputFormatter;

impl OutputFormatter {
    /// Prints a success message in green with a checkmark.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use sprite_curator::output::OutputFormatter;
    /// OutputFormatter::success("File management completed.");
    /// ```
    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Prints an error message in red with an X mark to stderr.
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Prints an info message in cyan.
    pub fn info(message: &str) {
        println!("{}", message.cyan());
    }

    /// Prints a section header.
    pub fn header(header: &str) {
        println!("\n{}", header.bold());
    }

    /// Prints one deletion line, tagged with its reason.
    pub fn deleted(name: &str, reason: DeletionReason) {
        let tag = format!("Deleted ({}):", reason);
        let tag = match reason {
            DeletionReason::PrefixConflict => tag.yellow(),
            DeletionReason::Excess => tag.red(),
        };
        println!("{} {}", tag, name);
    }

    /// Prints one rename line.
    pub fn renamed(from: &str, to: &str) {
        println!("{} {} -> {}", "Renamed:".blue(), from, to.bold());
    }

    /// Prints the per-rarity summary of a finished run.
    pub fn summary_table(report: &CurationReport) {
        Self::header("SUMMARY");

        let width = report
            .retained
            .keys()
            .map(|rarity| rarity.label().len())
            .max()
            .unwrap_or(0)
            .max(6); // At least "Rarity" width

        println!("{:<width$} | {}", "Rarity".bold(), "Kept".bold(), width = width);
        println!("{}", "-".repeat(width + 10));

        for (rarity, count) in &report.retained {
            println!(
                "{:<width$} | {} {}",
                rarity.label(),
                count.to_string().green(),
                if *count == 1 { "file" } else { "files" },
                width = width
            );
        }

        println!("{}", "-".repeat(width + 10));
        println!(
            "{:<width$} | {} {}",
            "Total".bold(),
            report.total_retained().to_string().green().bold(),
            if report.total_retained() == 1 { "file" } else { "files" },
            width = width
        );
        println!(
            "Deleted: {}, renamed: {}, ignored: {}",
            report.deleted.len(),
            report.renamed.len(),
            report.ignored.len()
        );
    }
}
