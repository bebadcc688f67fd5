use crate::types::NormalizeError;
use colored::Colorize;
use comfy_table::{Cell, Color, Table};
use std::path::PathBuf;

#[derive(Debug)]
pub struct Failure {
    pub path: PathBuf,
    pub error: NormalizeError,
}

/// Aggregated outcome of one run: how many entries were rewritten and
/// which ones failed, in the order they were encountered.
#[derive(Debug, Default)]
pub struct RunReport {
    pub processed: usize,
    pub failures: Vec<Failure>,
}

impl RunReport {
    pub fn record(&mut self, path: PathBuf, error: NormalizeError) {
        self.failures.push(Failure { path, error });
    }

    #[must_use]
    pub fn failed(&self) -> usize {
        self.failures.len()
    }
}

pub fn print_failures(report: &RunReport) {
    if report.failures.is_empty() {
        return;
    }

    println!("\n{}", "=== Failed Entries ===".cyan());

    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_HORIZONTAL_ONLY);
    table.set_header(vec!["Path", "Error", "Detail"]);

    for failure in &report.failures {
        table.add_row(vec![
            Cell::new(failure.path.display()),
            Cell::new(failure.error.kind_label()).fg(Color::Red),
            Cell::new(&failure.error),
        ]);
    }

    println!("{table}");
}

pub fn print_summary(report: &RunReport) {
    let failed = report.failed();
    println!(
        "\nProcessed {} entries. {} failed.",
        report.processed.to_string().green(),
        if failed > 0 {
            failed.to_string().red()
        } else {
            failed.to_string().green()
        },
    );
}
