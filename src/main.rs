mod normalizer;
mod report;
mod types;

use chrono::Local;
use clap::Parser;
use colored::Colorize;
use std::path::PathBuf;
use types::RunConfig;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Root directories whose trees get their timestamps normalized,
    /// processed in order
    #[arg(required = true)]
    roots: Vec<PathBuf>,

    /// Leave write-protected entries untouched instead of clearing the
    /// read-only attribute before rewriting their timestamps
    #[arg(long)]
    keep_readonly: bool,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let config = RunConfig {
        roots: args.roots,
        clear_readonly: !args.keep_readonly,
    };

    println!(
        "{}",
        format!(
            "=== Timestamp Normalization: {} ===",
            Local::now().format("%Y-%m-%d %H:%M")
        )
        .cyan()
    );
    for root in &config.roots {
        println!("Root: {}", root.display());
    }

    let run_report = normalizer::run(&config);

    report::print_failures(&run_report);
    report::print_summary(&run_report);

    if run_report.failed() > 0 {
        std::process::exit(1);
    }
}
