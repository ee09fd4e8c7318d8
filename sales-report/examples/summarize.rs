//! Standalone dataset summary tool
//!
//! Loads a transaction CSV, runs every report and prints each section's
//! shape, without any chart rendering.
//!
//! Usage:
//!   summarize <BlackFriday.csv> [--skip-malformed]
//!
//! Example:
//!   cargo run --example summarize -- data/BlackFriday.csv

use sales_report::{
    compute_report, load_dataset, LoadConfig, ReportKind, ReportParameters, SectionContent,
};
use std::env;
use std::path::PathBuf;

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let Some(path) = args.get(1).map(PathBuf::from) else {
        eprintln!("Usage: {} <file.csv> [--skip-malformed]", args[0]);
        std::process::exit(1);
    };
    let skip = args.iter().any(|a| a == "--skip-malformed");

    let config = LoadConfig::new().with_skip_malformed_rows(skip);
    let dataset = match load_dataset(&path, &config) {
        Ok(dataset) => dataset,
        Err(e) => {
            eprintln!("Failed to load {:?}: {}", path, e);
            std::process::exit(1);
        }
    };

    println!("=== DATASET ===");
    println!("Records: {}", dataset.len());
    println!("Skipped rows: {}", dataset.summary().rows_skipped);
    println!("Columns: {}", dataset.columns().len());

    let params = ReportParameters::new();
    for kind in ReportKind::ALL {
        println!("\n=== {} ===", kind.label().to_uppercase());
        match compute_report(&dataset, kind, &params) {
            Ok(report) => {
                for section in &report.sections {
                    let shape = match &section.content {
                        SectionContent::Table(table) => format!("table, {} rows", table.len()),
                        SectionContent::Distribution(dist) => {
                            format!("{:?} chart, {} labels", dist.chart, dist.entries.len())
                        }
                        SectionContent::CrossTab(tab) => format!(
                            "cross-tab, {} x {}",
                            tab.row_labels.len(),
                            tab.series_labels.len()
                        ),
                    };
                    println!("  {:<50} {}", section.label, shape);
                }
            }
            Err(e) => println!("  error: {}", e),
        }
    }
}
