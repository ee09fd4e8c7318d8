//! Sales Report CLI Application
//!
//! This is the command-line interface for the sales report generator.
//! It uses the sales-report library and adds:
//! - Menu dispatch by page label (one-shot or interactive session)
//! - Report rendering (TXT/HTML/JSON)
//! - Configuration file support

use anyhow::{Context, Result};
use clap::Parser;
use sales_report::{load_dataset, Dataset};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

mod config;
mod menu;
mod report;

use menu::{Outcome, RenderedPage, Session};
use report::{OutputFormat, RenderOptions};

/// Sales Report - Descriptive statistics over retail transactions
#[derive(Parser, Debug)]
#[command(name = "sales-report-cli")]
#[command(about = "Grouped counts, sums and unique counts over a retail transaction CSV", long_about = None)]
#[command(version)]
struct Args {
    /// Path to the transaction CSV file
    #[arg(short, long, value_name = "FILE")]
    data: Option<PathBuf>,

    /// Menu page to render (can be repeated), e.g. "Purchase Analysis"
    #[arg(short, long, value_name = "LABEL")]
    report: Vec<String>,

    /// Read page labels from stdin, one per line
    #[arg(short, long)]
    interactive: bool,

    /// Print the menu labels and exit
    #[arg(long)]
    list: bool,

    /// Output format (overrides config)
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Write each page into this directory instead of stdout
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Maximum table rows to print (overrides config)
    #[arg(long, value_name = "COUNT")]
    max_rows: Option<usize>,

    /// Skip rows that fail to parse instead of aborting
    #[arg(long)]
    skip_malformed: bool,

    /// Path to configuration file (config.toml)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Verbosity level (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging
    init_logging(args.verbose, args.quiet);

    log::info!("Sales Report CLI v{}", env!("CARGO_PKG_VERSION"));
    log::debug!("Using report library v{}", sales_report::VERSION);

    if args.list {
        for label in menu::menu_labels() {
            println!("{}", label);
        }
        return Ok(());
    }

    let mut app_config = match &args.config {
        Some(path) => {
            log::info!("Loading configuration from: {:?}", path);
            config::load_config(path)?
        }
        None => config::AppConfig::default(),
    };
    apply_overrides(&mut app_config, &args);

    let Some(data_path) = app_config.input.file.clone() else {
        println!("Sales Report - No dataset specified");
        println!("\nQuick Start:");
        println!("  sales-report-cli --data BlackFriday.csv --report \"Purchase Analysis\"");
        println!("  sales-report-cli --data BlackFriday.csv --interactive");
        println!("\nUse --list to see the menu, --help for more options");
        return Ok(());
    };

    let load_config = app_config.input.load_config()?;
    let dataset = load_dataset(&data_path, &load_config)
        .with_context(|| format!("Failed to load dataset: {:?}", data_path))?;

    let options = RenderOptions {
        max_table_rows: app_config.output.max_table_rows,
        bar_width: app_config.output.bar_width,
        ..RenderOptions::default()
    };
    let renderer = report::renderer_for(app_config.output.format, options);
    let output_dir = app_config.output.output_dir.as_deref();

    if args.interactive {
        interactive_mode(&dataset, renderer.as_ref(), output_dir)
    } else {
        one_shot_mode(&dataset, renderer.as_ref(), output_dir, &args.report)
    }
}

/// Command line flags take precedence over the config file
fn apply_overrides(app_config: &mut config::AppConfig, args: &Args) {
    if let Some(data) = &args.data {
        app_config.input.file = Some(data.clone());
    }
    if args.skip_malformed {
        app_config.input.skip_malformed_rows = true;
    }
    if let Some(format) = args.format {
        app_config.output.format = format;
    }
    if let Some(dir) = &args.output_dir {
        app_config.output.output_dir = Some(dir.clone());
    }
    if let Some(rows) = args.max_rows {
        app_config.output.max_table_rows = rows;
    }
}

/// Render each requested page in order; the home page when none is given
fn one_shot_mode(
    dataset: &Dataset,
    renderer: &dyn report::Renderer,
    output_dir: Option<&Path>,
    labels: &[String],
) -> Result<()> {
    let mut session = Session::new(dataset, renderer);
    let labels: Vec<&str> = if labels.is_empty() {
        vec![menu::HOME_LABEL]
    } else {
        labels.iter().map(String::as_str).collect()
    };

    let stdout = io::stdout();
    render_labels(&mut session, &labels, output_dir, &mut stdout.lock())
}

/// Render `labels` in order; a failing report is printed and the rest still run
fn render_labels<W: Write>(
    session: &mut Session<'_>,
    labels: &[&str],
    output_dir: Option<&Path>,
    out: &mut W,
) -> Result<()> {
    let format = session.format();
    for &label in labels {
        match session.select(label)? {
            Outcome::Rendered => {
                if let Some(page) = session.current() {
                    emit_page(page, format, output_dir, out)?;
                }
            }
            Outcome::Ignored => log::info!("Ignoring unknown page: {:?}", label),
            Outcome::Failed(e) => writeln!(out, "Error: {}", e)?,
        }
    }
    Ok(())
}

/// Session reading page labels from stdin
fn interactive_mode(
    dataset: &Dataset,
    renderer: &dyn report::Renderer,
    output_dir: Option<&Path>,
) -> Result<()> {
    let mut session = Session::new(dataset, renderer);
    let format = renderer.format();

    let stdin = io::stdin();
    let stdout = io::stdout();
    menu::run_interactive(&mut session, stdin.lock(), stdout.lock(), |page, out| {
        emit_page(page, format, output_dir, out)
    })
}

/// Print a page, or write it to the output directory
fn emit_page<W: Write>(
    page: &RenderedPage,
    format: OutputFormat,
    output_dir: Option<&Path>,
    out: &mut W,
) -> Result<()> {
    match output_dir {
        Some(dir) => {
            let path = report::write_page(dir, &page.label, format, &page.body)?;
            writeln!(out, "✓ {} → {}", page.label, path.display())?;
        }
        None => {
            writeln!(out, "{}", page.body)?;
        }
    }
    Ok(())
}

/// Initialize logging based on verbosity level
fn init_logging(verbose: u8, quiet: bool) {
    use env_logger::Builder;
    use log::LevelFilter;

    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    Builder::new()
        .filter_level(level)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_parse() {
        let args = Args::parse_from([
            "sales-report-cli",
            "--data",
            "BlackFriday.csv",
            "--report",
            "Purchase Analysis",
            "--report",
            "Data Overview",
            "--format",
            "html",
            "-vv",
        ]);
        assert_eq!(args.data, Some(PathBuf::from("BlackFriday.csv")));
        assert_eq!(args.report, vec!["Purchase Analysis", "Data Overview"]);
        assert_eq!(args.format, Some(OutputFormat::Html));
        assert_eq!(args.verbose, 2);
    }

    #[test]
    fn test_overrides_take_precedence() {
        let mut app_config: config::AppConfig = toml::from_str(
            "[input]\nfile = \"a.csv\"\n[output]\nformat = \"json\"\nmax_table_rows = 5\n",
        )
        .unwrap();
        let args = Args::parse_from(["sales-report-cli", "--data", "b.csv", "--max-rows", "50"]);
        apply_overrides(&mut app_config, &args);

        assert_eq!(app_config.input.file, Some(PathBuf::from("b.csv")));
        assert_eq!(app_config.output.format, OutputFormat::Json);
        assert_eq!(app_config.output.max_table_rows, 50);
    }

    #[test]
    fn test_failed_report_does_not_stop_later_pages() {
        use sales_report::{AgeBracket, CityCategory, Column, Gender, StayYears, TransactionRecord};

        let record = TransactionRecord {
            user_id: "1000001".to_string(),
            product_id: "P00069042".to_string(),
            gender: Gender::Female,
            age: AgeBracket::From18To25,
            occupation: 10,
            city_category: CityCategory::A,
            stay_in_current_city_years: StayYears::Two,
            marital_status: false,
            product_category_1: 3,
            product_category_2: None,
            product_category_3: None,
            purchase: 8370.0,
        };
        let dataset = Dataset::with_columns(vec![record], vec![Column::Gender]);
        let renderer = report::renderer_for(OutputFormat::Txt, RenderOptions::default());
        let mut session = Session::new(&dataset, renderer.as_ref());

        let dir = tempfile::tempdir().unwrap();
        let mut out = Vec::new();
        render_labels(
            &mut session,
            &["Purchase Analysis", "Data Overview", "Home"],
            Some(dir.path()),
            &mut out,
        )
        .unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Error: Missing column: Age"));
        assert!(dir.path().join("data-overview.txt").exists());
        assert!(dir.path().join("home.txt").exists());
        assert!(!dir.path().join("purchase-analysis.txt").exists());
    }

    #[test]
    fn test_emit_page_to_directory() {
        let dir = tempfile::tempdir().unwrap();
        let page = RenderedPage {
            label: "Data Overview".to_string(),
            body: "body".to_string(),
        };
        let mut out = Vec::new();
        emit_page(&page, OutputFormat::Txt, Some(dir.path()), &mut out).unwrap();

        assert!(dir.path().join("data-overview.txt").exists());
        assert!(String::from_utf8(out).unwrap().contains("Data Overview"));
    }
}
