//! Report rendering
//!
//! Turns a computed [`ReportResult`] into TXT, HTML or JSON output. The core
//! library knows nothing about these formats.

pub mod html;
pub mod json;
pub mod txt;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sales_report::ReportResult;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Output format of rendered pages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Txt,
    Html,
    Json,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Txt => "txt",
            OutputFormat::Html => "html",
            OutputFormat::Json => "json",
        }
    }
}

/// Layout knobs shared by all renderers
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Tables longer than this are truncated
    pub max_table_rows: usize,
    /// Width of the longest bar in text output, in characters
    pub bar_width: usize,
    pub generated_at: DateTime<Utc>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            max_table_rows: 20,
            bar_width: 40,
            generated_at: Utc::now(),
        }
    }
}

/// A rendering collaborator for report pages
pub trait Renderer {
    /// Render one computed report
    fn render_report(&self, report: &ReportResult) -> Result<String>;

    /// Render the welcome page listing the menu
    fn render_home(&self, menu: &[&str]) -> Result<String>;

    fn format(&self) -> OutputFormat;
}

/// Create the renderer for an output format
pub fn renderer_for(format: OutputFormat, options: RenderOptions) -> Box<dyn Renderer> {
    match format {
        OutputFormat::Txt => Box::new(txt::TxtRenderer::new(options)),
        OutputFormat::Html => Box::new(html::HtmlRenderer::new(options)),
        OutputFormat::Json => Box::new(json::JsonRenderer::new(options)),
    }
}

/// Title and welcome text of the home page
pub(crate) const HOME_TITLE: &str = "Black Friday Sale Data Analysis";
pub(crate) const HOME_TEXT: &str =
    "Welcome to the Black Friday Sale Data Analysis report. Select a page from the menu to explore insights from the dataset.";

/// Format a number with thousands separators; whole numbers drop decimals
pub(crate) fn format_number(value: f64) -> String {
    let text = if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.2}", value)
    };

    let (sign, rest) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.as_str()),
    };
    let (int_part, frac_part) = match rest.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (rest, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match frac_part {
        Some(f) => format!("{}{}.{}", sign, grouped, f),
        None => format!("{}{}", sign, grouped),
    }
}

/// Share of `value` in `total` as a percentage (autopct style, one decimal)
pub(crate) fn format_percent(value: f64, total: f64) -> String {
    if total <= 0.0 {
        return "0.0%".to_string();
    }
    format!("{:.1}%", value / total * 100.0)
}

/// Number of bar units for `value` when `max` maps to `width`
pub(crate) fn bar_units(value: f64, max: f64, width: usize) -> usize {
    if max <= 0.0 || value <= 0.0 {
        return 0;
    }
    ((value / max) * width as f64).round() as usize
}

/// File-name friendly form of a page label
pub fn slugify(label: &str) -> String {
    let mut slug = String::with_capacity(label.len());
    for ch in label.chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    slug.trim_end_matches('-').to_string()
}

/// Write a rendered page into `dir`, returning the path written
pub fn write_page(dir: &Path, label: &str, format: OutputFormat, body: &str) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory: {:?}", dir))?;
    let path = dir.join(format!("{}.{}", slugify(label), format.extension()));
    fs::write(&path, body).with_context(|| format!("Failed to write report: {:?}", path))?;
    log::info!("Wrote {:?}", path);
    Ok(path)
}
