//! Plain text renderer (ASCII tables and bar charts)

use super::{
    bar_units, format_number, format_percent, OutputFormat, RenderOptions, Renderer, HOME_TEXT,
    HOME_TITLE,
};
use anyhow::Result;
use sales_report::{ChartKind, CrossTab, Distribution, ReportResult, SectionContent, Table};
use std::fmt::Write;

const RULE: &str = "═══════════════════════════════════════════════";
const BAR: char = '█';

pub struct TxtRenderer {
    options: RenderOptions,
}

impl TxtRenderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    fn header(&self, out: &mut String, title: &str) {
        let _ = writeln!(out, "{}", RULE);
        let _ = writeln!(out, "  {}", title);
        let _ = writeln!(out, "{}", RULE);
        let _ = writeln!(
            out,
            "Generated: {}\n",
            self.options.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        );
    }

    fn table(&self, out: &mut String, table: &Table) {
        let shown = table.rows.len().min(self.options.max_table_rows);

        let mut widths: Vec<usize> = table.headers.iter().map(|h| h.chars().count()).collect();
        for row in &table.rows[..shown] {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let line = |cells: &[String]| -> String {
            cells
                .iter()
                .zip(&widths)
                .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
                .collect::<Vec<_>>()
                .join(" | ")
        };

        let _ = writeln!(out, "  {}", line(&table.headers));
        let _ = writeln!(
            out,
            "  {}",
            widths.iter().map(|w| "-".repeat(*w)).collect::<Vec<_>>().join("-+-")
        );
        for row in &table.rows[..shown] {
            let _ = writeln!(out, "  {}", line(row));
        }

        if table.rows.is_empty() {
            let _ = writeln!(out, "  (no rows)");
        } else if shown < table.rows.len() {
            let _ = writeln!(out, "  … {} more rows", table.rows.len() - shown);
        }
        let _ = writeln!(out, "  [{} rows x {} columns]", table.rows.len(), table.headers.len());
    }

    fn distribution(&self, out: &mut String, dist: &Distribution) {
        let label_width = dist
            .entries
            .iter()
            .map(|e| e.label.chars().count())
            .chain(std::iter::once(dist.category.chars().count()))
            .max()
            .unwrap_or(0);
        let values: Vec<String> = dist.entries.iter().map(|e| format_number(e.value)).collect();
        let value_width = values.iter().map(|v| v.len()).max().unwrap_or(0);

        let total = dist.total();
        let max = dist.max_value();
        let _ = writeln!(out, "  {:<lw$}  {}", dist.category, dist.measure, lw = label_width);

        for (entry, value) in dist.entries.iter().zip(&values) {
            match dist.chart {
                ChartKind::Pie => {
                    let units = bar_units(entry.value, total, self.options.bar_width);
                    let _ = writeln!(
                        out,
                        "  {:<lw$}  {:>vw$}  {:>6}  {}",
                        entry.label,
                        value,
                        format_percent(entry.value, total),
                        BAR.to_string().repeat(units),
                        lw = label_width,
                        vw = value_width
                    );
                }
                ChartKind::Bar => {
                    let units = bar_units(entry.value, max, self.options.bar_width);
                    let _ = writeln!(
                        out,
                        "  {:<lw$}  {}  {:>vw$}",
                        entry.label,
                        format!(
                            "{:<bw$}",
                            BAR.to_string().repeat(units),
                            bw = self.options.bar_width
                        ),
                        value,
                        lw = label_width,
                        vw = value_width
                    );
                }
            }
        }

        if dist.entries.is_empty() {
            let _ = writeln!(out, "  (no data)");
        }
    }

    fn cross_tab(&self, out: &mut String, tab: &CrossTab) {
        let label_width = tab
            .row_labels
            .iter()
            .chain(&tab.series_labels)
            .map(|l| l.chars().count())
            .max()
            .unwrap_or(0);
        let max = tab.max_count() as f64;

        let _ = writeln!(
            out,
            "  {} by {}",
            tab.row_category, tab.series_category
        );
        for (row_label, counts) in tab.row_labels.iter().zip(&tab.counts) {
            let _ = writeln!(out, "  {}", row_label);
            for (series_label, count) in tab.series_labels.iter().zip(counts) {
                let units = bar_units(*count as f64, max, self.options.bar_width);
                let _ = writeln!(
                    out,
                    "    {:<lw$}  {} {}",
                    series_label,
                    BAR.to_string().repeat(units),
                    format_number(*count as f64),
                    lw = label_width
                );
            }
        }
    }
}

impl Renderer for TxtRenderer {
    fn render_report(&self, report: &ReportResult) -> Result<String> {
        let mut out = String::new();
        self.header(&mut out, &report.title);

        for section in &report.sections {
            let _ = writeln!(out, "── {} ──", section.label);
            match &section.content {
                SectionContent::Table(table) => self.table(&mut out, table),
                SectionContent::Distribution(dist) => self.distribution(&mut out, dist),
                SectionContent::CrossTab(tab) => self.cross_tab(&mut out, tab),
            }
            out.push('\n');
        }

        Ok(out)
    }

    fn render_home(&self, menu: &[&str]) -> Result<String> {
        let mut out = String::new();
        self.header(&mut out, HOME_TITLE);
        let _ = writeln!(out, "{}\n", HOME_TEXT);
        let _ = writeln!(out, "Menu:");
        for label in menu {
            let _ = writeln!(out, "  • {}", label);
        }
        Ok(out)
    }

    fn format(&self) -> OutputFormat {
        OutputFormat::Txt
    }
}
