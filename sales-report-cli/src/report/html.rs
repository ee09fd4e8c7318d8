//! HTML report generation
//!
//! Generates self-contained HTML pages with embedded CSS. Charts are drawn as
//! CSS width bars so the page works offline without scripts.

use super::{
    bar_units, format_number, format_percent, OutputFormat, RenderOptions, Renderer, HOME_TEXT,
    HOME_TITLE,
};
use anyhow::Result;
use sales_report::{ChartKind, CrossTab, Distribution, ReportResult, SectionContent, Table};
use std::fmt::Write;

const SERIES_COLORS: [&str; 6] = ["#ff9999", "#66b3ff", "#5cb85c", "#ffcc00", "#ff6600", "#c2c2f0"];

pub struct HtmlRenderer {
    options: RenderOptions,
}

impl HtmlRenderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    fn page(&self, title: &str, body: &str) -> String {
        format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>{css}</style>
</head>
<body>
    <div class="container">
        <h1>{title}</h1>
        <p class="meta">Generated {generated}</p>
{body}
    </div>
</body>
</html>
"#,
            title = escape_html(title),
            css = inline_css(),
            generated = self.options.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
            body = body,
        )
    }

    fn table(&self, out: &mut String, table: &Table) {
        let shown = table.rows.len().min(self.options.max_table_rows);

        out.push_str("<table>\n<thead><tr>");
        for header in &table.headers {
            let _ = write!(out, "<th>{}</th>", escape_html(header));
        }
        out.push_str("</tr></thead>\n<tbody>\n");
        for row in &table.rows[..shown] {
            out.push_str("<tr>");
            for cell in row {
                let _ = write!(out, "<td>{}</td>", escape_html(cell));
            }
            out.push_str("</tr>\n");
        }
        out.push_str("</tbody>\n</table>\n");

        if shown < table.rows.len() {
            let _ = writeln!(
                out,
                r#"<p class="note">… {} more rows</p>"#,
                table.rows.len() - shown
            );
        }
        let _ = writeln!(
            out,
            r#"<p class="note">{} rows × {} columns</p>"#,
            table.rows.len(),
            table.headers.len()
        );
    }

    fn distribution(&self, out: &mut String, dist: &Distribution) {
        let total = dist.total();
        let scale = match dist.chart {
            ChartKind::Pie => total,
            ChartKind::Bar => dist.max_value(),
        };

        let _ = writeln!(
            out,
            r#"<table class="chart {kind}">
<thead><tr><th>{category}</th><th></th><th>{measure}</th>{share}</tr></thead>
<tbody>"#,
            kind = match dist.chart {
                ChartKind::Pie => "pie",
                ChartKind::Bar => "bar",
            },
            category = escape_html(&dist.category),
            measure = escape_html(&dist.measure),
            share = if dist.chart == ChartKind::Pie { "<th>Share</th>" } else { "" },
        );

        for (i, entry) in dist.entries.iter().enumerate() {
            let width = bar_units(entry.value, scale, 100);
            let share = match dist.chart {
                ChartKind::Pie => format!("<td>{}</td>", format_percent(entry.value, total)),
                ChartKind::Bar => String::new(),
            };
            let _ = writeln!(
                out,
                r#"<tr><td>{label}</td><td class="track"><div class="fill" style="width:{width}%;background:{color}"></div></td><td class="num">{value}</td>{share}</tr>"#,
                label = escape_html(&entry.label),
                width = width,
                color = SERIES_COLORS[i % SERIES_COLORS.len()],
                value = format_number(entry.value),
                share = share,
            );
        }
        out.push_str("</tbody>\n</table>\n");
    }

    fn cross_tab(&self, out: &mut String, tab: &CrossTab) {
        let max = tab.max_count() as f64;

        out.push_str(r#"<table class="chart crosstab">"#);
        let _ = write!(out, "\n<thead><tr><th>{}</th>", escape_html(&tab.row_category));
        for (i, series) in tab.series_labels.iter().enumerate() {
            let _ = write!(
                out,
                r#"<th><span class="swatch" style="background:{}"></span>{}</th>"#,
                SERIES_COLORS[i % SERIES_COLORS.len()],
                escape_html(series)
            );
        }
        out.push_str("</tr></thead>\n<tbody>\n");

        for (row_label, counts) in tab.row_labels.iter().zip(&tab.counts) {
            let _ = write!(out, "<tr><td>{}</td>", escape_html(row_label));
            for (i, count) in counts.iter().enumerate() {
                let _ = write!(
                    out,
                    r#"<td class="track"><div class="fill" style="width:{}%;background:{}"></div><span class="num">{}</span></td>"#,
                    bar_units(*count as f64, max, 100),
                    SERIES_COLORS[i % SERIES_COLORS.len()],
                    format_number(*count as f64)
                );
            }
            out.push_str("</tr>\n");
        }
        out.push_str("</tbody>\n</table>\n");
    }
}

impl Renderer for HtmlRenderer {
    fn render_report(&self, report: &ReportResult) -> Result<String> {
        let mut body = String::new();
        for section in &report.sections {
            let _ = writeln!(body, "<section>\n<h2>{}</h2>", escape_html(&section.label));
            match &section.content {
                SectionContent::Table(table) => self.table(&mut body, table),
                SectionContent::Distribution(dist) => self.distribution(&mut body, dist),
                SectionContent::CrossTab(tab) => self.cross_tab(&mut body, tab),
            }
            body.push_str("</section>\n");
        }
        Ok(self.page(&report.title, &body))
    }

    fn render_home(&self, menu: &[&str]) -> Result<String> {
        let mut body = format!("<p>{}</p>\n<ul>\n", escape_html(HOME_TEXT));
        for label in menu {
            let _ = writeln!(body, "<li>{}</li>", escape_html(label));
        }
        body.push_str("</ul>\n");
        Ok(self.page(HOME_TITLE, &body))
    }

    fn format(&self) -> OutputFormat {
        OutputFormat::Html
    }
}

/// Escape text for element content and attribute values
pub(crate) fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

fn inline_css() -> &'static str {
    r#"
body { font-family: -apple-system, "Segoe UI", Roboto, sans-serif; margin: 0; background: #f5f5f5; color: #222; }
.container { max-width: 1100px; margin: 0 auto; padding: 24px; }
h1 { margin-bottom: 4px; }
.meta, .note { color: #777; font-size: 0.85em; }
section { background: #fff; border-radius: 6px; padding: 12px 20px; margin: 16px 0; box-shadow: 0 1px 3px rgba(0,0,0,0.1); }
table { border-collapse: collapse; width: 100%; font-size: 0.9em; }
th, td { padding: 4px 8px; border-bottom: 1px solid #eee; text-align: left; }
td.num, .num { text-align: right; font-variant-numeric: tabular-nums; }
td.track { width: 55%; }
.fill { height: 14px; display: inline-block; vertical-align: middle; margin-right: 6px; }
.swatch { display: inline-block; width: 10px; height: 10px; margin-right: 4px; }
"#
}
