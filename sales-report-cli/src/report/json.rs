//! JSON renderer
//!
//! Serializes the report structure as-is, wrapped with the generation time.

use super::{OutputFormat, RenderOptions, Renderer, HOME_TEXT, HOME_TITLE};
use anyhow::{Context, Result};
use sales_report::ReportResult;
use serde_json::json;

pub struct JsonRenderer {
    options: RenderOptions,
}

impl JsonRenderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }
}

impl Renderer for JsonRenderer {
    fn render_report(&self, report: &ReportResult) -> Result<String> {
        let document = json!({
            "generated_at": self.options.generated_at.to_rfc3339(),
            "report": report,
        });
        serde_json::to_string_pretty(&document).context("Failed to serialize report")
    }

    fn render_home(&self, menu: &[&str]) -> Result<String> {
        let document = json!({
            "generated_at": self.options.generated_at.to_rfc3339(),
            "title": HOME_TITLE,
            "message": HOME_TEXT,
            "menu": menu,
        });
        serde_json::to_string_pretty(&document).context("Failed to serialize home page")
    }

    fn format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use sales_report::{ChartKind, Distribution, SectionContent};

    #[test]
    fn test_report_document() {
        let renderer = JsonRenderer::new(RenderOptions {
            generated_at: Utc.with_ymd_and_hms(2024, 11, 29, 9, 0, 0).unwrap(),
            ..RenderOptions::default()
        });

        let mut dist = Distribution::new(ChartKind::Bar, "City_Category", "Count");
        dist.push("B", 5.0);
        let mut report = ReportResult::new("City & Occupation Analysis");
        report.push("City Category Distribution", SectionContent::Distribution(dist));

        let text = renderer.render_report(&report).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["generated_at"], "2024-11-29T09:00:00+00:00");
        assert_eq!(value["report"]["title"], "City & Occupation Analysis");
        assert_eq!(value["report"]["sections"][0]["content"]["entries"][0]["value"], 5.0);
    }

    #[test]
    fn test_home_document() {
        let renderer = JsonRenderer::new(RenderOptions::default());
        let value: serde_json::Value =
            serde_json::from_str(&renderer.render_home(&["Home"]).unwrap()).unwrap();
        assert_eq!(value["menu"][0], "Home");
    }
}
