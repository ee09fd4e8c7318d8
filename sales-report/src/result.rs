//! Report output types
//!
//! A [`ReportResult`] is an ordered list of labelled sections. Each section is
//! either a row table, a categorical distribution (pie or bar) or a two-way
//! count table. These are plain data; rendering is left to the caller.

use serde::{Deserialize, Serialize};

/// Rendering hint for a categorical distribution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Pie,
    Bar,
}

/// A row table with string cells
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: Vec<String>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        debug_assert_eq!(row.len(), self.headers.len());
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a header, if present
    pub fn column_index(&self, header: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == header)
    }
}

/// One label of a distribution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionEntry {
    pub label: String,
    pub value: f64,
}

/// Ordered mapping from category label to a numeric value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Distribution {
    pub chart: ChartKind,
    /// Name of the grouping column
    pub category: String,
    /// Name of the measured quantity (e.g. "Count", "Purchase")
    pub measure: String,
    pub entries: Vec<DistributionEntry>,
}

impl Distribution {
    pub fn new(chart: ChartKind, category: impl Into<String>, measure: impl Into<String>) -> Self {
        Self {
            chart,
            category: category.into(),
            measure: measure.into(),
            entries: Vec::new(),
        }
    }

    pub fn push(&mut self, label: impl Into<String>, value: f64) {
        self.entries.push(DistributionEntry {
            label: label.into(),
            value,
        });
    }

    /// Value recorded for a label
    pub fn get(&self, label: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|e| e.label == label)
            .map(|e| e.value)
    }

    pub fn labels(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.label.as_str()).collect()
    }

    pub fn total(&self) -> f64 {
        self.entries.iter().map(|e| e.value).sum()
    }

    /// Largest value, or zero when empty
    pub fn max_value(&self) -> f64 {
        self.entries.iter().map(|e| e.value).fold(0.0, f64::max)
    }
}

/// Counts over the product of two categorical columns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrossTab {
    /// Name of the column along the rows
    pub row_category: String,
    /// Name of the column whose values form the series
    pub series_category: String,
    pub row_labels: Vec<String>,
    pub series_labels: Vec<String>,
    /// `counts[row][series]`
    pub counts: Vec<Vec<u64>>,
}

impl CrossTab {
    pub fn count(&self, row: &str, series: &str) -> Option<u64> {
        let r = self.row_labels.iter().position(|l| l == row)?;
        let s = self.series_labels.iter().position(|l| l == series)?;
        Some(self.counts[r][s])
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().flatten().sum()
    }

    pub fn max_count(&self) -> u64 {
        self.counts.iter().flatten().copied().max().unwrap_or(0)
    }
}

/// Content of one report section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SectionContent {
    Table(Table),
    Distribution(Distribution),
    CrossTab(CrossTab),
}

/// A labelled piece of a report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSection {
    pub label: String,
    pub content: SectionContent,
}

/// The output of one report computation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportResult {
    /// Display title of the report
    pub title: String,
    pub sections: Vec<ReportSection>,
}

impl ReportResult {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            sections: Vec::new(),
        }
    }

    /// Append a section; labels are unique within a report
    pub fn push(&mut self, label: impl Into<String>, content: SectionContent) {
        let label = label.into();
        debug_assert!(self.section(&label).is_none(), "duplicate section {}", label);
        self.sections.push(ReportSection { label, content });
    }

    pub fn section(&self, label: &str) -> Option<&SectionContent> {
        self.sections
            .iter()
            .find(|s| s.label == label)
            .map(|s| &s.content)
    }

    pub fn table(&self, label: &str) -> Option<&Table> {
        match self.section(label)? {
            SectionContent::Table(table) => Some(table),
            _ => None,
        }
    }

    pub fn distribution(&self, label: &str) -> Option<&Distribution> {
        match self.section(label)? {
            SectionContent::Distribution(dist) => Some(dist),
            _ => None,
        }
    }

    pub fn cross_tab(&self, label: &str) -> Option<&CrossTab> {
        match self.section(label)? {
            SectionContent::CrossTab(tab) => Some(tab),
            _ => None,
        }
    }

    pub fn labels(&self) -> Vec<&str> {
        self.sections.iter().map(|s| s.label.as_str()).collect()
    }
}
