//! Immutable transaction dataset
//!
//! A [`Dataset`] is loaded once and then passed by reference to every report.
//! It owns the parsed records together with the set of columns the source
//! actually provided, so missing columns are known before any report runs.

use crate::config::LoadConfig;
use crate::loader::{read_rows, LoadSummary};
use crate::types::{Column, ReportError, Result, TransactionRecord};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

/// The full record set of one session
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Vec<TransactionRecord>,
    columns: Vec<Column>,
    source: Option<PathBuf>,
    summary: LoadSummary,
}

impl Dataset {
    /// Build a dataset from in-memory records with the complete schema
    pub fn new(records: Vec<TransactionRecord>) -> Self {
        Self::with_columns(records, Column::ALL.to_vec())
    }

    /// Build a dataset from in-memory records that only provides `columns`
    pub fn with_columns(records: Vec<TransactionRecord>, columns: Vec<Column>) -> Self {
        let summary = LoadSummary {
            rows_loaded: records.len(),
            rows_skipped: 0,
        };
        Self {
            records,
            columns,
            source: None,
            summary,
        }
    }

    pub fn records(&self) -> &[TransactionRecord] {
        &self.records
    }

    /// Columns present in the source, in schema order
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn has_column(&self, column: Column) -> bool {
        self.columns.contains(&column)
    }

    /// Fail with `MissingColumn` unless every column in `required` is present
    pub fn require(&self, required: &[Column]) -> Result<()> {
        match required.iter().find(|c| !self.has_column(**c)) {
            Some(missing) => Err(ReportError::MissingColumn(missing.header().to_string())),
            None => Ok(()),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Path the dataset was loaded from, if any
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn summary(&self) -> &LoadSummary {
        &self.summary
    }
}

/// Load a dataset from a delimited file on disk
///
/// # Example
/// ```no_run
/// use sales_report::{load_dataset, LoadConfig};
/// use std::path::Path;
///
/// let dataset = load_dataset(Path::new("BlackFriday.csv"), &LoadConfig::new()).unwrap();
/// println!("{} records", dataset.len());
/// ```
pub fn load_dataset(path: &Path, config: &LoadConfig) -> Result<Dataset> {
    log::info!("Loading dataset: {:?}", path);

    let file = File::open(path)?;
    let mut dataset = read_dataset(BufReader::new(file), config)?;
    dataset.source = Some(path.to_path_buf());

    log::info!(
        "Dataset loaded: {} records ({} skipped) from {:?}",
        dataset.summary.rows_loaded,
        dataset.summary.rows_skipped,
        path
    );
    Ok(dataset)
}

/// Read a dataset from any reader producing delimited text
pub fn read_dataset<R: Read>(reader: R, config: &LoadConfig) -> Result<Dataset> {
    let rows = read_rows(reader, config)?;
    Ok(Dataset {
        records: rows.records,
        columns: rows.columns,
        source: None,
        summary: rows.summary,
    })
}
