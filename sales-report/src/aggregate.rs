//! Grouping primitives
//!
//! Column-generic group-by reductions over a slice of records. Groups are
//! emitted in order of first occurrence. A null grouping cell forms its own
//! `NaN` group, so group totals always cover every record. Sorting helpers
//! are stable, so ties keep first-occurrence order.

use crate::result::CrossTab;
use crate::types::{Column, ReportError, Result, TransactionRecord};
use std::collections::{HashMap, HashSet};

/// Fold every group of `column` into an accumulator
fn fold_groups<T, I, F>(
    records: &[TransactionRecord],
    column: Column,
    init: I,
    mut step: F,
) -> Vec<(String, T)>
where
    I: Fn() -> T,
    F: FnMut(&mut T, &TransactionRecord),
{
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<(String, T)> = Vec::new();

    for record in records {
        let label = record.cell(column).to_string();
        let slot = match index.get(&label) {
            Some(&slot) => slot,
            None => {
                index.insert(label.clone(), groups.len());
                groups.push((label, init()));
                groups.len() - 1
            }
        };
        step(&mut groups[slot].1, record);
    }

    groups
}

/// Number of records per value of `column`
pub fn group_count(records: &[TransactionRecord], column: Column) -> Vec<(String, u64)> {
    fold_groups(records, column, || 0u64, |count, _| *count += 1)
}

/// Sum of the numeric column `value` per value of `by`; null values add nothing
pub fn group_sum(
    records: &[TransactionRecord],
    by: Column,
    value: Column,
) -> Result<Vec<(String, f64)>> {
    if !value.kind().is_numeric() {
        return Err(ReportError::NonNumericColumn(value.header().to_string()));
    }
    Ok(fold_groups(records, by, || 0.0f64, |sum, record| {
        if let Some(v) = record.cell(value).as_f64() {
            *sum += v;
        }
    }))
}

/// Number of distinct non-null values of `of` per value of `by`
pub fn unique_count(records: &[TransactionRecord], by: Column, of: Column) -> Vec<(String, u64)> {
    fold_groups(records, by, HashSet::<String>::new, |seen, record| {
        let cell = record.cell(of);
        if !cell.is_null() {
            seen.insert(cell.to_string());
        }
    })
    .into_iter()
    .map(|(label, seen)| (label, seen.len() as u64))
    .collect()
}

/// Record counts for every pair of `rows` and `series` values
pub fn cross_count(records: &[TransactionRecord], rows: Column, series: Column) -> CrossTab {
    let mut series_labels: Vec<String> = Vec::new();
    let mut series_index: HashMap<String, usize> = HashMap::new();

    let grouped = fold_groups(records, rows, HashMap::<usize, u64>::new, |counts, record| {
        let label = record.cell(series).to_string();
        let slot = match series_index.get(&label) {
            Some(&slot) => slot,
            None => {
                series_index.insert(label.clone(), series_labels.len());
                series_labels.push(label);
                series_labels.len() - 1
            }
        };
        *counts.entry(slot).or_insert(0) += 1;
    });

    let mut row_labels = Vec::with_capacity(grouped.len());
    let mut counts = Vec::with_capacity(grouped.len());
    for (label, by_series) in grouped {
        row_labels.push(label);
        counts.push(
            (0..series_labels.len())
                .map(|slot| by_series.get(&slot).copied().unwrap_or(0))
                .collect(),
        );
    }

    CrossTab {
        row_category: rows.header().to_string(),
        series_category: series.header().to_string(),
        row_labels,
        series_labels,
        counts,
    }
}

/// Null cells per column
pub fn null_counts(records: &[TransactionRecord], columns: &[Column]) -> Vec<(Column, u64)> {
    columns
        .iter()
        .map(|&column| {
            let nulls = records.iter().filter(|r| r.cell(column).is_null()).count();
            (column, nulls as u64)
        })
        .collect()
}

/// Number of distinct non-null values in a column
pub fn distinct_count(records: &[TransactionRecord], column: Column) -> u64 {
    records
        .iter()
        .map(|r| r.cell(column))
        .filter(|c| !c.is_null())
        .map(|c| c.to_string())
        .collect::<HashSet<_>>()
        .len() as u64
}

/// Records with no null cell in any of `columns`
pub fn drop_null_rows<'a>(
    records: &'a [TransactionRecord],
    columns: &[Column],
) -> Vec<&'a TransactionRecord> {
    records
        .iter()
        .filter(|r| columns.iter().all(|&c| !r.cell(c).is_null()))
        .collect()
}

/// Stable ascending sort by count
pub fn sort_counts_ascending(groups: &mut [(String, u64)]) {
    groups.sort_by_key(|(_, count)| *count);
}

/// Stable ascending sort by summed value
pub fn sort_sums_ascending(groups: &mut [(String, f64)]) {
    groups.sort_by(|a, b| a.1.total_cmp(&b.1));
}
