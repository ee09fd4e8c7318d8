//! Report generator
//!
//! Each [`ReportKind`] is a fixed, stateless list of sections computed from the
//! dataset. [`compute_report`] is the only entry point; it never mutates the
//! dataset and produces the same result for the same input.

use crate::aggregate::{
    cross_count, distinct_count, drop_null_rows, group_count, group_sum, null_counts,
    sort_counts_ascending, sort_sums_ascending, unique_count,
};
use crate::dataset::Dataset;
use crate::result::{ChartKind, Distribution, ReportResult, SectionContent, Table};
use crate::types::{Column, ReportError, Result, TransactionRecord};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The four report pages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReportKind {
    Overview,
    GenderAge,
    Purchase,
    CityOccupation,
}

impl ReportKind {
    /// All reports in menu order
    pub const ALL: [ReportKind; 4] = [
        ReportKind::Overview,
        ReportKind::GenderAge,
        ReportKind::Purchase,
        ReportKind::CityOccupation,
    ];

    /// Menu label of the report
    pub fn label(&self) -> &'static str {
        match self {
            ReportKind::Overview => "Data Overview",
            ReportKind::GenderAge => "Gender & Age Analysis",
            ReportKind::Purchase => "Purchase Analysis",
            ReportKind::CityOccupation => "City & Occupation Analysis",
        }
    }

    /// Exact label match; anything else selects nothing
    pub fn from_label(label: &str) -> Option<ReportKind> {
        ReportKind::ALL.iter().copied().find(|k| k.label() == label)
    }

    /// Columns read by the report's sections
    pub fn required_columns(&self) -> &'static [Column] {
        match self {
            ReportKind::Overview => &[],
            ReportKind::GenderAge => &[Column::Gender, Column::Age, Column::ProductId],
            ReportKind::Purchase => &[
                Column::Age,
                Column::Purchase,
                Column::MaritalStatus,
                Column::ProductCategory1,
            ],
            ReportKind::CityOccupation => &[
                Column::CityCategory,
                Column::StayInCurrentCityYears,
                Column::Occupation,
                Column::Purchase,
            ],
        }
    }

    /// False for diagnostic reports that are meaningful on an empty dataset
    pub fn requires_groups(&self) -> bool {
        !matches!(self, ReportKind::Overview)
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Report parameters; no report currently takes any
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct ReportParameters {}

impl ReportParameters {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Compute every section of a report
///
/// # Errors
/// * `MissingColumn` if the dataset lacks a column the report reads
/// * `EmptyDataset` if the dataset is empty and the report needs groups
///
/// # Example
/// ```
/// use sales_report::{compute_report, Dataset, ReportKind, ReportParameters};
///
/// let dataset = Dataset::new(Vec::new());
/// let overview = compute_report(&dataset, ReportKind::Overview, &ReportParameters::new()).unwrap();
/// assert!(overview.table("Null Values").is_some());
/// ```
pub fn compute_report(
    dataset: &Dataset,
    kind: ReportKind,
    _params: &ReportParameters,
) -> Result<ReportResult> {
    log::debug!("Computing report: {} ({} records)", kind, dataset.len());

    dataset.require(kind.required_columns())?;
    if kind.requires_groups() && dataset.is_empty() {
        return Err(ReportError::EmptyDataset);
    }

    let records = dataset.records();
    let report = match kind {
        ReportKind::Overview => overview(dataset),
        ReportKind::GenderAge => gender_age(records)?,
        ReportKind::Purchase => purchase(records)?,
        ReportKind::CityOccupation => city_occupation(records)?,
    };

    log::debug!("Report {} produced {} sections", kind, report.sections.len());
    Ok(report)
}

fn count_distribution(
    chart: ChartKind,
    column: Column,
    groups: Vec<(String, u64)>,
) -> SectionContent {
    let mut dist = Distribution::new(chart, column.header(), "Count");
    for (label, count) in groups {
        dist.push(label, count as f64);
    }
    SectionContent::Distribution(dist)
}

fn sum_distribution(column: Column, measure: Column, groups: Vec<(String, f64)>) -> SectionContent {
    let mut dist = Distribution::new(ChartKind::Bar, column.header(), measure.header());
    for (label, sum) in groups {
        dist.push(label, sum);
    }
    SectionContent::Distribution(dist)
}

fn record_table<'a>(
    columns: &[Column],
    rows: impl IntoIterator<Item = &'a TransactionRecord>,
) -> Table {
    let mut table = Table::new(columns.iter().map(|c| c.header().to_string()).collect());
    for record in rows {
        table.push_row(columns.iter().map(|&c| record.cell(c).to_string()).collect());
    }
    table
}

fn overview(dataset: &Dataset) -> ReportResult {
    let records = dataset.records();
    let columns = dataset.columns();
    let mut report = ReportResult::new(ReportKind::Overview.label());

    report.push("Raw Data", SectionContent::Table(record_table(columns, records)));

    let nulls = null_counts(records, columns);

    let mut info = Table::new(vec![
        "Column".to_string(),
        "Non-Null Count".to_string(),
        "Type".to_string(),
    ]);
    for (column, null_count) in &nulls {
        info.push_row(vec![
            column.header().to_string(),
            (records.len() as u64 - null_count).to_string(),
            column.kind().to_string(),
        ]);
    }
    report.push("Data Information", SectionContent::Table(info));

    let mut null_table = Table::new(vec!["Column".to_string(), "Null Count".to_string()]);
    for (column, null_count) in &nulls {
        null_table.push_row(vec![column.header().to_string(), null_count.to_string()]);
    }
    report.push("Null Values", SectionContent::Table(null_table));

    // Display-only views: nothing downstream consumes them
    let non_null = drop_null_rows(records, columns);
    report.push(
        "Data After Dropping Null Values",
        SectionContent::Table(record_table(columns, non_null.iter().copied())),
    );

    let cleaned_columns: Vec<Column> = columns
        .iter()
        .copied()
        .filter(|c| !matches!(c, Column::ProductCategory2 | Column::ProductCategory3))
        .collect();
    report.push(
        "Data After Dropping Product Categories 2 and 3",
        SectionContent::Table(record_table(&cleaned_columns, non_null)),
    );

    let mut unique = Table::new(vec!["Column".to_string(), "Unique Values".to_string()]);
    for &column in columns {
        unique.push_row(vec![
            column.header().to_string(),
            distinct_count(records, column).to_string(),
        ]);
    }
    report.push("Unique Values", SectionContent::Table(unique));

    report
}

fn gender_age(records: &[TransactionRecord]) -> Result<ReportResult> {
    let mut report = ReportResult::new(ReportKind::GenderAge.label());

    report.push(
        "Gender Distribution",
        count_distribution(ChartKind::Pie, Column::Gender, group_count(records, Column::Gender)),
    );
    report.push(
        "Gender Distribution by Age",
        SectionContent::CrossTab(cross_count(records, Column::Age, Column::Gender)),
    );
    report.push(
        "Purchase Distribution by Age",
        count_distribution(ChartKind::Bar, Column::Age, group_count(records, Column::Age)),
    );

    let products = unique_count(records, Column::Age, Column::ProductId);
    let mut table = Table::new(vec!["Age".to_string(), "Products".to_string()]);
    let mut chart = Distribution::new(ChartKind::Bar, Column::Age.header(), "Products");
    for (age, count) in products {
        table.push_row(vec![age.clone(), count.to_string()]);
        chart.push(age, count as f64);
    }
    report.push("Unique Products Purchased by Age", SectionContent::Table(table));
    report.push(
        "Unique Products Purchased by Age - Bar Chart",
        SectionContent::Distribution(chart),
    );

    Ok(report)
}

fn purchase(records: &[TransactionRecord]) -> Result<ReportResult> {
    let mut report = ReportResult::new(ReportKind::Purchase.label());

    report.push(
        "Amount Spent by Age",
        sum_distribution(
            Column::Age,
            Column::Purchase,
            group_sum(records, Column::Age, Column::Purchase)?,
        ),
    );
    report.push(
        "Marital Status Distribution",
        count_distribution(
            ChartKind::Pie,
            Column::MaritalStatus,
            group_count(records, Column::MaritalStatus),
        ),
    );

    let mut by_category = group_sum(records, Column::ProductCategory1, Column::Purchase)?;
    sort_sums_ascending(&mut by_category);
    report.push(
        "Total Purchase by Product Category 1",
        sum_distribution(Column::ProductCategory1, Column::Purchase, by_category),
    );

    Ok(report)
}

fn city_occupation(records: &[TransactionRecord]) -> Result<ReportResult> {
    let mut report = ReportResult::new(ReportKind::CityOccupation.label());

    report.push(
        "City Category Distribution",
        count_distribution(
            ChartKind::Bar,
            Column::CityCategory,
            group_count(records, Column::CityCategory),
        ),
    );

    let stay = group_count(records, Column::StayInCurrentCityYears);
    report.push(
        "Stay in Current City Years Distribution",
        count_distribution(ChartKind::Bar, Column::StayInCurrentCityYears, stay.clone()),
    );
    report.push(
        "Stay in Current City Years - Pie Chart",
        count_distribution(ChartKind::Pie, Column::StayInCurrentCityYears, stay),
    );

    let occupations = group_count(records, Column::Occupation);
    report.push(
        "Occupation Distribution",
        count_distribution(ChartKind::Bar, Column::Occupation, occupations.clone()),
    );
    let mut sorted = occupations;
    sort_counts_ascending(&mut sorted);
    report.push(
        "Count of Each Occupation",
        count_distribution(ChartKind::Bar, Column::Occupation, sorted),
    );

    let mut by_occupation = group_sum(records, Column::Occupation, Column::Purchase)?;
    sort_sums_ascending(&mut by_occupation);
    report.push(
        "Total Purchase by Occupation",
        sum_distribution(Column::Occupation, Column::Purchase, by_occupation),
    );

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AgeBracket, CityCategory, Gender, StayYears};

    fn record(
        gender: Gender,
        age: AgeBracket,
        occupation: u8,
        category: u8,
        purchase: f64,
    ) -> TransactionRecord {
        TransactionRecord {
            user_id: "1000001".to_string(),
            product_id: format!("P{}", category),
            gender,
            age,
            occupation,
            city_category: CityCategory::A,
            stay_in_current_city_years: StayYears::Two,
            marital_status: false,
            product_category_1: category,
            product_category_2: Some(2),
            product_category_3: None,
            purchase,
        }
    }

    #[test]
    fn test_label_round_trip() {
        for kind in ReportKind::ALL {
            assert_eq!(ReportKind::from_label(kind.label()), Some(kind));
        }
        assert_eq!(ReportKind::from_label("Home"), None);
        assert_eq!(ReportKind::from_label("purchase analysis"), None);
    }

    #[test]
    fn test_empty_dataset_errors() {
        let dataset = Dataset::new(Vec::new());
        let params = ReportParameters::new();
        for kind in [ReportKind::GenderAge, ReportKind::Purchase, ReportKind::CityOccupation] {
            assert!(matches!(
                compute_report(&dataset, kind, &params),
                Err(ReportError::EmptyDataset)
            ));
        }
        assert!(compute_report(&dataset, ReportKind::Overview, &params).is_ok());
    }

    #[test]
    fn test_missing_column_checked_before_empty() {
        let dataset = Dataset::with_columns(Vec::new(), vec![Column::Gender]);
        let result = compute_report(&dataset, ReportKind::GenderAge, &ReportParameters::new());
        assert!(matches!(result, Err(ReportError::MissingColumn(name)) if name == "Age"));
    }

    #[test]
    fn test_sorted_sections_are_ascending() {
        let records = vec![
            record(Gender::Male, AgeBracket::From26To35, 7, 1, 500.0),
            record(Gender::Female, AgeBracket::From26To35, 3, 5, 40.0),
            record(Gender::Male, AgeBracket::From36To45, 7, 8, 90.0),
            record(Gender::Male, AgeBracket::From36To45, 12, 5, 300.0),
        ];
        let dataset = Dataset::new(records);
        let params = ReportParameters::new();

        let purchase = compute_report(&dataset, ReportKind::Purchase, &params).unwrap();
        let by_category = purchase.distribution("Total Purchase by Product Category 1").unwrap();
        assert_eq!(by_category.labels(), vec!["8", "5", "1"]);

        let city = compute_report(&dataset, ReportKind::CityOccupation, &params).unwrap();
        for label in ["Total Purchase by Occupation", "Count of Each Occupation"] {
            let values: Vec<f64> =
                city.distribution(label).unwrap().entries.iter().map(|e| e.value).collect();
            assert!(values.windows(2).all(|w| w[0] <= w[1]), "{} not sorted", label);
        }
        let occupation = city.distribution("Occupation Distribution").unwrap();
        assert_eq!(occupation.labels(), vec!["7", "3", "12"]);
    }

    #[test]
    fn test_overview_cleaned_view() {
        let mut records = vec![
            record(Gender::Male, AgeBracket::From26To35, 7, 1, 500.0),
            record(Gender::Female, AgeBracket::From26To35, 3, 5, 40.0),
        ];
        records[1].product_category_3 = Some(9);
        let dataset = Dataset::new(records);

        let report =
            compute_report(&dataset, ReportKind::Overview, &ReportParameters::new()).unwrap();
        assert_eq!(report.table("Raw Data").unwrap().len(), 2);

        let non_null = report.table("Data After Dropping Null Values").unwrap();
        assert_eq!(non_null.len(), 1);

        let cleaned = report.table("Data After Dropping Product Categories 2 and 3").unwrap();
        assert_eq!(cleaned.len(), 1);
        assert!(cleaned.column_index("Product_Category_2").is_none());
        assert!(cleaned.column_index("Product_Category_3").is_none());
        assert_eq!(cleaned.headers.len(), 10);

        let nulls = report.table("Null Values").unwrap();
        let cat3 = nulls.rows.iter().find(|r| r[0] == "Product_Category_3").unwrap();
        assert_eq!(cat3[1], "1");
    }
}
