//! CSV row parsing
//!
//! Reads the delimited transaction file in two stages: the header is resolved
//! against the fixed column schema once, then every row is parsed by position
//! into a typed [`TransactionRecord`].

use crate::config::LoadConfig;
use crate::types::{Column, ReportError, Result, TransactionRecord};
use csv::{ReaderBuilder, StringRecord, Trim};
use std::collections::HashMap;
use std::io::Read;

/// Rows accepted and rejected while reading a file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadSummary {
    pub rows_loaded: usize,
    pub rows_skipped: usize,
}

/// Output of a successful read: records, the columns present and counters
#[derive(Debug)]
pub(crate) struct LoadedRows {
    pub records: Vec<TransactionRecord>,
    pub columns: Vec<Column>,
    pub summary: LoadSummary,
}

/// Maps schema columns to their field position in the file
struct HeaderIndex {
    positions: HashMap<Column, usize>,
}

impl HeaderIndex {
    /// Resolve the header row; every non-optional column must be present
    fn resolve(headers: &StringRecord) -> Result<Self> {
        let mut positions = HashMap::new();
        for (idx, name) in headers.iter().enumerate() {
            match Column::from_header(name) {
                Some(column) => {
                    positions.entry(column).or_insert(idx);
                }
                None => log::debug!("Ignoring unknown column: {}", name),
            }
        }

        if let Some(missing) = Column::ALL
            .iter()
            .find(|c| !c.is_optional() && !positions.contains_key(*c))
        {
            return Err(ReportError::MissingColumn(missing.header().to_string()));
        }

        Ok(Self { positions })
    }

    /// Columns present, in schema order
    fn columns(&self) -> Vec<Column> {
        Column::ALL
            .iter()
            .copied()
            .filter(|c| self.positions.contains_key(c))
            .collect()
    }

    fn field<'r>(&self, record: &'r StringRecord, column: Column) -> Option<&'r str> {
        self.positions.get(&column).and_then(|&idx| record.get(idx))
    }

    fn required<'r>(
        &self,
        record: &'r StringRecord,
        column: Column,
    ) -> std::result::Result<&'r str, String> {
        match self.field(record, column) {
            Some(value) if !value.is_empty() => Ok(value),
            _ => Err(format!("{} is empty", column)),
        }
    }

    fn parse_record(
        &self,
        record: &StringRecord,
    ) -> std::result::Result<TransactionRecord, String> {
        let purchase = parse_amount(self.required(record, Column::Purchase)?)?;

        Ok(TransactionRecord {
            user_id: self.required(record, Column::UserId)?.to_string(),
            product_id: self.required(record, Column::ProductId)?.to_string(),
            gender: self.required(record, Column::Gender)?.parse()?,
            age: self.required(record, Column::Age)?.parse()?,
            occupation: parse_code(Column::Occupation, self.required(record, Column::Occupation)?)?,
            city_category: self.required(record, Column::CityCategory)?.parse()?,
            stay_in_current_city_years: self
                .required(record, Column::StayInCurrentCityYears)?
                .parse()?,
            marital_status: parse_flag(self.required(record, Column::MaritalStatus)?)?,
            product_category_1: parse_code(
                Column::ProductCategory1,
                self.required(record, Column::ProductCategory1)?,
            )?,
            product_category_2: self.optional_code(record, Column::ProductCategory2)?,
            product_category_3: self.optional_code(record, Column::ProductCategory3)?,
            purchase,
        })
    }

    /// Empty or absent fields are nulls, not zero
    fn optional_code(
        &self,
        record: &StringRecord,
        column: Column,
    ) -> std::result::Result<Option<u8>, String> {
        match self.field(record, column) {
            None | Some("") => Ok(None),
            Some(value) => parse_code(column, value).map(Some),
        }
    }
}

/// Parse a small integer code; accepts float spellings like `6.0` that
/// spreadsheet exports produce for nullable integer columns
fn parse_code(column: Column, value: &str) -> std::result::Result<u8, String> {
    if let Ok(code) = value.parse::<u8>() {
        return Ok(code);
    }
    match value.parse::<f64>() {
        Ok(v) if v.fract() == 0.0 && (0.0..=f64::from(u8::MAX)).contains(&v) => Ok(v as u8),
        _ => Err(format!("invalid {} '{}'", column, value)),
    }
}

fn parse_flag(value: &str) -> std::result::Result<bool, String> {
    match value {
        "0" => Ok(false),
        "1" => Ok(true),
        other => Err(format!("invalid {} '{}'", Column::MaritalStatus, other)),
    }
}

fn parse_amount(value: &str) -> std::result::Result<f64, String> {
    let amount: f64 = value
        .parse()
        .map_err(|_| format!("invalid {} '{}'", Column::Purchase, value))?;
    if !amount.is_finite() || amount < 0.0 {
        return Err(format!("{} must be non-negative, got {}", Column::Purchase, value));
    }
    Ok(amount)
}

/// Read all rows from a CSV source
pub(crate) fn read_rows<R: Read>(reader: R, config: &LoadConfig) -> Result<LoadedRows> {
    let mut rdr = ReaderBuilder::new()
        .delimiter(config.delimiter)
        .trim(if config.trim { Trim::All } else { Trim::None })
        .from_reader(reader);

    let index = HeaderIndex::resolve(rdr.headers()?)?;
    let columns = index.columns();
    log::debug!("Resolved {} of {} columns", columns.len(), Column::ALL.len());

    let mut records = Vec::new();
    let mut summary = LoadSummary::default();

    for (row, result) in rdr.records().enumerate() {
        // header is line 1
        let fallback_line = row as u64 + 2;
        let parsed = match result {
            Ok(record) => {
                let line = record.position().map_or(fallback_line, |p| p.line());
                index
                    .parse_record(&record)
                    .map_err(|reason| ReportError::MalformedInput { line, reason })
            }
            Err(e) => {
                let line = e.position().map_or(fallback_line, |p| p.line());
                Err(ReportError::MalformedInput {
                    line,
                    reason: e.to_string(),
                })
            }
        };

        match parsed {
            Ok(record) => {
                records.push(record);
                summary.rows_loaded += 1;
            }
            Err(e) if config.skip_malformed_rows => {
                log::warn!("Skipping row: {}", e);
                summary.rows_skipped += 1;
            }
            Err(e) => return Err(e),
        }
    }

    Ok(LoadedRows {
        records,
        columns,
        summary,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "User_ID,Product_ID,Gender,Age,Occupation,City_Category,Stay_In_Current_City_Years,Marital_Status,Product_Category_1,Product_Category_2,Product_Category_3,Purchase";

    fn read(body: &str, config: &LoadConfig) -> Result<LoadedRows> {
        read_rows(format!("{}\n{}", HEADER, body).as_bytes(), config)
    }

    #[test]
    fn test_parse_full_row() {
        let rows =
            read("1000001,P00069042,F,0-17,10,A,2,0,3,,,8370\n", &LoadConfig::new()).unwrap();
        assert_eq!(rows.records.len(), 1);
        let record = &rows.records[0];
        assert_eq!(record.user_id, "1000001");
        assert_eq!(record.occupation, 10);
        assert_eq!(record.product_category_2, None);
        assert_eq!(record.purchase, 8370.0);
        assert_eq!(rows.columns.len(), 12);
    }

    #[test]
    fn test_float_spelled_codes() {
        let rows = read(
            "1000001,P00248942,F,0-17,10,A,2,0,1,6.0,14.0,15200\n",
            &LoadConfig::new(),
        )
        .unwrap();
        assert_eq!(rows.records[0].product_category_2, Some(6));
        assert_eq!(rows.records[0].product_category_3, Some(14));
    }

    #[test]
    fn test_negative_purchase_rejected() {
        let err =
            read("1000001,P00069042,F,0-17,10,A,2,0,3,,,-1\n", &LoadConfig::new()).unwrap_err();
        match err {
            ReportError::MalformedInput { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_optional_columns_may_be_absent() {
        let header = "User_ID,Product_ID,Gender,Age,Occupation,City_Category,Stay_In_Current_City_Years,Marital_Status,Product_Category_1,Purchase";
        let data = format!("{}\n1000002,P00285442,M,55+,16,C,4+,0,8,7969\n", header);
        let rows = read_rows(data.as_bytes(), &LoadConfig::new()).unwrap();
        assert_eq!(rows.columns.len(), 10);
        assert!(!rows.columns.contains(&Column::ProductCategory2));
        assert_eq!(rows.records[0].product_category_3, None);
    }

    #[test]
    fn test_parse_code_bounds() {
        assert_eq!(parse_code(Column::Occupation, "20"), Ok(20));
        assert!(parse_code(Column::Occupation, "256").is_err());
        assert!(parse_code(Column::Occupation, "2.5").is_err());
        assert!(parse_code(Column::Occupation, "x").is_err());
    }
}
