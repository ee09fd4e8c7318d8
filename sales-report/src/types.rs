//! Core types for the sales report library
//!
//! This module defines the typed transaction record, the fixed column schema of
//! the retail dataset and the error type shared by loading and aggregation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Result type for library operations
pub type Result<T> = std::result::Result<T, ReportError>;

/// Errors that can occur while loading a dataset or computing a report
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("Missing column: {0}")]
    MissingColumn(String),

    #[error("Dataset is empty")]
    EmptyDataset,

    #[error("Malformed input at line {line}: {reason}")]
    MalformedInput { line: u64, reason: String },

    #[error("Column is not numeric: {0}")]
    NonNumericColumn(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Customer gender as recorded in the dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "F")]
    Female,
    #[serde(rename = "M")]
    Male,
}

impl Gender {
    pub fn label(&self) -> &'static str {
        match self {
            Gender::Female => "F",
            Gender::Male => "M",
        }
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "F" => Ok(Gender::Female),
            "M" => Ok(Gender::Male),
            other => Err(format!("unknown gender '{}'", other)),
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Customer age bracket (ordered)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AgeBracket {
    #[serde(rename = "0-17")]
    UpTo17,
    #[serde(rename = "18-25")]
    From18To25,
    #[serde(rename = "26-35")]
    From26To35,
    #[serde(rename = "36-45")]
    From36To45,
    #[serde(rename = "46-50")]
    From46To50,
    #[serde(rename = "51-55")]
    From51To55,
    #[serde(rename = "55+")]
    Over55,
}

impl AgeBracket {
    /// All brackets in ascending order
    pub const ALL: [AgeBracket; 7] = [
        AgeBracket::UpTo17,
        AgeBracket::From18To25,
        AgeBracket::From26To35,
        AgeBracket::From36To45,
        AgeBracket::From46To50,
        AgeBracket::From51To55,
        AgeBracket::Over55,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            AgeBracket::UpTo17 => "0-17",
            AgeBracket::From18To25 => "18-25",
            AgeBracket::From26To35 => "26-35",
            AgeBracket::From36To45 => "36-45",
            AgeBracket::From46To50 => "46-50",
            AgeBracket::From51To55 => "51-55",
            AgeBracket::Over55 => "55+",
        }
    }
}

impl FromStr for AgeBracket {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        AgeBracket::ALL
            .iter()
            .copied()
            .find(|bracket| bracket.label() == s)
            .ok_or_else(|| format!("unknown age bracket '{}'", s))
    }
}

impl fmt::Display for AgeBracket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// City category (A, B or C)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CityCategory {
    A,
    B,
    C,
}

impl CityCategory {
    pub fn label(&self) -> &'static str {
        match self {
            CityCategory::A => "A",
            CityCategory::B => "B",
            CityCategory::C => "C",
        }
    }
}

impl FromStr for CityCategory {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "A" => Ok(CityCategory::A),
            "B" => Ok(CityCategory::B),
            "C" => Ok(CityCategory::C),
            other => Err(format!("unknown city category '{}'", other)),
        }
    }
}

impl fmt::Display for CityCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Years lived in the current city; the top bucket is open-ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StayYears {
    #[serde(rename = "0")]
    Zero,
    #[serde(rename = "1")]
    One,
    #[serde(rename = "2")]
    Two,
    #[serde(rename = "3")]
    Three,
    #[serde(rename = "4+")]
    FourOrMore,
}

impl StayYears {
    pub const ALL: [StayYears; 5] = [
        StayYears::Zero,
        StayYears::One,
        StayYears::Two,
        StayYears::Three,
        StayYears::FourOrMore,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            StayYears::Zero => "0",
            StayYears::One => "1",
            StayYears::Two => "2",
            StayYears::Three => "3",
            StayYears::FourOrMore => "4+",
        }
    }
}

impl FromStr for StayYears {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        StayYears::ALL
            .iter()
            .copied()
            .find(|years| years.label() == s)
            .ok_or_else(|| format!("unknown stay duration '{}'", s))
    }
}

impl fmt::Display for StayYears {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The fixed column schema of the transaction dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Column {
    UserId,
    ProductId,
    Gender,
    Age,
    Occupation,
    CityCategory,
    StayInCurrentCityYears,
    MaritalStatus,
    ProductCategory1,
    ProductCategory2,
    ProductCategory3,
    Purchase,
}

impl Column {
    /// All columns in file order
    pub const ALL: [Column; 12] = [
        Column::UserId,
        Column::ProductId,
        Column::Gender,
        Column::Age,
        Column::Occupation,
        Column::CityCategory,
        Column::StayInCurrentCityYears,
        Column::MaritalStatus,
        Column::ProductCategory1,
        Column::ProductCategory2,
        Column::ProductCategory3,
        Column::Purchase,
    ];

    /// Header name used in the CSV file
    pub fn header(&self) -> &'static str {
        match self {
            Column::UserId => "User_ID",
            Column::ProductId => "Product_ID",
            Column::Gender => "Gender",
            Column::Age => "Age",
            Column::Occupation => "Occupation",
            Column::CityCategory => "City_Category",
            Column::StayInCurrentCityYears => "Stay_In_Current_City_Years",
            Column::MaritalStatus => "Marital_Status",
            Column::ProductCategory1 => "Product_Category_1",
            Column::ProductCategory2 => "Product_Category_2",
            Column::ProductCategory3 => "Product_Category_3",
            Column::Purchase => "Purchase",
        }
    }

    /// Look up a column by its exact CSV header
    pub fn from_header(header: &str) -> Option<Column> {
        Column::ALL.iter().copied().find(|c| c.header() == header)
    }

    /// True for the nullable product category columns, which may also be
    /// missing from the file header entirely
    pub fn is_optional(&self) -> bool {
        matches!(self, Column::ProductCategory2 | Column::ProductCategory3)
    }

    pub fn kind(&self) -> ColumnKind {
        match self {
            Column::UserId
            | Column::ProductId
            | Column::Gender
            | Column::Age
            | Column::CityCategory
            | Column::StayInCurrentCityYears => ColumnKind::Text,
            Column::Occupation | Column::ProductCategory1 => ColumnKind::Integer,
            Column::ProductCategory2 | Column::ProductCategory3 => ColumnKind::NullableInteger,
            Column::MaritalStatus => ColumnKind::Flag,
            Column::Purchase => ColumnKind::Float,
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}

/// Storage type of a column, reported by the overview
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnKind {
    Text,
    Integer,
    NullableInteger,
    Flag,
    Float,
}

impl ColumnKind {
    /// True if values of this kind can be summed
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            ColumnKind::Integer | ColumnKind::NullableInteger | ColumnKind::Float
        )
    }
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnKind::Text => write!(f, "text"),
            ColumnKind::Integer => write!(f, "integer"),
            ColumnKind::NullableInteger => write!(f, "integer (nullable)"),
            ColumnKind::Flag => write!(f, "flag"),
            ColumnKind::Float => write!(f, "float"),
        }
    }
}

/// A single value read out of a record by column
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cell<'a> {
    Text(&'a str),
    Integer(i64),
    Float(f64),
    Flag(bool),
    Null,
}

impl Cell<'_> {
    pub fn is_null(&self) -> bool {
        matches!(self, Cell::Null)
    }

    /// Numeric value for summing; nulls contribute nothing
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Integer(v) => Some(*v as f64),
            Cell::Float(v) => Some(*v),
            Cell::Flag(v) => Some(if *v { 1.0 } else { 0.0 }),
            Cell::Text(_) | Cell::Null => None,
        }
    }
}

impl fmt::Display for Cell<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Text(v) => f.write_str(v),
            Cell::Integer(v) => write!(f, "{}", v),
            Cell::Float(v) => write!(f, "{}", v),
            Cell::Flag(v) => write!(f, "{}", if *v { 1 } else { 0 }),
            Cell::Null => write!(f, "NaN"),
        }
    }
}

/// One transaction row of the dataset
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionRecord {
    /// Customer identifier (non-empty)
    pub user_id: String,
    /// Product identifier (non-empty)
    pub product_id: String,
    pub gender: Gender,
    pub age: AgeBracket,
    /// Occupation code
    pub occupation: u8,
    pub city_category: CityCategory,
    pub stay_in_current_city_years: StayYears,
    /// True if married (CSV value `1`)
    pub marital_status: bool,
    pub product_category_1: u8,
    pub product_category_2: Option<u8>,
    pub product_category_3: Option<u8>,
    /// Purchase amount in currency units (non-negative)
    pub purchase: f64,
}

impl TransactionRecord {
    /// Read the value of a column from this record
    pub fn cell(&self, column: Column) -> Cell<'_> {
        match column {
            Column::UserId => Cell::Text(&self.user_id),
            Column::ProductId => Cell::Text(&self.product_id),
            Column::Gender => Cell::Text(self.gender.label()),
            Column::Age => Cell::Text(self.age.label()),
            Column::Occupation => Cell::Integer(self.occupation.into()),
            Column::CityCategory => Cell::Text(self.city_category.label()),
            Column::StayInCurrentCityYears => Cell::Text(self.stay_in_current_city_years.label()),
            Column::MaritalStatus => Cell::Flag(self.marital_status),
            Column::ProductCategory1 => Cell::Integer(self.product_category_1.into()),
            Column::ProductCategory2 => self
                .product_category_2
                .map_or(Cell::Null, |v| Cell::Integer(v.into())),
            Column::ProductCategory3 => self
                .product_category_3
                .map_or(Cell::Null, |v| Cell::Integer(v.into())),
            Column::Purchase => Cell::Float(self.purchase),
        }
    }

    /// True if any nullable column of this record is empty
    pub fn has_nulls(&self) -> bool {
        self.product_category_2.is_none() || self.product_category_3.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TransactionRecord {
        TransactionRecord {
            user_id: "1000001".to_string(),
            product_id: "P00069042".to_string(),
            gender: Gender::Female,
            age: AgeBracket::UpTo17,
            occupation: 10,
            city_category: CityCategory::A,
            stay_in_current_city_years: StayYears::Two,
            marital_status: false,
            product_category_1: 3,
            product_category_2: None,
            product_category_3: Some(14),
            purchase: 8370.0,
        }
    }

    #[test]
    fn test_label_parsing() {
        assert_eq!("55+".parse::<AgeBracket>(), Ok(AgeBracket::Over55));
        assert_eq!("4+".parse::<StayYears>(), Ok(StayYears::FourOrMore));
        assert_eq!("M".parse::<Gender>(), Ok(Gender::Male));
        assert_eq!("B".parse::<CityCategory>(), Ok(CityCategory::B));
        assert!("60+".parse::<AgeBracket>().is_err());
        assert!("5".parse::<StayYears>().is_err());
    }

    #[test]
    fn test_column_headers_round_trip() {
        for column in Column::ALL {
            assert_eq!(Column::from_header(column.header()), Some(column));
        }
        assert_eq!(Column::from_header("purchase"), None);
    }

    #[test]
    fn test_cell_access() {
        let record = sample();
        assert_eq!(record.cell(Column::Age), Cell::Text("0-17"));
        assert_eq!(record.cell(Column::Occupation), Cell::Integer(10));
        assert_eq!(record.cell(Column::ProductCategory2), Cell::Null);
        assert_eq!(record.cell(Column::ProductCategory3), Cell::Integer(14));
        assert_eq!(record.cell(Column::MaritalStatus).to_string(), "0");
        assert_eq!(record.cell(Column::Purchase).to_string(), "8370");
        assert!(record.has_nulls());
    }

    #[test]
    fn test_numeric_kinds() {
        assert!(Column::Purchase.kind().is_numeric());
        assert!(Column::ProductCategory3.kind().is_numeric());
        assert!(!Column::Gender.kind().is_numeric());
        assert_eq!(Cell::Text("x").as_f64(), None);
        assert_eq!(Cell::Null.as_f64(), None);
    }
}
