// End-to-end checks: CSV on disk -> dataset -> reports
use sales_report::{
    compute_report, load_dataset, read_dataset, Column, LoadConfig, ReportError, ReportKind,
    ReportParameters,
};
use std::io::Write;
use tempfile::NamedTempFile;

const HEADER: &str = "User_ID,Product_ID,Gender,Age,Occupation,City_Category,Stay_In_Current_City_Years,Marital_Status,Product_Category_1,Product_Category_2,Product_Category_3,Purchase";

const ROWS: &str = "\
1000001,P00069042,F,0-17,10,A,2,0,3,,,8370
1000001,P00248942,F,0-17,10,A,2,0,1,6,14,15200
1000001,P00087842,F,0-17,10,A,2,0,12,,,1422
1000001,P00085442,F,0-17,10,A,2,0,12,14,,1057
1000002,P00285442,M,55+,16,C,4+,0,8,,,7969
1000003,P00193542,M,26-35,15,A,3,0,1,2,,15227
1000004,P00184942,M,46-50,7,B,2,1,1,8,17,19215
1000004,P00346142,M,46-50,7,B,2,1,1,15,,15854
1000004,P0097242,M,46-50,7,B,2,1,1,16,,15686
1000005,P00274942,M,26-35,20,A,1,1,8,,,7871
";

fn write_csv(contents: &str) -> NamedTempFile {
    let mut tmp = NamedTempFile::new().unwrap();
    write!(tmp, "{}", contents).unwrap();
    tmp
}

fn sample_file() -> NamedTempFile {
    write_csv(&format!("{}\n{}", HEADER, ROWS))
}

#[test]
fn test_load_sample_file() {
    let tmp = sample_file();
    let dataset = load_dataset(tmp.path(), &LoadConfig::new()).unwrap();

    assert_eq!(dataset.len(), 10);
    assert_eq!(dataset.summary().rows_skipped, 0);
    assert_eq!(dataset.source(), Some(tmp.path()));
    assert_eq!(dataset.records()[1].product_category_2, Some(6));
    assert_eq!(dataset.records()[0].product_category_2, None);
}

#[test]
fn test_gender_and_age_scenario() {
    let csv = format!(
        "{}\n{}\n{}\n{}\n",
        HEADER,
        "1,P1,F,18-25,1,A,1,0,1,,,100",
        "2,P2,M,18-25,1,A,1,0,1,,,200",
        "3,P1,F,26-35,1,A,1,0,1,,,50",
    );
    let dataset = read_dataset(csv.as_bytes(), &LoadConfig::new()).unwrap();
    let params = ReportParameters::new();

    let gender_age = compute_report(&dataset, ReportKind::GenderAge, &params).unwrap();
    let genders = gender_age.distribution("Gender Distribution").unwrap();
    assert_eq!(genders.get("F"), Some(2.0));
    assert_eq!(genders.get("M"), Some(1.0));

    let unique = gender_age.table("Unique Products Purchased by Age").unwrap();
    assert_eq!(unique.rows, vec![vec!["18-25", "2"], vec!["26-35", "1"]]);

    let purchase = compute_report(&dataset, ReportKind::Purchase, &params).unwrap();
    let by_age = purchase.distribution("Amount Spent by Age").unwrap();
    assert_eq!(by_age.get("18-25"), Some(300.0));
    assert_eq!(by_age.get("26-35"), Some(50.0));
}

#[test]
fn test_all_reports_on_sample() {
    let tmp = sample_file();
    let dataset = load_dataset(tmp.path(), &LoadConfig::new()).unwrap();
    let params = ReportParameters::new();
    let total_purchase: f64 = dataset.records().iter().map(|r| r.purchase).sum();

    for kind in ReportKind::ALL {
        let report = compute_report(&dataset, kind, &params).unwrap();
        assert_eq!(report.title, kind.label());
        assert!(!report.sections.is_empty());
    }

    let city = compute_report(&dataset, ReportKind::CityOccupation, &params).unwrap();
    let by_occupation = city.distribution("Total Purchase by Occupation").unwrap();
    assert_eq!(by_occupation.total(), total_purchase);

    let counts = city.distribution("Stay in Current City Years - Pie Chart").unwrap();
    assert_eq!(counts.total(), dataset.len() as f64);

    let gender_age = compute_report(&dataset, ReportKind::GenderAge, &params).unwrap();
    let tab = gender_age.cross_tab("Gender Distribution by Age").unwrap();
    assert_eq!(tab.total(), dataset.len() as u64);
    assert_eq!(tab.count("0-17", "F"), Some(4));
    assert_eq!(tab.count("0-17", "M"), Some(0));

    let overview = compute_report(&dataset, ReportKind::Overview, &params).unwrap();
    let cleaned = overview
        .table("Data After Dropping Product Categories 2 and 3")
        .unwrap();
    assert_eq!(cleaned.len(), 2);
    assert!(cleaned.len() <= dataset.len());
    assert!(cleaned.column_index(Column::ProductCategory2.header()).is_none());
}

#[test]
fn test_report_does_not_mutate_dataset() {
    let tmp = sample_file();
    let dataset = load_dataset(tmp.path(), &LoadConfig::new()).unwrap();
    let before = dataset.records().to_vec();

    let params = ReportParameters::new();
    let first = compute_report(&dataset, ReportKind::Overview, &params).unwrap();
    let second = compute_report(&dataset, ReportKind::Overview, &params).unwrap();

    assert_eq!(first, second);
    assert_eq!(dataset.records(), before.as_slice());
}

#[test]
fn test_missing_header_column() {
    let tmp = write_csv("User_ID,Product_ID,Gender,Age\n1,P1,F,18-25\n");
    let result = load_dataset(tmp.path(), &LoadConfig::new());
    assert!(matches!(result, Err(ReportError::MissingColumn(name)) if name == "Occupation"));
}

#[test]
fn test_malformed_row_fails_or_skips() {
    let csv = format!(
        "{}\n{}\n{}\n",
        HEADER, "1000001,P00069042,F,0-17,10,A,2,0,3,,,8370", "1000002,P00285442,X,55+,16,C,4+,0,8,,,7969",
    );

    match read_dataset(csv.as_bytes(), &LoadConfig::new()) {
        Err(ReportError::MalformedInput { line, reason }) => {
            assert_eq!(line, 3);
            assert!(reason.contains("gender"));
        }
        other => panic!("unexpected result: {:?}", other.map(|d| d.len())),
    }

    let config = LoadConfig::new().with_skip_malformed_rows(true);
    let dataset = read_dataset(csv.as_bytes(), &config).unwrap();
    assert_eq!(dataset.len(), 1);
    assert_eq!(dataset.summary().rows_skipped, 1);
}

#[test]
fn test_semicolon_delimiter() {
    let csv = format!("{}\n{}\n", HEADER, "1,P1,M,36-45,0,B,0,1,5,,,99").replace(',', ";");
    let dataset = read_dataset(csv.as_bytes(), &LoadConfig::new().with_delimiter(b';')).unwrap();
    assert_eq!(dataset.len(), 1);
    assert!(dataset.records()[0].marital_status);
}
