use std::path::Path;
use std::sync::OnceLock;

use anyhow::{Context, Result};
use calamine::{open_workbook_auto, Data, ExcelDateTime, Reader};
use chrono::Timelike;
use regex::Regex;

use super::model::{CellValue, DashboardData, DoctorRecord, DoctorTable, Sheet, Workbook};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Load failures that mean the doctor table cannot be shown at all.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),
    #[error("sheet '{name}' not found (available: {available})")]
    MissingSheet { name: String, available: String },
    #[error("sheet '{sheet}' has no '{column}' column")]
    MissingColumn { sheet: String, column: &'static str },
    #[error("sheet '{0}' has no header row")]
    EmptySheet(String),
}

// ---------------------------------------------------------------------------
// Fixed schema of the main sheet
// ---------------------------------------------------------------------------

const COL_NAME: &[&str] = &["Doctor Name"];
/// The source sheets spell it "Specilized".
const COL_SPECIALIZATION: &[&str] = &["Specilized", "Specialized", "Specialization"];
const COL_CITY: &[&str] = &["City"];
const COL_RATING: &[&str] = &["Rating"];
const COL_COST: &[&str] = &["Cost"];

/// 1-based spreadsheet row of the `index`-th data row (the header is row 1).
fn sheet_row(index: usize) -> usize {
    index + 2
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load the workbook and validate the main sheet into a [`DoctorTable`].
pub fn load_dashboard_data(path: &Path, sheet: &str) -> Result<DashboardData> {
    let workbook = load_workbook(path)?;
    log::info!(
        "Sheets in {}: {}",
        path.display(),
        workbook.sheet_names().join(", ")
    );

    let main = workbook.sheet(sheet).ok_or_else(|| LoadError::MissingSheet {
        name: sheet.to_string(),
        available: workbook.sheet_names().join(", "),
    })?;
    let doctors = DoctorTable::from_sheet(main)?;

    log::info!(
        "Loaded {} doctors ({} cities, {} specializations)",
        doctors.len(),
        doctors.cities.len(),
        doctors.specializations.len()
    );
    let unrated = doctors.unrated_count();
    if doctors.is_empty() {
        log::warn!("Sheet '{sheet}' has no doctor rows");
    } else if unrated > 0 {
        log::warn!("{unrated} doctor(s) have no parseable rating and will not be charted");
    }

    Ok(DashboardData { workbook, doctors })
}

/// Read every sheet of a spreadsheet file.  Dispatch by extension.
///
/// Supported formats:
/// * `.xlsx` / `.xlsm` / `.xlsb` / `.xls` / `.ods` – all sheets, via calamine
/// * `.csv` – a single sheet named after the file stem
pub fn load_workbook(path: &Path) -> Result<Workbook> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => load_spreadsheet(path),
        "csv" => load_csv(path),
        other => Err(LoadError::UnsupportedExtension(other.to_string()).into()),
    }
}

// ---------------------------------------------------------------------------
// Rating extraction
// ---------------------------------------------------------------------------

fn rating_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\d+\.\d+").expect("Invalid rating regex"))
}

/// Pull the first decimal number (`4.5` in `"4.5 (12 reviews)"`) out of a
/// rating cell.  Text without a decimal number yields `None`.
/// Cells the spreadsheet already stores as numbers are taken by value.
pub fn extract_rating(cell: &CellValue) -> Option<f64> {
    match cell {
        CellValue::String(s) => rating_pattern()
            .find(s)
            .and_then(|m| m.as_str().parse::<f64>().ok()),
        other => other.as_f64(),
    }
}

// ---------------------------------------------------------------------------
// Sheet → DoctorTable
// ---------------------------------------------------------------------------

impl DoctorTable {
    /// Validate the fixed schema once and convert every row.
    pub fn from_sheet(sheet: &Sheet) -> Result<Self, LoadError> {
        let require = |names: &'static [&'static str]| {
            sheet
                .column_index(names)
                .ok_or_else(|| LoadError::MissingColumn {
                    sheet: sheet.name.clone(),
                    column: names[0],
                })
        };
        let name_idx = require(COL_NAME)?;
        let spec_idx = require(COL_SPECIALIZATION)?;
        let city_idx = require(COL_CITY)?;
        let rating_idx = require(COL_RATING)?;
        let cost_idx = require(COL_COST)?;

        let fixed = [name_idx, spec_idx, city_idx, rating_idx, cost_idx];
        let extra_idx: Vec<usize> = (0..sheet.headers.len())
            .filter(|i| !fixed.contains(i))
            .collect();
        let extra_columns = extra_idx
            .iter()
            .map(|&i| sheet.headers[i].trim().to_string())
            .collect();

        let records = (0..sheet.rows.len())
            .map(|row| {
                let rating_text = sheet.cell(row, rating_idx).clone();
                let rating = extract_rating(&rating_text);
                if let Some(r) = rating.filter(|r| !(0.0..=5.0).contains(r)) {
                    log::warn!("Row {}: rating {r} is outside 0–5", sheet_row(row));
                }
                DoctorRecord {
                    name: sheet.cell(row, name_idx).to_text(),
                    specialization: sheet.cell(row, spec_idx).to_text(),
                    city: sheet.cell(row, city_idx).to_text(),
                    rating,
                    rating_text,
                    cost: sheet.cell(row, cost_idx).clone(),
                    extra: extra_idx.iter().map(|&i| sheet.cell(row, i).clone()).collect(),
                }
            })
            .collect();

        let mut table = DoctorTable::from_records(records, extra_columns);
        table.specialization_column = sheet.headers[spec_idx].trim().to_string();
        Ok(table)
    }
}

// ---------------------------------------------------------------------------
// Spreadsheet loader (calamine)
// ---------------------------------------------------------------------------

fn load_spreadsheet(path: &Path) -> Result<Workbook> {
    let mut book = open_workbook_auto(path)
        .with_context(|| format!("opening workbook {}", path.display()))?;

    let mut sheets = Vec::new();
    for name in book.sheet_names() {
        let range = book
            .worksheet_range(&name)
            .with_context(|| format!("reading sheet '{name}'"))?;

        let mut rows = range
            .rows()
            .map(|row| row.iter().map(data_to_cell).collect::<Vec<_>>())
            .filter(|row| !row.iter().all(CellValue::is_null));

        // A sheet with nothing in it is kept, just without headers.
        let headers: Vec<String> = rows
            .next()
            .map(|h| h.iter().map(|c| c.to_text()).collect())
            .unwrap_or_default();
        let rows: Vec<Vec<CellValue>> = rows.collect();

        sheets.push(Sheet { name, headers, rows });
    }

    Ok(Workbook { sheets })
}

fn data_to_cell(data: &Data) -> CellValue {
    match data {
        Data::String(s) if s.trim().is_empty() => CellValue::Null,
        Data::String(s) => CellValue::String(s.clone()),
        Data::Int(i) => CellValue::Integer(*i),
        Data::Float(f) => CellValue::Float(*f),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => excel_date_to_cell(dt),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Date(s.clone()),
        // Empty cells and formula errors (#N/A, #DIV/0!, ...)
        _ => CellValue::Null,
    }
}

/// Excel stores dates as day serials; show them as ISO dates.
/// Durations and serials outside chrono's range stay numeric.
fn excel_date_to_cell(dt: &ExcelDateTime) -> CellValue {
    if dt.is_duration() {
        return CellValue::Float(dt.as_f64());
    }
    match dt.as_datetime() {
        Some(ts) if ts.num_seconds_from_midnight() == 0 => {
            CellValue::Date(ts.format("%Y-%m-%d").to_string())
        }
        Some(ts) => CellValue::Date(ts.format("%Y-%m-%dT%H:%M:%S").to_string()),
        None => CellValue::Float(dt.as_f64()),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, one doctor per line.
fn load_csv(path: &Path) -> Result<Workbook> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("opening CSV {}", path.display()))?;
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {}", sheet_row(row_no)))?;
        let row: Vec<CellValue> = record.iter().map(guess_cell_type).collect();
        if row.iter().all(CellValue::is_null) {
            continue;
        }
        rows.push(row);
    }

    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("Sheet1")
        .to_string();
    if headers.is_empty() {
        return Err(LoadError::EmptySheet(name).into());
    }

    Ok(Workbook {
        sheets: vec![Sheet { name, headers, rows }],
    })
}

fn guess_cell_type(s: &str) -> CellValue {
    let s = s.trim();
    if s.is_empty() {
        return CellValue::Null;
    }
    if let Ok(i) = s.parse::<i64>() {
        return CellValue::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        return CellValue::Float(f);
    }
    if s == "true" || s == "false" {
        return CellValue::Bool(s == "true");
    }
    CellValue::String(s.to_string())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn text(s: &str) -> CellValue {
        CellValue::String(s.to_string())
    }

    fn details_sheet(rows: Vec<Vec<CellValue>>) -> Sheet {
        Sheet {
            name: "Details".into(),
            headers: ["Doctor Name", "Specilized", "City", "Rating", "Cost"]
                .map(String::from)
                .to_vec(),
            rows,
        }
    }

    fn write_csv(dir: &tempfile::TempDir, name: &str, body: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(body.as_bytes()).unwrap();
        path
    }

    #[test]
    fn rating_takes_first_decimal_number() {
        assert_eq!(extract_rating(&text("4.5 (12)")), Some(4.5));
        assert_eq!(extract_rating(&text("Rated 3.75 / 5.0")), Some(3.75));
        assert_eq!(extract_rating(&CellValue::Float(4.0)), Some(4.0));
    }

    #[test]
    fn rating_without_decimal_number_is_absent() {
        for cell in [
            text("no reviews"),
            text("4 stars"),
            text(""),
            text("."),
            CellValue::Null,
            CellValue::Bool(true),
        ] {
            assert_eq!(extract_rating(&cell), None, "{cell:?}");
        }
    }

    #[test]
    fn from_sheet_maps_fixed_columns() {
        let sheet = details_sheet(vec![
            vec![text("A"), text("Derm"), text("NYC"), text("4.5 (12)"), text("$100")],
            vec![text("B"), text("Cardio"), text("LA"), text("n/a"), CellValue::Float(200.0)],
        ]);
        let table = DoctorTable::from_sheet(&sheet).unwrap();

        assert_eq!(table.len(), 2);
        let a = &table.records[0];
        assert_eq!(a.name, "A");
        assert_eq!(a.specialization, "Derm");
        assert_eq!(a.city, "NYC");
        assert_eq!(a.rating, Some(4.5));
        assert_eq!(a.cost, text("$100"));
        assert_eq!(table.records[1].rating, None);
        assert_eq!(table.records[1].rating_text, text("n/a"));
        assert_eq!(table.records[1].cost, CellValue::Float(200.0));
        assert!(table.extra_columns.is_empty());
    }

    #[test]
    fn from_sheet_keeps_extra_columns_in_order() {
        let sheet = Sheet {
            name: "Details".into(),
            headers: ["Hospital", "Doctor Name", "Specialization", "City", "Rating", "Cost", "Phone"]
                .map(String::from)
                .to_vec(),
            rows: vec![vec![
                text("General"),
                text("A"),
                text("Endo"),
                text("Pune"),
                text("4.1"),
                CellValue::Integer(500),
                text("555"),
            ]],
        };
        let table = DoctorTable::from_sheet(&sheet).unwrap();
        assert_eq!(table.extra_columns, vec!["Hospital", "Phone"]);
        assert_eq!(table.records[0].extra, vec![text("General"), text("555")]);
        assert_eq!(table.records[0].specialization, "Endo");
        assert_eq!(table.specialization_column, "Specialization");
    }

    #[test]
    fn from_sheet_keeps_source_spelling_of_specialization_header() {
        let table = DoctorTable::from_sheet(&details_sheet(Vec::new())).unwrap();
        assert_eq!(table.specialization_column, "Specilized");
    }

    #[test]
    fn from_sheet_reports_missing_column() {
        let sheet = Sheet {
            name: "Details".into(),
            headers: vec!["Doctor Name".into(), "City".into()],
            rows: Vec::new(),
        };
        let err = DoctorTable::from_sheet(&sheet).unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn { column: "Specilized", .. }));
    }

    #[test]
    fn excel_dates_become_iso_text() {
        use calamine::ExcelDateTimeType;

        let day = Data::DateTime(ExcelDateTime::new(45292.0, ExcelDateTimeType::DateTime, false));
        assert_eq!(data_to_cell(&day), CellValue::Date("2024-01-01".into()));
        assert_eq!(data_to_cell(&day).to_string(), "2024-01-01");

        let noon = Data::DateTime(ExcelDateTime::new(45292.5, ExcelDateTimeType::DateTime, false));
        assert_eq!(data_to_cell(&noon), CellValue::Date("2024-01-01T12:00:00".into()));

        let duration = Data::DateTime(ExcelDateTime::new(1.5, ExcelDateTimeType::TimeDelta, false));
        assert_eq!(data_to_cell(&duration), CellValue::Float(1.5));
    }

    #[test]
    fn row_numbers_match_the_spreadsheet() {
        assert_eq!(sheet_row(0), 2);

        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(&dir, "Details.csv", "a,b\n1,2\n3\n");
        let err = load_workbook(&path).unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("CSV row 3"), "{msg}");
    }

    #[test]
    fn csv_becomes_single_sheet_named_after_stem() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            &dir,
            "Details.csv",
            "Doctor Name,Specilized,City,Rating,Cost\n\
             A,Derm,NYC,4.5 (12),$100\n\
             ,,,,\n\
             B,Cardio,LA,3.2 (5),200\n",
        );

        let workbook = load_workbook(&path).unwrap();
        assert_eq!(workbook.sheet_names(), vec!["Details"]);
        let sheet = workbook.sheet("Details").unwrap();
        assert_eq!(sheet.rows.len(), 2);
        assert_eq!(sheet.rows[1][4], CellValue::Integer(200));
    }

    #[test]
    fn dashboard_data_loads_main_sheet() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            &dir,
            "Details.csv",
            "Doctor Name,Specilized,City,Rating,Cost\nA,Derm,NYC,4.5 (12),$100\n",
        );
        let data = load_dashboard_data(&path, "Details").unwrap();
        assert_eq!(data.doctors.len(), 1);
        assert_eq!(data.workbook.sheets.len(), 1);
    }

    #[test]
    fn missing_sheet_lists_available_sheets() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(&dir, "Other.csv", "Doctor Name\nA\n");
        let err = load_dashboard_data(&path, "Details").unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("'Details' not found"), "{msg}");
        assert!(msg.contains("Other"), "{msg}");
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_workbook(&dir.path().join("dr_details.xlsx")).is_err());
        assert!(load_workbook(&dir.path().join("dr_details.csv")).is_err());
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let err = load_workbook(Path::new("doctors.parquet")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LoadError>(),
            Some(LoadError::UnsupportedExtension(ext)) if ext == "parquet"
        ));
    }
}
