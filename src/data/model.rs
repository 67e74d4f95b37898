use std::collections::BTreeSet;
use std::fmt;

// ---------------------------------------------------------------------------
// CellValue – a single spreadsheet cell
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value as read from a workbook or CSV file.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    /// ISO-8601 date (`2024-01-01` or `2024-01-01T09:30:00`) kept as text.
    Date(String),
    Null,
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            // Spreadsheets store whole numbers as floats; show `100`, not `100.0`.
            CellValue::Float(v) if v.fract() == 0.0 && v.abs() < 1e15 => write!(f, "{v:.0}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Date(d) => write!(f, "{d}"),
            CellValue::Null => Ok(()),
        }
    }
}

impl CellValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Text form used for categorical columns (city, specialization).
    pub fn to_text(&self) -> String {
        self.to_string().trim().to_string()
    }
}

// ---------------------------------------------------------------------------
// Sheet / Workbook – generic multi-sheet access
// ---------------------------------------------------------------------------

/// One worksheet: a header row plus data rows of equal width.
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl Sheet {
    /// Position of the first header matching any of `names` (whitespace-trimmed).
    pub fn column_index(&self, names: &[&str]) -> Option<usize> {
        self.headers
            .iter()
            .position(|h| names.iter().any(|n| h.trim() == *n))
    }

    /// Cell at (`row`, `col`), `Null` for short rows.
    pub fn cell(&self, row: usize, col: usize) -> &CellValue {
        const NULL: &CellValue = &CellValue::Null;
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(NULL)
    }
}

/// Every sheet of a loaded file, in workbook order.
#[derive(Debug, Clone, Default)]
pub struct Workbook {
    pub sheets: Vec<Sheet>,
}

impl Workbook {
    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name == name)
    }

    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }
}

// ---------------------------------------------------------------------------
// DoctorRecord – one row of the main sheet
// ---------------------------------------------------------------------------

/// A single doctor (one row of the `Details` sheet).
#[derive(Debug, Clone, PartialEq)]
pub struct DoctorRecord {
    pub name: String,
    pub specialization: String,
    pub city: String,
    /// Rating extracted from the free-text rating cell, if any.
    pub rating: Option<f64>,
    /// The rating cell as written in the sheet, e.g. `4.5 (12 reviews)`.
    pub rating_text: CellValue,
    /// Passed through unmodified.
    pub cost: CellValue,
    /// Remaining sheet columns, aligned with [`DoctorTable::extra_columns`].
    pub extra: Vec<CellValue>,
}

// ---------------------------------------------------------------------------
// DoctorTable – the validated record set
// ---------------------------------------------------------------------------

/// The full record set with pre-computed filter choices.
#[derive(Debug, Clone, Default)]
pub struct DoctorTable {
    pub records: Vec<DoctorRecord>,
    /// Header names of columns outside the fixed schema, in sheet order.
    pub extra_columns: Vec<String>,
    /// Specialization header as spelled in the sheet.
    pub specialization_column: String,
    /// Sorted unique cities.
    pub cities: BTreeSet<String>,
    /// Sorted unique specializations.
    pub specializations: BTreeSet<String>,
}

impl DoctorTable {
    /// Build the unique-value indices from the loaded records.
    pub fn from_records(records: Vec<DoctorRecord>, extra_columns: Vec<String>) -> Self {
        let cities = records.iter().map(|r| r.city.clone()).collect();
        let specializations = records.iter().map(|r| r.specialization.clone()).collect();
        DoctorTable {
            records,
            extra_columns,
            specialization_column: SPECIALIZATION_HEADER.to_string(),
            cities,
            specializations,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records at the given indices, in index order.
    pub fn view<'a>(&'a self, indices: &'a [usize]) -> impl Iterator<Item = &'a DoctorRecord> + 'a {
        indices.iter().filter_map(|&i| self.records.get(i))
    }

    /// Number of records whose rating could not be parsed.
    pub fn unrated_count(&self) -> usize {
        self.records.iter().filter(|r| r.rating.is_none()).count()
    }
}

/// Header the source sheets use for the specialization column.
pub const SPECIALIZATION_HEADER: &str = "Specilized";

/// Everything read from the input file: the raw workbook and the main table.
#[derive(Debug, Clone)]
pub struct DashboardData {
    pub workbook: Workbook,
    pub doctors: DoctorTable,
}
