/// Data layer: core types, loading, filtering and the chart/table views.
///
/// Architecture:
/// ```text
///  dr_details.xlsx / .csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  read sheets → Workbook, validate `Details` → DoctorTable
///   └──────────┘
///        │
///        ▼
///   ┌─────────────┐
///   │ DoctorTable │  Vec<DoctorRecord>, unique cities / specializations
///   └─────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  FilterSelection → filtered indices
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  report   │  RatingChart + DetailTable, ready to draw
///   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
pub mod report;
