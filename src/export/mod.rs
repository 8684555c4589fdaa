//! Export module for ZenBudget
//!
//! - CSV: one year of daily and fixed expenses (spreadsheet-compatible)
//! - JSON: the full budget document with export metadata

pub mod csv;
pub mod json;

pub use csv::{default_csv_file_name, export_year_csv, CsvRow};
pub use json::{export_full_json, ExportMetadata, FullExport, EXPORT_SCHEMA_VERSION};
