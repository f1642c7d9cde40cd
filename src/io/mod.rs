//! Import and export: whole-form JSON, per-list CSV, text summary report

mod json;
mod table;
mod report;

pub use json::{export_json, import_json, form_from_value};
pub use table::{columns_for, list_to_csv, list_from_csv};
pub use report::render_summary;
