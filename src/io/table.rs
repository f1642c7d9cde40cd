//! CSV import/export of a single record list
//!
//! The header row holds field names. Every cell is read back as text, so a
//! round trip turns numbers into their string form; totals are unaffected.

use csv::{Reader, Writer};
use std::io::Read;

use crate::error::{FormError, Result};
use crate::form::{Record, Scalar, SectionName};
use crate::templates::list_spec;

/// Column order for a list: registry declaration order, then any extra fields
/// found in the records, in first-seen order
pub fn columns_for(section: SectionName, list: &str, records: &[Record]) -> Vec<String> {
    let mut columns: Vec<String> = list_spec(section, list)
        .map(|spec| spec.fields.iter().map(|f| f.name.to_string()).collect())
        .unwrap_or_default();

    for record in records {
        for name in record.field_names() {
            if !columns.iter().any(|c| c == name) {
                columns.push(name.to_string());
            }
        }
    }
    columns
}

/// Write records as CSV with the given columns; absent fields are empty cells
pub fn list_to_csv<S: AsRef<str>>(records: &[Record], columns: &[S]) -> Result<String> {
    let mut writer = Writer::from_writer(Vec::new());
    writer.write_record(columns.iter().map(|c| c.as_ref()))?;

    for record in records {
        writer.write_record(
            columns
                .iter()
                .map(|c| record.get(c.as_ref()).map(|v| v.to_string()).unwrap_or_default()),
        )?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| FormError::Io(e.into_error()))?;
    String::from_utf8(bytes)
        .map_err(|e| FormError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}

/// Read records from CSV with a header row
pub fn list_from_csv<R: Read>(reader: R) -> Result<Vec<Record>> {
    let mut csv_reader = Reader::from_reader(reader);
    let headers = csv_reader.headers()?.clone();
    let mut records = Vec::new();

    for result in csv_reader.records() {
        let row = result?;
        let record: Record = headers
            .iter()
            .zip(row.iter())
            .map(|(name, value)| (name, Scalar::from(value)))
            .collect();
        records.push(record);
    }

    Ok(records)
}
